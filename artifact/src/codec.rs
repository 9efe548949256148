use model::LinearModel;

use crate::error::Result;

/// A way of laying a `LinearModel` out as bytes.
pub(crate) trait Codec {
    fn encode(model: &LinearModel, buf: &mut Vec<u8>) -> Result<()>;

    fn decode(buf: &[u8]) -> Result<LinearModel>;
}

pub(crate) const F32_SIZE: usize = size_of::<f32>();

/// Appends `values` to `buf` as little-endian `f32`s.
pub(crate) fn put_f32s<'a, I>(buf: &mut Vec<u8>, values: I)
where
    I: IntoIterator<Item = &'a f32>,
{
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

/// Reads little-endian `f32`s out of a buffer whose length is a multiple of `F32_SIZE`.
pub(crate) fn get_f32s(buf: &[u8]) -> Vec<f32> {
    buf.chunks_exact(F32_SIZE)
        .map(|chunk| f32::from_bits(u32::from_le(bytemuck::pod_read_unaligned(chunk))))
        .collect()
}
