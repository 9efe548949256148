use bytemuck::{Pod, Zeroable};
use model::LinearModel;

use crate::{
    codec::{self, Codec, F32_SIZE},
    error::{Corruption, Result},
};

pub(crate) const MAGIC: [u8; 4] = *b"LMOD";
const VERSION: u16 = 1;
const DTYPE_F32: u16 = 0;

pub(crate) const HEADER_SIZE: usize = size_of::<Header>();

/// The fixed-size prefix of a native artifact. Integers are stored little-endian.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Header {
    magic: [u8; 4],
    version: u16,
    dtype: u16,
    rows: u64,
    cols: u64,
}

impl Header {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION.to_le(),
            dtype: DTYPE_F32.to_le(),
            rows: (rows as u64).to_le(),
            cols: (cols as u64).to_le(),
        }
    }

    /// Validates the header and returns the model's `(rows, cols)`.
    fn dim(&self) -> std::result::Result<(usize, usize), Corruption> {
        if self.magic != MAGIC {
            return Err(Corruption::BadMagic(self.magic));
        }

        let version = u16::from_le(self.version);
        if version != VERSION {
            return Err(Corruption::UnsupportedVersion(version));
        }

        let dtype = u16::from_le(self.dtype);
        if dtype != DTYPE_F32 {
            return Err(Corruption::UnsupportedDtype(dtype));
        }

        let (rows, cols) = (u64::from_le(self.rows), u64::from_le(self.cols));
        if rows == 0 || cols == 0 {
            return Err(Corruption::EmptyShape { rows, cols });
        }

        let overflow = Corruption::DimensionOverflow { rows, cols };
        let r = usize::try_from(rows).map_err(|_| overflow.clone())?;
        let c = usize::try_from(cols).map_err(|_| overflow.clone())?;
        Ok((r, c))
    }
}

/// `magic | version | dtype | rows | cols | weights (row-major) | bias`.
pub(crate) struct Native;

impl Codec for Native {
    fn encode(model: &LinearModel, buf: &mut Vec<u8>) -> Result<()> {
        let (rows, cols) = model.weights().dim();
        let header = Header::new(rows, cols);

        buf.reserve(HEADER_SIZE + (rows * cols + rows) * F32_SIZE);
        buf.extend_from_slice(bytemuck::bytes_of(&header));
        codec::put_f32s(buf, model.weights().iter());
        codec::put_f32s(buf, model.bias().iter());
        Ok(())
    }

    fn decode(buf: &[u8]) -> Result<LinearModel> {
        if buf.len() < HEADER_SIZE {
            return Err(Corruption::Truncated {
                got: buf.len(),
                expected: HEADER_SIZE,
            }
            .into());
        }

        let (header_buf, payload) = buf.split_at(HEADER_SIZE);
        let header: Header = bytemuck::pod_read_unaligned(header_buf);
        let (rows, cols) = header.dim()?;

        let declared = rows
            .checked_mul(cols)
            .and_then(|w| w.checked_add(rows))
            .and_then(|n| n.checked_mul(F32_SIZE))
            .ok_or(Corruption::DimensionOverflow {
                rows: rows as u64,
                cols: cols as u64,
            })?;

        if payload.len() != declared {
            return Err(Corruption::PayloadMismatch {
                declared,
                got: payload.len(),
            }
            .into());
        }

        let (weights, bias) = payload.split_at(rows * cols * F32_SIZE);
        let model =
            LinearModel::from_vecs((rows, cols), codec::get_f32s(weights), codec::get_f32s(bias))
                .map_err(|e| Corruption::InvalidModel(e.to_string()))?;
        Ok(model)
    }
}
