use log::debug;
use model::LinearModel;

use crate::{
    codec::Codec,
    error::Result,
    format::ModelFormat,
    native::{self, Native},
    tensors::SafeTensorsCodec,
};

/// An encoded `LinearModel` tagged with the format its bytes are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact {
    format: ModelFormat,
    bytes: Vec<u8>,
}

impl ModelArtifact {
    /// Encodes `model` in the given format.
    ///
    /// # Arguments
    /// * `model` - The model to encode.
    /// * `format` - The byte layout to use.
    ///
    /// # Returns
    /// The artifact, or an `Encode` error if the underlying writer failed.
    pub fn encode(model: &LinearModel, format: ModelFormat) -> Result<Self> {
        let mut bytes = Vec::new();

        match format {
            ModelFormat::Native => Native::encode(model, &mut bytes)?,
            ModelFormat::SafeTensors => SafeTensorsCodec::encode(model, &mut bytes)?,
        }

        debug!(
            "encoded {}x{} model as {format:?} ({} bytes)",
            model.out_features(),
            model.in_features(),
            bytes.len()
        );

        Ok(Self { format, bytes })
    }

    /// Decodes the model back, bit for bit.
    ///
    /// # Returns
    /// A `CorruptArtifact` error if the bytes don't describe a valid model in this format.
    pub fn decode(&self) -> Result<LinearModel> {
        match self.format {
            ModelFormat::Native => Native::decode(&self.bytes),
            ModelFormat::SafeTensors => SafeTensorsCodec::decode(&self.bytes),
        }
    }

    /// Wraps bytes that are known to be in `format`.
    pub fn from_bytes(format: ModelFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Wraps bytes of unknown format, telling native artifacts apart by their magic.
    /// Anything else is assumed to be safetensors.
    pub fn detect(bytes: Vec<u8>) -> Self {
        let format = if bytes.len() >= native::HEADER_SIZE && bytes.starts_with(&native::MAGIC) {
            ModelFormat::Native
        } else {
            ModelFormat::SafeTensors
        };

        Self { format, bytes }
    }

    pub fn format(&self) -> ModelFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::error::{ArtifactErr, Corruption};

    fn model() -> LinearModel {
        LinearModel::new(
            array![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
            array![f32::MIN_POSITIVE, -0.0],
        )
        .unwrap()
    }

    #[test]
    fn every_format_round_trips() {
        for format in ModelFormat::ALL {
            let artifact = ModelArtifact::encode(&model(), format).unwrap();
            assert_eq!(artifact.format(), format);

            let decoded = artifact.decode().unwrap();
            let bits = |m: &LinearModel| -> Vec<u32> {
                m.weights()
                    .iter()
                    .chain(m.bias().iter())
                    .map(|v| v.to_bits())
                    .collect()
            };
            assert_eq!(bits(&decoded), bits(&model()));
        }
    }

    #[test]
    fn detect_recognizes_both_formats() {
        for format in ModelFormat::ALL {
            let bytes = ModelArtifact::encode(&model(), format)
                .unwrap()
                .into_bytes();
            assert_eq!(ModelArtifact::detect(bytes).format(), format);
        }
    }

    #[test]
    fn decoding_in_the_wrong_format_is_corrupt() {
        let bytes = ModelArtifact::encode(&model(), ModelFormat::Native)
            .unwrap()
            .into_bytes();
        let artifact = ModelArtifact::from_bytes(ModelFormat::SafeTensors, bytes);

        assert!(matches!(
            artifact.decode(),
            Err(ArtifactErr::CorruptArtifact(Corruption::SafeTensors(_)))
        ));
    }
}
