use std::{error::Error, fmt};

/// The artifact module's result type.
pub type Result<T> = std::result::Result<T, ArtifactErr>;

/// The ways an artifact's bytes can fail to describe a linear model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    Truncated { got: usize, expected: usize },
    BadMagic([u8; 4]),
    UnsupportedVersion(u16),
    UnsupportedDtype(u16),
    EmptyShape { rows: u64, cols: u64 },
    DimensionOverflow { rows: u64, cols: u64 },
    PayloadMismatch { declared: usize, got: usize },
    MissingTensor(&'static str),
    TensorDtype(&'static str),
    TensorShape { name: &'static str, shape: Vec<usize> },
    SafeTensors(String),
    InvalidModel(String),
}

/// Artifact encoding and decoding failures.
#[derive(Debug)]
pub enum ArtifactErr {
    CorruptArtifact(Corruption),
    Encode(String),
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corruption::Truncated { got, expected } => {
                write!(f, "got {got} bytes, must at least be {expected}")
            }
            Corruption::BadMagic(magic) => write!(f, "invalid magic bytes {magic:?}"),
            Corruption::UnsupportedVersion(v) => write!(f, "unsupported format version {v}"),
            Corruption::UnsupportedDtype(d) => write!(f, "unsupported dtype tag {d}"),
            Corruption::EmptyShape { rows, cols } => {
                write!(f, "declared shape {rows}x{cols} has an empty dimension")
            }
            Corruption::DimensionOverflow { rows, cols } => {
                write!(f, "declared shape {rows}x{cols} is too large")
            }
            Corruption::PayloadMismatch { declared, got } => write!(
                f,
                "header declares {declared} payload bytes but {got} are present"
            ),
            Corruption::MissingTensor(name) => write!(f, "missing tensor `{name}`"),
            Corruption::TensorDtype(name) => write!(f, "tensor `{name}` is not f32"),
            Corruption::TensorShape { name, shape } => {
                write!(f, "tensor `{name}` has unexpected shape {shape:?}")
            }
            Corruption::SafeTensors(e) => write!(f, "safetensors: {e}"),
            Corruption::InvalidModel(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ArtifactErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErr::CorruptArtifact(c) => write!(f, "corrupt artifact: {c}"),
            ArtifactErr::Encode(e) => write!(f, "failed to encode artifact: {e}"),
        }
    }
}

impl Error for ArtifactErr {}

impl From<Corruption> for ArtifactErr {
    fn from(value: Corruption) -> Self {
        Self::CorruptArtifact(value)
    }
}
