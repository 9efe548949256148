use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;

/// The result type used in the entire model module.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// Why an inference input could not be resolved into a single vector or a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// The input has a rank other than 1 or 2.
    Rank(usize),
    /// A batch row has a different length than the first row.
    RaggedRows {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// The model module's error type.
#[derive(Debug)]
pub enum ModelErr {
    ShapeMismatch { got: usize, expected: usize },
    InvalidInputShape(InputShape),
    BiasMismatch { got: usize, expected: usize },
    EmptyModel {
        out_features: usize,
        in_features: usize,
    },
    Shape(ShapeError),
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::ShapeMismatch { got, expected } => write!(
                f,
                "The input vector has {got} features but the model expects {expected}"
            ),
            ModelErr::InvalidInputShape(InputShape::Rank(rank)) => write!(
                f,
                "Invalid input shape, expected a vector or a batch of vectors but got rank {rank}"
            ),
            ModelErr::InvalidInputShape(InputShape::RaggedRows { row, got, expected }) => write!(
                f,
                "Invalid input shape, row {row} has {got} features while the first row has {expected}"
            ),
            ModelErr::BiasMismatch { got, expected } => write!(
                f,
                "There's a size mismatch between the bias and the weight rows, got {got} and expected {expected}"
            ),
            ModelErr::EmptyModel {
                out_features,
                in_features,
            } => write!(
                f,
                "A linear model can't have an empty dimension, got {out_features}x{in_features}"
            ),
            ModelErr::Shape(e) => write!(f, "shape error: {e}"),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for ModelErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}
