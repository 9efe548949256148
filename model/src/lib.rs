pub mod adapter;
pub mod error;
pub mod linear;
pub mod param_gen;

pub use adapter::{InferenceAdapter, PredictionRequest, PredictionResult};
pub use error::{InputShape, ModelErr, Result};
pub use linear::LinearModel;
pub use param_gen::RandParamGen;
