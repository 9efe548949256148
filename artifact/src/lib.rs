//! Model artifacts: the byte representation a `LinearModel` is persisted as.
//!
//! Two formats are supported, a compact native one and safetensors. Both
//! store `f32` values little-endian, so decoding reproduces the model bit for bit.

mod artifact;
mod codec;
pub mod error;
mod format;
mod native;
mod tensors;

pub use artifact::ModelArtifact;
pub use error::{ArtifactErr, Corruption, Result};
pub use format::ModelFormat;
