//! The boundary between the model core and an external tracking/storage service.
//!
//! An `ArtifactRegistrar` hands encoded artifacts plus run parameters to an
//! `ArtifactStore` and gets them back by `ArtifactId`. Store failures are passed
//! through as they are, nothing is retried.

pub mod config;
pub mod error;
mod id;
mod registrar;
pub mod store;

pub use config::RegistrarConfig;
pub use error::{RegistrarErr, Result};
pub use id::{ArtifactId, RunMetadata};
pub use registrar::ArtifactRegistrar;
pub use store::{ArtifactStore, FsStore, MemoryStore, StoredArtifact};
