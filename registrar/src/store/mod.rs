mod fs;
mod memory;

use artifact::ModelArtifact;

use crate::{
    error::Result,
    id::{ArtifactId, RunMetadata},
};

pub use fs::FsStore;
pub use memory::MemoryStore;

/// An artifact together with the run parameters it was stored with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub artifact: ModelArtifact,
    pub metadata: RunMetadata,
}

/// The external system of record for artifacts and their run metadata.
pub trait ArtifactStore {
    /// Should persist `artifact` and `metadata` under a new run.
    ///
    /// # Arguments
    /// * `artifact` - The encoded model.
    /// * `metadata` - The run parameters to tag it with.
    ///
    /// # Returns
    /// The identifier to retrieve the artifact by.
    fn put(&mut self, artifact: &ModelArtifact, metadata: &RunMetadata) -> Result<ArtifactId>;

    /// Should fetch what was stored under `id`.
    ///
    /// # Returns
    /// `NotFound` if nothing was stored under `id`.
    fn get(&self, id: &ArtifactId) -> Result<StoredArtifact>;
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for Box<S> {
    fn put(&mut self, artifact: &ModelArtifact, metadata: &RunMetadata) -> Result<ArtifactId> {
        (**self).put(artifact, metadata)
    }

    fn get(&self, id: &ArtifactId) -> Result<StoredArtifact> {
        (**self).get(id)
    }
}
