use artifact::ModelArtifact;
use log::info;

use crate::{
    config::RegistrarConfig,
    error::Result,
    id::{ArtifactId, RunMetadata},
    store::{ArtifactStore, StoredArtifact},
};

/// Stores and retrieves artifacts through an external store.
pub struct ArtifactRegistrar<S = Box<dyn ArtifactStore>> {
    config: RegistrarConfig,
    store: S,
}

impl ArtifactRegistrar {
    /// Creates a registrar over the store its configuration's tracking uri points at.
    ///
    /// # Returns
    /// `StorageUnavailable` if the tracking uri can't be served.
    pub fn open(config: RegistrarConfig) -> Result<Self> {
        let store = config.open_store()?;
        info!(
            "registrar ready at {} (experiment {})",
            config.tracking_uri(),
            config.experiment_id()
        );
        Ok(Self { config, store })
    }
}

impl<S: ArtifactStore> ArtifactRegistrar<S> {
    /// Creates a registrar over an already opened store.
    pub fn with_store(config: RegistrarConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Hands `artifact` and `metadata` to the store.
    ///
    /// # Returns
    /// The identifier to retrieve it by.
    pub fn store(&mut self, artifact: &ModelArtifact, metadata: RunMetadata) -> Result<ArtifactId> {
        let id = self.store.put(artifact, &metadata)?;
        info!(
            "stored {:?} artifact as run {id} with {} param(s)",
            artifact.format(),
            metadata.len()
        );
        Ok(id)
    }

    /// Fetches back the artifact stored under `id`.
    pub fn retrieve(&self, id: &ArtifactId) -> Result<ModelArtifact> {
        Ok(self.retrieve_with_metadata(id)?.artifact)
    }

    /// Fetches back the artifact stored under `id` along with its run parameters.
    pub fn retrieve_with_metadata(&self, id: &ArtifactId) -> Result<StoredArtifact> {
        let stored = self.store.get(id)?;
        info!("retrieved {:?} artifact of run {id}", stored.artifact.format());
        Ok(stored)
    }
}
