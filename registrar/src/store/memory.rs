use std::collections::HashMap;

use artifact::ModelArtifact;
use log::debug;

use super::{ArtifactStore, StoredArtifact};
use crate::{
    error::{RegistrarErr, Result},
    id::{ArtifactId, RunMetadata, check_path_segment},
};

/// Keeps runs in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    experiment_id: String,
    runs: HashMap<ArtifactId, StoredArtifact>,
}

impl MemoryStore {
    pub fn new(experiment_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            runs: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&mut self, artifact: &ModelArtifact, metadata: &RunMetadata) -> Result<ArtifactId> {
        check_path_segment("experiment id", &self.experiment_id)?;
        let id = ArtifactId::generate(&self.experiment_id, &mut rand::rng());
        debug!("storing {} bytes in memory under {id}", artifact.bytes().len());

        let stored = StoredArtifact {
            artifact: artifact.clone(),
            metadata: metadata.clone(),
        };
        self.runs.insert(id.clone(), stored);
        Ok(id)
    }

    fn get(&self, id: &ArtifactId) -> Result<StoredArtifact> {
        self.runs
            .get(id)
            .cloned()
            .ok_or_else(|| RegistrarErr::NotFound(id.clone()))
    }
}
