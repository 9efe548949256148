use std::io;

use log::debug;

use crate::{
    error::{RegistrarErr, Result},
    id::check_path_segment,
    store::{ArtifactStore, FsStore, MemoryStore},
};

pub const DEFAULT_EXPERIMENT_ID: &str = "0";
pub const DEFAULT_ARTIFACT_PATH: &str = "linear_model";

/// Where and under what names a registrar stores its artifacts.
///
/// Owned by the registrar it's given to, there's no process-wide tracking state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarConfig {
    tracking_uri: String,
    experiment_id: String,
    artifact_path: String,
}

impl RegistrarConfig {
    /// Creates a new registrar configuration with the default experiment and artifact path.
    ///
    /// # Arguments
    /// * `tracking_uri` - `file://<dir>`, a bare directory path or `memory://`.
    pub fn new(tracking_uri: impl Into<String>) -> Self {
        Self {
            tracking_uri: tracking_uri.into(),
            experiment_id: DEFAULT_EXPERIMENT_ID.to_string(),
            artifact_path: DEFAULT_ARTIFACT_PATH.to_string(),
        }
    }

    pub fn with_experiment(mut self, experiment_id: impl Into<String>) -> Self {
        self.experiment_id = experiment_id.into();
        self
    }

    pub fn with_artifact_path(mut self, artifact_path: impl Into<String>) -> Self {
        self.artifact_path = artifact_path.into();
        self
    }

    pub fn tracking_uri(&self) -> &str {
        &self.tracking_uri
    }

    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    pub fn artifact_path(&self) -> &str {
        &self.artifact_path
    }

    /// Opens the store the tracking uri points at.
    ///
    /// # Returns
    /// `StorageUnavailable` if the uri's scheme isn't `file` nor `memory`, or if the
    /// experiment id or artifact path isn't a plain directory name.
    pub fn open_store(&self) -> Result<Box<dyn ArtifactStore>> {
        debug!("opening tracking store at {}", self.tracking_uri);
        check_path_segment("experiment id", &self.experiment_id)?;
        check_path_segment("artifact path", &self.artifact_path)?;

        match self.tracking_uri.split_once("://") {
            Some(("file", path)) => Ok(Box::new(self.fs_store(path))),
            Some(("memory", _)) => Ok(Box::new(MemoryStore::new(self.experiment_id.clone()))),
            Some((scheme, _)) => Err(RegistrarErr::StorageUnavailable(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("unsupported tracking uri scheme `{scheme}`"),
            ))),
            None => Ok(Box::new(self.fs_store(&self.tracking_uri))),
        }
    }

    fn fs_store(&self, root: &str) -> FsStore {
        FsStore::new(root, self.experiment_id.clone(), self.artifact_path.clone())
    }
}
