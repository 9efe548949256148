use std::{
    fs, io,
    path::{Path, PathBuf},
};

use artifact::{ModelArtifact, ModelFormat};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{ArtifactStore, StoredArtifact};
use crate::{
    error::{RegistrarErr, Result},
    id::{ArtifactId, RunMetadata, check_path_segment, is_path_segment},
};

const PARAMS_DIR: &str = "params";
const ARTIFACTS_DIR: &str = "artifacts";
const META_FILE: &str = "meta.json";
const MODEL_STEM: &str = "model";

/// Describes the model file inside an artifact directory.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactMeta {
    format: ModelFormat,
    size: usize,
}

/// A file-backed store with the directory layout of a tracking server's file backend:
///
/// ```text
/// <root>/<experiment_id>/<run_id>/params/<key>
/// <root>/<experiment_id>/<run_id>/artifacts/<artifact_path>/meta.json
/// <root>/<experiment_id>/<run_id>/artifacts/<artifact_path>/model.<ext>
/// ```
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    experiment_id: String,
    artifact_path: String,
}

impl FsStore {
    /// Creates a new file store. Nothing is touched on disk until the first `put`.
    ///
    /// # Arguments
    /// * `root` - The directory holding every experiment.
    /// * `experiment_id` - The experiment new runs are created under.
    /// * `artifact_path` - The directory name of the model inside each run's artifacts.
    pub fn new(
        root: impl Into<PathBuf>,
        experiment_id: impl Into<String>,
        artifact_path: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            experiment_id: experiment_id.into(),
            artifact_path: artifact_path.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run_dir(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.experiment_id()).join(id.run_id())
    }

    fn artifact_dir(&self, id: &ArtifactId) -> PathBuf {
        self.run_dir(id)
            .join(ARTIFACTS_DIR)
            .join(&self.artifact_path)
    }

    fn write_params(dir: &Path, metadata: &RunMetadata) -> Result<()> {
        fs::create_dir_all(dir)?;

        for (key, value) in metadata.params() {
            fs::write(dir.join(key), value)?;
        }

        Ok(())
    }

    fn write_run(
        &self,
        id: &ArtifactId,
        artifact: &ModelArtifact,
        metadata: &RunMetadata,
    ) -> Result<()> {
        Self::write_params(&self.run_dir(id).join(PARAMS_DIR), metadata)?;

        let dir = self.artifact_dir(id);
        fs::create_dir_all(&dir)?;

        let format = artifact.format();
        let model_file = dir.join(format!("{MODEL_STEM}.{}", format.extension()));
        fs::write(&model_file, artifact.bytes())?;

        let meta = ArtifactMeta {
            format,
            size: artifact.bytes().len(),
        };
        let meta = serde_json::to_vec_pretty(&meta).map_err(RegistrarErr::unavailable)?;
        fs::write(dir.join(META_FILE), meta)?;

        info!("logged artifact to {}", model_file.display());
        Ok(())
    }

    fn read_params(dir: &Path) -> Result<RunMetadata> {
        let mut metadata = RunMetadata::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(metadata),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let key = entry.file_name().to_string_lossy().into_owned();
            metadata.insert(key, fs::read_to_string(entry.path())?);
        }

        Ok(metadata)
    }
}

/// Maps a missing file to `NotFound`, anything else to `StorageUnavailable`.
fn not_found_as(id: &ArtifactId) -> impl Fn(io::Error) -> RegistrarErr + '_ {
    move |e| match e.kind() {
        io::ErrorKind::NotFound => RegistrarErr::NotFound(id.clone()),
        _ => RegistrarErr::StorageUnavailable(e),
    }
}

impl ArtifactStore for FsStore {
    fn put(&mut self, artifact: &ModelArtifact, metadata: &RunMetadata) -> Result<ArtifactId> {
        check_path_segment("experiment id", &self.experiment_id)?;
        check_path_segment("artifact path", &self.artifact_path)?;
        for (key, _) in metadata.params() {
            check_path_segment("parameter key", key)?;
        }

        let id = ArtifactId::generate(&self.experiment_id, &mut rand::rng());
        let run_dir = self.run_dir(&id);
        debug!("creating run directory {}", run_dir.display());

        if let Err(e) = self.write_run(&id, artifact, metadata) {
            if let Err(cleanup) = fs::remove_dir_all(&run_dir) {
                warn!("couldn't remove partial run {}: {cleanup}", run_dir.display());
            }
            return Err(e);
        }

        Ok(id)
    }

    fn get(&self, id: &ArtifactId) -> Result<StoredArtifact> {
        if !is_path_segment(id.experiment_id()) || !is_path_segment(id.run_id()) {
            return Err(RegistrarErr::InvalidId(id.to_string()));
        }
        check_path_segment("artifact path", &self.artifact_path)?;

        let dir = self.artifact_dir(id);

        let meta = fs::read(dir.join(META_FILE)).map_err(not_found_as(id))?;
        let meta: ArtifactMeta =
            serde_json::from_slice(&meta).map_err(RegistrarErr::unavailable)?;

        let model_file = dir.join(format!("{MODEL_STEM}.{}", meta.format.extension()));
        let bytes = fs::read(&model_file).map_err(not_found_as(id))?;

        if bytes.len() != meta.size {
            return Err(RegistrarErr::unavailable(format!(
                "{} holds {} bytes but {} were logged",
                model_file.display(),
                bytes.len(),
                meta.size
            )));
        }

        let metadata = Self::read_params(&self.run_dir(id).join(PARAMS_DIR))?;
        debug!("loaded artifact from {}", model_file.display());

        Ok(StoredArtifact {
            artifact: ModelArtifact::from_bytes(meta.format, bytes),
            metadata,
        })
    }
}
