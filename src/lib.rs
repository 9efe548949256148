//! Logs linear models to a tracking store and loads them back for inference.
//!
//! This is the glue over the `model`, `artifact` and `registrar` crates: a model
//! is encoded, tagged with its feature and label counts and stored; later it's
//! retrieved, decoded and wrapped in an `InferenceAdapter`.

pub mod error;

use artifact::{ModelArtifact, ModelFormat};
use log::info;
use model::{InferenceAdapter, LinearModel};
use registrar::{ArtifactId, ArtifactRegistrar, ArtifactStore, RunMetadata};

pub use error::{Error, Result};

pub const FEATURES_PARAM: &str = "features";
pub const LABELS_PARAM: &str = "labels";

/// Encodes `model` and stores it through `registrar`.
///
/// # Arguments
/// * `registrar` - The registrar to store the model with.
/// * `model` - The model to log.
/// * `format` - The artifact format to encode it in.
///
/// # Returns
/// The id to load the model back by.
pub fn log_model<S: ArtifactStore>(
    registrar: &mut ArtifactRegistrar<S>,
    model: &LinearModel,
    format: ModelFormat,
) -> Result<ArtifactId> {
    let artifact = ModelArtifact::encode(model, format)?;
    let metadata = RunMetadata::new()
        .with_param(FEATURES_PARAM, model.in_features())
        .with_param(LABELS_PARAM, model.out_features());

    let id = registrar.store(&artifact, metadata)?;
    info!("logged {}x{} linear model as {id}", model.out_features(), model.in_features());
    Ok(id)
}

/// Retrieves the model stored under `id` and readies it for inference.
pub fn load_model<S: ArtifactStore>(
    registrar: &ArtifactRegistrar<S>,
    id: &ArtifactId,
) -> Result<InferenceAdapter> {
    let model = registrar.retrieve(id)?.decode()?;
    info!("model {id} initialized");
    Ok(InferenceAdapter::new(model))
}
