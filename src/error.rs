use std::{error::Error as StdError, fmt};

use artifact::ArtifactErr;
use model::ModelErr;
use registrar::RegistrarErr;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure of logging, loading or running a model.
#[derive(Debug)]
pub enum Error {
    Model(ModelErr),
    Artifact(ArtifactErr),
    Registrar(RegistrarErr),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(e) => write!(f, "model error: {e}"),
            Self::Artifact(e) => write!(f, "artifact error: {e}"),
            Self::Registrar(e) => write!(f, "registrar error: {e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            Self::Artifact(e) => Some(e),
            Self::Registrar(e) => Some(e),
        }
    }
}

impl From<ModelErr> for Error {
    fn from(value: ModelErr) -> Self {
        Self::Model(value)
    }
}

impl From<ArtifactErr> for Error {
    fn from(value: ArtifactErr) -> Self {
        Self::Artifact(value)
    }
}

impl From<RegistrarErr> for Error {
    fn from(value: RegistrarErr) -> Self {
        Self::Registrar(value)
    }
}
