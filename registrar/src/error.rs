use std::{error::Error, fmt, io};

use crate::id::ArtifactId;

/// The registrar module's result type.
pub type Result<T> = std::result::Result<T, RegistrarErr>;

/// Failures reported by the registrar or passed through from its store.
#[derive(Debug)]
pub enum RegistrarErr {
    /// The store couldn't be reached, read or written.
    StorageUnavailable(io::Error),
    /// The store holds nothing under this identifier.
    NotFound(ArtifactId),
    /// The identifier isn't of the `<experiment_id>/<run_id>` form.
    InvalidId(String),
}

impl RegistrarErr {
    pub(crate) fn unavailable<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::StorageUnavailable(io::Error::other(err))
    }
}

impl fmt::Display for RegistrarErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrarErr::StorageUnavailable(e) => write!(f, "storage unavailable: {e}"),
            RegistrarErr::NotFound(id) => write!(f, "no artifact found for run {id}"),
            RegistrarErr::InvalidId(id) => write!(
                f,
                "invalid artifact id `{id}`, expected <experiment_id>/<run_id>"
            ),
        }
    }
}

impl Error for RegistrarErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegistrarErr::StorageUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RegistrarErr {
    fn from(value: io::Error) -> Self {
        Self::StorageUnavailable(value)
    }
}
