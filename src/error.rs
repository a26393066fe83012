use crate::dna::DnaError;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for callers that combine file access with the DNA model.
#[derive(Debug, Error)]
pub enum Error {
    #[error("DNA error: {0}")]
    Dna(#[from] DnaError),

    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    /// The underlying DNA error, if this is one.
    pub fn as_dna_error(&self) -> Option<&DnaError> {
        match self {
            Error::Dna(err) => Some(err),
            _ => None,
        }
    }
}
