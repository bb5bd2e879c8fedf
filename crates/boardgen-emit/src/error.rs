//! Emission errors.

use std::path::PathBuf;

use boardgen_model::SchemaError;
use thiserror::Error;

/// Errors that can occur while generating a board's artifacts.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The configuration does not satisfy its family's rules.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The destination could not be created or written.
    #[error("cannot write destination {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EmitError {
    pub(crate) fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Destination {
            path: path.into(),
            source,
        }
    }
}

/// Result type for emission operations.
pub type Result<T> = std::result::Result<T, EmitError>;
