//! Error types for the slot store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the slot store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing one of the store files failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page data handed to the store has the wrong shape.
    #[error("Invalid page data: {0}")]
    InvalidPage(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
