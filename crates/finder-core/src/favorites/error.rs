use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the favorites slot.
///
/// These never reach the user; the repository logs and absorbs them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes are not text.
    #[error("Stored value at {path} is not valid UTF-8")]
    NotText { path: PathBuf },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
