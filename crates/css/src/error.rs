//! Rule table error types

use std::path::PathBuf;
use thiserror::Error;

/// Rule table result type
pub type CssResult<T> = Result<T, CssError>;

/// Errors raised while reading or writing definition snapshots
#[derive(Debug, Error)]
pub enum CssError {
    #[error("Snapshot not found: {}", path.display())]
    SnapshotNotFound { path: PathBuf },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid snapshot entry '{key}': {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CssError {
    fn from(err: serde_json::Error) -> Self {
        CssError::InvalidSnapshot(err.to_string())
    }
}

impl CssError {
    pub fn invalid_entry(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry { key: key.into(), reason: reason.into() }
    }
}
