//! Storage error types.

use thiserror::Error;

use crate::snapshot::SnapshotError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),

    /// The document could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Serialize(String),

    /// The autosave task has stopped.
    #[error("autosave task is not running")]
    Closed,
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "STORAGE_CONFIGURATION",
            Self::Operation(_) => "STORAGE_OPERATION",
            Self::Serialize(_) => "STORAGE_SERIALIZE",
            Self::Closed => "AUTOSAVE_CLOSED",
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        Self::Operation(err.to_string())
    }
}

impl From<SnapshotError> for StorageError {
    fn from(err: SnapshotError) -> Self {
        Self::Serialize(err.to_string())
    }
}
