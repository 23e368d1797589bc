//! Snapshot error types.

use thiserror::Error;

/// Errors from reading a persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Not JSON, or JSON that does not deserialize into the document.
    #[error("Snapshot could not be parsed: {0}")]
    Parse(String),

    /// JSON that fails the structural shape check.
    #[error("Snapshot is corrupt: {0}")]
    Corrupt(String),
}

impl SnapshotError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "SNAPSHOT_PARSE_ERROR",
            Self::Corrupt(_) => "SNAPSHOT_CORRUPT",
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
