//! Application-wide error types.
//!
//! Engine modules keep their own error enums. The API folds them into one of
//! these kinds to pick a status and a fallback code.

use std::fmt::Display;

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Error kinds surfaced to API clients.
#[derive(Debug, Error)]
pub enum AppError {
    /// A referenced record is absent from the document.
    #[error("{0} not found")]
    NotFound(String),

    /// Request body rejected before reaching the engine.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The engine refused the operation.
    #[error("Operation rejected: {0}")]
    BusinessRule(String),

    /// A record with the same id already exists.
    #[error("{0} already exists")]
    Conflict(String),

    /// The snapshot store could not be read or written.
    #[error("Snapshot storage unavailable: {0}")]
    Storage(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// A missing record of the given kind, e.g. `Tenant t1 not found`.
    pub fn missing(kind: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }

    /// A duplicate record of the given kind.
    pub fn duplicate(kind: &str, id: impl Display) -> Self {
        Self::Conflict(format!("{kind} {id}"))
    }

    /// HTTP status code for this kind.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::BusinessRule(_) => 422,
            Self::Internal(_) => 500,
            Self::Storage(_) => 503,
        }
    }

    /// Code used when the originating module has none of its own.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "OPERATION_REJECTED",
            Self::Conflict(_) => "ALREADY_EXISTS",
            Self::Storage(_) => "STORAGE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
