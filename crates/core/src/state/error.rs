//! State store error types.

use condo_shared::types::BuildingId;
use thiserror::Error;

/// Errors from structural edits of the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The last remaining building cannot be deleted.
    #[error("Cannot delete the last remaining building")]
    LastBuilding,

    /// Building not found.
    #[error("Building not found: {0}")]
    BuildingNotFound(BuildingId),
}

impl StateError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::LastBuilding => "LAST_BUILDING",
            Self::BuildingNotFound(_) => "BUILDING_NOT_FOUND",
        }
    }
}
