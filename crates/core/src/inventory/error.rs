//! Inventory ledger error types.

use condo_shared::types::HistoryId;
use thiserror::Error;

use crate::state::HistoryAction;

/// Inventory-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// History row not found.
    #[error("History row not found: {0}")]
    HistoryNotFound(HistoryId),

    /// Only `use` rows may be edited or deleted.
    #[error("History row {id} is a '{action:?}' row and cannot be changed")]
    ImmutableHistory {
        /// Row ID.
        id: HistoryId,
        /// Action of the row.
        action: HistoryAction,
    },
}

impl InventoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::HistoryNotFound(_) => "HISTORY_NOT_FOUND",
            Self::ImmutableHistory { .. } => "IMMUTABLE_HISTORY",
        }
    }
}
