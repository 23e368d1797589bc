//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use condo_core::inventory::InventoryError;
use condo_core::snapshot::SnapshotError;
use condo_core::state::StateError;
use condo_core::storage::StorageError;
use condo_core::validation::ValidationError;
use condo_shared::AppError;
use serde_json::json;
use tracing::error;

/// An error rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn classified(kind: &AppError, code: &'static str) -> Self {
        Self {
            status: StatusCode::from_u16(kind.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message: kind.to_string(),
        }
    }

    /// A record of the given kind is absent from the document.
    #[must_use]
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::from(AppError::missing(kind, id))
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::classified(&err, err.error_code())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::classified(&AppError::Validation(err.to_string()), err.error_code())
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let kind = match &err {
            InventoryError::HistoryNotFound(_) => AppError::NotFound(err.to_string()),
            InventoryError::ImmutableHistory { .. } => AppError::BusinessRule(err.to_string()),
        };
        Self::classified(&kind, err.error_code())
    }
}

impl From<StateError> for ApiError {
    fn from(err: StateError) -> Self {
        let kind = match &err {
            StateError::LastBuilding => AppError::BusinessRule(err.to_string()),
            StateError::BuildingNotFound(_) => AppError::NotFound(err.to_string()),
        };
        Self::classified(&kind, err.error_code())
    }
}

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        Self::classified(&AppError::Validation(err.to_string()), err.error_code())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        error!(error = %err, "Storage failure");
        Self::classified(&AppError::Storage(err.to_string()), err.error_code())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message
            })),
        )
            .into_response()
    }
}
