//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::ApiState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Primary snapshot storage provider.
    pub storage: &'static str,
}

/// Health check handler.
async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.store.provider_name(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<ApiState> {
    Router::new().route("/health", get(health_check))
}
