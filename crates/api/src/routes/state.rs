//! Whole-document routes: export, import, reset, reload, settings.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use condo_core::snapshot::SnapshotService;
use condo_core::state::{AppState, RecordService, Settings};
use tracing::info;

use crate::{ApiError, ApiState};

/// Creates the document routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/state", get(export_state).put(import_state))
        .route("/state/reset", post(reset_state))
        .route("/state/reload", post(reload_state))
        .route("/settings", get(get_settings).put(update_settings))
}

/// GET /state
///
/// Pretty-printed backup of the whole document.
async fn export_state(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let raw = state.read(SnapshotService::export_json).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], raw))
}

/// PUT /state
///
/// Replaces the document wholesale. Nothing is reconciled.
async fn import_state(
    State(state): State<ApiState>,
    body: String,
) -> Result<Json<AppState>, ApiError> {
    let imported = SnapshotService::import_json(&body)?;
    let document = state
        .commit(move |_, _| Ok((imported.clone(), imported)))
        .await?;
    info!(buildings = document.buildings.len(), "Document replaced by import");
    Ok(Json(document))
}

/// POST /state/reset
async fn reset_state(State(state): State<ApiState>) -> Result<Json<AppState>, ApiError> {
    let document = state
        .commit(|_, _| {
            let fresh = SnapshotService::reset();
            Ok((fresh.clone(), fresh))
        })
        .await?;
    info!("Document reset to default");
    Ok(Json(document))
}

/// POST /state/reload
///
/// Re-reads the stored snapshot, picking up writes made by another process.
async fn reload_state(State(state): State<ApiState>) -> Result<Json<AppState>, ApiError> {
    let loaded = state.store.load().await?;
    let document = state
        .commit(move |_, _| Ok((loaded.clone(), loaded)))
        .await?;
    info!(key = %state.store.key(), "Document reloaded from store");
    Ok(Json(document))
}

/// GET /settings
async fn get_settings(State(state): State<ApiState>) -> Json<Settings> {
    Json(state.read(|doc| doc.settings.clone()).await)
}

/// PUT /settings
async fn update_settings(
    State(state): State<ApiState>,
    Json(settings): Json<Settings>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state
        .commit(move |doc, _| Ok((RecordService::update_settings(doc, settings.clone()), settings)))
        .await?;
    Ok((StatusCode::OK, Json(settings)))
}
