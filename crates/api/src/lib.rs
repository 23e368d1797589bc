//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for every engine entry point and dashboard query
//! - The shared document behind a lock, with commit and autosave
//! - Error to response mapping

pub mod error;
pub mod routes;

use axum::Router;
use chrono::NaiveDate;
use condo_core::state::AppState;
use condo_core::storage::{AutosaveHandle, SnapshotStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct ApiState {
    /// The live document.
    pub document: Arc<RwLock<AppState>>,
    /// Snapshot store, read on reload.
    pub store: Arc<SnapshotStore>,
    /// Debounced writer for committed snapshots.
    pub autosave: AutosaveHandle,
}

impl ApiState {
    /// Create the shared state around a loaded document.
    #[must_use]
    pub fn new(document: AppState, store: Arc<SnapshotStore>, autosave: AutosaveHandle) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
            store,
            autosave,
        }
    }

    /// Runs an engine entry point under the write lock, commits the
    /// resulting document and schedules persistence.
    ///
    /// `apply` receives the current document and today's date and returns
    /// the next document together with the handler's response value.
    ///
    /// # Errors
    ///
    /// Returns the error from `apply`; the document is left unchanged.
    pub async fn commit<T, F>(&self, apply: F) -> Result<T, ApiError>
    where
        F: FnOnce(&AppState, NaiveDate) -> Result<(AppState, T), ApiError>,
    {
        let mut document = self.document.write().await;
        let (next, output) = apply(&document, today())?;
        *document = next;
        self.autosave.notify(document.clone());
        Ok(output)
    }

    /// Runs a read-only query against the current document.
    pub async fn read<T>(&self, query: impl FnOnce(&AppState) -> T) -> T {
        let document = self.document.read().await;
        query(&document)
    }
}

/// Today's date from the wall clock.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Creates the main application router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
