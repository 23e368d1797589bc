//! Condo API Server
//!
//! Main entry point for the building management backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condo_api::{ApiState, create_router};
use condo_core::storage::{Autosaver, SnapshotStore, StorageConfig};
use condo_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "condo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    // Open the snapshot store and load the document
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    let store = Arc::new(SnapshotStore::from_config(&storage_config)?);
    let document = store.load().await?;
    info!(
        provider = store.provider_name(),
        mirror = storage_config.mirror.as_ref().map_or("none", |m| m.name()),
        buildings = document.buildings.len(),
        "Snapshot loaded"
    );

    let autosave = Autosaver::spawn(
        store.clone(),
        document.clone(),
        Duration::from_millis(config.storage.autosave_debounce_ms),
    );
    let state = ApiState::new(document, store, autosave.clone());

    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Write anything still inside the debounce window
    if let Err(e) = autosave.flush().await {
        warn!(error = %e, "Final snapshot flush failed");
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
