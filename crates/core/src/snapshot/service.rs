//! Export, import and reset of the whole document.

use serde_json::Value;
use tracing::{info, warn};

use super::error::SnapshotError;
use crate::state::AppState;

/// Top-level keys every stored document must carry.
pub const REQUIRED_KEYS: [&str; 13] = [
    "buildings",
    "tenants",
    "payments",
    "expenses",
    "pettyCash",
    "employees",
    "issues",
    "products",
    "productUsages",
    "productHistory",
    "electricityReadings",
    "settings",
    "currentBuildingId",
];

/// Snapshot service.
pub struct SnapshotService;

impl SnapshotService {
    /// Pretty-printed JSON of the document.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Parse` if serialization fails.
    pub fn export_json(state: &AppState) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(state)?)
    }

    /// Parses a document and checks its shape. The result is trusted as
    /// already consistent; no reconciliation runs.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Parse` for malformed JSON and
    /// `SnapshotError::Corrupt` when the shape check fails.
    pub fn import_json(raw: &str) -> Result<AppState, SnapshotError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::check_shape(&value)?;
        let state: AppState = serde_json::from_value(value)?;
        info!(buildings = state.buildings.len(), "Snapshot imported");
        Ok(state)
    }

    /// Imports `raw`, falling back to the default document on any failure.
    #[must_use]
    pub fn load_or_default(raw: &str) -> AppState {
        match Self::import_json(raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "Discarding stored snapshot");
                AppState::default()
            }
        }
    }

    /// A fresh default document.
    #[must_use]
    pub fn reset() -> AppState {
        AppState::default()
    }

    fn check_shape(value: &Value) -> Result<(), SnapshotError> {
        let Some(root) = value.as_object() else {
            return Err(SnapshotError::Corrupt("document is not an object".to_string()));
        };
        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !root.contains_key(**key)) {
            return Err(SnapshotError::Corrupt(format!("missing key `{missing}`")));
        }
        let has_buildings = root
            .get("buildings")
            .and_then(Value::as_array)
            .is_some_and(|b| !b.is_empty());
        if !has_buildings {
            return Err(SnapshotError::Corrupt("no buildings".to_string()));
        }
        if !root.get("currentBuildingId").is_some_and(Value::is_string) {
            return Err(SnapshotError::Corrupt(
                "currentBuildingId is not a string".to_string(),
            ));
        }
        Ok(())
    }
}
