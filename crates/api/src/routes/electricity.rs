//! Electricity reading routes.
//!
//! A reading with a positive cost owns one auto-generated electricity
//! expense in its building.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use condo_core::expenses::ElectricityService;
use condo_core::state::ElectricityReading;
use condo_core::validation::validate_reading;
use condo_shared::types::ReadingId;

use crate::{ApiError, ApiState};

/// Creates the electricity routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/electricity-readings",
            get(list_readings).put(upsert_reading),
        )
        .route("/electricity-readings/{id}", delete(delete_reading))
}

/// GET /electricity-readings
///
/// Readings of the current building.
async fn list_readings(State(state): State<ApiState>) -> Json<Vec<ElectricityReading>> {
    Json(
        state
            .read(|doc| {
                doc.electricity_readings
                    .get(&doc.current_building_id)
                    .cloned()
                    .unwrap_or_default()
            })
            .await,
    )
}

/// PUT /electricity-readings
///
/// Creates or replaces a reading and its linked expense.
async fn upsert_reading(
    State(state): State<ApiState>,
    Json(reading): Json<ElectricityReading>,
) -> Result<Json<ElectricityReading>, ApiError> {
    validate_reading(&reading)?;
    let stored = state
        .commit(move |doc, _| {
            if !doc.buildings.iter().any(|b| b.id == reading.building_id) {
                return Err(ApiError::not_found("Building", &reading.building_id));
            }
            Ok((ElectricityService::upsert_reading(doc, reading.clone()), reading))
        })
        .await?;
    Ok(Json(stored))
}

/// DELETE /electricity-readings/{id}
async fn delete_reading(
    State(state): State<ApiState>,
    Path(id): Path<ReadingId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((ElectricityService::delete_reading(doc, &id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::routes::test_support::{api_state, app, send};
    use condo_core::state::{AppState, SourceType};
    use serde_json::json;

    #[tokio::test]
    async fn test_reading_with_cost_creates_expense() {
        let state = api_state(AppState::default());

        let (status, reading) = send(
            app(&state),
            "PUT",
            "/electricity-readings",
            Some(json!({
                "buildingId": "building-1",
                "entrance": "A",
                "readingDate": "2025-02-01",
                "meterReading": "18250",
                "electricityCost": "640.50"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = reading["id"].as_str().unwrap().to_string();

        let linked = state
            .read(|doc| {
                doc.current_expenses()
                    .iter()
                    .filter(|e| e.is_linked_to(SourceType::Electricity, &id))
                    .count()
            })
            .await;
        assert_eq!(linked, 1);

        let (status, _) = send(
            app(&state),
            "DELETE",
            &format!("/electricity-readings/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.read(|doc| doc.current_expenses().is_empty()).await);
    }
}
