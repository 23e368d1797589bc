//! Building routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use condo_core::state::{Building, RecordService};
use condo_core::validation::validate_building;
use condo_shared::types::BuildingId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiError, ApiState};

/// Creates the building routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/buildings", get(list_buildings).post(create_building))
        .route("/buildings/current", put(set_current_building))
        .route("/buildings/{id}", put(update_building).delete(delete_building))
}

/// Body of `PUT /buildings/current`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBuildingRequest {
    /// Building to switch to.
    pub building_id: BuildingId,
}

/// GET /buildings
async fn list_buildings(State(state): State<ApiState>) -> Json<Vec<Building>> {
    Json(state.read(|doc| doc.buildings.clone()).await)
}

/// POST /buildings
async fn create_building(
    State(state): State<ApiState>,
    Json(building): Json<Building>,
) -> Result<impl IntoResponse, ApiError> {
    validate_building(&building)?;
    let created = state
        .commit(move |doc, _| Ok((RecordService::add_building(doc, building.clone()), building)))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /buildings/{id}
async fn update_building(
    State(state): State<ApiState>,
    Path(id): Path<BuildingId>,
    Json(mut building): Json<Building>,
) -> Result<Json<Building>, ApiError> {
    building.id = id;
    validate_building(&building)?;
    let updated = state
        .commit(move |doc, _| Ok((RecordService::update_building(doc, building.clone())?, building)))
        .await?;
    Ok(Json(updated))
}

/// DELETE /buildings/{id}
///
/// Removes every record scoped to the building. The last building cannot
/// be deleted.
async fn delete_building(
    State(state): State<ApiState>,
    Path(id): Path<BuildingId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((RecordService::delete_building(doc, &id)?, ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /buildings/current
async fn set_current_building(
    State(state): State<ApiState>,
    Json(request): Json<CurrentBuildingRequest>,
) -> Result<Json<CurrentBuildingRequest>, ApiError> {
    let building_id = request.building_id;
    state
        .commit(|doc, _| {
            if !doc.buildings.iter().any(|b| b.id == building_id) {
                return Err(ApiError::not_found("Building", &building_id));
            }
            Ok((RecordService::set_current_building(doc, &building_id), ()))
        })
        .await?;
    info!(building_id = %building_id, "Current building switched");
    Ok(Json(CurrentBuildingRequest { building_id }))
}
