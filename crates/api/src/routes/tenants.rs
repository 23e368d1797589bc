//! Tenant routes. All act on the current building.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use condo_core::state::{RecordService, Tenant};
use condo_core::validation::validate_tenant;
use condo_shared::types::TenantId;
use tracing::info;

use crate::{ApiError, ApiState};

/// Creates the tenant routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/tenants", get(list_tenants).post(create_tenant))
        .route("/tenants/{id}", put(update_tenant).delete(delete_tenant))
}

/// GET /tenants
async fn list_tenants(State(state): State<ApiState>) -> Json<Vec<Tenant>> {
    Json(state.read(|doc| doc.current_tenants().to_vec()).await)
}

/// POST /tenants
async fn create_tenant(
    State(state): State<ApiState>,
    Json(tenant): Json<Tenant>,
) -> Result<impl IntoResponse, ApiError> {
    validate_tenant(&tenant)?;
    let created = state
        .commit(move |doc, _| Ok((RecordService::add_tenant(doc, tenant.clone()), tenant)))
        .await?;
    info!(tenant_id = %created.id, "Tenant created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /tenants/{id}
async fn update_tenant(
    State(state): State<ApiState>,
    Path(id): Path<TenantId>,
    Json(mut tenant): Json<Tenant>,
) -> Result<Json<Tenant>, ApiError> {
    tenant.id = id;
    validate_tenant(&tenant)?;
    let updated = state
        .commit(move |doc, _| {
            if doc.find_tenant(&tenant.id).is_none() {
                return Err(ApiError::not_found("Tenant", &tenant.id));
            }
            Ok((RecordService::update_tenant(doc, tenant.clone()), tenant))
        })
        .await?;
    Ok(Json(updated))
}

/// DELETE /tenants/{id}
///
/// Payments and petty-cash history of the tenant are kept.
async fn delete_tenant(
    State(state): State<ApiState>,
    Path(id): Path<TenantId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((RecordService::delete_tenant(doc, &id), ())))
        .await?;
    info!(tenant_id = %id, "Tenant deleted");
    Ok(StatusCode::NO_CONTENT)
}
