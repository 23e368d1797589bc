//! Dashboard and analytics routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Datelike;
use condo_core::dashboard::{
    CategoryTotal, CollectionStatus, DashboardService, DashboardSummary, EntranceBreakdown,
    InventoryAnalytics,
};
use serde::{Deserialize, Serialize};

use crate::ApiState;

/// Creates the dashboard routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/entrances", get(get_entrance_breakdown))
        .route(
            "/dashboard/expenses-by-category",
            get(get_expenses_by_category),
        )
        .route("/inventory/analytics", get(get_inventory_analytics))
}

/// Query parameters for yearly figures.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    /// Calendar year; defaults to this year.
    pub year: Option<i32>,
}

impl YearQuery {
    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| crate::today().year())
    }
}

/// Response for the main dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Headline figures.
    pub summary: DashboardSummary,
    /// Paid versus debtor tenants.
    pub collection: CollectionStatus,
}

/// GET /dashboard?year=
async fn get_dashboard(
    State(state): State<ApiState>,
    Query(query): Query<YearQuery>,
) -> Json<DashboardResponse> {
    let year = query.year();
    Json(
        state
            .read(|doc| DashboardResponse {
                summary: DashboardService::summary(doc, year),
                collection: DashboardService::collection_status(doc),
            })
            .await,
    )
}

/// GET /dashboard/entrances?year=
async fn get_entrance_breakdown(
    State(state): State<ApiState>,
    Query(query): Query<YearQuery>,
) -> Json<Vec<EntranceBreakdown>> {
    let year = query.year();
    Json(
        state
            .read(|doc| DashboardService::entrance_breakdown(doc, year))
            .await,
    )
}

/// GET /dashboard/expenses-by-category?year=
async fn get_expenses_by_category(
    State(state): State<ApiState>,
    Query(query): Query<YearQuery>,
) -> Json<Vec<CategoryTotal>> {
    let year = query.year();
    Json(
        state
            .read(|doc| DashboardService::expenses_by_category(doc, year))
            .await,
    )
}

/// GET /inventory/analytics
async fn get_inventory_analytics(State(state): State<ApiState>) -> Json<InventoryAnalytics> {
    Json(state.read(DashboardService::inventory_analytics).await)
}
