//! Maintenance issue routes.
//!
//! Resolving an issue with a repair cost books a repair expense dated
//! today; reopening it removes that expense.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use condo_core::expenses::IssueService;
use condo_core::state::Issue;
use condo_core::validation::validate_issue;
use condo_shared::types::IssueId;
use tracing::info;

use crate::{ApiError, ApiState};

/// Creates the issue routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/issues", get(list_issues).put(upsert_issue))
        .route("/issues/{id}", delete(delete_issue))
}

/// GET /issues
async fn list_issues(State(state): State<ApiState>) -> Json<Vec<Issue>> {
    Json(state.read(|doc| doc.current_issues().to_vec()).await)
}

/// PUT /issues
async fn upsert_issue(
    State(state): State<ApiState>,
    Json(issue): Json<Issue>,
) -> Result<Json<Issue>, ApiError> {
    validate_issue(&issue)?;
    let stored = state
        .commit(move |doc, today| Ok((IssueService::upsert_issue(doc, issue.clone(), today), issue)))
        .await?;
    info!(issue_id = %stored.id, status = ?stored.status, "Issue saved");
    Ok(Json(stored))
}

/// DELETE /issues/{id}
async fn delete_issue(
    State(state): State<ApiState>,
    Path(id): Path<IssueId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((IssueService::delete_issue(doc, &id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
