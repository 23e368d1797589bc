//! Expense routes. Manual expenses have no side effects.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use condo_core::state::{Expense, RecordService};
use condo_core::validation::validate_expense;
use condo_shared::types::ExpenseId;

use crate::{ApiError, ApiState};

/// Creates the expense routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
}

/// GET /expenses
async fn list_expenses(State(state): State<ApiState>) -> Json<Vec<Expense>> {
    Json(state.read(|doc| doc.current_expenses().to_vec()).await)
}

/// POST /expenses
async fn create_expense(
    State(state): State<ApiState>,
    Json(expense): Json<Expense>,
) -> Result<impl IntoResponse, ApiError> {
    validate_expense(&expense)?;
    let created = state
        .commit(move |doc, _| Ok((RecordService::add_expense(doc, expense.clone()), expense)))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /expenses/{id}
async fn update_expense(
    State(state): State<ApiState>,
    Path(id): Path<ExpenseId>,
    Json(mut expense): Json<Expense>,
) -> Result<Json<Expense>, ApiError> {
    expense.id = id;
    validate_expense(&expense)?;
    let updated = state
        .commit(move |doc, _| {
            if !doc.current_expenses().iter().any(|e| e.id == expense.id) {
                return Err(ApiError::not_found("Expense", &expense.id));
            }
            Ok((RecordService::update_expense(doc, expense.clone()), expense))
        })
        .await?;
    Ok(Json(updated))
}

/// DELETE /expenses/{id}
async fn delete_expense(
    State(state): State<ApiState>,
    Path(id): Path<ExpenseId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((RecordService::delete_expense(doc, &id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
