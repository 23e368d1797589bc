//! Petty-cash routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use condo_core::dashboard::DashboardService;
use condo_core::state::{PettyCashTransaction, RecordService};
use condo_core::validation::validate_petty_cash;
use condo_shared::types::PettyCashId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{ApiError, ApiState};

/// Creates the petty-cash routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/petty-cash", get(list_petty_cash).post(create_transaction))
        .route(
            "/petty-cash/{id}",
            put(update_transaction).delete(delete_transaction),
        )
}

/// Petty-cash ledger of the current building.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PettyCashResponse {
    /// Income minus expenses, all time.
    pub balance: Decimal,
    /// Transactions.
    pub transactions: Vec<PettyCashTransaction>,
}

/// GET /petty-cash
async fn list_petty_cash(State(state): State<ApiState>) -> Json<PettyCashResponse> {
    Json(
        state
            .read(|doc| PettyCashResponse {
                balance: DashboardService::petty_cash_balance(doc),
                transactions: doc.current_petty_cash().to_vec(),
            })
            .await,
    )
}

/// POST /petty-cash
async fn create_transaction(
    State(state): State<ApiState>,
    Json(tx): Json<PettyCashTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    validate_petty_cash(&tx)?;
    let created = state
        .commit(move |doc, _| Ok((RecordService::add_petty_cash(doc, tx.clone()), tx)))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /petty-cash/{id}
async fn update_transaction(
    State(state): State<ApiState>,
    Path(id): Path<PettyCashId>,
    Json(mut tx): Json<PettyCashTransaction>,
) -> Result<Json<PettyCashTransaction>, ApiError> {
    tx.id = id;
    validate_petty_cash(&tx)?;
    let updated = state
        .commit(move |doc, _| {
            if !doc.current_petty_cash().iter().any(|t| t.id == tx.id) {
                return Err(ApiError::not_found("Petty-cash entry", &tx.id));
            }
            Ok((RecordService::update_petty_cash(doc, tx.clone()), tx))
        })
        .await?;
    Ok(Json(updated))
}

/// DELETE /petty-cash/{id}
async fn delete_transaction(
    State(state): State<ApiState>,
    Path(id): Path<PettyCashId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((RecordService::delete_petty_cash(doc, &id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::routes::test_support::{api_state, app, send};
    use condo_core::state::AppState;
    use serde_json::json;

    #[tokio::test]
    async fn test_balance_reflects_transactions() {
        let state = api_state(AppState::default());
        for (kind, amount) in [("income", "200"), ("expense", "80")] {
            let (status, _) = send(
                app(&state),
                "POST",
                "/petty-cash",
                Some(json!({
                    "date": "2025-01-10",
                    "description": "Light bulbs",
                    "type": kind,
                    "amount": amount
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send(app(&state), "GET", "/petty-cash", None).await;

        assert_eq!(body["balance"], "120");
        assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
    }
}
