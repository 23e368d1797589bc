//! Payment routes.
//!
//! Every payment mutation also settles the month's petty-cash credit and
//! the tenant's debtor flag inside the same commit.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use condo_core::payments::{PaymentKey, PaymentService};
use condo_core::state::Payment;
use condo_core::validation::{validate_month, validate_payment};
use condo_shared::types::TenantId;
use serde::Serialize;
use tracing::info;

use crate::{ApiError, ApiState};

/// Creates the payment routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/payments", get(list_payments).put(upsert_payment))
        .route("/payments/mark-all-paid", post(mark_all_paid))
        .route("/payments/recompute-debtors", post(recompute_debtors))
        .route("/payments/{tenant_id}/{year}/{month}", delete(delete_payment))
}

/// Payment as stored, with the tenant's recomputed flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Stored payment.
    pub payment: Option<Payment>,
    /// Debtor flag after the change; absent for unknown tenants.
    pub is_debtor: Option<bool>,
}

/// Counts after a bulk payment operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentResponse {
    /// Tenants in the current building.
    pub tenants: usize,
    /// Tenants still flagged as debtors.
    pub debtors: usize,
}

/// GET /payments
async fn list_payments(State(state): State<ApiState>) -> Json<Vec<Payment>> {
    Json(state.read(|doc| doc.current_payments().to_vec()).await)
}

/// PUT /payments
///
/// Creates or replaces the payment of `(tenantId, year, month)`.
async fn upsert_payment(
    State(state): State<ApiState>,
    Json(payment): Json<Payment>,
) -> Result<Json<PaymentResponse>, ApiError> {
    validate_payment(&payment)?;
    let key = PaymentKey::of(&payment);
    let response = state
        .commit(move |doc, today| {
            let next = PaymentService::upsert_payment(doc, payment, today);
            let response = PaymentResponse {
                payment: next
                    .current_payments()
                    .iter()
                    .find(|p| key.matches(p))
                    .cloned(),
                is_debtor: next.find_tenant(&key.tenant_id).map(|t| t.is_debtor),
            };
            Ok((next, response))
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /payments/{tenant_id}/{year}/{month}
async fn delete_payment(
    State(state): State<ApiState>,
    Path((tenant_id, year, month)): Path<(TenantId, i32, u32)>,
) -> Result<StatusCode, ApiError> {
    validate_month(month)?;
    let key = PaymentKey::new(tenant_id, year, month);
    state
        .commit(|doc, today| Ok((PaymentService::delete_payment(doc, &key, today), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /payments/mark-all-paid
///
/// Marks January through the current month paid for every tenant of the
/// current building.
async fn mark_all_paid(State(state): State<ApiState>) -> Result<Json<BulkPaymentResponse>, ApiError> {
    let response = state
        .commit(|doc, today| {
            let next = PaymentService::mark_all_paid_through_current_month(doc, today);
            let response = bulk_response(&next);
            Ok((next, response))
        })
        .await?;
    info!(tenants = response.tenants, "All tenants marked paid");
    Ok(Json(response))
}

/// POST /payments/recompute-debtors
async fn recompute_debtors(
    State(state): State<ApiState>,
) -> Result<Json<BulkPaymentResponse>, ApiError> {
    let response = state
        .commit(|doc, today| {
            let next = PaymentService::recompute_all_debtors(doc, today);
            let response = bulk_response(&next);
            Ok((next, response))
        })
        .await?;
    Ok(Json(response))
}

fn bulk_response(doc: &condo_core::state::AppState) -> BulkPaymentResponse {
    let tenants = doc.current_tenants();
    BulkPaymentResponse {
        tenants: tenants.len(),
        debtors: tenants.iter().filter(|t| t.is_debtor).count(),
    }
}
