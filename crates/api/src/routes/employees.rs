//! Employee, absence and payroll routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::Datelike;
use condo_core::payroll::{PayrollService, PayrollSummary};
use condo_core::state::{Absence, Employee};
use condo_core::validation::{validate_employee, validate_month};
use condo_shared::types::{AbsenceId, EmployeeId};
use serde::Deserialize;

use crate::{ApiError, ApiState};

/// Creates the employee routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            put(update_employee).delete(delete_employee),
        )
        .route("/employees/{id}/absences", post(add_absence))
        .route(
            "/employees/{id}/absences/{absence_id}",
            delete(remove_absence),
        )
        .route("/payroll", get(monthly_payroll))
}

/// Query parameters for payroll.
#[derive(Debug, Deserialize)]
pub struct PayrollQuery {
    /// Calendar year; defaults to this year.
    pub year: Option<i32>,
    /// Month, 1-12; defaults to this month.
    pub month: Option<u32>,
}

/// GET /employees
async fn list_employees(State(state): State<ApiState>) -> Json<Vec<Employee>> {
    Json(state.read(|doc| doc.employees.clone()).await)
}

/// POST /employees
async fn create_employee(
    State(state): State<ApiState>,
    Json(employee): Json<Employee>,
) -> Result<impl IntoResponse, ApiError> {
    validate_employee(&employee)?;
    let created = state
        .commit(move |doc, _| Ok((PayrollService::upsert_employee(doc, employee.clone()), employee)))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /employees/{id}
async fn update_employee(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
    Json(mut employee): Json<Employee>,
) -> Result<Json<Employee>, ApiError> {
    employee.id = id;
    validate_employee(&employee)?;
    let updated = state
        .commit(move |doc, _| {
            if !doc.employees.iter().any(|e| e.id == employee.id) {
                return Err(ApiError::not_found("Employee", &employee.id));
            }
            Ok((PayrollService::upsert_employee(doc, employee.clone()), employee))
        })
        .await?;
    Ok(Json(updated))
}

/// DELETE /employees/{id}
async fn delete_employee(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((PayrollService::delete_employee(doc, &id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /employees/{id}/absences
async fn add_absence(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
    Json(absence): Json<Absence>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .commit(move |doc, _| {
            if !doc.employees.iter().any(|e| e.id == id) {
                return Err(ApiError::not_found("Employee", &id));
            }
            Ok((PayrollService::add_absence(doc, &id, absence.clone()), absence))
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /employees/{id}/absences/{absence_id}
async fn remove_absence(
    State(state): State<ApiState>,
    Path((id, absence_id)): Path<(EmployeeId, AbsenceId)>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((PayrollService::remove_absence(doc, &id, &absence_id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /payroll?year=&month=
async fn monthly_payroll(
    State(state): State<ApiState>,
    Query(query): Query<PayrollQuery>,
) -> Result<Json<PayrollSummary>, ApiError> {
    let today = crate::today();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    validate_month(month)?;
    Ok(Json(
        state
            .read(|doc| PayrollService::monthly_payroll(doc, year, month))
            .await,
    ))
}
