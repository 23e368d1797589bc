//! API route definitions.
//!
//! Mutation handlers validate the body, then run one engine entry point
//! through [`ApiState::commit`](crate::ApiState::commit).

use axum::Router;

use crate::ApiState;

pub mod buildings;
pub mod dashboard;
pub mod electricity;
pub mod employees;
pub mod expenses;
pub mod health;
pub mod inventory;
pub mod issues;
pub mod payments;
pub mod petty_cash;
pub mod state;
pub mod tenants;

#[cfg(test)]
pub(crate) mod test_support;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<ApiState> {
    Router::new()
        .merge(health::routes())
        .merge(state::routes())
        .merge(buildings::routes())
        .merge(tenants::routes())
        .merge(payments::routes())
        .merge(expenses::routes())
        .merge(petty_cash::routes())
        .merge(electricity::routes())
        .merge(employees::routes())
        .merge(issues::routes())
        .merge(inventory::routes())
        .merge(dashboard::routes())
}
