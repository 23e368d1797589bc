//! Payment reconciliation.
//!
//! A payment mutation toggles the month's auto-generated petty-cash credit
//! and recomputes the tenant's debtor flag from year-to-date completeness.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::PaymentService;
pub use types::PaymentKey;
