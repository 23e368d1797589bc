//! Dashboard and analytics.
//!
//! Read-only folds over the document: annual income and expenses, collection
//! rate, per-entrance breakdown and inventory usage analytics.

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;
