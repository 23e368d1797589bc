//! Auto-expense generation.
//!
//! Electricity readings with a cost and resolved issues with a repair cost
//! each own one auto-generated expense, linked back through
//! `(source_type, source_id)`.

pub mod electricity;
pub mod issues;

pub use electricity::ElectricityService;
pub use issues::{IssueService, StatusEdge};
