//! Employee payroll with absence deductions.

pub mod service;
pub mod types;

pub use service::PayrollService;
pub use types::{PayrollLine, PayrollSummary};
