//! Core consistency engine for the building management system.
//!
//! Every mutation is a pure function from the current document to the next
//! one. Derived records (petty-cash credits, debtor flags, auto-generated
//! expenses, stock levels, the product audit log) are kept in step inside
//! the same call. No web dependencies; I/O is confined to `storage`.
//!
//! # Modules
//!
//! - `state` - Document model and plain record maintenance
//! - `payments` - Payment reconciliation and debtor tracking
//! - `expenses` - Electricity and issue auto-expenses
//! - `inventory` - Stock, usages and the product audit log
//! - `payroll` - Employees, absences and monthly salaries
//! - `dashboard` - Read-side aggregation
//! - `snapshot` - Import, export and reset of the whole document
//! - `storage` - Snapshot persistence and autosave
//! - `validation` - Request checks run before the engine

pub mod dashboard;
pub mod expenses;
pub mod inventory;
pub mod payments;
pub mod payroll;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod validation;
