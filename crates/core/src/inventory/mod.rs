//! Inventory ledger.
//!
//! Products, usages, the audit history, and the auto-generated inventory
//! expenses are kept mutually consistent.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::InventoryError;
pub use service::InventoryService;
pub use types::{NewUsage, StockAddition};
