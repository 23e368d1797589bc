//! State store: the single document every engine function folds over.
//!
//! - Entity types of the persisted document
//! - The document root with building-scoped accessors
//! - Plain record maintenance without derived side effects

pub mod document;
pub mod error;
pub mod records;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use document::{
    AppState, DEFAULT_BUILDING_ID, DEFAULT_MONTHLY_AMOUNT, DEFAULT_TRANSFER_AMOUNT, Scoped,
    Settings,
};
pub use error::StateError;
pub use records::RecordService;
pub use types::{
    Absence, Building, ElectricityDetail, ElectricityReading, Employee, EntranceCode, Expense,
    ExpenseCategory, HistoryAction, Issue, IssueStatus, OwnershipStatus, Payment, PaymentMethod,
    PettyCashTransaction, Product, ProductHistory, ProductUsage, SourceType, Tenant,
    TransactionKind, default_work_days_per_month,
};
