//! Inventory request types.

use chrono::NaiveDate;
use condo_shared::types::ProductId;
use serde::{Deserialize, Serialize};

/// A consumption of stock to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUsage {
    /// Product used.
    pub product_id: ProductId,
    /// Units used.
    pub quantity: i64,
    /// Where it was used.
    pub location: String,
    /// Usage date.
    pub date: NaiveDate,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stock to add to an existing product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAddition {
    /// Units added.
    pub quantity: i64,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}
