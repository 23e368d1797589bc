//! Dashboard read models.

use chrono::NaiveDate;
use condo_shared::types::ProductId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::state::ExpenseCategory;

/// Headline figures of the current building for a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Year reported.
    pub year: i32,
    /// Paid months in the year times the building's monthly amount.
    pub total_income: Decimal,
    /// Expenses dated in the year.
    pub total_expenses: Decimal,
    /// Income minus expenses.
    pub annual_balance: Decimal,
    /// All-time petty-cash income minus expenses.
    pub petty_cash_balance: Decimal,
    /// Tenants flagged as debtors.
    pub debtor_count: usize,
    /// Issues not yet resolved.
    pub open_issue_count: usize,
    /// Tenants in the building.
    pub tenant_count: usize,
}

/// Collection status of the current building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStatus {
    /// Tenants not in debt.
    pub paid_count: usize,
    /// Tenants in debt.
    pub debtor_count: usize,
    /// All tenants.
    pub total: usize,
    /// Paid share in percent, 2 dp.
    pub collection_rate: Decimal,
}

/// Expense total of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Category.
    pub category: ExpenseCategory,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Share of all expenses in percent, 2 dp.
    pub percent: Decimal,
}

/// Scope of an entrance breakdown row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "camelCase")]
pub enum EntranceScope {
    /// A named entrance.
    Entrance(String),
    /// Records with no entrance.
    BuildingWide,
}

/// Income and expense of one entrance (or of the building-wide remainder).
///
/// `repair_costs` and `inventory_cost` are components already contained in
/// `expenses` through their auto-generated expenses, reported for insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntranceBreakdown {
    /// Entrance or building-wide.
    pub scope: EntranceScope,
    /// Tenants of the entrance.
    pub tenant_count: usize,
    /// Paid months times the monthly amount.
    pub income: Decimal,
    /// Petty-cash income.
    pub petty_cash_income: Decimal,
    /// Expenses.
    pub expenses: Decimal,
    /// Petty-cash expenses.
    pub petty_cash_expenses: Decimal,
    /// Repair costs of resolved issues.
    pub repair_costs: Decimal,
    /// Inventory consumed at the entrance.
    pub inventory_cost: Decimal,
    /// `income + petty_cash_income`.
    pub total_income: Decimal,
    /// `expenses + petty_cash_expenses`.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net: Decimal,
    /// Issues not yet resolved.
    pub open_issues: usize,
    /// Tenants flagged as debtors.
    pub debtor_count: usize,
}

/// Usage cost of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCost {
    /// Product name, or "Unknown product".
    pub name: String,
    /// Sum of usage costs.
    pub cost: Decimal,
    /// Share of all usage cost in percent, 2 dp.
    pub percent: Decimal,
}

/// Usage cost at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCost {
    /// Location.
    pub location: String,
    /// Sum of usage costs.
    pub cost: Decimal,
}

/// Usage cost of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCost {
    /// Day.
    pub date: NaiveDate,
    /// Sum of usage costs.
    pub cost: Decimal,
}

/// Consumption of one product at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProductUsage {
    /// Product.
    pub product_id: ProductId,
    /// Product name, or "Unknown product".
    pub name: String,
    /// Units used.
    pub quantity: i64,
    /// Sum of costs.
    pub cost: Decimal,
    /// Number of usages.
    pub usage_count: usize,
}

/// Consumption at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    /// Location.
    pub location: String,
    /// Units used.
    pub total_quantity: i64,
    /// Sum of costs.
    pub total_cost: Decimal,
    /// Per-product breakdown.
    pub products: Vec<LocationProductUsage>,
}

/// Inventory analytics over all products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAnalytics {
    /// Number of products.
    pub product_count: usize,
    /// Units in stock.
    pub units_in_stock: i64,
    /// Stock valued at unit price.
    pub stock_value: Decimal,
    /// Sum of all usage costs.
    pub usage_cost: Decimal,
    /// Cost per product, largest first.
    pub cost_by_product: Vec<ProductCost>,
    /// Cost per location, largest first, top 10.
    pub cost_by_location: Vec<LocationCost>,
    /// Cost per day, oldest first, last 30 days with usage.
    pub daily_costs: Vec<DailyCost>,
    /// Per-location breakdown.
    pub locations: Vec<LocationAnalysis>,
}
