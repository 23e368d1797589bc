//! Read-side folds of the document into dashboard figures.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use condo_shared::types::ProductId;
use rust_decimal::Decimal;

use super::types::{
    CategoryTotal, CollectionStatus, DailyCost, DashboardSummary, EntranceBreakdown,
    EntranceScope, InventoryAnalytics, LocationAnalysis, LocationCost, LocationProductUsage,
    ProductCost,
};
use crate::state::{AppState, ExpenseCategory, IssueStatus, TransactionKind};

/// Label of usages whose product no longer exists.
pub const UNKNOWN_PRODUCT: &str = "Unknown product";

/// Locations shown in the cost-by-location ranking.
const TOP_LOCATIONS: usize = 10;

/// Days shown in the daily cost series.
const DAILY_WINDOW: usize = 30;

/// Dashboard aggregation service. Pure functions, no mutation.
pub struct DashboardService;

impl DashboardService {
    /// Headline figures of the current building for `year`.
    #[must_use]
    pub fn summary(state: &AppState, year: i32) -> DashboardSummary {
        let monthly = state.monthly_amount(&state.current_building_id);
        let paid_months = state
            .current_payments()
            .iter()
            .filter(|p| p.paid && p.year == year)
            .count();
        let total_income = monthly * Decimal::from(paid_months);
        let total_expenses: Decimal = state
            .current_expenses()
            .iter()
            .filter(|e| e.date.year() == year)
            .map(|e| e.amount)
            .sum();

        let tenants = state.current_tenants();
        DashboardSummary {
            year,
            total_income,
            total_expenses,
            annual_balance: total_income - total_expenses,
            petty_cash_balance: Self::petty_cash_balance(state),
            debtor_count: tenants.iter().filter(|t| t.is_debtor).count(),
            open_issue_count: state
                .current_issues()
                .iter()
                .filter(|i| i.status != IssueStatus::Resolved)
                .count(),
            tenant_count: tenants.len(),
        }
    }

    /// All-time petty-cash income minus expenses of the current building.
    #[must_use]
    pub fn petty_cash_balance(state: &AppState) -> Decimal {
        state
            .current_petty_cash()
            .iter()
            .map(|t| match t.kind {
                TransactionKind::Income => t.amount,
                TransactionKind::Expense => -t.amount,
            })
            .sum()
    }

    /// Paid versus debtor tenants.
    #[must_use]
    pub fn collection_status(state: &AppState) -> CollectionStatus {
        let tenants = state.current_tenants();
        let debtor_count = tenants.iter().filter(|t| t.is_debtor).count();
        let paid_count = tenants.len() - debtor_count;
        CollectionStatus {
            paid_count,
            debtor_count,
            total: tenants.len(),
            collection_rate: percent(Decimal::from(paid_count), Decimal::from(tenants.len())),
        }
    }

    /// Expenses of `year` grouped by category, largest first.
    #[must_use]
    pub fn expenses_by_category(state: &AppState, year: i32) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
        for expense in state.current_expenses().iter().filter(|e| e.date.year() == year) {
            *totals.entry(expense.category).or_default() += expense.amount;
        }
        let grand: Decimal = totals.values().copied().sum();

        let mut rows: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category,
                amount,
                percent: percent(amount, grand),
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount));
        rows
    }

    /// One row per entrance of the current building plus a building-wide row.
    #[must_use]
    pub fn entrance_breakdown(state: &AppState, year: i32) -> Vec<EntranceBreakdown> {
        let entrances = state
            .current_building()
            .map(|b| b.entrances.clone())
            .unwrap_or_default();

        let mut rows: Vec<EntranceBreakdown> = entrances
            .iter()
            .map(|entrance| Self::scope_row(state, year, &EntranceScope::Entrance(entrance.clone())))
            .collect();
        rows.push(Self::scope_row(state, year, &EntranceScope::BuildingWide));
        rows
    }

    fn scope_row(state: &AppState, year: i32, scope: &EntranceScope) -> EntranceBreakdown {
        let in_scope = |entrance: Option<&str>| match scope {
            EntranceScope::Entrance(label) => entrance == Some(label.as_str()),
            EntranceScope::BuildingWide => entrance.is_none_or(str::is_empty),
        };
        let at_location = |location: &str| match scope {
            EntranceScope::Entrance(label) => location.contains(&format!("Entrance {label}")),
            EntranceScope::BuildingWide => !location.contains("Entrance"),
        };

        let monthly = state.monthly_amount(&state.current_building_id);
        let tenants: Vec<_> = state
            .current_tenants()
            .iter()
            .filter(|t| in_scope(Some(t.entrance.as_str())))
            .collect();
        let paid_months = state
            .current_payments()
            .iter()
            .filter(|p| p.paid && p.year == year && tenants.iter().any(|t| t.id == p.tenant_id))
            .count();
        let income = monthly * Decimal::from(paid_months);

        let petty_sum = |kind: TransactionKind| -> Decimal {
            state
                .current_petty_cash()
                .iter()
                .filter(|t| t.kind == kind && t.date.year() == year && in_scope(t.entrance.as_deref()))
                .map(|t| t.amount)
                .sum()
        };
        let petty_cash_income = petty_sum(TransactionKind::Income);
        let petty_cash_expenses = petty_sum(TransactionKind::Expense);

        let expenses: Decimal = state
            .current_expenses()
            .iter()
            .filter(|e| e.date.year() == year && in_scope(e.entrance.as_deref()))
            .map(|e| e.amount)
            .sum();

        let issues: Vec<_> = state
            .current_issues()
            .iter()
            .filter(|i| in_scope(i.entrance.as_deref()))
            .collect();
        let repair_costs: Decimal = issues
            .iter()
            .filter(|i| i.status == IssueStatus::Resolved && i.date.year() == year)
            .filter_map(|i| i.chargeable_cost())
            .sum();
        let inventory_cost: Decimal = state
            .product_usages
            .iter()
            .filter(|u| u.date.year() == year && at_location(&u.location))
            .map(|u| u.cost)
            .sum();

        let total_income = income + petty_cash_income;
        let total_expenses = expenses + petty_cash_expenses;
        EntranceBreakdown {
            scope: scope.clone(),
            tenant_count: tenants.len(),
            income,
            petty_cash_income,
            expenses,
            petty_cash_expenses,
            repair_costs,
            inventory_cost,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            open_issues: issues
                .iter()
                .filter(|i| i.status != IssueStatus::Resolved)
                .count(),
            debtor_count: tenants.iter().filter(|t| t.is_debtor).count(),
        }
    }

    /// Stock and usage analytics over all products.
    #[must_use]
    pub fn inventory_analytics(state: &AppState) -> InventoryAnalytics {
        let name_of = |id: &ProductId| {
            state
                .products
                .iter()
                .find(|p| &p.id == id)
                .map_or_else(|| UNKNOWN_PRODUCT.to_string(), |p| p.name.clone())
        };

        let usage_cost: Decimal = state.product_usages.iter().map(|u| u.cost).sum();

        let mut by_product: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_location: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        let mut locations: BTreeMap<String, BTreeMap<ProductId, LocationProductUsage>> =
            BTreeMap::new();

        for usage in &state.product_usages {
            *by_product.entry(name_of(&usage.product_id)).or_default() += usage.cost;
            *by_location.entry(usage.location.clone()).or_default() += usage.cost;
            *by_day.entry(usage.date).or_default() += usage.cost;

            let entry = locations
                .entry(usage.location.clone())
                .or_default()
                .entry(usage.product_id.clone())
                .or_insert_with(|| LocationProductUsage {
                    product_id: usage.product_id.clone(),
                    name: name_of(&usage.product_id),
                    quantity: 0,
                    cost: Decimal::ZERO,
                    usage_count: 0,
                });
            entry.quantity = entry.quantity.saturating_add(usage.quantity);
            entry.cost += usage.cost;
            entry.usage_count += 1;
        }

        let mut cost_by_product: Vec<ProductCost> = by_product
            .into_iter()
            .map(|(name, cost)| ProductCost {
                name,
                cost,
                percent: percent(cost, usage_cost),
            })
            .collect();
        cost_by_product.sort_by(|a, b| b.cost.cmp(&a.cost));

        let mut cost_by_location: Vec<LocationCost> = by_location
            .into_iter()
            .map(|(location, cost)| LocationCost { location, cost })
            .collect();
        cost_by_location.sort_by(|a, b| b.cost.cmp(&a.cost));
        cost_by_location.truncate(TOP_LOCATIONS);

        let skip = by_day.len().saturating_sub(DAILY_WINDOW);
        let daily_costs = by_day
            .into_iter()
            .skip(skip)
            .map(|(date, cost)| DailyCost { date, cost })
            .collect();

        let locations = locations
            .into_iter()
            .map(|(location, products)| {
                let products: Vec<LocationProductUsage> = products.into_values().collect();
                LocationAnalysis {
                    location,
                    total_quantity: products.iter().fold(0_i64, |sum, p| sum.saturating_add(p.quantity)),
                    total_cost: products.iter().map(|p| p.cost).sum(),
                    products,
                }
            })
            .collect();

        InventoryAnalytics {
            product_count: state.products.len(),
            units_in_stock: state
                .products
                .iter()
                .fold(0_i64, |sum, p| sum.saturating_add(p.quantity)),
            stock_value: state.products.iter().fold(Decimal::ZERO, |sum, p| {
                sum.saturating_add(Decimal::from(p.quantity).saturating_mul(p.price_per_unit))
            }),
            usage_cost,
            cost_by_product,
            cost_by_location,
            daily_costs,
            locations,
        }
    }
}

/// `part / total` in percent, 2 dp; zero when `total` is zero.
fn percent(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / total).round_dp(2)
}
