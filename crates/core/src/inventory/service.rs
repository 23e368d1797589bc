//! Inventory ledger.
//!
//! History rows are the source of truth; `Product::quantity` is a maintained
//! projection of them. Every usage also owns one auto-generated inventory
//! expense, linked by the usage id.

use chrono::NaiveDate;
use condo_shared::types::{ExpenseId, HistoryId, ProductId, UsageId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::InventoryError;
use super::types::{NewUsage, StockAddition};
use crate::state::{
    AppState, Expense, ExpenseCategory, HistoryAction, Product, ProductHistory, ProductUsage,
    SourceType,
};

/// Inventory ledger service.
pub struct InventoryService;

impl InventoryService {
    /// Adds a product together with its `create` history row.
    #[must_use]
    pub fn add_product(state: &AppState, product: Product, today: NaiveDate) -> AppState {
        let mut next = state.clone();
        next.product_history.push(ProductHistory {
            id: HistoryId::new(),
            product_id: product.id.clone(),
            date: today,
            action: HistoryAction::Create,
            quantity: product.quantity,
            cost: line_cost(product.quantity, product.price_per_unit),
            location: None,
            notes: Some("Product created".to_string()),
        });
        info!(product_id = %product.id, quantity = product.quantity, "Product created");
        next.products.push(product);
        next
    }

    /// Updates a product's name and unit price.
    ///
    /// The stored quantity is kept: stock only moves through history rows.
    #[must_use]
    pub fn update_product(state: &AppState, product: Product) -> AppState {
        let mut next = state.clone();
        match product_mut(&mut next, &product.id) {
            Some(existing) => {
                existing.name = product.name;
                existing.price_per_unit = product.price_per_unit;
            }
            None => warn!(product_id = %product.id, "Product not found, update ignored"),
        }
        next
    }

    /// Deletes a product with its usages and history rows.
    #[must_use]
    pub fn delete_product(state: &AppState, product_id: &ProductId) -> AppState {
        let mut next = state.clone();
        next.products.retain(|p| &p.id != product_id);
        next.product_usages.retain(|u| &u.product_id != product_id);
        next.product_history.retain(|h| &h.product_id != product_id);
        info!(product_id = %product_id, "Product deleted with its history");
        next
    }

    /// Records a usage: decrements stock, appends a `use` row, and books an
    /// inventory expense in the current building.
    ///
    /// Over-use is allowed and drives the quantity negative. An unknown
    /// product still gets its usage and history rows, at zero cost, without
    /// a stock change or an expense.
    #[must_use]
    pub fn record_usage(state: &AppState, usage: NewUsage) -> AppState {
        let mut next = state.clone();
        let usage_id = UsageId::new();

        let product = product_mut(&mut next, &usage.product_id).map(|product| {
            product.quantity = product.quantity.saturating_sub(usage.quantity);
            if product.quantity < 0 {
                debug!(product_id = %product.id, quantity = product.quantity, "Stock below zero");
            }
            product.clone()
        });
        let cost = product
            .as_ref()
            .map_or(Decimal::ZERO, |p| line_cost(usage.quantity, p.price_per_unit));

        next.product_usages.push(ProductUsage {
            id: usage_id.clone(),
            product_id: usage.product_id.clone(),
            quantity: usage.quantity,
            location: usage.location.clone(),
            date: usage.date,
            notes: usage.notes.clone(),
            cost,
        });
        next.product_history.push(ProductHistory {
            id: HistoryId::new(),
            product_id: usage.product_id.clone(),
            date: usage.date,
            action: HistoryAction::Use,
            quantity: usage.quantity.saturating_neg(),
            cost,
            location: Some(usage.location.clone()),
            notes: usage.notes.clone(),
        });

        let Some(product) = product else {
            warn!(product_id = %usage.product_id, "Product not found, usage booked without expense");
            return next;
        };
        let notes = format!(
            "Auto-generated from inventory usage - {}",
            usage.notes.as_deref().unwrap_or_default()
        );
        let building = next.current_building_id.clone();
        next.expenses.entry(building).or_default().push(Expense {
            id: ExpenseId::new(),
            date: usage.date,
            description: usage_description(&product.name),
            category: ExpenseCategory::Inventory,
            amount: cost,
            entrance: None,
            notes: Some(notes.trim().to_string()),
            is_auto_generated: true,
            source_type: Some(SourceType::Inventory),
            source_id: Some(usage_id.into_inner()),
        });
        next
    }

    /// Adds stock to a product with an `add` history row. Unknown products are ignored.
    #[must_use]
    pub fn add_stock(
        state: &AppState,
        product_id: &ProductId,
        addition: StockAddition,
        today: NaiveDate,
    ) -> AppState {
        let mut next = state.clone();
        let Some(product) = product_mut(&mut next, product_id) else {
            warn!(product_id = %product_id, "Product not found, stock not added");
            return next;
        };
        product.quantity = product.quantity.saturating_add(addition.quantity);
        let cost = line_cost(addition.quantity, product.price_per_unit);

        next.product_history.push(ProductHistory {
            id: HistoryId::new(),
            product_id: product_id.clone(),
            date: today,
            action: HistoryAction::Add,
            quantity: addition.quantity,
            cost,
            location: None,
            notes: addition.notes,
        });
        next
    }

    /// Edits a `use` history row and carries the change into stock, the
    /// matching usage, and its expense.
    ///
    /// Quantities are compared as units used, so raising a usage lowers
    /// stock further. The usage is matched exactly by
    /// `(product, old date, old units)`; when none matches, the first
    /// inventory expense of any usage of the same product is updated instead.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError` if the row is missing or is not a `use` row.
    pub fn edit_usage_history(
        state: &AppState,
        updated: ProductHistory,
    ) -> Result<AppState, InventoryError> {
        let old = find_use_row(state, &updated.id)?.clone();
        let mut next = state.clone();

        let old_used = old.quantity.saturating_abs();
        let new_used = updated.quantity.saturating_abs();
        let delta = new_used.saturating_sub(old_used);

        let product = product_mut(&mut next, &old.product_id).map(|product| {
            product.quantity = product.quantity.saturating_sub(delta);
            product.clone()
        });
        let cost = product
            .as_ref()
            .map_or(updated.cost, |p| line_cost(new_used, p.price_per_unit));

        let row = ProductHistory {
            id: old.id.clone(),
            product_id: old.product_id.clone(),
            date: updated.date,
            action: HistoryAction::Use,
            quantity: -new_used,
            cost,
            location: updated.location.clone().or_else(|| old.location.clone()),
            notes: updated.notes.clone(),
        };
        if let Some(slot) = next.product_history.iter_mut().find(|h| h.id == row.id) {
            *slot = row;
        }

        let description = product.as_ref().map(|p| usage_description(&p.name));
        let exact = next
            .product_usages
            .iter_mut()
            .find(|u| u.product_id == old.product_id && u.date == old.date && u.quantity == old_used);

        if let Some(usage) = exact {
            usage.quantity = new_used;
            usage.cost = cost;
            usage.date = updated.date;
            if let Some(location) = updated.location {
                usage.location = location;
            }
            usage.notes = updated.notes;
            let usage_id = usage.id.clone();
            if let Some(expense) = inventory_expense_mut(&mut next, &usage_id) {
                expense.amount = cost;
                expense.date = updated.date;
                if let Some(description) = description {
                    expense.description = description;
                }
            }
        } else {
            let usage_ids: Vec<UsageId> = next
                .product_usages
                .iter()
                .filter(|u| u.product_id == old.product_id)
                .map(|u| u.id.clone())
                .collect();
            let fallback = next
                .expenses
                .values_mut()
                .flat_map(|list| list.iter_mut())
                .find(|e| {
                    e.source_type == Some(SourceType::Inventory)
                        && usage_ids
                            .iter()
                            .any(|id| e.source_id.as_deref() == Some(id.as_str()))
                });
            if let Some(expense) = fallback {
                debug!(expense_id = %expense.id, "Usage not matched exactly, updating expense by product");
                expense.amount = cost;
                if let Some(description) = description {
                    expense.description = description;
                }
            }
        }

        info!(history_id = %old.id, old_used, new_used, "Usage history edited");
        Ok(next)
    }

    /// Deletes a `use` history row: restores its units, and removes the
    /// matching usage and that usage's expense.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError` if the row is missing or is not a `use` row.
    pub fn delete_usage_history(
        state: &AppState,
        history_id: &HistoryId,
    ) -> Result<AppState, InventoryError> {
        let row = find_use_row(state, history_id)?.clone();
        let mut next = state.clone();
        let used = row.quantity.saturating_abs();

        next.product_history.retain(|h| &h.id != history_id);
        if let Some(product) = product_mut(&mut next, &row.product_id) {
            product.quantity = product.quantity.saturating_add(used);
        }

        let matched = next
            .product_usages
            .iter()
            .position(|u| u.product_id == row.product_id && u.date == row.date && u.quantity == used);
        match matched {
            Some(idx) => {
                let usage = next.product_usages.remove(idx);
                for expenses in next.expenses.values_mut() {
                    expenses.retain(|e| !e.is_linked_to(SourceType::Inventory, usage.id.as_str()));
                }
            }
            None => warn!(history_id = %history_id, "No usage matches the deleted history row"),
        }

        info!(history_id = %history_id, restored = used, "Usage history deleted");
        Ok(next)
    }
}

fn find_use_row<'a>(
    state: &'a AppState,
    history_id: &HistoryId,
) -> Result<&'a ProductHistory, InventoryError> {
    let row = state
        .product_history
        .iter()
        .find(|h| &h.id == history_id)
        .ok_or_else(|| InventoryError::HistoryNotFound(history_id.clone()))?;
    if row.action != HistoryAction::Use {
        return Err(InventoryError::ImmutableHistory {
            id: row.id.clone(),
            action: row.action,
        });
    }
    Ok(row)
}

fn product_mut<'a>(state: &'a mut AppState, product_id: &ProductId) -> Option<&'a mut Product> {
    state.products.iter_mut().find(|p| &p.id == product_id)
}

fn inventory_expense_mut<'a>(state: &'a mut AppState, usage_id: &UsageId) -> Option<&'a mut Expense> {
    state
        .expenses
        .values_mut()
        .flat_map(|list| list.iter_mut())
        .find(|e| e.is_linked_to(SourceType::Inventory, usage_id.as_str()))
}

/// Saturates at the `Decimal` bounds.
fn line_cost(quantity: i64, price_per_unit: Decimal) -> Decimal {
    Decimal::from(quantity).saturating_mul(price_per_unit)
}

fn usage_description(product_name: &str) -> String {
    format!("Product usage: {product_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{building_with_tenants, date, product, two_buildings};
    use crate::state::RecordService;
    use condo_shared::types::BuildingId;
    use rust_decimal_macros::dec;

    fn usage(product_id: &str, quantity: i64, day: u32) -> NewUsage {
        NewUsage {
            product_id: ProductId::from(product_id),
            quantity,
            location: "Entrance A - lobby".to_string(),
            date: date(2025, 4, day),
            notes: None,
        }
    }

    fn stock(state: &AppState, id: &str) -> i64 {
        state
            .products
            .iter()
            .find(|p| p.id.as_str() == id)
            .map(|p| p.quantity)
            .unwrap()
    }

    fn inventory_expenses(state: &AppState) -> Vec<Expense> {
        state
            .expenses
            .values()
            .flatten()
            .filter(|e| e.source_type == Some(SourceType::Inventory))
            .cloned()
            .collect()
    }

    fn last_history_id(state: &AppState) -> HistoryId {
        state.product_history.last().unwrap().id.clone()
    }

    /// Create 30, add 10, use 3.
    fn stocked() -> AppState {
        let today = date(2025, 4, 1);
        let state = building_with_tenants(&[]);
        let state = InventoryService::add_product(&state, product("p1", 30, dec!(2.50)), today);
        let state = InventoryService::add_stock(
            &state,
            &ProductId::from("p1"),
            StockAddition { quantity: 10, notes: None },
            today,
        );
        InventoryService::record_usage(&state, usage("p1", 3, 5))
    }

    #[test]
    fn test_create_add_use_sequence() {
        let state = stocked();
        assert_eq!(stock(&state, "p1"), 37);

        let actions: Vec<_> = state.product_history.iter().map(|h| (h.action, h.quantity)).collect();
        assert_eq!(
            actions,
            vec![
                (HistoryAction::Create, 30),
                (HistoryAction::Add, 10),
                (HistoryAction::Use, -3)
            ]
        );
        assert_eq!(state.product_history[0].cost, dec!(75.00));
        assert_eq!(state.product_history[1].cost, dec!(25.00));

        let usage = &state.product_usages[0];
        assert_eq!(usage.cost, dec!(7.50));
        let expenses = inventory_expenses(&state);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, dec!(7.50));
        assert_eq!(expenses[0].description, "Product usage: Product p1");
        assert_eq!(expenses[0].category, ExpenseCategory::Inventory);
        assert_eq!(expenses[0].source_id.as_deref(), Some(usage.id.as_str()));
        assert_eq!(
            expenses[0].notes.as_deref(),
            Some("Auto-generated from inventory usage -")
        );
    }

    #[test]
    fn test_delete_use_row_restores_stock() {
        let state = stocked();
        let next = InventoryService::delete_usage_history(&state, &last_history_id(&state)).unwrap();

        assert_eq!(stock(&next, "p1"), 40);
        assert!(next.product_usages.is_empty());
        assert!(inventory_expenses(&next).is_empty());
        assert_eq!(next.product_history.len(), 2);
    }

    #[test]
    fn test_create_and_add_rows_are_immutable() {
        let state = stocked();
        for row in &state.product_history[..2] {
            let err = InventoryService::delete_usage_history(&state, &row.id).unwrap_err();
            assert!(matches!(err, InventoryError::ImmutableHistory { .. }));
            let err = InventoryService::edit_usage_history(&state, row.clone()).unwrap_err();
            assert_eq!(err.error_code(), "IMMUTABLE_HISTORY");
        }
    }

    #[test]
    fn test_unknown_history_row() {
        let state = stocked();
        let err = InventoryService::delete_usage_history(&state, &HistoryId::from("nope")).unwrap_err();
        assert_eq!(err, InventoryError::HistoryNotFound(HistoryId::from("nope")));
    }

    #[test]
    fn test_edit_increases_usage_lowers_stock() {
        let state = stocked();
        let mut row = state.product_history.last().unwrap().clone();
        // Edit forms send the used amount as a negative number.
        row.quantity = -5;

        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        assert_eq!(stock(&next, "p1"), 35);
        let edited = next.product_history.last().unwrap();
        assert_eq!(edited.quantity, -5);
        assert_eq!(edited.cost, dec!(12.50));
        assert_eq!(next.product_usages[0].quantity, 5);
        assert_eq!(next.product_usages[0].cost, dec!(12.50));
        assert_eq!(inventory_expenses(&next)[0].amount, dec!(12.50));
    }

    #[test]
    fn test_edit_positive_quantity_is_treated_as_units_used() {
        let state = stocked();
        let mut row = state.product_history.last().unwrap().clone();
        row.quantity = 1;

        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        assert_eq!(stock(&next, "p1"), 39);
        assert_eq!(next.product_history.last().unwrap().quantity, -1);
    }

    #[test]
    fn test_edit_targets_exact_usage_expense() {
        let state = stocked();
        let state = InventoryService::record_usage(&state, usage("p1", 4, 9));
        let second_history = last_history_id(&state);
        let first_usage_id = state.product_usages[0].id.clone();

        let mut row = state.product_history.last().unwrap().clone();
        assert_eq!(row.id, second_history);
        row.quantity = -6;
        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        let expenses = inventory_expenses(&next);
        let first = expenses
            .iter()
            .find(|e| e.source_id.as_deref() == Some(first_usage_id.as_str()))
            .unwrap();
        assert_eq!(first.amount, dec!(7.50));
        let second = expenses
            .iter()
            .find(|e| e.source_id.as_deref() != Some(first_usage_id.as_str()))
            .unwrap();
        assert_eq!(second.amount, dec!(15.00));
        assert_eq!(stock(&next, "p1"), 31);
    }

    #[test]
    fn test_edit_falls_back_to_first_expense_of_product() {
        let state = stocked();
        let state = InventoryService::record_usage(&state, usage("p1", 4, 9));
        // Break the exact link by changing the usage date behind the ledger's back.
        let mut state = state;
        state.product_usages[1].date = date(2025, 4, 20);
        let first_usage_id = state.product_usages[0].id.clone();

        let mut row = state.product_history.last().unwrap().clone();
        row.quantity = -6;
        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        let expenses = inventory_expenses(&next);
        let first = expenses
            .iter()
            .find(|e| e.source_id.as_deref() == Some(first_usage_id.as_str()))
            .unwrap();
        // By-product matching lands on the first usage's expense.
        assert_eq!(first.amount, dec!(15.00));
    }

    #[test]
    fn test_usage_of_unknown_product() {
        let state = building_with_tenants(&[]);
        let next = InventoryService::record_usage(&state, usage("ghost", 2, 1));
        assert_eq!(next.product_usages.len(), 1);
        assert_eq!(next.product_usages[0].cost, Decimal::ZERO);
        assert_eq!(next.product_history.len(), 1);
        assert!(inventory_expenses(&next).is_empty());
    }

    #[test]
    fn test_over_use_goes_negative() {
        let state = stocked();
        let next = InventoryService::record_usage(&state, usage("p1", 50, 6));
        assert_eq!(stock(&next, "p1"), -13);
    }

    #[test]
    fn test_add_stock_unknown_product_is_noop() {
        let state = stocked();
        let next = InventoryService::add_stock(
            &state,
            &ProductId::from("ghost"),
            StockAddition { quantity: 5, notes: None },
            date(2025, 4, 2),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_product_keeps_quantity() {
        let state = stocked();
        let next = InventoryService::update_product(&state, product("p1", 999, dec!(3)));
        assert_eq!(stock(&next, "p1"), 37);
        assert_eq!(next.products[0].price_per_unit, dec!(3));
        assert_eq!(next.products[0].name, "Product p1");
    }

    #[test]
    fn test_delete_product_cascades() {
        let state = stocked();
        let next = InventoryService::delete_product(&state, &ProductId::from("p1"));
        assert!(next.products.is_empty());
        assert!(next.product_usages.is_empty());
        assert!(next.product_history.is_empty());
    }

    #[test]
    fn test_usage_expense_found_in_other_building() {
        let today = date(2025, 4, 1);
        let state = two_buildings();
        let state = InventoryService::add_product(&state, product("p1", 10, dec!(1)), today);
        let state = InventoryService::record_usage(&state, usage("p1", 2, 3));
        // Switch buildings after the expense was booked.
        let state = RecordService::set_current_building(&state, &BuildingId::from("b2"));

        let next = InventoryService::delete_usage_history(&state, &last_history_id(&state)).unwrap();
        assert!(inventory_expenses(&next).is_empty());
        assert_eq!(stock(&next, "p1"), 10);
    }

    #[test]
    fn test_usage_cost_saturates_at_decimal_limit() {
        let today = date(2025, 4, 1);
        let state = building_with_tenants(&[]);
        let state = InventoryService::add_product(&state, product("p1", 5, Decimal::MAX), today);

        let next = InventoryService::record_usage(&state, usage("p1", 2, 3));

        assert_eq!(next.product_usages[0].cost, Decimal::MAX);
        assert_eq!(inventory_expenses(&next)[0].amount, Decimal::MAX);
        assert_eq!(stock(&next, "p1"), 3);
    }

    #[test]
    fn test_usage_saturates_stock_at_i64_bounds() {
        let today = date(2025, 4, 1);
        let state = building_with_tenants(&[]);
        let state = InventoryService::add_product(&state, product("p1", -10, dec!(0)), today);

        let next = InventoryService::record_usage(&state, usage("p1", i64::MAX, 3));

        assert_eq!(stock(&next, "p1"), i64::MIN);
        assert_eq!(next.product_history.last().unwrap().quantity, -i64::MAX);
    }

    #[test]
    fn test_edit_with_min_quantity_saturates() {
        let state = stocked();
        let mut row = state.product_history.last().unwrap().clone();
        row.quantity = i64::MIN;

        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        assert_eq!(next.product_history.last().unwrap().quantity, -i64::MAX);
        assert_eq!(stock(&next, "p1"), 40 - i64::MAX);
        assert_eq!(next.product_usages[0].quantity, i64::MAX);
    }

    #[test]
    fn test_edit_without_location_keeps_it_on_row_and_usage() {
        let state = stocked();
        let mut row = state.product_history.last().unwrap().clone();
        row.quantity = -4;
        row.location = None;

        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        let edited = next.product_history.last().unwrap();
        assert_eq!(edited.location.as_deref(), Some("Entrance A - lobby"));
        assert_eq!(next.product_usages[0].location, "Entrance A - lobby");
    }

    #[test]
    fn test_edit_with_new_location_moves_row_and_usage() {
        let state = stocked();
        let mut row = state.product_history.last().unwrap().clone();
        row.location = Some("Parking".to_string());

        let next = InventoryService::edit_usage_history(&state, row).unwrap();

        assert_eq!(
            next.product_history.last().unwrap().location.as_deref(),
            Some("Parking")
        );
        assert_eq!(next.product_usages[0].location, "Parking");
    }
}
