//! Property-based tests for InventoryService.
//!
//! - Stock equals the signed sum of the product's history rows
//! - Every usage of a known product owns exactly one inventory expense

use chrono::NaiveDate;
use condo_shared::types::ProductId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::InventoryService;
use super::types::{NewUsage, StockAddition};
use crate::state::fixtures::{building_with_tenants, product};
use crate::state::{AppState, HistoryAction, SourceType};

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    Use(i64, u32),
    EditUse(usize, i64),
    DeleteUse(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i64..50).prop_map(Op::Add),
        (1i64..20, 1u32..=28).prop_map(|(q, d)| Op::Use(q, d)),
        (0usize..8, 1i64..20).prop_map(|(i, q)| Op::EditUse(i, q)),
        (0usize..8).prop_map(Op::DeleteUse),
    ]
}

/// Strategy to generate unit prices (0.01 to 100.00).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn apply(state: &AppState, op: &Op) -> AppState {
    let id = ProductId::from("p1");
    let use_rows: Vec<_> = state
        .product_history
        .iter()
        .filter(|h| h.action == HistoryAction::Use)
        .cloned()
        .collect();
    match op {
        Op::Add(q) => InventoryService::add_stock(
            state,
            &id,
            StockAddition { quantity: *q, notes: None },
            day(1),
        ),
        Op::Use(q, d) => InventoryService::record_usage(
            state,
            NewUsage {
                product_id: id,
                quantity: *q,
                location: "Entrance A".to_string(),
                date: day(*d),
                notes: None,
            },
        ),
        Op::EditUse(i, q) => match use_rows.get(*i) {
            Some(row) => {
                let mut row = row.clone();
                row.quantity = -*q;
                InventoryService::edit_usage_history(state, row).unwrap()
            }
            None => state.clone(),
        },
        Op::DeleteUse(i) => match use_rows.get(*i) {
            Some(row) => InventoryService::delete_usage_history(state, &row.id).unwrap(),
            None => state.clone(),
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: quantity = create + adds - |uses| after any operation sequence.
    #[test]
    fn prop_quantity_is_history_projection(
        initial in 0i64..100,
        price in unit_price(),
        ops in prop::collection::vec(op(), 0..30),
    ) {
        let mut state = InventoryService::add_product(
            &building_with_tenants(&[]),
            product("p1", initial, price),
            day(1),
        );
        for op in &ops {
            state = apply(&state, op);
        }

        let projected: i64 = state.product_history.iter().map(|h| h.quantity).sum();
        prop_assert_eq!(state.products[0].quantity, projected);
    }

    /// Property: one inventory expense per usage, with amount equal to the usage cost.
    #[test]
    fn prop_usage_expense_pairing(
        price in unit_price(),
        uses in prop::collection::vec((1i64..20, 1u32..=28), 0..10),
    ) {
        let mut state = InventoryService::add_product(
            &building_with_tenants(&[]),
            product("p1", 100, price),
            day(1),
        );
        for (q, d) in &uses {
            state = apply(&state, &Op::Use(*q, *d));
        }

        prop_assert_eq!(state.product_usages.len(), uses.len());
        for usage in &state.product_usages {
            let linked: Vec<_> = state
                .current_expenses()
                .iter()
                .filter(|e| e.is_linked_to(SourceType::Inventory, usage.id.as_str()))
                .collect();
            prop_assert_eq!(linked.len(), 1);
            prop_assert_eq!(linked[0].amount, usage.cost);
            prop_assert_eq!(usage.cost, Decimal::from(usage.quantity) * price);
        }
    }
}
