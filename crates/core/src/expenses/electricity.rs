//! Electricity readings and their linked expenses.

use condo_shared::types::{BuildingId, ExpenseId, ReadingId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::state::{AppState, ElectricityReading, Expense, ExpenseCategory, SourceType};

/// Keeps each costed reading paired with exactly one electricity expense.
pub struct ElectricityService;

impl ElectricityService {
    /// Inserts or replaces a reading and syncs its linked expense.
    ///
    /// A positive cost creates or updates the expense (keeping its id); a
    /// missing or zero cost removes it. The reading lives under its own
    /// `building_id`; a copy left under another building is dropped together
    /// with that building's linked expense.
    #[must_use]
    pub fn upsert_reading(state: &AppState, reading: ElectricityReading) -> AppState {
        let mut next = state.clone();
        let building = reading.building_id.clone();
        let source_id = reading.id.as_str().to_string();

        for (other, readings) in &mut next.electricity_readings {
            if other == &building {
                continue;
            }
            let before = readings.len();
            readings.retain(|r| r.id != reading.id);
            if readings.len() != before {
                debug!(reading_id = %reading.id, from = %other, "Reading moved between buildings");
                if let Some(expenses) = next.expenses.get_mut(other) {
                    expenses.retain(|e| !e.is_linked_to(SourceType::Electricity, &source_id));
                }
            }
        }

        let readings = next.electricity_readings.entry(building.clone()).or_default();
        match readings.iter().position(|r| r.id == reading.id) {
            Some(idx) => readings[idx] = reading.clone(),
            None => readings.push(reading.clone()),
        }

        let expenses = next.expenses.entry(building).or_default();
        let linked = expenses
            .iter()
            .position(|e| e.is_linked_to(SourceType::Electricity, &source_id));
        match (reading.chargeable_cost(), linked) {
            (Some(cost), Some(idx)) => {
                let id = expenses[idx].id.clone();
                expenses[idx] = Self::linked_expense(id, &reading, cost);
            }
            (Some(cost), None) => {
                expenses.push(Self::linked_expense(ExpenseId::new(), &reading, cost));
            }
            (None, Some(_)) => {
                expenses.retain(|e| !e.is_linked_to(SourceType::Electricity, &source_id));
            }
            (None, None) => {}
        }
        next
    }

    /// Removes a reading and its linked expense, wherever the reading lives.
    #[must_use]
    pub fn delete_reading(state: &AppState, reading_id: &ReadingId) -> AppState {
        let mut next = state.clone();
        let Some(building) = Self::owning_building(&next, reading_id) else {
            warn!(reading_id = %reading_id, "Reading not found in any building");
            return next;
        };

        if let Some(readings) = next.electricity_readings.get_mut(&building) {
            readings.retain(|r| &r.id != reading_id);
        }
        if let Some(expenses) = next.expenses.get_mut(&building) {
            expenses.retain(|e| !e.is_linked_to(SourceType::Electricity, reading_id.as_str()));
        }
        next
    }

    fn owning_building(state: &AppState, reading_id: &ReadingId) -> Option<BuildingId> {
        state
            .electricity_readings
            .iter()
            .find(|(_, readings)| readings.iter().any(|r| &r.id == reading_id))
            .map(|(building, _)| building.clone())
    }

    fn linked_expense(id: ExpenseId, reading: &ElectricityReading, cost: Decimal) -> Expense {
        let notes = format!(
            "Auto-generated from meter reading - {}",
            reading.notes.as_deref().unwrap_or_default()
        );
        Expense {
            id,
            date: reading.reading_date,
            description: format!("Electricity - entrance {}", reading.entrance),
            category: ExpenseCategory::Electricity,
            amount: cost,
            entrance: Some(reading.entrance.clone()),
            notes: Some(notes.trim().to_string()),
            is_auto_generated: true,
            source_type: Some(SourceType::Electricity),
            source_id: Some(reading.id.as_str().to_string()),
        }
    }
}
