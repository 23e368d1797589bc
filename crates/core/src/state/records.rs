//! Plain record maintenance: buildings, tenants, expenses, petty cash, settings.
//!
//! None of these edits has a derived side effect, except that deleting a
//! building cascades its scoped collections.

use condo_shared::types::{BuildingId, ExpenseId, PettyCashId, TenantId};
use tracing::info;

use super::document::{AppState, DEFAULT_MONTHLY_AMOUNT, DEFAULT_TRANSFER_AMOUNT, Settings};
use super::error::StateError;
use super::types::{Building, Expense, PettyCashTransaction, Tenant};

/// Record maintenance service.
pub struct RecordService;

impl RecordService {
    /// Adds a building with empty collections and default amounts.
    #[must_use]
    pub fn add_building(state: &AppState, building: Building) -> AppState {
        let mut next = state.clone();
        let id = building.id.clone();
        next.ensure_scope(&id);
        next.settings
            .monthly_amount
            .entry(id.clone())
            .or_insert(DEFAULT_MONTHLY_AMOUNT);
        next.settings
            .petty_cash_transfer
            .entry(id.clone())
            .or_insert(DEFAULT_TRANSFER_AMOUNT);
        upsert(&mut next.buildings, building, |b| &b.id);
        info!(building_id = %id, "Building added");
        next
    }

    /// Replaces a building's details.
    ///
    /// # Errors
    ///
    /// Returns `StateError::BuildingNotFound` for an unknown id.
    pub fn update_building(state: &AppState, building: Building) -> Result<AppState, StateError> {
        if !state.buildings.iter().any(|b| b.id == building.id) {
            return Err(StateError::BuildingNotFound(building.id));
        }
        let mut next = state.clone();
        upsert(&mut next.buildings, building, |b| &b.id);
        Ok(next)
    }

    /// Deletes a building and every collection scoped to it.
    ///
    /// # Errors
    ///
    /// Returns `StateError::LastBuilding` if it is the only building left.
    pub fn delete_building(state: &AppState, id: &BuildingId) -> Result<AppState, StateError> {
        if !state.buildings.iter().any(|b| &b.id == id) {
            return Err(StateError::BuildingNotFound(id.clone()));
        }
        if state.buildings.len() <= 1 {
            return Err(StateError::LastBuilding);
        }

        let mut next = state.clone();
        next.buildings.retain(|b| &b.id != id);
        next.tenants.remove(id);
        next.payments.remove(id);
        next.expenses.remove(id);
        next.petty_cash.remove(id);
        next.issues.remove(id);
        next.electricity_readings.remove(id);
        next.settings.monthly_amount.remove(id);
        next.settings.petty_cash_transfer.remove(id);

        if &next.current_building_id == id
            && let Some(first) = next.buildings.first()
        {
            next.current_building_id = first.id.clone();
        }
        info!(building_id = %id, "Building deleted with its records");
        Ok(next)
    }

    /// Switches the building scoped operations act on. Unknown ids are ignored.
    #[must_use]
    pub fn set_current_building(state: &AppState, id: &BuildingId) -> AppState {
        let mut next = state.clone();
        if next.buildings.iter().any(|b| &b.id == id) {
            next.current_building_id = id.clone();
        }
        next
    }

    /// Replaces the settings.
    #[must_use]
    pub fn update_settings(state: &AppState, settings: Settings) -> AppState {
        let mut next = state.clone();
        next.settings = settings;
        next
    }

    /// Adds a tenant to the current building.
    #[must_use]
    pub fn add_tenant(state: &AppState, tenant: Tenant) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        upsert(next.tenants.entry(building).or_default(), tenant, |t| &t.id);
        next
    }

    /// Replaces a tenant of the current building.
    #[must_use]
    pub fn update_tenant(state: &AppState, tenant: Tenant) -> AppState {
        Self::add_tenant(state, tenant)
    }

    /// Removes a tenant. Their payments and petty-cash rows are history and stay.
    #[must_use]
    pub fn delete_tenant(state: &AppState, id: &TenantId) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        if let Some(tenants) = next.tenants.get_mut(&building) {
            tenants.retain(|t| &t.id != id);
        }
        next
    }

    /// Adds an expense to the current building.
    #[must_use]
    pub fn add_expense(state: &AppState, expense: Expense) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        upsert(next.expenses.entry(building).or_default(), expense, |e| &e.id);
        next
    }

    /// Replaces an expense of the current building.
    #[must_use]
    pub fn update_expense(state: &AppState, expense: Expense) -> AppState {
        Self::add_expense(state, expense)
    }

    /// Removes an expense of the current building.
    #[must_use]
    pub fn delete_expense(state: &AppState, id: &ExpenseId) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        if let Some(expenses) = next.expenses.get_mut(&building) {
            expenses.retain(|e| &e.id != id);
        }
        next
    }

    /// Adds a petty-cash transaction to the current building.
    #[must_use]
    pub fn add_petty_cash(state: &AppState, transaction: PettyCashTransaction) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        upsert(
            next.petty_cash.entry(building).or_default(),
            transaction,
            |t| &t.id,
        );
        next
    }

    /// Replaces a petty-cash transaction of the current building.
    #[must_use]
    pub fn update_petty_cash(state: &AppState, transaction: PettyCashTransaction) -> AppState {
        Self::add_petty_cash(state, transaction)
    }

    /// Removes a petty-cash transaction of the current building.
    #[must_use]
    pub fn delete_petty_cash(state: &AppState, id: &PettyCashId) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        if let Some(rows) = next.petty_cash.get_mut(&building) {
            rows.retain(|t| &t.id != id);
        }
        next
    }
}

/// Replaces the element with the same key, or appends.
pub(crate) fn upsert<T, K, F>(list: &mut Vec<T>, item: T, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> &K,
{
    match list.iter().position(|existing| key(existing) == key(&item)) {
        Some(idx) => list[idx] = item,
        None => list.push(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_building_creates_scope() {
        let state = AppState::default();
        let next = RecordService::add_building(&state, fixtures::building("b2", &["A", "B"]));

        assert_eq!(next.buildings.len(), 2);
        let id = BuildingId::from("b2");
        assert!(next.tenants.contains_key(&id));
        assert!(next.electricity_readings.contains_key(&id));
        assert_eq!(next.transfer_amount(&id), dec!(50));
        // Input snapshot untouched
        assert_eq!(state.buildings.len(), 1);
    }

    #[test]
    fn test_delete_building_cascades() {
        let state = fixtures::two_buildings();
        let b2 = BuildingId::from("b2");
        let state = RecordService::set_current_building(&state, &b2);
        let state = RecordService::add_tenant(&state, fixtures::tenant("t9", "A"));
        let state = RecordService::add_expense(
            &state,
            fixtures::expense("e9", fixtures::date(2025, 1, 5), dec!(10)),
        );

        let next = RecordService::delete_building(&state, &b2).unwrap();

        assert_eq!(next.buildings.len(), 1);
        assert!(!next.tenants.contains_key(&b2));
        assert!(!next.expenses.contains_key(&b2));
        assert!(!next.settings.petty_cash_transfer.contains_key(&b2));
        assert_eq!(next.current_building_id, next.buildings[0].id);
    }

    #[test]
    fn test_delete_last_building_rejected() {
        let state = AppState::default();
        let id = state.current_building_id.clone();
        assert_eq!(
            RecordService::delete_building(&state, &id),
            Err(StateError::LastBuilding)
        );
    }

    #[test]
    fn test_delete_unknown_building() {
        let state = fixtures::two_buildings();
        let err = RecordService::delete_building(&state, &BuildingId::from("nope")).unwrap_err();
        assert_eq!(err.error_code(), "BUILDING_NOT_FOUND");
    }

    #[test]
    fn test_set_current_building_ignores_unknown() {
        let state = fixtures::two_buildings();
        let next = RecordService::set_current_building(&state, &BuildingId::from("ghost"));
        assert_eq!(next.current_building_id, state.current_building_id);
    }

    #[test]
    fn test_tenant_crud() {
        let state = fixtures::building_with_tenants(&["t1"]);
        let mut tenant = state.current_tenants()[0].clone();
        tenant.name = "Renamed".to_string();

        let next = RecordService::update_tenant(&state, tenant);
        assert_eq!(next.current_tenants().len(), 1);
        assert_eq!(next.current_tenants()[0].name, "Renamed");

        let next = RecordService::delete_tenant(&next, &TenantId::from("t1"));
        assert!(next.current_tenants().is_empty());
    }

    #[test]
    fn test_expense_and_petty_cash_crud() {
        let state = fixtures::building_with_tenants(&[]);
        let next = RecordService::add_expense(
            &state,
            fixtures::expense("e1", fixtures::date(2025, 3, 1), dec!(120)),
        );
        assert_eq!(next.current_expenses().len(), 1);
        let next = RecordService::delete_expense(&next, &ExpenseId::from("e1"));
        assert!(next.current_expenses().is_empty());

        let next = RecordService::add_petty_cash(
            &next,
            fixtures::petty_cash("pc1", dec!(30), crate::state::TransactionKind::Expense),
        );
        assert_eq!(next.current_petty_cash().len(), 1);
        let next = RecordService::delete_petty_cash(&next, &PettyCashId::from("pc1"));
        assert!(next.current_petty_cash().is_empty());
    }
}
