//! The whole-application document and its scoped accessors.

use std::collections::BTreeMap;

use condo_shared::types::{BuildingId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    Building, ElectricityReading, Employee, Expense, Issue, Payment, PettyCashTransaction, Product,
    ProductHistory, ProductUsage, Tenant,
};

/// Petty-cash credit per paid month when a building has none configured.
pub const DEFAULT_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Monthly due when a building has none configured.
pub const DEFAULT_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(450, 0, 0, false, 0);

/// ID of the building in a fresh document.
pub const DEFAULT_BUILDING_ID: &str = "building-1";

/// Building-scoped collection.
pub type Scoped<T> = BTreeMap<BuildingId, Vec<T>>;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Title shown by clients.
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Client tab order.
    #[serde(default)]
    pub tab_order: Vec<String>,
    /// Monthly due per building.
    #[serde(default)]
    pub monthly_amount: BTreeMap<BuildingId, Decimal>,
    /// Petty-cash credit per paid month, per building.
    #[serde(default)]
    pub petty_cash_transfer: BTreeMap<BuildingId, Decimal>,
    /// Payment reminder template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_template: Option<String>,
    /// Where monthly payroll summaries are sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountant_email: Option<String>,
}

fn default_app_title() -> String {
    "Building Management".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            tab_order: Vec::new(),
            monthly_amount: BTreeMap::new(),
            petty_cash_transfer: BTreeMap::new(),
            whatsapp_template: None,
            accountant_email: None,
        }
    }
}

/// The complete persisted document.
///
/// Reconciliation functions take a `&AppState` and return the next snapshot;
/// the host commits it and schedules persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Managed buildings. Never empty.
    pub buildings: Vec<Building>,
    /// Tenants per building.
    pub tenants: Scoped<Tenant>,
    /// Payments per building.
    pub payments: Scoped<Payment>,
    /// Expenses per building.
    pub expenses: Scoped<Expense>,
    /// Petty cash per building.
    pub petty_cash: Scoped<PettyCashTransaction>,
    /// Employees (global).
    pub employees: Vec<Employee>,
    /// Issues per building.
    pub issues: Scoped<Issue>,
    /// Products (global).
    pub products: Vec<Product>,
    /// Product usages (global).
    pub product_usages: Vec<ProductUsage>,
    /// Product audit log (global).
    pub product_history: Vec<ProductHistory>,
    /// Electricity readings per building.
    pub electricity_readings: Scoped<ElectricityReading>,
    /// Settings.
    pub settings: Settings,
    /// Building the scoped operations act on.
    pub current_building_id: BuildingId,
}

impl Default for AppState {
    fn default() -> Self {
        let id = BuildingId::from(DEFAULT_BUILDING_ID);
        let mut state = Self {
            buildings: vec![Building {
                id: id.clone(),
                name: "New building".to_string(),
                entrances: vec!["A".to_string()],
                elevator_company: None,
                elevator_phone: None,
                electricity_details: Vec::new(),
                entrance_codes: Vec::new(),
            }],
            tenants: BTreeMap::new(),
            payments: BTreeMap::new(),
            expenses: BTreeMap::new(),
            petty_cash: BTreeMap::new(),
            employees: Vec::new(),
            issues: BTreeMap::new(),
            products: Vec::new(),
            product_usages: Vec::new(),
            product_history: Vec::new(),
            electricity_readings: BTreeMap::new(),
            settings: Settings::default(),
            current_building_id: id.clone(),
        };
        state.ensure_scope(&id);
        state
            .settings
            .monthly_amount
            .insert(id.clone(), DEFAULT_MONTHLY_AMOUNT);
        state
            .settings
            .petty_cash_transfer
            .insert(id, DEFAULT_TRANSFER_AMOUNT);
        state
    }
}

impl AppState {
    /// Creates empty scoped collections for a building if missing.
    pub fn ensure_scope(&mut self, building_id: &BuildingId) {
        self.tenants.entry(building_id.clone()).or_default();
        self.payments.entry(building_id.clone()).or_default();
        self.expenses.entry(building_id.clone()).or_default();
        self.petty_cash.entry(building_id.clone()).or_default();
        self.issues.entry(building_id.clone()).or_default();
        self.electricity_readings
            .entry(building_id.clone())
            .or_default();
    }

    /// Returns the building the scoped operations act on.
    #[must_use]
    pub fn current_building(&self) -> Option<&Building> {
        self.buildings
            .iter()
            .find(|b| b.id == self.current_building_id)
    }

    /// Tenants of the current building.
    #[must_use]
    pub fn current_tenants(&self) -> &[Tenant] {
        scoped(&self.tenants, &self.current_building_id)
    }

    /// Payments of the current building.
    #[must_use]
    pub fn current_payments(&self) -> &[Payment] {
        scoped(&self.payments, &self.current_building_id)
    }

    /// Expenses of the current building.
    #[must_use]
    pub fn current_expenses(&self) -> &[Expense] {
        scoped(&self.expenses, &self.current_building_id)
    }

    /// Petty cash of the current building.
    #[must_use]
    pub fn current_petty_cash(&self) -> &[PettyCashTransaction] {
        scoped(&self.petty_cash, &self.current_building_id)
    }

    /// Issues of the current building.
    #[must_use]
    pub fn current_issues(&self) -> &[Issue] {
        scoped(&self.issues, &self.current_building_id)
    }

    /// Finds a tenant of the current building.
    #[must_use]
    pub fn find_tenant(&self, tenant_id: &TenantId) -> Option<&Tenant> {
        self.current_tenants().iter().find(|t| &t.id == tenant_id)
    }

    /// Petty-cash credit per paid month for a building.
    #[must_use]
    pub fn transfer_amount(&self, building_id: &BuildingId) -> Decimal {
        self.settings
            .petty_cash_transfer
            .get(building_id)
            .copied()
            .unwrap_or(DEFAULT_TRANSFER_AMOUNT)
    }

    /// Monthly due for a building.
    #[must_use]
    pub fn monthly_amount(&self, building_id: &BuildingId) -> Decimal {
        self.settings
            .monthly_amount
            .get(building_id)
            .copied()
            .unwrap_or(DEFAULT_MONTHLY_AMOUNT)
    }
}

fn scoped<'a, T>(map: &'a Scoped<T>, building_id: &BuildingId) -> &'a [T] {
    map.get(building_id).map_or(&[], Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_document() {
        let state = AppState::default();
        assert_eq!(state.buildings.len(), 1);
        assert_eq!(state.current_building_id.as_str(), DEFAULT_BUILDING_ID);
        assert_eq!(state.buildings[0].entrances, vec!["A".to_string()]);
        assert!(state.current_tenants().is_empty());
        assert_eq!(state.transfer_amount(&state.current_building_id), dec!(50));
        assert_eq!(state.monthly_amount(&state.current_building_id), dec!(450));
    }

    #[test]
    fn test_transfer_amount_fallback() {
        let state = AppState::default();
        assert_eq!(
            state.transfer_amount(&BuildingId::from("unknown")),
            DEFAULT_TRANSFER_AMOUNT
        );
    }

    #[test]
    fn test_document_json_shape() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        for key in [
            "buildings",
            "tenants",
            "payments",
            "expenses",
            "pettyCash",
            "employees",
            "issues",
            "products",
            "productUsages",
            "productHistory",
            "electricityReadings",
            "settings",
            "currentBuildingId",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
