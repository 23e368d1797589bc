//! Builders for test documents.

use chrono::NaiveDate;
use condo_shared::types::{
    BuildingId, EmployeeId, ExpenseId, IssueId, PettyCashId, ProductId, ReadingId, TenantId,
};
use rust_decimal::Decimal;

use super::document::{AppState, DEFAULT_BUILDING_ID};
use super::records::RecordService;
use super::types::{
    Building, ElectricityReading, Employee, Expense, ExpenseCategory, Issue, IssueStatus,
    OwnershipStatus, PaymentMethod, PettyCashTransaction, Product, Tenant, TransactionKind,
    default_work_days_per_month,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn building(id: &str, entrances: &[&str]) -> Building {
    Building {
        id: BuildingId::from(id),
        name: format!("Building {id}"),
        entrances: entrances.iter().map(ToString::to_string).collect(),
        elevator_company: None,
        elevator_phone: None,
        electricity_details: Vec::new(),
        entrance_codes: Vec::new(),
    }
}

pub fn two_buildings() -> AppState {
    RecordService::add_building(&AppState::default(), building("b2", &["A", "B"]))
}

pub fn tenant(id: &str, entrance: &str) -> Tenant {
    Tenant {
        id: TenantId::from(id),
        apartment: format!("{id}-apt"),
        floor: 1,
        name: format!("Tenant {id}"),
        ownership_status: OwnershipStatus::Owner,
        owner_name: None,
        owner_phone: None,
        entrance: entrance.to_string(),
        primary_phone: "050-0000000".to_string(),
        secondary_phone: None,
        monthly_amount: Decimal::from(450),
        payment_method: PaymentMethod::Cash,
        credit_day: None,
        custom_amount: None,
        is_debtor: false,
    }
}

/// Default document whose single building (entrances A and B) holds the given tenants.
pub fn building_with_tenants(ids: &[&str]) -> AppState {
    let mut state = AppState::default();
    state.buildings[0].entrances = vec!["A".to_string(), "B".to_string()];
    let building = BuildingId::from(DEFAULT_BUILDING_ID);
    let tenants = state.tenants.entry(building).or_default();
    for id in ids {
        tenants.push(tenant(id, "A"));
    }
    state
}

pub fn expense(id: &str, date: NaiveDate, amount: Decimal) -> Expense {
    Expense {
        id: ExpenseId::from(id),
        date,
        description: format!("Expense {id}"),
        category: ExpenseCategory::Cleaning,
        amount,
        entrance: None,
        notes: None,
        is_auto_generated: false,
        source_type: None,
        source_id: None,
    }
}

pub fn petty_cash(id: &str, amount: Decimal, kind: TransactionKind) -> PettyCashTransaction {
    PettyCashTransaction {
        id: PettyCashId::from(id),
        date: date(2025, 1, 10),
        description: format!("Petty cash {id}"),
        kind,
        amount,
        entrance: None,
        is_auto_generated: false,
    }
}

pub fn reading(id: &str, building: &str, entrance: &str, cost: Option<Decimal>) -> ElectricityReading {
    ElectricityReading {
        id: ReadingId::from(id),
        building_id: BuildingId::from(building),
        entrance: entrance.to_string(),
        reading_date: date(2025, 2, 1),
        meter_reading: Decimal::from(12_345),
        electricity_cost: cost,
        notes: None,
    }
}

pub fn issue(id: &str, status: IssueStatus, repair_cost: Option<Decimal>) -> Issue {
    Issue {
        id: IssueId::from(id),
        date: date(2025, 2, 3),
        reporter_name: "Dana".to_string(),
        description: format!("Broken thing {id}"),
        entrance: Some("A".to_string()),
        repair_cost,
        status,
        notes: None,
    }
}

pub fn product(id: &str, quantity: i64, price_per_unit: Decimal) -> Product {
    Product {
        id: ProductId::from(id),
        name: format!("Product {id}"),
        quantity,
        price_per_unit,
    }
}

pub fn employee(id: &str, base_salary: Decimal, start_date: NaiveDate) -> Employee {
    Employee {
        id: EmployeeId::from(id),
        name: format!("Employee {id}"),
        phone: String::new(),
        start_date,
        base_salary,
        work_days_per_month: default_work_days_per_month(),
        absences: Vec::new(),
    }
}
