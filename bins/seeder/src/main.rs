//! Demo data seeder for Condo development and testing.
//!
//! Builds a document with two buildings, tenants, a few paid months,
//! expenses, an electricity reading, a resolved repair, inventory and an
//! employee, running every record through the engine so derived data is
//! consistent. The result is written to the configured snapshot store.
//!
//! Usage: cargo run --bin seeder [-- --dry-run]

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condo_core::expenses::{ElectricityService, IssueService};
use condo_core::inventory::{InventoryService, NewUsage, StockAddition};
use condo_core::payments::PaymentService;
use condo_core::payroll::PayrollService;
use condo_core::state::{
    Absence, AppState, Building, ElectricityReading, Employee, EntranceCode, Expense,
    ExpenseCategory, Issue, IssueStatus, OwnershipStatus, Payment, PaymentMethod,
    PettyCashTransaction, Product, RecordService, Tenant, TransactionKind,
    default_work_days_per_month,
};
use condo_core::storage::{SnapshotStore, StorageConfig};
use condo_shared::AppConfig;
use condo_shared::types::{
    AbsenceId, BuildingId, EmployeeId, ExpenseId, IssueId, PettyCashId, ProductId, ReadingId,
    TenantId,
};

/// Second demo building.
const SECOND_BUILDING: &str = "building-2";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "condo=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let dry_run = std::env::args().any(|arg| arg == "--dry-run");
    let store = if dry_run {
        SnapshotStore::in_memory(&config.storage.snapshot_key)?
    } else {
        SnapshotStore::from_config(&StorageConfig::from_settings(&config.storage)?)?
    };

    let today = Local::now().date_naive();
    let document = demo_document(today);

    store.save(&document).await?;
    info!(
        provider = store.provider_name(),
        key = store.key(),
        dry_run,
        buildings = document.buildings.len(),
        tenants = document.tenants.values().map(Vec::len).sum::<usize>(),
        products = document.products.len(),
        "Seeding complete"
    );
    Ok(())
}

fn demo_document(today: NaiveDate) -> AppState {
    let mut state = AppState::default();

    let main_id = state.current_building_id.clone();
    state = RecordService::update_building(&state, main_building(main_id.clone()))
        .unwrap_or(state);
    state = RecordService::add_building(
        &state,
        building(SECOND_BUILDING, "Oak Street 4", &["A"]),
    );

    state = seed_building(state, &main_id, today, &[("1", "A"), ("2", "A"), ("3", "B"), ("4", "B")]);
    state = seed_building(
        state,
        &BuildingId::from(SECOND_BUILDING),
        today,
        &[("1", "A"), ("2", "A")],
    );
    state = RecordService::set_current_building(&state, &main_id);

    state = seed_inventory(state, today);
    seed_staff(state, today)
}

fn main_building(id: BuildingId) -> Building {
    Building {
        entrance_codes: vec![
            EntranceCode {
                entrance: "A".to_string(),
                code: "1234".to_string(),
            },
            EntranceCode {
                entrance: "B".to_string(),
                code: "5678".to_string(),
            },
        ],
        elevator_company: Some("Lift Service Ltd".to_string()),
        elevator_phone: Some("03-5550000".to_string()),
        ..building(id.as_str(), "Herzl 12", &["A", "B"])
    }
}

fn building(id: &str, name: &str, entrances: &[&str]) -> Building {
    Building {
        id: BuildingId::from(id),
        name: name.to_string(),
        entrances: entrances.iter().map(ToString::to_string).collect(),
        elevator_company: None,
        elevator_phone: None,
        electricity_details: Vec::new(),
        entrance_codes: Vec::new(),
    }
}

/// Tenants, payments, a manual expense, petty cash, a reading and an issue
/// for one building.
fn seed_building(
    state: AppState,
    building_id: &BuildingId,
    today: NaiveDate,
    apartments: &[(&str, &str)],
) -> AppState {
    let mut state = RecordService::set_current_building(&state, building_id);
    let year = today.year();

    for (index, (apartment, entrance)) in apartments.iter().enumerate() {
        let tenant_id = TenantId::from_raw(format!("{building_id}-tenant-{apartment}"));
        state = RecordService::add_tenant(&state, tenant(&tenant_id, apartment, entrance, index));

        // The last tenant of each building leaves the current month unpaid.
        let through = if index + 1 == apartments.len() {
            today.month().saturating_sub(1)
        } else {
            today.month()
        };
        for month in 1..=through {
            let payment = Payment {
                tenant_id: tenant_id.clone(),
                month,
                year,
                paid: true,
                date: NaiveDate::from_ymd_opt(year, month, 5),
            };
            state = PaymentService::upsert_payment(&state, payment, today);
        }
    }
    state = PaymentService::recompute_all_debtors(&state, today);

    let first_of_month = today.with_day(1).unwrap_or(today);
    state = RecordService::add_expense(
        &state,
        Expense {
            id: ExpenseId::new(),
            date: first_of_month,
            description: "Stairwell cleaning".to_string(),
            category: ExpenseCategory::Cleaning,
            amount: Decimal::from(600),
            entrance: None,
            notes: None,
            is_auto_generated: false,
            source_type: None,
            source_id: None,
        },
    );
    state = RecordService::add_petty_cash(
        &state,
        PettyCashTransaction {
            id: PettyCashId::new(),
            date: first_of_month,
            description: "Light bulbs".to_string(),
            kind: TransactionKind::Expense,
            amount: Decimal::from(45),
            entrance: Some("A".to_string()),
            is_auto_generated: false,
        },
    );
    state = ElectricityService::upsert_reading(
        &state,
        ElectricityReading {
            id: ReadingId::new(),
            building_id: building_id.clone(),
            entrance: "A".to_string(),
            reading_date: first_of_month,
            meter_reading: Decimal::from(18_250),
            electricity_cost: Some(Decimal::new(64_050, 2)),
            notes: Some("Bi-monthly bill".to_string()),
        },
    );

    let issue = Issue {
        id: IssueId::new(),
        date: first_of_month,
        reporter_name: "Dana".to_string(),
        description: "Lobby door hinge".to_string(),
        entrance: Some("A".to_string()),
        repair_cost: Some(Decimal::from(300)),
        status: IssueStatus::Open,
        notes: None,
    };
    state = IssueService::upsert_issue(&state, issue.clone(), today);
    IssueService::upsert_issue(
        &state,
        Issue {
            status: IssueStatus::Resolved,
            ..issue
        },
        today,
    )
}

fn tenant(id: &TenantId, apartment: &str, entrance: &str, index: usize) -> Tenant {
    let renter = index % 2 == 1;
    Tenant {
        id: id.clone(),
        apartment: apartment.to_string(),
        floor: i32::try_from(index / 2 + 1).unwrap_or(1),
        name: format!("Tenant {apartment}"),
        ownership_status: if renter {
            OwnershipStatus::Renter
        } else {
            OwnershipStatus::Owner
        },
        owner_name: renter.then(|| format!("Owner of {apartment}")),
        owner_phone: None,
        entrance: entrance.to_string(),
        primary_phone: format!("050-000000{index}"),
        secondary_phone: None,
        monthly_amount: Decimal::from(450),
        payment_method: if renter {
            PaymentMethod::Credit
        } else {
            PaymentMethod::Cash
        },
        credit_day: renter.then_some(10),
        custom_amount: None,
        is_debtor: false,
    }
}

fn seed_inventory(state: AppState, today: NaiveDate) -> AppState {
    let cleaner = ProductId::from("product-floor-cleaner");
    let bulbs = ProductId::from("product-led-bulb");

    let mut state = InventoryService::add_product(
        &state,
        Product {
            id: cleaner.clone(),
            name: "Floor cleaner".to_string(),
            quantity: 12,
            price_per_unit: Decimal::new(1_250, 2),
        },
        today,
    );
    state = InventoryService::add_product(
        &state,
        Product {
            id: bulbs.clone(),
            name: "LED bulb".to_string(),
            quantity: 30,
            price_per_unit: Decimal::from(8),
        },
        today,
    );
    state = InventoryService::add_stock(
        &state,
        &bulbs,
        StockAddition {
            quantity: 20,
            notes: Some("Quarterly order".to_string()),
        },
        today,
    );

    for (product_id, quantity, location) in [
        (&cleaner, 2, "Entrance A - lobby"),
        (&cleaner, 1, "Entrance B - stairs"),
        (&bulbs, 6, "Entrance A - stairs"),
        (&bulbs, 4, "Parking"),
    ] {
        state = InventoryService::record_usage(
            &state,
            NewUsage {
                product_id: product_id.clone(),
                quantity,
                location: location.to_string(),
                date: today,
                notes: None,
            },
        );
    }
    state
}

fn seed_staff(state: AppState, today: NaiveDate) -> AppState {
    let employee_id = EmployeeId::from("employee-cleaner");
    let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);

    let state = PayrollService::upsert_employee(
        &state,
        Employee {
            id: employee_id.clone(),
            name: "Yossi Mizrahi".to_string(),
            phone: "052-0000000".to_string(),
            start_date: start,
            base_salary: Decimal::from(5_200),
            work_days_per_month: default_work_days_per_month(),
            absences: Vec::new(),
        },
    );
    PayrollService::add_absence(
        &state,
        &employee_id,
        Absence {
            id: AbsenceId::new(),
            date: today.with_day(1).unwrap_or(today),
            reason: "Sick day".to_string(),
        },
    )
}
