//! Entity types of the persisted condominium document.
//!
//! Field names serialize in camelCase so a snapshot written by any client of the
//! same document format imports unchanged.

use chrono::NaiveDate;
use condo_shared::types::{
    AbsenceId, BuildingId, EmployeeId, ExpenseId, HistoryId, IssueId, PettyCashId, ProductId,
    ReadingId, TenantId, UsageId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A managed building, subdivided into entrances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    /// Building ID.
    #[serde(default)]
    pub id: BuildingId,
    /// Display name.
    pub name: String,
    /// Ordered entrance labels.
    pub entrances: Vec<String>,
    /// Elevator maintenance company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevator_company: Option<String>,
    /// Elevator maintenance phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevator_phone: Option<String>,
    /// Electricity contract and meter numbers per entrance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub electricity_details: Vec<ElectricityDetail>,
    /// Door access codes per entrance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entrance_codes: Vec<EntranceCode>,
}

/// Electricity contract details of one entrance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityDetail {
    /// Entrance label.
    pub entrance: String,
    /// Supplier contract number.
    #[serde(default)]
    pub contract_number: String,
    /// Meter number.
    #[serde(default)]
    pub meter_number: String,
}

/// Access code of one entrance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceCode {
    /// Entrance label.
    pub entrance: String,
    /// Door code.
    #[serde(default)]
    pub code: String,
}

/// Whether the occupant owns or rents the apartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipStatus {
    /// Occupant is the owner.
    Owner,
    /// Occupant rents from an owner.
    Renter,
}

/// How a tenant settles monthly dues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash collected by the committee.
    Cash,
    /// Standing credit card charge.
    Credit,
}

/// An apartment occupant owing monthly dues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Tenant ID.
    #[serde(default)]
    pub id: TenantId,
    /// Apartment label.
    pub apartment: String,
    /// Floor number.
    #[serde(default)]
    pub floor: i32,
    /// Occupant name.
    pub name: String,
    /// Owner or renter.
    pub ownership_status: OwnershipStatus,
    /// Owner name when the occupant rents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// Owner phone when the occupant rents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_phone: Option<String>,
    /// Entrance label.
    pub entrance: String,
    /// Primary phone.
    #[serde(default)]
    pub primary_phone: String,
    /// Secondary phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
    /// Monthly due amount.
    pub monthly_amount: Decimal,
    /// Cash or credit.
    pub payment_method: PaymentMethod,
    /// Day of month the card is charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_day: Option<u8>,
    /// Negotiated amount overriding `monthly_amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<Decimal>,
    /// Derived: some due month of the current year up to today is unpaid.
    #[serde(default)]
    pub is_debtor: bool,
}

/// Monthly due status of one tenant. At most one per (tenant, month, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Tenant ID.
    pub tenant_id: TenantId,
    /// Month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Whether the due was settled.
    pub paid: bool,
    /// Settlement date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Direction of a petty-cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// A petty-cash movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PettyCashTransaction {
    /// Transaction ID. Auto transfers use `pc-auto-{tenantId}-{year}-{month}`.
    #[serde(default)]
    pub id: PettyCashId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount.
    pub amount: Decimal,
    /// Entrance label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    /// Created by the engine as a payment side effect.
    #[serde(default)]
    pub is_auto_generated: bool,
}

/// Fixed expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Cleaning services.
    Cleaning,
    /// Gardening.
    Gardening,
    /// Repairs and maintenance.
    Repairs,
    /// Electricity bills.
    Electricity,
    /// Water bills.
    Water,
    /// Building insurance.
    Insurance,
    /// Security.
    Security,
    /// Elevator maintenance.
    Elevator,
    /// Consumables drawn from inventory.
    Inventory,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Returns the category label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Gardening => "gardening",
            Self::Repairs => "repairs",
            Self::Electricity => "electricity",
            Self::Water => "water",
            Self::Insurance => "insurance",
            Self::Security => "security",
            Self::Elevator => "elevator",
            Self::Inventory => "inventory",
            Self::Other => "other",
        }
    }
}

/// Origin of an auto-generated expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Electricity meter reading.
    Electricity,
    /// Resolved maintenance issue.
    Issue,
    /// Product usage.
    Inventory,
}

/// A building expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    #[serde(default)]
    pub id: ExpenseId,
    /// Expense date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Category.
    pub category: ExpenseCategory,
    /// Amount.
    pub amount: Decimal,
    /// Entrance label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Created by the engine.
    #[serde(default)]
    pub is_auto_generated: bool,
    /// Kind of originating record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    /// ID of the originating record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Expense {
    /// Returns true if this expense was generated from the given origin.
    #[must_use]
    pub fn is_linked_to(&self, source_type: SourceType, source_id: &str) -> bool {
        self.source_type == Some(source_type) && self.source_id.as_deref() == Some(source_id)
    }
}

/// Maintenance issue status. Every transition is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    /// Reported, not yet handled.
    Open,
    /// Being handled.
    InProgress,
    /// Fixed.
    Resolved,
}

/// A maintenance issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Issue ID.
    #[serde(default)]
    pub id: IssueId,
    /// Report date.
    pub date: NaiveDate,
    /// Who reported it.
    pub reporter_name: String,
    /// What is broken.
    pub description: String,
    /// Entrance label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    /// Repair cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_cost: Option<Decimal>,
    /// Current status.
    pub status: IssueStatus,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Issue {
    /// Repair cost when set and positive.
    #[must_use]
    pub fn chargeable_cost(&self) -> Option<Decimal> {
        self.repair_cost.filter(|cost| *cost > Decimal::ZERO)
    }
}

/// An electricity meter reading of one entrance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityReading {
    /// Reading ID.
    #[serde(default)]
    pub id: ReadingId,
    /// Owning building.
    pub building_id: BuildingId,
    /// Entrance label.
    pub entrance: String,
    /// Reading date.
    pub reading_date: NaiveDate,
    /// Meter value.
    pub meter_reading: Decimal,
    /// Bill for the period ending at this reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_cost: Option<Decimal>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ElectricityReading {
    /// Period cost when set and positive.
    #[must_use]
    pub fn chargeable_cost(&self) -> Option<Decimal> {
        self.electricity_cost.filter(|cost| *cost > Decimal::ZERO)
    }
}

/// A day an employee did not work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// Absence ID.
    #[serde(default)]
    pub id: AbsenceId,
    /// Day of absence.
    pub date: NaiveDate,
    /// Reason.
    #[serde(default)]
    pub reason: String,
}

/// A building employee. Global across buildings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee ID.
    #[serde(default)]
    pub id: EmployeeId,
    /// Name.
    pub name: String,
    /// Phone.
    #[serde(default)]
    pub phone: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Working days per month used to derive the daily wage.
    #[serde(default = "default_work_days_per_month")]
    pub work_days_per_month: Decimal,
    /// Recorded absences.
    #[serde(default)]
    pub absences: Vec<Absence>,
}

/// Default working days per month.
#[must_use]
pub fn default_work_days_per_month() -> Decimal {
    Decimal::new(2167, 2)
}

/// An inventory product. Global across buildings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    #[serde(default)]
    pub id: ProductId,
    /// Name.
    pub name: String,
    /// Units in stock. Projection of the history rows.
    pub quantity: i64,
    /// Price per unit.
    pub price_per_unit: Decimal,
}

/// Units of a product consumed at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUsage {
    /// Usage ID.
    pub id: UsageId,
    /// Product used.
    pub product_id: ProductId,
    /// Units used.
    pub quantity: i64,
    /// Where it was used, e.g. "Entrance A - lobby".
    pub location: String,
    /// Usage date.
    pub date: NaiveDate,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Units times unit price at time of use.
    pub cost: Decimal,
}

/// Kind of product history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Product created with an initial stock.
    Create,
    /// Stock added.
    Add,
    /// Stock consumed.
    Use,
}

/// One row of the product audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHistory {
    /// Row ID.
    #[serde(default)]
    pub id: HistoryId,
    /// Product.
    pub product_id: ProductId,
    /// Row date.
    pub date: NaiveDate,
    /// Create, add, or use.
    pub action: HistoryAction,
    /// Signed units: positive for create/add, negative for use.
    pub quantity: i64,
    /// Cost of the movement.
    pub cost: Decimal,
    /// Location of a usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
