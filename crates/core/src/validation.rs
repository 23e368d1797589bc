//! Request validation applied by the host before an engine entry point runs.
//!
//! The engine assumes its input passed these checks.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::inventory::{NewUsage, StockAddition};
use crate::state::{
    Building, ElectricityReading, Employee, Expense, Issue, Payment, PettyCashTransaction,
    Product, ProductHistory, Tenant,
};

/// Largest accepted unit count for stock, usages and history rows.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Largest accepted money amount, one trillion. `MAX_QUANTITY` units at
/// this price still fit a `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Rejected request payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty.
    #[error("Field `{0}` is required")]
    Required(&'static str),

    /// An amount is below zero.
    #[error("Field `{field}` must not be negative (got {value})")]
    NegativeAmount {
        /// Offending field.
        field: &'static str,
        /// Value received.
        value: Decimal,
    },

    /// A quantity is zero or below.
    #[error("Field `{field}` must be positive (got {value})")]
    NonPositiveQuantity {
        /// Offending field.
        field: &'static str,
        /// Value received.
        value: i64,
    },

    /// A quantity above `MAX_QUANTITY`.
    #[error("Field `{field}` must not exceed {max} (got {value})")]
    QuantityTooLarge {
        /// Offending field.
        field: &'static str,
        /// Value received.
        value: i64,
        /// Upper bound.
        max: i64,
    },

    /// An amount above `MAX_AMOUNT`.
    #[error("Field `{field}` must not exceed {max} (got {value})")]
    AmountTooLarge {
        /// Offending field.
        field: &'static str,
        /// Value received.
        value: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// Month outside 1..=12.
    #[error("Month must be between 1 and 12 (got {0})")]
    InvalidMonth(u32),

    /// Credit day outside 1..=31.
    #[error("Credit day must be between 1 and 31 (got {0})")]
    InvalidCreditDay(u8),
}

impl ValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Required(_) => "FIELD_REQUIRED",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::NonPositiveQuantity { .. } => "NON_POSITIVE_QUANTITY",
            Self::QuantityTooLarge { .. } => "QUANTITY_TOO_LARGE",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::InvalidCreditDay(_) => "INVALID_CREDIT_DAY",
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field,
            value,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

fn at_most_max(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value > MAX_QUANTITY {
        return Err(ValidationError::QuantityTooLarge {
            field,
            value,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveQuantity { field, value });
    }
    at_most_max(field, value)
}

/// Validates a month number.
///
/// # Errors
///
/// Returns `InvalidMonth` outside 1..=12.
pub fn validate_month(month: u32) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month));
    }
    Ok(())
}

/// Validates a building.
///
/// # Errors
///
/// Returns an error if the name or entrance list is empty.
pub fn validate_building(building: &Building) -> Result<(), ValidationError> {
    required("name", &building.name)?;
    if building.entrances.iter().all(|e| e.trim().is_empty()) {
        return Err(ValidationError::Required("entrances"));
    }
    Ok(())
}

/// Validates a tenant.
///
/// # Errors
///
/// Returns an error for missing identity fields, negative dues or an
/// out-of-range credit day.
pub fn validate_tenant(tenant: &Tenant) -> Result<(), ValidationError> {
    required("name", &tenant.name)?;
    required("apartment", &tenant.apartment)?;
    required("entrance", &tenant.entrance)?;
    non_negative("monthlyAmount", tenant.monthly_amount)?;
    if let Some(amount) = tenant.custom_amount {
        non_negative("customAmount", amount)?;
    }
    if let Some(day) = tenant.credit_day
        && !(1..=31).contains(&day)
    {
        return Err(ValidationError::InvalidCreditDay(day));
    }
    Ok(())
}

/// Validates a payment upsert.
///
/// # Errors
///
/// Returns an error if the month is out of range or the tenant id is empty.
pub fn validate_payment(payment: &Payment) -> Result<(), ValidationError> {
    required("tenantId", payment.tenant_id.as_str())?;
    validate_month(payment.month)
}

/// Validates an expense.
///
/// # Errors
///
/// Returns an error for an empty description or a negative amount.
pub fn validate_expense(expense: &Expense) -> Result<(), ValidationError> {
    required("description", &expense.description)?;
    non_negative("amount", expense.amount)
}

/// Validates a petty-cash transaction.
///
/// # Errors
///
/// Returns an error for an empty description or a negative amount.
pub fn validate_petty_cash(tx: &PettyCashTransaction) -> Result<(), ValidationError> {
    required("description", &tx.description)?;
    non_negative("amount", tx.amount)
}

/// Validates an electricity reading.
///
/// # Errors
///
/// Returns an error for a missing entrance or negative reading or cost.
pub fn validate_reading(reading: &ElectricityReading) -> Result<(), ValidationError> {
    required("buildingId", reading.building_id.as_str())?;
    required("entrance", &reading.entrance)?;
    non_negative("meterReading", reading.meter_reading)?;
    if let Some(cost) = reading.electricity_cost {
        non_negative("electricityCost", cost)?;
    }
    Ok(())
}

/// Validates an issue.
///
/// # Errors
///
/// Returns an error for a missing reporter or description, or a negative cost.
pub fn validate_issue(issue: &Issue) -> Result<(), ValidationError> {
    required("reporterName", &issue.reporter_name)?;
    required("description", &issue.description)?;
    if let Some(cost) = issue.repair_cost {
        non_negative("repairCost", cost)?;
    }
    Ok(())
}

/// Validates an employee.
///
/// # Errors
///
/// Returns an error for an empty name or negative salary or work days.
pub fn validate_employee(employee: &Employee) -> Result<(), ValidationError> {
    required("name", &employee.name)?;
    non_negative("baseSalary", employee.base_salary)?;
    non_negative("workDaysPerMonth", employee.work_days_per_month)
}

/// Validates a product.
///
/// # Errors
///
/// Returns an error for an empty name, or stock or price that is negative
/// or above its bound.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    required("name", &product.name)?;
    if product.quantity < 0 {
        return Err(ValidationError::NegativeAmount {
            field: "quantity",
            value: Decimal::from(product.quantity),
        });
    }
    at_most_max("quantity", product.quantity)?;
    non_negative("pricePerUnit", product.price_per_unit)
}

/// Validates a usage to record.
///
/// # Errors
///
/// Returns an error for a non-positive quantity or an empty location.
pub fn validate_usage(usage: &NewUsage) -> Result<(), ValidationError> {
    positive("quantity", usage.quantity)?;
    required("location", &usage.location)
}

/// Validates a stock addition.
///
/// # Errors
///
/// Returns an error for a non-positive quantity.
pub fn validate_stock(addition: &StockAddition) -> Result<(), ValidationError> {
    positive("quantity", addition.quantity)
}

/// Usage rows may carry a signed quantity; only its magnitude matters.
///
/// # Errors
///
/// Returns an error for a zero or out-of-bound quantity, or a negative cost.
pub fn validate_history_edit(row: &ProductHistory) -> Result<(), ValidationError> {
    let used = i64::try_from(row.quantity.unsigned_abs()).unwrap_or(i64::MAX);
    positive("quantity", used)?;
    non_negative("cost", row.cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IssueStatus;
    use crate::state::fixtures::{
        building, date, employee, expense, issue, product, reading, tenant,
    };
    use condo_shared::types::{ProductId, TenantId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(12, true)]
    #[case(13, false)]
    fn test_validate_month(#[case] month: u32, #[case] ok: bool) {
        assert_eq!(validate_month(month).is_ok(), ok);
    }

    #[test]
    fn test_zero_amount_is_valid() {
        assert!(validate_expense(&expense("e1", date(2025, 1, 1), Decimal::ZERO)).is_ok());
    }

    #[test]
    fn test_negative_expense_rejected() {
        let err = validate_expense(&expense("e1", date(2025, 1, 1), dec!(-0.01))).unwrap_err();
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut e = expense("e1", date(2025, 1, 1), dec!(10));
        e.description = "   ".to_string();
        assert_eq!(validate_expense(&e), Err(ValidationError::Required("description")));
    }

    #[test]
    fn test_tenant_credit_day_range() {
        let mut t = tenant("t1", "A");
        assert!(validate_tenant(&t).is_ok());
        t.credit_day = Some(32);
        assert_eq!(validate_tenant(&t), Err(ValidationError::InvalidCreditDay(32)));
    }

    #[test]
    fn test_payment_month_checked() {
        let payment = Payment {
            tenant_id: TenantId::from("t1"),
            month: 0,
            year: 2025,
            paid: true,
            date: None,
        };
        assert_eq!(validate_payment(&payment), Err(ValidationError::InvalidMonth(0)));
    }

    #[test]
    fn test_building_needs_an_entrance() {
        assert!(validate_building(&building("b1", &["A"])).is_ok());
        assert_eq!(
            validate_building(&building("b1", &[])),
            Err(ValidationError::Required("entrances"))
        );
    }

    #[test]
    fn test_reading_and_issue_costs() {
        assert!(validate_reading(&reading("r1", "b1", "A", Some(dec!(100)))).is_ok());
        assert!(validate_reading(&reading("r1", "b1", "A", Some(dec!(-1)))).is_err());
        assert!(validate_issue(&issue("i1", IssueStatus::Open, None)).is_ok());
        assert!(validate_issue(&issue("i1", IssueStatus::Open, Some(dec!(-5)))).is_err());
    }

    #[test]
    fn test_employee_and_product() {
        assert!(validate_employee(&employee("e1", dec!(6000), date(2025, 1, 1))).is_ok());
        assert!(validate_product(&product("p1", 0, dec!(3))).is_ok());
        assert!(validate_product(&product("p1", -1, dec!(3))).is_err());
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn test_usage_quantity_must_be_positive(#[case] quantity: i64) {
        let usage = NewUsage {
            product_id: ProductId::from("p1"),
            quantity,
            location: "Entrance A".to_string(),
            date: date(2025, 1, 1),
            notes: None,
        };
        assert_eq!(
            validate_usage(&usage).unwrap_err().error_code(),
            "NON_POSITIVE_QUANTITY"
        );
    }

    #[test]
    fn test_usage_above_bound_rejected() {
        let usage = NewUsage {
            product_id: ProductId::from("p1"),
            quantity: MAX_QUANTITY + 1,
            location: "Entrance A".to_string(),
            date: date(2025, 1, 1),
            notes: None,
        };
        assert_eq!(
            validate_usage(&usage).unwrap_err().error_code(),
            "QUANTITY_TOO_LARGE"
        );
    }

    #[rstest]
    #[case(dec!(100000000000000), "AMOUNT_TOO_LARGE")]
    #[case(dec!(3), "QUANTITY_TOO_LARGE")]
    fn test_product_bounds(#[case] price: Decimal, #[case] code: &str) {
        let quantity = if code == "QUANTITY_TOO_LARGE" { MAX_QUANTITY + 1 } else { 1 };
        let err = validate_product(&product("p1", quantity, price)).unwrap_err();
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_largest_product_is_valid() {
        assert!(validate_product(&product("p1", MAX_QUANTITY, MAX_AMOUNT)).is_ok());
    }

    #[rstest]
    #[case(i64::MIN)]
    #[case(-(MAX_QUANTITY + 1))]
    fn test_history_edit_extreme_quantity_rejected(#[case] quantity: i64) {
        let row = ProductHistory {
            id: condo_shared::types::HistoryId::from("h1"),
            product_id: ProductId::from("p1"),
            date: date(2025, 1, 1),
            action: crate::state::HistoryAction::Use,
            quantity,
            cost: Decimal::ZERO,
            location: None,
            notes: None,
        };
        assert_eq!(
            validate_history_edit(&row).unwrap_err().error_code(),
            "QUANTITY_TOO_LARGE"
        );
    }

    #[test]
    fn test_expense_above_bound_rejected() {
        let err = validate_expense(&expense("e1", date(2025, 1, 1), MAX_AMOUNT + dec!(1))).unwrap_err();
        assert_eq!(err.error_code(), "AMOUNT_TOO_LARGE");
    }

    #[test]
    fn test_stock_addition() {
        assert!(validate_stock(&StockAddition { quantity: 5, notes: None }).is_ok());
        assert!(validate_stock(&StockAddition { quantity: 0, notes: None }).is_err());
    }
}
