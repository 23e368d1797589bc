//! Payroll summary types.

use condo_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::Serialize;

/// Salary breakdown of one employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLine {
    /// Employee ID.
    pub employee_id: EmployeeId,
    /// Employee name.
    pub name: String,
    /// Base monthly salary.
    pub base_salary: Decimal,
    /// Absences in the month.
    pub absences: u32,
    /// Base salary divided by working days, 2 dp.
    pub daily_wage: Decimal,
    /// Amount deducted for absences, 2 dp.
    pub deduction: Decimal,
    /// Salary payable, 2 dp.
    pub net_salary: Decimal,
}

/// Payroll of all employees for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Employees already employed in the month.
    pub lines: Vec<PayrollLine>,
    /// Sum of net salaries.
    pub total: Decimal,
}
