//! Salary computation and employee maintenance.

use chrono::Datelike;
use condo_shared::types::{AbsenceId, EmployeeId};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use super::types::{PayrollLine, PayrollSummary};
use crate::state::{Absence, AppState, Employee};

/// Payroll service.
pub struct PayrollService;

impl PayrollService {
    /// Salary for a month: base minus one daily wage per absence in that month.
    ///
    /// Returns `None` for months before the employee's start month. With a
    /// non-positive working-day count no deduction is made.
    #[must_use]
    pub fn salary_for_month(employee: &Employee, year: i32, month: u32) -> Option<Decimal> {
        Self::line(employee, year, month).map(|line| line.net_salary)
    }

    /// Payroll lines for every employee employed in the month.
    #[must_use]
    pub fn monthly_payroll(state: &AppState, year: i32, month: u32) -> PayrollSummary {
        let lines: Vec<PayrollLine> = state
            .employees
            .iter()
            .filter_map(|e| Self::line(e, year, month))
            .collect();
        let total = lines.iter().map(|l| l.net_salary).sum();
        PayrollSummary {
            year,
            month,
            lines,
            total,
        }
    }

    /// Number of absences in a month.
    #[must_use]
    pub fn absences_in_month(employee: &Employee, year: i32, month: u32) -> u32 {
        let count = employee
            .absences
            .iter()
            .filter(|a| a.date.year() == year && a.date.month() == month)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn line(employee: &Employee, year: i32, month: u32) -> Option<PayrollLine> {
        let start = (employee.start_date.year(), employee.start_date.month());
        if (year, month) < start {
            return None;
        }

        let absences = Self::absences_in_month(employee, year, month);
        let (daily_wage, deduction) = if employee.work_days_per_month > Decimal::ZERO {
            let daily = employee.base_salary / employee.work_days_per_month;
            (daily, daily * Decimal::from(absences))
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Some(PayrollLine {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            base_salary: employee.base_salary,
            absences,
            daily_wage: round_money(daily_wage),
            deduction: round_money(deduction),
            net_salary: round_money(employee.base_salary - deduction),
        })
    }

    /// Adds or replaces an employee.
    #[must_use]
    pub fn upsert_employee(state: &AppState, employee: Employee) -> AppState {
        let mut next = state.clone();
        match next.employees.iter().position(|e| e.id == employee.id) {
            Some(idx) => next.employees[idx] = employee,
            None => next.employees.push(employee),
        }
        next
    }

    /// Removes an employee.
    #[must_use]
    pub fn delete_employee(state: &AppState, employee_id: &EmployeeId) -> AppState {
        let mut next = state.clone();
        next.employees.retain(|e| &e.id != employee_id);
        next
    }

    /// Records an absence. Unknown employees are ignored.
    #[must_use]
    pub fn add_absence(state: &AppState, employee_id: &EmployeeId, absence: Absence) -> AppState {
        let mut next = state.clone();
        match next.employees.iter_mut().find(|e| &e.id == employee_id) {
            Some(employee) => employee.absences.push(absence),
            None => warn!(employee_id = %employee_id, "Employee not found, absence ignored"),
        }
        next
    }

    /// Removes an absence.
    #[must_use]
    pub fn remove_absence(
        state: &AppState,
        employee_id: &EmployeeId,
        absence_id: &AbsenceId,
    ) -> AppState {
        let mut next = state.clone();
        if let Some(employee) = next.employees.iter_mut().find(|e| &e.id == employee_id) {
            employee.absences.retain(|a| &a.id != absence_id);
        }
        next
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{date, employee};
    use rust_decimal_macros::dec;

    fn absence(id: &str, on: chrono::NaiveDate) -> Absence {
        Absence {
            id: AbsenceId::from(id),
            date: on,
            reason: "sick".to_string(),
        }
    }

    #[test]
    fn test_no_absences_pays_base() {
        let e = employee("e1", dec!(6000), date(2024, 1, 1));
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 3), Some(dec!(6000)));
    }

    #[test]
    fn test_absences_deducted_in_their_month_only() {
        let mut e = employee("e1", dec!(6500), date(2024, 1, 1));
        e.work_days_per_month = dec!(26);
        e.absences = vec![
            absence("a1", date(2025, 3, 4)),
            absence("a2", date(2025, 3, 5)),
            absence("a3", date(2025, 4, 1)),
        ];
        // 6500 / 26 = 250 per day
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 3), Some(dec!(6000)));
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 4), Some(dec!(6250)));
        assert_eq!(PayrollService::salary_for_month(&e, 2024, 3), Some(dec!(6500)));
    }

    #[test]
    fn test_default_work_days_rounding() {
        let mut e = employee("e1", dec!(5000), date(2024, 1, 1));
        e.absences = vec![absence("a1", date(2025, 1, 10))];
        // 5000 - 5000 / 21.67 = 4769.266...
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 1), Some(dec!(4769.27)));
    }

    #[test]
    fn test_before_start_month_is_none() {
        let e = employee("e1", dec!(5000), date(2025, 5, 20));
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 4), None);
        assert_eq!(PayrollService::salary_for_month(&e, 2024, 12), None);
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 5), Some(dec!(5000)));
    }

    #[test]
    fn test_zero_work_days_no_deduction() {
        let mut e = employee("e1", dec!(5000), date(2024, 1, 1));
        e.work_days_per_month = Decimal::ZERO;
        e.absences = vec![absence("a1", date(2025, 1, 10))];
        assert_eq!(PayrollService::salary_for_month(&e, 2025, 1), Some(dec!(5000)));
    }

    #[test]
    fn test_monthly_payroll_total() {
        let mut state = AppState::default();
        state = PayrollService::upsert_employee(&state, employee("e1", dec!(4000), date(2024, 1, 1)));
        state = PayrollService::upsert_employee(&state, employee("e2", dec!(3000), date(2025, 9, 1)));
        state = PayrollService::upsert_employee(&state, employee("e3", dec!(2000), date(2025, 1, 1)));

        let summary = PayrollService::monthly_payroll(&state, 2025, 6);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total, dec!(6000));
    }

    #[test]
    fn test_absence_crud() {
        let state = PayrollService::upsert_employee(
            &AppState::default(),
            employee("e1", dec!(4000), date(2024, 1, 1)),
        );
        let id = EmployeeId::from("e1");
        let state = PayrollService::add_absence(&state, &id, absence("a1", date(2025, 2, 2)));
        assert_eq!(state.employees[0].absences.len(), 1);
        assert_eq!(PayrollService::absences_in_month(&state.employees[0], 2025, 2), 1);

        let state = PayrollService::remove_absence(&state, &id, &AbsenceId::from("a1"));
        assert!(state.employees[0].absences.is_empty());

        let state = PayrollService::delete_employee(&state, &id);
        assert!(state.employees.is_empty());
    }

    #[test]
    fn test_absence_for_unknown_employee_ignored() {
        let state = AppState::default();
        let next = PayrollService::add_absence(
            &state,
            &EmployeeId::from("ghost"),
            absence("a1", date(2025, 2, 2)),
        );
        assert_eq!(next, state);
    }
}
