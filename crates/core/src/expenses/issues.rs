//! Maintenance issues and their repair expenses.

use chrono::NaiveDate;
use condo_shared::types::{ExpenseId, IssueId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::state::{AppState, Expense, ExpenseCategory, Issue, IssueStatus, SourceType};

/// Status edge of an issue update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEdge {
    /// Moved into `resolved` from anything else (or newly created resolved).
    Resolved,
    /// Moved out of `resolved`.
    Reopened,
    /// Any other transition, including resolved to resolved.
    Unchanged,
}

impl StatusEdge {
    /// Classifies a transition. A missing previous record counts as not resolved.
    #[must_use]
    pub fn between(previous: Option<IssueStatus>, current: IssueStatus) -> Self {
        let was_resolved = previous == Some(IssueStatus::Resolved);
        let is_resolved = current == IssueStatus::Resolved;
        match (was_resolved, is_resolved) {
            (false, true) => Self::Resolved,
            (true, false) => Self::Reopened,
            _ => Self::Unchanged,
        }
    }
}

/// Keeps a repair expense paired with each resolved, costed issue.
pub struct IssueService;

impl IssueService {
    /// Inserts or replaces an issue of the current building.
    ///
    /// Only the status edge matters: resolving with a cost creates a repair
    /// expense dated `today`, reopening removes it. Editing the cost of an
    /// issue that stays resolved leaves the expense as it is.
    #[must_use]
    pub fn upsert_issue(state: &AppState, issue: Issue, today: NaiveDate) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();

        let issues = next.issues.entry(building.clone()).or_default();
        let previous = issues.iter().position(|i| i.id == issue.id);
        let edge = StatusEdge::between(previous.map(|idx| issues[idx].status), issue.status);
        match previous {
            Some(idx) => issues[idx] = issue.clone(),
            None => issues.push(issue.clone()),
        }

        let expenses = next.expenses.entry(building).or_default();
        match edge {
            StatusEdge::Resolved => {
                if let Some(cost) = issue.chargeable_cost() {
                    expenses.retain(|e| !is_auto_repair(e, &issue.id));
                    expenses.push(Self::repair_expense(&issue, cost, today));
                    debug!(issue_id = %issue.id, %cost, "Repair expense created");
                }
            }
            StatusEdge::Reopened => {
                expenses.retain(|e| !is_auto_repair(e, &issue.id));
                debug!(issue_id = %issue.id, "Repair expense removed on reopen");
            }
            StatusEdge::Unchanged => {}
        }
        next
    }

    /// Removes an issue; a resolved, costed one takes its repair expense along.
    #[must_use]
    pub fn delete_issue(state: &AppState, issue_id: &IssueId) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();

        let Some(issues) = next.issues.get_mut(&building) else {
            return next;
        };
        let Some(idx) = issues.iter().position(|i| &i.id == issue_id) else {
            warn!(issue_id = %issue_id, "Issue not found");
            return next;
        };
        let removed = issues.remove(idx);

        if removed.status == IssueStatus::Resolved && removed.chargeable_cost().is_some() {
            if let Some(expenses) = next.expenses.get_mut(&building) {
                expenses.retain(|e| !is_auto_repair(e, issue_id));
            }
        }
        next
    }

    fn repair_expense(issue: &Issue, cost: Decimal, today: NaiveDate) -> Expense {
        Expense {
            id: ExpenseId::new(),
            date: today,
            description: format!("Issue repair: {}", issue.description),
            category: ExpenseCategory::Repairs,
            amount: cost,
            entrance: issue.entrance.clone(),
            notes: Some(format!("Auto-generated from issue {}", issue.id)),
            is_auto_generated: true,
            source_type: Some(SourceType::Issue),
            source_id: Some(issue.id.as_str().to_string()),
        }
    }
}

fn is_auto_repair(expense: &Expense, issue_id: &IssueId) -> bool {
    expense.is_auto_generated && expense.is_linked_to(SourceType::Issue, issue_id.as_str())
}
