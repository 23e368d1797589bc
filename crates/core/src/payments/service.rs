//! Payment reconciliation.
//!
//! Every payment mutation keeps two derived records in step:
//! - the auto-generated petty-cash credit of a paid month
//! - the tenant's `is_debtor` flag

use chrono::{Datelike, NaiveDate};
use condo_shared::types::TenantId;
use tracing::{debug, info, warn};

use super::types::PaymentKey;
use crate::state::{AppState, Payment, PettyCashTransaction, TransactionKind};

/// Payment reconciliation service.
///
/// All functions act on the current building and take `today` explicitly.
pub struct PaymentService;

impl PaymentService {
    /// Inserts or replaces a payment and reconciles its derived records.
    ///
    /// - New record, paid: credit petty cash.
    /// - Existing record, unpaid to paid: stamp the settlement date if absent, credit petty cash.
    /// - Existing record, paid to unpaid: remove the credit.
    /// - Unchanged `paid`: replace only.
    ///
    /// The tenant's debtor flag is recomputed afterwards. An unknown tenant
    /// still gets the payment row; only the petty-cash credit is skipped.
    #[must_use]
    pub fn upsert_payment(state: &AppState, payment: Payment, today: NaiveDate) -> AppState {
        let mut next = state.clone();
        let tenant_id = payment.tenant_id.clone();
        Self::apply_payment(&mut next, payment, today);
        Self::refresh_debtor(&mut next, &tenant_id, today);
        next
    }

    /// Removes a payment and its petty-cash credit, then recomputes the debtor flag.
    #[must_use]
    pub fn delete_payment(state: &AppState, key: &PaymentKey, today: NaiveDate) -> AppState {
        let mut next = state.clone();
        let building = next.current_building_id.clone();
        if let Some(payments) = next.payments.get_mut(&building) {
            payments.retain(|p| !key.matches(p));
        }
        Self::remove_transfer(&mut next, key);
        Self::refresh_debtor(&mut next, &key.tenant_id, today);
        info!(tenant_id = %key.tenant_id, year = key.year, month = key.month, "Payment deleted");
        next
    }

    /// Marks every missing or unpaid month from January through the current
    /// month as paid today, for every tenant of the current building.
    ///
    /// Equivalent to calling [`Self::upsert_payment`] once per (tenant, month).
    #[must_use]
    pub fn mark_all_paid_through_current_month(state: &AppState, today: NaiveDate) -> AppState {
        let mut next = state.clone();
        let tenant_ids: Vec<TenantId> = next.current_tenants().iter().map(|t| t.id.clone()).collect();
        let mut marked = 0usize;

        for tenant_id in &tenant_ids {
            for month in 1..=today.month() {
                let key = PaymentKey::new(tenant_id.clone(), today.year(), month);
                let already_paid = next
                    .current_payments()
                    .iter()
                    .any(|p| key.matches(p) && p.paid);
                if already_paid {
                    continue;
                }
                Self::apply_payment(
                    &mut next,
                    Payment {
                        tenant_id: tenant_id.clone(),
                        month,
                        year: today.year(),
                        paid: true,
                        date: Some(today),
                    },
                    today,
                );
                marked += 1;
            }
        }

        for tenant_id in &tenant_ids {
            Self::refresh_debtor(&mut next, tenant_id, today);
        }
        info!(tenants = tenant_ids.len(), marked, "Marked all months paid");
        next
    }

    /// Recomputes the debtor flag of every tenant of the current building.
    #[must_use]
    pub fn recompute_all_debtors(state: &AppState, today: NaiveDate) -> AppState {
        let mut next = state.clone();
        let tenant_ids: Vec<TenantId> = next.current_tenants().iter().map(|t| t.id.clone()).collect();
        for tenant_id in &tenant_ids {
            Self::refresh_debtor(&mut next, tenant_id, today);
        }
        next
    }

    /// Returns true if some month from January through `today`'s month of
    /// `today`'s year has no payment or an unpaid one.
    #[must_use]
    pub fn is_debtor(payments: &[Payment], tenant_id: &TenantId, today: NaiveDate) -> bool {
        (1..=today.month()).any(|month| {
            let key = PaymentKey::new(tenant_id.clone(), today.year(), month);
            !payments.iter().any(|p| key.matches(p) && p.paid)
        })
    }

    fn apply_payment(state: &mut AppState, mut payment: Payment, today: NaiveDate) {
        let key = PaymentKey::of(&payment);
        let building = state.current_building_id.clone();
        let payments = state.payments.entry(building).or_default();

        let previous = payments.iter().position(|p| key.matches(p));
        let was_paid = previous.is_some_and(|idx| payments[idx].paid);
        if payment.paid && !was_paid && payment.date.is_none() {
            payment.date = Some(today);
        }
        let settled_on = payment.date.unwrap_or(today);
        let paid = payment.paid;

        match previous {
            Some(idx) => payments[idx] = payment,
            None => payments.push(payment),
        }

        match (was_paid, paid) {
            (false, true) => Self::credit_transfer(state, &key, settled_on),
            (true, false) => Self::remove_transfer(state, &key),
            _ => {}
        }
    }

    fn credit_transfer(state: &mut AppState, key: &PaymentKey, date: NaiveDate) {
        let building = state.current_building_id.clone();
        let Some(tenant) = state.find_tenant(&key.tenant_id).cloned() else {
            warn!(tenant_id = %key.tenant_id, "Tenant not found, skipping petty-cash credit");
            return;
        };
        let transaction = PettyCashTransaction {
            id: key.auto_transfer_id(),
            date,
            description: format!(
                "Payment from tenant - {} (apt {})",
                tenant.name, tenant.apartment
            ),
            kind: TransactionKind::Income,
            amount: state.transfer_amount(&building),
            entrance: Some(tenant.entrance),
            is_auto_generated: true,
        };
        debug!(id = %transaction.id, "Crediting petty cash");
        let rows = state.petty_cash.entry(building).or_default();
        match rows.iter().position(|t| t.id == transaction.id) {
            Some(idx) => rows[idx] = transaction,
            None => rows.push(transaction),
        }
    }

    fn remove_transfer(state: &mut AppState, key: &PaymentKey) {
        let id = key.auto_transfer_id();
        let building = state.current_building_id.clone();
        if let Some(rows) = state.petty_cash.get_mut(&building) {
            rows.retain(|t| t.id != id);
        }
    }

    fn refresh_debtor(state: &mut AppState, tenant_id: &TenantId, today: NaiveDate) {
        let building = state.current_building_id.clone();
        let is_debtor = Self::is_debtor(state.current_payments(), tenant_id, today);
        if let Some(tenant) = state
            .tenants
            .get_mut(&building)
            .and_then(|tenants| tenants.iter_mut().find(|t| &t.id == tenant_id))
        {
            tenant.is_debtor = is_debtor;
        }
    }
}
