//! Payment natural key.

use condo_shared::types::{PettyCashId, TenantId};
use serde::{Deserialize, Serialize};

use crate::state::Payment;

/// Natural key of a payment: one record per tenant, year, and month.
///
/// The same key derives the id of the auto-generated petty-cash credit, so a
/// paid month can own at most one such credit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentKey {
    /// Tenant.
    pub tenant_id: TenantId,
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl PaymentKey {
    /// Creates a key.
    #[must_use]
    pub fn new(tenant_id: TenantId, year: i32, month: u32) -> Self {
        Self {
            tenant_id,
            year,
            month,
        }
    }

    /// Key of an existing payment.
    #[must_use]
    pub fn of(payment: &Payment) -> Self {
        Self::new(payment.tenant_id.clone(), payment.year, payment.month)
    }

    /// Returns true if the payment has this key.
    #[must_use]
    pub fn matches(&self, payment: &Payment) -> bool {
        payment.tenant_id == self.tenant_id
            && payment.year == self.year
            && payment.month == self.month
    }

    /// Deterministic id of the auto petty-cash credit for this month.
    #[must_use]
    pub fn auto_transfer_id(&self) -> PettyCashId {
        PettyCashId::from_raw(format!(
            "pc-auto-{}-{}-{}",
            self.tenant_id, self.year, self.month
        ))
    }
}
