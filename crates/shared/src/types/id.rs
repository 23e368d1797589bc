//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TenantId` where a `ProductId` is expected.
//! IDs are opaque strings so that snapshots written by other clients (and the
//! deterministic `pc-auto-*` petty-cash ids) round-trip unchanged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Prefix used for freshly generated ids.
            pub const PREFIX: &'static str = $prefix;

            /// Creates a new ID using UUID v7 (time-ordered), e.g. `expense-018f...`.
            #[must_use]
            pub fn new() -> Self {
                Self(format!("{}-{}", Self::PREFIX, Uuid::now_v7()))
            }

            /// Wraps an existing id string.
            #[must_use]
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(IdParseError);
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }
    };
}

/// Error returned when parsing an empty id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("id must not be empty")]
pub struct IdParseError;

typed_id!(BuildingId, "building", "Unique identifier for a building.");
typed_id!(TenantId, "tenant", "Unique identifier for a tenant.");
typed_id!(ExpenseId, "expense", "Unique identifier for an expense.");
typed_id!(
    PettyCashId,
    "pc",
    "Unique identifier for a petty-cash transaction."
);
typed_id!(IssueId, "issue", "Unique identifier for a maintenance issue.");
typed_id!(
    ReadingId,
    "reading",
    "Unique identifier for an electricity meter reading."
);
typed_id!(EmployeeId, "employee", "Unique identifier for an employee.");
typed_id!(AbsenceId, "absence", "Unique identifier for an employee absence.");
typed_id!(ProductId, "product", "Unique identifier for an inventory product.");
typed_id!(UsageId, "usage", "Unique identifier for a product usage.");
typed_id!(
    HistoryId,
    "history",
    "Unique identifier for a product history row."
);
