//! Whole-document backup and restore.

pub mod error;
pub mod service;

pub use error::SnapshotError;
pub use service::{REQUIRED_KEYS, SnapshotService};
