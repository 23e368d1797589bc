//! Snapshot persistence using Apache OpenDAL.
//!
//! The document is written to a primary store (local filesystem by default)
//! and optionally copied to a mirror:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Another local directory
//!
//! Writes are debounced by [`Autosaver`]. Nothing here is called by the
//! reconciliation engine itself.

mod autosave;
mod config;
mod error;
mod service;

pub use autosave::{AutosaveHandle, Autosaver};
pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::SnapshotStore;
