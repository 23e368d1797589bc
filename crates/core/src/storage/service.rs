//! Snapshot store backed by Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};
use tracing::{info, warn};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use crate::snapshot::SnapshotService;
use crate::state::AppState;

/// Reads and writes the persisted document.
///
/// The primary operator is authoritative. Writes are copied to the mirror
/// when one is configured; a failed mirror write is logged and dropped.
pub struct SnapshotStore {
    primary: Operator,
    mirror: Option<Operator>,
    key: String,
    provider: &'static str,
}

impl SnapshotStore {
    /// Create a store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage provider cannot be initialized.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let primary = Self::create_operator(&config.primary)?;
        let mirror = config
            .mirror
            .as_ref()
            .map(Self::create_operator)
            .transpose()?;

        Ok(Self {
            primary,
            mirror,
            key: config.snapshot_key.clone(),
            provider: config.primary.name(),
        })
    }

    /// Wraps an existing operator as the primary store.
    #[must_use]
    pub fn from_operator(primary: Operator, key: impl Into<String>) -> Self {
        Self {
            primary,
            mirror: None,
            key: key.into(),
            provider: "custom",
        }
    }

    /// Adds a mirror operator.
    #[must_use]
    pub fn with_mirror(mut self, mirror: Operator) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// In-memory store, used by tests and the seeder's dry run.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory service cannot be initialized.
    pub fn in_memory(key: impl Into<String>) -> Result<Self, StorageError> {
        Self::from_config(&StorageConfig::new(StorageProvider::Memory, key))
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish()
                .pipe(Ok),
        }
    }

    /// Raw stored document, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary store cannot be read.
    pub async fn load_raw(&self) -> Result<Option<String>, StorageError> {
        match self.primary.read(&self.key).await {
            Ok(buffer) => Ok(Some(String::from_utf8_lossy(&buffer.to_vec()).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the document. A missing or corrupt snapshot yields the default
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error only if the primary store cannot be read.
    pub async fn load(&self) -> Result<AppState, StorageError> {
        match self.load_raw().await? {
            Some(raw) => Ok(SnapshotService::load_or_default(&raw)),
            None => {
                info!(key = %self.key, "No stored snapshot, starting from default");
                Ok(AppState::default())
            }
        }
    }

    /// Serializes and saves the document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the primary write fails.
    pub async fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let raw = SnapshotService::export_json(state)?;
        self.save_raw(&raw).await
    }

    /// Saves an already serialized document.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary write fails. Mirror failures are
    /// logged only.
    pub async fn save_raw(&self, raw: &str) -> Result<(), StorageError> {
        self.primary
            .write(&self.key, raw.as_bytes().to_vec())
            .await
            .map_err(StorageError::from)?;

        if let Some(mirror) = &self.mirror
            && let Err(e) = mirror.write(&self.key, raw.as_bytes().to_vec()).await
        {
            warn!(key = %self.key, error = %e, "Mirror write failed");
        }

        info!(key = %self.key, bytes = raw.len(), "Snapshot saved");
        Ok(())
    }

    /// Check if a snapshot exists in the primary store.
    pub async fn exists(&self) -> bool {
        match self.primary.stat(&self.key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the primary provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Object key of the snapshot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
