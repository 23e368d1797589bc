//! Storage configuration types.

use condo_shared::{MirrorConfig, StorageSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Storage account name.
        account: String,
        /// Storage access key.
        access_key: String,
        /// Container name.
        container: String,
    },
    /// Local filesystem
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory, lost on exit
    Memory,
}

impl StorageProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Builds a provider from the `[storage.mirror]` section.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` for an unknown provider name or
    /// a missing required field.
    pub fn from_mirror(mirror: &MirrorConfig) -> Result<Self, StorageError> {
        let require = |value: &str, field: &str| {
            if value.trim().is_empty() {
                Err(StorageError::configuration(format!(
                    "mirror `{}` requires `{field}`",
                    mirror.provider
                )))
            } else {
                Ok(value.to_string())
            }
        };

        match mirror.provider.as_str() {
            "s3" => Ok(Self::S3 {
                endpoint: require(&mirror.endpoint, "endpoint")?,
                bucket: require(&mirror.bucket, "bucket")?,
                access_key_id: require(&mirror.access_key_id, "access_key_id")?,
                secret_access_key: require(&mirror.secret_access_key, "secret_access_key")?,
                region: mirror.region.clone(),
            }),
            "azure_blob" => Ok(Self::AzureBlob {
                account: require(&mirror.access_key_id, "access_key_id")?,
                access_key: require(&mirror.secret_access_key, "secret_access_key")?,
                container: require(&mirror.bucket, "bucket")?,
            }),
            "local_fs" => Ok(Self::local_fs(require(&mirror.root, "root")?)),
            "memory" => Ok(Self::Memory),
            other => Err(StorageError::configuration(format!(
                "unknown storage provider `{other}`"
            ))),
        }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Snapshot store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Where the authoritative copy lives.
    pub primary: StorageProvider,
    /// Optional best-effort mirror.
    pub mirror: Option<StorageProvider>,
    /// Object key of the snapshot document.
    pub snapshot_key: String,
}

impl StorageConfig {
    /// Create a config with no mirror.
    #[must_use]
    pub fn new(primary: StorageProvider, snapshot_key: impl Into<String>) -> Self {
        Self {
            primary,
            mirror: None,
            snapshot_key: snapshot_key.into(),
        }
    }

    /// Set the mirror.
    #[must_use]
    pub fn with_mirror(mut self, mirror: StorageProvider) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Builds the store config from application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the mirror section is invalid.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let config = Self::new(
            StorageProvider::local_fs(&settings.data_dir),
            settings.snapshot_key.clone(),
        );
        match &settings.mirror {
            Some(mirror) => Ok(config.with_mirror(StorageProvider::from_mirror(mirror)?)),
            None => Ok(config),
        }
    }
}
