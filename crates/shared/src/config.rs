//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Snapshot storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the primary snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Object key of the snapshot document.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
    /// Debounce window for coalescing writes, in milliseconds.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
    /// Optional remote mirror.
    #[serde(default)]
    pub mirror: Option<MirrorConfig>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            snapshot_key: default_snapshot_key(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            mirror: None,
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_snapshot_key() -> String {
    "building-management-data.json".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    1000
}

/// Remote mirror configuration.
///
/// Only the fields relevant to the chosen `provider` are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MirrorConfig {
    /// One of `s3`, `azure_blob`, `local_fs`.
    pub provider: String,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: String,
    /// S3 bucket or Azure container.
    #[serde(default)]
    pub bucket: String,
    /// S3 access key id or Azure account name.
    #[serde(default)]
    pub access_key_id: String,
    /// S3 secret or Azure account key.
    #[serde(default)]
    pub secret_access_key: String,
    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Root directory for a `local_fs` mirror.
    #[serde(default)]
    pub root: String,
}

fn default_region() -> String {
    "auto".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CONDO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
