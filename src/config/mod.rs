//! Configuration management for the hotel aggregator
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! cache_ttl_secs = 300          # how long a reconciled dataset is served
//! request_timeout_secs = 30     # per supplier request
//! default_page_size = 10        # used when a query omits --page-size
//!
//! [suppliers]                   # endpoint overrides by supplier name
//! acme = "http://localhost:8080/acme"
//! ```
//!
//! # Location
//!
//! Resolution order:
//! 1. An explicit path (the CLI's `--config`)
//! 2. The `HOTELAGG_CONFIG_PATH` environment variable
//! 3. `~/.hotelagg/config.toml`
//!
//! A missing file yields [`AppConfig::default`]; a malformed one is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::constants::{
    CACHE_TTL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE, SUPPLIER_REQUEST_TIMEOUT,
};
use crate::core::HotelError;
use crate::supplier::SupplierRegistry;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "HOTELAGG_CONFIG_PATH";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Seconds a reconciled dataset is served before it is refreshed.
    pub cache_ttl_secs: u64,

    /// Seconds to wait for each supplier response.
    pub request_timeout_secs: u64,

    /// Page size applied when a query does not specify one.
    ///
    /// Clamped to `[1, 100]` when used.
    pub default_page_size: u32,

    /// Supplier endpoint overrides, keyed by registry name.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub suppliers: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: CACHE_TTL.as_secs(),
            request_timeout_secs: SUPPLIER_REQUEST_TIMEOUT.as_secs(),
            default_page_size: DEFAULT_PAGE_SIZE,
            suppliers: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    debug!(target: "config", "No home directory, using default configuration");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!(target: "config", "No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains unknown keys.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Default configuration path: `$HOTELAGG_CONFIG_PATH` or `~/.hotelagg/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".hotelagg").join("config.toml"))
    }

    /// Cache time-to-live.
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Per-request supplier timeout.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Default page size, clamped to the supported range.
    pub fn page_size(&self) -> u32 {
        self.default_page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// The built-in registry with this configuration's URL overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::ConfigError`] if an override names an unknown supplier.
    pub fn registry(&self) -> Result<SupplierRegistry, HotelError> {
        SupplierRegistry::builtin().with_url_overrides(&self.suppliers)
    }
}
