//! Command-line interface for the hotel aggregator.
//!
//! # Available Commands
//!
//! - `query` - Print one page of reconciled hotels as JSON
//! - `suppliers` - List the supplier registry and effective endpoints
//! - `refresh` - Run one fetch/reconcile round and report per-supplier counts
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Disable logging entirely
//! - `--config <PATH>` - Use a specific configuration file
//!
//! Logs go to stderr so stdout stays machine-readable.
//!
//! ```bash
//! hotelagg query --destination-id 5432 --page-size 5
//! hotelagg query --hotel-ids iJhz,f8c9 --pretty
//! hotelagg --verbose refresh
//! hotelagg --config ./local.toml suppliers
//! ```

mod query;
mod refresh;
mod suppliers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::cache::HotelCache;
use crate::config::{AppConfig, CONFIG_PATH_ENV};
use crate::core::HotelError;
use crate::fetcher::HttpSupplierClient;
use crate::service::HotelService;

/// Runtime configuration derived from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the tracing subscriber; `None` disables logging.
    ///
    /// An explicit `RUST_LOG` always takes precedence over this value.
    pub log_level: Option<String>,

    /// Explicit configuration file path.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the stderr tracing subscriber for this configuration.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("hotel_aggregator={level},hotelagg={level}"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    }

    /// Load the application configuration this CLI run should use.
    pub async fn load_app_config(&self) -> Result<AppConfig> {
        AppConfig::load_with_optional(self.config_path.clone()).await
    }
}

/// Aggregate, reconcile and query hotel data from multiple suppliers.
#[derive(Parser)]
#[command(name = "hotelagg", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `~/.hotelagg/config.toml`.
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Query reconciled hotels by destination or by id.
    Query(query::QueryCommand),

    /// List configured suppliers.
    Suppliers(suppliers::SuppliersCommand),

    /// Fetch every supplier once and report what was reconciled.
    Refresh(refresh::RefreshCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from its flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Query(cmd) => cmd.execute(&config).await,
            Commands::Suppliers(cmd) => cmd.execute(&config).await,
            Commands::Refresh(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Build the production service stack from application configuration.
pub(crate) fn build_service(
    app: &AppConfig,
) -> Result<HotelService<HttpSupplierClient>, HotelError> {
    let registry = app.registry()?;
    let client = HttpSupplierClient::with_timeout(app.request_timeout())?;
    let cache = HotelCache::with_ttl(client, registry, app.cache_ttl());
    Ok(HotelService::new(cache))
}

/// Serialize `value` as JSON, pretty-printed on request.
pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize output")
    } else {
        serde_json::to_string(value).context("Failed to serialize output")
    }
}
