//! List the supplier registry.
//!
//! Shows each supplier in fetch order with its effective endpoint, after
//! `[suppliers]` overrides from the configuration are applied. Nothing is
//! fetched.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{CliConfig, to_json};
use crate::supplier::SupplierRegistry;

#[derive(Serialize)]
struct SupplierRow<'a> {
    name: &'a str,
    url: &'a str,
    fields: Vec<&'a str>,
}

/// Command to list configured suppliers.
#[derive(Args)]
pub struct SuppliersCommand {
    /// Print the registry as JSON
    #[arg(long)]
    json: bool,
}

impl SuppliersCommand {
    /// Execute the suppliers command.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let app = config.load_app_config().await?;
        let registry = app.registry()?;

        if self.json {
            println!("{}", to_json(&rows(&registry), true)?);
            return Ok(());
        }

        for supplier in registry.suppliers() {
            println!("{:<12} {}", supplier.name.bold(), supplier.url);
        }
        println!("\n{} suppliers", registry.len());
        Ok(())
    }
}

fn rows(registry: &SupplierRegistry) -> Vec<SupplierRow<'_>> {
    registry
        .suppliers()
        .iter()
        .map(|supplier| SupplierRow {
            name: &supplier.name,
            url: &supplier.url,
            fields: supplier.mapping.field_names().collect(),
        })
        .collect()
}
