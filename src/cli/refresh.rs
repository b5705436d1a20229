//! Run one fetch and reconcile round and report what it produced.
//!
//! Useful for checking supplier connectivity and mapping coverage. The round
//! is all-or-nothing like any cache refresh: one failing supplier fails the
//! whole command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use super::{CliConfig, to_json};
use crate::fetcher::{HttpSupplierClient, SupplierBatch, fetch_batches};
use crate::reconciler::reconcile;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct SupplierCount {
    supplier: String,
    raw: usize,
    mapped: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct RefreshReport {
    suppliers: Vec<SupplierCount>,
    fetched: usize,
    reconciled: usize,
}

impl RefreshReport {
    fn from_batches(batches: Vec<SupplierBatch>) -> Self {
        let suppliers = batches
            .iter()
            .map(|batch| SupplierCount {
                supplier: batch.supplier.clone(),
                raw: batch.raw_count,
                mapped: batch.hotels.len(),
            })
            .collect();

        let hotels: Vec<_> = batches.into_iter().flat_map(|batch| batch.hotels).collect();
        let fetched = hotels.len();
        let reconciled = reconcile(hotels).len();

        Self {
            suppliers,
            fetched,
            reconciled,
        }
    }
}

/// Command to run a single refresh round.
#[derive(Args)]
pub struct RefreshCommand {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl RefreshCommand {
    /// Execute the refresh command.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let app = config.load_app_config().await?;
        let registry = app.registry()?;
        let client = HttpSupplierClient::with_timeout(app.request_timeout())?;

        let started = Instant::now();
        let batches = fetch_batches(&client, &registry).await?;
        let report = RefreshReport::from_batches(batches);
        info!(
            target: "cli",
            "Refreshed {} suppliers in {:.2}s",
            report.suppliers.len(),
            started.elapsed().as_secs_f64()
        );

        if self.json {
            println!("{}", to_json(&report, true)?);
            return Ok(());
        }

        for count in &report.suppliers {
            println!(
                "{:<12} {} records ({} mapped)",
                count.supplier.bold(),
                count.raw,
                count.mapped
            );
        }
        println!(
            "\n{} {} records reconciled into {} hotels",
            "✓".green(),
            report.fetched,
            report.reconciled
        );
        Ok(())
    }
}
