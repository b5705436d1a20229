//! Query reconciled hotels and print one page as JSON.
//!
//! # Examples
//!
//! ```bash
//! # First page of a destination
//! hotelagg query --destination-id 5432
//!
//! # Specific hotels, second page of five
//! hotelagg query --hotel-ids iJhz,SjyX,f8c9 --page 2 --page-size 5 --pretty
//! ```
//!
//! Successful queries print a `PaginatedHotels` document. Rejected requests
//! and supplier failures print an `ErrorResponse` document instead and the
//! process exits non-zero.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::config::AppConfig;
use crate::core::{ErrorResponse, HotelError};
use crate::models::PaginatedHotels;
use crate::query::QueryParams;

use super::{CliConfig, build_service, to_json};

/// Command to query reconciled hotels.
#[derive(Args)]
pub struct QueryCommand {
    /// Destination to return hotels for
    #[arg(long, value_name = "ID")]
    destination_id: Option<String>,

    /// Comma-separated hotel ids to return
    #[arg(long, value_name = "IDS")]
    hotel_ids: Option<String>,

    /// 1-indexed page number
    #[arg(long)]
    page: Option<String>,

    /// Hotels per page (1-100)
    #[arg(long)]
    page_size: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl QueryCommand {
    /// Execute the query command.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let app = config.load_app_config().await?;

        let mut params = self.params();
        if params.page_size.is_none() {
            params.page_size = Some(app.page_size().to_string());
        }

        match self.run(&app, &params).await {
            Ok(page) => {
                println!("{}", to_json(&page, self.pretty)?);
                Ok(())
            }
            Err(err) => {
                println!("{}", to_json(&ErrorResponse::from(&err), self.pretty)?);
                Err(err.into())
            }
        }
    }

    fn params(&self) -> QueryParams {
        QueryParams {
            destination_id: self.destination_id.clone(),
            hotel_ids: self.hotel_ids.clone(),
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }

    async fn run(&self, app: &AppConfig, params: &QueryParams) -> Result<PaginatedHotels, HotelError> {
        let request = params.validate()?;
        debug!(target: "cli", "Running query {:?}", request);
        build_service(app)?.query(&request).await
    }
}
