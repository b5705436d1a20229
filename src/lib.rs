//! Hotel Aggregator
//!
//! Pulls hotel records from several independent suppliers, each with its own
//! payload shape, normalizes them into one canonical [`models::Hotel`] schema,
//! reconciles records describing the same hotel into a single merged record,
//! and serves filtered, paginated lookups over the result from a
//! time-bounded, single-flight cache.
//!
//! # Architecture Overview
//!
//! ```text
//! SupplierRegistry ──▶ fetcher ──▶ mapping ──▶ reconciler ──▶ HotelCache ──▶ query
//!   (static list)     (concurrent   (per-supplier   (merge by id)   (TTL, one      (filter,
//!                      retrieval)    field mapping)                  refresh)       paginate)
//! ```
//!
//! - A refresh is all-or-nothing: any failing supplier fails the whole round
//!   and no partial dataset is ever stored or served.
//! - Reconciliation is deterministic for a given registry order and payloads.
//! - Concurrent callers that find the cache empty or stale share one refresh.
//!
//! # Core Modules
//!
//! - [`supplier`] - Supplier registry and declarative field mappings
//! - [`fetcher`] - Concurrent retrieval behind the [`fetcher::SupplierClient`] seam
//! - [`reconciler`] - Merge policy for records sharing an id
//! - [`cache`] - TTL cache with single-flight refresh
//! - [`query`] - Filtering, pagination and request validation
//! - [`service`] - The `get_hotels` query surface
//!
//! # Supporting Modules
//!
//! - [`models`] - Canonical hotel schema and the paginated result
//! - [`core`] - Error taxonomy and user-facing error reporting
//! - [`config`] - TOML configuration (`~/.hotelagg/config.toml`)
//! - [`cli`] - The `hotelagg` command-line interface
//! - [`constants`] - Timeouts, TTL and pagination bounds
//!
//! # Example
//!
//! ```rust,no_run
//! use hotel_aggregator::fetcher::HttpSupplierClient;
//! use hotel_aggregator::service::HotelService;
//! use hotel_aggregator::supplier::SupplierRegistry;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service =
//!     HotelService::from_client(HttpSupplierClient::new()?, SupplierRegistry::builtin());
//! let page = service.get_hotels(Some("5432"), None, Some(1), Some(10)).await?;
//! for hotel in &page.hotels {
//!     println!("{} {}", hotel.id, hotel.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetcher;
pub mod models;
pub mod query;
pub mod reconciler;
pub mod service;
pub mod supplier;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
