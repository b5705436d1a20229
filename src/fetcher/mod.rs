//! Concurrent retrieval of raw supplier records.
//!
//! The fetcher issues one retrieval per registered supplier, all in flight at
//! once, and maps every raw record through that supplier's mapping. Results are
//! concatenated in registry order regardless of which retrieval finished
//! first, so a given registry and payload set always yields the same
//! pre-reconciliation order.
//!
//! # Failure semantics
//!
//! Refreshes are all-or-nothing: if any supplier is unreachable, answers with
//! a non-success status or returns something other than a JSON array, the
//! whole fetch fails with that supplier's error. No partial dataset is ever
//! produced.
//!
//! # The client seam
//!
//! Retrieval goes through the [`SupplierClient`] trait. [`HttpSupplierClient`]
//! is the production implementation built on `reqwest`; tests substitute a
//! scripted client (see `test_utils`).

use futures::future::try_join_all;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{ERROR_BODY_PREVIEW_CHARS, SUPPLIER_REQUEST_TIMEOUT};
use crate::core::HotelError;
use crate::models::Hotel;
use crate::supplier::mapping::map_record;
use crate::supplier::{SupplierDefinition, SupplierRegistry};

/// Retrieves the raw record list of one supplier.
///
/// Implementations must return one JSON value per raw record, or a supplier
/// fetch error ([`HotelError::SupplierUnreachable`], [`HotelError::SupplierStatus`]
/// or [`HotelError::SupplierPayload`]).
pub trait SupplierClient: Send + Sync + 'static {
    /// Fetch the raw records published by `supplier`.
    fn fetch_records(
        &self,
        supplier: &SupplierDefinition,
    ) -> impl Future<Output = Result<Vec<Value>, HotelError>> + Send;
}

/// `reqwest`-backed [`SupplierClient`] issuing a `GET` to each supplier URL.
#[derive(Debug, Clone)]
pub struct HttpSupplierClient {
    http: Client,
}

impl HttpSupplierClient {
    /// Create a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HotelError> {
        Self::with_timeout(SUPPLIER_REQUEST_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HotelError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hotelagg/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HotelError::ConfigError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
        })
    }
}

impl SupplierClient for HttpSupplierClient {
    async fn fetch_records(&self, supplier: &SupplierDefinition) -> Result<Vec<Value>, HotelError> {
        debug!(target: "fetcher", "GET {} ({})", supplier.url, supplier.name);

        let response = self.http.get(&supplier.url).send().await.map_err(|e| {
            HotelError::SupplierUnreachable {
                supplier: supplier.name.clone(),
                url: supplier.url.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                target: "fetcher",
                "Supplier {} answered HTTP {}: {}",
                supplier.name,
                status,
                body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect::<String>()
            );
            return Err(HotelError::SupplierStatus {
                supplier: supplier.name.clone(),
                url: supplier.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| HotelError::SupplierUnreachable {
            supplier: supplier.name.clone(),
            url: supplier.url.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        parse_payload(&supplier.name, &body)
    }
}

/// Parse a supplier body that must be a JSON array of records.
pub fn parse_payload(supplier: &str, body: &[u8]) -> Result<Vec<Value>, HotelError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| HotelError::SupplierPayload {
        supplier: supplier.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(HotelError::SupplierPayload {
            supplier: supplier.to_string(),
            reason: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Canonical records produced from one supplier's payload.
#[derive(Debug, Clone)]
pub struct SupplierBatch {
    /// Registry name of the supplier
    pub supplier: String,
    /// Number of raw records in the payload
    pub raw_count: usize,
    /// Mapped records, in payload order
    pub hotels: Vec<Hotel>,
}

/// Fetch and map every supplier, returning one batch per supplier in registry order.
///
/// Raw records whose mapped `id` is empty cannot be reconciled and are
/// skipped with a warning.
///
/// # Errors
///
/// Returns the first supplier fetch error; no batches are returned in that case.
pub async fn fetch_batches<C: SupplierClient>(
    client: &C,
    registry: &SupplierRegistry,
) -> Result<Vec<SupplierBatch>, HotelError> {
    let retrievals = registry.suppliers().iter().map(|supplier| async move {
        let raw = client.fetch_records(supplier).await?;
        let raw_count = raw.len();

        let mut hotels = Vec::with_capacity(raw_count);
        for record in &raw {
            let hotel = map_record(record, &supplier.mapping);
            if hotel.id.is_empty() {
                warn!(target: "fetcher", "Skipping {} record without an id", supplier.name);
                continue;
            }
            hotels.push(hotel);
        }

        debug!(
            target: "fetcher",
            "Supplier {} returned {} records ({} mapped)",
            supplier.name,
            raw_count,
            hotels.len()
        );

        Ok::<_, HotelError>(SupplierBatch {
            supplier: supplier.name.clone(),
            raw_count,
            hotels,
        })
    });

    // try_join_all keeps input order and short-circuits on the first error
    try_join_all(retrievals).await
}

/// Fetch and map every supplier, concatenating the records in registry order.
///
/// # Errors
///
/// Returns the first supplier fetch error.
pub async fn fetch_all<C: SupplierClient>(
    client: &C,
    registry: &SupplierRegistry,
) -> Result<Vec<Hotel>, HotelError> {
    let batches = fetch_batches(client, registry).await?;
    Ok(batches.into_iter().flat_map(|batch| batch.hotels).collect())
}
