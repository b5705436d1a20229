//! Test utilities for the hotel aggregator
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! - [`init_test_logging`] - one-time tracing subscriber using the test writer
//! - [`ScriptedSupplierClient`] - in-memory [`SupplierClient`] with canned
//!   payloads, injectable failures, an optional delay and call counting
//! - [`fixtures`] - raw payloads modelled on the real supplier feeds
//!
//! ```rust,no_run
//! use hotel_aggregator::cache::HotelCache;
//! use hotel_aggregator::supplier::SupplierRegistry;
//! use hotel_aggregator::test_utils::fixtures;
//!
//! # async fn example() {
//! let client = fixtures::builtin_client();
//! let cache = HotelCache::new(client.clone(), SupplierRegistry::builtin());
//! cache.get_dataset().await.unwrap();
//! assert_eq!(client.rounds(), 1);
//! # }
//! ```

pub mod fixtures;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once, PoisonError};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::HotelError;
use crate::fetcher::SupplierClient;
use crate::supplier::SupplierDefinition;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG` if set; with neither, no
/// subscriber is installed.
///
/// ```bash
/// RUST_LOG=hotel_aggregator=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

#[derive(Default)]
struct Script {
    responses: HashMap<String, Result<Vec<Value>, HotelError>>,
    calls: HashMap<String, usize>,
}

/// In-memory [`SupplierClient`] serving canned payloads by supplier name.
///
/// Clones share the same script and counters. Suppliers without a scripted
/// response fail with [`HotelError::SupplierUnreachable`].
#[derive(Clone, Default)]
pub struct ScriptedSupplierClient {
    script: Arc<Mutex<Script>>,
    total_calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl ScriptedSupplierClient {
    /// Client with no scripted suppliers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for `supplier`.
    #[must_use]
    pub fn with_records(self, supplier: &str, records: Vec<Value>) -> Self {
        self.restore_supplier(supplier, records);
        self
    }

    /// Sleep for `delay` inside every fetch, before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make `supplier` fail with `error` from now on.
    pub fn fail_supplier(&self, supplier: &str, error: HotelError) {
        self.lock().responses.insert(supplier.to_string(), Err(error));
    }

    /// Make `supplier` serve `records` from now on.
    pub fn restore_supplier(&self, supplier: &str, records: Vec<Value>) {
        self.lock().responses.insert(supplier.to_string(), Ok(records));
    }

    /// Number of fetches issued against `supplier`.
    pub fn calls(&self, supplier: &str) -> usize {
        self.lock().calls.get(supplier).copied().unwrap_or(0)
    }

    /// Total number of fetches issued against any supplier.
    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// Number of refresh rounds observed: the highest per-supplier fetch count.
    pub fn rounds(&self) -> usize {
        self.lock().calls.values().copied().max().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SupplierClient for ScriptedSupplierClient {
    async fn fetch_records(&self, supplier: &SupplierDefinition) -> Result<Vec<Value>, HotelError> {
        let response = {
            let mut script = self.lock();
            *script.calls.entry(supplier.name.clone()).or_insert(0) += 1;
            script.responses.get(&supplier.name).cloned()
        };
        self.total_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or_else(|| {
            Err(HotelError::SupplierUnreachable {
                supplier: supplier.name.clone(),
                url: supplier.url.clone(),
                reason: "no scripted response".to_string(),
            })
        })
    }
}
