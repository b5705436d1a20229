//! Time-bounded, single-flight cache of the reconciled hotel dataset.
//!
//! The cache owns the most recent [`CachedDataset`] and refreshes it lazily
//! from inside the query path. There is no background refresh loop.
//!
//! # State machine
//!
//! ```text
//! Empty ──refresh ok──▶ Fresh(t) ──age ≥ TTL──▶ Stale(t) ──refresh ok──▶ Fresh(t')
//!                          │                        │
//!                          └──── refresh error ─────┴──▶ unchanged, error returned
//! ```
//!
//! A failed refresh leaves the previous snapshot in place but is still reported
//! to the caller as a failure; a stale dataset is never served in place of a
//! refresh error.
//!
//! # Single-flight refresh
//!
//! The freshness check and the decision to refresh happen under one lock. The
//! first caller that finds the dataset empty or stale stores a shared
//! pending-refresh handle in the state's `in_flight` slot; callers arriving
//! while it is set clone the handle and await the same result instead of
//! starting their own supplier round. The refresh itself publishes its outcome
//! when it completes, so it does not matter which of the waiting callers is
//! polling it at that moment, or whether the caller that started it has gone
//! away.
//!
//! # Snapshot replacement
//!
//! Datasets are handed out as `Arc<CachedDataset>` and replaced wholesale. A
//! reader holds either the old or the new complete snapshot, never a mix.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::constants::CACHE_TTL;
use crate::core::HotelError;
use crate::fetcher::{SupplierClient, fetch_all};
use crate::models::Hotel;
use crate::reconciler::reconcile;
use crate::supplier::SupplierRegistry;

/// An immutable reconciled dataset plus the time it was produced.
#[derive(Debug)]
pub struct CachedDataset {
    hotels: Vec<Hotel>,
    fetched_at: DateTime<Utc>,
    refreshed: Instant,
}

impl CachedDataset {
    /// Wrap a freshly reconciled dataset, stamping it with the current time.
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self {
            hotels,
            fetched_at: Utc::now(),
            refreshed: Instant::now(),
        }
    }

    /// Reconciled hotels, in first-seen order.
    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    /// Wall-clock time of the refresh that produced this dataset.
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Time elapsed since this dataset was produced.
    pub fn age(&self) -> Duration {
        self.refreshed.elapsed()
    }

    /// Whether the dataset may still be served under `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Observable cache state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No successful refresh has happened yet
    Empty,
    /// The current dataset is younger than the TTL
    Fresh,
    /// The current dataset has outlived the TTL; the next read refreshes it
    Stale,
}

type RefreshResult = Result<Arc<CachedDataset>, HotelError>;
type PendingRefresh = Shared<BoxFuture<'static, RefreshResult>>;

#[derive(Default)]
struct CacheState {
    dataset: Option<Arc<CachedDataset>>,
    in_flight: Option<PendingRefresh>,
}

/// Single-flight TTL cache in front of the fetch → map → reconcile pipeline.
///
/// ```rust,no_run
/// use hotel_aggregator::cache::HotelCache;
/// use hotel_aggregator::fetcher::HttpSupplierClient;
/// use hotel_aggregator::supplier::SupplierRegistry;
///
/// # async fn example() -> anyhow::Result<()> {
/// let cache = HotelCache::new(HttpSupplierClient::new()?, SupplierRegistry::builtin());
/// let dataset = cache.get_dataset().await?;
/// println!("{} hotels", dataset.hotels().len());
/// # Ok(())
/// # }
/// ```
pub struct HotelCache<C> {
    client: Arc<C>,
    registry: Arc<SupplierRegistry>,
    ttl: Duration,
    state: Arc<Mutex<CacheState>>,
}

impl<C: SupplierClient> HotelCache<C> {
    /// Create an empty cache with the default five minute TTL.
    pub fn new(client: C, registry: SupplierRegistry) -> Self {
        Self::with_ttl(client, registry, CACHE_TTL)
    }

    /// Create an empty cache with a custom TTL.
    pub fn with_ttl(client: C, registry: SupplierRegistry, ttl: Duration) -> Self {
        Self {
            client: Arc::new(client),
            registry: Arc::new(registry),
            ttl,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Current state of the cache, without triggering a refresh.
    pub async fn status(&self) -> CacheStatus {
        let state = self.state.lock().await;
        match &state.dataset {
            None => CacheStatus::Empty,
            Some(dataset) if dataset.is_fresh(self.ttl) => CacheStatus::Fresh,
            Some(_) => CacheStatus::Stale,
        }
    }

    /// Return the current dataset, refreshing it first if it is empty or stale.
    ///
    /// Concurrent callers that find the cache empty or stale share one
    /// refresh and all observe its result.
    ///
    /// # Errors
    ///
    /// Returns the supplier fetch error of a failed refresh. The previous
    /// dataset, if any, is kept but not returned.
    pub async fn get_dataset(&self) -> Result<Arc<CachedDataset>, HotelError> {
        let pending = {
            let mut state = self.state.lock().await;

            if let Some(dataset) = state.dataset.as_ref().filter(|d| d.is_fresh(self.ttl)) {
                debug!(
                    target: "cache",
                    "Serving cached dataset ({} hotels, fetched {}, age {:?})",
                    dataset.hotels().len(),
                    dataset.fetched_at().format("%H:%M:%S"),
                    dataset.age()
                );
                return Ok(Arc::clone(dataset));
            }

            match &state.in_flight {
                Some(pending) => {
                    debug!(target: "cache", "Joining in-flight refresh");
                    pending.clone()
                }
                None => {
                    debug!(
                        target: "cache",
                        "Dataset {}, starting refresh",
                        if state.dataset.is_some() { "stale" } else { "empty" }
                    );
                    let pending = self.start_refresh();
                    state.in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    fn start_refresh(&self) -> PendingRefresh {
        let client = Arc::clone(&self.client);
        let registry = Arc::clone(&self.registry);
        let state = Arc::clone(&self.state);

        async move {
            let started = Instant::now();
            let result = fetch_all(client.as_ref(), &registry)
                .await
                .map(|hotels| Arc::new(CachedDataset::new(reconcile(hotels))));

            let mut state = state.lock().await;
            state.in_flight = None;
            match &result {
                Ok(dataset) => {
                    info!(
                        target: "cache",
                        "Refreshed dataset: {} hotels from {} suppliers in {:?}",
                        dataset.hotels().len(),
                        registry.len(),
                        started.elapsed()
                    );
                    state.dataset = Some(Arc::clone(dataset));
                }
                Err(e) => {
                    warn!(target: "cache", "Refresh failed, keeping previous snapshot: {e}");
                }
            }
            result
        }
        .boxed()
        .shared()
    }
}
