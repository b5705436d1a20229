//! Global constants used throughout the hotel aggregator.
//!
//! Cache lifetimes, pagination bounds and network timeouts live here so the
//! numbers shared between the cache, query engine and configuration layer are
//! defined exactly once.

use std::time::Duration;

/// How long a reconciled dataset is served before a refresh is required (5 minutes).
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Default per-request timeout for supplier retrieval (30 seconds).
pub const SUPPLIER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Smallest page size the query engine will honour.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size the query engine will honour.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Maximum number of characters of a supplier error body kept in error messages.
pub const ERROR_BODY_PREVIEW_CHARS: usize = 200;
