//! The query surface of the core: cache snapshot → filter → page.
//!
//! [`HotelService::get_hotels`] is the single entry point used by the boundary
//! layer. It assumes its caller already validated the request (see
//! [`crate::query::params`]) and only fills in defaults: page 1 and a page
//! size of 10 when absent, with the page size clamped to `[1, 100]`.

use tracing::debug;

use crate::cache::HotelCache;
use crate::core::HotelError;
use crate::fetcher::SupplierClient;
use crate::models::PaginatedHotels;
use crate::query::{HotelFilter, HotelQuery, query};
use crate::supplier::SupplierRegistry;

/// Hotel lookups backed by a [`HotelCache`].
pub struct HotelService<C> {
    cache: HotelCache<C>,
}

impl<C: SupplierClient> HotelService<C> {
    /// Service over an existing cache.
    pub const fn new(cache: HotelCache<C>) -> Self {
        Self {
            cache,
        }
    }

    /// Service with a default-TTL cache over `registry`.
    pub fn from_client(client: C, registry: SupplierRegistry) -> Self {
        Self::new(HotelCache::new(client, registry))
    }

    /// Look up hotels by destination or by id, one page at a time.
    ///
    /// `destination_id` takes precedence when both filters are given. A
    /// destination that is not an integer, or an empty id list, matches
    /// nothing and yields an empty page.
    ///
    /// # Errors
    ///
    /// Propagates the supplier fetch error of a failed refresh.
    pub async fn get_hotels(
        &self,
        destination_id: Option<&str>,
        hotel_ids: Option<&[String]>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PaginatedHotels, HotelError> {
        let filter = match (destination_id.filter(|d| !d.is_empty()), hotel_ids) {
            (Some(destination), _) => destination
                .trim()
                .parse::<i64>()
                .map(HotelFilter::Destination)
                .unwrap_or(HotelFilter::None),
            (None, Some(ids)) if !ids.is_empty() => HotelFilter::HotelIds(ids.to_vec()),
            _ => HotelFilter::None,
        };

        let mut request = HotelQuery::new(filter);
        if let Some(page) = page {
            request = request.with_page(page);
        }
        if let Some(page_size) = page_size {
            request = request.with_page_size(page_size);
        }

        self.query(&request).await
    }

    /// Run an already-built query against the current dataset.
    ///
    /// # Errors
    ///
    /// Propagates the supplier fetch error of a failed refresh.
    pub async fn query(&self, request: &HotelQuery) -> Result<PaginatedHotels, HotelError> {
        let dataset = self.cache.get_dataset().await?;
        let result = query(dataset.hotels(), request);
        debug!(
            target: "service",
            "Query {:?} matched {} hotels, returning page {}/{}",
            request.filter(),
            result.total,
            result.page,
            result.total_pages
        );
        Ok(result)
    }
}
