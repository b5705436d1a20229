//! Validation of raw request parameters into a [`HotelQuery`].
//!
//! This is the boundary contract in front of the core: exactly one of
//! `destination_id` / `hotel_ids` must be present, and `page` / `page_size`
//! must be integers with `page_size` in `[1, 100]`. Violations are reported as
//! [`HotelError::InvalidRequest`] with the message shown to the caller.

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::core::HotelError;

use super::{HotelFilter, HotelQuery};

/// Raw, unvalidated query parameters as received by the boundary layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Destination to filter by
    pub destination_id: Option<String>,
    /// Comma-separated hotel ids to filter by
    pub hotel_ids: Option<String>,
    /// 1-indexed page number
    pub page: Option<String>,
    /// Number of hotels per page
    pub page_size: Option<String>,
}

impl QueryParams {
    /// Validate the parameters and build the corresponding query.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::InvalidRequest`] describing the first violation.
    pub fn validate(&self) -> Result<HotelQuery, HotelError> {
        let destination_id = non_blank(self.destination_id.as_deref());
        let hotel_ids = non_blank(self.hotel_ids.as_deref());

        let filter = match (destination_id, hotel_ids) {
            (None, None) => {
                return Err(HotelError::invalid_request(
                    "Either destination_id or hotel_ids is required",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(HotelError::invalid_request(
                    "Only one of destination_id or hotel_ids is allowed",
                ));
            }
            (Some(destination), None) => {
                let destination = destination.parse::<i64>().map_err(|_| {
                    HotelError::invalid_request("destination_id should be an integer")
                })?;
                HotelFilter::Destination(destination)
            }
            (None, Some(ids)) => HotelFilter::HotelIds(
                ids.split(',').map(str::trim).filter(|id| !id.is_empty()).map(String::from).collect(),
            ),
        };

        let page = match non_blank(self.page.as_deref()) {
            None => DEFAULT_PAGE,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| HotelError::invalid_request("Page should be a positive integer"))?,
        };

        let page_size = match non_blank(self.page_size.as_deref()) {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => {
                let size = raw.parse::<i64>().map_err(|_| {
                    HotelError::invalid_request("Page Size should be a positive integer")
                })?;
                if size < i64::from(MIN_PAGE_SIZE) || size > i64::from(MAX_PAGE_SIZE) {
                    return Err(HotelError::invalid_request("Page Size should be between 1 and 100"));
                }
                // Bounded by MAX_PAGE_SIZE above
                size as u32
            }
        };

        Ok(HotelQuery::new(filter).with_page(page).with_page_size(page_size))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
