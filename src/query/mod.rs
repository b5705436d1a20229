//! Filtering and pagination over a reconciled dataset.
//!
//! A [`HotelQuery`] selects hotels either by destination or by an explicit id
//! set, then cuts a 1-indexed page out of the matches. Filtering preserves the
//! dataset's reconciled order, so the same dataset and query always return the
//! same page.
//!
//! No filter yields an empty page rather than an error; rejecting such a
//! request is the job of the boundary layer ([`params`]).

pub mod params;

use std::collections::HashSet;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::models::{Hotel, PaginatedHotels};

pub use params::QueryParams;

/// Which hotels a query selects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HotelFilter {
    /// Hotels whose `destination_id` equals the value
    Destination(i64),
    /// Hotels whose `id` is in the list
    HotelIds(Vec<String>),
    /// No filter: matches nothing
    #[default]
    None,
}

impl HotelFilter {
    fn matcher(&self) -> Matcher<'_> {
        match self {
            Self::Destination(destination) => Matcher::Destination(*destination),
            Self::HotelIds(ids) => Matcher::Ids(ids.iter().map(String::as_str).collect()),
            Self::None => Matcher::Nothing,
        }
    }
}

enum Matcher<'a> {
    Destination(i64),
    Ids(HashSet<&'a str>),
    Nothing,
}

impl Matcher<'_> {
    fn matches(&self, hotel: &Hotel) -> bool {
        match self {
            Self::Destination(destination) => hotel.destination_id == Some(*destination),
            Self::Ids(ids) => ids.contains(hotel.id.as_str()),
            Self::Nothing => false,
        }
    }
}

/// A filter plus the page window to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelQuery {
    filter: HotelFilter,
    page: u32,
    page_size: u32,
}

impl HotelQuery {
    /// Query for the first page of default size.
    pub const fn new(filter: HotelFilter) -> Self {
        Self {
            filter,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Query hotels of one destination.
    pub const fn by_destination(destination_id: i64) -> Self {
        Self::new(HotelFilter::Destination(destination_id))
    }

    /// Query hotels by id.
    pub fn by_ids<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(HotelFilter::HotelIds(ids.into_iter().map(Into::into).collect()))
    }

    /// Set the 1-indexed page; `0` is treated as the first page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(DEFAULT_PAGE);
        self
    }

    /// Set the page size, clamped to `[1, 100]`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        self
    }

    /// The filter of this query.
    pub const fn filter(&self) -> &HotelFilter {
        &self.filter
    }

    /// The 1-indexed page of this query.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The page size of this query.
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Filter `hotels` and return the requested page.
///
/// Pages past the end return an empty `hotels` list with the usual totals.
pub fn query(hotels: &[Hotel], query: &HotelQuery) -> PaginatedHotels {
    let matcher = query.filter.matcher();
    let matching: Vec<&Hotel> = hotels.iter().filter(|hotel| matcher.matches(hotel)).collect();

    let total = matching.len();
    let page_size = query.page_size as usize;
    let start = (query.page as usize - 1).saturating_mul(page_size);

    let page: Vec<Hotel> = matching.into_iter().skip(start).take(page_size).cloned().collect();

    PaginatedHotels {
        hotels: page,
        total,
        page: query.page,
        page_size: query.page_size,
        total_pages: total.div_ceil(page_size),
    }
}
