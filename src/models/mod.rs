//! Canonical hotel record types shared by every pipeline stage.
//!
//! Suppliers expose heterogeneous schemas; the schema mapper turns each raw
//! record into a [`Hotel`], the reconciler merges hotels sharing an `id`, and
//! the query engine returns pages of them wrapped in [`PaginatedHotels`].
//!
//! Field names serialize in snake_case (`destination_id`, `booking_conditions`)
//! while the pagination envelope uses `pageSize`/`totalPages`, matching the
//! response shape existing consumers already parse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Amenities grouped by supplier-defined category (e.g. `"general"`, `"room"`).
///
/// Values within a category are kept unique in first-seen order.
pub type Amenities = BTreeMap<String, Vec<String>>;

/// Images grouped by supplier-defined category (e.g. `"rooms"`, `"site"`).
pub type Images = BTreeMap<String, Vec<Image>>;

/// A single hotel image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Image {
    /// Absolute URL of the image
    pub link: String,
    /// Caption supplied alongside the image; may be empty
    #[serde(default)]
    pub description: String,
}

/// Geographic and postal location of a hotel.
///
/// Each field is independently optional: suppliers rarely agree on which parts
/// of a location they publish, and the reconciler merges them one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    /// Latitude in decimal degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country name or code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// The canonical hotel record.
///
/// `id` is the reconciliation key: after reconciliation no two records in a
/// dataset share an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Hotel {
    /// Supplier listing identifier, shared across suppliers for the same hotel
    pub id: String,
    /// Destination the hotel belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<i64>,
    /// Display name; may be empty
    #[serde(default)]
    pub name: String,
    /// Location details
    #[serde(default)]
    pub location: Location,
    /// Free-text description; may be empty
    #[serde(default)]
    pub description: String,
    /// Amenities by category
    #[serde(default)]
    pub amenities: Amenities,
    /// Images by category
    #[serde(default)]
    pub images: Images,
    /// Booking conditions, unique
    #[serde(default)]
    pub booking_conditions: Vec<String>,
}

/// One page of hotels plus the metadata needed to request the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedHotels {
    /// Hotels on this page, in reconciled order
    pub hotels: Vec<Hotel>,
    /// Number of hotels matching the filter before pagination
    pub total: usize,
    /// 1-indexed page number
    pub page: u32,
    /// Page size used for slicing
    pub page_size: u32,
    /// `ceil(total / page_size)`
    pub total_pages: usize,
}
