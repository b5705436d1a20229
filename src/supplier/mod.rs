//! Supplier registry: the static catalogue of hotel data suppliers.
//!
//! Each [`SupplierDefinition`] pairs a fetch endpoint with the declarative
//! [`SupplierMapping`] that turns the supplier's native record shape into the
//! canonical [`crate::models::Hotel`]. The registry is built once at start-up
//! and never mutated afterwards; its order is the order in which supplier
//! records are concatenated before reconciliation.
//!
//! # Built-in suppliers
//!
//! | Name         | Notable mapping                                             |
//! |--------------|-------------------------------------------------------------|
//! | `acme`       | address derived from `Address` + `PostalCode`; `Facilities` |
//! | `patagonia`  | images `{url, description}`; flat `amenities` list          |
//! | `paperflies` | nested `location.*`; categorized amenities; booking terms   |

pub mod mapping;

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::core::HotelError;
pub use mapping::{MappingNode, SupplierMapping};

/// Base URL of the hosted supplier mock endpoints.
pub const DEFAULT_SUPPLIER_BASE_URL: &str = "https://5f2be0b4ffc88500167b85a0.mockapi.io/suppliers";

/// A supplier endpoint together with its field mapping.
#[derive(Debug, Clone)]
pub struct SupplierDefinition {
    /// Registry name, used in logs and errors
    pub name: String,
    /// Endpoint returning a JSON array of raw records
    pub url: String,
    /// Mapping from the supplier's shape to the canonical record
    pub mapping: SupplierMapping,
}

impl SupplierDefinition {
    /// Create a new supplier definition.
    pub fn new(name: impl Into<String>, url: impl Into<String>, mapping: SupplierMapping) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            mapping,
        }
    }
}

/// Ordered, immutable collection of suppliers.
#[derive(Debug, Clone, Default)]
pub struct SupplierRegistry {
    suppliers: Vec<SupplierDefinition>,
}

impl SupplierRegistry {
    /// Build a registry from supplier definitions, keeping their order.
    pub fn new(suppliers: Vec<SupplierDefinition>) -> Self {
        Self {
            suppliers,
        }
    }

    /// The built-in acme / patagonia / paperflies registry.
    pub fn builtin() -> Self {
        Self::new(vec![acme(), patagonia(), paperflies()])
    }

    /// Replace supplier URLs by name.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::ConfigError`] if an override names a supplier
    /// that is not registered.
    pub fn with_url_overrides(mut self, overrides: &HashMap<String, String>) -> Result<Self, HotelError> {
        for (name, url) in overrides {
            let supplier = self.suppliers.iter_mut().find(|s| &s.name == name).ok_or_else(|| {
                HotelError::ConfigError {
                    message: format!("URL override for unknown supplier '{name}'"),
                }
            })?;
            supplier.url.clone_from(url);
        }
        Ok(self)
    }

    /// Suppliers in registry order.
    pub fn suppliers(&self) -> &[SupplierDefinition] {
        &self.suppliers
    }

    /// Look up a supplier by name.
    pub fn get(&self, name: &str) -> Option<&SupplierDefinition> {
        self.suppliers.iter().find(|s| s.name == name)
    }

    /// Number of registered suppliers.
    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    /// Whether no suppliers are registered.
    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

fn supplier_url(name: &str) -> String {
    format!("{DEFAULT_SUPPLIER_BASE_URL}/{name}")
}

fn acme() -> SupplierDefinition {
    let mapping = SupplierMapping::new([
        ("id", MappingNode::path("Id")),
        ("destination_id", MappingNode::path("DestinationId")),
        ("name", MappingNode::path("Name")),
        (
            "location",
            MappingNode::nested([
                ("lat", MappingNode::path("Latitude")),
                ("lng", MappingNode::path("Longitude")),
                ("address", MappingNode::derive(acme_address)),
                ("city", MappingNode::path("City")),
                ("country", MappingNode::path("Country")),
            ]),
        ),
        ("description", MappingNode::path("Description")),
        ("amenities", MappingNode::derive(acme_amenities)),
    ]);
    SupplierDefinition::new("acme", supplier_url("acme"), mapping)
}

fn patagonia() -> SupplierDefinition {
    let mapping = SupplierMapping::new([
        ("id", MappingNode::path("id")),
        ("destination_id", MappingNode::path("destination")),
        ("name", MappingNode::path("name")),
        (
            "location",
            MappingNode::nested([
                ("lat", MappingNode::path("lat")),
                ("lng", MappingNode::path("lng")),
                ("address", MappingNode::path("address")),
            ]),
        ),
        ("description", MappingNode::path("info")),
        ("amenities", MappingNode::derive(patagonia_amenities)),
        ("images", MappingNode::derive(patagonia_images)),
    ]);
    SupplierDefinition::new("patagonia", supplier_url("patagonia"), mapping)
}

fn paperflies() -> SupplierDefinition {
    let mapping = SupplierMapping::new([
        ("id", MappingNode::path("hotel_id")),
        ("destination_id", MappingNode::path("destination_id")),
        ("name", MappingNode::path("hotel_name")),
        (
            "location",
            MappingNode::nested([
                ("address", MappingNode::path("location.address")),
                ("country", MappingNode::path("location.country")),
            ]),
        ),
        ("description", MappingNode::path("details")),
        ("amenities", MappingNode::derive(paperflies_amenities)),
        ("images", MappingNode::derive(paperflies_images)),
        ("booking_conditions", MappingNode::path("booking_conditions")),
    ]);
    SupplierDefinition::new("paperflies", supplier_url("paperflies"), mapping)
}

/// `"<Address>, <PostalCode>"`, each part trimmed; missing parts are skipped.
fn acme_address(raw: &Value) -> Option<Value> {
    let parts: Vec<&str> = ["Address", "PostalCode"]
        .iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    (!parts.is_empty()).then(|| Value::String(parts.join(", ")))
}

fn acme_amenities(raw: &Value) -> Option<Value> {
    general_category(raw.get("Facilities")?)
}

fn patagonia_amenities(raw: &Value) -> Option<Value> {
    general_category(raw.get("amenities")?)
}

/// Wraps a non-empty flat list as `{"general": [...]}`.
fn general_category(list: &Value) -> Option<Value> {
    let items = list.as_array().filter(|items| !items.is_empty())?;
    let mut categories = Map::new();
    categories.insert("general".to_string(), Value::Array(items.clone()));
    Some(Value::Object(categories))
}

fn paperflies_amenities(raw: &Value) -> Option<Value> {
    let categories = raw.get("amenities")?.as_object()?;
    let copied: Map<String, Value> = categories
        .iter()
        .filter(|(_, items)| items.is_array())
        .map(|(category, items)| (category.clone(), items.clone()))
        .collect();
    Some(Value::Object(copied))
}

fn patagonia_images(raw: &Value) -> Option<Value> {
    remap_images(raw, "url", "description")
}

fn paperflies_images(raw: &Value) -> Option<Value> {
    remap_images(raw, "link", "caption")
}

/// Rename each image's link/caption keys to the canonical `link`/`description`.
fn remap_images(raw: &Value, link_key: &str, caption_key: &str) -> Option<Value> {
    let categories = raw.get("images")?.as_object()?;
    let mut remapped = Map::new();
    for (category, images) in categories {
        let Some(images) = images.as_array() else {
            continue;
        };
        let images = images
            .iter()
            .filter_map(|image| {
                let link = image.get(link_key)?.clone();
                let mut canonical = Map::new();
                canonical.insert("link".to_string(), link);
                if let Some(caption) = image.get(caption_key) {
                    canonical.insert("description".to_string(), caption.clone());
                }
                Some(Value::Object(canonical))
            })
            .collect();
        remapped.insert(category.clone(), Value::Array(images));
    }
    Some(Value::Object(remapped))
}
