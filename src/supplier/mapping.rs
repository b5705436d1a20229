//! Declarative supplier-to-canonical schema mapping.
//!
//! A [`SupplierMapping`] is a tree mirroring the canonical [`Hotel`] shape.
//! Every node is one of:
//!
//! - [`MappingNode::FieldPath`] - read a (possibly dotted) path from the raw record
//! - [`MappingNode::Derive`] - compute the value from the whole raw record
//! - [`MappingNode::Nested`] - build a sub-object from child nodes
//!
//! [`map_record`] walks the tree in lock-step with the output shape and then
//! converts the intermediate JSON object into a typed [`Hotel`].
//!
//! # Lenient mapping
//!
//! Mapping never fails. Missing paths, missing intermediate segments and values
//! of the wrong type all become absent canonical fields. Path leaves treat
//! `null`, `false`, `0` and `""` as absent; derivations that return an empty
//! list or map are treated as absent too, and amenity or image categories left
//! without values are dropped.
//!
//! ```rust,no_run
//! use hotel_aggregator::supplier::mapping::{MappingNode, SupplierMapping, map_record};
//! use serde_json::json;
//!
//! let mapping = SupplierMapping::new([
//!     ("id", MappingNode::path("hotel_id")),
//!     ("name", MappingNode::path("hotel_name")),
//!     ("location", MappingNode::nested([("country", MappingNode::path("location.country"))])),
//! ]);
//!
//! let hotel = map_record(&json!({"hotel_id": "iJhz", "location": {"country": "SG"}}), &mapping);
//! assert_eq!(hotel.id, "iJhz");
//! assert_eq!(hotel.location.country.as_deref(), Some("SG"));
//! assert!(hotel.name.is_empty());
//! ```

use serde_json::{Map, Value};

use crate::models::{Amenities, Hotel, Image, Images, Location};

/// A derivation computing one canonical field from the full raw record.
///
/// Returning `None` (or an empty list/map) marks the field absent.
pub type DeriveFn = fn(&Value) -> Option<Value>;

/// One node of a mapping tree.
#[derive(Debug, Clone)]
pub enum MappingNode {
    /// Dotted path into the raw record, e.g. `"location.address"`
    FieldPath(String),
    /// Custom derivation over the raw record
    Derive(DeriveFn),
    /// Sub-object whose fields are mapped by the children, in order
    Nested(Vec<(String, MappingNode)>),
}

impl MappingNode {
    /// Path leaf.
    pub fn path(path: impl Into<String>) -> Self {
        Self::FieldPath(path.into())
    }

    /// Derivation leaf.
    pub const fn derive(f: DeriveFn) -> Self {
        Self::Derive(f)
    }

    /// Nested sub-object.
    pub fn nested<K: Into<String>>(children: impl IntoIterator<Item = (K, MappingNode)>) -> Self {
        Self::Nested(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Root of a mapping tree: the field mappings of one canonical [`Hotel`].
#[derive(Debug, Clone)]
pub struct SupplierMapping {
    fields: Vec<(String, MappingNode)>,
}

impl SupplierMapping {
    /// Build a mapping from `(canonical field, node)` pairs.
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, MappingNode)>) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Canonical fields this mapping populates, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// Map one raw supplier record into a canonical [`Hotel`].
///
/// Never fails; see the module docs for the leniency rules.
pub fn map_record(raw: &Value, mapping: &SupplierMapping) -> Hotel {
    let mapped = evaluate_fields(raw, &mapping.fields);
    hotel_from_mapped(&mapped)
}

fn evaluate_fields(raw: &Value, fields: &[(String, MappingNode)]) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, node) in fields {
        if let Some(value) = evaluate(raw, node) {
            out.insert(key.clone(), value);
        }
    }
    out
}

fn evaluate(raw: &Value, node: &MappingNode) -> Option<Value> {
    match node {
        MappingNode::FieldPath(path) => lookup_path(raw, path).filter(is_truthy).cloned(),
        MappingNode::Derive(f) => f(raw).filter(|v| !is_empty_collection(v)),
        MappingNode::Nested(children) => Some(Value::Object(evaluate_fields(raw, children))),
    }
}

/// Resolve a dotted path against a raw record.
///
/// Object segments are looked up by key; numeric segments index into arrays.
/// Any unresolvable segment yields `None`.
pub fn lookup_path<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(raw, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn is_truthy(value: &&Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_empty_collection(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn hotel_from_mapped(mapped: &Map<String, Value>) -> Hotel {
    Hotel {
        id: mapped.get("id").and_then(as_identifier).unwrap_or_default(),
        destination_id: mapped.get("destination_id").and_then(as_integer),
        name: mapped.get("name").and_then(as_text).unwrap_or_default(),
        location: mapped.get("location").map(location_from_mapped).unwrap_or_default(),
        description: mapped.get("description").and_then(as_text).unwrap_or_default(),
        amenities: mapped.get("amenities").map(amenities_from_mapped).unwrap_or_default(),
        images: mapped.get("images").map(images_from_mapped).unwrap_or_default(),
        booking_conditions: mapped
            .get("booking_conditions")
            .map(string_list)
            .unwrap_or_default(),
    }
}

fn location_from_mapped(value: &Value) -> Location {
    let Some(map) = value.as_object() else {
        return Location::default();
    };
    Location {
        lat: map.get("lat").and_then(as_float),
        lng: map.get("lng").and_then(as_float),
        address: map.get("address").and_then(as_text),
        city: map.get("city").and_then(as_text),
        country: map.get("country").and_then(as_text),
    }
}

fn amenities_from_mapped(value: &Value) -> Amenities {
    let Some(map) = value.as_object() else {
        return Amenities::new();
    };
    map.iter()
        .map(|(category, items)| (category.clone(), string_list(items)))
        .filter(|(_, items)| !items.is_empty())
        .collect()
}

fn images_from_mapped(value: &Value) -> Images {
    let Some(map) = value.as_object() else {
        return Images::new();
    };
    map.iter()
        .map(|(category, items)| {
            let mut images: Vec<Image> = Vec::new();
            for image in items.as_array().into_iter().flatten().filter_map(image_from_mapped) {
                if !images.contains(&image) {
                    images.push(image);
                }
            }
            (category.clone(), images)
        })
        .filter(|(_, images)| !images.is_empty())
        .collect()
}

fn image_from_mapped(value: &Value) -> Option<Image> {
    let map = value.as_object()?;
    Some(Image {
        link: map.get("link").and_then(as_text)?,
        description: map.get("description").and_then(as_text).unwrap_or_default(),
    })
}

/// Unique strings of a JSON array, in first-seen order. Non-strings are skipped.
fn string_list(value: &Value) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in value.as_array().into_iter().flatten().filter_map(Value::as_str) {
        if !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    }
    out
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn as_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
