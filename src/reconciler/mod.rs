//! Multi-supplier record reconciliation.
//!
//! Suppliers describe the same hotel under a shared `id`. [`reconcile`] scans
//! the concatenated supplier records once, keeping a map from `id` to the
//! record merged so far, and folds every repeat into it with [`merge_hotels`].
//!
//! # Merge policy
//!
//! "Stored" is the accumulated record, "incoming" the later-encountered one:
//!
//! | Field                   | Rule                                                  |
//! |-------------------------|-------------------------------------------------------|
//! | `destination_id`        | incoming (stored only if incoming is absent)          |
//! | `name`, `description`   | longer string wins; ties keep stored                  |
//! | `location.*`            | per field, incoming if present, else stored           |
//! | `amenities`, `images`   | key-wise union; values unioned in first-seen order    |
//! | `booking_conditions`    | union in first-seen order                             |
//!
//! # Ordering
//!
//! The output preserves the order in which each distinct `id` was first seen,
//! which keeps pagination stable across refreshes of identical supplier data.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Hotel, Location};

/// Merge records sharing an `id` into one record per `id`.
///
/// Output order is first-seen order of each `id`.
pub fn reconcile(hotels: Vec<Hotel>) -> Vec<Hotel> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(hotels.len());
    let mut merged: Vec<Hotel> = Vec::with_capacity(hotels.len());

    for hotel in hotels {
        match positions.get(&hotel.id) {
            Some(&index) => {
                let stored = std::mem::take(&mut merged[index]);
                merged[index] = merge_hotels(stored, hotel);
            }
            None => {
                positions.insert(hotel.id.clone(), merged.len());
                merged.push(hotel);
            }
        }
    }

    merged
}

/// Merge `incoming` into `stored` under the field-level policy described in
/// the module docs.
pub fn merge_hotels(stored: Hotel, incoming: Hotel) -> Hotel {
    Hotel {
        id: stored.id,
        destination_id: incoming.destination_id.or(stored.destination_id),
        name: longest(stored.name, incoming.name),
        location: merge_location(stored.location, incoming.location),
        description: longest(stored.description, incoming.description),
        amenities: merge_categories(stored.amenities, incoming.amenities),
        images: merge_categories(stored.images, incoming.images),
        booking_conditions: union(stored.booking_conditions, incoming.booking_conditions),
    }
}

fn longest(stored: String, incoming: String) -> String {
    if incoming.chars().count() > stored.chars().count() {
        incoming
    } else {
        stored
    }
}

fn merge_location(stored: Location, incoming: Location) -> Location {
    Location {
        lat: incoming.lat.or(stored.lat),
        lng: incoming.lng.or(stored.lng),
        address: incoming.address.or(stored.address),
        city: incoming.city.or(stored.city),
        country: incoming.country.or(stored.country),
    }
}

fn merge_categories<T: PartialEq>(
    mut stored: BTreeMap<String, Vec<T>>,
    incoming: BTreeMap<String, Vec<T>>,
) -> BTreeMap<String, Vec<T>> {
    for (category, values) in incoming {
        let existing = stored.remove(&category).unwrap_or_default();
        stored.insert(category, union(existing, values));
    }
    stored
}

/// Union of two lists by structural equality, in first-seen order.
fn union<T: PartialEq>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(first.len() + second.len());
    for value in first.into_iter().chain(second) {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
