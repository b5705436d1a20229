//! Raw supplier payloads for tests.
//!
//! The three payloads describe the same three hotels (`iJhz`, `SjyX`, `f8c9`)
//! the way each supplier publishes them, including their quirks: acme's empty
//! coordinates and padded strings, patagonia's `null` fields, paperflies'
//! nested location and categorized amenities.

use serde_json::{Value, json};

use super::ScriptedSupplierClient;

/// Scripted client serving all three built-in suppliers.
pub fn builtin_client() -> ScriptedSupplierClient {
    ScriptedSupplierClient::new()
        .with_records("acme", acme_payload())
        .with_records("patagonia", patagonia_payload())
        .with_records("paperflies", paperflies_payload())
}

/// acme feed: three hotels.
pub fn acme_payload() -> Vec<Value> {
    vec![
        json!({
            "Id": "iJhz",
            "DestinationId": 5432,
            "Name": "Beach Villas Singapore",
            "Latitude": 1.264751,
            "Longitude": 103.824006,
            "Address": " 8 Sentosa Gateway, Beach Villas ",
            "City": "Singapore",
            "Country": "SG",
            "PostalCode": "098269",
            "Description": "  This 5 star hotel is located on the coastline of Singapore.",
            "Facilities": ["Pool", "BusinessCenter", "WiFi ", "DryCleaning", " Breakfast"]
        }),
        json!({
            "Id": "SjyX",
            "DestinationId": 5432,
            "Name": "InterContinental Singapore Robertson Quay",
            "Latitude": null,
            "Longitude": null,
            "Address": " 1 Nanson Road",
            "City": "Singapore",
            "Country": "SG",
            "PostalCode": "238909",
            "Description": "Enjoy sophisticated waterfront living at the new InterContinental® Singapore Robertson Quay.",
            "Facilities": ["Pool", "WiFi ", "Aircon", "BusinessCenter", "BathTub", "Breakfast", "DryCleaning", "Bar"]
        }),
        json!({
            "Id": "f8c9",
            "DestinationId": 1122,
            "Name": "Hilton Shinjuku Tokyo",
            "Latitude": "",
            "Longitude": "",
            "Address": "160-0023, SHINJUKU-KU, 6-6-2 NISHI-SHINJUKU, JAPAN",
            "City": "Tokyo",
            "Country": "JP",
            "PostalCode": "160-0023",
            "Description": "Hilton Tokyo is located in Shinjuku.",
            "Facilities": ["Pool", "WiFi ", "BusinessCenter", "DryCleaning", " Breakfast", "Bar", "BathTub"]
        }),
    ]
}

/// patagonia feed: two of the three hotels.
pub fn patagonia_payload() -> Vec<Value> {
    vec![
        json!({
            "id": "iJhz",
            "destination": 5432,
            "name": "Beach Villas Singapore",
            "lat": 1.264751,
            "lng": 103.824006,
            "address": "8 Sentosa Gateway, Beach Villas, 098269",
            "info": "Located at the western tip of Resorts World Sentosa, guests at the Beach Villas are guaranteed privacy while they enjoy spectacular views of glittering waters.",
            "amenities": ["Aircon", "Tv", "Coffee machine", "Kettle", "Hair dryer", "Iron", "Tub"],
            "images": {
                "rooms": [
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/2.jpg", "description": "Double room"},
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/4.jpg", "description": "Bathroom"}
                ],
                "amenities": [
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/0.jpg", "description": "RWS"},
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/6.jpg", "description": "Sentosa Gateway"}
                ]
            }
        }),
        json!({
            "id": "f8c9",
            "destination": 1122,
            "name": "Hilton Tokyo Shinjuku",
            "lat": 35.6926,
            "lng": 139.690965,
            "address": null,
            "info": null,
            "amenities": null,
            "images": {
                "rooms": [
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/YwAr/i10_m.jpg", "description": "Suite"},
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/YwAr/i11_m.jpg", "description": "Suite - Living room"}
                ],
                "amenities": [
                    {"url": "https://d2ey9sqrvkqdfs.cloudfront.net/YwAr/i57_m.jpg", "description": "Bar"}
                ]
            }
        }),
    ]
}

/// paperflies feed: two of the three hotels.
pub fn paperflies_payload() -> Vec<Value> {
    vec![
        json!({
            "hotel_id": "iJhz",
            "destination_id": 5432,
            "hotel_name": "Beach Villas Singapore",
            "location": {
                "address": "8 Sentosa Gateway, Beach Villas, 098269",
                "country": "Singapore"
            },
            "details": "Surrounded by tropical gardens, these upscale villas in elegant Colonial-style buildings are part of the Resorts World Sentosa complex and a 2-minute walk from the Waterfront train station. Featuring sundecks and pool, garden or sea views, the plush 1- to 3-bedroom villas offer free Wi-Fi and flat-screens, as well as free-standing baths, minibars, and tea and coffeemaking facilities. Upgraded villas add private pools, fridges and microwaves; some have wine cellars. A 4-bedroom unit offers a kitchen and a living room. There's 24-hour room and butler service. Amenities include posh restaurant, plus an outdoor pool, a hot tub, and free parking.",
            "amenities": {
                "general": ["outdoor pool", "indoor pool", "business center", "childcare"],
                "room": ["tv", "coffee machine", "kettle", "hair dryer", "iron"]
            },
            "images": {
                "rooms": [
                    {"link": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/2.jpg", "caption": "Double room"},
                    {"link": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/3.jpg", "caption": "Double room"}
                ],
                "site": [
                    {"link": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/1.jpg", "caption": "Front"}
                ]
            },
            "booking_conditions": [
                "All children are welcome. One child under 12 years stays free of charge when using existing beds.",
                "Pets are not allowed.",
                "WiFi is available in all areas and is free of charge."
            ]
        }),
        json!({
            "hotel_id": "SjyX",
            "destination_id": 5432,
            "hotel_name": "InterContinental",
            "location": {
                "address": "1 Nanson Rd, Singapore 238909",
                "country": "Singapore"
            },
            "details": "InterContinental Singapore Robertson Quay is luxury's preferred address offering stylishly cosmopolitan riverside living for discerning travelers to Singapore.",
            "amenities": {
                "general": ["outdoor pool", "business center", "childcare", "parking", "bar", "dry cleaning", "wifi", "breakfast", "concierge"],
                "room": ["aircon", "minibar", "tv", "bathtub", "hair dryer"]
            },
            "images": {
                "rooms": [
                    {"link": "https://d2ey9sqrvkqdfs.cloudfront.net/Sjym/i93_m.jpg", "caption": "Double room"}
                ],
                "site": [
                    {"link": "https://d2ey9sqrvkqdfs.cloudfront.net/Sjym/i55_m.jpg", "caption": "Bar"}
                ]
            },
            "booking_conditions": [
                "Pets are not allowed.",
                "WiFi is available in all areas and is free of charge."
            ]
        }),
    ]
}
