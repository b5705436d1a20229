use hotel_aggregator::cache::{CacheStatus, HotelCache};
use hotel_aggregator::core::HotelError;
use hotel_aggregator::fetcher::fetch_all;
use hotel_aggregator::models::Hotel;
use hotel_aggregator::query::{HotelQuery, QueryParams};
use hotel_aggregator::reconciler::reconcile;
use hotel_aggregator::service::HotelService;
use hotel_aggregator::supplier::SupplierRegistry;
use hotel_aggregator::test_utils::{ScriptedSupplierClient, fixtures, init_test_logging};
use std::time::Duration;

async fn reconciled() -> Vec<Hotel> {
    init_test_logging(None);
    let hotels = fetch_all(&fixtures::builtin_client(), &SupplierRegistry::builtin()).await.unwrap();
    assert_eq!(hotels.len(), 7);
    reconcile(hotels)
}

fn find<'a>(hotels: &'a [Hotel], id: &str) -> &'a Hotel {
    hotels.iter().find(|h| h.id == id).unwrap_or_else(|| panic!("missing hotel {id}"))
}

/// Test that each id appears once, in first-seen order
#[tokio::test]
async fn test_reconciled_ids_in_first_seen_order() {
    let hotels = reconciled().await;
    let ids: Vec<&str> = hotels.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["iJhz", "SjyX", "f8c9"]);
}

/// Test the merge of a hotel published by all three suppliers
#[tokio::test]
async fn test_three_way_merge() {
    let hotels = reconciled().await;
    let hotel = find(&hotels, "iJhz");

    assert_eq!(hotel.destination_id, Some(5432));
    assert_eq!(hotel.name, "Beach Villas Singapore");
    assert!(hotel.description.starts_with("Surrounded by tropical gardens"));

    assert_eq!(hotel.location.lat, Some(1.264751));
    assert_eq!(hotel.location.lng, Some(103.824006));
    assert_eq!(hotel.location.address.as_deref(), Some("8 Sentosa Gateway, Beach Villas, 098269"));
    assert_eq!(hotel.location.city.as_deref(), Some("Singapore"));
    // paperflies is last and publishes the full country name
    assert_eq!(hotel.location.country.as_deref(), Some("Singapore"));

    let general = &hotel.amenities["general"];
    assert_eq!(&general[..2], ["Pool", "BusinessCenter"]);
    assert!(general.contains(&"Coffee machine".to_string()));
    assert!(general.contains(&"outdoor pool".to_string()));
    assert_eq!(hotel.amenities["room"], ["tv", "coffee machine", "kettle", "hair dryer", "iron"]);

    // Shared room image appears once; patagonia's come first
    let rooms: Vec<&str> = hotel.images["rooms"].iter().map(|i| i.link.as_str()).collect();
    assert_eq!(
        rooms,
        vec![
            "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/2.jpg",
            "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/4.jpg",
            "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/3.jpg",
        ]
    );
    assert_eq!(hotel.images["amenities"].len(), 2);
    assert_eq!(hotel.images["site"][0].description, "Front");

    assert_eq!(hotel.booking_conditions.len(), 3);
}

/// Test that the longer name and description win and absent coordinates stay absent
#[tokio::test]
async fn test_two_way_merge_prefers_richer_text() {
    let hotels = reconciled().await;
    let hotel = find(&hotels, "SjyX");

    assert_eq!(hotel.name, "InterContinental Singapore Robertson Quay");
    assert!(hotel.description.starts_with("InterContinental Singapore Robertson Quay is luxury's"));
    assert_eq!(hotel.location.lat, None);
    assert_eq!(hotel.location.lng, None);
    assert_eq!(hotel.location.address.as_deref(), Some("1 Nanson Rd, Singapore 238909"));
    assert_eq!(hotel.location.city.as_deref(), Some("Singapore"));
    assert_eq!(
        hotel.booking_conditions,
        vec![
            "Pets are not allowed.".to_string(),
            "WiFi is available in all areas and is free of charge.".to_string(),
        ]
    );
}

/// Test that null and empty supplier fields never overwrite published ones
#[tokio::test]
async fn test_absent_fields_fall_back() {
    let hotels = reconciled().await;
    let hotel = find(&hotels, "f8c9");

    // Equal length names: the first supplier's is kept
    assert_eq!(hotel.name, "Hilton Shinjuku Tokyo");
    assert_eq!(hotel.description, "Hilton Tokyo is located in Shinjuku.");
    assert_eq!(hotel.location.lat, Some(35.6926));
    assert_eq!(hotel.location.lng, Some(139.690965));
    assert_eq!(
        hotel.location.address.as_deref(),
        Some("160-0023, SHINJUKU-KU, 6-6-2 NISHI-SHINJUKU, JAPAN, 160-0023")
    );
    assert_eq!(hotel.location.country.as_deref(), Some("JP"));
    assert_eq!(hotel.images["rooms"].len(), 2);
    assert!(hotel.booking_conditions.is_empty());
}

/// Test that reconciling the same payloads twice gives the same dataset
#[tokio::test]
async fn test_reconciliation_is_deterministic() {
    assert_eq!(reconciled().await, reconciled().await);
}

/// Test the full query surface in front of the cache
#[tokio::test]
async fn test_service_pages_through_destination() {
    let service = HotelService::from_client(fixtures::builtin_client(), SupplierRegistry::builtin());

    let first = service.get_hotels(Some("5432"), None, Some(1), Some(1)).await.unwrap();
    assert_eq!(first.total, 2);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.hotels[0].id, "iJhz");

    let second = service.get_hotels(Some("5432"), None, Some(2), Some(1)).await.unwrap();
    assert_eq!(second.hotels[0].id, "SjyX");

    let past_end = service.get_hotels(Some("5432"), None, Some(3), Some(1)).await.unwrap();
    assert!(past_end.hotels.is_empty());
    assert_eq!(past_end.total, 2);
}

/// Test that validated boundary parameters drive the same query
#[tokio::test]
async fn test_validated_params_query() {
    let service = HotelService::from_client(fixtures::builtin_client(), SupplierRegistry::builtin());
    let params = QueryParams {
        hotel_ids: Some("f8c9,nope".to_string()),
        ..Default::default()
    };

    let request = params.validate().unwrap();
    let page = service.query(&request).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.hotels[0].name, "Hilton Shinjuku Tokyo");

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["pageSize"], 10);
    assert_eq!(json["totalPages"], 1);
}

/// Test that a failing supplier fails the query instead of returning partial data
#[tokio::test]
async fn test_supplier_failure_is_all_or_nothing() {
    let client = fixtures::builtin_client();
    client.fail_supplier(
        "patagonia",
        HotelError::SupplierStatus {
            supplier: "patagonia".to_string(),
            url: "http://localhost/patagonia".to_string(),
            status: 503,
        },
    );
    let cache = HotelCache::new(client.clone(), SupplierRegistry::builtin());

    let err = cache.get_dataset().await.unwrap_err();
    assert!(err.is_supplier_failure());
    assert_eq!(cache.status().await, CacheStatus::Empty);

    client.restore_supplier("patagonia", fixtures::patagonia_payload());
    let dataset = cache.get_dataset().await.unwrap();
    assert_eq!(dataset.hotels().len(), 3);
    assert_eq!(client.rounds(), 2);
}

/// Test that concurrent first readers trigger exactly one supplier round
#[tokio::test]
async fn test_concurrent_readers_share_refresh() {
    let client = fixtures::builtin_client().with_delay(Duration::from_millis(50));
    let service = HotelService::from_client(client.clone(), SupplierRegistry::builtin());

    let request = HotelQuery::by_destination(5432);
    let results = futures::future::join_all((0..8).map(|_| service.query(&request))).await;

    assert!(results.iter().all(|r| r.as_ref().is_ok_and(|page| page.total == 2)));
    assert_eq!(client.rounds(), 1);
    assert_eq!(client.total_calls(), 3);
}

/// Test that an empty registry reconciles to an empty dataset
#[tokio::test]
async fn test_empty_registry() {
    let cache = HotelCache::new(ScriptedSupplierClient::new(), SupplierRegistry::default());
    let dataset = cache.get_dataset().await.unwrap();
    assert!(dataset.hotels().is_empty());
}
