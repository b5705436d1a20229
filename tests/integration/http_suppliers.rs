use hotel_aggregator::cache::HotelCache;
use hotel_aggregator::core::HotelError;
use hotel_aggregator::fetcher::{HttpSupplierClient, SupplierClient, fetch_batches};
use hotel_aggregator::supplier::SupplierRegistry;
use hotel_aggregator::test_utils::fixtures;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

use crate::common::{StubResponse, StubSupplierServer};

async fn fixture_server() -> StubSupplierServer {
    StubSupplierServer::start(HashMap::from([
        ("/acme".to_string(), StubResponse::json(&Value::Array(fixtures::acme_payload()))),
        ("/patagonia".to_string(), StubResponse::json(&Value::Array(fixtures::patagonia_payload()))),
        ("/paperflies".to_string(), StubResponse::json(&Value::Array(fixtures::paperflies_payload()))),
    ]))
    .await
    .unwrap()
}

fn registry_for(server: &StubSupplierServer) -> SupplierRegistry {
    let overrides: HashMap<String, String> = ["acme", "patagonia", "paperflies"]
        .into_iter()
        .map(|name| (name.to_string(), server.url(&format!("/{name}"))))
        .collect();
    SupplierRegistry::builtin().with_url_overrides(&overrides).unwrap()
}

/// Test a full fetch over HTTP
#[tokio::test]
async fn test_fetches_every_supplier_over_http() {
    let server = fixture_server().await;
    let client = HttpSupplierClient::new().unwrap();

    let batches = fetch_batches(&client, &registry_for(&server)).await.unwrap();
    let counts: Vec<(&str, usize)> =
        batches.iter().map(|b| (b.supplier.as_str(), b.raw_count)).collect();
    assert_eq!(counts, vec![("acme", 3), ("patagonia", 2), ("paperflies", 2)]);
    assert_eq!(server.hits("/acme"), 1);
}

/// Test that a non-success status is reported with the supplier and status
#[tokio::test]
async fn test_error_status_is_a_supplier_failure() {
    let server = StubSupplierServer::start(HashMap::from([(
        "/acme".to_string(),
        StubResponse::status(503, "{\"message\":\"maintenance\"}"),
    )]))
    .await
    .unwrap();
    let registry = registry_for(&server);
    let client = HttpSupplierClient::new().unwrap();

    let err = client.fetch_records(registry.get("acme").unwrap()).await.unwrap_err();
    match err {
        HotelError::SupplierStatus { supplier, status, .. } => {
            assert_eq!(supplier, "acme");
            assert_eq!(status, 503);
        }
        other => panic!("expected SupplierStatus, got {other:?}"),
    }

    // Unrouted suppliers answer 404, which fails the whole round
    let err = fetch_batches(&client, &registry).await.unwrap_err();
    assert_eq!(err.http_status_code(), 502);
}

/// Test that a body that is not a JSON array is a payload failure
#[tokio::test]
async fn test_non_array_body_is_a_payload_failure() {
    let server = StubSupplierServer::start(HashMap::from([(
        "/acme".to_string(),
        StubResponse::json(&json!({"hotels": []})),
    )]))
    .await
    .unwrap();
    let registry = registry_for(&server);
    let client = HttpSupplierClient::new().unwrap();

    let err = client.fetch_records(registry.get("acme").unwrap()).await.unwrap_err();
    assert!(matches!(err, HotelError::SupplierPayload { ref supplier, .. } if supplier == "acme"));
}

/// Test that an unreachable endpoint maps to SupplierUnreachable
#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let overrides = HashMap::from([("acme".to_string(), "http://127.0.0.1:1/acme".to_string())]);
    let registry = SupplierRegistry::builtin().with_url_overrides(&overrides).unwrap();
    let client = HttpSupplierClient::with_timeout(Duration::from_secs(5)).unwrap();

    let err = client.fetch_records(registry.get("acme").unwrap()).await.unwrap_err();
    assert!(matches!(err, HotelError::SupplierUnreachable { .. }));
}

/// Test that concurrent readers over HTTP hit each supplier once per TTL window
#[tokio::test]
async fn test_cache_single_flight_over_http() {
    let server = fixture_server().await;
    let cache = HotelCache::new(HttpSupplierClient::new().unwrap(), registry_for(&server));

    let results = futures::future::join_all((0..6).map(|_| cache.get_dataset())).await;
    for result in &results {
        assert_eq!(result.as_ref().unwrap().hotels().len(), 3);
    }

    cache.get_dataset().await.unwrap();
    for path in ["/acme", "/patagonia", "/paperflies"] {
        assert_eq!(server.hits(path), 1, "{path} fetched more than once");
    }
}
