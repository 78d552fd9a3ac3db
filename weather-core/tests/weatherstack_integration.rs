//! Integration tests for the weatherstack client and the full lookup path
//! against a mock HTTP server.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use weather_core::{
    Config, FixedClock, MemoryStore, TransportError, UpstreamClient, WeatherError, WeatherService,
    WeatherStore, WeatherstackClient,
};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: String) -> Config {
    Config { base_url, ..Config::default() }
}

fn amsterdam_body() -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "Amsterdam",
            "country": "Netherlands",
            "localtime": "2023-03-08 23:58"
        },
        "current": {
            "temperature": 2
        }
    })
}

#[tokio::test]
async fn client_sends_access_key_and_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("query", "Amsterdam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(amsterdam_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(mock_server.uri());
    let client = WeatherstackClient::new(&config, "test-key".to_string()).unwrap();

    let body = client.fetch("Amsterdam").await.unwrap();
    assert!(body.contains("Netherlands"));
}

#[tokio::test]
async fn client_maps_non_2xx_to_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let config = test_config(mock_server.uri());
    let client = WeatherstackClient::new(&config, "test-key".to_string()).unwrap();

    let (status, body) = match client.fetch("Amsterdam").await.unwrap_err() {
        TransportError::Status { status, body } => (status, body),
        other => panic!("expected status error, got {other:?}"),
    };
    assert_eq!(status.as_u16(), 502);
    assert_eq!(body, "bad gateway");
}

#[tokio::test]
async fn client_returns_connection_failure_as_send_error() {
    // Unroutable port: the mock server is started then dropped. A pooled
    // server from `MockServer::start()` keeps its port alive after drop, so
    // build an exclusive one that actually shuts down.
    let uri = {
        let mock_server = MockServer::builder().start().await;
        mock_server.uri()
    };

    let config = test_config(uri);
    let client = WeatherstackClient::new(&config, "test-key".to_string()).unwrap();

    let err = client.fetch("Amsterdam").await.unwrap_err();
    assert!(matches!(err, TransportError::Send(_)));
}

#[tokio::test]
async fn lookup_service_fetches_persists_and_then_serves_from_cache() {
    let mock_server = MockServer::start().await;

    // The provider must be hit exactly once: the second lookup is fresh.
    Mock::given(method("GET"))
        .and(query_param("query", "Amsterdam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(amsterdam_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(mock_server.uri());
    let client = WeatherstackClient::new(&config, "test-key".to_string()).unwrap();
    let now = Utc.with_ymd_and_hms(2023, 3, 8, 23, 58, 0).unwrap();

    let store = Arc::new(MemoryStore::new());
    let service =
        WeatherService::new(store.clone(), Arc::new(client), Arc::new(FixedClock(now)));

    let first = service.get_weather("Amsterdam").await.unwrap();
    assert_eq!(first.city_name, "Amsterdam");
    assert_eq!(first.temperature, 2);
    assert_eq!(first.updated_time, now);

    let stored = store.find_latest_by_key("amsterdam").await.unwrap().unwrap();
    assert_eq!(stored.requested_city_name, "amsterdam");

    // Different casing, same key: served from the store.
    let second = service.get_weather("AMSTERDAM").await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn lookup_service_surfaces_provider_error_payload() {
    let mock_server = MockServer::start().await;

    // Weatherstack reports failures in-band with HTTP 200.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "101",
            "type": "invalid_access_key",
            "info": "You have not supplied a valid API Access Key."
        })))
        .mount(&mock_server)
        .await;

    let config = test_config(mock_server.uri());
    let client = WeatherstackClient::new(&config, "bad-key".to_string()).unwrap();
    let now = Utc.with_ymd_and_hms(2023, 3, 8, 23, 58, 0).unwrap();

    let store = Arc::new(MemoryStore::new());
    let service =
        WeatherService::new(store.clone(), Arc::new(client), Arc::new(FixedClock(now)));

    let payload = match service.get_weather("Amsterdam").await.unwrap_err() {
        WeatherError::UpstreamApi(payload) => payload,
        other => panic!("expected UpstreamApi, got {other:?}"),
    };
    assert_eq!(payload.code, "101");
    assert_eq!(payload.error_type, "invalid_access_key");
    assert!(store.is_empty());
}
