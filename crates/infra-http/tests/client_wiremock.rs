//! Integration tests for IpstackClient with Wiremock
//!
//! Exercises the request shape and error mapping against a mock API.

use ipstack_core::domain::LookupError;
use ipstack_core::port::LookupPort;
use ipstack_infra_http::IpstackClient;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> IpstackClient {
    IpstackClient::new("test-key", false, 2)
        .unwrap()
        .with_base_url(server.uri())
}

/// Successful lookup sends the documented query parameters
#[tokio::test]
async fn test_resolve_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/134.201.250.155"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("hostname", "1"))
        .and(query_param("language", "en"))
        .and(query_param("output", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "134.201.250.155",
            "type": "ipv4",
            "country_code": "US",
            "city": "Los Angeles",
            "connection": {"asn": 25876, "isp": "LADWP"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let record = client.resolve("134.201.250.155").await.unwrap();

    assert_eq!(record.ip, "134.201.250.155");
    assert_eq!(record.country_code.as_deref(), Some("US"));
    assert_eq!(record.city.as_deref(), Some("Los Angeles"));
    assert_eq!(record.connection.unwrap().asn, Some(25876));
}

/// Private ranges come back with null nested fields and still decode
#[tokio::test]
async fn test_resolve_private_range_with_nulls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/192.168.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "192.168.1.1",
            "type": "ipv4",
            "country_code": null,
            "latitude": null,
            "longitude": null,
            "location": {"geoname_id": null, "languages": null, "is_eu": null},
            "time_zone": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let record = client.resolve("192.168.1.1").await.unwrap();

    assert_eq!(record.ip, "192.168.1.1");
    assert!(record.country_code.is_none());
    assert!(record.location.unwrap().languages.is_empty());
}

/// ipstack reports rejected keys with HTTP 200 and an error body
#[tokio::test]
async fn test_api_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": {
                "code": 101,
                "type": "invalid_access_key",
                "info": "You have not supplied a valid API Access Key."
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.resolve("8.8.8.8").await.unwrap_err();

    match err {
        LookupError::Api { code, kind, .. } => {
            assert_eq!(code, 101);
            assert_eq!(kind, "invalid_access_key");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.resolve("8.8.8.8").await.unwrap_err();
    assert!(matches!(err, LookupError::Status(503)));
}

#[tokio::test]
async fn test_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.resolve("8.8.8.8").await.unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
}

/// Requests slower than the client timeout fail as transport errors
#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ip": "8.8.8.8"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = IpstackClient::new("test-key", false, 1)
        .unwrap()
        .with_base_url(mock_server.uri());
    let err = client.resolve("8.8.8.8").await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
}

/// Malformed input never reaches the network
#[tokio::test]
async fn test_invalid_ip_not_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.resolve("1.1.1.1/../admin").await.unwrap_err();
    assert!(matches!(err, LookupError::InvalidRequest(_)));
}
