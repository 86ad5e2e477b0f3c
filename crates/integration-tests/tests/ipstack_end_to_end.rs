//! End-to-end: WorkerPool + IpstackClient against a mock ipstack API

use ipstack_core::application::worker::constants::ERR_API_REQUEST_FAILED;
use ipstack_core::port::feedback::mocks::MockFeedback;
use ipstack_core::port::logger::mocks::RecordingLogger;
use ipstack_core::{WorkerPool, WorkerPoolConfig};
use ipstack_infra_http::IpstackClient;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_record(server: &MockServer, ip: &str, country: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", ip)))
        .and(query_param("access_key", "e2e-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": ip,
            "type": "ipv4",
            "country_code": country,
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pool_resolves_through_http_client() {
    let server = MockServer::start().await;
    mount_record(&server, "1.1.1.1", "AU").await;
    mount_record(&server, "2.2.2.2", "FR").await;
    mount_record(&server, "3.3.3.3", "US").await;

    Mock::given(method("GET"))
        .and(path("/4.4.4.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": {"code": 104, "type": "usage_limit_reached", "info": "monthly limit reached"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = IpstackClient::new("e2e-key", false, 2)
        .unwrap()
        .with_base_url(server.uri());
    // 5.5.5.5 was resolved in an earlier run
    let feedback = Arc::new(MockFeedback::new().with_existing("5.5.5.5"));
    let log = Arc::new(RecordingLogger::new());

    let pool = WorkerPool::new(
        WorkerPoolConfig::new(2, 2).with_logger(log.clone()),
        Arc::new(client),
        feedback.clone(),
    )
    .unwrap();
    for ip in ["1.1.1.1", "2.2.2.2", "3.3.3.3", "4.4.4.4", "5.5.5.5"] {
        pool.submit(ip).await;
    }
    pool.shutdown().await;

    let mut created = feedback.created();
    created.sort_by(|a, b| a.0.cmp(&b.0));
    let countries: Vec<(String, Option<String>)> = created
        .into_iter()
        .map(|(ip, record)| (ip, record.country_code))
        .collect();
    assert_eq!(
        countries,
        vec![
            ("1.1.1.1".to_string(), Some("AU".to_string())),
            ("2.2.2.2".to_string(), Some("FR".to_string())),
            ("3.3.3.3".to_string(), Some("US".to_string())),
        ]
    );

    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].msg, ERR_API_REQUEST_FAILED);
    assert!(errors[0].err.as_deref().unwrap().contains("usage_limit_reached"));
    // expectations on `server` (one request per IP, none for 5.5.5.5) are verified on drop
}
