//! Integration tests for the scraping client
//!
//! These tests use wiremock to stand up one mock server per extraction
//! endpoint and exercise failover, circuit breaking, and diagnostics over
//! real HTTP.

use dinescout::client::{AuthTestOutcome, ScrapeError, ScrapingClient};
use dinescout::config::ClientSettings;
use dinescout::health::{EndpointState, HealthStatus};
use dinescout::models::{ExtractionRequest, ScrapeOptions};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";
const RESTAURANT_URL: &str =
    "https://www.tripadvisor.com/Restaurant_Review-g187147-d718998-Reviews-Le_Cinq-Paris.html";

/// Creates client settings pointing at the given mock servers
fn create_test_settings(servers: &[&MockServer], api_key: Option<&str>) -> ClientSettings {
    let mut settings = ClientSettings::with_endpoints(
        servers.iter().map(|s| s.uri()).collect(),
        api_key.map(str::to_string),
    );
    settings.timeout = Duration::from_secs(2);
    settings.health_timeout = Duration::from_secs(2);
    settings.retry_delay = Duration::from_millis(10); // Very short for testing
    settings
}

fn success_body(name: &str) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "name": name,
            "cuisines": ["French"],
            "priceRange": "$$$$",
            "rating": 4.5,
            "location": "Paris"
        },
        "timestamp": "2026-10-16T12:00:00Z",
        "version": "2.1.0"
    })
}

async fn mount_success(server: &MockServer, name: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(name)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_server_error(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"success": false, "error": "Browser crashed"})),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_round_robin_spreads_successful_calls() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    let c = MockServer::start().await;
    mount_success(&a, "A", 1).await;
    mount_success(&b, "B", 1).await;
    mount_success(&c, "C", 1).await;

    let client = ScrapingClient::new(create_test_settings(&[&a, &b, &c], Some(API_KEY))).unwrap();

    let mut names = Vec::new();
    for _ in 0..3 {
        let data = client
            .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
            .await
            .unwrap();
        names.push(data.name);
    }

    assert_eq!(names, vec!["A", "B", "C"]);
    for stats in client.get_stats() {
        assert_eq!(stats.success_count, 1);
        assert_eq!(stats.total_requests, 1);
    }
}

#[tokio::test]
async fn test_failover_to_third_endpoint() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    let c = MockServer::start().await;
    mount_server_error(&a, 1).await;
    mount_server_error(&b, 1).await;
    mount_success(&c, "Le Cinq", 1).await;

    let client = ScrapingClient::new(create_test_settings(&[&a, &b, &c], Some(API_KEY))).unwrap();

    let data = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap();
    assert_eq!(data.name, "Le Cinq");
    assert_eq!(data.cuisines, vec!["French"]);

    let failures: Vec<u32> = client.get_stats().iter().map(|s| s.failures).collect();
    assert_eq!(failures, vec![1, 1, 0]);
}

#[tokio::test]
async fn test_each_endpoint_tried_once_when_all_fail() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    let c = MockServer::start().await;
    mount_server_error(&a, 1).await;
    mount_server_error(&b, 1).await;
    mount_server_error(&c, 1).await;

    let client = ScrapingClient::new(create_test_settings(&[&a, &b, &c], Some(API_KEY))).unwrap();

    let err = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap_err();

    match err {
        ScrapeError::Failed(message) => assert_eq!(message, "HTTP 500: Browser crashed"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(client.get_stats().iter().all(|s| s.failures == 1));
}

#[tokio::test]
async fn test_all_endpoints_time_out() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    for server in [&a, &b] {
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body("Too slow"))
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(server)
            .await;
    }

    let mut settings = create_test_settings(&[&a, &b], Some(API_KEY));
    settings.timeout = Duration::from_millis(100);
    let client = ScrapingClient::new(settings).unwrap();

    let err = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::TimedOut));
    assert!(err.to_string().contains("took too long"));
}

#[tokio::test]
async fn test_missing_api_key_makes_no_requests() {
    let server = MockServer::start().await;
    mount_success(&server, "Never", 0).await;

    let client = ScrapingClient::new(create_test_settings(&[&server], None)).unwrap();

    let err = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::MissingApiKey));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_key_and_options_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(header("X-API-Key", API_KEY))
        .and(body_partial_json(json!({
            "options": {"timeout": 45000, "retries": 2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Le Cinq")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();
    let request = ExtractionRequest::new(RESTAURANT_URL).with_options(ScrapeOptions {
        timeout: Some(45000),
        retries: Some(2),
        user_agent: None,
    });

    let data = client.scrape_restaurant(&request).await.unwrap();
    assert_eq!(data.name, "Le Cinq");
}

#[tokio::test]
async fn test_unauthorized_and_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();
    let err = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::AuthenticationFailed));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();
    let err = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::AuthorizationFailed));
}

#[tokio::test]
async fn test_remote_failure_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Page layout not recognised"
        })))
        .mount(&server)
        .await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();
    let err = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Page layout not recognised");
    assert_eq!(client.get_stats()[0].failures, 1);
}

#[tokio::test]
async fn test_circuit_opens_and_forced_reset_keeps_trying() {
    let server = MockServer::start().await;
    mount_server_error(&server, 4).await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();
    let request = ExtractionRequest::new(RESTAURANT_URL);

    for _ in 0..3 {
        assert!(client.scrape_restaurant(&request).await.is_err());
    }
    let stats = client.get_stats();
    assert_eq!(stats[0].failures, 3);
    assert_eq!(stats[0].state, EndpointState::CircuitOpen);

    // With every circuit open the pool resets and tries again
    assert!(client.scrape_restaurant(&request).await.is_err());
    assert_eq!(client.get_stats()[0].failures, 1);
    assert_eq!(client.get_stats()[0].total_requests, 4);
}

#[tokio::test]
async fn test_open_circuit_is_skipped_by_later_calls() {
    let bad = MockServer::start().await;
    let good = MockServer::start().await;
    mount_server_error(&bad, 3).await;
    mount_success(&good, "Le Cinq", 5).await;

    let client =
        ScrapingClient::new(create_test_settings(&[&bad, &good], Some(API_KEY))).unwrap();
    let request = ExtractionRequest::new(RESTAURANT_URL);

    // Every call succeeds; the failing endpoint stops being chosen once its
    // circuit opens
    for _ in 0..5 {
        assert!(client.scrape_restaurant(&request).await.is_ok());
    }

    let stats = client.get_stats();
    assert_eq!(stats[0].state, EndpointState::CircuitOpen);
    assert_eq!(stats[1].success_count, 5);
}

#[tokio::test]
async fn test_no_retry_delay_when_remaining_endpoints_are_open() {
    let failing = MockServer::start().await;
    let tripped = MockServer::start().await;
    mount_server_error(&failing, 1).await;
    mount_success(&tripped, "Unreachable", 0).await;

    let mut settings = create_test_settings(&[&failing, &tripped], Some(API_KEY));
    settings.retry_delay = Duration::from_millis(700);
    let client = ScrapingClient::new(settings).unwrap();

    for _ in 0..3 {
        client.pool().mark_failure(1, Instant::now());
    }

    let started = Instant::now();
    let result = client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await;
    let elapsed = started.elapsed();

    // The only other endpoint is open while the first is still under
    // threshold, so the call gives up without waiting
    match result {
        Err(ScrapeError::Failed(msg)) => assert_eq!(msg, "HTTP 500: Browser crashed"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(
        elapsed < Duration::from_millis(500),
        "waited {:?} with no endpoint left to try",
        elapsed
    );

    let stats = client.get_stats();
    assert_eq!(stats[0].failures, 1);
    assert_eq!(stats[0].total_requests, 1);
    assert_eq!(stats[1].state, EndpointState::CircuitOpen);
}

#[tokio::test]
async fn test_reset_stats_zeroes_counters() {
    let a = MockServer::start().await;
    let b = MockServer::start().await;
    mount_server_error(&a, 1).await;
    mount_success(&b, "Le Cinq", 1).await;

    let client = ScrapingClient::new(create_test_settings(&[&a, &b], Some(API_KEY))).unwrap();
    client
        .scrape_restaurant(&ExtractionRequest::new(RESTAURANT_URL))
        .await
        .unwrap();

    client.reset_stats();

    for stats in client.get_stats() {
        assert_eq!(stats.failures, 0);
        assert_eq!(stats.success_count, 0);
        assert_eq!(stats.total_requests, 0);
        assert!(stats.last_failure_at.is_none());
    }
}

#[tokio::test]
async fn test_invalid_url_makes_no_requests() {
    let server = MockServer::start().await;
    mount_success(&server, "Never", 0).await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();

    let err = client
        .scrape_restaurant(&ExtractionRequest::new("https://www.yelp.com/biz/le-cinq-paris"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::UnsupportedSource(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_health_check_reports_every_endpoint() {
    let healthy = MockServer::start().await;
    let degraded = MockServer::start().await;
    let down = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2026-10-16T12:00:00Z",
            "uptime": 3600.5,
            "version": "2.1.0",
            "services": {"scraping": "operational"}
        })))
        .mount(&healthy)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "degraded"})))
        .mount(&degraded)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;

    let client = ScrapingClient::new(create_test_settings(
        &[&healthy, &degraded, &down],
        Some(API_KEY),
    ))
    .unwrap();

    let reports = client.health_check().await;
    assert_eq!(reports.len(), 3);

    assert_eq!(reports[0].endpoint, healthy.uri());
    assert_eq!(reports[0].status, HealthStatus::Healthy);
    let details = reports[0].details.as_ref().unwrap();
    assert_eq!(details.version.as_deref(), Some("2.1.0"));

    assert_eq!(reports[1].status, HealthStatus::Degraded);

    assert_eq!(reports[2].status, HealthStatus::Unhealthy);
    assert!(reports[2].details.is_none());
    assert!(reports[2].error.as_deref().unwrap().contains("503"));

    // Probes do not touch circuit-breaker counters
    assert!(client.get_stats().iter().all(|s| s.total_requests == 0));

    let outcome = client.test_api().await;
    assert!(outcome.success);
    assert_eq!(outcome.healthy_endpoints, 1);
    assert_eq!(outcome.total_endpoints, 3);
}

#[tokio::test]
async fn test_authentication_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let client = ScrapingClient::new(create_test_settings(&[&server], Some(API_KEY))).unwrap();
    assert_eq!(
        client.test_authentication().await,
        AuthTestOutcome::Ready {
            healthy_endpoints: 1,
            total_endpoints: 1
        }
    );

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&down)
        .await;

    let client = ScrapingClient::new(create_test_settings(&[&down], Some(API_KEY))).unwrap();
    assert_eq!(
        client.test_authentication().await,
        AuthTestOutcome::Unreachable { total_endpoints: 1 }
    );
}
