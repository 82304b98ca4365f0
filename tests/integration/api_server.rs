//! Integration tests for the API server surface.

mod test_utils;

use std::sync::Arc;
use std::time::Instant;

use axum_test::TestServer;
use quotelens::core::http::{create_router, AppState, HealthStatus};
use quotelens::metrics::Metrics;
use serde_json::Value;
use tokio::sync::RwLock;

use test_utils::{mock_binance_ticker, TestService, TestServiceBuilder};

struct TestApiServer {
    server: TestServer,
    upstream: wiremock::MockServer,
}

impl TestApiServer {
    async fn new() -> Self {
        let TestService { server: upstream, service } =
            TestServiceBuilder::new().build().await;

        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            market_data: Arc::new(service.with_metrics(metrics)),
        };
        let server = TestServer::new(create_router(state)).expect("start test server");
        Self { server, upstream }
    }
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "quotelens-market-data");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
}

#[tokio::test]
async fn market_data_endpoint_returns_a_quote() {
    let app = TestApiServer::new().await;
    mock_binance_ticker(&app.upstream, "BTCUSDT", 64_250.5).await;

    let response = app.server.get("/api/market-data/BTC").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "BTC/USD");
    assert_eq!(body["source"], "Binance");
    assert_eq!(body["price"], 64_250.5);
}

#[tokio::test]
async fn market_data_endpoint_tags_synthetic_quotes() {
    // No upstream mocks mounted: the façade must still answer, with
    // provenance marking the quote as synthetic.
    let app = TestApiServer::new().await;

    let response = app.server.get("/api/market-data/ETH").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["source"], "Mock");
    assert!(body["price"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn unresolvable_symbol_yields_not_found() {
    let app = TestApiServer::new().await;

    let response = app.server.get("/api/market-data/...").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn quote_lookups_show_up_in_metrics() {
    let app = TestApiServer::new().await;

    let _ = app.server.get("/api/market-data/ETH").await;
    let body = app.server.get("/metrics").await.text();

    assert!(
        body.contains("quote_requests_total 1"),
        "expected one recorded quote lookup, got:\n{body}"
    );
    assert!(
        body.contains("mock_fallbacks_total 1"),
        "expected one mock fallback, got:\n{body}"
    );
}

#[tokio::test]
async fn failed_providers_are_counted_per_provider() {
    // No upstream mocks mounted, so every reachable provider answers
    // 404 and the lookup ends at the mock. Each real failure must show
    // up as a labeled sample.
    let app = TestApiServer::new().await;

    let response = app.server.get("/api/market-data/BTC").await;
    assert_eq!(response.status_code(), 200);

    let body = app.server.get("/metrics").await.text();
    assert!(
        body.contains(r#"provider_failures_total{provider="Binance"} 1"#),
        "expected a Binance failure sample, got:\n{body}"
    );
    assert!(
        body.contains(r#"provider_failures_total{provider="CoinGecko"} 1"#),
        "expected a CoinGecko failure sample, got:\n{body}"
    );
}
