//! Shared helpers: a market-data service whose provider adapters all
//! point at one wiremock server.

use std::sync::Arc;

use quotelens::services::cache::QuoteCache;
use quotelens::services::providers::{
    BinanceProvider, CoinGeckoProvider, PolygonProvider, ProviderChain, QuoteProvider,
    YahooFinanceProvider,
};
use quotelens::services::MarketDataService;
use tokio::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Service bundled with the wiremock server standing in for every
/// upstream provider. Unmatched requests get wiremock's default 404,
/// which the chain treats as a plain provider failure.
#[allow(dead_code)]
pub struct TestService {
    pub server: MockServer,
    pub service: MarketDataService,
}

pub struct TestServiceBuilder {
    polygon_key: Option<String>,
    ttl: Duration,
}

#[allow(dead_code)]
impl TestServiceBuilder {
    pub fn new() -> Self {
        Self {
            polygon_key: None,
            ttl: Duration::from_secs(60),
        }
    }

    /// Enable the Polygon adapter; without a key the chain skips it.
    pub fn polygon_key(mut self, key: &str) -> Self {
        self.polygon_key = Some(key.to_string());
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn build(self) -> TestService {
        let server = MockServer::start().await;
        let uri = server.uri();

        let binance = Arc::new(BinanceProvider::with_base_url(&uri));
        let polygon = Arc::new(PolygonProvider::with_base_url(&uri, self.polygon_key));
        let yahoo = Arc::new(YahooFinanceProvider::with_base_url(&uri));
        let coingecko = Arc::new(CoinGeckoProvider::with_base_url(&uri));

        let crypto: Vec<Arc<dyn QuoteProvider>> = vec![binance, polygon.clone(), coingecko];
        let standard: Vec<Arc<dyn QuoteProvider>> = vec![polygon, yahoo];

        let service = MarketDataService::new(
            ProviderChain::new(crypto, standard),
            QuoteCache::with_ttl(self.ttl),
        );
        TestService { server, service }
    }
}

#[allow(dead_code)]
pub async fn mock_binance_ticker(server: &MockServer, pair: &str, price: f64) {
    let response = serde_json::json!({
        "symbol": pair,
        "lastPrice": price.to_string(),
        "priceChangePercent": "2.134",
        "quoteVolume": "1250000.5",
        "highPrice": (price * 1.02).to_string(),
        "lowPrice": (price * 0.97).to_string()
    });
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/24hr"))
        .and(query_param("symbol", pair))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_binance_down(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/24hr"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_coingecko(server: &MockServer, coin: &str, id: &str, price: f64) {
    let search = serde_json::json!({
        "coins": [{ "id": id, "symbol": coin.to_lowercase(), "name": id }]
    });
    Mock::given(method("GET"))
        .and(path("/api/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search))
        .mount(server)
        .await;

    let prices = serde_json::json!({
        id: {
            "usd": price,
            "usd_market_cap": 1_260_000_000_000.0f64,
            "usd_24h_vol": 32_000_000_000.0f64,
            "usd_24h_change": 1.87
        }
    });
    Mock::given(method("GET"))
        .and(path("/api/v3/simple/price"))
        .and(query_param("ids", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(prices))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_yahoo_chart(server: &MockServer, yahoo_symbol: &str, price: f64, prev_close: f64) {
    let response = serde_json::json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": yahoo_symbol,
                    "regularMarketPrice": price,
                    "previousClose": prev_close,
                    "regularMarketVolume": 125000.0,
                    "regularMarketDayHigh": price * 1.01,
                    "regularMarketDayLow": price * 0.99
                }
            }]
        }
    });
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{yahoo_symbol}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_polygon_prev_close(server: &MockServer, code: &str, close: f64) {
    let response = serde_json::json!({
        "ticker": code,
        "results": [{ "c": close, "h": close * 1.01, "l": close * 0.99 }]
    });
    Mock::given(method("GET"))
        .and(path(format!("/v2/aggs/ticker/{code}/prev")))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_polygon_last_trade(server: &MockServer, code: &str, price: f64) {
    let response = serde_json::json!({ "results": { "p": price } });
    Mock::given(method("GET"))
        .and(path(format!("/v2/last/trade/{code}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

/// Count requests whose path starts with `prefix`.
#[allow(dead_code)]
pub async fn requests_with_prefix(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("wiremock request recording enabled")
        .iter()
        .filter(|req| req.url.path().starts_with(prefix))
        .count()
}

/// Total number of upstream requests seen by the mock server.
#[allow(dead_code)]
pub async fn total_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("wiremock request recording enabled")
        .len()
}
