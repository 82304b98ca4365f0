//! Polygon.io adapter (premium aggregator).
//!
//! True real-time last trade/quote endpoints, one namespace per asset
//! class: `I:` indices, `C:` forex, `X:` crypto, plain equities. When a
//! real-time endpoint fails (markets closed, plan limits) the adapter
//! falls back internally to the previous-close aggregate before giving
//! up: that inner fallback still counts as a single chain step.
//!
//! Requires an API key; without one the adapter reports
//! [`ProviderError::MissingApiKey`] and the chain skips it.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::models::{AssetClass, CanonicalSymbol, Quote, QuoteSource};

use super::error::ProviderError;
use super::QuoteProvider;

const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
const PROVIDER_ID: &str = "Polygon";

/// Polygon-internal instrument code. The namespace decides which
/// real-time endpoint to call.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PolygonTicker {
    Index(String),
    Forex(String),
    Crypto { base: String },
    Equity(String),
}

impl PolygonTicker {
    fn resolve(symbol: &CanonicalSymbol) -> Self {
        match symbol.asset_class() {
            AssetClass::Index => {
                // Canonical index codes map 1:1 onto Polygon's I: namespace.
                PolygonTicker::Index(format!("I:{}", symbol.lookup()))
            }
            AssetClass::Forex => PolygonTicker::Forex(format!("C:{}", symbol.lookup())),
            AssetClass::Crypto => PolygonTicker::Crypto {
                base: symbol.base_coin().to_string(),
            },
            AssetClass::Equity => PolygonTicker::Equity(symbol.lookup().to_string()),
        }
    }

    /// Code spelling used by the previous-close aggregate endpoint.
    fn aggregate_code(&self) -> String {
        match self {
            PolygonTicker::Index(code)
            | PolygonTicker::Forex(code)
            | PolygonTicker::Equity(code) => code.clone(),
            PolygonTicker::Crypto { base } => format!("X:{base}USD"),
        }
    }
}

pub struct PolygonProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl PolygonProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Point the adapter at a different host (wiremock in tests).
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        api_key: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(&[("apiKey", api_key)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Real-time price via the namespace-appropriate endpoint.
    async fn last_price(
        &self,
        ticker: &PolygonTicker,
        api_key: &str,
    ) -> Result<f64, ProviderError> {
        match ticker {
            PolygonTicker::Index(code) | PolygonTicker::Equity(code) => {
                let url = format!("{}/v2/last/trade/{}", self.base_url, code);
                let body: LastTradeResponse = self.get_json(&url, api_key).await?;
                body.results.map(|t| t.p).ok_or_else(|| empty_body("last trade"))
            }
            PolygonTicker::Forex(code) => {
                let url = format!("{}/v1/last/quote/{}", self.base_url, code);
                let body: LastQuoteResponse = self.get_json(&url, api_key).await?;
                let last = body.last.ok_or_else(|| empty_body("last quote"))?;
                last.ask
                    .or(last.bid)
                    .ok_or_else(|| empty_body("last quote prices"))
            }
            PolygonTicker::Crypto { base } => {
                let url = format!("{}/v1/last/crypto/{}/USD", self.base_url, base);
                let body: LastCryptoResponse = self.get_json(&url, api_key).await?;
                body.last
                    .map(|t| t.price)
                    .ok_or_else(|| empty_body("last crypto trade"))
            }
        }
    }

    /// Previous-close aggregate, the inner fallback when real-time
    /// lookup fails.
    async fn previous_close(
        &self,
        ticker: &PolygonTicker,
        api_key: &str,
    ) -> Result<f64, ProviderError> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/prev",
            self.base_url,
            ticker.aggregate_code()
        );
        let response = self
            .client
            .get(&url)
            .query(&[("adjusted", "true"), ("apiKey", api_key)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }
        let body: PrevCloseResponse = response.json().await?;
        body.results
            .and_then(|bars| bars.into_iter().next())
            .map(|bar| bar.c)
            .ok_or_else(|| empty_body("previous close"))
    }
}

fn empty_body(endpoint: &str) -> ProviderError {
    ProviderError::Malformed {
        provider: PROVIDER_ID,
        detail: format!("{endpoint} response carried no result"),
    }
}

#[derive(Debug, Deserialize)]
struct LastTradeResponse {
    results: Option<TradePoint>,
}

#[derive(Debug, Deserialize)]
struct TradePoint {
    p: f64,
}

#[derive(Debug, Deserialize)]
struct LastQuoteResponse {
    last: Option<FxQuotePoint>,
}

#[derive(Debug, Deserialize)]
struct FxQuotePoint {
    #[serde(alias = "askprice")]
    ask: Option<f64>,
    #[serde(alias = "bidprice")]
    bid: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LastCryptoResponse {
    last: Option<CryptoTradePoint>,
}

#[derive(Debug, Deserialize)]
struct CryptoTradePoint {
    price: f64,
}

#[derive(Debug, Deserialize)]
struct PrevCloseResponse {
    results: Option<Vec<PrevBar>>,
}

#[derive(Debug, Deserialize)]
struct PrevBar {
    c: f64,
}

#[async_trait]
impl QuoteProvider for PolygonProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn supports(&self, _class: AssetClass) -> bool {
        true
    }

    async fn fetch_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey {
                provider: PROVIDER_ID,
            })?;
        let ticker = PolygonTicker::resolve(symbol);

        let price = match self.last_price(&ticker, api_key).await {
            Ok(price) => price,
            Err(e) => {
                debug!(
                    symbol = symbol.lookup(),
                    error = %e,
                    "real-time lookup failed, falling back to previous close"
                );
                self.previous_close(&ticker, api_key).await?
            }
        };

        if price <= 0.0 {
            return Err(ProviderError::NoData {
                provider: PROVIDER_ID,
                symbol: symbol.lookup().to_string(),
            });
        }

        // Last trade endpoints carry no percent change.
        Ok(Quote::new(symbol.pretty(), price, QuoteSource::Polygon))
    }
}
