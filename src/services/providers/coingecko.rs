//! CoinGecko adapter (secondary crypto feed).
//!
//! Keyless but slow: resolving a ticker takes a search round-trip
//! before the price lookup, so this sits last in the crypto ordering.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{AssetClass, CanonicalSymbol, Quote, QuoteSource};

use super::error::ProviderError;
use super::QuoteProvider;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";
const PROVIDER_ID: &str = "CoinGecko";

pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the adapter at a different host (wiremock in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolve a ticker to a CoinGecko coin id, preferring an exact
    /// symbol match over search ranking.
    async fn search_coin_id(&self, coin: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/v3/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", coin)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        let hit = body
            .coins
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(coin))
            .or_else(|| body.coins.first())
            .ok_or_else(|| ProviderError::NoData {
                provider: PROVIDER_ID,
                symbol: coin.to_string(),
            })?;
        Ok(hit.id.clone())
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
struct SearchCoin {
    id: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct PricePoint {
    usd: Option<f64>,
    usd_market_cap: Option<f64>,
    usd_24h_vol: Option<f64>,
    usd_24h_change: Option<f64>,
}

#[async_trait]
impl QuoteProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn supports(&self, class: AssetClass) -> bool {
        class == AssetClass::Crypto
    }

    async fn fetch_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, ProviderError> {
        let coin_id = self.search_coin_id(symbol.base_coin()).await?;

        let url = format!("{}/api/v3/simple/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", coin_id.as_str()),
                ("vs_currencies", "usd"),
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }

        let prices: HashMap<String, PricePoint> = response.json().await?;
        let point = prices.get(&coin_id).ok_or_else(|| ProviderError::NoData {
            provider: PROVIDER_ID,
            symbol: symbol.lookup().to_string(),
        })?;

        let price = point.usd.unwrap_or_default();
        if price <= 0.0 {
            return Err(ProviderError::NoData {
                provider: PROVIDER_ID,
                symbol: symbol.lookup().to_string(),
            });
        }

        Ok(Quote {
            symbol: symbol.pretty(),
            price,
            change24h: point.usd_24h_change.unwrap_or(0.0),
            volume24h: point.usd_24h_vol,
            market_cap: point.usd_market_cap,
            high24h: None,
            low24h: None,
            last_updated: chrono::Utc::now(),
            source: QuoteSource::CoinGecko,
        })
    }
}
