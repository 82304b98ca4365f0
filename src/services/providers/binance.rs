//! Binance public 24h ticker adapter.
//!
//! Fastest feed in the crypto ordering. Keyless, high rate limit. All
//! numeric fields arrive as JSON strings.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::quote::round_to;
use crate::models::{AssetClass, CanonicalSymbol, Quote, QuoteSource};

use super::error::ProviderError;
use super::QuoteProvider;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const PROVIDER_ID: &str = "Binance";

pub struct BinanceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceProvider {
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

    /// Binance trades against USDT, not USD. `BTC-USD` and `BTC/USD`
    /// become `BTCUSDT`; bare coins get the suffix appended unless they
    /// already carry a stablecoin pairing.
    fn usdt_pair(symbol: &CanonicalSymbol) -> String {
        let mut pair = symbol.lookup().replace("-USD", "USDT").replace("/USD", "USDT");
        if !pair.ends_with("USDT") && !pair.ends_with("BUSD") {
            pair.push_str("USDT");
        }
        pair
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    last_price: String,
    price_change_percent: String,
    quote_volume: String,
    high_price: String,
    low_price: String,
}

fn parse_field(value: &str, field: &str) -> Result<f64, ProviderError> {
    value.parse::<f64>().map_err(|_| ProviderError::Malformed {
        provider: PROVIDER_ID,
        detail: format!("non-numeric {field}: {value:?}"),
    })
}

#[async_trait]
impl QuoteProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn supports(&self, class: AssetClass) -> bool {
        class == AssetClass::Crypto
    }

    async fn fetch_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, ProviderError> {
        let pair = Self::usdt_pair(symbol);
        let url = format!("{}/api/v3/ticker/24hr", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", pair.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }

        let ticker: Ticker24h = response.json().await?;
        let price = parse_field(&ticker.last_price, "lastPrice")?;
        if price <= 0.0 {
            return Err(ProviderError::NoData {
                provider: PROVIDER_ID,
                symbol: symbol.lookup().to_string(),
            });
        }

        Ok(Quote {
            symbol: symbol.pretty(),
            price,
            change24h: round_to(parse_field(&ticker.price_change_percent, "priceChangePercent")?, 2),
            volume24h: Some(parse_field(&ticker.quote_volume, "quoteVolume")?),
            market_cap: None,
            high24h: Some(parse_field(&ticker.high_price, "highPrice")?),
            low24h: Some(parse_field(&ticker.low_price, "lowPrice")?),
            last_updated: chrono::Utc::now(),
            source: QuoteSource::Binance,
        })
    }
}
