//! Yahoo Finance chart-metadata adapter (consumer finance feed).
//!
//! Delayed/previous-close backup for stocks, forex and indices. Yahoo
//! spells instruments its own way: caret-prefixed indices (`^NDX`),
//! `=X` forex pairs, futures-style commodity codes (`GC=F`). Those
//! spellings live here and never leak into the canonical symbol.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::quote::round_to;
use crate::models::{AssetClass, CanonicalSymbol, Quote, QuoteSource};

use super::error::ProviderError;
use super::QuoteProvider;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const PROVIDER_ID: &str = "Yahoo Finance";

pub struct YahooFinanceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooFinanceProvider {
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

    fn yahoo_symbol(symbol: &CanonicalSymbol) -> String {
        // Commodity aliases first: XAUUSD is six letters and would
        // otherwise read as a plain forex pair.
        if let Some(futures_code) = commodity_code(symbol.lookup()) {
            return futures_code.to_string();
        }
        match symbol.asset_class() {
            AssetClass::Index => match symbol.lookup() {
                "NDX" => "^NDX".to_string(),
                "SPX" => "^GSPC".to_string(),
                "DJI" => "^DJI".to_string(),
                "VIX" => "^VIX".to_string(),
                other => other.to_string(),
            },
            AssetClass::Forex => {
                // Yahoo quirk: the yen pair is bare "JPY=X".
                if symbol.lookup() == "USDJPY" {
                    "JPY=X".to_string()
                } else {
                    format!("{}=X", symbol.lookup())
                }
            }
            _ => symbol.lookup().to_string(),
        }
    }
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Commodity spellings map onto futures-style codes.
fn commodity_code(symbol: &str) -> Option<&'static str> {
    match symbol {
        "XAU" | "GOLD" | "ORO" | "XAUUSD" => Some("GC=F"),
        "XAG" | "SILVER" | "PLATA" | "XAGUSD" => Some("SI=F"),
        "OIL" | "WTI" | "USOIL" => Some("CL=F"),
        "BRENT" | "UKOIL" => Some("BZ=F"),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    regular_market_volume: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn supports(&self, class: AssetClass) -> bool {
        class != AssetClass::Crypto
    }

    async fn fetch_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, ProviderError> {
        let yahoo_symbol = Self::yahoo_symbol(symbol);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, yahoo_symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", "1d")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER_ID,
                status: response.status().as_u16(),
            });
        }

        let body: ChartResponse = response.json().await?;
        let meta = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.meta)
            .ok_or_else(|| ProviderError::Malformed {
                provider: PROVIDER_ID,
                detail: "chart response carried no result".to_string(),
            })?;

        let price = meta.regular_market_price.unwrap_or_default();
        if price <= 0.0 {
            return Err(ProviderError::NoData {
                provider: PROVIDER_ID,
                symbol: symbol.lookup().to_string(),
            });
        }

        let change24h = match meta.previous_close {
            Some(prev_close) if prev_close > 0.0 => {
                round_to((price - prev_close) / prev_close * 100.0, 2)
            }
            _ => 0.0,
        };

        Ok(Quote {
            symbol: symbol.pretty(),
            price,
            change24h,
            volume24h: meta.regular_market_volume,
            market_cap: None,
            high24h: Some(meta.regular_market_day_high.unwrap_or(price)),
            low24h: Some(meta.regular_market_day_low.unwrap_or(price)),
            last_updated: chrono::Utc::now(),
            source: QuoteSource::YahooFinance,
        })
    }
}
