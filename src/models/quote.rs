//! Market quote exchanged between the provider chain, cache and API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the upstream that produced a quote.
///
/// `Mock` marks a synthetic placeholder and is the only way downstream
/// consumers can tell a real quote from a fabricated one, so provenance
/// must be preserved end-to-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSource {
    Binance,
    Polygon,
    #[serde(rename = "Yahoo Finance")]
    YahooFinance,
    CoinGecko,
    Mock,
}

impl QuoteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteSource::Binance => "Binance",
            QuoteSource::Polygon => "Polygon",
            QuoteSource::YahooFinance => "Yahoo Finance",
            QuoteSource::CoinGecko => "CoinGecko",
            QuoteSource::Mock => "Mock",
        }
    }

    /// True for quotes fabricated by the mock fallback.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, QuoteSource::Mock)
    }
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single market quote.
///
/// `symbol` carries the pretty display form (`EUR/USD`, `BTC/USD`,
/// `NAS100`), never a provider-internal ticker spelling. `price` is
/// strictly positive for every non-mock quote; adapters that see a zero
/// or negative price report "no data" instead of building one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    /// Signed 24h change in percent; 0.0 when the provider cannot supply it.
    pub change24h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low24h: Option<f64>,
    /// Timestamp of the fetch, not of the underlying market tick.
    pub last_updated: DateTime<Utc>,
    pub source: QuoteSource,
}

impl Quote {
    /// Create a quote with only the required fields set.
    pub fn new(symbol: impl Into<String>, price: f64, source: QuoteSource) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change24h: 0.0,
            volume24h: None,
            market_cap: None,
            high24h: None,
            low24h: None,
            last_updated: Utc::now(),
            source,
        }
    }
}

/// Round to a fixed number of decimal places.
///
/// Providers report percent changes and mock prices at asset-dependent
/// precision (4 decimals for forex, 2 elsewhere).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
