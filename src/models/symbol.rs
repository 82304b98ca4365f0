//! Symbol canonicalization and asset-class detection.
//!
//! Raw tickers arrive from user input or model-generated text and can
//! carry stray whitespace, casing and trailing punctuation. Parsing
//! produces the canonical lookup form shared by the cache and every
//! provider adapter; provider-specific spellings (`I:NDX`, `EURUSD=X`,
//! `BTCUSDT`) stay inside the adapters.

use serde::{Deserialize, Serialize};

/// Coins recognized as crypto without an explicit `-USD`/`USDT` marker.
const KNOWN_CRYPTO: &[&str] = &["BTC", "ETH", "SOL", "XRP", "ADA", "BNB", "DOGE", "LTC"];

/// Six-letter equity tickers that must not be mistaken for forex pairs.
const STOCK_EXCEPTIONS: &[&str] = &["GOOGL", "AMZN", "NVIDIA"];

/// Asset class of a canonical symbol. Determines provider ordering and
/// each adapter's remapping rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Crypto,
    Forex,
    Index,
    Equity,
}

/// Map an index alias onto its canonical index code.
fn index_code(symbol: &str) -> Option<&'static str> {
    match symbol {
        "NDX" | "NASDAQ" | "NASDAQ100" | "US100" | "NAS100" => Some("NDX"),
        "SPX" | "SP500" | "US500" => Some("SPX"),
        "DJI" | "DOW" | "US30" => Some("DJI"),
        "VIX" => Some("VIX"),
        _ => None,
    }
}

/// Normalized, provider-agnostic identifier for an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSymbol {
    lookup: String,
    class: AssetClass,
}

impl CanonicalSymbol {
    /// Canonicalize a raw ticker string.
    ///
    /// Returns `None` for empty or whitespace-only input, which callers
    /// treat as "no symbol supplied" and skip market-data enrichment
    /// entirely. That is an expected state, not an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw
            .trim()
            .trim_end_matches(['.', ',', ';', ':', '!', '?'])
            .trim()
            .to_uppercase();
        if cleaned.is_empty() {
            return None;
        }

        let class = classify(&cleaned);
        let lookup = match class {
            // Index aliases collapse to one canonical code per index.
            AssetClass::Index => index_code(&cleaned).unwrap_or(&cleaned).to_string(),
            _ => cleaned,
        };

        Some(Self { lookup, class })
    }

    /// Canonical lookup string, also used as the cache key.
    pub fn lookup(&self) -> &str {
        &self.lookup
    }

    pub fn asset_class(&self) -> AssetClass {
        self.class
    }

    /// Base coin for a crypto symbol, with pair suffixes stripped
    /// (`BTC-USD` -> `BTC`, `SOLUSDT` -> `SOL`).
    pub fn base_coin(&self) -> &str {
        let s = self.lookup.as_str();
        if let Some(base) = s.strip_suffix("USDT") {
            return base.trim_end_matches(['-', '/']);
        }
        if let Some(base) = s.strip_suffix("-USD").or_else(|| s.strip_suffix("/USD")) {
            return base;
        }
        s
    }

    /// Human-facing display form. Cosmetic only: never used for
    /// upstream lookups.
    pub fn pretty(&self) -> String {
        match self.class {
            AssetClass::Index => match self.lookup.as_str() {
                "NDX" => "NAS100".to_string(),
                "SPX" => "S&P 500".to_string(),
                "DJI" => "US 30".to_string(),
                other => other.to_string(),
            },
            AssetClass::Forex => format!("{}/{}", &self.lookup[..3], &self.lookup[3..]),
            AssetClass::Crypto => format!("{}/USD", self.base_coin()),
            AssetClass::Equity => self.lookup.clone(),
        }
    }
}

fn classify(symbol: &str) -> AssetClass {
    if KNOWN_CRYPTO.contains(&symbol) || symbol.contains("-USD") || symbol.contains("USDT") {
        return AssetClass::Crypto;
    }
    if index_code(symbol).is_some() {
        return AssetClass::Index;
    }
    if symbol.len() == 6
        && symbol.chars().all(|c| c.is_ascii_alphabetic())
        && !STOCK_EXCEPTIONS.contains(&symbol)
    {
        return AssetClass::Forex;
    }
    AssetClass::Equity
}
