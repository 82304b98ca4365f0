//! Provider-level error taxonomy.
//!
//! These errors never escape the provider chain: every variant is
//! logged and converted into "try the next provider". Resolution
//! failures are not represented here: an unusable symbol is an
//! `Option::None` at the façade, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("malformed response from {provider}: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },

    /// The provider answered but has nothing usable for this symbol.
    /// Covers missing instruments and zero/negative prices alike.
    #[error("{provider} has no data for {symbol}")]
    NoData {
        provider: &'static str,
        symbol: String,
    },

    #[error("missing API key for {provider}")]
    MissingApiKey { provider: &'static str },
}
