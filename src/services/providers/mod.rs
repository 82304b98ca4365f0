//! Quote providers and the per-asset-class fallback chain.
//!
//! Each upstream feed is one [`QuoteProvider`] implementation owning
//! its private symbol-remapping rules. The chain walks the providers
//! registered for an asset class in priority order and stops at the
//! first success; every failure is logged and swallowed so a dead
//! upstream only costs one hop, never the whole lookup.

pub mod binance;
pub mod coingecko;
pub mod error;
pub mod mock;
pub mod polygon;
pub mod yahoo;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::metrics::Metrics;
use crate::models::{AssetClass, CanonicalSymbol, Quote};

pub use binance::BinanceProvider;
pub use coingecko::CoinGeckoProvider;
pub use error::ProviderError;
pub use mock::MockQuoteProvider;
pub use polygon::PolygonProvider;
pub use yahoo::YahooFinanceProvider;

/// A single upstream quote source.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable identifier used for logging and chain diagnostics.
    fn id(&self) -> &'static str;

    /// Whether this provider serves the given asset class at all.
    fn supports(&self, class: AssetClass) -> bool;

    /// Fetch the latest quote. A non-positive price must be reported
    /// as [`ProviderError::NoData`], never as a quote.
    async fn fetch_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, ProviderError>;
}

/// Ordered fallback chain, one ordering per asset class.
///
/// Crypto walks the fast exchange feed first and keeps the keyless
/// search-based feed as the slow last resort; everything else starts at
/// the premium aggregator and falls back to the consumer finance feed.
pub struct ProviderChain {
    crypto: Vec<Arc<dyn QuoteProvider>>,
    standard: Vec<Arc<dyn QuoteProvider>>,
    metrics: Option<Arc<Metrics>>,
}

impl ProviderChain {
    /// Build a chain from explicit per-class orderings. Providers that
    /// do not support a class are skipped at fetch time, so sharing one
    /// adapter between the two lists is fine.
    pub fn new(
        crypto: Vec<Arc<dyn QuoteProvider>>,
        standard: Vec<Arc<dyn QuoteProvider>>,
    ) -> Self {
        Self {
            crypto,
            standard,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn ordering(&self, class: AssetClass) -> &[Arc<dyn QuoteProvider>] {
        match class {
            AssetClass::Crypto => &self.crypto,
            _ => &self.standard,
        }
    }

    /// Try every provider registered for the symbol's asset class, in
    /// order, returning the first successful quote. Never fails loudly:
    /// exhaustion is `None` and the caller decides what to do next.
    pub async fn fetch(&self, symbol: &CanonicalSymbol) -> Option<Quote> {
        let class = symbol.asset_class();
        for provider in self.ordering(class) {
            if !provider.supports(class) {
                continue;
            }
            match provider.fetch_quote(symbol).await {
                Ok(quote) => {
                    debug!(
                        provider = provider.id(),
                        symbol = symbol.lookup(),
                        price = quote.price,
                        "provider returned quote"
                    );
                    return Some(quote);
                }
                Err(ProviderError::MissingApiKey { provider }) => {
                    debug!(provider, "skipping provider without API key");
                }
                Err(e) => {
                    warn!(
                        provider = provider.id(),
                        symbol = symbol.lookup(),
                        error = %e,
                        "provider failed, trying next"
                    );
                    if let Some(metrics) = &self.metrics {
                        metrics
                            .provider_failures_total
                            .with_label_values(&[provider.id()])
                            .inc();
                    }
                }
            }
        }
        None
    }
}
