//! Market data façade: canonicalize, cache, chain, mock.
//!
//! The one entry point the rest of the system calls. Once a symbol
//! canonicalizes, `get_market_data` always hands back a usable quote;
//! the worst case is a synthetic one tagged `source = Mock`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config;
use crate::metrics::Metrics;
use crate::models::{CanonicalSymbol, Quote};
use crate::services::cache::QuoteCache;
use crate::services::providers::{
    BinanceProvider, CoinGeckoProvider, MockQuoteProvider, PolygonProvider, ProviderChain,
    QuoteProvider, YahooFinanceProvider,
};

pub struct MarketDataService {
    chain: ProviderChain,
    cache: QuoteCache,
    mock: MockQuoteProvider,
    metrics: Option<Arc<Metrics>>,
}

/// Production provider stack: Binance -> Polygon -> CoinGecko for
/// crypto, Polygon -> Yahoo Finance for everything else. The Polygon
/// key comes from the environment; without one the adapter is skipped
/// at fetch time rather than left out of the ordering.
pub fn default_provider_chain() -> ProviderChain {
    let binance = Arc::new(BinanceProvider::new());
    let polygon = Arc::new(PolygonProvider::new(config::polygon_api_key()));
    let yahoo = Arc::new(YahooFinanceProvider::new());
    let coingecko = Arc::new(CoinGeckoProvider::new());

    let crypto: Vec<Arc<dyn QuoteProvider>> = vec![binance, polygon.clone(), coingecko];
    let standard: Vec<Arc<dyn QuoteProvider>> = vec![polygon, yahoo];
    ProviderChain::new(crypto, standard)
}

impl MarketDataService {
    /// Build a service around an explicit chain and cache. State is
    /// created once at process start and injected, which is also what
    /// lets tests run against wiremock-backed providers in isolation.
    pub fn new(chain: ProviderChain, cache: QuoteCache) -> Self {
        Self {
            chain,
            cache,
            mock: MockQuoteProvider::new(),
            metrics: None,
        }
    }

    /// Production wiring: default chain, TTL from the environment.
    pub fn with_default_providers() -> Self {
        let ttl = tokio::time::Duration::from_secs(config::cache_ttl_seconds());
        Self::new(default_provider_chain(), QuoteCache::with_ttl(ttl))
    }

    /// Attach counters to the façade and to the chain it owns, so
    /// per-provider failures are counted alongside lookup totals.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.chain = self.chain.with_metrics(metrics.clone());
        self.metrics = Some(metrics);
        self
    }

    /// Resolve a raw ticker to a quote.
    ///
    /// `None` means the symbol did not canonicalize (empty/unusable
    /// input) and enrichment should be skipped; no network I/O happens
    /// in that case. Any other outcome is a quote: cached, freshly
    /// fetched, or synthesized by the mock fallback. Mock results are
    /// cached too, so a failing upstream is not hammered again for a
    /// full TTL window.
    pub async fn get_market_data(&self, raw_symbol: &str) -> Option<Quote> {
        let symbol = CanonicalSymbol::parse(raw_symbol)?;
        if let Some(metrics) = &self.metrics {
            metrics.quote_requests_total.inc();
        }

        if let Some(quote) = self.cache.get(symbol.lookup()).await {
            debug!(symbol = symbol.lookup(), source = %quote.source, "cache hit");
            if let Some(metrics) = &self.metrics {
                metrics.quote_cache_hits_total.inc();
            }
            return Some(quote);
        }

        info!(
            symbol = symbol.lookup(),
            class = ?symbol.asset_class(),
            "fetching fresh market data"
        );

        let quote = match self.chain.fetch(&symbol).await {
            Some(quote) => quote,
            None => {
                warn!(
                    symbol = symbol.lookup(),
                    "all providers exhausted, synthesizing mock quote"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.mock_fallbacks_total.inc();
                }
                self.mock.generate(&symbol)
            }
        };

        self.cache.put(symbol.lookup(), quote.clone()).await;
        Some(quote)
    }
}
