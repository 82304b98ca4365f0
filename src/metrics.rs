//! Prometheus metrics for the HTTP surface and the quote pipeline.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub quote_requests_total: IntCounter,
    pub quote_cache_hits_total: IntCounter,
    pub provider_failures_total: IntCounterVec,
    pub mock_fallbacks_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounter::with_opts(Opts::new(
            "http_requests_total",
            "Total HTTP requests handled",
        ))?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being processed",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let quote_requests_total = IntCounter::with_opts(Opts::new(
            "quote_requests_total",
            "Market data lookups after successful canonicalization",
        ))?;
        let quote_cache_hits_total = IntCounter::with_opts(Opts::new(
            "quote_cache_hits_total",
            "Lookups served from the in-memory cache",
        ))?;
        let provider_failures_total = IntCounterVec::new(
            Opts::new(
                "provider_failures_total",
                "Upstream provider failures, by provider",
            ),
            &["provider"],
        )?;
        let mock_fallbacks_total = IntCounter::with_opts(Opts::new(
            "mock_fallbacks_total",
            "Lookups that fell through to the synthetic quote generator",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(quote_requests_total.clone()))?;
        registry.register(Box::new(quote_cache_hits_total.clone()))?;
        registry.register(Box::new(provider_failures_total.clone()))?;
        registry.register(Box::new(mock_fallbacks_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            quote_requests_total,
            quote_cache_hits_total,
            provider_failures_total,
            mock_fallbacks_total,
        })
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
