//! Environment-backed configuration.
//!
//! Read lazily at the call site; the bins load `.env` via dotenvy
//! before anything here runs.

use std::env;

/// Deployment environment name. Controls log formatting.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Polygon.io API key. Absent in most development setups, in which
/// case the Polygon adapter is skipped by the chain.
pub fn polygon_api_key() -> Option<String> {
    env::var("POLYGON_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Quote cache TTL in seconds. 60 unless overridden.
pub fn cache_ttl_seconds() -> u64 {
    env::var("CACHE_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60)
}
