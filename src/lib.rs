//! quotelens: market-quote resolution service.
//!
//! Canonicalizes raw ticker strings, serves quotes from a short-lived
//! in-memory cache, walks a per-asset-class chain of upstream providers
//! and falls back to clearly tagged synthetic quotes when every real
//! feed fails.

pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
