//! Service layer: quote cache, provider adapters and the façade.

pub mod cache;
pub mod market_data;
pub mod providers;

pub use cache::QuoteCache;
pub use market_data::MarketDataService;
