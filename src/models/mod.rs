//! Shared data models spanning the service layers.

pub mod quote;
pub mod symbol;

pub use quote::{Quote, QuoteSource};
pub use symbol::{AssetClass, CanonicalSymbol};
