//! Quote serialization shape tests.

use chrono::Utc;
use quotelens::models::quote::round_to;
use quotelens::models::{Quote, QuoteSource};

#[test]
fn quote_serializes_with_camel_case_keys_and_source_labels() {
    let quote = Quote {
        symbol: "EUR/USD".to_string(),
        price: 1.0845,
        change24h: 0.31,
        volume24h: Some(125_000.0),
        market_cap: None,
        high24h: Some(1.0901),
        low24h: Some(1.0799),
        last_updated: Utc::now(),
        source: QuoteSource::YahooFinance,
    };

    let value = serde_json::to_value(&quote).unwrap();
    assert_eq!(value["symbol"], "EUR/USD");
    assert_eq!(value["change24h"], 0.31);
    assert_eq!(value["volume24h"], 125_000.0);
    assert_eq!(value["source"], "Yahoo Finance");
    assert!(value.get("lastUpdated").is_some());
    // Absent optionals are omitted, not serialized as null.
    assert!(value.get("marketCap").is_none());
}

#[test]
fn source_labels_round_trip() {
    for source in [
        QuoteSource::Binance,
        QuoteSource::Polygon,
        QuoteSource::YahooFinance,
        QuoteSource::CoinGecko,
        QuoteSource::Mock,
    ] {
        let json = serde_json::to_string(&source).unwrap();
        let back: QuoteSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
        assert_eq!(json, format!("\"{}\"", source.as_str()));
    }
    assert!(QuoteSource::Mock.is_synthetic());
    assert!(!QuoteSource::Binance.is_synthetic());
}

#[test]
fn round_to_matches_asset_precision() {
    assert_eq!(round_to(1.084549, 4), 1.0845);
    assert_eq!(round_to(2.346, 2), 2.35);
    assert_eq!(round_to(-3.14159, 2), -3.14);
}
