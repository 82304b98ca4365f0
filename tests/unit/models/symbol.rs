//! Canonicalization and asset-class detection tests.

use quotelens::models::{AssetClass, CanonicalSymbol};

#[test]
fn known_crypto_tickers_classify_as_crypto_with_usd_pretty_form() {
    for ticker in ["BTC", "ETH", "SOL", "XRP", "ADA", "BNB", "DOGE", "LTC"] {
        let symbol = CanonicalSymbol::parse(ticker).expect("crypto ticker parses");
        assert_eq!(symbol.asset_class(), AssetClass::Crypto, "{ticker}");
        assert!(
            symbol.pretty().ends_with("/USD"),
            "pretty form of {ticker} should end in /USD, got {}",
            symbol.pretty()
        );
    }
}

#[test]
fn usd_suffixed_pairs_classify_as_crypto() {
    let symbol = CanonicalSymbol::parse("BTC-USD").unwrap();
    assert_eq!(symbol.asset_class(), AssetClass::Crypto);
    assert_eq!(symbol.base_coin(), "BTC");
    assert_eq!(symbol.pretty(), "BTC/USD");

    let symbol = CanonicalSymbol::parse("SOLUSDT").unwrap();
    assert_eq!(symbol.asset_class(), AssetClass::Crypto);
    assert_eq!(symbol.base_coin(), "SOL");
}

#[test]
fn six_letter_pairs_classify_as_forex_with_slash_pretty_form() {
    let symbol = CanonicalSymbol::parse("EURUSD").unwrap();
    assert_eq!(symbol.asset_class(), AssetClass::Forex);
    assert_eq!(symbol.pretty(), "EUR/USD");

    let symbol = CanonicalSymbol::parse("gbpjpy").unwrap();
    assert_eq!(symbol.asset_class(), AssetClass::Forex);
    assert_eq!(symbol.pretty(), "GBP/JPY");
}

#[test]
fn six_letter_stock_exceptions_stay_equities() {
    let symbol = CanonicalSymbol::parse("NVIDIA").unwrap();
    assert_eq!(symbol.asset_class(), AssetClass::Equity);
    assert_eq!(symbol.pretty(), "NVIDIA");
}

#[test]
fn index_aliases_collapse_to_canonical_codes() {
    for alias in ["NDX", "NASDAQ", "NASDAQ100", "US100", "NAS100"] {
        let symbol = CanonicalSymbol::parse(alias).expect("index alias parses");
        assert_eq!(symbol.asset_class(), AssetClass::Index, "{alias}");
        assert_eq!(symbol.lookup(), "NDX", "{alias}");
        assert_eq!(symbol.pretty(), "NAS100", "{alias}");
    }

    assert_eq!(CanonicalSymbol::parse("SP500").unwrap().pretty(), "S&P 500");
    assert_eq!(CanonicalSymbol::parse("US30").unwrap().pretty(), "US 30");
    assert_eq!(CanonicalSymbol::parse("VIX").unwrap().pretty(), "VIX");
}

#[test]
fn unknown_tickers_pass_through_as_equities() {
    let symbol = CanonicalSymbol::parse("AAPL").unwrap();
    assert_eq!(symbol.asset_class(), AssetClass::Equity);
    assert_eq!(symbol.lookup(), "AAPL");
    assert_eq!(symbol.pretty(), "AAPL");
}

#[test]
fn input_is_trimmed_uppercased_and_stripped_of_trailing_punctuation() {
    let symbol = CanonicalSymbol::parse("  btc. ").unwrap();
    assert_eq!(symbol.lookup(), "BTC");
    assert_eq!(symbol.asset_class(), AssetClass::Crypto);

    let symbol = CanonicalSymbol::parse("eurusd,").unwrap();
    assert_eq!(symbol.pretty(), "EUR/USD");
}

#[test]
fn empty_or_unusable_input_fails_resolution() {
    assert!(CanonicalSymbol::parse("").is_none());
    assert!(CanonicalSymbol::parse("   ").is_none());
    assert!(CanonicalSymbol::parse("?!.").is_none());
}
