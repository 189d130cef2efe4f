use yfquotes_api::types::{FxQuote, Quote, QuoteEnvelope, StockQuote};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_envelope() {
    let json = load_fixture("quotes.json");
    let envelope: QuoteEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(envelope.quote_response.result.len(), 2);
    assert!(envelope.quote_response.error.is_none());
}

#[test]
fn deserialize_stock_quote_full() {
    let json = load_fixture("quotes.json");
    let envelope: QuoteEnvelope = serde_json::from_str(&json).unwrap();
    let apple: StockQuote = serde_json::from_value(envelope.quote_response.result[0].clone()).unwrap();

    assert_eq!(apple.symbol(), "AAPL");
    assert_eq!(apple.display_name(), Some("Apple Inc."));
    assert_eq!(apple.currency.as_deref(), Some("USD"));
    assert_eq!(apple.full_exchange_name.as_deref(), Some("NasdaqGS"));
    assert_eq!(apple.quote_type.as_deref(), Some("EQUITY"));
    assert_eq!(apple.market_state.as_deref(), Some("REGULAR"));
    assert_eq!(apple.regular_market_price, Some(189.84));
    assert_eq!(apple.regular_market_change_percent, Some(0.6415));
    assert_eq!(apple.regular_market_volume, Some(52845300));
    assert_eq!(apple.market_cap, Some(2911045648384));
    assert_eq!(apple.fifty_two_week_high, Some(199.62));
    assert_eq!(
        apple.regular_market_time.map(|t| t.to_rfc3339()),
        Some("2024-06-15T00:00:00+00:00".to_string())
    );
}

#[test]
fn deserialize_stock_quote_sparse() {
    let json = load_fixture("quotes.json");
    let envelope: QuoteEnvelope = serde_json::from_str(&json).unwrap();
    let msft: StockQuote = serde_json::from_value(envelope.quote_response.result[1].clone()).unwrap();

    assert_eq!(msft.symbol, "MSFT");
    assert_eq!(msft.long_name, None);
    assert_eq!(msft.display_name(), Some("Microsoft Corporation"));
    assert_eq!(msft.regular_market_open, None);
    assert_eq!(msft.bid, None);
}

#[test]
fn deserialize_fx_quotes() {
    let json = load_fixture("fx.json");
    let envelope: QuoteEnvelope = serde_json::from_str(&json).unwrap();
    let pairs: Vec<FxQuote> = envelope
        .quote_response
        .result
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].symbol(), "EURUSD=X");
    assert_eq!(pairs[0].regular_market_price, 1.0842);
    assert_eq!(pairs[1].currency.as_deref(), Some("JPY"));
}

#[test]
fn envelope_without_result_is_error() {
    let json = r#"{"quoteResponse": {"error": null}}"#;
    assert!(serde_json::from_str::<QuoteEnvelope>(json).is_err());
}

#[test]
fn envelope_with_wrong_top_level_key_is_error() {
    let json = r#"{"finance": {"result": []}}"#;
    assert!(serde_json::from_str::<QuoteEnvelope>(json).is_err());
}

#[test]
fn stock_quote_round_trips_through_json() {
    let json = load_fixture("quotes.json");
    let envelope: QuoteEnvelope = serde_json::from_str(&json).unwrap();
    let apple: StockQuote = serde_json::from_value(envelope.quote_response.result[0].clone()).unwrap();

    let encoded = serde_json::to_string(&apple).unwrap();
    let decoded: StockQuote = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, apple);
}
