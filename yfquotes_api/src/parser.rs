//! Per-element parsing of the `quoteResponse.result` array.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{FxQuote, StockQuote};

/// Why a single result element was skipped.
#[derive(thiserror::Error, Debug)]
pub enum ElementError {
    #[error("element is not a JSON object")]
    NotAnObject,
    #[error("malformed element: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns one raw result element into a typed quote.
pub trait ElementParser {
    type Output;

    fn parse(&self, element: &Value) -> Result<Self::Output, ElementError>;
}

/// Parses equity/ETF/index elements into [`StockQuote`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StockQuoteParser;

impl ElementParser for StockQuoteParser {
    type Output = StockQuote;

    fn parse(&self, element: &Value) -> Result<StockQuote, ElementError> {
        from_object(element)
    }
}

/// Parses currency pair elements into [`FxQuote`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FxQuoteParser;

impl ElementParser for FxQuoteParser {
    type Output = FxQuote;

    fn parse(&self, element: &Value) -> Result<FxQuote, ElementError> {
        from_object(element)
    }
}

fn from_object<T: DeserializeOwned>(element: &Value) -> Result<T, ElementError> {
    if !element.is_object() {
        return Err(ElementError::NotAnObject);
    }
    Ok(T::deserialize(element)?)
}

/// Parses every element, keeping the ones that parse and logging the rest.
pub(crate) fn parse_elements<P: ElementParser>(parser: &P, elements: &[Value]) -> Vec<P::Output> {
    let parsed: Vec<P::Output> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| match parser.parse(element) {
            Ok(quote) => Some(quote),
            Err(e) => {
                let symbol = element
                    .get("symbol")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>");
                tracing::warn!("Skipping result {} ({}): {}", index, symbol, e);
                None
            }
        })
        .collect();

    if parsed.len() < elements.len() {
        tracing::debug!(
            "Parsed {} of {} result elements",
            parsed.len(),
            elements.len()
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_parser_accepts_minimal_element() {
        let quote = StockQuoteParser.parse(&json!({"symbol": "AAPL"})).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.regular_market_price, None);
    }

    #[test]
    fn stock_parser_rejects_missing_symbol() {
        let result = StockQuoteParser.parse(&json!({"regularMarketPrice": 1.0}));
        assert!(matches!(result, Err(ElementError::Json(_))));
    }

    #[test]
    fn stock_parser_rejects_non_object() {
        let result = StockQuoteParser.parse(&json!("AAPL"));
        assert!(matches!(result, Err(ElementError::NotAnObject)));
        let result = StockQuoteParser.parse(&Value::Null);
        assert!(matches!(result, Err(ElementError::NotAnObject)));
    }

    #[test]
    fn stock_parser_rejects_wrong_types() {
        let result = StockQuoteParser.parse(&json!({"symbol": "AAPL", "regularMarketPrice": "n/a"}));
        assert!(result.is_err());
    }

    #[test]
    fn fx_parser_requires_price() {
        assert!(FxQuoteParser.parse(&json!({"symbol": "EURUSD=X"})).is_err());
        let quote = FxQuoteParser
            .parse(&json!({"symbol": "EURUSD=X", "regularMarketPrice": 1.0842, "regularMarketTime": 1718409600}))
            .unwrap();
        assert_eq!(quote.regular_market_price, 1.0842);
        assert_eq!(
            quote.regular_market_time.map(|t| t.timestamp()),
            Some(1718409600)
        );
    }

    #[test]
    fn parse_elements_skips_malformed() {
        let elements = vec![
            json!({"symbol": "AAPL", "regularMarketPrice": 189.5}),
            json!({"symbol": "BAD", "regularMarketPrice": "n/a"}),
            json!({"symbol": "MSFT", "regularMarketPrice": 420.1}),
        ];
        let quotes = parse_elements(&StockQuoteParser, &elements);
        let symbols: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT"]);
    }

    #[test]
    fn parse_elements_empty() {
        assert!(parse_elements(&FxQuoteParser, &[]).is_empty());
    }
}
