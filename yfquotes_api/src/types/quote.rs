use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything keyed by a ticker symbol.
pub trait Quote {
    fn symbol(&self) -> &str;
}

/// Equity, ETF, index or fund quote from the v7 quote endpoint.
///
/// Only `symbol` is required; the service omits fields that do not apply to
/// the instrument.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub full_exchange_name: Option<String>,
    #[serde(default)]
    pub quote_type: Option<String>,
    #[serde(default)]
    pub market_state: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub regular_market_change: Option<f64>,
    #[serde(default)]
    pub regular_market_change_percent: Option<f64>,
    #[serde(default)]
    pub regular_market_open: Option<f64>,
    #[serde(default)]
    pub regular_market_day_high: Option<f64>,
    #[serde(default)]
    pub regular_market_day_low: Option<f64>,
    #[serde(default)]
    pub regular_market_previous_close: Option<f64>,
    #[serde(default)]
    pub regular_market_volume: Option<u64>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub regular_market_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub market_cap: Option<u64>,
    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
}

impl StockQuote {
    /// Long name when present, otherwise the short name.
    pub fn display_name(&self) -> Option<&str> {
        self.long_name.as_deref().or(self.short_name.as_deref())
    }
}

impl Quote for StockQuote {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Currency pair quote (symbols like `EURUSD=X`). A pair without a price is
/// malformed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxQuote {
    pub symbol: String,
    pub regular_market_price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub regular_market_time: Option<DateTime<Utc>>,
}

impl Quote for FxQuote {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}
