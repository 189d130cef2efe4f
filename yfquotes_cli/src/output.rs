use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use yfquotes_lib::types::{FxQuote, StockQuote};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            other => bail!(
                "unknown output format '{}'. Use table, json, csv or markdown",
                other
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
struct QuoteRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Change %")]
    #[serde(rename = "Change %")]
    change_percent: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Market Cap")]
    #[serde(rename = "Market Cap")]
    market_cap: String,
    #[tabled(rename = "Currency")]
    #[serde(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
}

#[derive(Tabled, Serialize)]
struct FxRow {
    #[tabled(rename = "Pair")]
    #[serde(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Rate")]
    #[serde(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Currency")]
    #[serde(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
}

// -- Row builders --

fn build_quote_rows(quotes: &[StockQuote]) -> Vec<QuoteRow> {
    quotes
        .iter()
        .map(|q| QuoteRow {
            symbol: q.symbol.clone(),
            name: q.display_name().unwrap_or_default().to_string(),
            price: format_price(q.regular_market_price),
            change: q
                .regular_market_change
                .map(|c| format!("{:+.2}", c))
                .unwrap_or_default(),
            change_percent: q
                .regular_market_change_percent
                .map(|c| format!("{:+.2}%", c))
                .unwrap_or_default(),
            volume: q.regular_market_volume.map(format_count).unwrap_or_default(),
            market_cap: q.market_cap.map(format_count).unwrap_or_default(),
            currency: q.currency.clone().unwrap_or_default(),
            time: format_time(q.regular_market_time),
        })
        .collect()
}

fn build_fx_rows(quotes: &[FxQuote]) -> Vec<FxRow> {
    quotes
        .iter()
        .map(|q| FxRow {
            pair: pair_label(&q.symbol),
            rate: format!("{:.4}", q.regular_market_price),
            currency: q.currency.clone().unwrap_or_default(),
            time: format_time(q.regular_market_time),
        })
        .collect()
}

// -- Table output --

pub fn print_quotes_table(quotes: &[StockQuote]) {
    println!("{}", Table::new(build_quote_rows(quotes)));
}

pub fn print_fx_table(quotes: &[FxQuote]) {
    println!("{}", Table::new(build_fx_rows(quotes)));
}

// -- Markdown output --

pub fn print_quotes_markdown(quotes: &[StockQuote]) {
    let mut table = Table::new(build_quote_rows(quotes));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_fx_markdown(quotes: &[FxQuote]) {
    let mut table = Table::new(build_fx_rows(quotes));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_quotes_csv(quotes: &[StockQuote]) -> Result<()> {
    write_csv(build_quote_rows(quotes))
}

pub fn print_fx_csv(quotes: &[FxQuote]) -> Result<()> {
    write_csv(build_fx_rows(quotes))
}

fn write_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_default()
}

fn format_count(value: u64) -> String {
    if value >= 1_000_000_000_000 {
        format!("{:.2}T", value as f64 / 1_000_000_000_000.0)
    } else if value >= 1_000_000_000 {
        format!("{:.2}B", value as f64 / 1_000_000_000.0)
    } else if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

/// `EURUSD=X` -> `EUR/USD`. Anything else is shown as is.
fn pair_label(symbol: &str) -> String {
    match symbol.strip_suffix("=X") {
        Some(bare) if bare.len() == 6 && bare.is_ascii() => {
            format!("{}/{}", &bare[..3], &bare[3..])
        }
        _ => symbol.to_string(),
    }
}
