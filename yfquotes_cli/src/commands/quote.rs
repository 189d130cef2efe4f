use anyhow::Result;
use clap::Args;
use yfquotes_lib::QuoteClient;

use crate::output::{
    print_json, print_quotes_csv, print_quotes_markdown, print_quotes_table, OutputFormat,
};

#[derive(Args)]
pub struct QuoteArgs {
    /// Ticker symbols (e.g. AAPL MSFT ^GSPC BRK-B)
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Only request these quote fields, comma-separated (e.g. regularMarketPrice,currency)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

pub async fn run(args: &QuoteArgs, client: &QuoteClient, format: &OutputFormat) -> Result<()> {
    let fields: Vec<String> = args
        .fields
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    let quotes = client.get_quotes(&args.symbols, &fields).await?;
    if quotes.is_empty() {
        eprintln!("No quotes found for {}", args.symbols.join(", "));
    }

    match format {
        OutputFormat::Table => print_quotes_table(&quotes),
        OutputFormat::Json => print_json(&quotes),
        OutputFormat::Csv => print_quotes_csv(&quotes)?,
        OutputFormat::Markdown => print_quotes_markdown(&quotes),
    }
    Ok(())
}
