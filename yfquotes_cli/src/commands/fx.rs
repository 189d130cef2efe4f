use anyhow::Result;
use clap::Args;
use yfquotes_lib::QuoteClient;

use crate::output::{print_fx_csv, print_fx_markdown, print_fx_table, print_json, OutputFormat};

#[derive(Args)]
pub struct FxArgs {
    /// Currency pairs as EURUSD, EUR/USD or EURUSD=X
    #[arg(required = true)]
    pub pairs: Vec<String>,
}

pub async fn run(args: &FxArgs, client: &QuoteClient, format: &OutputFormat) -> Result<()> {
    let quotes = client.get_fx_quotes(&args.pairs).await?;
    if quotes.is_empty() {
        eprintln!("No rates found for {}", args.pairs.join(", "));
    }

    match format {
        OutputFormat::Table => print_fx_table(&quotes),
        OutputFormat::Json => print_json(&quotes),
        OutputFormat::Csv => print_fx_csv(&quotes)?,
        OutputFormat::Markdown => print_fx_markdown(&quotes),
    }
    Ok(())
}
