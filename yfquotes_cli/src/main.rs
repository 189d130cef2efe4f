mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use yfquotes_lib::{QuoteClient, Settings};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "yfquotes")]
#[command(about = "Fetch stock and currency quotes from Yahoo Finance")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote one or more ticker symbols
    Quote(commands::quote::QuoteArgs),
    /// Quote one or more currency pairs
    Fx(commands::fx::FxArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yfquotes=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output)?;

    let settings = Settings::from_env()?;
    let client = QuoteClient::new(&settings)?;

    match &cli.command {
        Commands::Quote(args) => commands::quote::run(args, &client, &format).await?,
        Commands::Fx(args) => commands::fx::run(args, &client, &format).await?,
    }

    Ok(())
}
