//! Command Line Interface for the concentrated liquidity share vault.
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

mod quote;
mod simulate;

#[derive(Parser)]
#[command(name = "clmm-vault")]
#[command(about = "Fractionalized concentrated liquidity vault simulator", long_about = None)]
struct Cli {
    /// Log vault operations at info level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a vault through deposits, fee accrual, compounding and a full exit
    Simulate(simulate::SimulateArgs),
    /// Quote liquidity and paired amounts for a range at a price
    Quote(quote::QuoteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Simulate(args) => simulate::run(args).await,
        Commands::Quote(args) => quote::run(args),
    }
}
