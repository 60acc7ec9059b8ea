mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AssessArgs;
use commands::amortization::{MaxPriceArgs, PaymentArgs};
use commands::underwriting::{DtiArgs, MipArgs, NextBandArgs, PmiArgs, RateArgs};

/// Mortgage affordability estimates with decimal precision
#[derive(Parser)]
#[command(
    name = "afford",
    version,
    about = "Mortgage affordability estimates with decimal precision",
    long_about = "A CLI for estimating how much home a buyer can afford. Applies FICO and \
                  LTV rate adjustments, DTI limits and mortgage insurance schedules, solves \
                  for the maximum purchase price and suggests what-if improvements."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Market assumptions file (YAML or JSON) supplying fallback rates, tax and insurance
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full affordability assessment with what-if scenarios
    Assess(AssessArgs),
    /// Adjusted interest rate from a base quote, FICO and LTV
    AdjustedRate(RateArgs),
    /// Maximum debt-to-income ratio
    MaxDti(DtiArgs),
    /// FHA upfront and annual mortgage insurance premium rates
    FhaMip(MipArgs),
    /// Conventional PMI rate estimate
    Pmi(PmiArgs),
    /// Monthly payment for a fixed-rate loan
    Payment(PaymentArgs),
    /// Maximum purchase price a DTI budget supports
    MaxPrice(MaxPriceArgs),
    /// Next more-favourable FICO or LTV band
    NextBand(NextBandArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::affordability::run_assess(args, cli.config.as_deref()),
        Commands::AdjustedRate(args) => commands::underwriting::run_adjusted_rate(args),
        Commands::MaxDti(args) => commands::underwriting::run_max_dti(args),
        Commands::FhaMip(args) => commands::underwriting::run_fha_mip(args),
        Commands::Pmi(args) => commands::underwriting::run_pmi(args),
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::MaxPrice(args) => commands::amortization::run_max_price(args),
        Commands::NextBand(args) => commands::underwriting::run_next_band(args),
        Commands::Version => {
            println!("afford {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
