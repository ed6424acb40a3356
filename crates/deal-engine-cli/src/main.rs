mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::brrrr::BrrrrArgs;
use commands::estimators::{ArvArgs, MortgageArgs, RehabArgs};
use commands::financing::{ClosingCostsArgs, DefaultsArgs, RateBandArgs};
use commands::flip::FlipArgs;

/// Residential real estate deal-return calculations
#[derive(Parser)]
#[command(
    name = "deal",
    version,
    about = "Residential real estate deal-return calculations",
    long_about = "A CLI for computing investment returns on residential real estate \
                  deals with decimal precision. Supports fix-and-flip economics, \
                  BRRRR phase analysis, rehab budgeting, ARV estimation, mortgage \
                  amortization, and strategy financing defaults."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full fix-and-flip deal economics
    Flip(FlipArgs),
    /// BRRRR three-phase capital-recovery analysis
    Brrrr(BrrrrArgs),
    /// Renovation budget range from floor area and scope
    Rehab(RehabArgs),
    /// After-repair value from comparables or AVM uplift
    Arv(ArvArgs),
    /// Monthly payment for a loan shape
    Mortgage(MortgageArgs),
    /// Financing assumptions for a strategy
    FinancingDefaults(DefaultsArgs),
    /// Interest-rate band for a strategy and property type
    RateBand(RateBandArgs),
    /// Closing-cost breakdown at a purchase price
    ClosingCosts(ClosingCostsArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Flip(args) => commands::flip::run_flip(args),
        Commands::Brrrr(args) => commands::brrrr::run_brrrr(args),
        Commands::Rehab(args) => commands::estimators::run_rehab(args),
        Commands::Arv(args) => commands::estimators::run_arv(args),
        Commands::Mortgage(args) => commands::estimators::run_mortgage(args),
        Commands::FinancingDefaults(args) => commands::financing::run_defaults(args),
        Commands::RateBand(args) => commands::financing::run_rate_band(args),
        Commands::ClosingCosts(args) => commands::financing::run_closing_costs(args),
        Commands::Version => {
            println!("deal {}", env!("CARGO_PKG_VERSION"));
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
