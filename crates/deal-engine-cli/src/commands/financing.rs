use clap::Args;
use serde_json::Value;

use deal_engine_core::financing::{
    closing_costs, simple_financing_defaults, strategy_interest_rate,
};
use deal_engine_core::normalize::{parse_percent, parse_price};
use deal_engine_core::types::{PropertyType, Strategy};

/// Arguments for strategy financing defaults
#[derive(Args)]
pub struct DefaultsArgs {
    /// Strategy: flip, brrrr, rental, house-hack, commercial
    #[arg(long)]
    pub strategy: String,
}

/// Arguments for the strategy interest-rate band
#[derive(Args)]
pub struct RateBandArgs {
    /// Strategy: flip, brrrr, rental, house-hack, commercial
    #[arg(long)]
    pub strategy: String,

    /// Property type: single-family, condo, multi-family, commercial
    #[arg(long, default_value = "single-family")]
    pub property_type: String,

    /// Unit count
    #[arg(long, default_value_t = 1)]
    pub units: u32,
}

/// Arguments for a closing-cost breakdown
#[derive(Args)]
pub struct ClosingCostsArgs {
    /// Purchase price; accepts "$300,000" style formatting
    #[arg(long)]
    pub price: Option<String>,

    /// Lender points percent (2.5 means 2.5%)
    #[arg(long)]
    pub points: Option<String>,

    /// Other closing costs percent
    #[arg(long)]
    pub other: Option<String>,
}

pub fn run_defaults(args: DefaultsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let strategy = args.strategy.parse::<Strategy>()?;
    Ok(serde_json::to_value(simple_financing_defaults(strategy))?)
}

pub fn run_rate_band(args: RateBandArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let strategy = args.strategy.parse::<Strategy>()?;
    let property_type = args.property_type.parse::<PropertyType>()?;
    let band = strategy_interest_rate(strategy, property_type, args.units);
    Ok(serde_json::to_value(band)?)
}

pub fn run_closing_costs(args: ClosingCostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let breakdown = closing_costs(
        parse_price(args.price.as_deref()),
        parse_percent(args.points.as_deref()),
        parse_percent(args.other.as_deref()),
    );
    Ok(serde_json::to_value(breakdown)?)
}
