use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use deal_engine_core::amortization::monthly_mortgage_payment;
use deal_engine_core::arv::{estimate_arv, ArvInput};
use deal_engine_core::normalize::{parse_percent, parse_price};
use deal_engine_core::rehab::estimate_rehab_costs;
use deal_engine_core::types::{LoanType, RenovationLevel, Strategy};

use crate::input;

/// Arguments for rehab budget estimation
#[derive(Args)]
pub struct RehabArgs {
    /// Floor area in square feet
    #[arg(long)]
    pub sqft: Decimal,

    /// Renovation scope: none, light, medium, heavy, gut
    #[arg(long, default_value = "medium")]
    pub level: String,
}

/// Arguments for ARV estimation
#[derive(Args)]
pub struct ArvArgs {
    /// Subject floor area in square feet
    #[arg(long)]
    pub sqft: Option<Decimal>,

    /// Purchase price; accepts "$300,000" style formatting
    #[arg(long)]
    pub price: Option<String>,

    /// Automated-valuation-model estimate of current value
    #[arg(long)]
    pub avm: Option<String>,

    /// Renovation scope: none, light, medium, heavy, gut
    #[arg(long, default_value = "medium")]
    pub level: String,

    /// Strategy: flip, brrrr, rental, house-hack, commercial
    #[arg(long, default_value = "flip")]
    pub strategy: String,

    /// Path to JSON input file with comparables (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a single mortgage payment calculation
#[derive(Args)]
pub struct MortgageArgs {
    /// Loan principal; accepts "$225,000" style formatting
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate percent (7 means 7%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Term in years
    #[arg(long, default_value = "30")]
    pub term: Decimal,

    /// Loan shape: hard-money or conventional
    #[arg(long, default_value = "conventional")]
    pub loan_type: String,

    /// Renovation holdback accruing interest (hard money only)
    #[arg(long)]
    pub rehab: Option<String>,
}

pub fn run_rehab(args: RehabArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let level = args.level.parse::<RenovationLevel>()?;
    let estimate = estimate_rehab_costs(args.sqft, level);
    Ok(serde_json::to_value(estimate)?)
}

pub fn run_arv(args: ArvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let arv_input: ArvInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ArvInput {
            subject_sqft: args.sqft.unwrap_or_default(),
            purchase_price: parse_price(args.price.as_deref()),
            comparables: Vec::new(),
            avm_value: args.avm.as_deref().map(|avm| parse_price(Some(avm))),
            renovation_level: args.level.parse::<RenovationLevel>()?,
            strategy: args.strategy.parse::<Strategy>()?,
        }
    };

    let result = estimate_arv(&arv_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_type = args.loan_type.parse::<LoanType>()?;
    let payment = monthly_mortgage_payment(
        parse_price(args.principal.as_deref()),
        parse_percent(args.rate.as_deref()),
        args.term,
        loan_type,
        parse_price(args.rehab.as_deref()),
    );
    Ok(serde_json::json!({ "monthly_payment": payment }))
}
