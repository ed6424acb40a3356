use clap::Args;
use serde_json::Value;

use deal_engine_core::brrrr::{calculate_brrrr, BrrrrInputs};
use deal_engine_core::normalize::{parse_percent, parse_price};

use crate::input;

/// Arguments for BRRRR analysis
#[derive(Args)]
pub struct BrrrrArgs {
    /// Purchase price; accepts "$150,000" style formatting
    #[arg(long)]
    pub price: Option<String>,

    /// Renovation budget
    #[arg(long)]
    pub renovation: Option<String>,

    /// Renovation period in months
    #[arg(long, default_value_t = 6)]
    pub months: u32,

    /// Expected after-repair value
    #[arg(long)]
    pub arv: Option<String>,

    /// Stabilized monthly rent
    #[arg(long)]
    pub rent: Option<String>,

    /// Down payment percent on the acquisition loan (10 means 10%)
    #[arg(long)]
    pub down_payment: Option<String>,

    /// Acquisition interest rate percent
    #[arg(long)]
    pub rate: Option<String>,

    /// Refinance loan-to-value percent (75 means 75%)
    #[arg(long)]
    pub ltv: Option<String>,

    /// Refinance interest rate percent
    #[arg(long)]
    pub refinance_rate: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_brrrr(args: BrrrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: BrrrrInputs = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let price = parse_price(args.price.as_deref());
        let renovation = parse_price(args.renovation.as_deref());
        let arv = parse_price(args.arv.as_deref());
        let rent = parse_price(args.rent.as_deref());

        let mut inputs = BrrrrInputs::with_defaults(price, renovation, arv, rent);
        inputs.renovation_months = args.months;
        if args.down_payment.is_some() {
            inputs.down_payment_percent = parse_percent(args.down_payment.as_deref());
        }
        if args.rate.is_some() {
            inputs.interest_rate = parse_percent(args.rate.as_deref());
        }
        if args.ltv.is_some() {
            inputs.refinance_ltv = parse_percent(args.ltv.as_deref());
        }
        if args.refinance_rate.is_some() {
            inputs.refinance_rate = parse_percent(args.refinance_rate.as_deref());
        }
        inputs
    };

    let result = calculate_brrrr(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
