use clap::Args;
use serde_json::Value;

use deal_engine_core::flip::{calculate_flip_returns, FlipInputs};
use deal_engine_core::normalize::{parse_percent, parse_price};
use deal_engine_core::types::LoanType;

use crate::input;

/// Arguments for fix-and-flip analysis
#[derive(Args)]
pub struct FlipArgs {
    /// Purchase price; accepts "$300,000" style formatting
    #[arg(long)]
    pub price: Option<String>,

    /// Renovation budget
    #[arg(long)]
    pub renovation: Option<String>,

    /// Expected after-repair value
    #[arg(long)]
    pub arv: Option<String>,

    /// Holding period in months
    #[arg(long, default_value_t = 6)]
    pub months: u32,

    /// Down payment percent (10 means 10%)
    #[arg(long)]
    pub down_payment: Option<String>,

    /// Interest rate percent (12 means 12%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Loan shape: hard-money or conventional
    #[arg(long)]
    pub loan_type: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_flip(args: FlipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: FlipInputs = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let price = parse_price(args.price.as_deref());
        let renovation = parse_price(args.renovation.as_deref());
        let arv = parse_price(args.arv.as_deref());

        let mut inputs = FlipInputs::with_defaults(price, renovation, arv, args.months);
        if args.down_payment.is_some() {
            inputs.down_payment_percent = parse_percent(args.down_payment.as_deref());
        }
        if args.rate.is_some() {
            inputs.interest_rate = parse_percent(args.rate.as_deref());
        }
        if let Some(ref loan_type) = args.loan_type {
            inputs.loan_type = loan_type.parse::<LoanType>()?;
        }
        inputs
    };

    let result = calculate_flip_returns(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
