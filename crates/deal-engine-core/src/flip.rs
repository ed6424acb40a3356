use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::interest_only_payment;
use crate::financing::{closing_costs, simple_financing_defaults, ClosingCostBreakdown};
use crate::normalize::{sanitize_money, sanitize_percent};
use crate::types::{
    round_currency, round_percent, with_metadata, ComputationOutput, LoanType, Money, Percent,
    Strategy,
};
use crate::validation::{
    check_down_payment, check_flip_holding_period, check_interest_rate, check_purchase_price,
    ValidationReport,
};
use crate::DealEngineResult;

/// Realtor commission plus seller-paid closing, applied to the sale price.
const SELLING_COSTS_PERCENT: Percent = Percent(dec!(8));

/// Annual property tax and insurance carrying proxy, as a percent of the
/// purchase price.
const DEFAULT_TAX_INSURANCE_PERCENT: Percent = Percent(dec!(1.5));

const THIN_MARGIN_PERCENT: Decimal = dec!(10);
const HIGH_LOAN_TO_COST_PERCENT: Decimal = dec!(85);

/// Inputs for a fix-and-flip analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipInputs {
    pub purchase_price: Money,
    pub renovation_costs: Money,
    pub arv: Money,
    pub holding_period_months: u32,
    pub down_payment_percent: Percent,
    pub interest_rate: Percent,
    pub loan_term_years: Decimal,
    pub loan_type: LoanType,
    pub lender_points_percent: Percent,
    pub other_closing_costs_percent: Percent,
    #[serde(default = "default_tax_insurance")]
    pub annual_tax_insurance_percent: Percent,
}

fn default_tax_insurance() -> Percent {
    DEFAULT_TAX_INSURANCE_PERCENT
}

impl FlipInputs {
    /// Seed financing fields from the hard-money defaults for the flip
    /// strategy.
    pub fn with_defaults(
        purchase_price: Money,
        renovation_costs: Money,
        arv: Money,
        holding_period_months: u32,
    ) -> Self {
        let defaults = simple_financing_defaults(Strategy::Flip);
        FlipInputs {
            purchase_price,
            renovation_costs,
            arv,
            holding_period_months,
            down_payment_percent: defaults.down_payment_percent,
            interest_rate: defaults.interest_rate,
            loan_term_years: defaults.loan_term_years,
            loan_type: defaults.financing_type,
            lender_points_percent: defaults.lender_points_percent,
            other_closing_costs_percent: Percent(
                defaults.total_closing_costs_percent.value()
                    - defaults.lender_points_percent.value(),
            ),
            annual_tax_insurance_percent: DEFAULT_TAX_INSURANCE_PERCENT,
        }
    }
}

/// Full fix-and-flip economics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipResult {
    pub down_payment: Money,
    pub acquisition_loan: Money,
    /// Lender-funded renovation draw, hard-money loans only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rehab_holdback: Option<Money>,
    pub closing_costs: ClosingCostBreakdown,
    pub monthly_carrying_cost: Money,
    pub holding_costs: Money,
    pub selling_costs: Money,
    pub cash_required: Money,
    pub total_investment: Money,
    pub total_project_cost: Money,
    pub net_profit: Money,
    /// Return on cash actually invested, not total project cost.
    pub roi: Percent,
    pub profit_margin: Percent,
    pub validation: ValidationReport,
}

/// Compute full fix-and-flip economics.
///
/// Business-edge cases (ARV below purchase price, zero cash required) are
/// reported through the embedded [`ValidationReport`]; the numbers are still
/// computed best-effort so a caller can show why the deal fails.
pub fn calculate_flip_returns(
    inputs: &FlipInputs,
) -> DealEngineResult<ComputationOutput<FlipResult>> {
    let start = Instant::now();
    let mut validation = ValidationReport::new();

    let purchase_price = sanitize_money(inputs.purchase_price);
    let renovation_costs = sanitize_money(inputs.renovation_costs);
    let arv = sanitize_money(inputs.arv);
    let down_payment_percent = sanitize_percent(inputs.down_payment_percent);
    let interest_rate = sanitize_percent(inputs.interest_rate);

    check_purchase_price(purchase_price, &mut validation);
    check_flip_holding_period(inputs.holding_period_months, &mut validation);
    check_interest_rate(interest_rate, &mut validation);
    check_down_payment(down_payment_percent, &mut validation);

    // --- Acquisition structure ---
    let down_payment = round_currency(down_payment_percent.of(purchase_price));
    let acquisition_loan = purchase_price - down_payment;

    let closing = closing_costs(
        purchase_price,
        sanitize_percent(inputs.lender_points_percent),
        sanitize_percent(inputs.other_closing_costs_percent),
    );

    // Hard money funds the renovation through a holdback, so it accrues
    // interest but stays out of cash required. Conventional deals pay for
    // the renovation in cash.
    let (rehab_holdback, total_loan, cash_required) = match inputs.loan_type {
        LoanType::HardMoney => (
            Some(renovation_costs),
            acquisition_loan + renovation_costs,
            down_payment + closing.total,
        ),
        LoanType::Conventional => (
            None,
            acquisition_loan,
            down_payment + closing.total + renovation_costs,
        ),
    };

    // --- Carry ---
    let tax_insurance_monthly =
        sanitize_percent(inputs.annual_tax_insurance_percent).of(purchase_price) / dec!(12);
    let monthly_carrying_cost =
        round_currency(interest_only_payment(total_loan, interest_rate) + tax_insurance_monthly);
    let holding_costs = monthly_carrying_cost * Decimal::from(inputs.holding_period_months);

    // --- Exit ---
    let selling_costs = round_currency(SELLING_COSTS_PERCENT.of(arv));
    let total_project_cost =
        purchase_price + renovation_costs + closing.total + holding_costs + selling_costs;
    let net_profit = arv - total_project_cost;
    let total_investment = cash_required + holding_costs;

    if arv <= purchase_price {
        validation.error(format!(
            "ARV of {arv} does not exceed the purchase price of {purchase_price} — no value to capture at sale"
        ));
    }
    if cash_required <= Decimal::ZERO {
        validation.error("Cash required is not positive — financing structure is inconsistent");
    }

    let roi = if cash_required > Decimal::ZERO {
        round_percent(Percent(net_profit / cash_required * dec!(100)))
    } else {
        Percent::ZERO
    };

    let profit_margin = if arv > Decimal::ZERO {
        round_percent(Percent(net_profit / arv * dec!(100)))
    } else {
        Percent::ZERO
    };

    if arv > Decimal::ZERO && profit_margin.value() < THIN_MARGIN_PERCENT {
        validation.warn(format!(
            "Profit margin of {}% is below 10% — thin cushion against overruns",
            profit_margin.value()
        ));
    }

    let project_cost_basis = purchase_price + renovation_costs;
    if project_cost_basis > Decimal::ZERO {
        let loan_to_cost = round_percent(Percent(total_loan / project_cost_basis * dec!(100)));
        if loan_to_cost.value() > HIGH_LOAN_TO_COST_PERCENT {
            validation.warn(format!(
                "Loan-to-cost of {}% exceeds 85% — little room for resale slippage",
                loan_to_cost.value()
            ));
        }
    }

    let result = FlipResult {
        down_payment,
        acquisition_loan,
        rehab_holdback,
        closing_costs: closing,
        monthly_carrying_cost,
        holding_costs,
        selling_costs,
        cash_required,
        total_investment,
        total_project_cost,
        net_profit,
        roi,
        profit_margin,
        validation: validation.clone(),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fix-and-Flip Return Analysis",
        inputs,
        validation.warnings,
        elapsed,
        result,
    ))
}
