use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{interest_only_payment, monthly_mortgage_payment};
use crate::financing::simple_financing_defaults;
use crate::normalize::{sanitize_money, sanitize_percent};
use crate::types::{
    round_currency, round_percent, with_metadata, CashOnCash, ComputationOutput, LoanType, Money,
    Percent, Strategy,
};
use crate::validation::{
    check_down_payment, check_interest_rate, check_purchase_price, check_renovation_period,
    ValidationReport,
};
use crate::DealEngineResult;

const TIMELINE_YEARS: u32 = 5;

/// Percentage-of-rent and carrying assumptions for the rental phase.
/// Configurable table, not an underwriting rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingAssumptions {
    pub maintenance_percent: Percent,
    pub management_percent: Percent,
    pub vacancy_percent: Percent,
    /// Annual property tax and insurance proxy, as a percent of property
    /// value (purchase price pre-refinance, ARV after).
    pub annual_tax_insurance_percent: Percent,
    pub annual_rent_growth: Percent,
}

impl Default for OperatingAssumptions {
    fn default() -> Self {
        OperatingAssumptions {
            maintenance_percent: Percent(dec!(8)),
            management_percent: Percent(dec!(9)),
            vacancy_percent: Percent(dec!(5)),
            annual_tax_insurance_percent: Percent(dec!(1.5)),
            annual_rent_growth: Percent(dec!(2)),
        }
    }
}

impl OperatingAssumptions {
    fn percent_of_rent(&self) -> Decimal {
        (self.maintenance_percent.value()
            + self.management_percent.value()
            + self.vacancy_percent.value())
            / dec!(100)
    }
}

/// Inputs for a BRRRR analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrrrrInputs {
    pub purchase_price: Money,
    pub down_payment_percent: Percent,
    /// Rate on the initial (typically hard-money) acquisition loan.
    pub interest_rate: Percent,
    pub renovation_costs: Money,
    pub renovation_months: u32,
    pub arv: Money,
    /// Refinance loan-to-value in the whole-number convention: 75 means 75%.
    pub refinance_ltv: Percent,
    pub refinance_rate: Percent,
    pub refinance_term_years: Decimal,
    pub monthly_rent: Money,
    pub closing_costs_percent: Percent,
    #[serde(default)]
    pub operating: OperatingAssumptions,
}

impl BrrrrInputs {
    /// Seed financing fields from the hard-money defaults for the BRRRR
    /// strategy; refinance assumptions default to a 75% LTV conventional
    /// 30-year loan at 7%.
    pub fn with_defaults(
        purchase_price: Money,
        renovation_costs: Money,
        arv: Money,
        monthly_rent: Money,
    ) -> Self {
        let defaults = simple_financing_defaults(Strategy::Brrrr);
        BrrrrInputs {
            purchase_price,
            down_payment_percent: defaults.down_payment_percent,
            interest_rate: defaults.interest_rate,
            renovation_costs,
            renovation_months: 6,
            arv,
            refinance_ltv: Percent(dec!(75)),
            refinance_rate: Percent(dec!(7)),
            refinance_term_years: dec!(30),
            monthly_rent,
            closing_costs_percent: Percent(dec!(3)),
            operating: OperatingAssumptions::default(),
        }
    }
}

/// Buy and rehab: cash going into the deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrrrrPhase1 {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub initial_loan_amount: Money,
    pub renovation_costs: Money,
    pub renovation_months: u32,
    pub closing_costs: Money,
    pub monthly_holding_costs: Money,
    pub total_holding_costs: Money,
    pub total_cash_invested: Money,
}

/// Refinance: capital coming back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrrrrPhase2 {
    pub arv: Money,
    pub refinance_ltv: Percent,
    pub refinance_amount: Money,
    pub initial_loan_payoff: Money,
    /// May be negative: the refinance did not fully retire the initial
    /// loan. Surfaced as a warning, never clamped.
    pub cash_returned: Money,
    pub cash_left_in_deal: Money,
    /// Uncapped; over 100% means the refinance returned more than was
    /// invested.
    pub capital_recovery_percent: Percent,
}

/// Rent: the stabilized hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrrrrPhase3 {
    pub monthly_rent: Money,
    pub new_loan_payment: Money,
    pub monthly_operating_expenses: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub annual_noi: Money,
    pub cap_rate: Percent,
    pub cash_on_cash_return: CashOnCash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrrrrSummary {
    /// Five-year cumulative return on the cash originally invested.
    pub total_roi: Percent,
    pub is_infinite_return: bool,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: u32,
    pub description: String,
    pub cash_flow: Money,
}

/// Three computed phases plus a projection. The phases are arithmetic over
/// one input snapshot, not a state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrrrrResult {
    pub phase1: BrrrrPhase1,
    pub phase2: BrrrrPhase2,
    pub phase3: BrrrrPhase3,
    pub summary: BrrrrSummary,
    pub timeline: Vec<TimelineEntry>,
    pub validation: ValidationReport,
}

/// Compute the BRRRR capital-recovery model in a single pass.
///
/// The cash-on-cash sentinel: once `cash_left_in_deal` is zero or negative,
/// any non-negative annual cash flow is an unbounded return on the capital
/// that remains, reported as [`CashOnCash::PositiveInfinite`]; a negative
/// flow in that position is [`CashOnCash::NegativeInfinite`]. Both are
/// correctly computed outcomes, not errors.
pub fn calculate_brrrr(inputs: &BrrrrInputs) -> DealEngineResult<ComputationOutput<BrrrrResult>> {
    let start = Instant::now();
    let mut validation = ValidationReport::new();

    let purchase_price = sanitize_money(inputs.purchase_price);
    let renovation_costs = sanitize_money(inputs.renovation_costs);
    let arv = sanitize_money(inputs.arv);
    let monthly_rent = sanitize_money(inputs.monthly_rent);
    let down_payment_percent = sanitize_percent(inputs.down_payment_percent);
    let interest_rate = sanitize_percent(inputs.interest_rate);
    let refinance_rate = sanitize_percent(inputs.refinance_rate);
    let refinance_ltv = sanitize_percent(inputs.refinance_ltv);
    let operating = &inputs.operating;

    check_purchase_price(purchase_price, &mut validation);
    check_renovation_period(inputs.renovation_months, &mut validation);
    check_interest_rate(interest_rate, &mut validation);
    check_interest_rate(refinance_rate, &mut validation);
    check_down_payment(down_payment_percent, &mut validation);

    if monthly_rent.is_zero() {
        validation.warn("Monthly rent is zero — the rental phase cannot carry the property");
    }

    // --- Phase 1: buy and rehab ---
    let down_payment = round_currency(down_payment_percent.of(purchase_price));
    let initial_loan_amount = purchase_price - down_payment;
    let closing = round_currency(sanitize_percent(inputs.closing_costs_percent).of(purchase_price));

    let tax_insurance_monthly =
        sanitize_percent(operating.annual_tax_insurance_percent).of(purchase_price) / dec!(12);
    let monthly_holding_costs = round_currency(
        interest_only_payment(initial_loan_amount, interest_rate) + tax_insurance_monthly,
    );
    let total_holding_costs = monthly_holding_costs * Decimal::from(inputs.renovation_months);
    let total_cash_invested = down_payment + renovation_costs + total_holding_costs + closing;

    // --- Phase 2: refinance ---
    // The one boundary that genuinely needs a unit fraction.
    let refinance_amount = round_currency(arv * refinance_ltv.as_fraction());
    let cash_returned = refinance_amount - initial_loan_amount;
    let cash_left_in_deal = total_cash_invested - cash_returned;

    if cash_returned < Decimal::ZERO {
        validation.warn(format!(
            "Refinance proceeds of {refinance_amount} do not retire the initial loan of \
             {initial_loan_amount} — the {} shortfall stays in the deal",
            -cash_returned
        ));
    }

    let capital_recovery_percent = if total_cash_invested > Decimal::ZERO {
        round_percent(Percent(cash_returned / total_cash_invested * dec!(100)))
    } else {
        Percent::ZERO
    };

    // --- Phase 3: rent and hold ---
    let new_loan_payment = monthly_mortgage_payment(
        refinance_amount,
        refinance_rate,
        inputs.refinance_term_years,
        LoanType::Conventional,
        Decimal::ZERO,
    );

    let stabilized_tax_insurance_monthly =
        sanitize_percent(operating.annual_tax_insurance_percent).of(arv) / dec!(12);
    let monthly_operating_expenses =
        monthly_rent * operating.percent_of_rent() + stabilized_tax_insurance_monthly;

    let monthly_cash_flow = monthly_rent - new_loan_payment - monthly_operating_expenses;
    let annual_cash_flow = round_currency(monthly_cash_flow * dec!(12));
    let annual_noi = round_currency((monthly_rent - monthly_operating_expenses) * dec!(12));

    let cap_rate = if arv > Decimal::ZERO {
        round_percent(Percent(annual_noi / arv * dec!(100)))
    } else {
        Percent::ZERO
    };

    let cash_on_cash_return = if cash_left_in_deal <= Decimal::ZERO {
        if annual_cash_flow >= Decimal::ZERO {
            CashOnCash::PositiveInfinite
        } else {
            CashOnCash::NegativeInfinite
        }
    } else {
        round_percent_coc(annual_cash_flow / cash_left_in_deal * dec!(100))
    };

    // --- Summary and projection ---
    let is_infinite_return = cash_on_cash_return == CashOnCash::PositiveInfinite;

    let total_roi = if total_cash_invested > Decimal::ZERO {
        round_percent(Percent(
            (cash_returned + annual_cash_flow * Decimal::from(TIMELINE_YEARS))
                / total_cash_invested
                * dec!(100),
        ))
    } else {
        Percent::ZERO
    };

    let recommendation = build_recommendation(
        capital_recovery_percent.value(),
        monthly_cash_flow,
        cash_left_in_deal,
    );

    let timeline = build_timeline(
        monthly_rent,
        new_loan_payment,
        stabilized_tax_insurance_monthly,
        operating,
    );

    let result = BrrrrResult {
        phase1: BrrrrPhase1 {
            purchase_price,
            down_payment,
            initial_loan_amount,
            renovation_costs,
            renovation_months: inputs.renovation_months,
            closing_costs: closing,
            monthly_holding_costs,
            total_holding_costs,
            total_cash_invested,
        },
        phase2: BrrrrPhase2 {
            arv,
            refinance_ltv,
            refinance_amount,
            initial_loan_payoff: initial_loan_amount,
            cash_returned,
            cash_left_in_deal,
            capital_recovery_percent,
        },
        phase3: BrrrrPhase3 {
            monthly_rent,
            new_loan_payment,
            monthly_operating_expenses: round_currency(monthly_operating_expenses),
            monthly_cash_flow: round_currency(monthly_cash_flow),
            annual_cash_flow,
            annual_noi,
            cap_rate,
            cash_on_cash_return,
        },
        summary: BrrrrSummary {
            total_roi,
            is_infinite_return,
            recommendation,
        },
        timeline,
        validation: validation.clone(),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "BRRRR Three-Phase Capital Recovery Analysis",
        inputs,
        validation.warnings,
        elapsed,
        result,
    ))
}

fn round_percent_coc(value: Decimal) -> CashOnCash {
    CashOnCash::Finite(round_percent(Percent(value)))
}

fn build_recommendation(
    capital_recovery: Decimal,
    monthly_cash_flow: Money,
    cash_left_in_deal: Money,
) -> String {
    if monthly_cash_flow < Decimal::ZERO {
        "Negative monthly cash flow after refinance — the deal depends entirely on appreciation; \
         consider a lower refinance LTV or higher rent"
            .into()
    } else if cash_left_in_deal <= Decimal::ZERO {
        "All invested capital recovered at refinance with the property cash flowing — the model \
         BRRRR outcome; capital is free to redeploy"
            .into()
    } else if capital_recovery >= dec!(75) {
        format!(
            "Recovers {capital_recovery}% of invested capital with positive cash flow — strong \
             candidate"
        )
    } else if capital_recovery >= dec!(50) {
        format!(
            "Recovers {capital_recovery}% of invested capital — workable, but a meaningful share \
             stays tied up in the deal"
        )
    } else {
        format!(
            "Only {capital_recovery}% of invested capital recovered at refinance — this performs \
             closer to a conventional rental than a BRRRR"
        )
    }
}

fn build_timeline(
    monthly_rent: Money,
    new_loan_payment: Money,
    tax_insurance_monthly: Money,
    operating: &OperatingAssumptions,
) -> Vec<TimelineEntry> {
    let growth = Decimal::ONE + operating.annual_rent_growth.as_fraction();
    let percent_of_rent = operating.percent_of_rent();

    let mut timeline = Vec::with_capacity(TIMELINE_YEARS as usize);
    let mut rent = monthly_rent;

    for year in 1..=TIMELINE_YEARS {
        if year > 1 {
            rent *= growth;
        }
        let operating_expenses = rent * percent_of_rent + tax_insurance_monthly;
        let cash_flow = round_currency((rent - new_loan_payment - operating_expenses) * dec!(12));

        let description = match year {
            1 => "Refinance complete; property rented at stabilized market rent".to_string(),
            y if y == TIMELINE_YEARS => {
                "Equity position supports repeating the cycle on the next property".to_string()
            }
            _ => format!(
                "Rent grown {}% annually; refinance payment fixed",
                operating.annual_rent_growth.value()
            ),
        };

        timeline.push(TimelineEntry {
            year,
            description,
            cash_flow,
        });
    }

    timeline
}
