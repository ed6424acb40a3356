use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_currency, LoanType, Money, Percent, PropertyType, Strategy};

/// Strategy-specific financing assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingDefaults {
    pub down_payment_percent: Percent,
    pub interest_rate: Percent,
    pub loan_term_years: Decimal,
    pub lender_points_percent: Percent,
    pub total_closing_costs_percent: Percent,
    pub financing_type: LoanType,
}

/// Interest-rate band for a strategy and property shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateBand {
    pub default: Percent,
    pub min: Percent,
    pub max: Percent,
    pub description: String,
}

/// Closing-cost breakdown at a purchase price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingCostBreakdown {
    pub lender_points: Money,
    pub other_costs: Money,
    pub total: Money,
    pub lender_points_percent: Percent,
    pub other_costs_percent: Percent,
    pub total_percent: Percent,
}

/// One fixed row of financing assumptions per strategy. Flip and BRRRR
/// acquisitions assume hard money; everything else assumes conventional.
/// These are configurable starting points, not underwriting rules.
pub fn simple_financing_defaults(strategy: Strategy) -> FinancingDefaults {
    match strategy {
        Strategy::Flip | Strategy::Brrrr => FinancingDefaults {
            down_payment_percent: Percent(dec!(10)),
            interest_rate: Percent(dec!(12)),
            loan_term_years: dec!(1),
            lender_points_percent: Percent(dec!(2.5)),
            total_closing_costs_percent: Percent(dec!(4)),
            financing_type: LoanType::HardMoney,
        },
        Strategy::Rental => FinancingDefaults {
            down_payment_percent: Percent(dec!(20)),
            interest_rate: Percent(dec!(7)),
            loan_term_years: dec!(30),
            lender_points_percent: Percent(dec!(1)),
            total_closing_costs_percent: Percent(dec!(3)),
            financing_type: LoanType::Conventional,
        },
        Strategy::HouseHack => FinancingDefaults {
            down_payment_percent: Percent(dec!(3.5)),
            interest_rate: Percent(dec!(6.75)),
            loan_term_years: dec!(30),
            lender_points_percent: Percent(dec!(1)),
            total_closing_costs_percent: Percent(dec!(3)),
            financing_type: LoanType::Conventional,
        },
        Strategy::Commercial => FinancingDefaults {
            down_payment_percent: Percent(dec!(25)),
            interest_rate: Percent(dec!(7.5)),
            loan_term_years: dec!(30),
            lender_points_percent: Percent(dec!(1)),
            total_closing_costs_percent: Percent(dec!(3)),
            financing_type: LoanType::Conventional,
        },
    }
}

/// Rate band for a strategy, adjusted for property type and unit count.
/// The default always stays inside `[min, max]` because the whole band
/// shifts together.
pub fn strategy_interest_rate(
    strategy: Strategy,
    property_type: PropertyType,
    units: u32,
) -> RateBand {
    let (base_default, base_min, base_max, family) = match strategy {
        Strategy::Flip | Strategy::Brrrr => {
            (dec!(12), dec!(10), dec!(15), "hard-money acquisition")
        }
        Strategy::Rental => (dec!(7), dec!(6.5), dec!(7.75), "conventional investment"),
        Strategy::HouseHack => (dec!(6.75), dec!(6.25), dec!(7.25), "owner-occupied conventional"),
        Strategy::Commercial => (dec!(7.5), dec!(7), dec!(8.5), "commercial"),
    };

    let (shift, shape) = match property_type {
        PropertyType::SingleFamily => (Decimal::ZERO, "single-family".to_string()),
        PropertyType::Condo => (dec!(0.125), "condo".to_string()),
        PropertyType::MultiFamily if units >= 5 => {
            (dec!(0.75), format!("{units}-unit multifamily, priced as small commercial"))
        }
        PropertyType::MultiFamily => (dec!(0.25), format!("{units}-unit multifamily")),
        PropertyType::Commercial => (dec!(0.5), "commercial property".to_string()),
    };

    RateBand {
        default: Percent(base_default + shift),
        min: Percent(base_min + shift),
        max: Percent(base_max + shift),
        description: format!("{family} rate for a {shape}"),
    }
}

/// Break a closing-cost assumption into lender points and everything else.
pub fn closing_costs(
    purchase_price: Money,
    points_percent: Percent,
    other_costs_percent: Percent,
) -> ClosingCostBreakdown {
    let lender_points = round_currency(points_percent.of(purchase_price));
    let other_costs = round_currency(other_costs_percent.of(purchase_price));

    ClosingCostBreakdown {
        lender_points,
        other_costs,
        total: lender_points + other_costs,
        lender_points_percent: points_percent,
        other_costs_percent,
        total_percent: Percent(points_percent.value() + other_costs_percent.value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ALL_STRATEGIES: [Strategy; 5] = [
        Strategy::Flip,
        Strategy::Brrrr,
        Strategy::Rental,
        Strategy::HouseHack,
        Strategy::Commercial,
    ];

    const ALL_PROPERTY_TYPES: [PropertyType; 4] = [
        PropertyType::SingleFamily,
        PropertyType::Condo,
        PropertyType::MultiFamily,
        PropertyType::Commercial,
    ];

    #[test]
    fn test_flip_defaults_are_hard_money() {
        let defaults = simple_financing_defaults(Strategy::Flip);
        assert_eq!(defaults.financing_type, LoanType::HardMoney);
        assert_eq!(defaults.down_payment_percent, Percent(dec!(10)));
        assert_eq!(defaults.loan_term_years, dec!(1));
        assert_eq!(defaults.lender_points_percent, Percent(dec!(2.5)));
    }

    #[test]
    fn test_house_hack_low_down_payment() {
        let defaults = simple_financing_defaults(Strategy::HouseHack);
        assert_eq!(defaults.financing_type, LoanType::Conventional);
        assert_eq!(defaults.down_payment_percent, Percent(dec!(3.5)));
        assert_eq!(defaults.loan_term_years, dec!(30));
    }

    #[test]
    fn test_rate_band_default_within_bounds_everywhere() {
        for strategy in ALL_STRATEGIES {
            for property_type in ALL_PROPERTY_TYPES {
                for units in [1, 2, 4, 5, 12] {
                    let band = strategy_interest_rate(strategy, property_type, units);
                    assert!(
                        band.min <= band.default && band.default <= band.max,
                        "{strategy:?}/{property_type:?}/{units}: {band:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_five_plus_units_priced_above_duplex() {
        let duplex = strategy_interest_rate(Strategy::Rental, PropertyType::MultiFamily, 2);
        let small_apartment =
            strategy_interest_rate(Strategy::Rental, PropertyType::MultiFamily, 8);
        assert!(small_apartment.default > duplex.default);
    }

    #[test]
    fn test_closing_costs_breakdown() {
        let breakdown = closing_costs(dec!(300000), Percent(dec!(2.5)), Percent(dec!(1.5)));
        assert_eq!(breakdown.lender_points, dec!(7500));
        assert_eq!(breakdown.other_costs, dec!(4500));
        assert_eq!(breakdown.total, dec!(12000));
        assert_eq!(breakdown.total_percent, Percent(dec!(4)));
    }

    #[test]
    fn test_closing_costs_zero_price() {
        let breakdown = closing_costs(Decimal::ZERO, Percent(dec!(2.5)), Percent(dec!(1.5)));
        assert_eq!(breakdown.total, Decimal::ZERO);
    }
}
