use deal_engine_core::financing::{
    closing_costs, simple_financing_defaults, strategy_interest_rate,
};
use deal_engine_core::types::{LoanType, Percent, PropertyType, Strategy};
use rust_decimal_macros::dec;

const ALL_STRATEGIES: [Strategy; 5] = [
    Strategy::Flip,
    Strategy::Brrrr,
    Strategy::Rental,
    Strategy::HouseHack,
    Strategy::Commercial,
];

#[test]
fn test_default_rate_always_inside_band() {
    for strategy in ALL_STRATEGIES {
        for property_type in [
            PropertyType::SingleFamily,
            PropertyType::Condo,
            PropertyType::MultiFamily,
            PropertyType::Commercial,
        ] {
            for units in [1u32, 3, 6, 20] {
                let band = strategy_interest_rate(strategy, property_type, units);
                assert!(
                    band.min <= band.default && band.default <= band.max,
                    "{strategy:?} / {property_type:?} / {units} units"
                );
                assert!(!band.description.is_empty());
            }
        }
    }
}

#[test]
fn test_short_term_strategies_use_hard_money() {
    for strategy in [Strategy::Flip, Strategy::Brrrr] {
        let defaults = simple_financing_defaults(strategy);
        assert_eq!(defaults.financing_type, LoanType::HardMoney);
        assert_eq!(defaults.loan_term_years, dec!(1));
        assert!(defaults.interest_rate >= Percent(dec!(10)));
    }
}

#[test]
fn test_hold_strategies_use_conventional_terms() {
    for strategy in [Strategy::Rental, Strategy::HouseHack, Strategy::Commercial] {
        let defaults = simple_financing_defaults(strategy);
        assert_eq!(defaults.financing_type, LoanType::Conventional);
        assert_eq!(defaults.loan_term_years, dec!(30));
        assert!(defaults.interest_rate < Percent(dec!(10)));
    }
}

#[test]
fn test_hard_money_rates_price_above_conventional() {
    let flip = strategy_interest_rate(Strategy::Flip, PropertyType::SingleFamily, 1);
    let rental = strategy_interest_rate(Strategy::Rental, PropertyType::SingleFamily, 1);
    assert!(flip.min > rental.max);
}

#[test]
fn test_closing_cost_totals_add_up() {
    let breakdown = closing_costs(dec!(450000), Percent(dec!(1)), Percent(dec!(2)));
    assert_eq!(breakdown.lender_points, dec!(4500));
    assert_eq!(breakdown.other_costs, dec!(9000));
    assert_eq!(breakdown.total, breakdown.lender_points + breakdown.other_costs);
    assert_eq!(breakdown.total_percent, Percent(dec!(3)));
}
