use deal_engine_core::amortization::monthly_mortgage_payment;
use deal_engine_core::arv::{estimate_arv, ArvInput, ArvMethod, ComparableSale};
use deal_engine_core::rehab::estimate_rehab_costs;
use deal_engine_core::types::{Confidence, LoanType, Percent, RenovationLevel, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_conventional_mortgage_reference() {
    // 75% loan on a $300k purchase at 7% over 30 years
    let payment = monthly_mortgage_payment(
        dec!(225000),
        Percent(dec!(7)),
        dec!(30),
        LoanType::Conventional,
        Decimal::ZERO,
    );
    assert_eq!(payment, dec!(1497));
}

#[test]
fn test_amortizing_payment_repays_more_than_principal() {
    for (principal, rate, term) in [
        (dec!(100000), dec!(5), dec!(30)),
        (dec!(225000), dec!(7), dec!(30)),
        (dec!(400000), dec!(9.5), dec!(15)),
    ] {
        let payment = monthly_mortgage_payment(
            principal,
            Percent(rate),
            term,
            LoanType::Conventional,
            Decimal::ZERO,
        );
        assert!(
            payment * term * dec!(12) > principal,
            "{principal} at {rate}% over {term}y"
        );
    }
}

#[test]
fn test_zero_rate_straight_line() {
    let payment = monthly_mortgage_payment(
        dec!(180000),
        Percent::ZERO,
        dec!(15),
        LoanType::Conventional,
        Decimal::ZERO,
    );
    assert_eq!(payment, dec!(1000));
}

// ===========================================================================
// Rehab estimator
// ===========================================================================

#[test]
fn test_rehab_cost_monotonic_in_scope() {
    let levels = [
        RenovationLevel::Light,
        RenovationLevel::Medium,
        RenovationLevel::Heavy,
        RenovationLevel::Gut,
    ];
    let averages: Vec<Decimal> = levels
        .iter()
        .map(|&level| estimate_rehab_costs(dec!(1400), level).average)
        .collect();

    for pair in averages.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn test_rehab_range_brackets_average() {
    let estimate = estimate_rehab_costs(dec!(2200), RenovationLevel::Heavy);
    assert!(estimate.low <= estimate.average);
    assert!(estimate.average <= estimate.high);
}

// ===========================================================================
// ARV estimator
// ===========================================================================

fn subject_with_comps(comps: Vec<ComparableSale>) -> ArvInput {
    ArvInput {
        subject_sqft: dec!(1600),
        purchase_price: dec!(240000),
        comparables: comps,
        avm_value: Some(dec!(250000)),
        renovation_level: RenovationLevel::Medium,
        strategy: Strategy::Brrrr,
    }
}

#[test]
fn test_arv_from_clustered_comparables() {
    let input = subject_with_comps(vec![
        ComparableSale {
            address: "12 Birch Ln".into(),
            sale_price: dec!(320000),
            square_footage: dec!(1600),
        },
        ComparableSale {
            address: "48 Cedar St".into(),
            sale_price: dec!(346500),
            square_footage: dec!(1650),
        },
        ComparableSale {
            address: "7 Dogwood Ct".into(),
            sale_price: dec!(306000),
            square_footage: dec!(1500),
        },
    ]);
    let result = estimate_arv(&input);

    assert_eq!(result.method, ArvMethod::Comparables);
    assert_eq!(result.confidence, Confidence::High);
    // Median $204/sqft * 1,600
    assert_eq!(result.value, dec!(326400));
}

#[test]
fn test_arv_avm_fallback_stays_in_uplift_band() {
    let input = subject_with_comps(Vec::new());
    let result = estimate_arv(&input);

    assert_eq!(result.method, ArvMethod::AvmHeuristic);
    assert!(result.confidence != Confidence::High);
    // Medium renovation uplift band is 12-18% over the AVM value
    assert!(result.value >= dec!(250000) * dec!(1.12));
    assert!(result.value <= dec!(250000) * dec!(1.18));
}

#[test]
fn test_arv_single_comp_falls_back() {
    let input = subject_with_comps(vec![ComparableSale {
        address: "12 Birch Ln".into(),
        sale_price: dec!(320000),
        square_footage: dec!(1600),
    }]);
    let result = estimate_arv(&input);
    assert_eq!(result.method, ArvMethod::AvmHeuristic);
}
