use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_currency, Confidence, Money, RenovationLevel, Sqft, Strategy};

// Comparables must fall within this band of the subject's floor area.
const SIZE_TOLERANCE: Decimal = dec!(0.30);
// Spread threshold (as a fraction of the median $/sqft) for High confidence.
const TIGHT_CLUSTER_SPREAD: Decimal = dec!(0.25);

/// A comparable sale near the subject property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparableSale {
    #[serde(default)]
    pub address: String,
    pub sale_price: Money,
    pub square_footage: Sqft,
}

/// Input to the ARV estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArvInput {
    pub subject_sqft: Sqft,
    pub purchase_price: Money,
    #[serde(default)]
    pub comparables: Vec<ComparableSale>,
    /// Automated-valuation-model estimate of current (pre-repair) value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avm_value: Option<Money>,
    pub renovation_level: RenovationLevel,
    pub strategy: Strategy,
}

/// Which estimation path produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArvMethod {
    Comparables,
    AvmHeuristic,
}

/// After-repair value estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArvResult {
    pub value: Money,
    pub method: ArvMethod,
    pub confidence: Confidence,
    pub details: String,
}

/// Post-renovation value uplift band applied to a pre-repair base value.
/// Monotonic in the level ordering; the midpoint is used.
fn uplift_band(level: RenovationLevel) -> (Decimal, Decimal) {
    match level {
        RenovationLevel::None => (Decimal::ZERO, Decimal::ZERO),
        RenovationLevel::Light => (dec!(8), dec!(12)),
        RenovationLevel::Medium => (dec!(12), dec!(18)),
        RenovationLevel::Heavy => (dec!(18), dec!(25)),
        RenovationLevel::Gut => (dec!(25), dec!(32)),
    }
}

/// Estimate after-repair value.
///
/// With at least two usable comparables (positive sale price and floor area
/// within ±30% of the subject), the estimate is the median $/sqft across
/// them times the subject's floor area. Otherwise the estimate falls back to
/// the AVM value (or, failing that, the purchase price) uplifted by the
/// renovation-level midpoint.
///
/// Deterministic and idempotent; the comparables list is never mutated. This
/// component does not judge whether the ARV exceeds the purchase price;
/// that belongs to the composite calculators' validation.
pub fn estimate_arv(input: &ArvInput) -> ArvResult {
    let usable: Vec<&ComparableSale> = if input.subject_sqft > Decimal::ZERO {
        input
            .comparables
            .iter()
            .filter(|comp| {
                comp.sale_price > Decimal::ZERO
                    && comp.square_footage > Decimal::ZERO
                    && within_size_tolerance(comp.square_footage, input.subject_sqft)
            })
            .collect()
    } else {
        Vec::new()
    };

    if usable.len() >= 2 {
        estimate_from_comparables(input, &usable)
    } else {
        estimate_from_avm(input, usable.len())
    }
}

fn within_size_tolerance(comp_sqft: Sqft, subject_sqft: Sqft) -> bool {
    let low = subject_sqft * (Decimal::ONE - SIZE_TOLERANCE);
    let high = subject_sqft * (Decimal::ONE + SIZE_TOLERANCE);
    comp_sqft >= low && comp_sqft <= high
}

fn estimate_from_comparables(input: &ArvInput, usable: &[&ComparableSale]) -> ArvResult {
    let mut per_sqft: Vec<Decimal> = usable
        .iter()
        .map(|comp| comp.sale_price / comp.square_footage)
        .collect();
    per_sqft.sort();

    let n = per_sqft.len();
    let median = if n % 2 == 0 {
        (per_sqft[n / 2 - 1] + per_sqft[n / 2]) / dec!(2)
    } else {
        per_sqft[n / 2]
    };

    let spread = per_sqft[n - 1] - per_sqft[0];
    let tightly_clustered = !median.is_zero() && spread / median <= TIGHT_CLUSTER_SPREAD;

    let mut confidence = if n >= 3 && tightly_clustered {
        Confidence::High
    } else {
        Confidence::Medium
    };

    // Single-family comp selection transfers poorly to commercial deals.
    if input.strategy == Strategy::Commercial && confidence == Confidence::High {
        confidence = Confidence::Medium;
    }

    let value = round_currency(median * input.subject_sqft);
    let median_display = median.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    ArvResult {
        value,
        method: ArvMethod::Comparables,
        confidence,
        details: format!(
            "Median ${median_display}/sqft across {n} comparable sales within \
             ±30% of subject floor area"
        ),
    }
}

fn estimate_from_avm(input: &ArvInput, usable_comps: usize) -> ArvResult {
    let (band_low, band_high) = uplift_band(input.renovation_level);
    let uplift_midpoint = (band_low + band_high) / dec!(2);

    let (base, confidence, base_label) = match input.avm_value {
        Some(avm) if avm > Decimal::ZERO => (avm, Confidence::Medium, "AVM value"),
        _ => (input.purchase_price, Confidence::Low, "purchase price"),
    };

    let value = round_currency(base * (Decimal::ONE + uplift_midpoint / dec!(100)));

    ArvResult {
        value,
        method: ArvMethod::AvmHeuristic,
        confidence,
        details: format!(
            "{usable_comps} usable comparables — {base_label} of {base} uplifted \
             {uplift_midpoint}% for {:?} renovation scope",
            input.renovation_level
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn comp(address: &str, price: Decimal, sqft: Decimal) -> ComparableSale {
        ComparableSale {
            address: address.into(),
            sale_price: price,
            square_footage: sqft,
        }
    }

    fn sample_input() -> ArvInput {
        ArvInput {
            subject_sqft: dec!(1500),
            purchase_price: dec!(200000),
            comparables: vec![
                comp("100 Main St", dec!(300000), dec!(1500)),
                comp("200 Oak Ave", dec!(310000), dec!(1550)),
                comp("300 Elm Dr", dec!(290000), dec!(1450)),
            ],
            avm_value: Some(dec!(200000)),
            renovation_level: RenovationLevel::Medium,
            strategy: Strategy::Flip,
        }
    }

    #[test]
    fn test_comparables_median_path() {
        let result = estimate_arv(&sample_input());
        // All three comps sit at exactly $200/sqft
        assert_eq!(result.value, dec!(300000));
        assert_eq!(result.method, ArvMethod::Comparables);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_oversized_comp_excluded() {
        let mut input = sample_input();
        // 3,000 sqft is outside ±30% of a 1,500 sqft subject
        input.comparables[2] = comp("400 Pine Ct", dec!(600000), dec!(3000));
        let result = estimate_arv(&input);

        assert_eq!(result.method, ArvMethod::Comparables);
        // Only two usable comps remain, so confidence drops from High
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.value, dec!(300000));
    }

    #[test]
    fn test_wide_dispersion_caps_confidence() {
        let mut input = sample_input();
        input.comparables = vec![
            comp("A", dec!(225000), dec!(1500)), // $150/sqft
            comp("B", dec!(300000), dec!(1500)), // $200/sqft
            comp("C", dec!(375000), dec!(1500)), // $250/sqft
        ];
        let result = estimate_arv(&input);

        // Spread is 100/200 = 50% of median, well past the 25% cluster bound
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.value, dec!(300000));
    }

    #[test]
    fn test_avm_fallback_band() {
        let mut input = sample_input();
        input.comparables.clear();
        let result = estimate_arv(&input);

        // Medium uplift midpoint is 15%: 200,000 * 1.15
        assert_eq!(result.value, dec!(230000));
        assert_eq!(result.method, ArvMethod::AvmHeuristic);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.value >= dec!(200000) * dec!(1.12));
        assert!(result.value <= dec!(200000) * dec!(1.18));
    }

    #[test]
    fn test_no_avm_falls_back_to_purchase_price() {
        let mut input = sample_input();
        input.comparables.clear();
        input.avm_value = None;
        let result = estimate_arv(&input);

        assert_eq!(result.value, dec!(230000));
        assert_eq!(result.confidence, Confidence::Low);
    }

    #[test]
    fn test_uplift_monotonic_in_level() {
        let mut input = sample_input();
        input.comparables.clear();

        let mut previous = Decimal::ZERO;
        for level in [
            RenovationLevel::None,
            RenovationLevel::Light,
            RenovationLevel::Medium,
            RenovationLevel::Heavy,
            RenovationLevel::Gut,
        ] {
            input.renovation_level = level;
            let value = estimate_arv(&input).value;
            assert!(value >= previous, "{level:?} uplift regressed");
            previous = value;
        }
    }

    #[test]
    fn test_commercial_strategy_caps_confidence() {
        let mut input = sample_input();
        input.strategy = Strategy::Commercial;
        let result = estimate_arv(&input);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_deterministic_and_comparables_untouched() {
        let input = sample_input();
        let before = serde_json::to_string(&input.comparables).unwrap();

        let first = estimate_arv(&input);
        let second = estimate_arv(&input);

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(serde_json::to_string(&input.comparables).unwrap(), before);
    }
}
