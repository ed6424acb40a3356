use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_currency, Money, RenovationLevel, Sqft};

/// Renovation budget range for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RehabEstimate {
    pub low: Money,
    pub high: Money,
    pub average: Money,
    /// Midpoint of the $/sqft band for the level, two decimal places.
    pub cost_per_sqft: Money,
}

impl RehabEstimate {
    fn zero() -> Self {
        RehabEstimate {
            low: Decimal::ZERO,
            high: Decimal::ZERO,
            average: Decimal::ZERO,
            cost_per_sqft: Decimal::ZERO,
        }
    }
}

/// $/sqft band for each renovation scope. Bands increase monotonically with
/// the level ordering.
fn cost_band(level: RenovationLevel) -> Option<(Decimal, Decimal)> {
    match level {
        RenovationLevel::None => None,
        RenovationLevel::Light => Some((dec!(15), dec!(25))),
        RenovationLevel::Medium => Some((dec!(35), dec!(60))),
        RenovationLevel::Heavy => Some((dec!(70), dec!(100))),
        RenovationLevel::Gut => Some((dec!(100), dec!(150))),
    }
}

/// Estimate a renovation budget range from floor area and scope.
///
/// `RenovationLevel::None` or a non-positive floor area yields a zero
/// estimate. Callers that need a fallback when floor area is unknown must
/// supply their own price-percentage heuristic; that responsibility is
/// deliberately outside this component.
pub fn estimate_rehab_costs(square_footage: Sqft, level: RenovationLevel) -> RehabEstimate {
    let (band_low, band_high) = match cost_band(level) {
        Some(band) if square_footage > Decimal::ZERO => band,
        _ => return RehabEstimate::zero(),
    };

    let midpoint = (band_low + band_high) / dec!(2);

    RehabEstimate {
        low: round_currency(square_footage * band_low),
        high: round_currency(square_footage * band_high),
        average: round_currency(square_footage * midpoint),
        cost_per_sqft: midpoint.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_medium_band_numbers() {
        let estimate = estimate_rehab_costs(dec!(1500), RenovationLevel::Medium);
        assert_eq!(estimate.low, dec!(52500));
        assert_eq!(estimate.high, dec!(90000));
        assert_eq!(estimate.average, dec!(71250));
        assert_eq!(estimate.cost_per_sqft, dec!(47.5));
    }

    #[test]
    fn test_monotonic_in_level() {
        let sqft = dec!(1200);
        let light = estimate_rehab_costs(sqft, RenovationLevel::Light);
        let medium = estimate_rehab_costs(sqft, RenovationLevel::Medium);
        let heavy = estimate_rehab_costs(sqft, RenovationLevel::Heavy);
        let gut = estimate_rehab_costs(sqft, RenovationLevel::Gut);

        assert!(light.average <= medium.average);
        assert!(medium.average <= heavy.average);
        assert!(heavy.average <= gut.average);
        assert!(light.low < light.high);
    }

    #[test]
    fn test_none_level_is_zero() {
        let estimate = estimate_rehab_costs(dec!(2000), RenovationLevel::None);
        assert_eq!(estimate, RehabEstimate::zero());
    }

    #[test]
    fn test_non_positive_area_is_zero() {
        assert_eq!(
            estimate_rehab_costs(Decimal::ZERO, RenovationLevel::Gut),
            RehabEstimate::zero()
        );
        assert_eq!(
            estimate_rehab_costs(dec!(-500), RenovationLevel::Light),
            RehabEstimate::zero()
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let estimate = estimate_rehab_costs(dec!(1800), RenovationLevel::Heavy);
        let json = serde_json::to_string(&estimate).unwrap();
        let _: RehabEstimate = serde_json::from_str(&json).unwrap();
    }
}
