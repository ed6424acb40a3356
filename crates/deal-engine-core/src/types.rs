use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DealEngineError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Floor area in square feet
pub type Sqft = Decimal;

/// A percentage in the whole-number convention: `Percent(dec!(7.5))` means
/// 7.5%, never 0.075. The only way to obtain a unit fraction is
/// [`Percent::as_fraction`], so the two conventions cannot be mixed silently
/// at a call boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(pub Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Percent(value)
    }

    /// The raw whole-number value: `Percent(7.5).value() == 7.5`.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Convert to a unit fraction: `Percent(7.5).as_fraction() == 0.075`.
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    /// Build from a unit fraction: `Percent::from_fraction(0.75) == Percent(75)`.
    pub fn from_fraction(fraction: Decimal) -> Self {
        Percent(fraction * dec!(100))
    }

    /// Apply this percent to a base amount: 25% of 300,000 is 75,000.
    pub fn of(&self, amount: Money) -> Money {
        amount * self.0 / dec!(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Round to whole currency units, midpoint away from zero. Applied at every
/// output boundary; intermediate math stays at full Decimal precision.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percent to two decimal places for output.
pub fn round_percent(percent: Percent) -> Percent {
    Percent(
        percent
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    )
}

/// Loan shape for acquisition financing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Conventional,
    HardMoney,
}

impl FromStr for LoanType {
    type Err = DealEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "conventional" => Ok(LoanType::Conventional),
            "hard_money" | "hardmoney" => Ok(LoanType::HardMoney),
            other => Err(DealEngineError::InvalidInput {
                field: "loan_type".into(),
                reason: format!("Unknown loan type '{other}'"),
            }),
        }
    }
}

/// Investment strategy. Determines financing defaults and which composite
/// calculator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Flip,
    Brrrr,
    Rental,
    HouseHack,
    Commercial,
}

impl FromStr for Strategy {
    type Err = DealEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "flip" | "fix_and_flip" => Ok(Strategy::Flip),
            "brrrr" => Ok(Strategy::Brrrr),
            "rental" | "buy_and_hold" => Ok(Strategy::Rental),
            "house_hack" | "househack" => Ok(Strategy::HouseHack),
            "commercial" => Ok(Strategy::Commercial),
            other => Err(DealEngineError::InvalidInput {
                field: "strategy".into(),
                reason: format!("Unknown strategy '{other}'"),
            }),
        }
    }
}

/// Property type, used to adjust interest-rate bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Condo,
    MultiFamily,
    Commercial,
}

impl FromStr for PropertyType {
    type Err = DealEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "single_family" | "sfr" => Ok(PropertyType::SingleFamily),
            "condo" => Ok(PropertyType::Condo),
            "multi_family" | "multifamily" => Ok(PropertyType::MultiFamily),
            "commercial" => Ok(PropertyType::Commercial),
            other => Err(DealEngineError::InvalidInput {
                field: "property_type".into(),
                reason: format!("Unknown property type '{other}'"),
            }),
        }
    }
}

/// Renovation scope. The variant order is meaningful: cost and value-uplift
/// tables are monotonic in it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RenovationLevel {
    None,
    Light,
    Medium,
    Heavy,
    Gut,
}

impl FromStr for RenovationLevel {
    type Err = DealEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(RenovationLevel::None),
            "light" | "cosmetic" => Ok(RenovationLevel::Light),
            "medium" => Ok(RenovationLevel::Medium),
            "heavy" => Ok(RenovationLevel::Heavy),
            "gut" => Ok(RenovationLevel::Gut),
            other => Err(DealEngineError::InvalidInput {
                field: "renovation_level".into(),
                reason: format!("Unknown renovation level '{other}'"),
            }),
        }
    }
}

/// Confidence grade attached to an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Cash-on-cash return as a tagged value rather than a raw float infinity.
/// When all invested capital has been recovered, any positive cash flow is an
/// unbounded return on the zero-or-negative capital that remains; transport
/// layers that cannot serialize IEEE infinities get the tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum CashOnCash {
    Finite(Percent),
    PositiveInfinite,
    NegativeInfinite,
}

impl CashOnCash {
    pub fn is_infinite(&self) -> bool {
        !matches!(self, CashOnCash::Finite(_))
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
