use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Warnings and errors attached to every composite calculation.
///
/// An error marks the result as not actionable for the requested strategy;
/// the numbers are still computed so a caller can show why the deal fails.
/// A warning means the input is numerically valid but outside a recommended
/// range; calculation proceeds with the given value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn check_purchase_price(price: Money, report: &mut ValidationReport) {
    if price <= Decimal::ZERO {
        report.error("Purchase price must be positive");
    }
}

/// The validated range for interest rates is (0, 20]. Values outside it
/// produce a warning, not a rejection.
pub fn check_interest_rate(rate: Percent, report: &mut ValidationReport) {
    if rate.value() <= Decimal::ZERO || rate.value() > dec!(20) {
        report.warn(format!(
            "Interest rate {}% is outside the expected range (0, 20] — proceeding with the given value",
            rate.value()
        ));
    } else if rate.value() > dec!(15) {
        report.warn(format!(
            "Interest rate {}% is above 15% — verify lender terms",
            rate.value()
        ));
    }
}

pub fn check_down_payment(down_payment: Percent, report: &mut ValidationReport) {
    if down_payment.value() > dec!(100) {
        report.warn(format!(
            "Down payment {}% exceeds 100% of the purchase price",
            down_payment.value()
        ));
    }
}

/// Flip holding periods outside 1-18 months make the carry model meaningless.
pub fn check_flip_holding_period(months: u32, report: &mut ValidationReport) {
    if !(1..=18).contains(&months) {
        report.error(format!(
            "Holding period of {months} months is outside the supported 1-18 month range"
        ));
    }
}

pub fn check_renovation_period(months: u32, report: &mut ValidationReport) {
    if months == 0 {
        report.warn("Renovation period of 0 months — holding costs will be zero");
    } else if months > 24 {
        report.warn(format!(
            "Renovation period of {months} months is unusually long for a residential rehab"
        ));
    }
}
