//! Input normalization. Caller input arrives from web forms, scraped
//! listings, and bulk-import spreadsheets; none of it can be trusted to be
//! numeric. Every function here is total: malformed input coerces to a safe
//! default, never an error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::{Money, Percent};

/// Parse a price string into a monetary amount. Strips currency symbols,
/// thousands separators, and whitespace. Negative, non-numeric, or missing
/// input yields 0.
pub fn parse_price(input: Option<&str>) -> Money {
    let raw = match input {
        Some(s) => s.trim(),
        None => return Decimal::ZERO,
    };
    if raw.is_empty() {
        return Decimal::ZERO;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '_'))
        .collect();

    match Decimal::from_str(&cleaned) {
        Ok(value) if value.is_sign_negative() => Decimal::ZERO,
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

/// Parse numeric text, optionally with a trailing `%`, into the
/// whole-number-percent domain ("7.5" and "7.5%" both mean 7.5%).
/// Malformed, missing, or negative input yields 0.
pub fn parse_percent(input: Option<&str>) -> Percent {
    let raw = match input {
        Some(s) => s.trim(),
        None => return Percent::ZERO,
    };

    let trimmed = raw.strip_suffix('%').unwrap_or(raw).trim();

    match Decimal::from_str(trimmed) {
        Ok(value) if value.is_sign_negative() => Percent::ZERO,
        Ok(value) => Percent(value),
        Err(_) => Percent::ZERO,
    }
}

/// Parse an integer, truncating toward zero. Malformed or negative input
/// yields the caller-supplied fallback.
pub fn parse_integer(input: Option<&str>, fallback: i64) -> i64 {
    let raw = match input {
        Some(s) => s.trim(),
        None => return fallback,
    };

    match Decimal::from_str(raw) {
        Ok(value) if value.is_sign_negative() => fallback,
        Ok(value) => value.trunc().to_i64().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Typed-world face of the same rule: a negative amount coerces to zero.
/// Both composite calculators route their monetary fields through this before
/// computing, so no downstream component sees a raw caller value.
pub fn sanitize_money(amount: Money) -> Money {
    if amount.is_sign_negative() {
        Decimal::ZERO
    } else {
        amount
    }
}

/// A negative percent coerces to zero. Upper-bound checks are the
/// validator's job, not the normalizer's.
pub fn sanitize_percent(percent: Percent) -> Percent {
    if percent.0.is_sign_negative() {
        Percent::ZERO
    } else {
        percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_price_formatted() {
        assert_eq!(parse_price(Some("$300,000")), dec!(300000));
        assert_eq!(parse_price(Some("1,250,000.50")), dec!(1250000.50));
        assert_eq!(parse_price(Some(" $99 ")), dec!(99));
    }

    #[test]
    fn test_parse_price_defaults_to_zero() {
        assert_eq!(parse_price(None), Decimal::ZERO);
        assert_eq!(parse_price(Some("")), Decimal::ZERO);
        assert_eq!(parse_price(Some("-5000")), Decimal::ZERO);
        assert_eq!(parse_price(Some("call for price")), Decimal::ZERO);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent(Some("7.5")), Percent(dec!(7.5)));
        assert_eq!(parse_percent(Some("7.5%")), Percent(dec!(7.5)));
        assert_eq!(parse_percent(Some("20 %")), Percent(dec!(20)));
        assert_eq!(parse_percent(Some("n/a")), Percent::ZERO);
        assert_eq!(parse_percent(Some("-3")), Percent::ZERO);
        assert_eq!(parse_percent(None), Percent::ZERO);
    }

    #[test]
    fn test_parse_integer_truncates_toward_zero() {
        assert_eq!(parse_integer(Some("12.9"), 0), 12);
        assert_eq!(parse_integer(Some("6"), 0), 6);
        assert_eq!(parse_integer(Some("-4"), 0), 0);
        assert_eq!(parse_integer(Some("abc"), 3), 3);
        assert_eq!(parse_integer(None, 30), 30);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_money(dec!(-100)), Decimal::ZERO);
        assert_eq!(sanitize_money(dec!(100)), dec!(100));
        assert_eq!(sanitize_percent(Percent(dec!(-7))), Percent::ZERO);
        assert_eq!(sanitize_percent(Percent(dec!(7))), Percent(dec!(7)));
    }
}
