use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::types::{round_currency, LoanType, Money, Percent};

const DEFAULT_CONVENTIONAL_TERM_YEARS: Decimal = dec!(30);
const DEFAULT_HARD_MONEY_TERM_YEARS: Decimal = dec!(1);

/// Monthly payment for an acquisition loan.
///
/// Conventional loans amortize over the full term:
/// `M = P·r·(1+r)^n / ((1+r)^n − 1)`, with `M = P/n` when the rate is zero.
/// Hard-money loans pay interest only, on the acquisition principal plus the
/// renovation holdback, which is modeled as fully drawn and accruing
/// interest for the whole term.
///
/// A non-positive term is replaced with the loan-type default (30 years
/// conventional, 1 year hard money). Output is rounded to whole currency
/// units.
pub fn monthly_mortgage_payment(
    principal: Money,
    annual_rate: Percent,
    term_years: Decimal,
    loan_type: LoanType,
    rehab_amount: Money,
) -> Money {
    let term_years = if term_years <= Decimal::ZERO {
        match loan_type {
            LoanType::Conventional => DEFAULT_CONVENTIONAL_TERM_YEARS,
            LoanType::HardMoney => DEFAULT_HARD_MONEY_TERM_YEARS,
        }
    } else {
        term_years
    };

    let monthly_rate = annual_rate.as_fraction() / dec!(12);

    let payment = match loan_type {
        LoanType::HardMoney => (principal + rehab_amount) * monthly_rate,
        LoanType::Conventional => {
            let months = term_years * dec!(12);
            if monthly_rate.is_zero() {
                principal / months
            } else {
                let compound = (Decimal::ONE + monthly_rate).powd(months);
                principal * monthly_rate * compound / (compound - Decimal::ONE)
            }
        }
    };

    round_currency(payment)
}

/// Interest-only carrying payment on an outstanding balance, per month.
/// Shared by both composite calculators' holding-cost math.
pub fn interest_only_payment(balance: Money, annual_rate: Percent) -> Money {
    round_currency(balance * annual_rate.as_fraction() / dec!(12))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_conventional_reference_payment() {
        // $225k at 7% over 30 years amortizes to ~$1,497/mo
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
    fn test_total_paid_exceeds_principal() {
        let payment = monthly_mortgage_payment(
            dec!(225000),
            Percent(dec!(7)),
            dec!(30),
            LoanType::Conventional,
            Decimal::ZERO,
        );
        assert!(payment * dec!(360) > dec!(225000));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = monthly_mortgage_payment(
            dec!(360000),
            Percent::ZERO,
            dec!(30),
            LoanType::Conventional,
            Decimal::ZERO,
        );
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_hard_money_interest_only_includes_rehab() {
        // (180,000 + 40,000) * 12% / 12 = 2,200
        let payment = monthly_mortgage_payment(
            dec!(180000),
            Percent(dec!(12)),
            dec!(1),
            LoanType::HardMoney,
            dec!(40000),
        );
        assert_eq!(payment, dec!(2200));
    }

    #[test]
    fn test_non_positive_term_uses_loan_type_default() {
        let explicit = monthly_mortgage_payment(
            dec!(225000),
            Percent(dec!(7)),
            dec!(30),
            LoanType::Conventional,
            Decimal::ZERO,
        );
        let guarded = monthly_mortgage_payment(
            dec!(225000),
            Percent(dec!(7)),
            Decimal::ZERO,
            LoanType::Conventional,
            Decimal::ZERO,
        );
        assert_eq!(explicit, guarded);
    }

    #[test]
    fn test_interest_only_payment() {
        assert_eq!(interest_only_payment(dec!(220000), Percent(dec!(12))), dec!(2200));
        assert_eq!(interest_only_payment(dec!(160000), Percent(dec!(7))), dec!(933));
    }
}
