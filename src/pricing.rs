//! Pricing
//!
//! Subtotal and tax arithmetic. Rates are applied with truncation toward zero; no other rounding
//! takes place, so subtotals keep whatever precision the item prices and quantities carry.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while pricing a checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An intermediate amount could not be represented as a decimal.
    #[error("amount overflowed the supported decimal range")]
    Overflow,
}

/// Calculates the subtotal of a list of items: the sum of `price × qty`.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total or the running sum left the decimal range.
pub fn calculate_subtotal(items: &[LineItem]) -> Result<Decimal, PricingError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        item.line_total()
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(PricingError::Overflow)
    })
}

/// Applies a fractional rate to an amount, truncating the result toward zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product left the decimal range.
pub fn apply_rate(rate: Percentage, amount: Decimal) -> Result<Decimal, PricingError> {
    // decimal_percentage doesn't expose the inner Decimal
    (rate * Decimal::ONE)
        .checked_mul(amount)
        .map(|applied| applied.trunc())
        .ok_or(PricingError::Overflow)
}

/// Calculates tax on an (already discounted) amount.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product left the decimal range.
pub fn calculate_tax(amount: Decimal, tax_rate: Percentage) -> Result<Decimal, PricingError> {
    apply_rate(tax_rate, amount)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn tax_rate() -> Percentage {
        Percentage::from(Decimal::new(21, 2))
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let items = [
            LineItem::new(Decimal::from(100), Decimal::from(2)),
            LineItem::new(Decimal::new(250, 2), Decimal::from(4)),
        ];

        assert_eq!(calculate_subtotal(&items)?, Decimal::from(210));

        Ok(())
    }

    #[test]
    fn subtotal_is_independent_of_item_order() -> TestResult {
        let a = LineItem::new(Decimal::new(1999, 2), Decimal::from(3));
        let b = LineItem::new(Decimal::new(5, 1), Decimal::new(15, 1));
        let c = LineItem::new(Decimal::from(7), Decimal::from(1));

        assert_eq!(calculate_subtotal(&[a, b, c])?, calculate_subtotal(&[c, a, b])?);

        Ok(())
    }

    #[test]
    fn subtotal_keeps_precision() -> TestResult {
        let items = [LineItem::new(Decimal::new(1999, 2), Decimal::from(1))];

        assert_eq!(calculate_subtotal(&items)?, Decimal::new(1999, 2));

        Ok(())
    }

    #[test]
    fn subtotal_of_nothing_is_zero() -> TestResult {
        assert_eq!(calculate_subtotal(&[])?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_reported() {
        let items = [
            LineItem::new(Decimal::MAX, Decimal::ONE),
            LineItem::new(Decimal::MAX, Decimal::ONE),
        ];

        assert_eq!(calculate_subtotal(&items), Err(PricingError::Overflow));
    }

    #[test]
    fn tax_truncates_toward_zero() -> TestResult {
        // 180 × 0.21 = 37.8
        assert_eq!(calculate_tax(Decimal::from(180), tax_rate())?, Decimal::from(37));
        // 95 × 0.21 = 19.95
        assert_eq!(calculate_tax(Decimal::from(95), tax_rate())?, Decimal::from(19));

        Ok(())
    }

    #[test]
    fn tax_on_zero_is_zero() -> TestResult {
        assert_eq!(calculate_tax(Decimal::ZERO, tax_rate())?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn apply_rate_overflow_is_reported() {
        let rate = Percentage::from(Decimal::from(2));

        assert_eq!(apply_rate(rate, Decimal::MAX), Err(PricingError::Overflow));
    }
}
