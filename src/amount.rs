//! Amounts
//!
//! Prices and quantities are read from the exact text of a JSON number. A number with more decimal
//! places than a [`Decimal`] can hold is rounded (half away from zero) to fit. A number whose
//! magnitude is beyond the decimal range is kept as [`Amount::OutOfRange`]: it still validates by
//! its sign, and only fails once it is priced.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde_json::Number;

const MAX_SCALE: u64 = 28;

/// Largest mantissa a [`Decimal`] holds (96 bits).
const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Significant digits in [`MAX_MANTISSA`].
const MAX_DIGITS: u64 = 29;

/// A price or quantity as written in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// The number, rounded to fit a decimal when it carries more places.
    Decimal {
        /// Value used for pricing.
        value: Decimal,

        /// How the number as written compares to `value`.
        remainder: Ordering,
    },

    /// A number whose magnitude is beyond the decimal range.
    OutOfRange {
        /// Whether the number is negative.
        negative: bool,
    },
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::Decimal {
            value,
            remainder: Ordering::Equal,
        }
    }
}

impl Amount {
    /// Read a JSON number from its source text.
    pub fn from_number(number: &Number) -> Self {
        parse(&number.to_string())
    }

    /// The value used for pricing, or `None` if the number is out of range.
    pub fn decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal { value, .. } => Some(*value),
            Self::OutOfRange { .. } => None,
        }
    }

    /// Whether the number as written is strictly greater than `limit`.
    ///
    /// Exact even when the number was rounded: a value that rounds onto the limit only exceeds it
    /// if rounding went down.
    pub fn exceeds(&self, limit: Decimal) -> bool {
        match *self {
            Self::Decimal { value, remainder } => match value.cmp(&limit) {
                Ordering::Equal => remainder == Ordering::Greater,
                ordering => ordering == Ordering::Greater,
            },
            Self::OutOfRange { negative } => !negative,
        }
    }
}

fn parse(text: &str) -> Amount {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (mantissa, exponent) = unsigned.split_once(['e', 'E']).unwrap_or((unsigned, "0"));
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits = format!("{whole}{fraction}");
    let digits = digits.trim_start_matches('0');

    if digits.is_empty() {
        return Amount::from(Decimal::ZERO);
    }

    // the number is `digits × 10^-scale`
    let scale = i64::try_from(fraction.len())
        .unwrap_or(i64::MAX)
        .saturating_sub(parse_exponent(exponent));

    let fitted = if scale < 0 {
        scale_up(digits, scale.unsigned_abs())
    } else {
        round_to_fit(digits, scale.unsigned_abs())
    };

    match fitted {
        Some((value, remainder)) if negative => Amount::Decimal {
            value: -value,
            remainder: remainder.reverse(),
        },
        Some((value, remainder)) => Amount::Decimal { value, remainder },
        None => Amount::OutOfRange { negative },
    }
}

/// Exponents too long for an `i64` saturate; either way the number is far outside the range.
fn parse_exponent(exponent: &str) -> i64 {
    exponent
        .strip_prefix('+')
        .unwrap_or(exponent)
        .parse::<i64>()
        .unwrap_or(if exponent.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
}

/// `digits × 10^shift`, if it fits.
fn scale_up(digits: &str, shift: u64) -> Option<(Decimal, Ordering)> {
    let mantissa = digits
        .parse::<u128>()
        .ok()?
        .checked_mul(10_u128.checked_pow(u32::try_from(shift).ok()?)?)
        .filter(|mantissa| *mantissa <= MAX_MANTISSA)?;

    let value = Decimal::try_from_i128_with_scale(i128::try_from(mantissa).ok()?, 0).ok()?;

    Some((value, Ordering::Equal))
}

/// `digits × 10^-scale`, dropping as few trailing digits as needed to fit a decimal.
fn round_to_fit(digits: &str, scale: u64) -> Option<(Decimal, Ordering)> {
    let length = u64::try_from(digits.len()).ok()?;
    let mut dropped = scale
        .saturating_sub(MAX_SCALE)
        .max(length.saturating_sub(MAX_DIGITS));

    while dropped <= scale {
        if let Some((mantissa, remainder)) =
            round_off(digits, dropped).filter(|(mantissa, _)| *mantissa <= MAX_MANTISSA)
        {
            let value = Decimal::try_from_i128_with_scale(
                i128::try_from(mantissa).ok()?,
                u32::try_from(scale - dropped).ok()?,
            )
            .ok()?;

            return Some((value, remainder));
        }

        dropped += 1;
    }

    None
}

/// Drop the last `count` digits, rounding half away from zero. The ordering is how the full digits
/// compare to the rounded ones.
fn round_off(digits: &str, count: u64) -> Option<(u128, Ordering)> {
    let keep = usize::try_from(count).map_or(0, |count| digits.len().saturating_sub(count));
    let (kept, rest) = digits.split_at(keep);

    // once every written digit is dropped, the rounding digit is an implicit leading zero
    let round_up = u64::try_from(rest.len()).is_ok_and(|len| len == count)
        && rest.bytes().next().is_some_and(|digit| digit >= b'5');

    let remainder = if rest.bytes().all(|digit| digit == b'0') {
        Ordering::Equal
    } else if round_up {
        Ordering::Less
    } else {
        Ordering::Greater
    };

    let mantissa = if kept.is_empty() {
        0
    } else {
        kept.parse::<u128>().ok()?
    };

    let mantissa = if round_up {
        mantissa.checked_add(1)?
    } else {
        mantissa
    };

    Some((mantissa, remainder))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn amount(json: &str) -> Result<Amount, serde_json::Error> {
        Ok(Amount::from_number(&serde_json::from_str(json)?))
    }

    #[test]
    fn reads_plain_numbers_exactly() -> TestResult {
        assert_eq!(amount("19.99")?, Amount::from(Decimal::new(1999, 2)));
        assert_eq!(amount("100")?, Amount::from(Decimal::from(100)));
        assert_eq!(amount("-5")?, Amount::from(Decimal::from(-5)));
        assert_eq!(amount("0.000")?, Amount::from(Decimal::ZERO));

        Ok(())
    }

    #[test]
    fn reads_scientific_notation() -> TestResult {
        assert_eq!(amount("1.5e3")?.decimal(), Some(Decimal::from(1500)));
        assert_eq!(amount("25E-1")?.decimal(), Some(Decimal::new(25, 1)));
        assert_eq!(amount("2e+2")?.decimal(), Some(Decimal::from(200)));

        Ok(())
    }

    #[test]
    fn excess_places_round_to_fit() -> TestResult {
        let rounded = amount("0.12345678901234567890123456789")?;

        assert_eq!(
            rounded,
            Amount::Decimal {
                value: Decimal::from_i128_with_scale(1_234_567_890_123_456_789_012_345_679, 28),
                remainder: Ordering::Less,
            }
        );

        Ok(())
    }

    #[test]
    fn trailing_zeros_beyond_the_scale_are_exact() -> TestResult {
        assert_eq!(
            amount("1.500000000000000000000000000000000")?,
            Amount::from(Decimal::new(15, 1))
        );

        Ok(())
    }

    #[test]
    fn long_whole_part_gives_up_places() -> TestResult {
        let value = amount("123456789.123456789012345678901234")?.decimal();

        assert_eq!(
            value,
            Some(Decimal::from_i128_with_scale(
                12_345_678_912_345_678_901_234_567_890,
                20
            ))
        );

        Ok(())
    }

    #[test]
    fn tiny_positive_numbers_round_to_zero_but_stay_positive() -> TestResult {
        let tiny = amount("1e-30")?;

        assert_eq!(tiny.decimal(), Some(Decimal::ZERO));
        assert!(tiny.exceeds(Decimal::ZERO));
        assert!(!amount("-1e-30")?.exceeds(Decimal::ZERO));

        Ok(())
    }

    #[test]
    fn huge_numbers_are_out_of_range() -> TestResult {
        assert_eq!(amount("1e30")?, Amount::OutOfRange { negative: false });
        assert_eq!(
            amount("-123456789012345678901234567890")?,
            Amount::OutOfRange { negative: true }
        );
        assert_eq!(
            parse("1e99999999999999999999"),
            Amount::OutOfRange { negative: false }
        );
        assert!(parse("1e-99999999999999999999").exceeds(Decimal::ZERO));

        Ok(())
    }

    #[test]
    fn largest_decimal_still_fits() -> TestResult {
        assert_eq!(
            amount("79228162514264337593543950335")?.decimal(),
            Some(Decimal::MAX)
        );
        assert_eq!(amount("79228162514264337593543950336")?.decimal(), None);

        Ok(())
    }

    #[test]
    fn exceeds_compares_the_number_as_written() -> TestResult {
        let limit = Decimal::ONE;

        assert!(amount("1.00000000000000000000000000001")?.exceeds(limit));
        assert!(!amount("0.99999999999999999999999999999")?.exceeds(limit));
        assert!(!amount("1")?.exceeds(limit));
        assert!(amount("1e30")?.exceeds(limit));
        assert!(!amount("-1e30")?.exceeds(limit));

        Ok(())
    }
}
