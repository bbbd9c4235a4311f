//! Coupons
//!
//! A [`CouponBook`] maps exact coupon codes to a [`CouponRule`]. Each rule is one of three shapes:
//! a flat rate, a rate that drops to a fallback below a spend threshold, or a fixed amount that
//! drops to a smaller fixed amount below a spend threshold.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::pricing::{PricingError, apply_rate};

/// Discount rule attached to a coupon code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponRule {
    /// Percentage of the subtotal, whatever the subtotal is.
    FlatRate {
        /// Rate applied to the subtotal.
        rate: Percentage,
    },

    /// Percentage of the subtotal, with a lower rate below `min_amount`.
    TieredRate {
        /// Subtotal at or above which `rate` applies.
        min_amount: Decimal,

        /// Rate applied when the threshold is met.
        rate: Percentage,

        /// Rate applied when the threshold is not met.
        fallback_rate: Percentage,
    },

    /// Fixed amount off, with a smaller amount below `min_amount`.
    TieredFixed {
        /// Subtotal at or above which `amount` applies.
        min_amount: Decimal,

        /// Amount taken off when the threshold is met.
        amount: Decimal,

        /// Amount taken off when the threshold is not met.
        fallback_amount: Decimal,
    },
}

impl CouponRule {
    /// Calculate the discount this rule grants on `subtotal`.
    ///
    /// Rate-based discounts are truncated toward zero. Fixed amounts are returned as configured.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if applying a rate leaves the decimal range.
    pub fn discount(&self, subtotal: Decimal) -> Result<Decimal, PricingError> {
        match *self {
            CouponRule::FlatRate { rate } => apply_rate(rate, subtotal),
            CouponRule::TieredRate {
                min_amount,
                rate,
                fallback_rate,
            } => {
                let rate = if subtotal >= min_amount {
                    rate
                } else {
                    fallback_rate
                };

                apply_rate(rate, subtotal)
            }
            CouponRule::TieredFixed {
                min_amount,
                amount,
                fallback_amount,
            } => Ok(if subtotal >= min_amount {
                amount
            } else {
                fallback_amount
            }),
        }
    }
}

/// Immutable table of coupon rules keyed by exact code.
#[derive(Debug, Clone, Default)]
pub struct CouponBook {
    rules: FxHashMap<String, CouponRule>,
}

impl CouponBook {
    /// Create a coupon book from `(code, rule)` pairs. Later duplicates replace earlier ones.
    pub fn with_rules(rules: impl IntoIterator<Item = (String, CouponRule)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// The coupons shipped by default: `SAVE10`, `SAVE20` and `VIP`.
    pub fn standard() -> Self {
        Self::with_rules([
            (
                "SAVE10".to_string(),
                CouponRule::FlatRate {
                    rate: Percentage::from(Decimal::new(10, 2)),
                },
            ),
            (
                "SAVE20".to_string(),
                CouponRule::TieredRate {
                    min_amount: Decimal::from(200),
                    rate: Percentage::from(Decimal::new(20, 2)),
                    fallback_rate: Percentage::from(Decimal::new(5, 2)),
                },
            ),
            (
                "VIP".to_string(),
                CouponRule::TieredFixed {
                    min_amount: Decimal::from(100),
                    amount: Decimal::from(50),
                    fallback_amount: Decimal::from(10),
                },
            ),
        ])
    }

    /// Look up the rule for an exact coupon code.
    pub fn get(&self, code: &str) -> Option<&CouponRule> {
        self.rules.get(code)
    }

    /// Iterate over the known coupon codes, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of coupons in the book.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the book has no coupons.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
