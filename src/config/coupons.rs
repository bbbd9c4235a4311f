//! Coupon configuration

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::coupons::CouponRule;

/// Coupon rule as written in YAML
///
/// Rates are fractions (`0.15` for 15%). Amounts may be written as numbers or strings; strings
/// keep every decimal place exactly.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum CouponFixture {
    /// Flat percentage off
    FlatRate {
        /// Rate applied to the subtotal
        rate: Decimal,
    },

    /// Percentage off with a fallback rate below a threshold
    TieredRate {
        /// Threshold for the primary rate
        min_amount: Decimal,

        /// Rate at or above the threshold
        rate: Decimal,

        /// Rate below the threshold
        fallback_rate: Decimal,
    },

    /// Fixed amount off with a fallback amount below a threshold
    TieredFixed {
        /// Threshold for the primary amount
        min_amount: Decimal,

        /// Amount at or above the threshold
        amount: Decimal,

        /// Amount below the threshold
        fallback_amount: Decimal,
    },
}

impl From<CouponFixture> for CouponRule {
    fn from(fixture: CouponFixture) -> Self {
        match fixture {
            CouponFixture::FlatRate { rate } => CouponRule::FlatRate {
                rate: Percentage::from(rate),
            },
            CouponFixture::TieredRate {
                min_amount,
                rate,
                fallback_rate,
            } => CouponRule::TieredRate {
                min_amount,
                rate: Percentage::from(rate),
                fallback_rate: Percentage::from(fallback_rate),
            },
            CouponFixture::TieredFixed {
                min_amount,
                amount,
                fallback_amount,
            } => CouponRule::TieredFixed {
                min_amount,
                amount,
                fallback_amount,
            },
        }
    }
}
