//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    amount::Amount,
    checkout::{CheckoutCalculator, CheckoutError, generate_order_id},
    config::{CheckoutConfig, ConfigError, DEFAULT_CURRENCY},
    coupons::{CouponBook, CouponRule},
    items::LineItem,
    pricing::{PricingError, calculate_subtotal, calculate_tax},
    request::{CheckoutRequest, ParsedRequest, UserId},
    summary::OrderSummary,
    validation::{ItemLimits, ValidatedRequest, ValidationError},
};
