//! Checkout
//!
//! [`CheckoutCalculator`] turns a raw [`CheckoutRequest`] into an [`OrderSummary`] in one pass:
//! parse, validate, subtotal, discount, tax, total. Validation happens before any arithmetic, and
//! a call either returns a complete summary or an error.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, debug_span};

use crate::{
    config::CheckoutConfig,
    items::LineItem,
    pricing::{self, PricingError},
    request::{CheckoutRequest, ParsedRequest, UserId},
    summary::OrderSummary,
    validation::{self, ValidatedRequest, ValidationError},
};

/// Errors returned by a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request text could not be decoded.
    #[error("invalid checkout request: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An amount could not be represented.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Computes order summaries against a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct CheckoutCalculator {
    config: CheckoutConfig,
}

impl CheckoutCalculator {
    /// Create a calculator using the given configuration.
    pub fn new(config: CheckoutConfig) -> Self {
        Self { config }
    }

    /// The configuration this calculator was built with.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Extract the request fields, filling in the default currency.
    pub fn parse(&self, request: CheckoutRequest) -> ParsedRequest {
        request.parse(&self.config.default_currency)
    }

    /// Validate a parsed request against the configured item limits.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first failing check.
    pub fn validate(&self, parsed: ParsedRequest) -> Result<ValidatedRequest, ValidationError> {
        validation::validate(parsed, &self.config.limits)
    }

    /// Calculate the discount a coupon grants on `subtotal`.
    ///
    /// An absent or empty coupon grants nothing.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Validation`]: the coupon is not in the coupon book.
    /// - [`CheckoutError::Pricing`]: applying the coupon's rate overflowed.
    pub fn calculate_discount(
        &self,
        subtotal: Decimal,
        coupon: Option<&str>,
    ) -> Result<Decimal, CheckoutError> {
        let Some(code) = coupon.filter(|code| !code.is_empty()) else {
            return Ok(Decimal::ZERO);
        };

        let rule = self
            .config
            .coupons
            .get(code)
            .ok_or(ValidationError::UnknownCoupon)?;

        Ok(rule.discount(subtotal)?)
    }

    /// Calculate tax on an amount at the configured rate.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the result can't be represented.
    pub fn calculate_tax(&self, amount: Decimal) -> Result<Decimal, PricingError> {
        pricing::calculate_tax(amount, self.config.tax_rate)
    }

    /// Run a complete checkout.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the request is invalid, names an unknown coupon, or an amount
    /// overflows.
    pub fn process_checkout(&self, request: CheckoutRequest) -> Result<OrderSummary, CheckoutError> {
        let validated = self.validate(self.parse(request)).inspect_err(|err| {
            debug!(%err, "checkout request rejected");
        })?;

        let span = debug_span!(
            "checkout",
            user_id = %validated.user_id,
            items_count = validated.items.len()
        );
        let _enter = span.enter();

        let subtotal = pricing::calculate_subtotal(&validated.items)?;
        let discount = validated
            .coupon_code()
            .map_err(CheckoutError::from)
            .and_then(|code| self.calculate_discount(subtotal, code))
            .inspect_err(|err| debug!(%err, coupon = ?validated.coupon, "coupon rejected"))?;

        let discounted = subtotal
            .checked_sub(discount)
            .ok_or(PricingError::Overflow)?
            .max(Decimal::ZERO);

        let tax = self.calculate_tax(discounted)?;
        let total = discounted.checked_add(tax).ok_or(PricingError::Overflow)?;

        debug!(%subtotal, %discount, %tax, %total, "checkout priced");

        Ok(OrderSummary {
            order_id: generate_order_id(&validated.user_id, &validated.items),
            user_id: validated.user_id,
            currency: validated.currency,
            subtotal,
            discount,
            tax,
            total,
            items_count: validated.items.len(),
        })
    }

    /// Decode a JSON request and run a complete checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Decode`] for malformed JSON, otherwise as
    /// [`process_checkout`](Self::process_checkout).
    pub fn process_json(&self, json: &str) -> Result<OrderSummary, CheckoutError> {
        self.process_checkout(CheckoutRequest::from_json(json)?)
    }
}

/// Build the order identifier `"{user_id}-{item count}-X"`.
///
/// Deterministic and not unique: the same user with the same number of items always gets the
/// same identifier.
pub fn generate_order_id(user_id: &UserId, items: &[LineItem]) -> String {
    format!("{user_id}-{}-X", items.len())
}
