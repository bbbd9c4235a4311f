//! Validation
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `user_id` present
//! 2. `items` present, a list, and non-empty
//! 3. for each item in order: `price` and `qty` keys, then `price`, then `qty`

use rust_decimal::Decimal;
use serde_json::Value;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    amount::Amount,
    items::LineItem,
    request::{ParsedRequest, UserId},
};

/// Reasons a checkout request is rejected.
///
/// The `Display` text of each variant is the human-readable message for callers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No user identifier was supplied.
    #[error("user_id is required")]
    UserIdRequired,

    /// No items were supplied.
    #[error("items is required")]
    ItemsRequired,

    /// `items` is not a list.
    #[error("items must be a list")]
    ItemsNotList,

    /// `items` is an empty list.
    #[error("items must not be empty")]
    ItemsEmpty,

    /// An item is missing its `price` or `qty`.
    #[error("item must have price and qty")]
    ItemFieldsMissing,

    /// An item's `price` is not a number.
    #[error("price must be a number")]
    PriceNotNumber,

    /// An item's `price` is not above the minimum price.
    #[error("price must be positive")]
    PriceNotPositive,

    /// An item's `qty` is not a number.
    #[error("qty must be a number")]
    QtyNotNumber,

    /// An item's `qty` is not above the minimum quantity.
    #[error("qty must be positive")]
    QtyNotPositive,

    /// A coupon code was supplied that is not in the coupon book.
    #[error("unknown coupon")]
    UnknownCoupon,
}

/// Exclusive lower bounds applied to every line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLimits {
    /// Prices must be strictly greater than this.
    pub min_price: Decimal,

    /// Quantities must be strictly greater than this.
    pub min_qty: Decimal,
}

impl Default for ItemLimits {
    fn default() -> Self {
        Self {
            min_price: Decimal::ZERO,
            min_qty: Decimal::ZERO,
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// User identifier.
    pub user_id: UserId,

    /// Line items, in request order.
    pub items: SmallVec<[LineItem; 8]>,

    /// Coupon, if any. May still be empty, unknown or not a string; coupons are resolved during
    /// pricing.
    pub coupon: Option<Value>,

    /// Currency code.
    pub currency: String,
}

impl ValidatedRequest {
    /// The coupon code to apply, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownCoupon`] if the coupon is not a string.
    pub fn coupon_code(&self) -> Result<Option<&str>, ValidationError> {
        match &self.coupon {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(code)) => Ok(Some(code.as_str())),
            Some(_) => Err(ValidationError::UnknownCoupon),
        }
    }
}

/// Validate a parsed request.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first failing check.
pub fn validate(
    parsed: ParsedRequest,
    limits: &ItemLimits,
) -> Result<ValidatedRequest, ValidationError> {
    let user_id = parsed.user_id.ok_or(ValidationError::UserIdRequired)?;
    let items = parsed.items.ok_or(ValidationError::ItemsRequired)?;

    let Value::Array(items) = items else {
        return Err(ValidationError::ItemsNotList);
    };

    if items.is_empty() {
        return Err(ValidationError::ItemsEmpty);
    }

    let items = items
        .iter()
        .map(|item| validate_item(item, limits))
        .collect::<Result<SmallVec<_>, _>>()?;

    Ok(ValidatedRequest {
        user_id: UserId::new(user_id),
        items,
        coupon: parsed.coupon,
        currency: parsed.currency,
    })
}

fn validate_item(item: &Value, limits: &ItemLimits) -> Result<LineItem, ValidationError> {
    let (Some(price), Some(qty)) = (item.get("price"), item.get("qty")) else {
        return Err(ValidationError::ItemFieldsMissing);
    };

    let price = number(price).ok_or(ValidationError::PriceNotNumber)?;

    if !price.exceeds(limits.min_price) {
        return Err(ValidationError::PriceNotPositive);
    }

    let qty = number(qty).ok_or(ValidationError::QtyNotNumber)?;

    if !qty.exceeds(limits.min_qty) {
        return Err(ValidationError::QtyNotPositive);
    }

    Ok(LineItem::new(price, qty))
}

fn number(value: &Value) -> Option<Amount> {
    match value {
        Value::Number(number) => Some(Amount::from_number(number)),
        _ => None,
    }
}
