//! Items

use rust_decimal::Decimal;

use crate::amount::Amount;

/// A validated line item: a unit price and a quantity, both strictly positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    price: Amount,
    qty: Amount,
}

impl LineItem {
    /// Creates a new line item with the given price and quantity
    pub fn new(price: impl Into<Amount>, qty: impl Into<Amount>) -> Self {
        Self {
            price: price.into(),
            qty: qty.into(),
        }
    }

    /// Returns `price × qty`, or `None` if either amount or the product leaves the decimal range.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.decimal()?.checked_mul(self.qty.decimal()?)
    }
}
