//! Order summary

use std::io;

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::request::UserId;

/// Result of a successful checkout.
///
/// `total` is always `max(subtotal - discount, 0) + tax`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    /// Generated order identifier
    pub order_id: String,

    /// User the order belongs to
    pub user_id: UserId,

    /// Currency code, echoed from the request
    pub currency: String,

    /// Sum of `price × qty` over all items
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,

    /// Discount granted by the coupon, before clamping
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub discount: Decimal,

    /// Tax on the discounted amount
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax: Decimal,

    /// Amount payable
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,

    /// Number of line items
    pub items_count: usize,
}

impl OrderSummary {
    /// Amount the tax was charged on: the subtotal less the discount, never below zero.
    pub fn discounted(&self) -> Decimal {
        self.total - self.tax
    }

    /// Render the summary as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the summary as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Order".to_string(), self.order_id.clone()]);
        builder.push_record(["User".to_string(), self.user_id.to_string()]);
        builder.push_record(["Items".to_string(), self.items_count.to_string()]);
        builder.push_record(["Subtotal".to_string(), self.money(self.subtotal)]);
        builder.push_record(["Discount".to_string(), self.money(self.discount)]);
        builder.push_record(["Tax".to_string(), self.money(self.tax)]);
        builder.push_record(["Total".to_string(), self.money(self.total)]);

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "{table}")
    }

    fn money(&self, amount: Decimal) -> String {
        format!("{amount} {}", self.currency)
    }
}
