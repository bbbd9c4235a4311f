//! Checkout
//!
//! Checkout computes order summaries: it validates a request, totals its line items, applies a
//! coupon discount, charges tax on the discounted amount and returns the figures alongside a
//! generated order identifier.

pub mod amount;
pub mod checkout;
pub mod config;
pub mod coupons;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod request;
pub mod summary;
pub mod validation;
