//! Checkout configuration
//!
//! Constants the calculator is built with: the default currency, the tax rate, item limits and the
//! coupon book. [`CheckoutConfig::default`] is the shipped configuration; YAML documents can
//! override any part of it.
//!
//! ```yaml
//! default_currency: EUR
//! tax_rate: 0.19
//! coupons:
//!   SPRING:
//!     type: tiered_rate
//!     min_amount: "150"
//!     rate: 0.15
//!     fallback_rate: 0.05
//! ```

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{coupons::CouponBook, validation::ItemLimits};

pub use self::coupons::CouponFixture;

mod coupons;

/// Currency used when a request doesn't name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Configuration Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Immutable configuration for a [`CheckoutCalculator`](crate::checkout::CheckoutCalculator).
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Currency code substituted when a request has none.
    pub default_currency: String,

    /// Tax rate applied to the discounted amount.
    pub tax_rate: Percentage,

    /// Exclusive lower bounds for item prices and quantities.
    pub limits: ItemLimits,

    /// Known coupons.
    pub coupons: CouponBook,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            tax_rate: Percentage::from(Decimal::new(21, 2)),
            limits: ItemLimits::default(),
            coupons: CouponBook::standard(),
        }
    }
}

impl CheckoutConfig {
    /// Build a configuration from a YAML document. Missing keys keep their default values; a
    /// `coupons` key replaces the whole coupon book.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document can't be parsed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let fixture: ConfigFixture = serde_norway::from_str(yaml)?;

        Ok(fixture.into_config())
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}

/// Configuration document as written in YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFixture {
    default_currency: Option<String>,
    tax_rate: Option<Decimal>,
    min_price: Option<Decimal>,
    min_qty: Option<Decimal>,
    coupons: Option<FxHashMap<String, CouponFixture>>,
}

impl ConfigFixture {
    fn into_config(self) -> CheckoutConfig {
        let defaults = CheckoutConfig::default();

        CheckoutConfig {
            default_currency: self.default_currency.unwrap_or(defaults.default_currency),
            tax_rate: self.tax_rate.map_or(defaults.tax_rate, Percentage::from),
            limits: ItemLimits {
                min_price: self.min_price.unwrap_or(defaults.limits.min_price),
                min_qty: self.min_qty.unwrap_or(defaults.limits.min_qty),
            },
            coupons: self.coupons.map_or(defaults.coupons, |coupons| {
                CouponBook::with_rules(
                    coupons
                        .into_iter()
                        .map(|(code, fixture)| (code, fixture.into())),
                )
            }),
        }
    }
}
