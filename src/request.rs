//! Checkout requests
//!
//! A [`CheckoutRequest`] is the raw, caller-supplied record. Fields are kept as loosely typed as the
//! JSON they came from so that validation can report *why* a field is unusable, rather than the
//! decoder rejecting the request outright.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw checkout request, prior to parsing or validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckoutRequest {
    /// Opaque user identifier.
    #[serde(default)]
    pub user_id: Option<Value>,

    /// Line items, expected to be a list of `{price, qty}` objects.
    #[serde(default)]
    pub items: Option<Value>,

    /// Optional coupon code; empty means no coupon.
    #[serde(default)]
    pub coupon: Option<Value>,

    /// Currency code; the configured default applies when absent.
    #[serde(default)]
    pub currency: Option<Value>,
}

impl CheckoutRequest {
    /// Decode a request from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Split the request into its fields, filling in `default_currency` when none was given.
    ///
    /// A `null` currency counts as absent and also gets the default. A currency that isn't a string
    /// is kept as its JSON text.
    pub fn parse(self, default_currency: &str) -> ParsedRequest {
        let currency = match self.currency {
            // a null currency is treated as absent rather than echoed
            None | Some(Value::Null) => default_currency.to_string(),
            Some(Value::String(currency)) => currency,
            Some(other) => other.to_string(),
        };

        ParsedRequest {
            user_id: self.user_id,
            items: self.items,
            coupon: self.coupon,
            currency,
        }
    }
}

/// A request whose fields have been extracted, but not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// Opaque user identifier, if present.
    pub user_id: Option<Value>,

    /// Line items, if present.
    pub items: Option<Value>,

    /// Coupon, if present.
    pub coupon: Option<Value>,

    /// Currency code.
    pub currency: String,
}

/// Opaque user identifier.
///
/// Serialises back to exactly the JSON value it was created from. Displays strings without
/// quotes and any other value as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserId(Value);

impl UserId {
    /// Wrap a JSON value as a user identifier.
    pub fn new(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_fills_default_currency() -> TestResult {
        let request = CheckoutRequest::from_json(r#"{"user_id": "u1", "items": []}"#)?;

        let parsed = request.parse("USD");

        assert_eq!(parsed.currency, "USD");
        assert_eq!(parsed.user_id, Some(json!("u1")));
        assert_eq!(parsed.items, Some(json!([])));
        assert_eq!(parsed.coupon, None);

        Ok(())
    }

    #[test]
    fn parse_keeps_supplied_currency() -> TestResult {
        let request = CheckoutRequest::from_json(r#"{"currency": "not-a-currency"}"#)?;

        assert_eq!(request.parse("USD").currency, "not-a-currency");

        Ok(())
    }

    #[test]
    fn null_fields_are_absent() -> TestResult {
        let request = CheckoutRequest::from_json(
            r#"{"user_id": null, "items": null, "coupon": null, "currency": null}"#,
        )?;

        assert_eq!(request, CheckoutRequest::default());

        Ok(())
    }

    #[test]
    fn items_are_kept_untyped() -> TestResult {
        let request = CheckoutRequest::from_json(r#"{"items": "not a list"}"#)?;

        assert_eq!(request.items, Some(json!("not a list")));

        Ok(())
    }

    #[test]
    fn non_object_request_is_rejected() {
        assert!(CheckoutRequest::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn non_string_fields_are_decoded() -> TestResult {
        let request = CheckoutRequest::from_json(r#"{"coupon": 10, "currency": 978}"#)?;

        assert_eq!(request.coupon, Some(json!(10)));

        let parsed = request.parse("USD");
        assert_eq!(parsed.coupon, Some(json!(10)));
        assert_eq!(parsed.currency, "978");

        Ok(())
    }

    #[test]
    fn user_id_displays_strings_without_quotes() {
        assert_eq!(UserId::from("alice").to_string(), "alice");
        assert_eq!(UserId::new(json!(42)).to_string(), "42");
    }

    #[test]
    fn user_id_serialises_as_original_value() -> TestResult {
        assert_eq!(serde_json::to_string(&UserId::new(json!(42)))?, "42");
        assert_eq!(serde_json::to_string(&UserId::from("alice"))?, r#""alice""#);

        Ok(())
    }
}
