//! # Quote Request
//!
//! Raw request DTO and its conversion into an [`OrderContext`].
//!
//! ```text
//!   { "subtotal": "1200.00", "vip": true, "hasCoupon": false }
//!   { "subtotal": 1200.00,   "vip": true, "hasCoupon": false }
//!        │                     │              │
//!        ▼                     ▼              ▼
//!   parse_subtotal      required("vip")  required("hasCoupon")
//!        └────────────── Validation::map3 ─────┘
//!                               │
//!                               ▼
//!            Valid(OrderContext) or Invalid[every complaint]
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use discount_core::{Money, OrderContext, OrderPricing, Validation, ValidationError};

/// Body of a quote request. Every field is optional on the wire so that all
/// missing fields can be reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Decimal amount, e.g. `"1200.00"`. JSON numbers are accepted and kept
    /// as their decimal text.
    #[serde(default, deserialize_with = "decimal_text")]
    #[ts(type = "string | number | null")]
    pub subtotal: Option<String>,
    pub vip: Option<bool>,
    pub has_coupon: Option<bool>,
}

impl PricingRequest {
    pub fn new(subtotal: impl Into<String>, vip: bool, has_coupon: bool) -> Self {
        PricingRequest {
            subtotal: Some(subtotal.into()),
            vip: Some(vip),
            has_coupon: Some(has_coupon),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Text(String),
    Number(serde_json::Number),
}

fn decimal_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DecimalInput>::deserialize(deserializer)?.map(|input| match input {
        DecimalInput::Text(text) => text,
        DecimalInput::Number(number) => number.to_string(),
    }))
}

/// Parses a request, accumulating every field complaint.
pub fn parse_request(request: Option<&PricingRequest>) -> Validation<OrderContext> {
    let Some(request) = request else {
        return Validation::invalid(ValidationError::Required {
            field: "Request body".to_string(),
        });
    };

    Validation::map3(
        parse_subtotal(request.subtotal.as_deref()),
        required("vip", request.vip),
        required("hasCoupon", request.has_coupon),
        |subtotal, vip, has_coupon| OrderContext::new(vip, has_coupon, OrderPricing::new(subtotal)),
    )
}

/// Subtotal must be present, decimal and strictly positive.
pub fn parse_subtotal(subtotal: Option<&str>) -> Validation<Money> {
    let Some(text) = subtotal else {
        return Validation::invalid(ValidationError::Required {
            field: "subtotal".to_string(),
        });
    };

    match text.parse::<Money>() {
        Ok(amount) if amount.is_positive() => Validation::valid(amount),
        Ok(_) => Validation::invalid(ValidationError::MustBePositive {
            field: "subtotal".to_string(),
        }),
        Err(_) => Validation::invalid(ValidationError::InvalidFormat {
            field: "subtotal".to_string(),
            expected: "a decimal amount".to_string(),
        }),
    }
}

fn required<T>(field: &str, value: Option<T>) -> Validation<T> {
    match value {
        Some(v) => Validation::valid(v),
        None => Validation::invalid(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}
