//! # Quote Responses
//!
//! Wire shapes for a priced quote and for errors, plus the mapping from the
//! three pricing outcomes to a reply.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Outcome<PricingResult>          QuoteReply              status         │
//! │  ──────────────────────          ──────────              ──────         │
//! │  Success(result)          ──►    Quoted(QuoteResponse)    200           │
//! │  Empty                    ──►    Unpriceable(message)     422           │
//! │  Failure(cause)           ──►    Rejected(cause message)  400           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts travel as exact decimal strings (`"1044.00"`), the same text the
//! audit notes use, so no client ever sees a binary float.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use discount_core::{AppliedStep, Outcome, PricingResult};

use crate::error::QuoteResult;

/// Message for a request that priced to nothing.
pub const UNPRICEABLE_MESSAGE: &str = "no price could be calculated";

// =============================================================================
// DTOs
// =============================================================================

/// One audit row of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub rule_name: String,
    /// Upper-case group name (`VIP`, `COUPON`, `CAMPAIGN`).
    pub group: String,
    pub requested_discount: String,
    pub applied_discount: String,
    pub total_before: String,
    pub total_after: String,
    pub note: String,
}

impl From<&AppliedStep> for StepResponse {
    fn from(step: &AppliedStep) -> Self {
        StepResponse {
            rule_name: step.rule_name.clone(),
            group: step.group.as_str().to_string(),
            requested_discount: step.requested_discount.to_string(),
            applied_discount: step.applied_discount.to_string(),
            total_before: step.total_before.to_string(),
            total_after: step.total_after.to_string(),
            note: step.note.to_string(),
        }
    }
}

/// A priced quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub subtotal: String,
    pub discount_total: String,
    pub total: String,
    pub steps: Vec<StepResponse>,
}

impl From<&PricingResult> for QuoteResponse {
    fn from(result: &PricingResult) -> Self {
        QuoteResponse {
            subtotal: result.pricing.subtotal().to_string(),
            discount_total: result.pricing.discount_total().to_string(),
            total: result.pricing.total().to_string(),
            steps: result.steps.iter().map(StepResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            message: message.into(),
        }
    }
}

// =============================================================================
// Reply
// =============================================================================

/// Transport-neutral reply for one quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteReply {
    Quoted(QuoteResponse),
    Unpriceable(ErrorResponse),
    Rejected(ErrorResponse),
}

impl QuoteReply {
    /// HTTP-style status code.
    pub const fn status_code(&self) -> u16 {
        match self {
            QuoteReply::Quoted(_) => 200,
            QuoteReply::Unpriceable(_) => 422,
            QuoteReply::Rejected(_) => 400,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, QuoteReply::Quoted(_))
    }

    /// JSON body.
    pub fn to_json(&self) -> QuoteResult<String> {
        let body = match self {
            QuoteReply::Quoted(quote) => serde_json::to_string(quote)?,
            QuoteReply::Unpriceable(error) | QuoteReply::Rejected(error) => serde_json::to_string(error)?,
        };
        Ok(body)
    }
}

impl From<Outcome<PricingResult>> for QuoteReply {
    fn from(outcome: Outcome<PricingResult>) -> Self {
        outcome.fold(
            |result| QuoteReply::Quoted(QuoteResponse::from(&result)),
            || QuoteReply::Unpriceable(ErrorResponse::new(UNPRICEABLE_MESSAGE)),
            |cause| QuoteReply::Rejected(ErrorResponse::new(cause.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discount_core::{DiscountGroup, Money, OrderPricing, PricingError, StepNote};

    fn result() -> PricingResult {
        PricingResult {
            pricing: OrderPricing::new(Money::from_cents(100_000)).add_discount(Money::from_cents(20_000)),
            steps: vec![AppliedStep {
                rule_name: "CAMP".into(),
                group: DiscountGroup::Campaign,
                requested_discount: Money::from_cents(20_000),
                applied_discount: Money::from_cents(20_000),
                total_before: Money::from_cents(100_000),
                total_after: Money::from_cents(80_000),
                note: StepNote::Applied,
            }],
        }
    }

    #[test]
    fn test_outcome_mapping() {
        let quoted = QuoteReply::from(Outcome::Success(result()));
        assert_eq!(quoted.status_code(), 200);

        let empty = QuoteReply::from(Outcome::<PricingResult>::Empty);
        assert_eq!(empty, QuoteReply::Unpriceable(ErrorResponse::new("no price could be calculated")));
        assert_eq!(empty.status_code(), 422);

        let failed = QuoteReply::from(Outcome::<PricingResult>::failure(PricingError::message("boom")));
        assert_eq!(failed, QuoteReply::Rejected(ErrorResponse::new("boom")));
        assert_eq!(failed.status_code(), 400);
    }

    #[test]
    fn test_quote_json_shape() {
        let json = QuoteReply::from(Outcome::Success(result())).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["subtotal"], "1000.00");
        assert_eq!(value["discountTotal"], "200.00");
        assert_eq!(value["total"], "800.00");

        let step = &value["steps"][0];
        assert_eq!(step["ruleName"], "CAMP");
        assert_eq!(step["group"], "CAMPAIGN");
        assert_eq!(step["requestedDiscount"], "200.00");
        assert_eq!(step["appliedDiscount"], "200.00");
        assert_eq!(step["totalBefore"], "1000.00");
        assert_eq!(step["totalAfter"], "800.00");
        assert_eq!(step["note"], "APPLIED");
    }

    #[test]
    fn test_error_json_shape() {
        let json = QuoteReply::Rejected(ErrorResponse::new("bad")).to_json().unwrap();
        assert_eq!(json, r#"{"message":"bad"}"#);
    }
}
