//! Request → reply flows through the default configuration.

use discount_quote::{PricingRequest, PricingService, QuoteConfig, QuoteReply};
use rstest::rstest;

fn service() -> PricingService {
    PricingService::new(&QuoteConfig::default())
}

#[test]
fn vip_with_coupon_gets_campaign_and_vip_but_not_coupon() {
    let reply = service().quote_reply(Some(&PricingRequest::new("1200.00", true, true)));

    let QuoteReply::Quoted(quote) = reply else {
        panic!("expected a quote");
    };

    // CAMPAIGN 3% of 1200.00 = 36.00, VIP 10% = 120.00, COUPON blocked.
    assert_eq!(quote.subtotal, "1200.00");
    assert_eq!(quote.discount_total, "156.00");
    assert_eq!(quote.total, "1044.00");

    let rows: Vec<_> = quote
        .steps
        .iter()
        .map(|s| (s.rule_name.as_str(), s.applied_discount.as_str(), s.note.as_str()))
        .collect();
    assert_eq!(
        rows,
        [
            ("OVER_1000_DYNAMIC", "36.00", "APPLIED"),
            ("VIP_10_PERCENT", "120.00", "APPLIED"),
            ("COUPON_50_FLAT", "0.00", "SKIPPED: blocked by exclusivity policy"),
        ]
    );
    assert!(quote.steps[0].rule_name.starts_with("OVER_"));
}

#[test]
fn nothing_eligible_still_quotes_at_subtotal() {
    let reply = service().quote_reply(Some(&PricingRequest::new("100.00", false, false)));
    assert_eq!(reply.status_code(), 200);

    let QuoteReply::Quoted(quote) = reply else {
        panic!("expected a quote");
    };
    assert_eq!(quote.total, "100.00");
    assert!(quote.steps.is_empty());
}

#[test]
fn missing_fields_are_rejected_together() {
    let reply = service().quote_reply(Some(&PricingRequest::default()));
    assert_eq!(reply.status_code(), 400);

    let QuoteReply::Rejected(error) = reply else {
        panic!("expected a rejection");
    };
    assert_eq!(
        error.message,
        "subtotal is required; vip is required; hasCoupon is required"
    );
}

#[rstest]
#[case(None, "Request body is required")]
#[case(Some(PricingRequest::new("zero", true, true)), "subtotal must be a decimal amount")]
#[case(Some(PricingRequest::new("0", true, true)), "subtotal must be greater than zero")]
fn bad_requests_are_rejected(#[case] request: Option<PricingRequest>, #[case] message: &str) {
    let reply = service().quote_reply(request.as_ref());
    assert_eq!(reply, QuoteReply::Rejected(discount_quote::ErrorResponse::new(message)));
}

#[test]
fn configured_policy_changes_the_quote() {
    let mut config = QuoteConfig::default();
    config.policy.blocks.clear();
    config.policy.cap_bps = 1000;

    let quote = PricingService::new(&config)
        .quote(Some(&PricingRequest::new("1000.00", true, true)))
        .ok()
        .unwrap();

    // Cap is 100.00: CAMPAIGN 30.00, VIP capped at 70.00, COUPON finds nothing left.
    assert_eq!(quote.pricing.discount_total().cents(), 10_000);
    let notes: Vec<_> = quote.steps.iter().map(|s| s.note.to_string()).collect();
    assert_eq!(
        notes,
        [
            "APPLIED",
            "CAPPED: requested=100.00, applied=70.00, capRemaining=70.00",
            "SKIPPED: cap exhausted or total is zero",
        ]
    );
}

#[test]
fn numeric_subtotal_quotes_like_text() {
    let request: PricingRequest =
        serde_json::from_str(r#"{"subtotal":1200,"vip":true,"hasCoupon":true}"#).unwrap();
    let json = service().quote_reply(Some(&request)).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["total"], "1044.00");
    assert_eq!(value["steps"][1]["requestedDiscount"], "120.00");
}

#[test]
fn clashing_tier_names_fail_validation() {
    // Half-unit steps give two tiers that both render as OVER_500.
    let mut config = QuoteConfig::default();
    config.tiers.threshold_step_cents = 50;

    let reply = PricingService::new(&config).quote_reply(Some(&PricingRequest::new("501.00", false, false)));
    let QuoteReply::Rejected(error) = reply else {
        panic!("expected a rejection");
    };
    assert!(error.message.contains("Rule name 'OVER_500_DYNAMIC' is duplicated"));
}

#[test]
fn out_of_range_rate_is_rejected_not_clamped() {
    let mut config = QuoteConfig::default();
    config.catalog.vip_rate_bps = 4_000_000_000;
    assert!(config.validate().is_err());

    // Built without validation, the rule itself still refuses.
    let reply = PricingService::new(&config)
        .quote_reply(Some(&PricingRequest::new("90000000000000.00", true, false)));
    assert_eq!(reply.status_code(), 400);
    let QuoteReply::Rejected(error) = reply else {
        panic!("expected a rejection");
    };
    assert_eq!(error.message, "rule 'VIP_10_PERCENT' failed");
}
