//! # Discount Orchestrator
//!
//! The grouped pipeline end to end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  (ctx?, drafts) ──► validate ──► select_best_per_group ──► stack        │
//! │                        │                  │                  │          │
//! │                 Invalid[..] ─┐     Failure(rule) ─┐          ▼          │
//! │                              ▼                    ▼    PricingResult    │
//! │                   Failure("a; b; c")        Failure(rule)               │
//! │                                                                         │
//! │  Any stage's Failure short-circuits the rest of the pipeline.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::applier::GroupedStackingApplier;
use crate::effect::Outcome;
use crate::engine::{GroupedSelector, PricingStrategy};
use crate::policy::{CapPolicy, ExclusivityPolicy};
use crate::pricing::{OrderContext, OrderPricing};
use crate::rule::{DiscountRule, RuleDraft};
use crate::types::{DiscountGroup, PricingResult, Rate};
use crate::validation::{validate, PricingCommand};

/// Default lifetime cap: 30% of the subtotal.
pub const DEFAULT_CAP_BPS: u32 = 3000;

/// Default group visitation order.
pub const DEFAULT_GROUP_ORDER: [DiscountGroup; 3] = [
    DiscountGroup::Campaign,
    DiscountGroup::Vip,
    DiscountGroup::Coupon,
];

/// Everything the stacking applier needs besides the candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    pub group_order: Vec<DiscountGroup>,
    pub exclusivity: ExclusivityPolicy,
    pub cap: CapPolicy,
}

impl Default for PricingPolicy {
    /// CAMPAIGN → VIP → COUPON, COUPON and CAMPAIGN mutually exclusive,
    /// 30% cap.
    fn default() -> Self {
        PricingPolicy {
            group_order: DEFAULT_GROUP_ORDER.to_vec(),
            exclusivity: ExclusivityPolicy::new()
                .mutually_exclusive(DiscountGroup::Coupon, DiscountGroup::Campaign),
            cap: CapPolicy::new(Rate::from_bps(DEFAULT_CAP_BPS)),
        }
    }
}

/// Validation, per-group selection and stacking under one policy.
#[derive(Debug, Clone, Default)]
pub struct DiscountOrchestrator {
    policy: PricingPolicy,
    selector: GroupedSelector,
    applier: GroupedStackingApplier,
}

impl DiscountOrchestrator {
    pub fn new(policy: PricingPolicy) -> Self {
        DiscountOrchestrator {
            policy,
            selector: GroupedSelector::new(),
            applier: GroupedStackingApplier::new(),
        }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Validates the request, then prices it.
    ///
    /// Every validation complaint is joined into a single failure.
    pub fn price(&self, ctx: Option<&OrderContext>, rules: &[RuleDraft]) -> Outcome<PricingResult> {
        let validated = validate(ctx, rules).into_outcome();
        if let Some(cause) = validated.failure_cause() {
            warn!(error = %cause, "Pricing request rejected");
        }

        validated.and_then(|PricingCommand { context, rules }| self.price_rules(&context, &rules))
    }

    /// Prices already-built rules without validating them.
    pub fn price_rules(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<PricingResult> {
        let result = self.selector.select_best_per_group(ctx, rules).map(|selected| {
            self.applier.apply(
                ctx,
                &selected,
                &self.policy.group_order,
                &self.policy.exclusivity,
                &self.policy.cap,
            )
        });

        match &result {
            Outcome::Success(priced) => info!(
                subtotal = %priced.pricing.subtotal(),
                discount_total = %priced.pricing.discount_total(),
                total = %priced.pricing.total(),
                steps = priced.steps.len(),
                "Order priced"
            ),
            Outcome::Failure(cause) => warn!(error = %cause, "Pricing failed"),
            Outcome::Empty => {}
        }

        result
    }
}

impl PricingStrategy for DiscountOrchestrator {
    fn price(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<OrderPricing> {
        self.price_rules(ctx, rules).map(|result| result.pricing)
    }
}
