//! Winner-take-all strategy.

use tracing::debug;

use super::{eligible_candidates, select_best, PricingStrategy};
use crate::effect::Outcome;
use crate::pricing::{OrderContext, OrderPricing};
use crate::rule::DiscountRule;
use crate::types::SelectedDiscount;

/// Evaluates every rule against the ORIGINAL context and applies only the
/// single largest discount.
///
/// Ties go to the lower priority number, then to the earlier rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestWinsEngine;

impl BestWinsEngine {
    pub fn new() -> Self {
        BestWinsEngine
    }

    /// The winning candidate, clamped to the original total.
    ///
    /// `Empty` when no rule is eligible; the first fault (rule order) when
    /// any rule fails.
    pub fn pick_best(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<SelectedDiscount> {
        eligible_candidates(ctx, rules).and_then(|candidates| Outcome::from_option(select_best(candidates)))
    }

    /// Applies the winner once to the original pricing.
    ///
    /// With nothing eligible the original pricing comes back unchanged.
    pub fn apply_best(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<OrderPricing> {
        self.pick_best(ctx, rules)
            .map(|winner| {
                debug!(rule = %winner.rule_name, amount = %winner.amount, "Best discount selected");
                ctx.pricing().add_discount(winner.amount)
            })
            .or_else(|| {
                debug!("No eligible discount, keeping original pricing");
                Outcome::Success(*ctx.pricing())
            })
    }
}

impl PricingStrategy for BestWinsEngine {
    fn price(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<OrderPricing> {
        self.apply_best(ctx, rules)
    }
}
