//! Cumulative strategy: every rule stacks on the running total.

use tracing::debug;

use super::PricingStrategy;
use crate::effect::Outcome;
use crate::pricing::{OrderContext, OrderPricing};
use crate::rule::DiscountRule;

/// Applies rules left to right, each against the context left behind by the
/// previous one.
///
/// ```text
///   ctx₀ ──r1──► ctx₁ ──r2──► ctx₂ ──r3──► ctx₃
///          │            │
///          └ Empty: ctx unchanged
///                       └ Failure: whole fold fails, later rules never run
/// ```
///
/// Input order IS application order, so percentages compound against the
/// already-discounted total.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        SequentialEngine
    }

    /// Folds `rules` over `ctx` and returns the final ledger.
    pub fn apply(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<OrderPricing> {
        let folded = rules.iter().fold(Outcome::Success(*ctx), |acc, rule| {
            acc.and_then(|current| Self::step(current, rule))
        });

        if let Outcome::Success(final_ctx) = &folded {
            debug!(
                rules = rules.len(),
                discount_total = %final_ctx.pricing().discount_total(),
                total = %final_ctx.pricing().total(),
                "Sequential pricing complete"
            );
        }

        folded.map(|final_ctx| *final_ctx.pricing())
    }

    fn step(current: OrderContext, rule: &DiscountRule) -> Outcome<OrderContext> {
        match rule.evaluate(&current) {
            Outcome::Success(amount) => {
                let discount = current.pricing().clamp_discount(amount);
                Outcome::Success(current.with_pricing(current.pricing().add_discount(discount)))
            }
            Outcome::Empty => Outcome::Success(current),
            Outcome::Failure(cause) => Outcome::Failure(cause),
        }
    }
}

impl PricingStrategy for SequentialEngine {
    fn price(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<OrderPricing> {
        self.apply(ctx, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleFault;
    use crate::money::Money;
    use crate::types::{DiscountGroup, Rate};

    fn ctx(subtotal_cents: i64) -> OrderContext {
        OrderContext::new(true, true, OrderPricing::new(Money::from_cents(subtotal_cents)))
    }

    #[test]
    fn test_percentages_compound_on_running_total() {
        let ten_percent = |name: &str| {
            DiscountRule::new(name, DiscountGroup::Vip, 1, |_| Ok(true), |c| {
                Ok(c.pricing().total().percent(Rate::from_bps(1000)))
            })
        };
        let pricing = SequentialEngine::new()
            .apply(&ctx(10000), &[ten_percent("A"), ten_percent("B")])
            .ok()
            .unwrap();
        // 100.00 → 90.00 → 81.00
        assert_eq!(pricing.total(), Money::from_cents(8100));
        assert_eq!(pricing.discount_total(), Money::from_cents(1900));
    }

    #[test]
    fn test_oversized_discount_is_clamped_to_total() {
        let huge = DiscountRule::new("HUGE", DiscountGroup::Campaign, 1, |_| Ok(true), |_| {
            Ok(Money::from_cents(1_000_000))
        });
        let negative = DiscountRule::new("NEG", DiscountGroup::Campaign, 1, |_| Ok(true), |_| {
            Ok(Money::from_cents(-500))
        });
        let pricing = SequentialEngine::new().apply(&ctx(5000), &[negative, huge]).ok().unwrap();
        assert_eq!(pricing.total(), Money::zero());
        assert_eq!(pricing.discount_total(), Money::from_cents(5000));
    }

    #[test]
    fn test_no_rules_leaves_pricing_untouched() {
        let pricing = SequentialEngine::new().apply(&ctx(5000), &[]).ok().unwrap();
        assert_eq!(pricing, OrderPricing::new(Money::from_cents(5000)));
    }

    #[test]
    fn test_failure_stops_the_fold() {
        let broken = DiscountRule::new("BROKEN", DiscountGroup::Coupon, 1, |_| Ok(true), |_| {
            Err(RuleFault::raised("no coupon service"))
        });
        let never = DiscountRule::new("NEVER", DiscountGroup::Vip, 1, |_| {
            Err(RuleFault::raised("must not be evaluated"))
        }, |_| Ok(Money::zero()));

        let outcome = SequentialEngine::new().apply(&ctx(5000), &[broken, never]);
        assert_eq!(outcome.failure_cause().and_then(|e| e.failed_rule()), Some("BROKEN"));
    }
}
