//! # Pricing Strategies
//!
//! Three interchangeable ways of turning `(context, rules)` into a price.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Sequential     r1 ──► r2 ──► r3        each rule sees the ALREADY      │
//! │                 (fold over context)     discounted total                │
//! │                                                                         │
//! │  Best-Wins      r1   r2   r3            every rule sees the ORIGINAL    │
//! │                  └────┼────┘            total; one winner applies       │
//! │                       ▼                                                 │
//! │                     max                                                 │
//! │                                                                         │
//! │  Grouped        VIP[..] COUPON[..] CAMPAIGN[..]   one winner per group, │
//! │                   │       │          │            then the stacking     │
//! │                   ▼       ▼          ▼            applier enforces      │
//! │                  best    best       best          exclusivity + cap     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ranking is shared: larger clamped amount first, then the lower priority
//! number, then the earlier rule.

mod best_wins;
mod grouped;
mod sequential;

pub use best_wins::BestWinsEngine;
pub use grouped::GroupedSelector;
pub use sequential::SequentialEngine;

use crate::effect::Outcome;
use crate::pricing::{OrderContext, OrderPricing};
use crate::rule::DiscountRule;
use crate::types::SelectedDiscount;

/// Common face of every strategy that ends in a final ledger.
pub trait PricingStrategy {
    /// Prices `ctx` with `rules`. Empty means no price could be produced.
    fn price(&self, ctx: &OrderContext, rules: &[DiscountRule]) -> Outcome<OrderPricing>;
}

/// Evaluates every rule against the same `ctx`, dropping ineligible ones.
///
/// All rules run even after a fault; the first fault in rule order is the
/// one reported.
pub(crate) fn eligible_candidates<'a, I>(ctx: &OrderContext, rules: I) -> Outcome<Vec<SelectedDiscount>>
where
    I: IntoIterator<Item = &'a DiscountRule>,
{
    Outcome::traverse_eager(rules, |rule| {
        rule.candidate(ctx)
            .map(Some)
            .or_else(|| Outcome::Success(None))
    })
    .map(|candidates| candidates.into_iter().flatten().collect())
}

/// Picks the winner among already-clamped candidates.
pub(crate) fn select_best(candidates: Vec<SelectedDiscount>) -> Option<SelectedDiscount> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(incumbent) if !candidate.beats(&incumbent) => Some(incumbent),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleFault;
    use crate::money::Money;
    use crate::types::DiscountGroup;

    fn flat(name: &str, priority: i32, cents: i64) -> DiscountRule {
        DiscountRule::new(name, DiscountGroup::Campaign, priority, |_| Ok(true), move |_| {
            Ok(Money::from_cents(cents))
        })
    }

    fn ctx() -> OrderContext {
        OrderContext::new(false, false, OrderPricing::new(Money::from_cents(10000)))
    }

    #[test]
    fn test_select_best_keeps_first_on_full_tie() {
        let rules = [flat("FIRST", 3, 500), flat("SECOND", 3, 500), flat("SMALL", 1, 100)];
        let candidates = eligible_candidates(&ctx(), &rules).ok().unwrap();
        assert_eq!(select_best(candidates).unwrap().rule_name, "FIRST");
    }

    #[test]
    fn test_select_best_of_nothing() {
        assert_eq!(select_best(Vec::new()), None);
    }

    #[test]
    fn test_eligible_candidates_reports_first_fault_after_running_all() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let rules = [
            DiscountRule::new("BAD_A", DiscountGroup::Vip, 1, |_| Err(RuleFault::raised("a")), |_| {
                Ok(Money::zero())
            }),
            DiscountRule::new("BAD_B", DiscountGroup::Vip, 1, |_| Err(RuleFault::raised("b")), |_| {
                Ok(Money::zero())
            }),
            DiscountRule::new("LAST", DiscountGroup::Vip, 1, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(false)
            }, |_| Ok(Money::zero())),
        ];

        let outcome = eligible_candidates(&ctx(), &rules);
        assert_eq!(outcome.failure_cause().and_then(|e| e.failed_rule()), Some("BAD_A"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
