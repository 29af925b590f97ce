//! Per-group winner selection.

use std::collections::BTreeMap;

use tracing::debug;

use super::{eligible_candidates, select_best};
use crate::effect::Outcome;
use crate::pricing::OrderContext;
use crate::rule::DiscountRule;
use crate::types::{DiscountGroup, SelectedDiscount};

/// Picks the best discount inside each group, all against the original
/// context.
///
/// ```text
///   rules ──partition──► VIP: [a, b]   COUPON: [c]   CAMPAIGN: [d, e]
///                              │              │                │
///                         all evaluated  all evaluated   all evaluated
///                              ▼              ▼                ▼
///                           best(a,b)      best(c)         best(d,e)
/// ```
///
/// Groups are visited in `DiscountGroup` order. A fault in any group fails
/// the whole selection; later groups are not evaluated. Groups without an
/// eligible rule are absent from the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedSelector;

impl GroupedSelector {
    pub fn new() -> Self {
        GroupedSelector
    }

    pub fn select_best_per_group(
        &self,
        ctx: &OrderContext,
        rules: &[DiscountRule],
    ) -> Outcome<Vec<SelectedDiscount>> {
        let mut by_group: BTreeMap<DiscountGroup, Vec<&DiscountRule>> = BTreeMap::new();
        for rule in rules {
            by_group.entry(rule.group()).or_default().push(rule);
        }

        let winners = Outcome::traverse(by_group, |(group, group_rules)| {
            eligible_candidates(ctx, group_rules).map(|candidates| {
                let best = select_best(candidates);
                if let Some(winner) = &best {
                    debug!(group = %group, rule = %winner.rule_name, amount = %winner.amount, "Group winner");
                }
                best
            })
        });

        winners.map(|per_group| per_group.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleFault;
    use crate::money::Money;
    use crate::pricing::OrderPricing;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ctx() -> OrderContext {
        OrderContext::new(true, false, OrderPricing::new(Money::from_cents(100_000)))
    }

    fn flat(name: &str, group: DiscountGroup, priority: i32, cents: i64) -> DiscountRule {
        DiscountRule::new(name, group, priority, |_| Ok(true), move |_| Ok(Money::from_cents(cents)))
    }

    #[test]
    fn test_one_winner_per_group_and_absent_groups() {
        let rules = [
            flat("CAMP_SMALL", DiscountGroup::Campaign, 1, 1000),
            flat("VIP", DiscountGroup::Vip, 1, 5000),
            flat("CAMP_BIG", DiscountGroup::Campaign, 9, 2000),
        ];
        let selected = GroupedSelector::new().select_best_per_group(&ctx(), &rules).ok().unwrap();

        let names: Vec<_> = selected.iter().map(|s| s.rule_name.as_str()).collect();
        assert_eq!(names, ["VIP", "CAMP_BIG"]);
        assert!(selected.iter().all(|s| s.group != DiscountGroup::Coupon));
    }

    #[test]
    fn test_no_rules_selects_nothing() {
        let selected = GroupedSelector::new().select_best_per_group(&ctx(), &[]);
        assert_eq!(selected, Outcome::Success(Vec::new()));
    }

    #[test]
    fn test_fault_in_one_group_fails_everything() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later_calls);
        let rules = [
            flat("VIP", DiscountGroup::Vip, 1, 5000),
            DiscountRule::new("BROKEN", DiscountGroup::Coupon, 1, |_| Ok(true), |_| {
                Err(RuleFault::InvalidAmount("NaN".into()))
            }),
            DiscountRule::new("CAMP", DiscountGroup::Campaign, 1, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }, |_| Ok(Money::zero())),
        ];

        let outcome = GroupedSelector::new().select_best_per_group(&ctx(), &rules);
        assert_eq!(outcome.failure_cause().and_then(|e| e.failed_rule()), Some("BROKEN"));
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }
}
