//! # Stacking Policies
//!
//! Constraints the grouped applier enforces while stacking group winners.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ExclusivityPolicy   directed: "once A applied, B may not"             │
//! │                                                                         │
//! │        COUPON ──blocks──► CAMPAIGN                                      │
//! │        CAMPAIGN ──blocks──► COUPON       (mutual = two directed edges)  │
//! │                                                                         │
//! │  CapPolicy           lifetime ceiling = subtotal × ratio                │
//! │                      layered ON TOP of the "never below zero" floor     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::money::Money;
use crate::pricing::OrderPricing;
use crate::types::{DiscountGroup, Rate};

// =============================================================================
// Exclusivity
// =============================================================================

/// Directed "blocks" relation between groups.
///
/// Not symmetric unless both directions are registered. Groups that were
/// never registered block nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusivityPolicy {
    blocks: BTreeMap<DiscountGroup, BTreeSet<DiscountGroup>>,
}

impl ExclusivityPolicy {
    /// A policy that allows every combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Once `applied` is applied, none of `blocked` may apply later in the
    /// same pass. Repeated calls for the same group add to its set.
    pub fn block(mut self, applied: DiscountGroup, blocked: impl IntoIterator<Item = DiscountGroup>) -> Self {
        self.blocks.entry(applied).or_default().extend(blocked);
        self
    }

    /// Registers both directions.
    pub fn mutually_exclusive(self, a: DiscountGroup, b: DiscountGroup) -> Self {
        self.block(a, [b]).block(b, [a])
    }

    /// Groups blocked once `group` has applied.
    pub fn blocked_by(&self, group: DiscountGroup) -> impl Iterator<Item = DiscountGroup> + '_ {
        self.blocks.get(&group).into_iter().flatten().copied()
    }

    /// True iff no group in `applied` blocks `candidate`.
    pub fn is_allowed(&self, applied: &BTreeSet<DiscountGroup>, candidate: DiscountGroup) -> bool {
        !applied
            .iter()
            .any(|group| self.blocks.get(group).is_some_and(|blocked| blocked.contains(&candidate)))
    }
}

// =============================================================================
// Cap
// =============================================================================

/// Ceiling on the lifetime `discount_total`, as a fraction of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapPolicy {
    ratio: Rate,
}

impl CapPolicy {
    pub const fn new(ratio: Rate) -> Self {
        CapPolicy { ratio }
    }

    #[inline]
    pub const fn ratio(&self) -> Rate {
        self.ratio
    }

    /// `subtotal × ratio`, rounded half-up to the cent.
    pub fn max_allowed_discount(&self, pricing: &OrderPricing) -> Money {
        pricing.subtotal().percent(self.ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountGroup::*;

    fn applied(groups: &[DiscountGroup]) -> BTreeSet<DiscountGroup> {
        groups.iter().copied().collect()
    }

    #[test]
    fn test_block_is_directed() {
        let policy = ExclusivityPolicy::new().block(Coupon, [Campaign]);
        assert!(!policy.is_allowed(&applied(&[Coupon]), Campaign));
        assert!(policy.is_allowed(&applied(&[Campaign]), Coupon));
    }

    #[test]
    fn test_mutually_exclusive_registers_both_ways() {
        let policy = ExclusivityPolicy::new().mutually_exclusive(Coupon, Campaign);
        assert!(!policy.is_allowed(&applied(&[Coupon]), Campaign));
        assert!(!policy.is_allowed(&applied(&[Campaign]), Coupon));
        assert!(policy.is_allowed(&applied(&[Campaign, Coupon]), Vip));
    }

    #[test]
    fn test_unregistered_groups_block_nothing() {
        let policy = ExclusivityPolicy::new();
        assert!(policy.is_allowed(&applied(&[Vip, Coupon, Campaign]), Vip));
        assert_eq!(policy.blocked_by(Vip).count(), 0);
    }

    #[test]
    fn test_block_accumulates() {
        let policy = ExclusivityPolicy::new().block(Vip, [Coupon]).block(Vip, [Campaign]);
        let blocked: Vec<_> = policy.blocked_by(Vip).collect();
        assert_eq!(blocked, [Coupon, Campaign]);
    }

    #[test]
    fn test_cap_rounds_half_up() {
        let cap = CapPolicy::new(Rate::from_bps(3000));
        assert_eq!(cap.max_allowed_discount(&OrderPricing::new(Money::from_cents(100_000))), Money::from_cents(30_000));
        // 0.05 × 30% = 0.015 → 0.02
        assert_eq!(cap.max_allowed_discount(&OrderPricing::new(Money::from_cents(5))), Money::from_cents(2));
    }
}
