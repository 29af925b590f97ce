//! # Grouped Stacking Applier
//!
//! Stacks per-group winners in a fixed visitation order while enforcing
//! exclusivity, the lifetime cap and the zero floor.
//!
//! ## Fold
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  StackingState₀ { pricing, cap_remaining, applied_groups: {}, steps }   │
//! │        │                                                                │
//! │        │  for group in group_order (skipping groups without a winner)   │
//! │        ▼                                                                │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │ blocked by an applied group?                                │       │
//! │  │   yes ─► step(applied = 0, SKIPPED: blocked …)               │       │
//! │  │          group NOT marked applied, cap untouched             │       │
//! │  │   no  ─► applyable = min(requested, cap_remaining, total)    │       │
//! │  │          APPLIED / CAPPED / SKIPPED: cap exhausted …         │       │
//! │  │          group marked applied, cap_remaining -= applyable    │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  StackingState₁ ─► … ─► StackingStateₙ ─► PricingResult                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The accumulator is an explicit value, so [`GroupedStackingApplier::replay`]
//! can hand back every intermediate state for audit.

use std::collections::BTreeSet;

use tracing::debug;

use crate::money::Money;
use crate::policy::{CapPolicy, ExclusivityPolicy};
use crate::pricing::{OrderContext, OrderPricing};
use crate::types::{AppliedStep, DiscountGroup, PricingResult, SelectedDiscount, StepNote};

// =============================================================================
// Stacking State
// =============================================================================

/// Accumulator threaded through the stacking fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackingState {
    pub pricing: OrderPricing,
    /// Discount still allowed under the cap. Never negative.
    pub cap_remaining: Money,
    /// Groups that went through the non-blocked branch, including ones that
    /// ended up applying zero.
    pub applied_groups: BTreeSet<DiscountGroup>,
    pub steps: Vec<AppliedStep>,
}

impl StackingState {
    /// Initial state: `cap_remaining = cap(initial) - initial.discount_total`,
    /// floored at zero.
    pub fn new(initial: OrderPricing, cap: &CapPolicy) -> Self {
        let cap_remaining = (cap.max_allowed_discount(&initial) - initial.discount_total()).non_negative();
        StackingState {
            pricing: initial,
            cap_remaining,
            applied_groups: BTreeSet::new(),
            steps: Vec::new(),
        }
    }

    /// Offers one group winner and returns the next state.
    pub fn step(mut self, candidate: &SelectedDiscount, exclusivity: &ExclusivityPolicy) -> Self {
        let total_before = self.pricing.total();
        let requested = candidate.amount.non_negative();

        if !exclusivity.is_allowed(&self.applied_groups, candidate.group) {
            debug!(rule = %candidate.rule_name, group = %candidate.group, "Blocked by exclusivity");
            self.steps.push(AppliedStep {
                rule_name: candidate.rule_name.clone(),
                group: candidate.group,
                requested_discount: requested,
                applied_discount: Money::zero(),
                total_before,
                total_after: total_before,
                note: StepNote::BlockedByExclusivity,
            });
            return self;
        }

        let applyable = requested.min(self.cap_remaining).min(total_before.non_negative());
        let pricing = self.pricing.add_discount(applyable);

        let note = if applyable == requested {
            StepNote::Applied
        } else if applyable.is_positive() {
            StepNote::Capped {
                requested,
                applied: applyable,
                cap_remaining: self.cap_remaining,
            }
        } else {
            StepNote::CapExhausted
        };

        debug!(
            rule = %candidate.rule_name,
            group = %candidate.group,
            requested = %requested,
            applied = %applyable,
            cap_remaining = %self.cap_remaining,
            note = %note,
            "Stacking step"
        );

        self.steps.push(AppliedStep {
            rule_name: candidate.rule_name.clone(),
            group: candidate.group,
            requested_discount: requested,
            applied_discount: applyable,
            total_before,
            total_after: pricing.total(),
            note,
        });
        self.pricing = pricing;
        self.applied_groups.insert(candidate.group);
        self.cap_remaining = (self.cap_remaining - applyable).non_negative();
        self
    }

    pub fn finish(self) -> PricingResult {
        PricingResult {
            pricing: self.pricing,
            steps: self.steps,
        }
    }
}

// =============================================================================
// Applier
// =============================================================================

/// Runs the stacking fold.
///
/// Groups absent from `group_order` are never visited; a group listed twice
/// is visited once.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedStackingApplier;

impl GroupedStackingApplier {
    pub fn new() -> Self {
        GroupedStackingApplier
    }

    pub fn apply(
        &self,
        ctx: &OrderContext,
        selected: &[SelectedDiscount],
        group_order: &[DiscountGroup],
        exclusivity: &ExclusivityPolicy,
        cap: &CapPolicy,
    ) -> PricingResult {
        visitation(selected, group_order)
            .fold(StackingState::new(*ctx.pricing(), cap), |state, candidate| {
                state.step(candidate, exclusivity)
            })
            .finish()
    }

    /// Every state of the fold, starting with the initial one.
    pub fn replay(
        &self,
        ctx: &OrderContext,
        selected: &[SelectedDiscount],
        group_order: &[DiscountGroup],
        exclusivity: &ExclusivityPolicy,
        cap: &CapPolicy,
    ) -> Vec<StackingState> {
        let initial = StackingState::new(*ctx.pricing(), cap);
        let mut states = vec![initial.clone()];
        states.extend(visitation(selected, group_order).scan(initial, |state, candidate| {
            *state = state.clone().step(candidate, exclusivity);
            Some(state.clone())
        }));
        states
    }
}

/// Candidates in visitation order.
fn visitation<'a>(
    selected: &'a [SelectedDiscount],
    group_order: &'a [DiscountGroup],
) -> impl Iterator<Item = &'a SelectedDiscount> + 'a {
    let mut seen = BTreeSet::new();
    group_order
        .iter()
        .filter(move |group| seen.insert(**group))
        .filter_map(move |group| selected.iter().find(|candidate| candidate.group == *group))
}

// =============================================================================
// Unit Tests
// =============================================================================
