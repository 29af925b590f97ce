//! # Dynamic Campaign Tiers
//!
//! An unbounded, monotone sequence of `(threshold, rate)` pairs, cut down to
//! the tiers a given subtotal can reach.
//!
//! ```text
//!   500.00 @ 2%  ─►  1000.00 @ 3%  ─►  1500.00 @ 4%  ─►  …  ─►  ∞
//!        │                │                 │
//!        └── take_while(threshold ≤ subtotal && rate ≤ ceiling) ──┘
//!                               │
//!                               ▼
//!              OVER_500_DYNAMIC, OVER_1000_DYNAMIC, …
//! ```

use std::iter;

use discount_core::{DiscountGroup, DiscountRule, Money, OrderContext, Rate, RuleFault};

/// Highest priority number a tier can get; each whole percent of rate
/// subtracts one, so richer tiers win ties.
const TIER_PRIORITY_BASE: i32 = 100;

/// `rate` of the running total. A product outside the i64 cent range is a
/// fault, not a clamped amount.
pub(crate) fn share_of_total(ctx: &OrderContext, rate: Rate) -> Result<Money, RuleFault> {
    let total = ctx.pricing().total();
    total.checked_percent(rate).ok_or_else(|| {
        RuleFault::InvalidAmount(format!("{} bps of {} is out of range", rate.bps(), total))
    })
}

/// One step of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignTier {
    pub threshold: Money,
    pub rate: Rate,
}

impl CampaignTier {
    /// `OVER_<whole threshold>_DYNAMIC`.
    pub fn rule_name(&self) -> String {
        format!("OVER_{}_DYNAMIC", self.threshold.major())
    }

    pub fn priority(&self) -> i32 {
        TIER_PRIORITY_BASE - i32::try_from(self.rate.whole_percent()).unwrap_or(TIER_PRIORITY_BASE)
    }

    /// Eligible once the running total reaches the threshold; takes `rate`
    /// of that total.
    pub fn to_rule(self) -> DiscountRule {
        let CampaignTier { threshold, rate } = self;
        DiscountRule::new(
            self.rule_name(),
            DiscountGroup::Campaign,
            self.priority(),
            move |ctx| Ok(ctx.pricing().total() >= threshold),
            move |ctx| share_of_total(ctx, rate),
        )
    }
}

/// Generator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSchedule {
    pub base_threshold: Money,
    pub threshold_step: Money,
    pub base_rate: Rate,
    pub rate_step: Rate,
    /// Ceiling on generated rates. Never above [`Rate::FULL`].
    pub max_rate: Rate,
}

impl Default for TierSchedule {
    /// 500.00 @ 2%, +500.00 / +1% per tier, 10% ceiling.
    fn default() -> Self {
        TierSchedule {
            base_threshold: Money::from_cents(50_000),
            threshold_step: Money::from_cents(50_000),
            base_rate: Rate::from_bps(200),
            rate_step: Rate::from_bps(100),
            max_rate: Rate::from_bps(1000),
        }
    }
}

impl TierSchedule {
    /// The full, unbounded sequence. Ends only if the arithmetic would
    /// overflow.
    pub fn tiers(&self) -> impl Iterator<Item = CampaignTier> {
        let TierSchedule {
            threshold_step,
            rate_step,
            ..
        } = *self;
        let first = CampaignTier {
            threshold: self.base_threshold,
            rate: self.base_rate,
        };

        iter::successors(Some(first), move |tier| {
            let threshold = tier.threshold.cents().checked_add(threshold_step.cents())?;
            let rate = tier.rate.bps().checked_add(rate_step.bps())?;
            Some(CampaignTier {
                threshold: Money::from_cents(threshold),
                rate: Rate::from_bps(rate),
            })
        })
    }

    /// Tiers reachable by `subtotal` without passing the rate ceiling.
    ///
    /// Relies on both components growing, so `take_while` can stop early.
    /// The ceiling is clamped to 100%, which bounds the count by the number
    /// of rate steps below it whatever the subtotal.
    pub fn applicable(&self, subtotal: Money) -> impl Iterator<Item = CampaignTier> {
        let max_rate = self.max_rate.min(Rate::FULL);
        self.tiers()
            .take_while(move |tier| tier.threshold <= subtotal && tier.rate <= max_rate)
    }

    pub fn rules_for(&self, subtotal: Money) -> Vec<DiscountRule> {
        self.applicable(subtotal).map(CampaignTier::to_rule).collect()
    }
}
