//! # Domain Types
//!
//! Core domain types shared by every pricing strategy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │      Rate       │   │ SelectedDiscount │   │   AppliedStep   │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  bps (u32)      │   │  rule_name       │   │  requested      │      │
//! │  │  1000 = 10%     │   │  group           │   │  applied        │      │
//! │  └─────────────────┘   │  priority        │   │  total_before   │      │
//! │                        │  amount          │   │  total_after    │      │
//! │  ┌─────────────────┐   └──────────────────┘   │  note           │      │
//! │  │ DiscountGroup   │                          └─────────────────┘      │
//! │  │  ─────────────  │   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │  Vip            │   │  PricingResult   │   │    StepNote     │      │
//! │  │  Coupon         │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  Campaign       │   │  pricing         │   │  Applied        │      │
//! │  └─────────────────┘   │  steps           │   │  Capped         │      │
//! │                        └──────────────────┘   │  Blocked…       │      │
//! │                                               │  CapExhausted   │      │
//! │                                               └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::OrderPricing;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (VIP discount), 3000 bps = 30% (default cap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// 100%.
    pub const FULL: Rate = Rate(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the whole-percent part (`250` bps → `2`).
    #[inline]
    pub const fn whole_percent(&self) -> u32 {
        self.0 / 100
    }

}

// =============================================================================
// Discount Group
// =============================================================================

/// Category of a discount rule.
///
/// Used for per-group selection, visitation order and exclusivity. The
/// derived `Ord` only gives deterministic iteration; it is NOT a ranking.
/// Visitation order always comes from the pricing policy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountGroup {
    /// Loyalty discounts for VIP customers.
    Vip,
    /// Discounts unlocked by a coupon.
    Coupon,
    /// Store-wide or threshold campaigns.
    Campaign,
}

impl DiscountGroup {
    /// Upper-case name used in audit output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountGroup::Vip => "VIP",
            DiscountGroup::Coupon => "COUPON",
            DiscountGroup::Campaign => "CAMPAIGN",
        }
    }
}

impl fmt::Display for DiscountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vip" => Ok(DiscountGroup::Vip),
            "coupon" => Ok(DiscountGroup::Coupon),
            "campaign" => Ok(DiscountGroup::Campaign),
            _ => Err(ValidationError::InvalidFormat {
                field: "group".to_string(),
                expected: "one of: vip, coupon, campaign".to_string(),
            }),
        }
    }
}

// =============================================================================
// Selected Discount
// =============================================================================

/// A candidate discount chosen by a strategy, already clamped to
/// `[0, total]` of the context it was evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDiscount {
    pub rule_name: String,
    pub group: DiscountGroup,
    pub priority: i32,
    pub amount: Money,
}

impl SelectedDiscount {
    /// Ranking used by best-wins and per-group selection:
    /// larger amount first, then LOWER priority number.
    ///
    /// A full tie does not beat the incumbent, so the earlier rule keeps it.
    pub fn beats(&self, incumbent: &SelectedDiscount) -> bool {
        match self.amount.cmp(&incumbent.amount) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.priority < incumbent.priority,
        }
    }
}

// =============================================================================
// Step Note
// =============================================================================

/// Why an audit step ended the way it did.
///
/// `Display` renders the exact audit strings (`APPLIED`, `CAPPED: …`,
/// `SKIPPED: …`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepNote {
    /// The full requested amount was applied.
    Applied,
    /// Only part of the request fit under the cap or the total.
    Capped {
        requested: Money,
        applied: Money,
        cap_remaining: Money,
    },
    /// An already-applied group blocks this one.
    BlockedByExclusivity,
    /// Nothing fit: the cap is used up or the total already hit zero.
    CapExhausted,
}

impl fmt::Display for StepNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepNote::Applied => f.write_str("APPLIED"),
            StepNote::Capped {
                requested,
                applied,
                cap_remaining,
            } => write!(
                f,
                "CAPPED: requested={}, applied={}, capRemaining={}",
                requested, applied, cap_remaining
            ),
            StepNote::BlockedByExclusivity => f.write_str("SKIPPED: blocked by exclusivity policy"),
            StepNote::CapExhausted => f.write_str("SKIPPED: cap exhausted or total is zero"),
        }
    }
}

// =============================================================================
// Applied Step
// =============================================================================

/// One audit row: an attempt to apply a group's selected discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStep {
    pub rule_name: String,
    pub group: DiscountGroup,
    /// Selected amount, floored at zero.
    pub requested_discount: Money,
    /// What actually reached the ledger.
    pub applied_discount: Money,
    pub total_before: Money,
    pub total_after: Money,
    pub note: StepNote,
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Terminal output of the grouped pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingResult {
    pub pricing: OrderPricing,
    /// One row per visited group that had a candidate, in visitation order.
    pub steps: Vec<AppliedStep>,
}

impl PricingResult {
    /// Finds the audit row for a rule.
    pub fn step_for(&self, rule_name: &str) -> Option<&AppliedStep> {
        self.steps.iter().find(|step| step.rule_name == rule_name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(amount: i64, priority: i32) -> SelectedDiscount {
        SelectedDiscount {
            rule_name: format!("R{amount}_{priority}"),
            group: DiscountGroup::Campaign,
            priority,
            amount: Money::from_cents(amount),
        }
    }

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(250);
        assert_eq!(rate.bps(), 250);
        assert_eq!(rate.whole_percent(), 2);
        assert!(rate < Rate::FULL);
        assert_eq!(Rate::FULL.whole_percent(), 100);
    }

    #[test]
    fn test_group_parsing_and_display() {
        assert_eq!("VIP".parse::<DiscountGroup>().unwrap(), DiscountGroup::Vip);
        assert_eq!(" coupon ".parse::<DiscountGroup>().unwrap(), DiscountGroup::Coupon);
        assert_eq!("Campaign".parse::<DiscountGroup>().unwrap(), DiscountGroup::Campaign);
        assert!("loyalty".parse::<DiscountGroup>().is_err());
        assert_eq!(DiscountGroup::Campaign.to_string(), "CAMPAIGN");
    }

    #[test]
    fn test_group_serde_is_snake_case() {
        let json = serde_json::to_string(&DiscountGroup::Vip).unwrap();
        assert_eq!(json, "\"vip\"");
    }

    #[test]
    fn test_beats_prefers_amount_then_lower_priority() {
        assert!(candidate(200, 50).beats(&candidate(100, 1)));
        assert!(!candidate(100, 1).beats(&candidate(200, 50)));
        assert!(candidate(100, 1).beats(&candidate(100, 5)));
        assert!(!candidate(100, 5).beats(&candidate(100, 1)));
        // Full tie keeps the incumbent
        assert!(!candidate(100, 5).beats(&candidate(100, 5)));
    }

    #[test]
    fn test_step_note_rendering() {
        assert_eq!(StepNote::Applied.to_string(), "APPLIED");
        assert_eq!(
            StepNote::Capped {
                requested: Money::from_cents(15000),
                applied: Money::from_cents(10000),
                cap_remaining: Money::from_cents(10000),
            }
            .to_string(),
            "CAPPED: requested=150.00, applied=100.00, capRemaining=100.00"
        );
        assert_eq!(
            StepNote::BlockedByExclusivity.to_string(),
            "SKIPPED: blocked by exclusivity policy"
        );
        assert_eq!(
            StepNote::CapExhausted.to_string(),
            "SKIPPED: cap exhausted or total is zero"
        );
    }
}
