//! # Discount Rules
//!
//! A rule is static metadata (name, group, priority) plus a capability pair:
//! an eligibility predicate and an amount function.
//!
//! ## Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  evaluate(ctx)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  eligibility(ctx) ──Err(fault)──► Failure(rule '<name>' failed)         │
//! │       │                                                                 │
//! │       ├── false ──────────────► Empty                                  │
//! │       │                                                                 │
//! │       ▼ true                                                            │
//! │  amount(ctx) ──────Err(fault)──► Failure(rule '<name>' failed)          │
//! │       │                                                                 │
//! │       ▼ Ok(amount)                                                      │
//! │  Success(amount)   ◄── NOT clamped; clamping is the strategy's job      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are `Clone` (capabilities are shared `Arc`s) and `Send + Sync`, so a
//! provider can hand the same rule list to many concurrent requests.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::effect::Outcome;
use crate::error::{PricingError, RuleFault};
use crate::money::Money;
use crate::pricing::OrderContext;
use crate::types::{DiscountGroup, SelectedDiscount};

/// Eligibility predicate. `Err` is a fault, never "not eligible".
pub type Eligibility = Arc<dyn Fn(&OrderContext) -> Result<bool, RuleFault> + Send + Sync>;

/// Amount function. Return [`RuleFault::MissingAmount`] rather than zero when
/// an eligible rule genuinely has nothing to offer.
pub type AmountFn = Arc<dyn Fn(&OrderContext) -> Result<Money, RuleFault> + Send + Sync>;

// =============================================================================
// Discount Rule
// =============================================================================

/// A validated, ready-to-evaluate rule.
#[derive(Clone)]
pub struct DiscountRule {
    name: String,
    group: DiscountGroup,
    priority: i32,
    eligibility: Eligibility,
    amount: AmountFn,
}

impl DiscountRule {
    /// Builds a rule from plain closures.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use discount_core::pricing::{OrderContext, OrderPricing};
    /// use discount_core::rule::DiscountRule;
    /// use discount_core::types::{DiscountGroup, Rate};
    ///
    /// let vip = DiscountRule::new(
    ///     "VIP10",
    ///     DiscountGroup::Vip,
    ///     10,
    ///     |ctx| Ok(ctx.vip),
    ///     |ctx| Ok(ctx.pricing().total().percent(Rate::from_bps(1000))),
    /// );
    ///
    /// let ctx = OrderContext::new(true, false, OrderPricing::new(Money::from_cents(120000)));
    /// assert_eq!(vip.evaluate(&ctx).ok(), Some(Money::from_cents(12000)));
    /// ```
    pub fn new<E, A>(
        name: impl Into<String>,
        group: DiscountGroup,
        priority: i32,
        eligibility: E,
        amount: A,
    ) -> Self
    where
        E: Fn(&OrderContext) -> Result<bool, RuleFault> + Send + Sync + 'static,
        A: Fn(&OrderContext) -> Result<Money, RuleFault> + Send + Sync + 'static,
    {
        DiscountRule::from_capabilities(
            name,
            group,
            priority,
            Arc::new(eligibility),
            Arc::new(amount),
        )
    }

    /// Builds a rule from already-shared capabilities.
    pub fn from_capabilities(
        name: impl Into<String>,
        group: DiscountGroup,
        priority: i32,
        eligibility: Eligibility,
        amount: AmountFn,
    ) -> Self {
        DiscountRule {
            name: name.into(),
            group,
            priority,
            eligibility,
            amount,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn group(&self) -> DiscountGroup {
        self.group
    }

    /// Lower wins ties.
    #[inline]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Evaluates the rule against `ctx`. Faults are captured as `Failure`
    /// naming this rule.
    pub fn evaluate(&self, ctx: &OrderContext) -> Outcome<Money> {
        let eligible = match (self.eligibility)(ctx) {
            Ok(eligible) => eligible,
            Err(fault) => return self.fault(fault),
        };

        if !eligible {
            trace!(rule = %self.name, "Rule not eligible");
            return Outcome::Empty;
        }

        match (self.amount)(ctx) {
            Ok(amount) => {
                trace!(rule = %self.name, amount = %amount, "Rule produced amount");
                Outcome::Success(amount)
            }
            Err(fault) => self.fault(fault),
        }
    }

    /// Evaluates and clamps to `[0, ctx total]`, producing a candidate for
    /// selection.
    pub fn candidate(&self, ctx: &OrderContext) -> Outcome<SelectedDiscount> {
        self.evaluate(ctx).map(|amount| SelectedDiscount {
            rule_name: self.name.clone(),
            group: self.group,
            priority: self.priority,
            amount: ctx.pricing().clamp_discount(amount),
        })
    }

    fn fault<T>(&self, fault: RuleFault) -> Outcome<T> {
        Outcome::Failure(PricingError::rule_failed(self.name.clone(), fault))
    }
}

impl fmt::Debug for DiscountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountRule")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Rule Draft
// =============================================================================

/// A rule as a provider hands it over, before validation.
///
/// Every component is optional so that validation can name each missing
/// piece instead of failing on the first.
#[derive(Clone, Default)]
pub struct RuleDraft {
    pub name: Option<String>,
    pub group: Option<DiscountGroup>,
    pub priority: i32,
    pub eligibility: Option<Eligibility>,
    pub amount: Option<AmountFn>,
}

impl RuleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: DiscountGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn eligible<E>(mut self, eligibility: E) -> Self
    where
        E: Fn(&OrderContext) -> Result<bool, RuleFault> + Send + Sync + 'static,
    {
        self.eligibility = Some(Arc::new(eligibility));
        self
    }

    pub fn amount<A>(mut self, amount: A) -> Self
    where
        A: Fn(&OrderContext) -> Result<Money, RuleFault> + Send + Sync + 'static,
    {
        self.amount = Some(Arc::new(amount));
        self
    }
}

impl From<DiscountRule> for RuleDraft {
    fn from(rule: DiscountRule) -> Self {
        RuleDraft {
            name: Some(rule.name),
            group: Some(rule.group),
            priority: rule.priority,
            eligibility: Some(rule.eligibility),
            amount: Some(rule.amount),
        }
    }
}

impl fmt::Debug for RuleDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDraft")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("priority", &self.priority)
            .field("has_eligibility", &self.eligibility.is_some())
            .field("has_amount", &self.amount.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
