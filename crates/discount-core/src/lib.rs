//! # discount-core: Pure Discount Pricing Engine
//!
//! This crate turns an order context plus a list of discount rules into a
//! final, auditable price. Everything here is a pure function over immutable
//! values: no I/O, no clocks, no shared mutable state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Discount Pricing                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Request Boundary (discount-quote)               │   │
//! │  │   parse request ──► build rule catalog ──► shape response       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Option<&OrderContext>, &[RuleDraft]    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ discount-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐ │   │
//! │  │   │ validation │─►│  engine    │─►│  applier   │─►│ Pricing  │ │   │
//! │  │   │ accumulate │  │ per-group  │  │ exclusivity│  │ Result   │ │   │
//! │  │   │ all errors │  │ winners    │  │ cap, floor │  │ + steps  │ │   │
//! │  │   └────────────┘  └────────────┘  └────────────┘  └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   effect: Outcome (Success │ Empty │ Failure), Validation      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`effect`] - `Outcome`, `OptionExt` and `Validation`
//! - [`money`] - Money type with integer cents and half-up rounding
//! - [`pricing`] - Immutable ledger and order context
//! - [`rule`] - Rules as metadata plus a capability pair
//! - [`engine`] - Sequential, best-wins and per-group strategies
//! - [`policy`] - Exclusivity and cap policies
//! - [`applier`] - The stacking fold and its audit trail
//! - [`orchestrator`] - Validation → selection → stacking
//! - [`validation`] - Error-accumulating request checks
//! - [`error`] - Failure causes and validation complaints
//!
//! ## Example Usage
//!
//! ```rust
//! use discount_core::{DiscountOrchestrator, Money, OrderContext, OrderPricing, Rate};
//! use discount_core::{DiscountGroup, RuleDraft};
//!
//! let ctx = OrderContext::new(true, false, OrderPricing::new(Money::from_cents(100_000)));
//! let vip = RuleDraft::new()
//!     .name("VIP_10_PERCENT")
//!     .group(DiscountGroup::Vip)
//!     .priority(10)
//!     .eligible(|ctx| Ok(ctx.vip))
//!     .amount(|ctx| Ok(ctx.pricing().total().percent(Rate::from_bps(1000))));
//!
//! let result = DiscountOrchestrator::default().price(Some(&ctx), &[vip]);
//! let priced = result.ok().unwrap();
//! assert_eq!(priced.pricing.total(), Money::from_cents(90_000));
//! assert_eq!(priced.steps[0].note.to_string(), "APPLIED");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod applier;
pub mod effect;
pub mod engine;
pub mod error;
pub mod money;
pub mod orchestrator;
pub mod policy;
pub mod pricing;
pub mod rule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use applier::{GroupedStackingApplier, StackingState};
pub use effect::{OptionExt, Outcome, Validation};
pub use engine::{BestWinsEngine, GroupedSelector, PricingStrategy, SequentialEngine};
pub use error::{MoneyParseError, PricingError, RuleFault, ValidationError};
pub use money::Money;
pub use orchestrator::{DiscountOrchestrator, PricingPolicy};
pub use policy::{CapPolicy, ExclusivityPolicy};
pub use pricing::{OrderContext, OrderPricing};
pub use rule::{DiscountRule, RuleDraft};
pub use types::*;
