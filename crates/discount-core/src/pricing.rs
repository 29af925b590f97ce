//! # Pricing Ledger & Order Context
//!
//! Immutable values threaded through every strategy.
//!
//! ## Value Replacement, Never Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   OrderPricing{1200.00, 0.00}                                           │
//! │        │ add_discount(120.00)                                           │
//! │        ▼                                                                │
//! │   OrderPricing{1200.00, 120.00}   ◄── NEW value; the old one is intact  │
//! │        │ add_discount(5000.00)                                          │
//! │        ▼                                                                │
//! │   OrderPricing{1200.00, 1200.00}  ◄── clamped: total never below 0      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `total` is derived, never stored, so `total = subtotal − discount_total`
//! cannot drift.

use crate::money::Money;

// =============================================================================
// Order Pricing
// =============================================================================

/// Immutable subtotal/discount snapshot.
///
/// ## Invariants (for every value produced by `new` + `add_discount`)
/// - `total() == subtotal() - discount_total()`
/// - `discount_total() >= 0`
/// - `total() >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderPricing {
    subtotal: Money,
    discount_total: Money,
}

impl OrderPricing {
    /// Starts a ledger with no discount applied.
    pub const fn new(subtotal: Money) -> Self {
        OrderPricing {
            subtotal,
            discount_total: Money::zero(),
        }
    }

    /// Restores a ledger that already carries a discount.
    ///
    /// Values are taken as-is so validation can reject a bad ledger instead
    /// of silently repairing it.
    pub const fn from_parts(subtotal: Money, discount_total: Money) -> Self {
        OrderPricing {
            subtotal,
            discount_total,
        }
    }

    #[inline]
    pub const fn subtotal(&self) -> Money {
        self.subtotal
    }

    #[inline]
    pub const fn discount_total(&self) -> Money {
        self.discount_total
    }

    /// `subtotal - discount_total`.
    #[inline]
    pub fn total(&self) -> Money {
        self.subtotal - self.discount_total
    }

    /// Clamps a requested discount to `[0, max(total, 0)]`.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use discount_core::pricing::OrderPricing;
    ///
    /// let pricing = OrderPricing::new(Money::from_cents(10000));
    /// assert_eq!(pricing.clamp_discount(Money::from_cents(-500)), Money::zero());
    /// assert_eq!(pricing.clamp_discount(Money::from_cents(25000)).cents(), 10000);
    /// ```
    pub fn clamp_discount(&self, requested: Money) -> Money {
        requested.non_negative().min(self.total().non_negative())
    }

    /// Returns a NEW ledger with `clamp_discount(discount)` added.
    ///
    /// Non-positive discounts leave the ledger unchanged; a discount larger
    /// than the remaining total takes the total to exactly zero.
    #[must_use]
    pub fn add_discount(&self, discount: Money) -> Self {
        OrderPricing {
            subtotal: self.subtotal,
            discount_total: self.discount_total + self.clamp_discount(discount),
        }
    }
}

// =============================================================================
// Order Context
// =============================================================================

/// Immutable request facts plus the current ledger.
///
/// Rules read the context; strategies replace its pricing with
/// [`with_pricing`](OrderContext::with_pricing) as discounts land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderContext {
    /// Customer is a VIP.
    pub vip: bool,
    /// Customer presented a coupon.
    pub has_coupon: bool,
    pricing: OrderPricing,
}

impl OrderContext {
    pub const fn new(vip: bool, has_coupon: bool, pricing: OrderPricing) -> Self {
        OrderContext {
            vip,
            has_coupon,
            pricing,
        }
    }

    #[inline]
    pub const fn pricing(&self) -> &OrderPricing {
        &self.pricing
    }

    /// Returns a NEW context with the same facts and the given ledger.
    #[must_use]
    pub const fn with_pricing(&self, pricing: OrderPricing) -> Self {
        OrderContext {
            vip: self.vip,
            has_coupon: self.has_coupon,
            pricing,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cents(value: i64) -> Money {
        Money::from_cents(value)
    }

    #[test]
    fn test_new_ledger_has_no_discount() {
        let pricing = OrderPricing::new(cents(120000));
        assert_eq!(pricing.subtotal(), cents(120000));
        assert_eq!(pricing.discount_total(), Money::zero());
        assert_eq!(pricing.total(), cents(120000));
    }

    #[test]
    fn test_add_discount_returns_new_value() {
        let original = OrderPricing::new(cents(120000));
        let discounted = original.add_discount(cents(12000));

        assert_eq!(original.discount_total(), Money::zero());
        assert_eq!(discounted.discount_total(), cents(12000));
        assert_eq!(discounted.total(), cents(108000));
    }

    #[test]
    fn test_add_discount_clamps_to_total() {
        let pricing = OrderPricing::new(cents(10000)).add_discount(cents(999999));
        assert_eq!(pricing.total(), Money::zero());
        assert_eq!(pricing.discount_total(), cents(10000));

        // Already at zero: further discounts are no-ops
        assert_eq!(pricing.add_discount(cents(100)), pricing);
    }

    #[test]
    fn test_add_negative_discount_is_ignored() {
        let pricing = OrderPricing::new(cents(10000)).add_discount(cents(2500));
        assert_eq!(pricing.add_discount(cents(-2500)), pricing);
    }

    #[test]
    fn test_with_pricing_keeps_facts() {
        let ctx = OrderContext::new(true, false, OrderPricing::new(cents(5000)));
        let next = ctx.with_pricing(ctx.pricing().add_discount(cents(500)));

        assert!(next.vip);
        assert!(!next.has_coupon);
        assert_eq!(next.pricing().total(), cents(4500));
        assert_eq!(ctx.pricing().total(), cents(5000));
    }

    proptest! {
        #[test]
        fn prop_ledger_invariants_hold(
            subtotal in 0i64..10_000_000,
            discounts in proptest::collection::vec(-1_000_000i64..1_000_000, 0..20)
        ) {
            let mut pricing = OrderPricing::new(cents(subtotal));
            for discount in discounts {
                let before = pricing;
                pricing = pricing.add_discount(cents(discount));

                prop_assert_eq!(pricing.total(), pricing.subtotal() - pricing.discount_total());
                prop_assert!(!pricing.discount_total().is_negative());
                prop_assert!(!pricing.total().is_negative());
                prop_assert!(pricing.discount_total() >= before.discount_total());
                if discount <= 0 {
                    prop_assert_eq!(pricing, before);
                }
            }
        }
    }
}
