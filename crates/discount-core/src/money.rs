//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    1030.00 × 0.05 = 51.50000000000001  ❌ WRONG!                        │
//! │                                                                         │
//! │  Discount stacking compounds the error on every step.                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents (2-digit fixed point)                      │
//! │    103000 cents × 500 bps / 10000 = 5150 cents                         │
//! │    Every percentage is rounded half-up to the cent, exactly once        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::money::Money;
//! use discount_core::types::Rate;
//!
//! let subtotal: Money = "1200.00".parse().unwrap();
//! let vip = subtotal.percent(Rate::from_bps(1000)); // 10%
//! assert_eq!(vip, Money::from_cents(12000));
//! assert_eq!(vip.to_string(), "120.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::MoneyParseError;
use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (2-digit fixed point).
///
/// ## Design Decisions
/// - **i64 (signed)**: Rule authors may hand back negative amounts; the
///   ledger clamps them instead of the type forbidding them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No currency**: One request is priced in one implicit currency
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  request.subtotal ──► OrderPricing.subtotal                             │
/// │                             │                                           │
/// │  rule.amount(ctx) ──► clamp [0, total] ──► OrderPricing.discount_total  │
/// │                             │                                           │
/// │                             ▼                                           │
/// │                    OrderPricing.total ──► AppliedStep audit rows        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    ///
    /// let coupon = Money::from_cents(5000); // 50.00
    /// assert_eq!(coupon.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(250).non_negative().cents(), 250);
    /// ```
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Applies a rate and rounds half-up (away from zero) to the cent.
    ///
    /// ## Implementation
    /// Integer math on the magnitude: `(|amount| * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5); the product is taken
    /// in i128 and `None` comes back when the result leaves the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use discount_core::types::Rate;
    ///
    /// // 1030.00 × 5% = 51.50
    /// let campaign = Money::from_cents(103000).checked_percent(Rate::from_bps(500));
    /// assert_eq!(campaign, Some(Money::from_cents(5150)));
    ///
    /// // Rates above 100% can overflow
    /// assert_eq!(Money::from_cents(i64::MAX).checked_percent(Rate::from_bps(20_000)), None);
    /// ```
    pub fn checked_percent(&self, rate: Rate) -> Option<Money> {
        let magnitude = i128::from(self.0).abs() * i128::from(rate.bps());
        let rounded = i64::try_from((magnitude + 5000) / 10000).ok()?;
        Some(Money(if self.0 < 0 { -rounded } else { rounded }))
    }

    /// Like [`checked_percent`](Money::checked_percent), saturating at the
    /// i64 bounds. Never saturates for rates up to [`Rate::FULL`] unless the
    /// amount is `i64::MIN` cents.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use discount_core::types::Rate;
    ///
    /// // 0.05 × 10% = 0.005 → 0.01 (half-up)
    /// assert_eq!(Money::from_cents(5).percent(Rate::from_bps(1000)).cents(), 1);
    /// ```
    pub fn percent(&self, rate: Rate) -> Money {
        self.checked_percent(rate).unwrap_or(if self.0 < 0 {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`1200.00`, `-5.50`). Used in audit notes, so it
/// must stay locale-free.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

/// Parses decimal text into cents.
///
/// ## Rules
/// - Optional leading sign
/// - Digits with at most one decimal point (`12`, `12.5`, `.50`)
/// - More than two fraction digits round half-up on the third digit
///
/// ## Example
/// ```rust
/// use discount_core::money::Money;
///
/// assert_eq!("1200".parse::<Money>().unwrap().cents(), 120000);
/// assert_eq!("12.345".parse::<Money>().unwrap().cents(), 1235);
/// assert!("12,50".parse::<Money>().is_err());
/// ```
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(MoneyParseError::Invalid(text.to_string()));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or(MoneyParseError::Overflow)?
        };

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole_cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or(MoneyParseError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
