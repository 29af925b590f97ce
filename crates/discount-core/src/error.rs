//! # Error Types
//!
//! Domain-specific error types for discount-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  discount-core errors (this file)                                      │
//! │  ├── PricingError     - Cause carried by Outcome::Failure              │
//! │  ├── RuleFault        - What a rule function reports when it breaks    │
//! │  ├── ValidationError  - One accumulated input complaint                │
//! │  └── MoneyParseError  - Decimal text that is not an amount             │
//! │                                                                         │
//! │  discount-quote errors (separate crate)                                │
//! │  └── QuoteError       - Configuration load/save failures               │
//! │                                                                         │
//! │  Flow: RuleFault → PricingError::RuleFailed → Outcome::Failure         │
//! │        ValidationError* → Validation::Invalid → PricingError::Invalid  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (rule name, index, field)
//! 3. Errors are enum variants, never bare String
//! 4. "Nothing applicable" is NOT an error; it is `Outcome::Empty`

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// The cause carried by a failed [`Outcome`](crate::effect::Outcome).
///
/// A failure always surfaces at the boundary as one of these; faults are never
/// swallowed on the way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A rule's eligibility or amount function faulted.
    ///
    /// ## When This Occurs
    /// - The eligibility predicate returned `Err`
    /// - The amount function returned `Err` (including a missing amount)
    ///
    /// ## User Workflow
    /// ```text
    /// evaluate(VIP10) ──► amount fn returns Err("boom")
    ///      │
    ///      ▼
    /// RuleFailed { rule: "VIP10", cause: Raised("boom") }
    ///      │
    ///      ▼
    /// Strategy aborts, no partial pricing escapes
    /// ```
    #[error("rule '{rule}' failed: {cause}")]
    RuleFailed {
        rule: String,
        #[source]
        cause: RuleFault,
    },

    /// Input validation failed; every complaint is kept.
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    /// A value was demanded from an `Empty` outcome.
    #[error("No value present")]
    NoValue,

    /// Free-form failure (e.g. a failed `filter`).
    #[error("{0}")]
    Message(String),

    /// A failure re-labelled with extra context, keeping the original cause.
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        cause: Box<PricingError>,
    },
}

impl PricingError {
    /// Creates a RuleFailed error for a given rule name.
    pub fn rule_failed(rule: impl Into<String>, cause: RuleFault) -> Self {
        PricingError::RuleFailed {
            rule: rule.into(),
            cause,
        }
    }

    /// Creates a free-form failure.
    pub fn message(message: impl Into<String>) -> Self {
        PricingError::Message(message.into())
    }

    /// Returns the rule name if this failure came from a rule.
    pub fn failed_rule(&self) -> Option<&str> {
        match self {
            PricingError::RuleFailed { rule, .. } => Some(rule),
            PricingError::Context { cause, .. } => cause.failed_rule(),
            _ => None,
        }
    }
}

// =============================================================================
// Rule Fault
// =============================================================================

/// What a rule's eligibility or amount function reports instead of a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFault {
    /// The function gave up with a message.
    #[error("{0}")]
    Raised(String),

    /// The rule was eligible but had no amount to offer.
    ///
    /// Eligibility implies a usable number is owed, so this is a fault and
    /// never an absence.
    #[error("eligible rule produced no amount")]
    MissingAmount,

    /// The computed amount is unusable (overflow, nonsense input).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl RuleFault {
    /// Shorthand for `RuleFault::Raised`.
    pub fn raised(message: impl Into<String>) -> Self {
        RuleFault::Raised(message.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation complaints.
///
/// These are rendered to strings and accumulated by
/// [`Validation`](crate::effect::Validation); no check short-circuits another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The order context was not supplied.
    #[error("OrderContext is required")]
    ContextRequired,

    #[error("Subtotal cannot be negative")]
    NegativeSubtotal,

    #[error("Discount total cannot be negative")]
    NegativeDiscountTotal,

    /// A ledger whose discount already exceeds its subtotal would start with a
    /// negative total.
    #[error("Discount total cannot exceed subtotal")]
    DiscountExceedsSubtotal,

    #[error("At least one discount rule is required")]
    NoRules,

    /// Blank or missing name; the index is all we can point at.
    #[error("Rule at index {index} must have a name")]
    MissingRuleName { index: usize },

    #[error("Rule '{rule}' must have a group")]
    MissingGroup { rule: String },

    #[error("Rule '{rule}' must have an eligibility predicate")]
    MissingEligibility { rule: String },

    #[error("Rule '{rule}' must have a calculation function")]
    MissingAmountFn { rule: String },

    /// Rule names identify audit rows, so they must be unique per request.
    #[error("Rule name '{rule}' is duplicated")]
    DuplicateRuleName { rule: String },

    /// A required request field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., subtotal that is not a number).
    #[error("{field} must be {expected}")]
    InvalidFormat { field: String, expected: String },
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Decimal text that could not be turned into [`Money`](crate::money::Money).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal amount")]
    Invalid(String),

    #[error("amount is out of range")]
    Overflow,
}

// =============================================================================
// Unit Tests
// =============================================================================
