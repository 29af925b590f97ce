//! # Effect Types
//!
//! The three-valued substrate every strategy is written against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Outcome<T>      Success(T) │ Empty │ Failure(PricingError)            │
//! │                  ──────────   ─────   ─────────────────────            │
//! │                  a value      nothing  something broke                 │
//! │                               applies  (fail-fast)                     │
//! │                                                                         │
//! │  Option<T>       std Option + OptionExt bridges into Outcome           │
//! │                                                                         │
//! │  Validation<T>   Valid(T) │ Invalid(Vec<String>)                       │
//! │                  never short-circuits: combining keeps EVERY error     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Empty` is deliberately distinct from `Failure`: "no rule was eligible" is
//! a normal answer, "a rule crashed" is not.

mod option;
mod outcome;
mod validation;

pub use option::OptionExt;
pub use outcome::Outcome;
pub use validation::Validation;
