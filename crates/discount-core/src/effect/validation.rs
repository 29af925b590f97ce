//! Error-accumulating validation.

use super::Outcome;
use crate::error::PricingError;

/// Either a value or EVERY error message found while producing it.
///
/// Unlike [`Outcome`], combining two validations never stops at the first
/// problem:
/// ```text
///   Invalid["a"]  zip  Invalid["b", "c"]   ═►  Invalid["a", "b", "c"]
///   Valid(x)      zip  Invalid["b"]        ═►  Invalid["b"]
///   Valid(x)      zip  Valid(y)            ═►  Valid((x, y))
/// ```
///
/// ## Example
/// ```rust
/// use discount_core::effect::Validation;
///
/// let name: Validation<&str> = Validation::invalid("name is required");
/// let qty: Validation<u32> = Validation::invalid("quantity must be positive");
///
/// let both = Validation::map2(name, qty, |n, q| (n, q));
/// assert_eq!(both.errors(), ["name is required", "quantity must be positive"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Validation<T> {
    Valid(T),
    /// Never empty.
    Invalid(Vec<String>),
}

impl<T> Validation<T> {
    #[inline]
    pub const fn valid(value: T) -> Self {
        Validation::Valid(value)
    }

    /// A single complaint. Accepts anything displayable, including
    /// [`ValidationError`](crate::error::ValidationError).
    pub fn invalid(error: impl ToString) -> Self {
        Validation::Invalid(vec![error.to_string()])
    }

    /// `Valid(value)` when `errors` is empty, `Invalid(errors)` otherwise.
    pub fn check(value: T, errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Validation::Valid(value)
        } else {
            Validation::Invalid(errors)
        }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    /// All accumulated messages; empty for a valid value.
    pub fn errors(&self) -> &[String] {
        match self {
            Validation::Valid(_) => &[],
            Validation::Invalid(errors) => errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validation<U> {
        match self {
            Validation::Valid(v) => Validation::Valid(f(v)),
            Validation::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Dependent step. Only runs on a valid value, since it needs that value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Validation<U>) -> Validation<U> {
        match self {
            Validation::Valid(v) => f(v),
            Validation::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Pairs two independent validations, keeping errors from both sides,
    /// left first.
    pub fn zip<U>(self, other: Validation<U>) -> Validation<(T, U)> {
        match (self, other) {
            (Validation::Valid(a), Validation::Valid(b)) => Validation::Valid((a, b)),
            (Validation::Invalid(mut left), Validation::Invalid(right)) => {
                left.extend(right);
                Validation::Invalid(left)
            }
            (Validation::Invalid(errors), Validation::Valid(_))
            | (Validation::Valid(_), Validation::Invalid(errors)) => Validation::Invalid(errors),
        }
    }

    pub fn map2<U, R>(a: Validation<T>, b: Validation<U>, f: impl FnOnce(T, U) -> R) -> Validation<R> {
        a.zip(b).map(|(a, b)| f(a, b))
    }

    pub fn map3<U, V, R>(
        a: Validation<T>,
        b: Validation<U>,
        c: Validation<V>,
        f: impl FnOnce(T, U, V) -> R,
    ) -> Validation<R> {
        a.zip(b).zip(c).map(|((a, b), c)| f(a, b, c))
    }

    /// Collapses every error into one `PricingError::Invalid` failure
    /// (messages joined with `"; "`).
    pub fn into_outcome(self) -> Outcome<T> {
        match self {
            Validation::Valid(v) => Outcome::Success(v),
            Validation::Invalid(errors) => Outcome::Failure(PricingError::Invalid(errors)),
        }
    }

    pub fn into_result(self) -> Result<T, PricingError> {
        match self {
            Validation::Valid(v) => Ok(v),
            Validation::Invalid(errors) => Err(PricingError::Invalid(errors)),
        }
    }
}

/// Collects every error from every element.
impl<T> FromIterator<Validation<T>> for Validation<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Validation<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for item in iter {
            match item {
                Validation::Valid(v) => values.push(v),
                Validation::Invalid(e) => errors.extend(e),
            }
        }
        Validation::check(values, errors)
    }
}
