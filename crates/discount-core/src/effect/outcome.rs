//! Three-state outcome: success, absence, failure.

use crate::error::PricingError;

/// Result of a pricing computation.
///
/// ## Combinator Semantics
/// ```text
///                 Success(v)            Empty           Failure(e)
///  map(f)         Success(f(v))         Empty           Failure(e)
///  try_map(f)     Success / Failure     Empty           Failure(e)
///  and_then(f)    f(v)                  Empty           Failure(e)
///  or_else(f)     Success(v)            f()             Failure(e)
///  get_or_else(d) v                     d               d
///  into_result()  Ok(v)                 Err(NoValue)    Err(e)
/// ```
///
/// Rust functions signal faults through `Result`, so "a raised fault becomes
/// Failure" is spelled [`try_map`](Outcome::try_map) and
/// [`and_then`](Outcome::and_then); plain [`map`](Outcome::map) takes a
/// function that cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Outcome may carry a Failure that should be handled"]
pub enum Outcome<T> {
    /// A usable value.
    Success(T),
    /// Nothing applicable. Not an error.
    Empty,
    /// Something broke; the cause is kept.
    Failure(PricingError),
}

impl<T> Outcome<T> {
    // =========================================================================
    // Constructors
    // =========================================================================

    #[inline]
    pub const fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    #[inline]
    pub const fn empty() -> Self {
        Outcome::Empty
    }

    #[inline]
    pub fn failure(cause: impl Into<PricingError>) -> Self {
        Outcome::Failure(cause.into())
    }

    /// Failure with a free-form message.
    #[inline]
    pub fn failure_message(message: impl Into<String>) -> Self {
        Outcome::Failure(PricingError::message(message))
    }

    /// `Some` → `Success`, `None` → `Empty`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Outcome::Success(v),
            None => Outcome::Empty,
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Borrows the success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the failure cause, if any.
    pub fn failure_cause(&self) -> Option<&PricingError> {
        match self {
            Outcome::Failure(e) => Some(e),
            _ => None,
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Applies `f` to a success value; Empty and Failure pass through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Empty => Outcome::Empty,
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Applies a fallible `f`; its `Err` becomes `Failure`.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Outcome<U>
    where
        E: Into<PricingError>,
    {
        match self {
            Outcome::Success(v) => match f(v) {
                Ok(u) => Outcome::Success(u),
                Err(e) => Outcome::Failure(e.into()),
            },
            Outcome::Empty => Outcome::Empty,
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Chains another outcome-producing step (flatMap).
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success(v) => f(v),
            Outcome::Empty => Outcome::Empty,
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Replaces `Empty` with an alternative. Failures are NOT recovered.
    pub fn or_else(self, f: impl FnOnce() -> Outcome<T>) -> Outcome<T> {
        match self {
            Outcome::Empty => f(),
            other => other,
        }
    }

    /// Turns a success that fails `predicate` into a Failure with `message`.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool, message: impl Into<String>) -> Self {
        match self {
            Outcome::Success(v) if !predicate(&v) => Outcome::failure_message(message),
            other => other,
        }
    }

    /// Re-labels a failure with `message`, keeping the original as its source.
    pub fn map_failure(self, message: impl Into<String>) -> Self {
        match self {
            Outcome::Failure(cause) => Outcome::Failure(PricingError::Context {
                message: message.into(),
                cause: Box::new(cause),
            }),
            other => other,
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Success value, or `default` for Empty and Failure. Never panics.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Outcome::Success(v) => v,
            _ => default,
        }
    }

    /// Like [`get_or_else`](Outcome::get_or_else) with a lazily built default.
    pub fn get_or_else_with(self, f: impl FnOnce() -> T) -> T {
        match self {
            Outcome::Success(v) => v,
            _ => f(),
        }
    }

    /// Demands the value: Empty becomes [`PricingError::NoValue`], Failure
    /// hands back its original cause.
    pub fn into_result(self) -> Result<T, PricingError> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Empty => Err(PricingError::NoValue),
            Outcome::Failure(e) => Err(e),
        }
    }

    /// Drops the distinction between Empty and Failure.
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Collapses all three states into one value.
    pub fn fold<R>(
        self,
        on_success: impl FnOnce(T) -> R,
        on_empty: impl FnOnce() -> R,
        on_failure: impl FnOnce(PricingError) -> R,
    ) -> R {
        match self {
            Outcome::Success(v) => on_success(v),
            Outcome::Empty => on_empty(),
            Outcome::Failure(e) => on_failure(e),
        }
    }

    // =========================================================================
    // Combination
    // =========================================================================

    /// Combines two outcomes; the first non-success (left first) wins.
    pub fn map2<U, R>(left: Outcome<T>, right: Outcome<U>, f: impl FnOnce(T, U) -> R) -> Outcome<R> {
        left.and_then(|a| right.map(|b| f(a, b)))
    }
}

impl<T> Outcome<Vec<T>> {
    /// `Success(all values)` only if every element is a success; otherwise the
    /// first Empty or Failure in iteration order. Stops pulling from the
    /// iterator as soon as the answer is known.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        items.into_iter().collect()
    }

    /// Maps then sequences, lazily: `f` is not invoked for elements after the
    /// first non-success.
    pub fn traverse<A, I, F>(items: I, f: F) -> Self
    where
        I: IntoIterator<Item = A>,
        F: FnMut(A) -> Outcome<T>,
    {
        items.into_iter().map(f).collect()
    }

    /// Maps every element first, then sequences. Same answer as
    /// [`traverse`](Outcome::traverse), but `f` sees every element.
    pub fn traverse_eager<A, I, F>(items: I, f: F) -> Self
    where
        I: IntoIterator<Item = A>,
        F: FnMut(A) -> Outcome<T>,
    {
        let evaluated: Vec<Outcome<T>> = items.into_iter().map(f).collect();
        Self::sequence(evaluated)
    }
}

impl<T> FromIterator<Outcome<T>> for Outcome<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        for item in iter {
            match item {
                Outcome::Success(v) => values.push(v),
                Outcome::Empty => return Outcome::Empty,
                Outcome::Failure(e) => return Outcome::Failure(e),
            }
        }
        Outcome::Success(values)
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<PricingError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
