//! Bridges from `std::option::Option` into [`Outcome`].

use super::Outcome;
use crate::error::PricingError;

/// Lifts an `Option` into the three-state world.
pub trait OptionExt<T> {
    /// `None` becomes `Empty`: absence stays absence.
    fn into_outcome(self) -> Outcome<T>;

    /// `None` becomes a `Failure` with `message`: absence is an error here.
    fn ok_or_failure(self, message: impl Into<String>) -> Outcome<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn into_outcome(self) -> Outcome<T> {
        Outcome::from_option(self)
    }

    fn ok_or_failure(self, message: impl Into<String>) -> Outcome<T> {
        match self {
            Some(v) => Outcome::Success(v),
            None => Outcome::Failure(PricingError::message(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_outcome() {
        assert_eq!(Some(3).into_outcome(), Outcome::Success(3));
        assert_eq!(None::<i32>.into_outcome(), Outcome::Empty);
    }

    #[test]
    fn test_ok_or_failure() {
        assert_eq!(Some(3).ok_or_failure("missing"), Outcome::Success(3));
        let failed = None::<i32>.ok_or_failure("missing");
        assert_eq!(failed.failure_cause().unwrap().to_string(), "missing");
    }
}
