//! Two-valued outcome type for normalized computations.
//!
//! Every operation run through the executor produces an [`Outcome`]:
//! either `Success` carrying the computed value, or `Failure` carrying
//! the failure payload. Unlike `Result`, an `Outcome` is the *terminal*
//! report of a computation that has already had its panics captured and
//! its error-shaped returns classified; there is nothing left to
//! propagate.
//!
//! # Destructuring
//!
//! Consumers that prefer positional destructuring over pattern matching
//! use [`Outcome::into_parts`], which always yields all three slots:
//!
//! ```
//! use tryout::Outcome;
//!
//! let (ok, value, error) = Outcome::<_, ()>::success("ready").into_parts();
//! assert!(ok);
//! assert_eq!(value, Some("ready"));
//! assert_eq!(error, None);
//! ```

use crate::types::fault::Fault;
use crate::types::shape::ErrorShape;

/// The terminal report of a normalized computation.
///
/// Exactly one variant holds a payload, selected by the success flag.
/// Values are created fresh on every executor invocation, are immutable,
/// and carry no reference back to the expression that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<T, E> {
    /// The computation produced a value.
    Success(T),
    /// The computation panicked or produced an error-shaped value.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Creates a success outcome.
    #[must_use]
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failure outcome.
    #[must_use]
    pub const fn failure(error: E) -> Self {
        Self::Failure(error)
    }

    /// Returns the success flag.
    #[must_use]
    pub const fn ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if this is a `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.ok()
    }

    /// Returns true if this is a `Failure`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.ok()
    }

    /// Returns the success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure payload, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Consumes the outcome, returning the success value.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Consumes the outcome, returning the failure payload.
    #[must_use]
    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Consumes the outcome into its positional three-slot view.
    ///
    /// The tuple always has all three positions; exactly one of the last
    /// two is `Some`, selected by the leading flag. This makes blind
    /// positional destructuring safe regardless of which branch was
    /// taken.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<T>, Option<E>) {
        match self {
            Self::Success(value) => (true, Some(value), None),
            Self::Failure(error) => (false, None, Some(error)),
        }
    }

    /// Converts from `&Outcome<T, E>` to `Outcome<&T, &E>`.
    #[must_use]
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Maps the success value, leaving a failure untouched.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self {
            Self::Success(value) => Outcome::Success(op(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Maps the failure payload, leaving a success untouched.
    pub fn map_err<F>(self, op: impl FnOnce(E) -> F) -> Outcome<T, F> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(op(error)),
        }
    }

    /// Chains a fallible continuation on the success value.
    pub fn and_then<U>(self, op: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Self::Success(value) => op(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Returns the success value or a fallback.
    #[must_use]
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => fallback,
        }
    }

    /// Returns the success value or computes one from the failure.
    pub fn unwrap_or_else(self, op: impl FnOnce(E) -> T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => op(error),
        }
    }

    /// Converts the outcome into an ordinary `Result`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<R: ErrorShape> Outcome<R, Fault<R::Error>> {
    /// Applies deferred reclassification to a verbatim outcome.
    ///
    /// The policy-parameterized executor forms keep the returned value
    /// verbatim in the success slot, because a runtime policy cannot
    /// narrow a static type. `flatten` performs the narrowing afterward:
    /// an error-shaped success is moved to the failure slot as
    /// [`Fault::Returned`], everything else passes through.
    ///
    /// ```
    /// use tryout::{execute_with, Fault, Outcome, Policy};
    ///
    /// let verbatim = execute_with(|| Err::<i32, String>("nope".into()), Policy::lenient());
    /// assert_eq!(verbatim, Outcome::Success(Err("nope".into())));
    ///
    /// let narrowed = verbatim.flatten();
    /// assert_eq!(narrowed, Outcome::Failure(Fault::Returned("nope".into())));
    /// ```
    #[must_use]
    pub fn flatten(self) -> Outcome<R::Value, Fault<R::Error>> {
        match self {
            Self::Success(returned) => match returned.split() {
                Ok(value) => Outcome::Success(value),
                Err(error) => Outcome::Failure(Fault::Returned(error)),
            },
            Self::Failure(fault) => Outcome::Failure(fault),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}
