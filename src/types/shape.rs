//! The error-shape predicate.
//!
//! The executor needs to ask one question of a returned value: is it
//! error-shaped, and if so, which part of it is the error? In Rust the
//! platform error shape is `Result::Err`, so the predicate is a trait
//! over the returned type rather than a runtime instance check.

use crate::types::outcome::Outcome;

/// Types whose values may be error-shaped.
///
/// Two views of the same shape, used by the two classification modes:
///
/// - [`reclassify`](Self::reclassify) extracts the error from an
///   error-shaped value and hands every other value back whole. The
///   policy-parameterized executor uses it so the success slot stays
///   verbatim.
/// - [`split`](Self::split) separates both halves. The default-policy
///   executor uses it to narrow the success slot.
///
/// A lenient policy consults neither.
pub trait ErrorShape: Sized {
    /// The non-error part of the shape.
    type Value;
    /// The error part of the shape.
    type Error;

    /// Returns `Err(error)` for an error-shaped value, `Ok(self)` (the
    /// value, untouched) otherwise.
    fn reclassify(self) -> Result<Self, Self::Error>;

    /// Splits the value along the error shape.
    fn split(self) -> Result<Self::Value, Self::Error>;
}

impl<T, E> ErrorShape for Result<T, E> {
    type Value = T;
    type Error = E;

    fn reclassify(self) -> Result<Self, E> {
        match self {
            Err(error) => Err(error),
            ok => Ok(ok),
        }
    }

    fn split(self) -> Result<T, E> {
        self
    }
}

/// An `Outcome` returned from a computation is itself error-shaped when
/// it is a `Failure`, so already-normalized values re-normalize cleanly.
impl<T, E> ErrorShape for Outcome<T, E> {
    type Value = T;
    type Error = E;

    fn reclassify(self) -> Result<Self, E> {
        match self {
            Outcome::Failure(error) => Err(error),
            success => Ok(success),
        }
    }

    fn split(self) -> Result<T, E> {
        self.into_result()
    }
}
