//! The outcome executor, synchronous half.
//!
//! An executor call runs a zero-argument closure with its unwinds
//! captured, classifies what happened, and reports an [`Outcome`]. The
//! classification is a single branch, applied uniformly here and at
//! future resolution in [`crate::future`]:
//!
//! 1. A captured panic is a failure, unconditionally. No predicate is
//!    consulted for values that arrived via a genuine unwind.
//! 2. A returned value that is error-shaped (its [`ErrorShape::split`]
//!    yields `Err`) becomes a failure when the policy treats returned
//!    errors as thrown.
//! 3. Anything else is a success.
//!
//! The executor itself never panics outward; every panic raised by the
//! evaluated expression is converted to a [`Fault::Panicked`] failure.
//!
//! # Entry points
//!
//! - [`execute`]: the primary form. The default policy is baked in, so
//!   the success slot is narrowed to the non-error half of the shape.
//! - [`execute_with`]: the general, runtime-policy form. The success
//!   slot holds the returned value verbatim; narrow it afterward with
//!   [`Outcome::flatten`] if desired.
//! - [`execute_value`]: for closures returning plain values with no
//!   error shape to inspect. Only a panic can fail these.

use std::convert::Infallible;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::types::{ErrorShape, Fault, Outcome, PanicPayload, Policy};

/// Runs a closure with unwinds captured.
///
/// Unwind safety is asserted rather than required of the caller: the
/// closure is consumed whole and the captured payload is the only thing
/// that crosses the boundary, the same stance a runtime takes when
/// isolating a task panic.
pub(crate) fn capture<R>(f: impl FnOnce() -> R) -> Result<R, PanicPayload> {
    catch_unwind(AssertUnwindSafe(f)).map_err(PanicPayload::from_unwind)
}

/// Classifies a captured invocation under a runtime policy.
///
/// The success slot keeps the returned value verbatim; a runtime boolean
/// cannot narrow a static type, so narrowing is deferred to
/// [`Outcome::flatten`].
pub(crate) fn classify<R: ErrorShape>(
    run: Result<R, PanicPayload>,
    policy: Policy,
) -> Outcome<R, Fault<R::Error>> {
    match run {
        Err(payload) => Outcome::Failure(Fault::Panicked(payload)),
        Ok(returned) if policy.is_strict() => match returned.reclassify() {
            Ok(returned) => Outcome::Success(returned),
            Err(error) => Outcome::Failure(Fault::Returned(error)),
        },
        Ok(returned) => Outcome::Success(returned),
    }
}

/// Classifies a captured invocation under the default policy, narrowing
/// the success slot to the non-error half of the shape.
pub(crate) fn classify_strict<R: ErrorShape>(
    run: Result<R, PanicPayload>,
) -> Outcome<R::Value, Fault<R::Error>> {
    match run {
        Err(payload) => Outcome::Failure(Fault::Panicked(payload)),
        Ok(returned) => match returned.split() {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(Fault::Returned(error)),
        },
    }
}

/// Classifies a captured invocation of a plain-valued closure. There is
/// no error shape to inspect, so only a panic can fail.
pub(crate) fn classify_value<T>(run: Result<T, PanicPayload>) -> Outcome<T, Fault<Infallible>> {
    match run {
        Err(payload) => Outcome::Failure(Fault::Panicked(payload)),
        Ok(value) => Outcome::Success(value),
    }
}

/// Runs a fallible closure and reports the narrowed outcome.
///
/// Panics are captured as [`Fault::Panicked`]; error-shaped returns are
/// reclassified as [`Fault::Returned`] (the default policy). Equivalent
/// to `execute_with(f, Policy::strict()).flatten()`.
///
/// ```
/// use tryout::{execute, Fault, Outcome};
///
/// let ok = execute(|| "17".parse::<i32>());
/// assert_eq!(ok, Outcome::Success(17));
///
/// let err = execute(|| "x".parse::<i32>());
/// assert!(matches!(err, Outcome::Failure(Fault::Returned(_))));
///
/// let boom = execute(|| -> Result<i32, String> { panic!("boom") });
/// assert!(matches!(boom, Outcome::Failure(Fault::Panicked(_))));
/// ```
pub fn execute<F, R>(f: F) -> Outcome<R::Value, Fault<R::Error>>
where
    F: FnOnce() -> R,
    R: ErrorShape,
{
    classify_strict(capture(f))
}

/// Runs a fallible closure under an explicit policy.
///
/// The success slot holds whatever the closure returned, verbatim: with
/// a lenient policy an error-shaped value lands there unmodified.
///
/// ```
/// use tryout::{execute_with, Outcome, Policy};
///
/// let kept = execute_with(|| Err::<(), &str>("soft"), Policy::lenient());
/// assert_eq!(kept, Outcome::Success(Err("soft")));
/// ```
pub fn execute_with<F, R>(f: F, policy: Policy) -> Outcome<R, Fault<R::Error>>
where
    F: FnOnce() -> R,
    R: ErrorShape,
{
    classify(capture(f), policy)
}

/// Runs a closure returning a plain value. Only a panic can fail.
///
/// ```
/// use tryout::{execute_value, Outcome};
///
/// let (ok, value, error) = execute_value(|| "success").into_parts();
/// assert!(ok);
/// assert_eq!(value, Some("success"));
/// assert!(error.is_none());
/// ```
pub fn execute_value<F, T>(f: F) -> Outcome<T, Fault<Infallible>>
where
    F: FnOnce() -> T,
{
    classify_value(capture(f))
}
