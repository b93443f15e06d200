//! Lifting ordinary functions into outcome-reporting ones.
//!
//! [`adapt`] takes a function and binds it together with a [`Policy`]
//! into an [`Adapted`] value. Calling the adapted function routes the
//! original arguments, untouched, through the outcome executor: panics
//! are captured, error-shaped returns are classified, and the caller
//! receives an [`Outcome`] (or a wrapper future, when the function
//! produces a future) instead of facing an unwind.
//!
//! Arity is handled by the [`ShapedFn`] trait, implemented for functions
//! of zero through eight arguments with the arguments packed as a tuple.
//! Each arity is its own call-signature variant with its own outcome
//! shape; which variant applies depends only on the argument tuple
//! actually supplied:
//!
//! ```
//! use tryout::{adapt, Fault, Outcome};
//!
//! let div = adapt(|a: i32, b: i32| -> Result<f64, String> {
//!     if b == 0 {
//!         return Err("division by zero".into());
//!     }
//!     Ok(f64::from(a) / f64::from(b))
//! });
//!
//! assert_eq!(div.call((1, 2)).flatten(), Outcome::Success(0.5));
//! assert!(matches!(
//!     div.call((1, 0)).flatten(),
//!     Outcome::Failure(Fault::Returned(_))
//! ));
//! ```

use std::convert::Infallible;
use std::future::Future;

use crate::executor::{execute_value, execute_with};
use crate::future::{execute_async_value, execute_async_with, TryValueFuture, TryWithFuture};
use crate::types::{ErrorShape, Fault, Outcome, Policy};

/// A function callable with an argument tuple of a fixed shape.
///
/// One implementation exists per arity from zero to eight; a function
/// generic enough to be called at several tuple shapes gets one
/// independent variant per shape.
pub trait ShapedFn<Args> {
    /// What the function returns for this call-signature variant.
    type Output;

    /// Calls the function with the unpacked arguments.
    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_shaped_fn {
    ($(($($arg:ident: $ty:ident),*)),* $(,)?) => {
        $(
            impl<Fun, Out, $($ty),*> ShapedFn<($($ty,)*)> for Fun
            where
                Fun: Fn($($ty),*) -> Out,
            {
                type Output = Out;

                fn invoke(&self, ($($arg,)*): ($($ty,)*)) -> Out {
                    self($($arg),*)
                }
            }
        )*
    };
}

impl_shaped_fn! {
    (),
    (a1: A1),
    (a1: A1, a2: A2),
    (a1: A1, a2: A2, a3: A3),
    (a1: A1, a2: A2, a3: A3, a4: A4),
    (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5),
    (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6),
    (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7),
    (a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8),
}

/// A function lifted to report outcomes instead of panicking.
///
/// Holds the original function and the policy bound at adaptation time.
/// No argument transformation happens anywhere: each `call_*` method is
/// the plain closure-equivalent of running the function through the
/// executor with the original arguments bound.
///
/// All methods take `&self`, so one adapted function can serve
/// concurrent callers; calls never interact, and each produces a fresh
/// outcome.
#[derive(Debug, Clone, Copy)]
pub struct Adapted<F> {
    f: F,
    policy: Policy,
}

impl<F> Adapted<F> {
    /// The policy bound at adaptation time.
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Calls the function, classifying its error-shaped return under
    /// the bound policy. Equivalent to
    /// `execute_with(|| f(args...), policy)`.
    pub fn call<Args>(&self, args: Args) -> Outcome<F::Output, Fault<<F::Output as ErrorShape>::Error>>
    where
        F: ShapedFn<Args>,
        F::Output: ErrorShape,
    {
        execute_with(|| self.f.invoke(args), self.policy)
    }

    /// Calls the function for its plain value; only a panic can fail.
    /// Equivalent to `execute_value(|| f(args...))`.
    pub fn call_value<Args>(&self, args: Args) -> Outcome<F::Output, Fault<Infallible>>
    where
        F: ShapedFn<Args>,
    {
        execute_value(|| self.f.invoke(args))
    }

    /// Calls a future-producing function; the outcome arrives when the
    /// produced future settles. Equivalent to
    /// `execute_async_with(|| f(args...), policy)`.
    pub fn call_future<Args>(&self, args: Args) -> TryWithFuture<F::Output>
    where
        F: ShapedFn<Args>,
        F::Output: Future,
        <F::Output as Future>::Output: ErrorShape,
    {
        execute_async_with(|| self.f.invoke(args), self.policy)
    }

    /// Calls a function producing a plain-valued future. Equivalent to
    /// `execute_async_value(|| f(args...))`.
    pub fn call_future_value<Args>(&self, args: Args) -> TryValueFuture<F::Output>
    where
        F: ShapedFn<Args>,
        F::Output: Future,
    {
        execute_async_value(|| self.f.invoke(args))
    }
}

/// Lifts a function under the default policy.
#[must_use]
pub fn adapt<F>(f: F) -> Adapted<F> {
    adapt_with(f, Policy::default())
}

/// Lifts a function under an explicit policy.
#[must_use]
pub fn adapt_with<F>(f: F, policy: Policy) -> Adapted<F> {
    Adapted { f, policy }
}
