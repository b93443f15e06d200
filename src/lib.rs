//! Outcome normalization for fallible synchronous and asynchronous
//! computations.
//!
//! Rust code fails two ways: a function returns an error, or it panics.
//! Call sites that need one uniform report, branchable on a single
//! boolean, run their fallible expressions through the executor in this
//! crate. Every possible ending, a returned value, a panic, a resolved
//! future, a panic while polling, or a returned value that is itself
//! error-shaped, becomes an [`Outcome`]: `Success` with the value, or
//! `Failure` with a [`Fault`] holding the original payload verbatim.
//!
//! # Quick start
//!
//! ```
//! use tryout::{execute, execute_value, Fault, Outcome};
//!
//! // A fallible computation: the Err return is classified as a failure.
//! let parsed = execute(|| "12".parse::<u32>());
//! assert_eq!(parsed, Outcome::Success(12));
//!
//! // A panicking computation: the unwind is captured, not propagated.
//! let (ok, value, error) = execute_value(|| -> u32 { panic!("no luck") }).into_parts();
//! assert!(!ok);
//! assert!(value.is_none());
//! assert!(error.is_some());
//! ```
//!
//! # Shape preservation
//!
//! A synchronous expression produces an immediate `Outcome`; an
//! asynchronous one (a future, or a closure producing a future)
//! produces a wrapper future resolving to an `Outcome`. The executor
//! never makes a synchronous caller wait and never delivers an
//! asynchronous result early: the output shape follows the expression
//! shape. See [`execute_future`] and [`execute_async`].
//!
//! # Policy
//!
//! By default a *returned* error-shaped value (the `Err` of a returned
//! `Result`) is treated exactly like a panic and lands in the failure
//! slot. The [`Policy`] switch disables that per call: under a lenient
//! policy the returned value stays in the success slot verbatim, and
//! [`Outcome::flatten`] can reclassify it later. Values that arrive via
//! a genuine panic are failures unconditionally; the policy never
//! rescues those.
//!
//! # Lifting functions
//!
//! [`adapt`] wraps a function of up to eight arguments so that every
//! call reports an `Outcome` instead of unwinding, with the original
//! arguments passed through untouched. See [`adapter`].
//!
//! # Modules
//!
//! - [`types`]: [`Outcome`], [`Fault`], [`PanicPayload`], [`Policy`],
//!   [`ErrorShape`]
//! - [`executor`]: the synchronous entry points
//! - [`future`]: the asynchronous entry points and wrapper futures
//! - [`adapter`]: function lifting
//! - [`test_logging`]: capture-and-report logging for the test suites

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod executor;
pub mod future;
pub mod test_logging;
pub mod types;

pub use adapter::{adapt, adapt_with, Adapted, ShapedFn};
pub use executor::{execute, execute_value, execute_with};
pub use future::{
    execute_async, execute_async_value, execute_async_with, execute_future, execute_future_value,
    execute_future_with, TryFuture, TryValueFuture, TryWithFuture,
};
pub use types::{ErrorShape, Fault, Outcome, PanicPayload, Policy};
