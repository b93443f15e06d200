//! The outcome executor, asynchronous half.
//!
//! When the fallible expression is a future, or a closure that produces
//! one, the executor's own output must be a future as well: the outcome
//! cannot be known without waiting, and the caller's shape has to say
//! so. The wrapper futures here apply the same classification as the
//! synchronous executor, at resolution time:
//!
//! - a panic raised while polling the inner future settles the wrapper
//!   with a [`Fault::Panicked`] failure;
//! - a resolved value is classified under the policy, exactly as a
//!   returned value would be;
//! - `Pending` is forwarded untouched. The wrapper adds no suspension
//!   points, spawns nothing, and never resolves before the inner
//!   operation settles (or never, if it never settles).
//!
//! A closure that panics while *constructing* its future still gets the
//! async shape, but the wrapper is born settled and resolves on first
//! poll without waiting.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project::pin_project;

use crate::executor::{capture, classify, classify_strict, classify_value};
use crate::types::{ErrorShape, Fault, Outcome, PanicPayload, Policy};

type Narrowed<R> = Outcome<<R as ErrorShape>::Value, Fault<<R as ErrorShape>::Error>>;
type Verbatim<R> = Outcome<R, Fault<<R as ErrorShape>::Error>>;
type Plain<T> = Outcome<T, Fault<Infallible>>;

/// Polls a future with unwinds captured.
fn poll_caught<Fut: Future>(
    mut future: Pin<&mut Fut>,
    cx: &mut Context<'_>,
) -> Poll<Result<Fut::Output, PanicPayload>> {
    match catch_unwind(AssertUnwindSafe(|| future.as_mut().poll(cx))) {
        Ok(Poll::Ready(value)) => Poll::Ready(Ok(value)),
        Ok(Poll::Pending) => Poll::Pending,
        Err(payload) => Poll::Ready(Err(PanicPayload::from_unwind(payload))),
    }
}

/// Wrapper state shared by the three executor futures.
#[pin_project(project = StateProj)]
enum State<Fut, O> {
    /// The inner operation has not settled yet.
    Running {
        #[pin]
        future: Fut,
    },
    /// The outcome is known; `None` once it has been delivered.
    Settled { outcome: Option<O> },
}

/// The executor future that runs a fallible operation to completion
/// under the default policy, narrowing the success slot.
///
/// Produced by [`execute_future`] and [`execute_async`].
#[pin_project]
#[must_use = "futures do nothing unless polled"]
pub struct TryFuture<Fut: Future>
where
    Fut::Output: ErrorShape,
{
    #[pin]
    state: State<Fut, Narrowed<Fut::Output>>,
}

/// The executor future carrying a runtime policy; the success slot holds
/// the resolved value verbatim.
///
/// Produced by [`execute_future_with`] and [`execute_async_with`].
#[pin_project]
#[must_use = "futures do nothing unless polled"]
pub struct TryWithFuture<Fut: Future>
where
    Fut::Output: ErrorShape,
{
    #[pin]
    state: State<Fut, Verbatim<Fut::Output>>,
    policy: Policy,
}

/// The executor future for operations resolving to plain values; only a
/// panic while polling can fail it.
///
/// Produced by [`execute_future_value`] and [`execute_async_value`].
#[pin_project]
#[must_use = "futures do nothing unless polled"]
pub struct TryValueFuture<Fut: Future> {
    #[pin]
    state: State<Fut, Plain<Fut::Output>>,
}

impl<Fut> Future for TryFuture<Fut>
where
    Fut: Future,
    Fut::Output: ErrorShape,
{
    type Output = Narrowed<Fut::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let run = match this.state.as_mut().project() {
            StateProj::Running { future } => match poll_caught(future, cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(run) => run,
            },
            StateProj::Settled { outcome } => {
                return match outcome.take() {
                    Some(outcome) => Poll::Ready(outcome),
                    None => panic!("TryFuture polled after completion"),
                }
            }
        };
        this.state.set(State::Settled { outcome: None });
        Poll::Ready(classify_strict(run))
    }
}

impl<Fut> Future for TryWithFuture<Fut>
where
    Fut: Future,
    Fut::Output: ErrorShape,
{
    type Output = Verbatim<Fut::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let run = match this.state.as_mut().project() {
            StateProj::Running { future } => match poll_caught(future, cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(run) => run,
            },
            StateProj::Settled { outcome } => {
                return match outcome.take() {
                    Some(outcome) => Poll::Ready(outcome),
                    None => panic!("TryWithFuture polled after completion"),
                }
            }
        };
        this.state.set(State::Settled { outcome: None });
        Poll::Ready(classify(run, *this.policy))
    }
}

impl<Fut> Future for TryValueFuture<Fut>
where
    Fut: Future,
{
    type Output = Plain<Fut::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let run = match this.state.as_mut().project() {
            StateProj::Running { future } => match poll_caught(future, cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(run) => run,
            },
            StateProj::Settled { outcome } => {
                return match outcome.take() {
                    Some(outcome) => Poll::Ready(outcome),
                    None => panic!("TryValueFuture polled after completion"),
                }
            }
        };
        this.state.set(State::Settled { outcome: None });
        Poll::Ready(classify_value(run))
    }
}

impl<Fut: Future> fmt::Debug for TryFuture<Fut>
where
    Fut::Output: ErrorShape,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFuture").finish_non_exhaustive()
    }
}

impl<Fut: Future> fmt::Debug for TryWithFuture<Fut>
where
    Fut::Output: ErrorShape,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryWithFuture")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<Fut: Future> fmt::Debug for TryValueFuture<Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryValueFuture").finish_non_exhaustive()
    }
}

/// Normalizes a future already in flight, narrowing the success slot
/// under the default policy.
///
/// ```
/// use tryout::{execute_future, Fault, Outcome};
///
/// let outcome = futures_lite::future::block_on(execute_future(async {
///     "21".parse::<i32>()
/// }));
/// assert_eq!(outcome, Outcome::Success(21));
/// ```
pub fn execute_future<Fut>(future: Fut) -> TryFuture<Fut>
where
    Fut: Future,
    Fut::Output: ErrorShape,
{
    TryFuture {
        state: State::Running { future },
    }
}

/// Normalizes a future already in flight under an explicit policy; the
/// success slot holds the resolved value verbatim.
pub fn execute_future_with<Fut>(future: Fut, policy: Policy) -> TryWithFuture<Fut>
where
    Fut: Future,
    Fut::Output: ErrorShape,
{
    TryWithFuture {
        state: State::Running { future },
        policy,
    }
}

/// Normalizes a future resolving to a plain value. Only a panic while
/// polling can fail it.
pub fn execute_future_value<Fut>(future: Fut) -> TryValueFuture<Fut>
where
    Fut: Future,
{
    TryValueFuture {
        state: State::Running { future },
    }
}

/// Invokes a closure that produces a future and normalizes the result.
///
/// A panic during future construction yields a wrapper that is born
/// settled: the failure is delivered on first poll without waiting.
pub fn execute_async<F, Fut>(f: F) -> TryFuture<Fut>
where
    F: FnOnce() -> Fut,
    Fut: Future,
    Fut::Output: ErrorShape,
{
    match capture(f) {
        Ok(future) => execute_future(future),
        Err(payload) => TryFuture {
            state: State::Settled {
                outcome: Some(Outcome::Failure(Fault::Panicked(payload))),
            },
        },
    }
}

/// Invokes a future-producing closure under an explicit policy.
pub fn execute_async_with<F, Fut>(f: F, policy: Policy) -> TryWithFuture<Fut>
where
    F: FnOnce() -> Fut,
    Fut: Future,
    Fut::Output: ErrorShape,
{
    match capture(f) {
        Ok(future) => execute_future_with(future, policy),
        Err(payload) => TryWithFuture {
            state: State::Settled {
                outcome: Some(Outcome::Failure(Fault::Panicked(payload))),
            },
            policy,
        },
    }
}

/// Invokes a closure producing a plain-valued future.
pub fn execute_async_value<F, Fut>(f: F) -> TryValueFuture<Fut>
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    match capture(f) {
        Ok(future) => execute_future_value(future),
        Err(payload) => TryValueFuture {
            state: State::Settled {
                outcome: Some(Outcome::Failure(Fault::Panicked(payload))),
            },
        },
    }
}
