//! End-to-end tests for the function adapter.
//!
//! Verifies the lifting contract: an adapted call is exactly the
//! executor run on the same closure, argument for argument, across
//! arities, policies, and sync/async shapes.

use futures_lite::future::block_on;
use tryout::test_logging::TestLogger;
use tryout::{adapt, adapt_with, assert_eq_log, execute_value, execute_with, test_log};
use tryout::{Fault, Outcome, Policy};

fn checked_div(a: i32, b: i32) -> Result<f64, String> {
    if b == 0 {
        return Err("div0".into());
    }
    Ok(f64::from(a) / f64::from(b))
}

#[test]
fn the_div0_scenario() {
    let logger = TestLogger::from_env();
    let div = adapt(checked_div);

    test_log!(logger, "call", "dividing 1 by 0");
    let (ok, value, error) = div.call((1, 0)).flatten().into_parts();
    assert_eq_log!(logger, ok, false);
    assert_eq_log!(logger, value, None);
    assert_eq_log!(logger, error, Some(Fault::Returned("div0".into())));

    test_log!(logger, "call", "dividing 1 by 2");
    let (ok, value, error) = div.call((1, 2)).flatten().into_parts();
    assert_eq_log!(logger, ok, true);
    assert_eq_log!(logger, value, Some(0.5));
    assert_eq_log!(logger, error, None);
}

#[test]
fn an_adapted_call_is_an_executor_run_with_the_arguments_bound() {
    for (a, b) in [(1, 0), (1, 2), (-9, 3), (i32::MIN, -1)] {
        let adapted = adapt(checked_div).call((a, b));
        let executed = execute_with(|| checked_div(a, b), Policy::default());
        assert_eq!(adapted, executed, "mismatch for ({a}, {b})");
    }
}

#[test]
fn the_adapter_binds_its_policy_at_adaptation_time() {
    let strict = adapt_with(|| Err::<(), &str>("e"), Policy::strict());
    let lenient = adapt_with(|| Err::<(), &str>("e"), Policy::lenient());

    assert_eq!(strict.policy(), Policy::strict());
    assert_eq!(strict.call(()), Outcome::Failure(Fault::Returned("e")));
    assert_eq!(lenient.call(()), Outcome::Success(Err("e")));
}

#[test]
fn arities_from_zero_to_eight() {
    let zero = adapt(|| Ok::<_, String>(0));
    assert_eq!(zero.call(()).flatten(), Outcome::Success(0));

    let three = adapt(|a: i32, b: i32, c: i32| Ok::<_, String>(a + b + c));
    assert_eq!(three.call((1, 2, 3)).flatten(), Outcome::Success(6));

    let eight = adapt(
        |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| {
            Ok::<_, String>(u32::from(a) + u32::from(b) + u32::from(c) + u32::from(d)
                + u32::from(e) + u32::from(f) + u32::from(g) + u32::from(h))
        },
    );
    assert_eq!(
        eight.call((1, 2, 3, 4, 5, 6, 7, 8)).flatten(),
        Outcome::Success(36)
    );
}

#[test]
fn a_panicking_adapted_function_reports_instead_of_unwinding() {
    let slice_head = adapt(|v: Vec<i32>, i: usize| v[i]);

    let outcome = slice_head.call_value((vec![10, 20], 5));
    let fault = outcome.into_error().expect("out-of-bounds must fail");
    assert!(fault.is_panic());

    let outcome = slice_head.call_value((vec![10, 20], 1));
    assert_eq!(outcome, Outcome::Success(20));
    assert_eq!(
        execute_value(|| vec![10, 20][1]),
        Outcome::Success(20),
        "adapter and executor agree on the plain-value path"
    );
}

#[test]
fn adapted_async_functions_keep_the_async_shape() {
    async fn fetch_len(payload: String) -> Result<usize, String> {
        if payload.is_empty() {
            return Err("empty payload".into());
        }
        Ok(payload.len())
    }

    let adapted = adapt(fetch_len);

    let outcome = block_on(adapted.call_future(("four".to_string(),)));
    assert_eq!(outcome.flatten(), Outcome::Success(4));

    let outcome = block_on(adapted.call_future((String::new(),)));
    assert_eq!(
        outcome.flatten(),
        Outcome::Failure(Fault::Returned("empty payload".into()))
    );
}

#[test]
fn each_call_gets_a_fresh_outcome() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invocations);
    let adapted = adapt(move |n: usize| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, String>(n)
    });

    let first = adapted.call((1,)).flatten();
    let second = adapted.call((2,)).flatten();

    assert_eq!(first, Outcome::Success(1));
    assert_eq!(second, Outcome::Success(2));
    assert_eq!(invocations.load(Ordering::SeqCst), 2);
}
