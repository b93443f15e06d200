//! End-to-end tests for the synchronous executor.
//!
//! These exercise the classification contract through the public
//! surface only: plain returns, panics, error-shaped returns under both
//! policies, and payload identity.

use tryout::test_logging::TestLogger;
use tryout::{assert_eq_log, assert_log, execute, execute_value, execute_with, test_log};
use tryout::{Fault, Outcome, Policy};

#[test]
fn plain_return_is_an_immediate_success() {
    let logger = TestLogger::from_env();
    test_log!(logger, "run", "executing a plain closure");

    let (ok, value, error) = execute_value(|| "success").into_parts();

    assert_log!(logger, ok, "expected the success flag");
    assert_eq_log!(logger, value, Some("success"));
    assert_log!(logger, error.is_none(), "error slot must be empty");
}

#[test]
fn thrown_value_is_an_immediate_failure() {
    let logger = TestLogger::from_env();

    let (ok, value, error) = execute_value(|| -> &str { panic!("error") }).into_parts();

    assert_log!(logger, !ok, "expected the failure flag");
    assert_log!(logger, value.is_none(), "value slot must be empty");
    let fault = error.expect("failure slot must be populated");
    let payload = fault.panic_payload().expect("panic fault expected");
    assert_eq_log!(logger, payload.message(), Some("error"));
}

#[test]
fn returned_error_is_a_failure_under_the_default_policy() {
    let outcome = execute(|| Err::<(), String>("failure".into()));

    match outcome {
        Outcome::Failure(Fault::Returned(e)) => assert_eq!(e, "failure"),
        other => panic!("expected a reclassified failure, got {other:?}"),
    }
}

#[test]
fn returned_error_is_a_success_under_the_lenient_policy() {
    let outcome = execute_with(|| Err::<(), String>("success".into()), Policy::lenient());

    let (ok, value, error) = outcome.into_parts();
    assert!(ok, "lenient policy must not reclassify");
    assert_eq!(value, Some(Err("success".into())));
    assert!(error.is_none());
}

#[test]
fn the_runtime_policy_agrees_with_the_baked_in_default() {
    let logger = TestLogger::from_env();
    test_log!(logger, "policy", "comparing execute against execute_with");

    let direct = execute(|| "33".parse::<i32>());
    let threaded = execute_with(|| "33".parse::<i32>(), Policy::strict()).flatten();
    assert_eq_log!(logger, direct, threaded);

    let direct = execute(|| "nope".parse::<i32>());
    let threaded = execute_with(|| "nope".parse::<i32>(), Policy::strict()).flatten();
    assert_eq_log!(logger, direct, threaded);
}

#[test]
fn classification_is_idempotent_for_deterministic_expressions() {
    let first = execute(|| "91".parse::<i32>());
    let second = execute(|| "91".parse::<i32>());
    assert_eq!(first.ok(), second.ok());
    assert_eq!(first, second);
}

#[test]
fn thrown_payloads_cross_the_boundary_untouched() {
    // A deliberately non-clonable token: the only way the assertion can
    // pass is if the exact value that was thrown comes back out.
    struct Receipt {
        serial: u64,
    }

    let outcome = execute_value(|| -> () {
        std::panic::panic_any(Receipt { serial: 7_770_001 });
    });

    let fault = outcome.into_error().expect("panic must fail the outcome");
    let payload = fault.panic_payload().expect("panic fault expected");
    let receipt = payload
        .downcast_ref::<Receipt>()
        .expect("payload must keep its original type");
    assert_eq!(receipt.serial, 7_770_001);
}

#[test]
fn returned_errors_cross_the_boundary_untouched() {
    let original = Box::new(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "locked",
    ));
    let addr: *const std::io::Error = &*original;

    let outcome = execute(move || Err::<(), _>(original));

    match outcome {
        Outcome::Failure(Fault::Returned(e)) => {
            let roundtripped: *const std::io::Error = &*e;
            assert_eq!(roundtripped, addr, "error must not be cloned or wrapped");
        }
        other => panic!("expected a returned-error failure, got {other:?}"),
    }
}

#[test]
fn side_effects_run_exactly_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = AtomicUsize::new(0);
    let outcome = execute(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        Err::<(), &str>("observed")
    });

    assert!(outcome.is_failure());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn a_panic_wins_over_a_would_be_success() {
    let outcome = execute(|| -> Result<i32, String> {
        let parsed: i32 = "not a number".parse().unwrap();
        Ok(parsed)
    });

    let fault = outcome.into_error().expect("unwind must fail the outcome");
    assert!(fault.is_panic());
}
