//! Test logging infrastructure for the outcome-normalization suites.
//!
//! Classification behavior is easiest to debug when a failing test can
//! dump the exact sequence of executor steps it observed. This module
//! provides typed events, a capturing logger with configurable
//! verbosity, and assertion macros that print the full event report on
//! failure.
//!
//! # Overview
//!
//! - [`TestLogLevel`]: configurable verbosity levels
//! - [`TestEvent`]: typed events for executor, future, and adapter steps
//! - [`TestLogger`]: captures and reports events with timestamps
//!
//! # Example
//!
//! ```
//! use tryout::test_logging::{TestEvent, TestLogLevel, TestLogger};
//!
//! let logger = TestLogger::new(TestLogLevel::Debug);
//! logger.log(TestEvent::Classified {
//!     ok: true,
//!     reclassified: false,
//! });
//! assert_eq!(logger.len(), 1);
//! ```

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

// ============================================================================
// TestLogLevel
// ============================================================================

/// Logging verbosity level for tests.
///
/// Levels are ordered from least to most verbose:
/// `Error < Warn < Info < Debug < Trace`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TestLogLevel {
    /// Only errors and failures.
    Error,
    /// Warnings and above.
    Warn,
    /// General test progress.
    #[default]
    Info,
    /// Individual classification decisions.
    Debug,
    /// All events including every poll step.
    Trace,
}

impl TestLogLevel {
    /// Returns a human-readable name for the level.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Returns the level from the `TEST_LOG_LEVEL` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("TEST_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for TestLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TestLogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

// ============================================================================
// TestEvent
// ============================================================================

/// A typed event captured by the test logger.
///
/// Events cover the steps a normalized computation goes through:
/// invocation, classification, future polling, and adapter dispatch,
/// plus custom events for test-specific logging.
#[derive(Debug, Clone)]
pub enum TestEvent {
    /// An executor entry point was invoked.
    ExecutorRun {
        /// Which shape ran (e.g. "sync", "future", "async").
        shape: &'static str,
    },

    /// A captured invocation was classified.
    Classified {
        /// The resulting success flag.
        ok: bool,
        /// True when an error-shaped return was reclassified.
        reclassified: bool,
    },

    /// A wrapper future was polled.
    PollStep {
        /// True when this poll settled the wrapper.
        ready: bool,
        /// True when the inner future panicked on this poll.
        panicked: bool,
    },

    /// An adapted function was called.
    AdapterCall {
        /// Number of arguments in the supplied tuple.
        arity: usize,
    },

    /// Custom test event.
    Custom {
        /// Event category for filtering.
        category: &'static str,
        /// Free-form message.
        message: String,
    },

    /// Warning event.
    Warn {
        /// Event category for filtering.
        category: &'static str,
        /// Free-form message.
        message: String,
    },

    /// Error event.
    Error {
        /// Event category for filtering.
        category: &'static str,
        /// Free-form message.
        message: String,
    },
}

impl TestEvent {
    /// The minimum verbosity at which this event is recorded.
    #[must_use]
    pub const fn level(&self) -> TestLogLevel {
        match self {
            Self::Error { .. } => TestLogLevel::Error,
            Self::Warn { .. } => TestLogLevel::Warn,
            Self::ExecutorRun { .. } | Self::AdapterCall { .. } | Self::Custom { .. } => {
                TestLogLevel::Info
            }
            Self::Classified { .. } => TestLogLevel::Debug,
            Self::PollStep { .. } => TestLogLevel::Trace,
        }
    }
}

impl std::fmt::Display for TestEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExecutorRun { shape } => write!(f, "executor run ({shape})"),
            Self::Classified { ok, reclassified } => {
                write!(f, "classified ok={ok} reclassified={reclassified}")
            }
            Self::PollStep { ready, panicked } => {
                write!(f, "poll ready={ready} panicked={panicked}")
            }
            Self::AdapterCall { arity } => write!(f, "adapter call arity={arity}"),
            Self::Custom { category, message } => write!(f, "[{category}] {message}"),
            Self::Warn { category, message } => write!(f, "[{category}] WARN {message}"),
            Self::Error { category, message } => write!(f, "[{category}] ERROR {message}"),
        }
    }
}

// ============================================================================
// TestLogger
// ============================================================================

/// Captures timestamped events during a test and renders a report.
///
/// The logger is cheap to share by reference between a test body and
/// helper closures; recording takes a short critical section on the
/// event buffer and nothing else.
#[derive(Debug)]
pub struct TestLogger {
    threshold: TestLogLevel,
    started: Instant,
    events: Mutex<Vec<(Duration, TestEvent)>>,
}

impl TestLogger {
    /// Creates a logger recording events at or below `threshold`.
    #[must_use]
    pub fn new(threshold: TestLogLevel) -> Self {
        Self {
            threshold,
            started: Instant::now(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Creates a logger with the threshold from `TEST_LOG_LEVEL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(TestLogLevel::from_env())
    }

    /// Records an event if its level is enabled.
    pub fn log(&self, event: TestEvent) {
        if event.level() <= self.threshold {
            self.events.lock().push((self.started.elapsed(), event));
        }
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Returns the recorded events in order.
    #[must_use]
    pub fn events(&self) -> Vec<TestEvent> {
        self.events
            .lock()
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Renders the full event report.
    #[must_use]
    pub fn report(&self) -> String {
        let events = self.events.lock();
        let mut out = String::new();
        let _ = writeln!(out, "=== test log ({} events) ===", events.len());
        for (elapsed, event) in events.iter() {
            let _ = writeln!(
                out,
                "[{:>10.3}ms] {:5} {event}",
                elapsed.as_secs_f64() * 1000.0,
                event.level().name(),
            );
        }
        out
    }

    /// Clears all captured events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for TestLogger {
    fn default() -> Self {
        Self::new(TestLogLevel::Info)
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Log a custom event to a test logger.
///
/// # Example
///
/// ```ignore
/// test_log!(logger, "setup", "Adapting with policy {:?}", policy);
/// ```
#[macro_export]
macro_rules! test_log {
    ($logger:expr, $cat:literal, $($arg:tt)*) => {
        $logger.log($crate::test_logging::TestEvent::Custom {
            category: $cat,
            message: format!($($arg)*),
        });
    };
}

/// Log an error event to a test logger.
///
/// # Example
///
/// ```ignore
/// test_error!(logger, "classify", "Unexpected success: {:?}", outcome);
/// ```
#[macro_export]
macro_rules! test_error {
    ($logger:expr, $cat:literal, $($arg:tt)*) => {
        $logger.log($crate::test_logging::TestEvent::Error {
            category: $cat,
            message: format!($($arg)*),
        });
    };
}

/// Log a warning event to a test logger.
#[macro_export]
macro_rules! test_warn {
    ($logger:expr, $cat:literal, $($arg:tt)*) => {
        $logger.log($crate::test_logging::TestEvent::Warn {
            category: $cat,
            message: format!($($arg)*),
        });
    };
}

/// Assert a condition, printing the full log on failure.
///
/// # Example
///
/// ```ignore
/// assert_log!(logger, outcome.ok(), "Expected success, got {:?}", outcome);
/// ```
#[macro_export]
macro_rules! assert_log {
    ($logger:expr, $cond:expr) => {
        if !$cond {
            eprintln!("{}", $logger.report());
            panic!("assertion failed: {}", stringify!($cond));
        }
    };
    ($logger:expr, $cond:expr, $($arg:tt)*) => {
        if !$cond {
            eprintln!("{}", $logger.report());
            panic!($($arg)*);
        }
    };
}

/// Assert equality, printing the full log on failure.
#[macro_export]
macro_rules! assert_eq_log {
    ($logger:expr, $left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if left_val != right_val {
                    eprintln!("{}", $logger.report());
                    panic!(
                        "assertion failed: `(left == right)`\n  left: {:?}\n right: {:?}",
                        left_val, right_val
                    );
                }
            }
        }
    };
    ($logger:expr, $left:expr, $right:expr, $($arg:tt)*) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if left_val != right_val {
                    eprintln!("{}", $logger.report());
                    panic!(
                        "assertion failed: `(left == right)`\n  left: {:?}\n right: {:?}\n{}",
                        left_val, right_val, format!($($arg)*)
                    );
                }
            }
        }
    };
}

// ============================================================================
// Tests
// ============================================================================
