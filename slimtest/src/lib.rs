//! A slim unit-test harness.
//!
//! Tests are declared anywhere with `#[def_test]`, [`test_case!`] or
//! [`register_tests!`], collected into a process-wide registry before `main`
//! runs, and executed in order by [`run_tests`]. Assertions record failures
//! instead of aborting the test, so one case can report several problems.

#[macro_use]
extern crate log;

// Lets the paths emitted by `#[def_test]` resolve inside this crate's own tests.
extern crate self as slimtest;

pub mod assertion;
pub mod error;
pub mod logger;
pub mod registry;
pub mod runner;
pub mod test_case;

// Re-export the def_test macro from slimtest-macros crate
pub use slimtest_macros::def_test;

// Re-export commonly used types
pub use assertion::{
    Diagnostic, Nullable, Predicate, RunCounters, counters, last_diagnostic, reset_counters,
};
pub use error::{SlimError, SlimResult};
pub use registry::{Registry, all_tests, register};
pub use runner::{
    CaseOutcome, RunReport, TestRunner, exit_code, run_tests, run_tests_exit_code, run_tests_ok,
    tests_failed,
};
pub use test_case::TestCase;

#[doc(hidden)]
pub mod __private {
    pub use crate::registry::TEST_CASES;
    pub use linkme::{self, distributed_slice};
}
