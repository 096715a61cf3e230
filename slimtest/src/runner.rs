//! Test runner
//!
//! Runs test cases one at a time, in registration order, on the calling
//! thread. The assertion counters are reset before every case and read back
//! after it returns; a case is failed iff it recorded at least one failed
//! assertion. A panic inside a case is not caught and ends the run.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::assertion::{counters, reset_counters};
use crate::logger;
use crate::registry::all_tests;
use crate::test_case::TestCase;

/// Set when the most recent run had at least one failed case.
pub static TEST_FAILED_FLAG: AtomicBool = AtomicBool::new(false);

/// Highest value a process exit status can carry without wrapping.
const MAX_EXIT_CODE: usize = 255;

/// Result of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    /// 1-based position in the run.
    pub index: usize,
    pub name: &'static str,
    pub module: &'static str,
    pub evaluated: usize,
    pub failed: usize,
}

impl CaseOutcome {
    pub fn is_failed(&self) -> bool {
        self.failed > 0
    }
}

/// Aggregate outcome of one runner invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub label: Option<String>,
    pub total: usize,
    pub failed: usize,
    pub cases: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_owned),
            ..Self::default()
        }
    }

    pub fn add_outcome(&mut self, outcome: CaseOutcome) {
        self.total += 1;
        if outcome.is_failed() {
            self.failed += 1;
        }
        self.cases.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.total - self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Failed-case count as a process exit status, saturating at 255.
    pub fn exit_code(&self) -> i32 {
        exit_code(self.failed)
    }

    /// `"<passed> tests passed out of <total> tests[ in <label>]."`
    pub fn summary(&self) -> String {
        match &self.label {
            Some(label) => format!(
                "{} tests passed out of {} tests in {}.",
                self.passed(),
                self.total,
                label
            ),
            None => format!(
                "{} tests passed out of {} tests.",
                self.passed(),
                self.total
            ),
        }
    }
}

// Test runner
#[derive(Debug, Default)]
pub struct TestRunner {
    report: RunReport,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one case with fresh counters. `index` is its 1-based position.
    pub fn run_test(&mut self, index: usize, test: &TestCase) -> CaseOutcome {
        info!("  Running test {}: {}", index, test.qualified_name());

        reset_counters();
        test.run();
        let tally = counters();
        reset_counters();

        let outcome = CaseOutcome {
            index,
            name: test.name,
            module: test.module(),
            evaluated: tally.evaluated,
            failed: tally.failed,
        };

        if outcome.is_failed() {
            error!(
                "    Test function FAILED in test {} ({}): {} of {} assertions failed",
                index, test.name, tally.failed, tally.evaluated
            );
        } else {
            info!(
                "    Test {} ... OK ({} assertions)",
                test.name, tally.evaluated
            );
        }

        self.report.add_outcome(outcome.clone());
        outcome
    }

    /// Runs `tests` in order and returns the report for this run only.
    pub fn run(&mut self, label: Option<&str>, tests: &[TestCase]) -> RunReport {
        self.report = RunReport::new(label);
        reset_counters();

        info!("--------------------------------");
        match label {
            Some(label) => info!("Starting unit tests [{}]...", label),
            None => info!("Starting unit tests..."),
        }

        for (position, test) in tests.iter().enumerate() {
            self.run_test(position + 1, test);
        }

        self.print_final_stats();

        TEST_FAILED_FLAG.store(!self.report.is_success(), Ordering::Relaxed);

        self.report.clone()
    }

    pub fn print_final_stats(&self) {
        if self.report.is_success() {
            warn!("{}", self.report.summary());
        } else {
            error!("{}", self.report.summary());
        }
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }
}

/// Converts a failed-case count into a process exit status.
///
/// Only the low 8 bits of a status survive on Unix, so the count saturates
/// at 255 instead of wrapping back to `0`.
pub fn exit_code(failed: usize) -> i32 {
    failed.min(MAX_EXIT_CODE) as i32
}

/// Run every registered test
///
/// Installs the stderr logger unless one is already in place, so failures
/// and the summary are printed even when this is all `main` does.
/// Returns the number of failed cases, so `0` means everything passed.
pub fn run_tests(label: Option<&str>) -> usize {
    if let Err(err) = logger::init_once() {
        eprintln!("slimtest: {err}");
    }
    let tests = all_tests();
    TestRunner::new().run(label, &tests).failed
}

/// Run every registered test and return a process exit status
///
/// # Example
/// ```rust,no_run
/// fn main() {
///     std::process::exit(slimtest::run_tests_exit_code(None));
/// }
/// ```
pub fn run_tests_exit_code(label: Option<&str>) -> i32 {
    exit_code(run_tests(label))
}

/// Run every registered test and return whether all of them passed
pub fn run_tests_ok(label: Option<&str>) -> bool {
    run_tests(label) == 0
}

pub fn tests_failed() -> bool {
    TEST_FAILED_FLAG.load(Ordering::Relaxed)
}

/// Generates a `main` that runs every registered test and exits with the
/// failed-case count.
#[macro_export]
macro_rules! test_main {
    () => {
        fn main() {
            std::process::exit($crate::run_tests_exit_code(None));
        }
    };
}
