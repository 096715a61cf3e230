//! Test collection module
//!
//! Declarations contribute to a link-time slice, so every test in the final
//! binary is known before `main` runs and no central list has to be kept.
//! The process-wide [`Registry`] is built from that slice on first access and
//! can still be extended at runtime with [`register`].

use lazy_static::lazy_static;
use linkme::distributed_slice;
use spin::Mutex;

use crate::test_case::TestCase;

/// Every test declared with `#[def_test]`, `test_case!` or `register_tests!`.
#[distributed_slice]
pub static TEST_CASES: [TestCase] = [..];

lazy_static! {
    static ref REGISTRY: Mutex<Registry> = Mutex::new(Registry::discover());
}

/// An ordered, append-only list of test cases.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Builds a registry from every case the linker collected.
    pub fn discover() -> Self {
        let cases: Vec<TestCase> = TEST_CASES.iter().copied().collect();
        debug!("discovered {} test case(s)", cases.len());
        Self { cases }
    }

    pub fn register(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Appends a case to the process-wide registry.
///
/// Safe to call at any time, including before anything else in the harness
/// has been touched; the first access builds the registry.
pub fn register(case: TestCase) {
    REGISTRY.lock().register(case);
}

/// Snapshot of the process-wide registry in registration order.
///
/// The lock is released before this returns, so a running case may itself
/// call [`register`] without deadlocking; such cases join the next run.
pub fn all_tests() -> Vec<TestCase> {
    REGISTRY.lock().cases().to_vec()
}

/// Registers a block of statements as an anonymous test case.
///
/// ```ignore
/// slimtest::test_case! {
///     let total = 2 + 2;
///     slimtest::assert_equal!(total, 4);
/// }
/// ```
#[macro_export]
macro_rules! test_case {
    ($($body:tt)*) => {
        const _: () = {
            fn __slimtest_case() {
                $($body)*
            }

            #[$crate::__private::distributed_slice($crate::__private::TEST_CASES)]
            #[linkme(crate = $crate::__private::linkme)]
            static CASE: $crate::TestCase = $crate::TestCase::new(
                concat!(file!(), ":", line!()),
                module_path!(),
                file!(),
                line!(),
                __slimtest_case,
            );
        };
    };
}

/// Registers existing `fn()` items, in the order listed.
#[macro_export]
macro_rules! register_tests {
    ($($test_fn:path),* $(,)?) => {
        $(
            const _: () = {
                #[$crate::__private::distributed_slice($crate::__private::TEST_CASES)]
                #[linkme(crate = $crate::__private::linkme)]
                static CASE: $crate::TestCase = $crate::TestCase::new(
                    stringify!($test_fn),
                    module_path!(),
                    file!(),
                    line!(),
                    $test_fn,
                );
            };
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[crate::def_test]
    fn collected_by_attribute() {
        crate::assert_true!(true);
    }

    fn collected_by_list() {}

    crate::register_tests!(collected_by_list);

    fn names(cases: &[TestCase]) -> Vec<&'static str> {
        cases.iter().map(|case| case.name).collect()
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_preserves_order() {
        let mut registry = Registry::new();
        registry.register(TestCase::new("first", "", "f.rs", 1, || {}));
        registry.register(TestCase::new("second", "", "f.rs", 2, || {}));
        registry.register(TestCase::new("third", "", "f.rs", 3, || {}));
        assert_eq!(names(registry.cases()), ["first", "second", "third"]);
    }

    #[test]
    fn discover_sees_link_time_declarations() {
        let registry = Registry::discover();
        let found = names(registry.cases());
        assert!(found.contains(&"collected_by_attribute"));
        assert!(found.contains(&"collected_by_list"));
    }

    #[test]
    fn global_register_appends_to_snapshot() {
        let before = all_tests().len();
        register(TestCase::new("registered_at_runtime", "", "f.rs", 9, || {}));
        let after = all_tests();
        assert!(after.len() > before);
        assert!(names(&after).contains(&"registered_at_runtime"));
        // Link-time declarations come first.
        assert!(names(&after[..before]).contains(&"collected_by_attribute"));
    }
}
