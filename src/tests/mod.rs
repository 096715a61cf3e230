//! Test module.
//!
//! Everything declared here registers itself; `main` only has to run it.

mod people;

#[cfg(test)]
mod run {
    use slimtest::TestRunner;

    #[test]
    fn only_the_deliberate_failures_fail() {
        let tests = slimtest::all_tests();
        assert_eq!(tests.len(), 13);

        let report = TestRunner::new().run(Some("people"), &tests);
        let mut failed: Vec<&str> = report
            .cases
            .iter()
            .filter(|case| case.is_failed())
            .map(|case| case.name)
            .collect();
        failed.sort_unstable();

        assert_eq!(failed, ["live_value_is_not_null", "younger_is_not_greater"]);
        assert_eq!(report.exit_code(), 2);
        assert_eq!(report.summary(), "11 tests passed out of 13 tests in people.");
    }

    #[test]
    fn deliberate_failures_fail_once_each() {
        let report = TestRunner::new().run(None, &slimtest::all_tests());
        for case in report.cases.iter().filter(|case| case.is_failed()) {
            assert_eq!((case.evaluated, case.failed), (2, 1), "{}", case.name);
        }
    }
}
