//! Test case descriptor.

use core::fmt;

/// One registered unit of assertions.
///
/// A case carries no inputs and returns nothing; its outcome is read from the
/// assertion counters after it finishes. Descriptors are plain data so they
/// can live in a link-time slice and be copied out of the registry freely.
#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub module: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub test_fn: fn(),
}

impl TestCase {
    pub const fn new(
        name: &'static str,
        module: &'static str,
        file: &'static str,
        line: u32,
        test_fn: fn(),
    ) -> Self {
        Self {
            name,
            module,
            file,
            line,
            test_fn,
        }
    }

    /// Builds a case for runtime registration, named after the caller's location.
    #[track_caller]
    pub fn anonymous(test_fn: fn()) -> Self {
        let location = core::panic::Location::caller();
        Self::new("<anonymous>", "", location.file(), location.line(), test_fn)
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    /// `module::name`, or just the name for cases without a module path.
    pub fn qualified_name(&self) -> QualifiedName<'_> {
        QualifiedName(self)
    }

    pub fn run(&self) {
        (self.test_fn)()
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

pub struct QualifiedName<'a>(&'a TestCase);

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.module.is_empty() {
            f.write_str(self.0.name)
        } else {
            write!(f, "{}::{}", self.0.module, self.0.name)
        }
    }
}
