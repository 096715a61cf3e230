//! Assertion contract.
//!
//! Every assertion macro evaluates its operands once, bumps the per-case
//! counters, and on failure logs a [`Diagnostic`] carrying the source text,
//! the operand values and the call site. None of them return early or panic:
//! execution always continues with the next statement of the test case.

use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug};

/// Assertions evaluated and failed by the case currently running on this thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounters {
    pub evaluated: usize,
    pub failed: usize,
}

impl RunCounters {
    pub const fn new() -> Self {
        Self {
            evaluated: 0,
            failed: 0,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

thread_local! {
    static COUNTERS: Cell<RunCounters> = const { Cell::new(RunCounters::new()) };
    static LAST_DIAGNOSTIC: RefCell<Option<Diagnostic>> = const { RefCell::new(None) };
}

/// Current counter values.
pub fn counters() -> RunCounters {
    COUNTERS.with(Cell::get)
}

/// Zeroes the counters and forgets the last diagnostic.
pub fn reset_counters() {
    COUNTERS.with(|counters| counters.set(RunCounters::new()));
    LAST_DIAGNOSTIC.with(|last| *last.borrow_mut() = None);
}

/// The most recent failure recorded on this thread since the last reset.
pub fn last_diagnostic() -> Option<Diagnostic> {
    LAST_DIAGNOSTIC.with(|last| last.borrow().clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    True,
    False,
    Equal,
    NotEqual,
    Null,
    NotNull,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Predicate {
    /// Name of the macro that checks this predicate.
    pub fn name(self) -> &'static str {
        match self {
            Predicate::True => "assert_true",
            Predicate::False => "assert_false",
            Predicate::Equal => "assert_equal",
            Predicate::NotEqual => "assert_not_equal",
            Predicate::Null => "assert_null",
            Predicate::NotNull => "assert_not_null",
            Predicate::GreaterThan => "assert_greater_than",
            Predicate::LessThan => "assert_less_than",
            Predicate::GreaterThanOrEqual => "assert_greater_than_or_equal",
            Predicate::LessThanOrEqual => "assert_less_than_or_equal",
        }
    }

    /// Binary operator joining the operand texts in a diagnostic.
    pub fn operator(self) -> Option<&'static str> {
        match self {
            Predicate::Equal => Some("=="),
            Predicate::NotEqual => Some("!="),
            Predicate::GreaterThan => Some(">"),
            Predicate::LessThan => Some("<"),
            Predicate::GreaterThanOrEqual => Some(">="),
            Predicate::LessThanOrEqual => Some("<="),
            _ => None,
        }
    }

    fn expectation(self) -> &'static str {
        match self {
            Predicate::True => "Expected true but was false",
            Predicate::False => "Expected false but was true",
            Predicate::Equal => "Expected equal but were unequal",
            Predicate::NotEqual => "Expected not equal but were equal",
            Predicate::Null => "Expected null but was not null",
            Predicate::NotNull => "Expected not null but was null",
            Predicate::GreaterThan => "Expected greater than",
            Predicate::LessThan => "Expected less than",
            Predicate::GreaterThanOrEqual => "Expected greater than or equal",
            Predicate::LessThanOrEqual => "Expected less than or equal",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One failed assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub predicate: Predicate,
    /// Operand source text, joined by the predicate's operator when binary.
    pub expression: String,
    /// Debug rendering of the operand values, when they are printable.
    pub values: Option<String>,
    pub message: Option<String>,
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Assertion failed: {}: {}. {}",
            self.predicate,
            self.expression,
            self.predicate.expectation()
        )?;
        if let Some(values) = &self.values {
            write!(f, " ({values})")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        write!(f, ". At: {}:{}", self.file, self.line)
    }
}

/// Source location and text of an assertion, filled in by the macros.
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub left: &'static str,
    pub right: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

impl Site {
    fn expression(&self, predicate: Predicate) -> String {
        match (self.right, predicate.operator()) {
            (Some(right), Some(op)) => format!("{} {} {}", self.left, op, right),
            _ => self.left.to_owned(),
        }
    }
}

/// Values that have a "null" state: an absent option, a null pointer, or a
/// weak reference whose target has been dropped.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for *const T {
    fn is_null(&self) -> bool {
        <*const T>::is_null(*self)
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_null(&self) -> bool {
        <*mut T>::is_null(*self)
    }
}

impl<T: ?Sized> Nullable for std::sync::Weak<T> {
    fn is_null(&self) -> bool {
        self.strong_count() == 0
    }
}

impl<T: ?Sized> Nullable for std::rc::Weak<T> {
    fn is_null(&self) -> bool {
        self.strong_count() == 0
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

fn record(
    predicate: Predicate,
    passed: bool,
    site: Site,
    values: impl FnOnce() -> Option<String>,
    message: Option<fmt::Arguments<'_>>,
) -> bool {
    COUNTERS.with(|counters| {
        let mut current = counters.get();
        current.evaluated += 1;
        if !passed {
            current.failed += 1;
        }
        counters.set(current);
    });

    if !passed {
        let diagnostic = Diagnostic {
            predicate,
            expression: site.expression(predicate),
            values: values(),
            message: message.map(|args| args.to_string()),
            file: site.file,
            line: site.line,
        };
        error!("{}", diagnostic);
        LAST_DIAGNOSTIC.with(|last| *last.borrow_mut() = Some(diagnostic));
    }

    passed
}

#[doc(hidden)]
pub fn truth(
    predicate: Predicate,
    value: bool,
    site: Site,
    message: Option<fmt::Arguments<'_>>,
) -> bool {
    let expected = predicate == Predicate::True;
    record(predicate, value == expected, site, || Some(format!("{value}")), message)
}

#[doc(hidden)]
pub fn equality<L, R>(
    predicate: Predicate,
    left: &L,
    right: &R,
    site: Site,
    message: Option<fmt::Arguments<'_>>,
) -> bool
where
    L: PartialEq<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    let equal = left == right;
    let passed = if predicate == Predicate::Equal { equal } else { !equal };
    record(predicate, passed, site, || Some(format!("{left:?}, {right:?}")), message)
}

#[doc(hidden)]
pub fn ordering<L, R>(
    predicate: Predicate,
    left: &L,
    right: &R,
    site: Site,
    message: Option<fmt::Arguments<'_>>,
) -> bool
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    let passed = match predicate {
        Predicate::GreaterThan => left > right,
        Predicate::LessThan => left < right,
        Predicate::GreaterThanOrEqual => left >= right,
        Predicate::LessThanOrEqual => left <= right,
        _ => unreachable!("{predicate} is not an ordering predicate"),
    };
    record(predicate, passed, site, || Some(format!("{left:?}, {right:?}")), message)
}

#[doc(hidden)]
pub fn nullness<T: Nullable + ?Sized>(
    predicate: Predicate,
    value: &T,
    site: Site,
    message: Option<fmt::Arguments<'_>>,
) -> bool {
    let passed = value.is_null() == (predicate == Predicate::Null);
    record(predicate, passed, site, || None, message)
}

#[doc(hidden)]
#[macro_export]
macro_rules! __site {
    ($left:expr) => {
        $crate::assertion::Site {
            left: stringify!($left),
            right: None,
            file: file!(),
            line: line!(),
        }
    };
    ($left:expr, $right:expr) => {
        $crate::assertion::Site {
            left: stringify!($left),
            right: Some(stringify!($right)),
            file: file!(),
            line: line!(),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __unary_assert {
    ($check:ident, $predicate:ident, $value:expr) => {
        $crate::assertion::$check(
            $crate::assertion::Predicate::$predicate,
            &$value,
            $crate::__site!($value),
            None,
        )
    };
    ($check:ident, $predicate:ident, $value:expr, $($arg:tt)+) => {
        $crate::assertion::$check(
            $crate::assertion::Predicate::$predicate,
            &$value,
            $crate::__site!($value),
            Some(format_args!($($arg)+)),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __binary_assert {
    ($check:ident, $predicate:ident, $left:expr, $right:expr) => {
        $crate::assertion::$check(
            $crate::assertion::Predicate::$predicate,
            &$left,
            &$right,
            $crate::__site!($left, $right),
            None,
        )
    };
    ($check:ident, $predicate:ident, $left:expr, $right:expr, $($arg:tt)+) => {
        $crate::assertion::$check(
            $crate::assertion::Predicate::$predicate,
            &$left,
            &$right,
            $crate::__site!($left, $right),
            Some(format_args!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! assert_true {
    ($cond:expr $(,)?) => {
        $crate::assertion::truth($crate::assertion::Predicate::True, $cond, $crate::__site!($cond), None)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::assertion::truth(
            $crate::assertion::Predicate::True,
            $cond,
            $crate::__site!($cond),
            Some(format_args!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! assert_false {
    ($cond:expr $(,)?) => {
        $crate::assertion::truth($crate::assertion::Predicate::False, $cond, $crate::__site!($cond), None)
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::assertion::truth(
            $crate::assertion::Predicate::False,
            $cond,
            $crate::__site!($cond),
            Some(format_args!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! assert_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__binary_assert!(equality, Equal, $left, $right)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__binary_assert!(equality, Equal, $left, $right, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_not_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__binary_assert!(equality, NotEqual, $left, $right)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__binary_assert!(equality, NotEqual, $left, $right, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_null {
    ($value:expr $(,)?) => {
        $crate::__unary_assert!(nullness, Null, $value)
    };
    ($value:expr, $($arg:tt)+) => {
        $crate::__unary_assert!(nullness, Null, $value, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_not_null {
    ($value:expr $(,)?) => {
        $crate::__unary_assert!(nullness, NotNull, $value)
    };
    ($value:expr, $($arg:tt)+) => {
        $crate::__unary_assert!(nullness, NotNull, $value, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_greater_than {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__binary_assert!(ordering, GreaterThan, $left, $right)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__binary_assert!(ordering, GreaterThan, $left, $right, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_less_than {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__binary_assert!(ordering, LessThan, $left, $right)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__binary_assert!(ordering, LessThan, $left, $right, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_greater_than_or_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__binary_assert!(ordering, GreaterThanOrEqual, $left, $right)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__binary_assert!(ordering, GreaterThanOrEqual, $left, $right, $($arg)+)
    };
}

#[macro_export]
macro_rules! assert_less_than_or_equal {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__binary_assert!(ordering, LessThanOrEqual, $left, $right)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__binary_assert!(ordering, LessThanOrEqual, $left, $right, $($arg)+)
    };
}
