//! Error types for the harness's ambient plumbing.
//!
//! Assertion failures are never errors; they are counted and logged. Only
//! setup steps such as installing the logger can fail.

#[derive(thiserror::Error, Debug)]
pub enum SlimError {
    #[error("Logger init failed: {0}")]
    LoggerInit(#[from] log::SetLoggerError),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

pub type SlimResult<T> = Result<T, SlimError>;
