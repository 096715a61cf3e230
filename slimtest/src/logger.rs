//! Logger setup for test binaries.
//!
//! The harness writes everything through the `log` facade. Binaries call
//! [`init`] once to route it to stderr with `env_logger`.

use std::env;

use log::LevelFilter;

use crate::error::{SlimError, SlimResult};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOG";

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// A level name or a full `env_logger` filter spec such as `slimtest=debug`.
    pub filter: String,
    pub timestamps: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_owned(),
            timestamps: false,
        }
    }
}

impl LoggerConfig {
    /// Reads the filter from `LOG`, falling back to `info` when unset or empty.
    pub fn from_env() -> Self {
        Self::from_value(env::var(LOG_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(filter) if !filter.trim().is_empty() => Self {
                filter: filter.trim().to_owned(),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// Replaces the filter, rejecting bare words that are not level names.
    pub fn with_filter(mut self, filter: &str) -> SlimResult<Self> {
        let filter = filter.trim();
        if is_directive_list(filter) {
            self.filter = filter.to_owned();
        } else {
            self.filter = parse_level(filter)?.to_string().to_lowercase();
        }
        Ok(self)
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

fn is_directive_list(filter: &str) -> bool {
    filter.contains('=') || filter.contains(',') || filter.contains("::")
}

pub fn parse_level(level: &str) -> SlimResult<LevelFilter> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| SlimError::InvalidLogLevel(level.to_owned()))
}

/// Installs the logger using the `LOG` environment variable.
pub fn init() -> SlimResult<()> {
    init_with(&LoggerConfig::from_env())
}

/// Like [`init`], but an already installed logger is not an error.
pub fn init_once() -> SlimResult<()> {
    match init() {
        Err(SlimError::LoggerInit(_)) => Ok(()),
        other => other,
    }
}

pub fn init_with(config: &LoggerConfig) -> SlimResult<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(&config.filter)
        .target(env_logger::Target::Stderr);
    if !config.timestamps {
        builder.format_timestamp(None);
    }
    builder.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_value_uses_default() {
        assert_eq!(LoggerConfig::from_value(None), LoggerConfig::default());
        assert_eq!(
            LoggerConfig::from_value(Some("  ".into())),
            LoggerConfig::default()
        );
        assert_eq!(LoggerConfig::default().filter, "info");
    }

    #[test]
    fn value_becomes_filter() {
        let config = LoggerConfig::from_value(Some("debug".into()));
        assert_eq!(config.filter, "debug");
        assert!(!config.timestamps);
    }

    #[test]
    fn with_filter_normalizes_level_names() {
        let config = LoggerConfig::default().with_filter("WARN").unwrap();
        assert_eq!(config.filter, "warn");
    }

    #[test]
    fn with_filter_keeps_directive_lists() {
        let config = LoggerConfig::default()
            .with_filter("slimtest=debug,warn")
            .unwrap();
        assert_eq!(config.filter, "slimtest=debug,warn");
    }

    #[test]
    fn with_filter_rejects_unknown_words() {
        let err = LoggerConfig::default().with_filter("loud").unwrap_err();
        assert!(matches!(err, SlimError::InvalidLogLevel(ref level) if level == "loud"));
        assert_eq!(err.to_string(), "Invalid log level: loud");
    }

    #[test]
    fn with_timestamps_toggles_the_flag() {
        let config = LoggerConfig::default().with_timestamps(true);
        assert!(config.timestamps);
        assert!(!config.with_timestamps(false).timestamps);
    }

    #[test]
    fn init_once_tolerates_an_installed_logger() {
        init_once().unwrap();
        init_once().unwrap();
        assert!(matches!(init(), Err(SlimError::LoggerInit(_))));
    }

    #[test]
    fn parse_level_accepts_off() {
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
    }
}
