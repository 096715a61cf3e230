//! slimtest-people - runs the Person test cases.
//!
//! Exits with the number of failed test cases, so `0` means every case passed.

mod person;
mod tests;

use clap::Parser;
use slimtest::logger::{self, LoggerConfig};
use slimtest::{SlimResult, TestRunner};

#[derive(Parser, Debug)]
#[command(version, about = "Run every registered Person test case")]
struct Args {
    /// Name shown in the summary line
    #[arg(long)]
    label: Option<String>,

    /// Log filter, overrides the LOG environment variable
    #[arg(long)]
    log: Option<String>,

    /// Prefix every log line with a timestamp
    #[arg(long)]
    timestamps: bool,
}

fn logger_config(args: &Args, base: LoggerConfig) -> SlimResult<LoggerConfig> {
    let mut config = base.with_timestamps(args.timestamps);
    if let Some(filter) = &args.log {
        config = config.with_filter(filter)?;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_with(&logger_config(&args, LoggerConfig::from_env())?)?;

    let tests = slimtest::all_tests();
    log::debug!("{} test case(s) registered", tests.len());

    let report = TestRunner::new().run(args.label.as_deref(), &tests);
    std::process::exit(report.exit_code());
}

#[cfg(test)]
mod cli {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("slimtest-people").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_keep_base_config() {
        let config = logger_config(&parse(&[]), LoggerConfig::default()).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn flags_override_base_config() {
        let args = parse(&["--timestamps", "--log", "debug", "--label", "people"]);
        let config = logger_config(&args, LoggerConfig::default()).unwrap();
        assert!(config.timestamps);
        assert_eq!(config.filter, "debug");
        assert_eq!(args.label.as_deref(), Some("people"));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let args = parse(&["--log", "loud"]);
        assert!(logger_config(&args, LoggerConfig::default()).is_err());
    }
}
