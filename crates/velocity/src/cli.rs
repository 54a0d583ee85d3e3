//! Command line for the headless runner.
//!
//! Hand-parsed; the surface is three flags.

use std::path::PathBuf;

use velocity_shared::CONFIG_FILE;

use crate::error::{DriverError, DriverResult};

/// Ticks run when `--ticks` is absent (ten seconds at 60 Hz).
pub const DEFAULT_TICKS: u64 = 600;

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: velocity-headless [OPTIONS]

Options:
  -c, --config <PATH>    Configuration file (default: velocity.toml)
  -t, --ticks <N>        Ticks to run (default: 600)
  -s, --seed <N>         Override gameplay.seed
  -h, --help             Show this help";

/// Parsed arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessArgs {
    /// Configuration file path.
    pub config: PathBuf,
    /// Number of ticks to run.
    pub ticks: u64,
    /// Seed override.
    pub seed: Option<u64>,
    /// `--help` was given.
    pub help: bool,
}

impl Default for HeadlessArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(CONFIG_FILE),
            ticks: DEFAULT_TICKS,
            seed: None,
            help: false,
        }
    }
}

impl HeadlessArgs {
    /// Parses arguments, program name excluded.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Usage`] for an unknown flag, a missing value
    /// or a value that isn't a number.
    pub fn parse<I>(args: I) -> DriverResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config = PathBuf::from(value(&arg, args.next())?),
                "--ticks" | "-t" => parsed.ticks = number(&arg, args.next())?,
                "--seed" | "-s" => parsed.seed = Some(number(&arg, args.next())?),
                "--help" | "-h" => parsed.help = true,
                other => return Err(DriverError::Usage(format!("unknown option {other:?}"))),
            }
        }
        Ok(parsed)
    }
}

fn value(flag: &str, next: Option<String>) -> DriverResult<String> {
    next.ok_or_else(|| DriverError::Usage(format!("{flag} needs a value")))
}

fn number(flag: &str, next: Option<String>) -> DriverResult<u64> {
    let raw = value(flag, next)?;
    raw.parse()
        .map_err(|_| DriverError::Usage(format!("{flag} expects a number, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DriverResult<HeadlessArgs> {
        HeadlessArgs::parse(args.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), HeadlessArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["--config", "run.toml", "-t", "120", "--seed", "42"]).unwrap();
        assert_eq!(args.config, PathBuf::from("run.toml"));
        assert_eq!(args.ticks, 120);
        assert_eq!(args.seed, Some(42));
        assert!(!args.help);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse(&["--ticks"]), Err(DriverError::Usage(_))));
        assert!(matches!(parse(&["--seed", "abc"]), Err(DriverError::Usage(_))));
        assert!(matches!(parse(&["--port", "1"]), Err(DriverError::Usage(_))));
    }
}
