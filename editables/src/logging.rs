//! Logging infrastructure for the editables library.
//!
//! Library code logs through the `log` facade. This module provides the
//! stderr backend the CLI installs, with three verbosity levels.

use std::env;
use std::fmt;
use std::str::FromStr;

use log::{LevelFilter, Metadata, Record};

use crate::error::Error;

/// Environment variable consulted by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "EDITABLES_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use editables::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all output, errors included.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use editables::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter that corresponds to this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(|message| Error::Validation {
            field: "log_mode".to_string(),
            message,
        })
    }
}

/// A stderr `log` backend.
///
/// Messages below the logger's level are dropped. Each line is prefixed
/// with the record's level, e.g. `WARN: ...`.
///
/// # Examples
///
/// ```
/// use editables::{LogLevel, Logger};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Warn).build()));
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

/// Global backend. Filtering happens through `log::max_level`.
static BACKEND: Logger = Logger::new(LogLevel::Verbose);

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Resolve the log level from CLI flags and the environment, and install
/// the stderr backend as the global `log` logger.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet; verbose wins if both are set)
/// 2. `EDITABLES_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// The backend is installed once per process; later calls only adjust the
/// global level.
///
/// # Examples
///
/// ```
/// use editables::{init_logger, LogLevel};
///
/// let logger = init_logger(false, true);
/// assert_eq!(logger.level(), LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = resolve_level(verbose, quiet);

    // Fails only if a backend is already installed, which is fine.
    let _ = log::set_logger(&BACKEND);
    log::set_max_level(level.filter());

    Logger::new(level)
}

fn resolve_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or_default()
}
