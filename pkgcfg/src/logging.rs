//! Logging infrastructure for pkgcfg.
//!
//! Diagnostics for the user go through [`Logger`], a small stderr writer
//! gated by [`LogLevel`]. Library internals emit `log` records; a binary
//! routes them through the same writer with [`Logger::install`].

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_VAR: &str = "PKGCFG_LOG_MODE";

/// How much `pkgcfg` writes to stderr.
///
/// Ordered from least verbose (`Quiet`) to most verbose (`Verbose`).
///
/// # Examples
///
/// ```
/// use pkgcfg::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing but the final error line.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Parses `quiet`, `normal` or `verbose`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use pkgcfg::LogLevel;
    ///
    /// assert_eq!("VERBOSE".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
    /// assert!("loud".parse::<LogLevel>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A stderr logger that respects a [`LogLevel`].
///
/// # Examples
///
/// ```
/// use pkgcfg::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("local settings file is empty");
/// logger.info("not printed below Verbose");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

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

    /// Logs an error message unless the level is `Quiet`.
    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Normal, "ERROR", message);
    }

    /// Logs a warning message unless the level is `Quiet`.
    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Normal, "WARN", message);
    }

    /// Logs an informational message at `Verbose` level.
    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Verbose, "INFO", message);
    }

    /// Logs a debug message at `Verbose` level.
    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Verbose, "DEBUG", message);
    }

    /// Install this logger as the `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if a backend is already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(self.level.filter());
        Ok(())
    }

    fn emit(&self, threshold: LogLevel, prefix: &str, message: &str) {
        if self.level >= threshold {
            eprintln!("{prefix}: {message}");
        }
    }
}

impl LogLevel {
    /// Most detailed `log` level shown at this verbosity.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        match record.level() {
            log::Level::Error => self.error(&message),
            log::Level::Warn => self.warn(&message),
            log::Level::Info => self.info(&message),
            log::Level::Debug | log::Level::Trace => self.debug(&message),
        }
    }

    fn flush(&self) {}
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

/// Initializes a logger from CLI flags and the environment.
///
/// Priority order:
/// 1. CLI flags (`verbose` wins over `quiet`)
/// 2. `PKGCFG_LOG_MODE`
/// 3. `Normal`
///
/// # Examples
///
/// ```
/// use pkgcfg::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    let level = env::var(LOG_MODE_VAR)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LogLevel::Normal);
    Logger::new(level)
}
