//! Errors reported by the `pkgcfg` binary.
//!
//! Config command failures exit with 1 so scripts can tell them apart from
//! bad arguments (4), unreadable files (5) and malformed YAML (7).

use pkgcfg::Error as LibError;
use std::fmt;

/// Failure of a `pkgcfg` invocation.
#[derive(Debug)]
pub enum CliError {
    /// Error raised by the configuration engine.
    Library(LibError),

    /// Flags that parse but do not make sense together.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// A configuration file could not be parsed or written.
    Config(String),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Config command failure (unknown setting, missing entry, bad values)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration file error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) if lib_err.is_command_error() => 1,
            CliError::Library(_) => 6,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Io(io) => CliError::Io(io),
            LibError::MalformedDocument { .. } | LibError::Serialization(_) => {
                CliError::Config(e.to_string())
            }
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
