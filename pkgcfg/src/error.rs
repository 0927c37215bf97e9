//! Error types for the pkgcfg library.
//!
//! Every failure a config command can report is a variant of [`Error`]. The
//! `Display` text of the command-level variants is part of the observable
//! contract of the CLI, so tests compare it literally.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Domain;

/// Result type alias for operations that may fail with a pkgcfg error.
///
/// # Examples
///
/// ```
/// use pkgcfg::{Error, Result};
///
/// fn example_operation() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pkgcfg library.
#[derive(Debug, Error)]
pub enum Error {
    /// The path resolves neither to a recognized setting nor to a domain.
    #[error("There is no {path} setting.")]
    UnknownSetting {
        /// The dotted path that was requested.
        path: String,
    },

    /// A named domain entry referenced by get/unset does not exist.
    #[error("There is no {name} {} defined", domain.entry_noun())]
    MissingEntry {
        /// The domain that was searched.
        domain: Domain,
        /// The entry name that was not found.
        name: String,
    },

    /// Wrong number of value arguments for the resolved target.
    #[error("{message}")]
    InvalidArity {
        /// Message naming the expected shape.
        message: String,
    },

    /// Attempt to remove or blanket-assign an entire structured section.
    #[error("You cannot remove the [{section}] section")]
    DomainIntegrity {
        /// Name of the section.
        section: String,
    },

    /// Value arguments combined with `--unset`.
    #[error("You can not combine a setting value with --unset")]
    ConflictingFlags,

    /// A value does not satisfy the type of the setting it targets.
    #[error("\"{value}\" is an invalid value for {path}")]
    InvalidValue {
        /// The rejected raw value.
        value: String,
        /// The setting path.
        path: String,
    },

    /// A persisted document could not be parsed.
    #[error("malformed configuration file {}: {message}", path.display())]
    MalformedDocument {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A document could not be serialized.
    #[error("configuration error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred outside of a config command.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Builds an [`Error::InvalidArity`] from a message.
    pub(crate) fn arity(message: impl Into<String>) -> Self {
        Self::InvalidArity {
            message: message.into(),
        }
    }

    /// Check if error was raised by command validation rather than storage.
    ///
    /// Command errors never leave a partial write behind.
    ///
    /// # Examples
    ///
    /// ```
    /// use pkgcfg::Error;
    ///
    /// assert!(Error::ConflictingFlags.is_command_error());
    /// ```
    #[must_use]
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownSetting { .. }
                | Self::MissingEntry { .. }
                | Self::InvalidArity { .. }
                | Self::DomainIntegrity { .. }
                | Self::ConflictingFlags
                | Self::InvalidValue { .. }
        )
    }
}
