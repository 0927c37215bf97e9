//! Config command requests and their outcomes.

use std::fmt;
use std::path::PathBuf;

use crate::config::DocumentRole;

/// Which sources a command targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The user-wide documents.
    #[default]
    Global,
    /// The project-local documents.
    Local,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// One invocation of the config command.
///
/// # Examples
///
/// ```
/// use pkgcfg::operations::{ConfigRequest, Scope};
///
/// let request = ConfigRequest::new(Some("installer.parallel".to_string()))
///     .with_values(vec!["false".to_string()])
///     .with_scope(Scope::Local);
///
/// assert!(!request.unset);
/// assert_eq!(request.scope, Scope::Local);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRequest {
    /// Dotted path of the setting or domain entry.
    pub path: Option<String>,
    /// Value arguments following the path.
    pub values: Vec<String>,
    /// Remove the path instead of reading or writing it.
    pub unset: bool,
    /// Print the whole configuration.
    pub list: bool,
    /// Documents targeted by writes and local listings.
    pub scope: Scope,
}

impl ConfigRequest {
    /// Creates a request for `path` with no values.
    #[must_use]
    pub fn new(path: Option<String>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// A `--list` request.
    #[must_use]
    pub fn listing() -> Self {
        Self::default().with_list(true)
    }

    /// Set the value arguments.
    #[must_use]
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    /// Set the unset flag.
    #[must_use]
    pub const fn with_unset(mut self, unset: bool) -> Self {
        self.unset = unset;
        self
    }

    /// Set the list flag.
    #[must_use]
    pub const fn with_list(mut self, list: bool) -> Self {
        self.list = list;
        self
    }

    /// Set the target scope.
    #[must_use]
    pub const fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

/// Result of a config command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered value of a `get`.
    Value(String),
    /// Rendered lines of a `list`.
    Listing(Vec<String>),
    /// A document was written.
    Updated {
        /// Family of the written document.
        role: DocumentRole,
        /// Scope of the written document.
        scope: Scope,
        /// File that was written, if the document is file-backed.
        location: Option<PathBuf>,
    },
    /// Nothing to print and nothing written.
    Nothing,
}

impl Outcome {
    /// Lines to print on standard output.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Value(value) => vec![value.as_str()],
            Self::Listing(lines) => lines.iter().map(String::as_str).collect(),
            Self::Updated { .. } | Self::Nothing => Vec::new(),
        }
    }
}
