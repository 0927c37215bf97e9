//! Classification of dotted paths.
//!
//! A dotted path addresses either a recognized scalar setting or an entry
//! inside one of the structured domains. [`PathResolver::classify`] turns the
//! raw string into a [`Target`] once, so callers match on variants instead of
//! re-parsing strings.

use crate::config::domain::{Domain, EntryField};
use crate::config::schema::{RecognizedSetting, SettingSchema};
use crate::error::{Error, Result};

/// An entry (or a whole section) of a structured domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    /// Domain named by the first segment.
    pub domain: Domain,
    /// Entry name, absent when the path names the whole section.
    pub name: Option<String>,
    /// Field inside the entry.
    pub field: Option<EntryField>,
}

impl DomainTarget {
    /// Document segments of the addressed node.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.domain.section()];
        if let Some(name) = &self.name {
            segments.push(name);
        }
        if let Some(field) = self.field {
            segments.push(field.key());
        }
        segments
    }

    /// Name used in "There is no ... defined" messages.
    #[must_use]
    pub fn entry_label(&self) -> String {
        match (&self.name, self.field) {
            (Some(name), Some(field)) => format!("{name}.{field}"),
            (Some(name), None) => name.clone(),
            (None, _) => self.domain.section().to_string(),
        }
    }

    /// Error for an entry that does not exist.
    #[must_use]
    pub fn missing(&self) -> Error {
        Error::MissingEntry {
            domain: self.domain,
            name: self.entry_label(),
        }
    }

    /// Error for a mutation against the whole section.
    #[must_use]
    pub fn integrity_violation(&self) -> Error {
        Error::DomainIntegrity {
            section: self.domain.section().to_string(),
        }
    }
}

/// What a dotted path resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<'s> {
    /// A scalar setting from the schema.
    Setting(&'s RecognizedSetting),
    /// A structured domain section, entry, or field.
    Domain(DomainTarget),
}

/// Resolves dotted paths against a [`SettingSchema`].
///
/// # Examples
///
/// ```
/// use pkgcfg::config::{Domain, PathResolver, SettingSchema, Target};
/// use std::path::Path;
///
/// let schema = SettingSchema::with_cache_dir(Path::new("/cache"));
/// let resolver = PathResolver::new(&schema);
///
/// assert!(matches!(resolver.classify("installer.parallel").unwrap(), Target::Setting(_)));
/// match resolver.classify("repo.foo").unwrap() {
///     Target::Domain(target) => {
///         assert_eq!(target.domain, Domain::Repositories);
///         assert_eq!(target.name.as_deref(), Some("foo"));
///     }
///     Target::Setting(_) => unreachable!(),
/// }
/// assert!(resolver.classify("missing_config_value").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'s> {
    schema: &'s SettingSchema,
}

impl<'s> PathResolver<'s> {
    /// Creates a resolver over `schema`.
    #[must_use]
    pub const fn new(schema: &'s SettingSchema) -> Self {
        Self { schema }
    }

    /// Classify `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSetting`] when the path is neither a
    /// recognized setting nor a well-formed domain path.
    pub fn classify(&self, path: &str) -> Result<Target<'s>> {
        if let Some(setting) = self.schema.resolve(path) {
            return Ok(Target::Setting(setting));
        }

        let unknown = || Error::UnknownSetting {
            path: path.to_string(),
        };

        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unknown());
        }

        let Some(domain) = Domain::from_segment(segments[0]) else {
            return Err(unknown());
        };

        let target = match segments[1..] {
            [] => DomainTarget {
                domain,
                name: None,
                field: None,
            },
            [name] => DomainTarget {
                domain,
                name: Some(name.to_string()),
                field: None,
            },
            [name, field] => {
                let field = EntryField::from_segment(field)
                    .filter(|f| domain.accepts(*f))
                    .ok_or_else(unknown)?;
                DomainTarget {
                    domain,
                    name: Some(name.to_string()),
                    field: Some(field),
                }
            }
            _ => return Err(unknown()),
        };

        Ok(Target::Domain(target))
    }
}
