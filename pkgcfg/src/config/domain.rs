//! Structured domains: named-entry maps that live beside the scalar settings.
//!
//! Each domain knows its section name, which document family stores it,
//! which fields its entries carry, and how a `set` turns value arguments
//! into a stored entry.

use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::config::document::DocumentRole;
use crate::error::{Error, Result};

/// A structured domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// `repositories.<name>.url`
    Repositories,
    /// `http-basic.<name>` with username and password
    HttpBasic,
    /// `pypi-token.<name>`
    PypiToken,
    /// `certificates.<name>.(cert|client-cert)`
    Certificates,
}

/// A field inside a domain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    /// Repository URL.
    Url,
    /// HTTP basic username.
    Username,
    /// HTTP basic password.
    Password,
    /// CA bundle path.
    Cert,
    /// Client certificate path.
    ClientCert,
}

impl EntryField {
    /// Parse a field segment.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "url" => Some(Self::Url),
            "username" => Some(Self::Username),
            "password" => Some(Self::Password),
            "cert" => Some(Self::Cert),
            "client-cert" => Some(Self::ClientCert),
            _ => None,
        }
    }

    /// The key under which the field is stored.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Username => "username",
            Self::Password => "password",
            Self::Cert => "cert",
            Self::ClientCert => "client-cert",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A write produced by [`Domain::assignment`]: store `value` at `segments`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Full path inside the document.
    pub segments: Vec<String>,
    /// Value to store.
    pub value: Value,
}

impl Assignment {
    /// Segments as borrowed strings.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }
}

impl Domain {
    /// All domains, in section-name order.
    pub const ALL: [Domain; 4] = [
        Domain::Certificates,
        Domain::HttpBasic,
        Domain::PypiToken,
        Domain::Repositories,
    ];

    /// Recognize the first segment of a dotted path.
    ///
    /// `repo` and `repos` are accepted as aliases of `repositories`.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "repositories" | "repo" | "repos" => Some(Self::Repositories),
            "http-basic" => Some(Self::HttpBasic),
            "pypi-token" => Some(Self::PypiToken),
            "certificates" => Some(Self::Certificates),
            _ => None,
        }
    }

    /// Canonical section name in documents.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Repositories => "repositories",
            Self::HttpBasic => "http-basic",
            Self::PypiToken => "pypi-token",
            Self::Certificates => "certificates",
        }
    }

    /// The document family that stores this domain.
    #[must_use]
    pub const fn role(self) -> DocumentRole {
        match self {
            Self::Repositories => DocumentRole::Settings,
            Self::HttpBasic | Self::PypiToken | Self::Certificates => DocumentRole::Credentials,
        }
    }

    /// Noun used in "There is no X ... defined" messages.
    #[must_use]
    pub const fn entry_noun(self) -> &'static str {
        match self {
            Self::Repositories => "repository",
            Self::HttpBasic => "http-basic credential",
            Self::PypiToken => "token",
            Self::Certificates => "certificate",
        }
    }

    /// Whether entries of this domain carry `field`.
    #[must_use]
    pub fn accepts(self, field: EntryField) -> bool {
        matches!(
            (self, field),
            (Self::Repositories, EntryField::Url)
                | (Self::HttpBasic, EntryField::Username | EntryField::Password)
                | (Self::Certificates, EntryField::Cert | EntryField::ClientCert)
        )
    }

    /// Validate value arguments and build the write for a `set`.
    ///
    /// `display_path` is used in errors when the target is not settable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArity`] when the number of values does not
    /// match the target, or [`Error::UnknownSetting`] for a certificate
    /// entry without a field.
    pub fn assignment(
        self,
        display_path: &str,
        name: &str,
        field: Option<EntryField>,
        values: &[String],
    ) -> Result<Assignment> {
        let section = self.section().to_string();
        let name = name.to_string();

        match (self, field) {
            (Self::Repositories, _) => {
                let [url] = values else {
                    return Err(Error::arity(
                        "You must pass the url. Example: pkgcfg config repositories.foo https://bar.com",
                    ));
                };
                Ok(Assignment {
                    segments: vec![section, name, EntryField::Url.key().to_string()],
                    value: Value::from(url.as_str()),
                })
            }
            (Self::PypiToken, _) => {
                let [token] = values else {
                    return Err(Error::arity(format!(
                        "Expected only one argument (token), got {}",
                        values.len()
                    )));
                };
                Ok(Assignment {
                    segments: vec![section, name],
                    value: Value::from(token.as_str()),
                })
            }
            (Self::HttpBasic, None) => {
                let mut entry = Mapping::new();
                match values {
                    [username] => {
                        entry.insert(Value::from("username"), Value::from(username.as_str()));
                    }
                    [username, password] => {
                        entry.insert(Value::from("username"), Value::from(username.as_str()));
                        entry.insert(Value::from("password"), Value::from(password.as_str()));
                    }
                    _ => {
                        return Err(Error::arity(format!(
                            "Expected one or two arguments (username, password), got {}",
                            values.len()
                        )))
                    }
                }
                Ok(Assignment {
                    segments: vec![section, name],
                    value: Value::Mapping(entry),
                })
            }
            (Self::HttpBasic | Self::Certificates, Some(field)) => {
                let [value] = values else {
                    return Err(Error::arity("You must pass exactly 1 value"));
                };
                Ok(Assignment {
                    segments: vec![section, name, field.key().to_string()],
                    value: Value::from(value.as_str()),
                })
            }
            (Self::Certificates, None) => Err(Error::UnknownSetting {
                path: display_path.to_string(),
            }),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_repository_aliases() {
        for alias in ["repositories", "repo", "repos"] {
            assert_eq!(Domain::from_segment(alias), Some(Domain::Repositories));
        }
        assert_eq!(Domain::from_segment("repository"), None);
    }

    #[test]
    fn test_roles() {
        assert_eq!(Domain::Repositories.role(), DocumentRole::Settings);
        assert_eq!(Domain::PypiToken.role(), DocumentRole::Credentials);
        assert_eq!(Domain::HttpBasic.role(), DocumentRole::Credentials);
        assert_eq!(Domain::Certificates.role(), DocumentRole::Credentials);
    }

    #[test]
    fn test_accepted_fields() {
        assert!(Domain::Repositories.accepts(EntryField::Url));
        assert!(!Domain::Repositories.accepts(EntryField::Cert));
        assert!(Domain::Certificates.accepts(EntryField::ClientCert));
        assert!(Domain::HttpBasic.accepts(EntryField::Password));
        assert!(!Domain::PypiToken.accepts(EntryField::Url));
    }

    #[test]
    fn test_repository_assignment_writes_url() {
        let assignment = Domain::Repositories
            .assignment("repositories.foo", "foo", None, &args(&["https://bar.com"]))
            .unwrap();
        assert_eq!(assignment.path(), vec!["repositories", "foo", "url"]);
        assert_eq!(assignment.value, Value::from("https://bar.com"));
    }

    #[test]
    fn test_repository_rejects_multiple_urls() {
        let err = Domain::Repositories
            .assignment(
                "repositories.foo",
                "foo",
                None,
                &args(&["https://bar.com", "https://baz.com"]),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must pass the url. Example: pkgcfg config repositories.foo https://bar.com"
        );
    }

    #[test]
    fn test_pypi_token_arity() {
        let err = Domain::PypiToken
            .assignment("pypi-token.pypi", "pypi", None, &args(&["mytoken", "other"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected only one argument (token), got 2");
    }

    #[test]
    fn test_http_basic_one_or_two_values() {
        let single = Domain::HttpBasic
            .assignment("http-basic.pypi", "pypi", None, &args(&["user"]))
            .unwrap();
        let entry = single.value.as_mapping().unwrap();
        assert_eq!(entry.get("username"), Some(&Value::from("user")));
        assert!(entry.get("password").is_none());

        let pair = Domain::HttpBasic
            .assignment("http-basic.pypi", "pypi", None, &args(&["user", "pass"]))
            .unwrap();
        assert_eq!(
            pair.value.as_mapping().unwrap().get("password"),
            Some(&Value::from("pass"))
        );

        let err = Domain::HttpBasic
            .assignment("http-basic.pypi", "pypi", None, &args(&["a", "b", "c"]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected one or two arguments (username, password), got 3"
        );
    }

    #[test]
    fn test_certificate_requires_field_and_single_value() {
        let ok = Domain::Certificates
            .assignment(
                "certificates.foo.cert",
                "foo",
                Some(EntryField::Cert),
                &args(&["path/to/ca.pem"]),
            )
            .unwrap();
        assert_eq!(ok.path(), vec!["certificates", "foo", "cert"]);

        let err = Domain::Certificates
            .assignment(
                "certificates.foo.cert",
                "foo",
                Some(EntryField::Cert),
                &args(&["path/to/ca.pem", "other"]),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "You must pass exactly 1 value");

        let err = Domain::Certificates
            .assignment("certificates.foo", "foo", None, &args(&["x"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "There is no certificates.foo setting.");
    }
}
