//! Environment variable overrides for scalar settings.
//!
//! Every recognized setting can be overridden with `PKGCFG_<PATH>`, where
//! the path is uppercased and `.`/`-` become `_`. Overrides form the
//! highest-precedence layer when a context enables them.

use std::env;

use serde_yaml::Mapping;

use crate::config::document::assign;
use crate::config::schema::SettingSchema;
use crate::config::validator::SettingValidator;
use crate::error::{Error, Result};

/// Prefix shared by all override variables.
pub const ENV_PREFIX: &str = "PKGCFG_";

/// Builds the environment override layer.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::EnvironmentOverrides;
///
/// assert_eq!(
///     EnvironmentOverrides::variable_name("virtualenvs.options.always-copy"),
///     "PKGCFG_VIRTUALENVS_OPTIONS_ALWAYS_COPY"
/// );
/// ```
pub struct EnvironmentOverrides;

impl EnvironmentOverrides {
    /// Variable name that overrides `path`.
    #[must_use]
    pub fn variable_name(path: &str) -> String {
        let key: String = path
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        format!("{ENV_PREFIX}{key}")
    }

    /// Collect overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a variable holds a value that does not
    /// fit its setting's type.
    pub fn collect(schema: &SettingSchema) -> Result<Mapping> {
        Self::collect_from(schema, |name| env::var(name).ok())
    }

    /// Collect overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Same as [`collect`](Self::collect).
    pub fn collect_from<F>(schema: &SettingSchema, lookup: F) -> Result<Mapping>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layer = Mapping::new();

        for setting in schema.settings() {
            let name = Self::variable_name(&setting.path);
            let Some(raw) = lookup(&name) else {
                continue;
            };

            let value = SettingValidator::parse(setting, &raw).map_err(|e| Error::Validation {
                field: name.clone(),
                message: e.to_string(),
            })?;
            log::debug!("{name} overrides {}", setting.path);

            let segments: Vec<&str> = setting.segments().collect();
            assign(&mut layer, &segments, value);
        }

        Ok(layer)
    }
}
