//! Validation and normalization of scalar setting values.
//!
//! Raw values arrive as strings (command arguments or environment variables)
//! and are turned into typed document values here.

use serde_yaml::Value;

use crate::config::schema::{RecognizedSetting, SettingType};
use crate::error::{Error, Result};

/// Validates raw values against the type of a [`RecognizedSetting`].
///
/// # Examples
///
/// ```
/// use pkgcfg::config::{SettingSchema, SettingValidator};
/// use serde_yaml::Value;
/// use std::path::Path;
///
/// let schema = SettingSchema::with_cache_dir(Path::new("/cache"));
/// let setting = schema.resolve("virtualenvs.create").unwrap();
///
/// assert_eq!(SettingValidator::parse(setting, "false").unwrap(), Value::Bool(false));
/// assert!(SettingValidator::parse(setting, "1").is_err());
/// ```
pub struct SettingValidator;

impl SettingValidator {
    /// Parse and normalize a raw value for `setting`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] when the value does not fit the type.
    pub fn parse(setting: &RecognizedSetting, raw: &str) -> Result<Value> {
        let invalid = || Error::InvalidValue {
            value: raw.to_string(),
            path: setting.path.clone(),
        };

        match setting.kind {
            SettingType::Bool => match raw {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
            SettingType::String => Ok(Value::String(raw.to_string())),
            SettingType::Path => {
                let normalized = Self::normalize_path(raw);
                if normalized.is_empty() {
                    return Err(invalid());
                }
                Ok(Value::String(normalized))
            }
            SettingType::Choice(options) => {
                if options.contains(&raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(invalid())
                }
            }
        }
    }

    /// Check that a value loaded from a document fits the setting's type.
    ///
    /// `null` is accepted for every type; it means "no opinion".
    #[must_use]
    pub fn is_valid_stored(setting: &RecognizedSetting, value: &Value) -> bool {
        match (setting.kind, value) {
            (_, Value::Null) | (SettingType::Bool, Value::Bool(_)) => true,
            (SettingType::String | SettingType::Path, Value::String(_)) => true,
            (SettingType::Choice(options), Value::String(s)) => options.contains(&s.as_str()),
            _ => false,
        }
    }

    /// Strip surrounding whitespace and trailing separators from a path.
    ///
    /// A lone root separator is kept.
    fn normalize_path(raw: &str) -> String {
        let trimmed = raw.trim();
        let stripped = trimmed.trim_end_matches(['/', '\\']);
        if stripped.is_empty() && !trimmed.is_empty() {
            return trimmed[..1].to_string();
        }
        stripped.to_string()
    }
}
