//! Registry of recognized scalar settings.
//!
//! Every scalar path the engine accepts is declared here with its type and
//! default. Structured domains (repositories, credentials, certificates) are
//! not part of the schema; see [`crate::config::domain`].

use std::fmt;
use std::path::Path;

use serde_yaml::Value;

/// Value type of a recognized setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    /// Accepts only the literal tokens `true` and `false`.
    Bool,
    /// Any string.
    String,
    /// A filesystem path, stored without trailing separators.
    Path,
    /// One of a fixed set of tokens.
    Choice(&'static [&'static str]),
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Path => write!(f, "path"),
            Self::Choice(options) => write!(f, "one of {}", options.join(", ")),
        }
    }
}

/// Default value of a recognized setting.
///
/// A `Derived` default is a template whose `{setting}` placeholders are
/// substituted with the effective value of the named setting at read time.
/// The template itself is what listings display.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingDefault {
    /// A fixed value (`Value::Null` for tri-state settings).
    Fixed(Value),
    /// A template referring to other settings.
    Derived(String),
}

impl SettingDefault {
    /// The default as it is displayed, placeholders kept literally.
    #[must_use]
    pub fn display_value(&self) -> Value {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Derived(template) => Value::String(template.clone()),
        }
    }
}

/// A scalar setting known to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedSetting {
    /// Dotted path, e.g. `virtualenvs.options.always-copy`.
    pub path: String,
    /// Value type.
    pub kind: SettingType,
    /// Default value.
    pub default: SettingDefault,
}

impl RecognizedSetting {
    /// Creates a setting with a fixed default.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: SettingType, default: Value) -> Self {
        Self {
            path: path.into(),
            kind,
            default: SettingDefault::Fixed(default),
        }
    }

    /// Creates a setting whose default is derived from other settings.
    #[must_use]
    pub fn derived(path: impl Into<String>, kind: SettingType, template: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            default: SettingDefault::Derived(template.into()),
        }
    }

    /// The path split into its segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }
}

/// The set of recognized settings, kept in alphabetical order.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::{SettingSchema, SettingType};
/// use std::path::Path;
///
/// let schema = SettingSchema::with_cache_dir(Path::new("/cache"));
/// let setting = schema.resolve("virtualenvs.create").unwrap();
/// assert_eq!(setting.kind, SettingType::Bool);
/// assert!(schema.resolve("virtualenvs").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SettingSchema {
    settings: Vec<RecognizedSetting>,
}

impl SettingSchema {
    /// Builds a schema from arbitrary settings.
    #[must_use]
    pub fn new(mut settings: Vec<RecognizedSetting>) -> Self {
        settings.sort_by(|a, b| a.path.cmp(&b.path));
        settings.dedup_by(|a, b| a.path == b.path);
        Self { settings }
    }

    /// The standard settings, with `cache-dir` defaulting to `cache_dir`.
    #[must_use]
    pub fn with_cache_dir(cache_dir: &Path) -> Self {
        let cache = Value::String(cache_dir.display().to_string());
        let virtualenvs = Path::new("{cache-dir}").join("virtualenvs");

        Self::new(vec![
            RecognizedSetting::new("cache-dir", SettingType::Path, cache),
            RecognizedSetting::new(
                "experimental.new-installer",
                SettingType::Bool,
                Value::Bool(true),
            ),
            RecognizedSetting::new("installer.parallel", SettingType::Bool, Value::Bool(true)),
            RecognizedSetting::new("virtualenvs.create", SettingType::Bool, Value::Bool(true)),
            RecognizedSetting::new("virtualenvs.in-project", SettingType::Bool, Value::Null),
            RecognizedSetting::new(
                "virtualenvs.options.always-copy",
                SettingType::Bool,
                Value::Bool(false),
            ),
            RecognizedSetting::new(
                "virtualenvs.options.system-site-packages",
                SettingType::Bool,
                Value::Bool(false),
            ),
            RecognizedSetting::derived(
                "virtualenvs.path",
                SettingType::Path,
                virtualenvs.display().to_string(),
            ),
        ])
    }

    /// Looks up a setting by its exact dotted path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RecognizedSetting> {
        self.settings
            .binary_search_by(|s| s.path.as_str().cmp(path))
            .ok()
            .map(|idx| &self.settings[idx])
    }

    /// All settings in alphabetical order of their paths.
    pub fn settings(&self) -> impl Iterator<Item = &RecognizedSetting> {
        self.settings.iter()
    }

    /// Display default of a setting, if the path is recognized.
    #[must_use]
    pub fn default(&self, path: &str) -> Option<Value> {
        self.resolve(path).map(|s| s.default.display_value())
    }

    /// Number of recognized settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Whether the schema declares no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SettingSchema {
        SettingSchema::with_cache_dir(Path::new("/tmp/cache"))
    }

    #[test]
    fn test_standard_paths_are_sorted() {
        let paths: Vec<_> = schema().settings().map(|s| s.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                "cache-dir",
                "experimental.new-installer",
                "installer.parallel",
                "virtualenvs.create",
                "virtualenvs.in-project",
                "virtualenvs.options.always-copy",
                "virtualenvs.options.system-site-packages",
                "virtualenvs.path",
            ]
        );
    }

    #[test]
    fn test_resolve_requires_exact_path() {
        let schema = schema();
        assert!(schema.resolve("virtualenvs.options.always-copy").is_some());
        assert!(schema.resolve("virtualenvs.options").is_none());
        assert!(schema.resolve("virtualenvs.create.extra").is_none());
    }

    #[test]
    fn test_defaults() {
        let schema = schema();
        assert_eq!(schema.default("virtualenvs.create"), Some(Value::Bool(true)));
        assert_eq!(schema.default("virtualenvs.in-project"), Some(Value::Null));
        assert_eq!(
            schema.default("cache-dir"),
            Some(Value::String("/tmp/cache".to_string()))
        );
        assert_eq!(schema.default("missing"), None);
    }

    #[test]
    fn test_virtualenvs_path_is_derived() {
        let schema = schema();
        let setting = schema.resolve("virtualenvs.path").unwrap();
        let expected = Path::new("{cache-dir}").join("virtualenvs");
        assert_eq!(
            setting.default,
            SettingDefault::Derived(expected.display().to_string())
        );
    }

    #[test]
    fn test_custom_schema_deduplicates() {
        let schema = SettingSchema::new(vec![
            RecognizedSetting::new("b", SettingType::String, Value::Null),
            RecognizedSetting::new("a", SettingType::Choice(&["x", "y"]), Value::Null),
            RecognizedSetting::new("b", SettingType::Bool, Value::Null),
        ]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.settings().next().unwrap().path, "a");
    }

    #[test]
    fn test_setting_type_display() {
        assert_eq!(SettingType::Bool.to_string(), "bool");
        assert_eq!(SettingType::Choice(&["a", "b"]).to_string(), "one of a, b");
    }
}
