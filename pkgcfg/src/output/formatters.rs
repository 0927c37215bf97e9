//! Output formatter implementations.

use serde_yaml::Value;

use crate::config::ListEntry;
use crate::{Error, Result};

use super::OutputFormatter;

/// Serialize `value` as compact JSON, keeping mapping insertion order.
fn to_json(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Validation {
        field: "output".to_string(),
        message: format!("cannot render value as JSON: {e}"),
    })
}

/// Append `  # resolved` when placeholder substitution changed the value.
fn with_resolution(rendered: String, resolved: Option<&str>) -> String {
    match resolved {
        Some(resolved) => format!("{rendered}  # {resolved}"),
        None => rendered,
    }
}

/// Renders a single value for `get`.
///
/// # Examples
///
/// ```
/// use pkgcfg::output::ValueFormatter;
/// use serde_yaml::Value;
///
/// assert_eq!(ValueFormatter::format(&Value::Bool(true), None).unwrap(), "true");
/// assert_eq!(
///     ValueFormatter::format(&Value::from("{cache-dir}/virtualenvs"), Some("/c/virtualenvs")).unwrap(),
///     "{cache-dir}/virtualenvs  # /c/virtualenvs"
/// );
/// ```
pub struct ValueFormatter;

impl ValueFormatter {
    /// Render `value`, appending `resolved` as a comment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a mapping contains keys JSON cannot represent.
    pub fn format(value: &Value, resolved: Option<&str>) -> Result<String> {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Number(n) => n.to_string(),
            Value::Mapping(_) | Value::Sequence(_) => to_json(value)?,
            Value::Tagged(tagged) => return Self::format(&tagged.value, resolved),
        };
        Ok(with_resolution(rendered, resolved))
    }
}

/// Renders listing leaves as `path = <json>` lines.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::ListEntry;
/// use pkgcfg::output::{ListingFormatter, OutputFormatter};
/// use serde_yaml::Value;
///
/// let entries = vec![ListEntry {
///     segments: vec!["installer".into(), "parallel".into()],
///     value: Value::Bool(true),
///     resolved: None,
/// }];
/// let lines = ListingFormatter.format(&entries).unwrap();
/// assert_eq!(lines, vec!["installer.parallel = true"]);
/// ```
pub struct ListingFormatter;

impl OutputFormatter for ListingFormatter {
    fn format(&self, entries: &[ListEntry]) -> Result<Vec<String>> {
        entries
            .iter()
            .map(|entry| {
                let line = format!("{} = {}", entry.path(), to_json(&entry.value)?);
                Ok(with_resolution(line, entry.resolved.as_deref()))
            })
            .collect()
    }
}
