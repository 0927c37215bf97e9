//! Layered lookup and precedence handling.
//!
//! A [`ConfigMerger`] reads through an ordered slice of [`Layer`]s, highest
//! precedence first. Nothing is copied: scalar lookups stop at the first layer
//! holding a usable value and fall back to the schema default, while domain
//! entries are taken wholesale from the first layer that defines them.

use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::config::document::lookup;
use crate::config::domain::Domain;
use crate::config::schema::{RecognizedSetting, SettingSchema};
use crate::config::validator::SettingValidator;

/// Placeholder substitution gives up past this nesting depth.
pub const MAX_PLACEHOLDER_DEPTH: usize = 8;

/// Origin of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// `PKGCFG_*` environment overrides.
    Environment,
    /// Project-local documents.
    Local,
    /// User-wide documents.
    Global,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::Local => write!(f, "local"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// One source of values in the precedence chain.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    /// Where the values come from.
    pub kind: LayerKind,
    /// The values themselves.
    pub mapping: &'a Mapping,
}

impl<'a> Layer<'a> {
    /// Creates a layer.
    #[must_use]
    pub const fn new(kind: LayerKind, mapping: &'a Mapping) -> Self {
        Self { kind, mapping }
    }
}

/// Which values a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Merged values across all layers plus defaults.
    Effective,
    /// Values stored in layers of one kind, without defaults.
    Only(LayerKind),
}

/// One leaf of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    /// Path segments of the leaf.
    pub segments: Vec<String>,
    /// Value as stored or defaulted, placeholders kept.
    pub value: Value,
    /// Placeholder-substituted text, present only when it differs.
    pub resolved: Option<String>,
}

impl ListEntry {
    /// The dotted path of the leaf.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

/// Read-only view over a precedence-ordered set of layers.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::{ConfigMerger, Layer, LayerKind, SettingSchema};
/// use serde_yaml::{Mapping, Value};
/// use std::path::Path;
///
/// let schema = SettingSchema::with_cache_dir(Path::new("/cache"));
/// let global: Mapping = serde_yaml::from_str("cache-dir: /data").unwrap();
/// let layers = [Layer::new(LayerKind::Global, &global)];
/// let merger = ConfigMerger::new(&schema, &layers);
///
/// let setting = schema.resolve("virtualenvs.path").unwrap();
/// assert_eq!(merger.effective(setting), Value::from("/data/virtualenvs"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigMerger<'a> {
    schema: &'a SettingSchema,
    layers: &'a [Layer<'a>],
}

impl<'a> ConfigMerger<'a> {
    /// Creates a merger over `layers`, highest precedence first.
    #[must_use]
    pub const fn new(schema: &'a SettingSchema, layers: &'a [Layer<'a>]) -> Self {
        Self { schema, layers }
    }

    /// First usable stored value of `setting` and the layer holding it.
    ///
    /// Nulls fall through to lower layers. Values of the wrong type are
    /// ignored with a warning.
    #[must_use]
    pub fn stored(&self, setting: &RecognizedSetting) -> Option<(LayerKind, &'a Value)> {
        let segments: Vec<&str> = setting.segments().collect();
        self.layers.iter().find_map(|layer| {
            let value = lookup(layer.mapping, &segments)?;
            if value.is_null() {
                return None;
            }
            if !SettingValidator::is_valid_stored(setting, value) {
                log::warn!(
                    "ignoring invalid {} value for {}: {}",
                    layer.kind,
                    setting.path,
                    scalar_text(value)
                );
                return None;
            }
            Some((layer.kind, value))
        })
    }

    /// Stored value or display default, placeholders kept.
    #[must_use]
    pub fn raw(&self, setting: &RecognizedSetting) -> Value {
        self.stored(setting)
            .map_or_else(|| setting.default.display_value(), |(_, v)| v.clone())
    }

    /// Effective value with placeholders substituted.
    #[must_use]
    pub fn effective(&self, setting: &RecognizedSetting) -> Value {
        match self.raw(setting) {
            Value::String(raw) => Value::String(self.resolve_within(setting, &raw)),
            other => other,
        }
    }

    /// Effective value of the setting at `path`, if recognized.
    #[must_use]
    pub fn value(&self, path: &str) -> Option<Value> {
        self.schema.resolve(path).map(|s| self.effective(s))
    }

    /// Substitute `{setting}` placeholders in `template`.
    ///
    /// Unknown names, references back to a setting that is already being
    /// expanded, and placeholders nested deeper than
    /// [`MAX_PLACEHOLDER_DEPTH`] are left untouched.
    #[must_use]
    pub fn resolve_placeholders(&self, template: &str) -> String {
        self.interpolate(template, &mut Vec::new())
    }

    /// Substitute placeholders in `template`, a value of `setting`.
    ///
    /// A reference to `setting` itself stays literal.
    #[must_use]
    pub fn resolve_within(&self, setting: &RecognizedSetting, template: &str) -> String {
        self.interpolate(template, &mut vec![setting.path.as_str()])
    }

    fn interpolate<'s>(&self, template: &str, expanding: &mut Vec<&'s str>) -> String
    where
        'a: 's,
    {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = &after[..close];
            match self.schema.resolve(name) {
                Some(setting)
                    if expanding.len() < MAX_PLACEHOLDER_DEPTH
                        && !expanding.contains(&setting.path.as_str()) =>
                {
                    expanding.push(setting.path.as_str());
                    out.push_str(&self.text(setting, expanding));
                    expanding.pop();
                }
                _ => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }

    fn text<'s>(&self, setting: &RecognizedSetting, expanding: &mut Vec<&'s str>) -> String
    where
        'a: 's,
    {
        match self.raw(setting) {
            Value::String(raw) => self.interpolate(&raw, expanding),
            other => scalar_text(&other),
        }
    }

    /// Entry `name` of `domain` from the first layer that defines it.
    #[must_use]
    pub fn entry(&self, domain: Domain, name: &str) -> Option<&'a Value> {
        self.layers
            .iter()
            .find_map(|layer| lookup(layer.mapping, &[domain.section(), name]))
    }

    /// The merged section of `domain`, higher layers' entries first.
    #[must_use]
    pub fn section(&self, domain: Domain) -> Mapping {
        let mut merged = Mapping::new();
        for layer in self.layers {
            let Some(Value::Mapping(section)) = lookup(layer.mapping, &[domain.section()]) else {
                continue;
            };
            for (name, entry) in section {
                if !merged.contains_key(name) {
                    merged.insert(name.clone(), entry.clone());
                }
            }
        }
        merged
    }

    /// Listing leaves for every scalar setting visible under `visibility`.
    #[must_use]
    pub fn setting_entries(&self, visibility: Visibility) -> Vec<ListEntry> {
        self.schema
            .settings()
            .filter_map(|setting| {
                let value = match visibility {
                    Visibility::Effective => self.raw(setting),
                    Visibility::Only(kind) => self.stored_in(kind, setting)?,
                };
                let resolved = match &value {
                    Value::String(raw) => {
                        Some(self.resolve_within(setting, raw)).filter(|r| r != raw)
                    }
                    _ => None,
                };
                Some(ListEntry {
                    segments: setting.segments().map(str::to_string).collect(),
                    value,
                    resolved,
                })
            })
            .collect()
    }

    /// Value of `setting` held by layers of `kind` even when shadowed.
    fn stored_in(&self, kind: LayerKind, setting: &RecognizedSetting) -> Option<Value> {
        let segments: Vec<&str> = setting.segments().collect();
        self.layers
            .iter()
            .filter(|layer| layer.kind == kind)
            .find_map(|layer| lookup(layer.mapping, &segments))
            .filter(|value| !value.is_null() && SettingValidator::is_valid_stored(setting, value))
            .cloned()
    }

    /// Listing leaves of `domain` visible under `visibility`.
    #[must_use]
    pub fn domain_entries(&self, domain: Domain, visibility: Visibility) -> Vec<ListEntry> {
        let section = match visibility {
            Visibility::Effective => self.section(domain),
            Visibility::Only(kind) => {
                let layers: Vec<Layer<'a>> = self
                    .layers
                    .iter()
                    .filter(|layer| layer.kind == kind)
                    .copied()
                    .collect();
                ConfigMerger::new(self.schema, &layers).section(domain)
            }
        };

        let mut entries = Vec::new();
        flatten(
            &mut vec![domain.section().to_string()],
            &Value::Mapping(section),
            &mut entries,
        );
        entries
    }
}

/// Collect leaves under `value`, visiting mapping keys in sorted order.
fn flatten(prefix: &mut Vec<String>, value: &Value, out: &mut Vec<ListEntry>) {
    let Value::Mapping(mapping) = value else {
        out.push(ListEntry {
            segments: prefix.clone(),
            value: value.clone(),
            resolved: None,
        });
        return;
    };

    let mut children: Vec<(String, &Value)> = mapping
        .iter()
        .map(|(key, child)| (scalar_text(key), child))
        .collect();
    children.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, child) in children {
        prefix.push(key);
        flatten(prefix, child, out);
        prefix.pop();
    }
}

/// Plain text of a scalar value as substituted into templates.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
