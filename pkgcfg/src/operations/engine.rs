//! Dispatch and semantics of the config command.
//!
//! Every command validates its request completely before it touches a
//! document, so a failed command never leaves a partial write behind. Only
//! the single document a mutation targets is saved.

use std::path::Path;

use serde_yaml::Value;

use crate::config::{
    Assignment, ConfigMerger, DocumentRole, Domain, LayerKind, PathResolver, SettingValidator,
    Target, Visibility,
};
use crate::error::{Error, Result};
use crate::operations::context::ConfigContext;
use crate::operations::request::{ConfigRequest, Outcome, Scope};
use crate::output::{ListingFormatter, OutputFormatter, ValueFormatter};

/// Executes config requests against a [`ConfigContext`].
///
/// # Examples
///
/// ```
/// use pkgcfg::config::SettingSchema;
/// use pkgcfg::operations::{CommandEngine, ConfigContext, ConfigRequest, Outcome};
/// use std::path::Path;
///
/// let mut context = ConfigContext::in_memory(SettingSchema::with_cache_dir(Path::new("/c")));
///
/// let set = ConfigRequest::new(Some("repositories.foo".into()))
///     .with_values(vec!["https://bar.com".into()]);
/// CommandEngine::execute(&mut context, set).unwrap();
///
/// let get = ConfigRequest::new(Some("repositories.foo.url".into()));
/// assert_eq!(
///     CommandEngine::execute(&mut context, get).unwrap(),
///     Outcome::Value("https://bar.com".into())
/// );
/// ```
pub struct CommandEngine;

impl CommandEngine {
    /// Run `request`.
    ///
    /// `--list` takes priority over a path. A request with neither does
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingFlags`] for values combined with unset,
    /// and any error of the operation the request dispatches to.
    pub fn execute(context: &mut ConfigContext, request: ConfigRequest) -> Result<Outcome> {
        if request.unset && !request.values.is_empty() {
            return Err(Error::ConflictingFlags);
        }

        if request.list {
            return Self::list(context, request.scope);
        }

        let Some(path) = request.path else {
            if request.unset {
                return Err(Error::Validation {
                    field: "path".into(),
                    message: "--unset needs a setting name".into(),
                });
            }
            return Ok(Outcome::Nothing);
        };

        if request.unset {
            Self::unset(context, &path, request.scope)
        } else if request.values.is_empty() {
            Self::get(context, &path)
        } else {
            Self::set(context, &path, &request.values, request.scope)
        }
    }

    /// Render the effective value at `path`.
    ///
    /// Reads always see the merged view, whatever the scope of the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSetting`] for unrecognized paths and
    /// [`Error::MissingEntry`] for named entries no source defines.
    pub fn get(context: &mut ConfigContext, path: &str) -> Result<Outcome> {
        let environment = context.environment_layer()?;
        let (schema, documents) = context.parts_mut();
        documents.load_all()?;
        let documents = &*documents;

        let rendered = match PathResolver::new(schema).classify(path)? {
            Target::Setting(setting) => {
                let layers = documents.layers(DocumentRole::Settings, environment.as_ref());
                let merger = ConfigMerger::new(schema, &layers);
                let raw = merger.raw(setting);
                let resolved = match &raw {
                    Value::String(text) => {
                        Some(merger.resolve_within(setting, text)).filter(|r| r != text)
                    }
                    _ => None,
                };
                ValueFormatter::format(&raw, resolved.as_deref())?
            }
            Target::Domain(target) => {
                let layers = documents.layers(target.domain.role(), None);
                let merger = ConfigMerger::new(schema, &layers);
                let value = match &target.name {
                    None => Value::Mapping(merger.section(target.domain)),
                    Some(name) => {
                        let entry = merger
                            .entry(target.domain, name)
                            .ok_or_else(|| target.missing())?;
                        match target.field {
                            None => entry.clone(),
                            Some(field) => entry
                                .as_mapping()
                                .and_then(|fields| fields.get(field.key()))
                                .cloned()
                                .ok_or_else(|| target.missing())?,
                        }
                    }
                };
                ValueFormatter::format(&value, None)?
            }
        };

        Ok(Outcome::Value(rendered))
    }

    /// Store `values` at `path` in the document of `scope`.
    ///
    /// # Errors
    ///
    /// Returns an arity, validation, or integrity error before anything is
    /// written, or an I/O error if saving fails.
    pub fn set(
        context: &mut ConfigContext,
        path: &str,
        values: &[String],
        scope: Scope,
    ) -> Result<Outcome> {
        let (schema, documents) = context.parts_mut();

        let (role, assignment) = match PathResolver::new(schema).classify(path)? {
            Target::Setting(setting) => {
                let value = match values {
                    [raw] => SettingValidator::parse(setting, raw)?,
                    [] => return Err(Error::arity("You must pass exactly 1 value")),
                    _ => return Err(Error::arity("You can only pass one value.")),
                };
                let assignment = Assignment {
                    segments: setting.segments().map(str::to_string).collect(),
                    value,
                };
                (DocumentRole::Settings, assignment)
            }
            Target::Domain(target) => {
                let Some(name) = &target.name else {
                    return Err(target.integrity_violation());
                };
                let assignment = target
                    .domain
                    .assignment(path, name, target.field, values)?;
                (target.domain.role(), assignment)
            }
        };

        let Assignment { segments, value } = assignment;
        let path: Vec<&str> = segments.iter().map(String::as_str).collect();
        let document = documents.get_mut(role, scope)?;
        document.set(&path, value);
        document.save()?;
        log::debug!("set {} in {scope} {role}", segments.join("."));

        Ok(Outcome::Updated {
            role,
            scope,
            location: document.location().map(Path::to_path_buf),
        })
    }

    /// Remove `path` from the document of `scope`.
    ///
    /// Removing a value the targeted document does not hold is a no-op.
    /// Parent sections stay in place even when they become empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainIntegrity`] for a whole section,
    /// [`Error::MissingEntry`] for an entry no source defines, or an I/O
    /// error if saving fails. An entry that only other scopes define is left
    /// alone.
    pub fn unset(context: &mut ConfigContext, path: &str, scope: Scope) -> Result<Outcome> {
        let (schema, documents) = context.parts_mut();

        let (role, segments) = match PathResolver::new(schema).classify(path)? {
            Target::Setting(setting) => {
                let segments: Vec<&str> = setting.segments().collect();
                let document = documents.get_mut(DocumentRole::Settings, scope)?;
                if document.remove(&segments).is_none() {
                    log::debug!("{path} is not set in {scope} settings");
                    return Ok(Outcome::Nothing);
                }
                (DocumentRole::Settings, setting.path.clone())
            }
            Target::Domain(target) => {
                let Some(name) = &target.name else {
                    return Err(target.integrity_violation());
                };
                let role = target.domain.role();
                documents.load_all()?;
                let visible = {
                    let layers = documents.layers(role, None);
                    ConfigMerger::new(schema, &layers)
                        .entry(target.domain, name)
                        .is_some_and(|entry| match target.field {
                            None => true,
                            Some(field) => entry
                                .as_mapping()
                                .is_some_and(|fields| fields.contains_key(field.key())),
                        })
                };
                if !visible {
                    return Err(target.missing());
                }

                let document = documents.get_mut(role, scope)?;
                if document.remove(&target.segments()).is_none() {
                    log::debug!("{path} is not set in {scope} {role}");
                    return Ok(Outcome::Nothing);
                }
                (role, target.segments().join("."))
            }
        };

        let document = documents.get_mut(role, scope)?;
        document.save()?;
        log::debug!("unset {segments} in {scope} {role}");

        Ok(Outcome::Updated {
            role,
            scope,
            location: document.location().map(Path::to_path_buf),
        })
    }

    /// Render every visible leaf as a `path = <json>` line.
    ///
    /// The global scope shows the merged view with defaults. The local scope
    /// shows only what the project-local documents store.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be loaded.
    pub fn list(context: &mut ConfigContext, scope: Scope) -> Result<Outcome> {
        let environment = match scope {
            Scope::Global => context.environment_layer()?,
            Scope::Local => None,
        };
        let (schema, documents) = context.parts_mut();
        documents.load_all()?;
        let documents = &*documents;

        let visibility = match scope {
            Scope::Global => Visibility::Effective,
            Scope::Local => Visibility::Only(LayerKind::Local),
        };

        let settings_layers = documents.layers(DocumentRole::Settings, environment.as_ref());
        let credentials_layers = documents.layers(DocumentRole::Credentials, None);
        let settings = ConfigMerger::new(schema, &settings_layers);
        let credentials = ConfigMerger::new(schema, &credentials_layers);

        let mut entries = settings.setting_entries(visibility);
        for domain in Domain::ALL {
            let merger = match domain.role() {
                DocumentRole::Settings => &settings,
                DocumentRole::Credentials => &credentials,
            };
            entries.extend(merger.domain_entries(domain, visibility));
        }
        entries.sort_by(|a, b| a.segments.cmp(&b.segments));

        Ok(Outcome::Listing(ListingFormatter.format(&entries)?))
    }
}
