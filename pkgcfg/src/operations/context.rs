//! The documents and schema a command runs against.

use serde_yaml::{Mapping, Value};

use crate::config::{
    ConfigDocument, ConfigMerger, DocumentRole, EnvironmentOverrides, Layer, LayerKind,
    SettingSchema, SourcePaths,
};
use crate::error::{Error, Result};
use crate::operations::request::Scope;

/// The four configuration documents.
///
/// Local documents are optional; without them `--local` writes fail and
/// local listings are empty.
#[derive(Debug, Clone)]
pub struct DocumentSet {
    global_settings: ConfigDocument,
    global_credentials: ConfigDocument,
    local_settings: Option<ConfigDocument>,
    local_credentials: Option<ConfigDocument>,
}

impl DocumentSet {
    /// A set with only global documents.
    #[must_use]
    pub fn new(global_settings: ConfigDocument, global_credentials: ConfigDocument) -> Self {
        Self {
            global_settings,
            global_credentials,
            local_settings: None,
            local_credentials: None,
        }
    }

    /// Attach project-local documents.
    #[must_use]
    pub fn with_local(mut self, settings: ConfigDocument, credentials: ConfigDocument) -> Self {
        self.local_settings = Some(settings);
        self.local_credentials = Some(credentials);
        self
    }

    /// The document of `role` in `scope`, if configured.
    #[must_use]
    pub fn get(&self, role: DocumentRole, scope: Scope) -> Option<&ConfigDocument> {
        match (role, scope) {
            (DocumentRole::Settings, Scope::Global) => Some(&self.global_settings),
            (DocumentRole::Credentials, Scope::Global) => Some(&self.global_credentials),
            (DocumentRole::Settings, Scope::Local) => self.local_settings.as_ref(),
            (DocumentRole::Credentials, Scope::Local) => self.local_credentials.as_ref(),
        }
    }

    /// The loaded document of `role` in `scope`, ready for mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if no local document is configured for a local
    /// scope, or if loading the document fails.
    pub fn get_mut(&mut self, role: DocumentRole, scope: Scope) -> Result<&mut ConfigDocument> {
        let document = match (role, scope) {
            (DocumentRole::Settings, Scope::Global) => Some(&mut self.global_settings),
            (DocumentRole::Credentials, Scope::Global) => Some(&mut self.global_credentials),
            (DocumentRole::Settings, Scope::Local) => self.local_settings.as_mut(),
            (DocumentRole::Credentials, Scope::Local) => self.local_credentials.as_mut(),
        }
        .ok_or_else(|| Error::Validation {
            field: "scope".into(),
            message: "no project-local configuration is available".into(),
        })?;

        document.ensure_loaded()?;
        Ok(document)
    }

    /// Load every configured document.
    ///
    /// # Errors
    ///
    /// Returns the first loading error.
    pub fn load_all(&mut self) -> Result<()> {
        self.global_settings.ensure_loaded()?;
        self.global_credentials.ensure_loaded()?;
        if let Some(document) = &mut self.local_settings {
            document.ensure_loaded()?;
        }
        if let Some(document) = &mut self.local_credentials {
            document.ensure_loaded()?;
        }
        Ok(())
    }

    /// Layers of `role`, highest precedence first.
    ///
    /// `environment` is placed on top when given.
    #[must_use]
    pub fn layers<'a>(
        &'a self,
        role: DocumentRole,
        environment: Option<&'a Mapping>,
    ) -> Vec<Layer<'a>> {
        let mut layers = Vec::with_capacity(3);
        if let Some(mapping) = environment {
            layers.push(Layer::new(LayerKind::Environment, mapping));
        }
        if let Some(document) = self.get(role, Scope::Local) {
            layers.push(Layer::new(LayerKind::Local, document.mapping()));
        }
        if let Some(document) = self.get(role, Scope::Global) {
            layers.push(Layer::new(LayerKind::Global, document.mapping()));
        }
        layers
    }
}

/// Everything a config command needs: the schema, the documents and whether
/// environment overrides apply.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::SettingSchema;
/// use pkgcfg::operations::ConfigContext;
/// use serde_yaml::Value;
/// use std::path::Path;
///
/// let schema = SettingSchema::with_cache_dir(Path::new("/cache"));
/// let mut context = ConfigContext::in_memory(schema);
///
/// assert_eq!(
///     context.setting_value("installer.parallel").unwrap(),
///     Some(Value::Bool(true))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConfigContext {
    schema: SettingSchema,
    documents: DocumentSet,
    environment: bool,
}

impl ConfigContext {
    /// Creates a context over `documents`, environment overrides disabled.
    #[must_use]
    pub fn new(schema: SettingSchema, documents: DocumentSet) -> Self {
        Self {
            schema,
            documents,
            environment: false,
        }
    }

    /// A context whose four documents live in memory.
    #[must_use]
    pub fn in_memory(schema: SettingSchema) -> Self {
        let documents = DocumentSet::new(ConfigDocument::in_memory(), ConfigDocument::in_memory())
            .with_local(ConfigDocument::in_memory(), ConfigDocument::in_memory());
        Self::new(schema, documents)
    }

    /// A context over the files named by `paths`.
    #[must_use]
    pub fn from_sources(schema: SettingSchema, paths: &SourcePaths) -> Self {
        let mut documents = DocumentSet::new(
            ConfigDocument::file(&paths.global_settings),
            ConfigDocument::file(&paths.global_credentials),
        );
        if let (Some(settings), Some(credentials)) =
            (&paths.local_settings, &paths.local_credentials)
        {
            documents = documents.with_local(
                ConfigDocument::file(settings),
                ConfigDocument::file(credentials),
            );
        }
        Self::new(schema, documents)
    }

    /// Enable or disable the `PKGCFG_*` environment layer.
    #[must_use]
    pub const fn with_environment(mut self, enabled: bool) -> Self {
        self.environment = enabled;
        self
    }

    /// The schema of recognized settings.
    #[must_use]
    pub fn schema(&self) -> &SettingSchema {
        &self.schema
    }

    /// The documents.
    #[must_use]
    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    /// Collect the environment layer, if enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if an override variable holds an invalid value.
    pub fn environment_layer(&self) -> Result<Option<Mapping>> {
        if !self.environment {
            return Ok(None);
        }
        EnvironmentOverrides::collect(&self.schema).map(Some)
    }

    /// Split into the schema and the mutable documents.
    pub(crate) fn parts_mut(&mut self) -> (&SettingSchema, &mut DocumentSet) {
        (&self.schema, &mut self.documents)
    }

    /// Effective value of the scalar setting at `path`.
    ///
    /// Returns `None` for paths the schema does not recognize.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be loaded or an environment
    /// override is invalid.
    pub fn setting_value(&mut self, path: &str) -> Result<Option<Value>> {
        let environment = self.environment_layer()?;
        self.documents.load_all()?;

        let layers = self
            .documents
            .layers(DocumentRole::Settings, environment.as_ref());
        Ok(ConfigMerger::new(&self.schema, &layers).value(path))
    }
}
