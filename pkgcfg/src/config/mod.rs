//! Configuration model for pkgcfg.
//!
//! This module provides the pieces the command engine is assembled from:
//! - A registry of recognized scalar settings with typed defaults
//! - Structured domains (repositories, credentials, certificates)
//! - YAML documents loaded lazily from disk
//! - Environment variable overrides
//! - A layered merger with read-time placeholder substitution
//!
//! # Precedence
//!
//! Values are looked up in the following order (highest to lowest):
//!
//! 1. Environment variables (`PKGCFG_*`), when enabled
//! 2. Project-local documents (`pkgcfg.local.yaml`, `pkgcfg.auth.local.yaml`)
//! 3. Global documents (`config.yaml`, `auth.yaml` in the config directory)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use pkgcfg::config::{ConfigMerger, Layer, LayerKind, SettingSchema};
//! use serde_yaml::{Mapping, Value};
//! use std::path::Path;
//!
//! let schema = SettingSchema::with_cache_dir(Path::new("/cache"));
//! let local: Mapping = serde_yaml::from_str("installer:\n  parallel: false").unwrap();
//! let global = Mapping::new();
//! let layers = [
//!     Layer::new(LayerKind::Local, &local),
//!     Layer::new(LayerKind::Global, &global),
//! ];
//!
//! let merger = ConfigMerger::new(&schema, &layers);
//! assert_eq!(merger.value("installer.parallel"), Some(Value::Bool(false)));
//! assert_eq!(merger.value("virtualenvs.create"), Some(Value::Bool(true)));
//! ```

pub mod document;
pub mod domain;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod path;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use document::{ConfigDocument, DocumentBacking, DocumentRole};
pub use domain::{Assignment, Domain, EntryField};
pub use environment::{EnvironmentOverrides, ENV_PREFIX};
pub use loader::{
    ConfigLoader, SourcePaths, CREDENTIALS_FILE, LOCAL_CREDENTIALS_FILE, LOCAL_SETTINGS_FILE,
    SETTINGS_FILE,
};
pub use merger::{ConfigMerger, Layer, LayerKind, ListEntry, Visibility, MAX_PLACEHOLDER_DEPTH};
pub use path::{DomainTarget, PathResolver, Target};
pub use schema::{RecognizedSetting, SettingDefault, SettingSchema, SettingType};
pub use validator::SettingValidator;
