//! Config command operations.
//!
//! A [`ConfigRequest`] describes one invocation of the config command. The
//! [`CommandEngine`] runs it against a [`ConfigContext`], which owns the
//! schema and the four documents, and returns an [`Outcome`] for the caller
//! to print.
//!
//! # Examples
//!
//! ```no_run
//! use pkgcfg::config::{ConfigLoader, SettingSchema};
//! use pkgcfg::operations::{CommandEngine, ConfigContext, ConfigRequest, Scope};
//! use std::path::Path;
//!
//! let paths = ConfigLoader::discover(None, Some(Path::new("."))).unwrap();
//! let schema = SettingSchema::with_cache_dir(&ConfigLoader::default_cache_dir().unwrap());
//! let mut context = ConfigContext::from_sources(schema, &paths).with_environment(true);
//!
//! let request = ConfigRequest::new(Some("virtualenvs.in-project".to_string()))
//!     .with_values(vec!["true".to_string()])
//!     .with_scope(Scope::Local);
//! CommandEngine::execute(&mut context, request).unwrap();
//! ```

pub mod context;
pub mod engine;
pub mod request;

#[cfg(test)]
mod proptests;

pub use context::{ConfigContext, DocumentSet};
pub use engine::CommandEngine;
pub use request::{ConfigRequest, Outcome, Scope};
