#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pkgcfg
//!
//! A layered configuration engine for a package-management CLI.
//!
//! Settings are read from project-local and user-wide YAML documents, with
//! optional environment overrides on top and typed defaults underneath.
//! Alongside the scalar settings live structured domains: named package
//! repositories, HTTP basic credentials, API tokens and TLS certificates.
//!
//! ## Core Types
//!
//! - [`CommandEngine`], [`ConfigRequest`] and [`Outcome`]: the config command
//! - [`ConfigContext`]: the schema and documents a command runs against
//! - [`SettingSchema`]: recognized settings with their types and defaults
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pkgcfg::{CommandEngine, ConfigContext, ConfigRequest, Outcome, Scope, SettingSchema};
//! use std::path::Path;
//!
//! let schema = SettingSchema::with_cache_dir(Path::new("/var/cache/pkgcfg"));
//! let mut context = ConfigContext::in_memory(schema);
//!
//! let set = ConfigRequest::new(Some("installer.parallel".to_string()))
//!     .with_values(vec!["false".to_string()])
//!     .with_scope(Scope::Local);
//! CommandEngine::execute(&mut context, set).unwrap();
//!
//! let get = ConfigRequest::new(Some("installer.parallel".to_string()));
//! assert_eq!(
//!     CommandEngine::execute(&mut context, get).unwrap(),
//!     Outcome::Value("false".to_string())
//! );
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod operations;
pub mod output;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, Domain, SettingSchema, SourcePaths};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{CommandEngine, ConfigContext, ConfigRequest, Outcome, Scope};
