//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including path resolution and construction of the configuration context.

use crate::error::CliError;
use pkgcfg::{ConfigContext, ConfigLoader, Logger, SettingSchema, SourcePaths};
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output, such as completion install hints.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub config_dir: Option<PathBuf>,

    /// Where project-local discovery starts.
    pub project_dir: Option<PathBuf>,

    /// Logger configured from the verbosity flags.
    pub logger: Logger,
}

/// Resolve a path, using CWD if not specified.
///
/// Relative paths are made absolute against the current directory. Paths
/// are not canonicalized, so they need not exist yet.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let cwd = env::current_dir()?;
    Ok(match path {
        Some(p) if p.is_absolute() => p,
        Some(p) => cwd.join(p),
        None => cwd,
    })
}

/// Build the configuration context for a command.
///
/// The context reads the global documents from the configuration directory
/// and the local documents found by walking up from the project directory.
/// `PKGCFG_*` environment overrides are enabled.
pub fn build_context(global: &GlobalOptions) -> Result<ConfigContext, CliError> {
    let project_dir = resolve_path(global.project_dir.clone())?;
    let config_dir = global
        .config_dir
        .clone()
        .map(|dir| resolve_path(Some(dir)))
        .transpose()?;

    let paths = ConfigLoader::discover(config_dir.as_deref(), Some(&project_dir))?;
    global
        .logger
        .debug(&format!("global settings: {}", paths.global_settings.display()));
    if let Some(local) = &paths.local_settings {
        global
            .logger
            .debug(&format!("local settings: {}", local.display()));
    }

    let cache_dir = default_cache_dir(ConfigLoader::default_cache_dir(), &paths, &global.logger);
    let schema = SettingSchema::with_cache_dir(&cache_dir);

    Ok(ConfigContext::from_sources(schema, &paths).with_environment(true))
}

/// Default for the `cache-dir` setting.
///
/// Without a platform cache directory this falls back to `cache` next to the
/// global settings, so a stored or overridden `cache-dir` still works.
fn default_cache_dir(
    platform: pkgcfg::Result<PathBuf>,
    paths: &SourcePaths,
    logger: &Logger,
) -> PathBuf {
    platform.unwrap_or_else(|e| {
        let fallback = paths
            .global_settings
            .parent()
            .map(|dir| dir.join("cache"))
            .unwrap_or_default();
        logger.debug(&format!("{e}; defaulting cache-dir to {}", fallback.display()));
        fallback
    })
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
