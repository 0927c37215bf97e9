//! Configuration file discovery and loading.
//!
//! Global documents live in the user's configuration directory. Local
//! documents are discovered by walking up from the project directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Global settings file name.
pub const SETTINGS_FILE: &str = "config.yaml";
/// Global credentials file name.
pub const CREDENTIALS_FILE: &str = "auth.yaml";
/// Project-local settings file name.
pub const LOCAL_SETTINGS_FILE: &str = "pkgcfg.local.yaml";
/// Project-local credentials file name.
pub const LOCAL_CREDENTIALS_FILE: &str = "pkgcfg.auth.local.yaml";

/// Locations of the four configuration documents.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::SourcePaths;
/// use std::path::Path;
///
/// let paths = SourcePaths::in_dirs(Path::new("/home/me/.config/pkgcfg"), None);
/// assert!(paths.global_settings.ends_with("config.yaml"));
/// assert!(paths.local_settings.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    /// Global settings document.
    pub global_settings: PathBuf,
    /// Global credentials document.
    pub global_credentials: PathBuf,
    /// Project-local settings document.
    pub local_settings: Option<PathBuf>,
    /// Project-local credentials document.
    pub local_credentials: Option<PathBuf>,
}

impl SourcePaths {
    /// Standard file names under `config_dir` and, optionally, `project_dir`.
    #[must_use]
    pub fn in_dirs(config_dir: &Path, project_dir: Option<&Path>) -> Self {
        Self {
            global_settings: config_dir.join(SETTINGS_FILE),
            global_credentials: config_dir.join(CREDENTIALS_FILE),
            local_settings: project_dir.map(|dir| dir.join(LOCAL_SETTINGS_FILE)),
            local_credentials: project_dir.map(|dir| dir.join(LOCAL_CREDENTIALS_FILE)),
        }
    }
}

/// Discovers, reads and writes configuration files.
///
/// # Examples
///
/// ```no_run
/// use pkgcfg::config::ConfigLoader;
/// use std::path::Path;
///
/// let paths = ConfigLoader::discover(None, Some(Path::new("."))).unwrap();
/// println!("global settings at {}", paths.global_settings.display());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the locations of all documents.
    ///
    /// `config_dir` overrides the user configuration directory. When
    /// `project_dir` is given, local documents are looked up starting there.
    ///
    /// # Errors
    ///
    /// Returns an error if no `config_dir` is given and the platform
    /// configuration directory cannot be determined.
    pub fn discover(config_dir: Option<&Path>, project_dir: Option<&Path>) -> Result<SourcePaths> {
        let config_dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_config_dir()?,
        };
        let project_root = project_dir.map(Self::discover_project_root);
        Ok(SourcePaths::in_dirs(&config_dir, project_root.as_deref()))
    }

    /// Find the directory holding the local documents.
    ///
    /// Walks up from `start_dir` and stops at the first directory containing
    /// either local file. Falls back to `start_dir` itself, where the files
    /// are created on the first local write.
    #[must_use]
    pub fn discover_project_root(start_dir: &Path) -> PathBuf {
        let mut current = start_dir.to_path_buf();
        loop {
            if current.join(LOCAL_SETTINGS_FILE).exists()
                || current.join(LOCAL_CREDENTIALS_FILE).exists()
            {
                return current;
            }
            if !current.pop() {
                return start_dir.to_path_buf();
            }
        }
    }

    /// Load and parse a YAML document.
    ///
    /// A missing or empty file yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// its root is not a mapping.
    pub fn load_file(path: &Path) -> Result<Mapping> {
        if !path.exists() {
            return Ok(Mapping::new());
        }

        let contents = fs::read_to_string(path)?;
        let value: Value =
            serde_yaml::from_str(&contents).map_err(|e| Error::MalformedDocument {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        match value {
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(Error::MalformedDocument {
                path: path.to_path_buf(),
                message: "top level must be a mapping".to_string(),
            }),
        }
    }

    /// Serialize `data` to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save_file(path: &Path, data: &Mapping) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_yaml::to_string(data)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The user configuration directory (`<platform config dir>/pkgcfg`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform directory cannot be determined.
    pub fn default_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("pkgcfg"))
            .ok_or_else(|| Error::Validation {
                field: "config_dir".into(),
                message: "Cannot determine configuration directory".into(),
            })
    }

    /// The default `cache-dir` (`<platform cache dir>/pkgcfg`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform directory cannot be determined.
    pub fn default_cache_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|dir| dir.join("pkgcfg"))
            .ok_or_else(|| Error::Validation {
                field: "cache_dir".into(),
                message: "Cannot determine cache directory".into(),
            })
    }
}
