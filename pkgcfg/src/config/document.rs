//! In-memory documents over persisted configuration sources.
//!
//! A [`ConfigDocument`] is an ordered nested mapping addressed by path
//! segments. It starts unloaded, reads its backing file on first access and
//! writes it back only when asked to [`save`](ConfigDocument::save).

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// The two document families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRole {
    /// Regular settings and repositories.
    Settings,
    /// Credentials, tokens and certificates.
    Credentials,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings => write!(f, "settings"),
            Self::Credentials => write!(f, "credentials"),
        }
    }
}

/// Where a document is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBacking {
    /// A YAML file; missing files load as empty documents.
    File(PathBuf),
    /// Not persisted at all. Saves are counted but go nowhere.
    Memory,
}

/// A nested mapping bound to one persisted source.
///
/// # Examples
///
/// ```
/// use pkgcfg::config::ConfigDocument;
/// use serde_yaml::Value;
///
/// let mut doc = ConfigDocument::in_memory();
/// doc.set(&["repositories", "foo", "url"], Value::from("https://bar.com"));
/// assert_eq!(
///     doc.get(&["repositories", "foo", "url"]),
///     Some(&Value::from("https://bar.com"))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    backing: DocumentBacking,
    data: Mapping,
    loaded: bool,
    saves: usize,
}

impl ConfigDocument {
    /// A document backed by `path`, loaded on first access.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: DocumentBacking::File(path.into()),
            data: Mapping::new(),
            loaded: false,
            saves: 0,
        }
    }

    /// An empty, already loaded, in-memory document.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_mapping(Mapping::new())
    }

    /// An in-memory document holding `data`.
    #[must_use]
    pub fn from_mapping(data: Mapping) -> Self {
        Self {
            backing: DocumentBacking::Memory,
            data,
            loaded: true,
            saves: 0,
        }
    }

    /// The persistence backing of this document.
    #[must_use]
    pub fn backing(&self) -> &DocumentBacking {
        &self.backing
    }

    /// The backing file, if any.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        match &self.backing {
            DocumentBacking::File(path) => Some(path),
            DocumentBacking::Memory => None,
        }
    }

    /// Whether the load step has run.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of successful saves since creation.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Populate the document from its backing store if not done yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read or
    /// does not contain a mapping.
    pub fn ensure_loaded(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        if let DocumentBacking::File(path) = &self.backing {
            self.data = ConfigLoader::load_file(path)?;
            log::debug!("loaded {}", path.display());
        }
        self.loaded = true;
        Ok(())
    }

    /// Flush the document to its backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save(&mut self) -> Result<()> {
        if let DocumentBacking::File(path) = &self.backing {
            ConfigLoader::save_file(path, &self.data)?;
            log::debug!("wrote {}", path.display());
        }
        self.saves += 1;
        Ok(())
    }

    /// The root mapping.
    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.data
    }

    /// Value stored at `segments`, if any.
    #[must_use]
    pub fn get(&self, segments: &[&str]) -> Option<&Value> {
        lookup(&self.data, segments)
    }

    /// Whether a value is stored at `segments`.
    #[must_use]
    pub fn contains(&self, segments: &[&str]) -> bool {
        self.get(segments).is_some()
    }

    /// Store `value` at `segments`, creating intermediate mappings.
    pub fn set(&mut self, segments: &[&str], value: Value) {
        assign(&mut self.data, segments, value);
    }

    /// Remove the leaf at `segments`, returning it.
    ///
    /// Parent mappings are left in place even when they become empty.
    pub fn remove(&mut self, segments: &[&str]) -> Option<Value> {
        detach(&mut self.data, segments)
    }
}

/// Walk `segments` down from `root`.
pub(crate) fn lookup<'a>(root: &'a Mapping, segments: &[&str]) -> Option<&'a Value> {
    let (last, parents) = segments.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get(*segment)?.as_mapping()?;
    }
    current.get(*last)
}

/// Store `value` at `segments`, replacing non-mapping intermediates.
pub(crate) fn assign(root: &mut Mapping, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            root.insert(Value::from(*last), value);
        }
        [first, rest @ ..] => {
            if !root.get(*first).is_some_and(Value::is_mapping) {
                root.insert(Value::from(*first), Value::Mapping(Mapping::new()));
            }
            if let Some(Value::Mapping(child)) = root.get_mut(*first) {
                assign(child, rest, value);
            }
        }
    }
}

fn detach(root: &mut Mapping, segments: &[&str]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get_mut(*segment)?.as_mapping_mut()?;
    }
    current.shift_remove(*last)
}
