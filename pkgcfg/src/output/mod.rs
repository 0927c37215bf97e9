//! Output formatting for config command results.
//!
//! Values printed by `get` and lines printed by `list` follow a fixed textual
//! contract: scalars print bare, mappings print as inline JSON, and listing
//! leaves print as `path = <json>`, with the substituted value appended as a
//! `# comment` whenever placeholders changed it.

mod formatters;

use crate::config::ListEntry;
use crate::Result;

pub use formatters::{ListingFormatter, ValueFormatter};

/// Trait for rendering listing leaves into output lines.
pub trait OutputFormatter {
    /// Format `entries` into one line each.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be rendered.
    fn format(&self, entries: &[ListEntry]) -> Result<Vec<String>>;
}
