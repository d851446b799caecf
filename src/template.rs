//! Master template loading and placeholder substitution.
//!
//! The whole templating "language" is two literal markers:
//!
//! | Marker | Replaced by |
//! |--------|-------------|
//! | `{CONTENT}` | the page fragment (first occurrence only) |
//! | `{VERSION}` | the raw version string (every occurrence) |
//!
//! Substitution is plain substring replacement. Nothing is escaped, and text
//! inserted for one marker is never rescanned for another, so a fragment that
//! happens to contain `{CONTENT}` is written out as-is.

use crate::error::BuildError;
use std::fs;
use std::path::Path;

pub const CONTENT_PLACEHOLDER: &str = "{CONTENT}";
pub const VERSION_PLACEHOLDER: &str = "{VERSION}";

/// Replace every `{VERSION}` in `text`. With no version, `text` is returned
/// unchanged.
pub fn substitute_version(text: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => text.replace(VERSION_PLACEHOLDER, v),
        None => text.to_string(),
    }
}

/// Number of `{CONTENT}` slots in `text`. A well-formed master template has
/// exactly one.
pub fn content_slots(text: &str) -> usize {
    text.matches(CONTENT_PLACEHOLDER).count()
}

/// The master template, with `{VERSION}` already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    body: String,
}

impl Template {
    pub fn new(raw: &str, version: Option<&str>) -> Self {
        Self {
            body: substitute_version(raw, version),
        }
    }

    /// Read the master template from disk and apply the version.
    pub fn load(path: &Path, version: Option<&str>) -> Result<Self, BuildError> {
        let raw = fs::read_to_string(path).map_err(BuildError::read(path))?;
        Ok(Self::new(&raw, version))
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Insert a fragment into the first `{CONTENT}` slot.
    ///
    /// The fragment must already have had its own `{VERSION}` markers
    /// substituted.
    pub fn render(&self, fragment: &str) -> String {
        self.body.replacen(CONTENT_PLACEHOLDER, fragment, 1)
    }
}
