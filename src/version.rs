//! Version token loading.

use crate::error::BuildError;
use std::fs;
use std::path::Path;

/// Read the version file verbatim.
///
/// The contents are not trimmed: a trailing newline in the file ends up in
/// every page that uses `{VERSION}`.
pub fn load_version(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(BuildError::read(path))
}
