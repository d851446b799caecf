//! Errors raised while building a site.
//!
//! Every filesystem failure carries the path it happened on, so the message
//! printed at the process boundary tells the user exactly which input or
//! output was missing.

use crate::config::ConfigError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Asset source directory not found: {0}")]
    MissingAssetSource(PathBuf),
    #[error("Two fragments map to the same page '{0}' in {1}")]
    DuplicatePage(String, PathBuf),
    #[error("{0} required input(s) missing")]
    MissingInputs(usize),
}

// Closures for `map_err`, so call sites read as
// `fs::read_to_string(path).map_err(BuildError::read(path))?`.
impl BuildError {
    pub(crate) fn read(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read_dir(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::ReadDir {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn remove(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Remove {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn rename<'a>(
        from: &'a Path,
        to: &'a Path,
    ) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| Self::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    }

    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Read { source, .. }
            | Self::Write { source, .. }
            | Self::ReadDir { source, .. }
            | Self::Remove { source, .. }
            | Self::Copy { source, .. }
            | Self::Rename { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::MissingAssetSource(_) => true,
            _ => false,
        }
    }
}
