//! Static asset publishing.
//!
//! Each asset tree (`demos`, `lib`, `src` by default) is copied verbatim into
//! the target directory, replacing whatever was published there before.
//!
//! ## Staged Swap
//!
//! The copy never happens in place. For `www/lib` the sequence is:
//!
//! ```text
//! 1. copy  lib/          → www/.lib.staging/
//! 2. move  www/lib/      → www/.lib.retired/     (only if it exists)
//! 3. move  www/.lib.staging/ → www/lib/
//! 4. remove www/.lib.retired/
//! ```
//!
//! A failure during the copy leaves the published tree untouched. The only
//! window where `www/lib` is absent is between the two renames, and the
//! previous tree is still on disk as `.lib.retired` at that point. Leftover
//! staging or retired directories from an interrupted run are cleared on the
//! next publish.

use crate::error::BuildError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of publishing one asset tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub name: String,
    pub source: PathBuf,
    pub target: PathBuf,
    /// Regular files copied.
    pub files: usize,
    /// Whether a previously published tree was replaced.
    pub replaced: bool,
}

/// Replace `target` with a copy of the `source` tree.
pub fn publish_tree(
    name: &str,
    source: &Path,
    target: &Path,
) -> Result<AssetReport, BuildError> {
    if !source.is_dir() {
        return Err(BuildError::MissingAssetSource(source.to_path_buf()));
    }

    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(BuildError::write(parent))?;

    let staging = sibling(target, "staging");
    let retired = sibling(target, "retired");
    remove_any(&staging)?;
    remove_any(&retired)?;

    let files = match copy_tree(source, &staging) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }
    };

    let replaced = target.symlink_metadata().is_ok();
    if replaced {
        fs::rename(target, &retired).map_err(BuildError::rename(target, &retired))?;
    }
    fs::rename(&staging, target).map_err(BuildError::rename(&staging, target))?;
    remove_any(&retired)?;

    Ok(AssetReport {
        name: name.to_string(),
        source: source.to_path_buf(),
        target: target.to_path_buf(),
        files,
        replaced,
    })
}

/// Copy every file under `source` into `dest`, preserving relative paths.
/// Returns the number of regular files copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize, BuildError> {
    let mut files = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::Walk {
            path: source.to_path_buf(),
            source: e,
        })?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .expect("walkdir yields paths under its root");
        let out = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&out).map_err(BuildError::write(&out))?;
        } else {
            fs::copy(entry.path(), &out).map_err(|e| BuildError::Copy {
                from: entry.path().to_path_buf(),
                to: out.clone(),
                source: e,
            })?;
            files += 1;
        }
    }
    Ok(files)
}

/// `www/lib` → `www/.lib.<suffix>`
fn sibling(target: &Path, suffix: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{suffix}"))
}

/// Remove a file or directory if present.
fn remove_any(path: &Path) -> Result<(), BuildError> {
    match path.symlink_metadata() {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(BuildError::remove(path))
        }
        Ok(_) => fs::remove_file(path).map_err(BuildError::remove(path)),
        Err(_) => Ok(()),
    }
}
