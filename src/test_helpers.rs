//! Shared test utilities.
//!
//! Provides an isolated copy of `fixtures/site/` plus small shortcuts for
//! resolving layouts and reading generated files.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let layout = site_layout(tmp.path());
//! site::build(&layout, |_| {}).unwrap();
//! assert!(read(tmp.path(), "www/index.html").contains("<h1>"));
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::layout::SiteLayout;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// The fixture has the default layout: `templates/` with a master template
/// and all six listed fragments, a `VERSION` file, and the `demos`, `lib`,
/// and `src` asset trees.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Layout shortcuts
// =========================================================================

/// Layout for `root` with the stock config.
pub fn site_layout(root: &Path) -> SiteLayout {
    SiteLayout::resolve(root, &SiteConfig::default())
}

/// Layout for `root` with a custom config. Panics if the config is invalid.
pub fn layout_with(root: &Path, config: &SiteConfig) -> SiteLayout {
    config
        .validate()
        .unwrap_or_else(|e| panic!("invalid test config: {e}"));
    SiteLayout::resolve(root, config)
}

// =========================================================================
// File access
// =========================================================================

/// Read a file relative to `root`. Panics with the path on failure.
pub fn read(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

/// Relative paths of all files under `dir`, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
