//! Page enumeration.
//!
//! Decides which fragments get rendered and where each one lands. Two
//! strategies, picked by `pages.mode`:
//!
//! - **list**: the configured names, in order. `about` reads
//!   `templates/about.tpl` and writes `www/about.html`.
//! - **directory**: every regular file in the templates directory except the
//!   master template, sorted by file name. `templates/about.tpl` writes
//!   `www/about.html`.
//!
//! ```text
//! templates/
//! ├── template.tpl    # master, never a page
//! ├── about.tpl       # → about.html
//! ├── index.tpl       # → index.html
//! └── .draft.tpl      # hidden, skipped
//! ```

use crate::config::PageMode;
use crate::error::BuildError;
use crate::layout::SiteLayout;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// One page to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// Page identifier, e.g. `about`.
    pub id: String,
    /// Fragment file the content is read from.
    pub fragment: PathBuf,
    /// Output file the rendered page is written to.
    pub output: PathBuf,
}

/// List the pages to render, in render order.
///
/// Enumeration never reads fragment contents; a missing fragment in list mode
/// only surfaces when that page is rendered.
pub fn enumerate_pages(layout: &SiteLayout) -> Result<Vec<PageEntry>, BuildError> {
    match layout.pages.mode {
        PageMode::List => Ok(listed_pages(layout)),
        PageMode::Directory => discover_pages(layout),
    }
}

fn listed_pages(layout: &SiteLayout) -> Vec<PageEntry> {
    layout
        .pages
        .names
        .iter()
        .map(|name| PageEntry {
            id: name.clone(),
            fragment: layout
                .templates_dir
                .join(format!("{}.{}", name, layout.fragment_extension)),
            output: layout.output_path(name),
        })
        .collect()
}

fn discover_pages(layout: &SiteLayout) -> Result<Vec<PageEntry>, BuildError> {
    let dir = &layout.templates_dir;
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(BuildError::read_dir(dir))? {
        let entry = entry.map_err(BuildError::read_dir(dir))?;
        let path = entry.path();
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') || !path.is_file() {
            continue;
        }
        if path == layout.master_template {
            continue;
        }
        files.push(path);
    }
    files.sort();

    let mut seen = HashSet::new();
    let mut pages = Vec::with_capacity(files.len());
    for fragment in files {
        let id = fragment
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !seen.insert(id.clone()) {
            return Err(BuildError::DuplicatePage(id, dir.clone()));
        }
        pages.push(PageEntry {
            output: layout.output_path(&id),
            id,
            fragment,
        });
    }
    Ok(pages)
}
