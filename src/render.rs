//! Page rendering: fragment in, finished HTML file out.
//!
//! Pages are rendered strictly in enumeration order and each one is written
//! before the next fragment is read. A missing fragment stops the run right
//! there; pages rendered before it stay on disk.

use crate::error::BuildError;
use crate::layout::SiteLayout;
use crate::pages::{PageEntry, enumerate_pages};
use crate::template::{Template, substitute_version};
use std::fs;

/// What happened to an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// No file existed at the output path.
    Created,
    /// A file existed with different contents.
    Updated,
    /// A file existed with identical contents. It is rewritten anyway.
    Unchanged,
}

/// Result of rendering one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// 1-based position in render order.
    pub index: usize,
    pub entry: PageEntry,
    pub status: WriteStatus,
}

/// Render a single page body.
pub fn render_page(template: &Template, fragment: &str, version: Option<&str>) -> String {
    template.render(&substitute_version(fragment, version))
}

/// Render every page into the target directory.
///
/// `on_page` is called after each page is written, so callers see progress
/// even when a later page fails.
pub fn render_pages(
    layout: &SiteLayout,
    template: &Template,
    version: Option<&str>,
    mut on_page: impl FnMut(&PageReport),
) -> Result<Vec<PageReport>, BuildError> {
    let pages = enumerate_pages(layout)?;

    let target = &layout.target_dir;
    fs::create_dir_all(target).map_err(BuildError::write(target))?;

    let mut reports = Vec::with_capacity(pages.len());
    for (i, entry) in pages.into_iter().enumerate() {
        let fragment =
            fs::read_to_string(&entry.fragment).map_err(BuildError::read(&entry.fragment))?;
        let body = render_page(template, &fragment, version);
        let status = write_output(&entry, &body)?;

        let report = PageReport {
            index: i + 1,
            entry,
            status,
        };
        on_page(&report);
        reports.push(report);
    }
    Ok(reports)
}

fn write_output(entry: &PageEntry, body: &str) -> Result<WriteStatus, BuildError> {
    let status = match fs::read(&entry.output) {
        Ok(existing) if existing == body.as_bytes() => WriteStatus::Unchanged,
        Ok(_) => WriteStatus::Updated,
        Err(_) => WriteStatus::Created,
    };
    fs::write(&entry.output, body).map_err(BuildError::write(&entry.output))?;
    Ok(status)
}
