//! CLI output formatting.
//!
//! Each stage has `format_*` functions that return lines (pure, no I/O) and a
//! `print_*` wrapper that writes them to stdout. Entities lead with a
//! positional index and their identity; paths follow as indented context.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! 001 index → index.html (created)
//! 002 about → about.html (unchanged)
//! demos → demos/ (12 files, replaced)
//!     Source: demos
//!
//! Generated 2 pages (1 created, 1 unchanged), published 1 asset directory (12 files)
//! Version: 0.9.2
//! ```
//!
//! ## Check
//!
//! ```text
//! Pages
//! 001 index
//!     Source: templates/index.tpl
//!
//! Assets
//!     demos/
//!
//! Missing
//!     templates/about.tpl
//! ```

use crate::assets::AssetReport;
use crate::render::{PageReport, WriteStatus};
use crate::site::{BuildReport, CheckReport};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 page`, `2 pages`
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Display `path` relative to `base` when possible.
fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn status_label(status: WriteStatus) -> &'static str {
    match status {
        WriteStatus::Created => "created",
        WriteStatus::Updated => "updated",
        WriteStatus::Unchanged => "unchanged",
    }
}

// ============================================================================
// Build output
// ============================================================================

/// ```text
/// 001 index → index.html (created)
/// ```
pub fn format_page_report(report: &PageReport, target_dir: &Path) -> String {
    format!(
        "{} {} → {} ({})",
        format_index(report.index),
        report.entry.id,
        relative(&report.entry.output, target_dir),
        status_label(report.status)
    )
}

/// ```text
/// demos → demos/ (12 files, replaced)
///     Source: demos
/// ```
pub fn format_asset_report(report: &AssetReport, root: &Path) -> Vec<String> {
    let action = if report.replaced { "replaced" } else { "new" };
    let target_name = report
        .target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.name.clone());
    vec![
        format!(
            "{} → {}/ ({}, {})",
            report.name,
            target_name,
            count(report.files, "file", "files"),
            action
        ),
        format!("    Source: {}", relative(&report.source, root)),
    ]
}

/// One-line summary of a finished build.
///
/// The page part is omitted when only assets were published.
pub fn format_build_summary(report: &BuildReport) -> String {
    let mut parts = Vec::new();

    if !report.pages.is_empty() || report.assets.is_empty() {
        let mut statuses = Vec::new();
        for status in [
            WriteStatus::Created,
            WriteStatus::Updated,
            WriteStatus::Unchanged,
        ] {
            let n = report.pages.iter().filter(|p| p.status == status).count();
            if n > 0 {
                statuses.push(format!("{n} {}", status_label(status)));
            }
        }
        let mut part = format!("generated {}", count(report.pages.len(), "page", "pages"));
        if !statuses.is_empty() {
            part.push_str(&format!(" ({})", statuses.join(", ")));
        }
        parts.push(part);
    }

    if !report.assets.is_empty() {
        let files: usize = report.assets.iter().map(|a| a.files).sum();
        parts.push(format!(
            "published {} ({})",
            count(
                report.assets.len(),
                "asset directory",
                "asset directories"
            ),
            count(files, "file", "files")
        ));
    }

    capitalize(&parts.join(", "))
}

/// `Version: 0.9.2` when a version token was substituted.
///
/// The token itself is raw; surrounding whitespace is trimmed for display only.
pub fn format_version(report: &BuildReport) -> Option<String> {
    report
        .version
        .as_deref()
        .map(|v| format!("Version: {}", v.trim()))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn print_page_report(report: &PageReport, target_dir: &Path) {
    println!("{}", format_page_report(report, target_dir));
}

pub fn print_asset_report(report: &AssetReport, root: &Path) {
    for line in format_asset_report(report, root) {
        println!("{}", line);
    }
}

pub fn print_build_summary(report: &BuildReport) {
    println!();
    println!("{}", format_build_summary(report));
    if let Some(line) = format_version(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the result of `check`: pages, assets, then any problems.
pub fn format_check_output(report: &CheckReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.id));
        lines.push(format!("    Source: {}", relative(&page.fragment, root)));
    }

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for name in &report.assets {
            lines.push(format!("    {}/", name));
        }
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("    {}", warning));
        }
    }

    if !report.missing.is_empty() {
        lines.push(String::new());
        lines.push("Missing".to_string());
        for path in &report.missing {
            lines.push(format!("    {}", relative(path, root)));
        }
    }

    lines
}

pub fn print_check_output(report: &CheckReport, root: &Path) {
    for line in format_check_output(report, root) {
        println!("{}", line);
    }
}
