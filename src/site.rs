//! Build orchestration.
//!
//! Runs the stages in their fixed order and never overlaps them:
//!
//! ```text
//! 1. Version    VERSION        →  token           (skipped when not configured)
//! 2. Template   template.tpl   →  Template
//! 3. Pages      fragments      →  www/<page>.html
//! 4. Assets     demos/ lib/ …  →  www/demos/ www/lib/ …
//! ```
//!
//! Every stage is fail-fast. Because the template loads before anything is
//! written, a missing template leaves the target directory untouched; a
//! failure in a later stage keeps whatever earlier stages already wrote.

use crate::assets::{AssetReport, publish_tree};
use crate::error::BuildError;
use crate::layout::SiteLayout;
use crate::pages::{PageEntry, enumerate_pages};
use crate::render::{PageReport, render_pages};
use crate::template::{Template, content_slots};
use crate::version;
use std::fs;
use std::path::PathBuf;

/// Pipeline stage, announced before the stage starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Template,
    Pages,
    Assets,
}

/// Progress notification emitted as the build advances.
#[derive(Debug, Clone)]
pub enum BuildEvent<'a> {
    Stage(Stage),
    Page(&'a PageReport),
    Asset(&'a AssetReport),
}

/// Everything a full build produced.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub version: Option<String>,
    pub pages: Vec<PageReport>,
    pub assets: Vec<AssetReport>,
}

/// Read the version token if the layout configures one.
pub fn load_version(layout: &SiteLayout) -> Result<Option<String>, BuildError> {
    layout
        .version_file
        .as_deref()
        .map(version::load_version)
        .transpose()
}

/// Publish every configured asset tree, in order.
pub fn publish_assets(
    layout: &SiteLayout,
    mut on_asset: impl FnMut(&AssetReport),
) -> Result<Vec<AssetReport>, BuildError> {
    let mut reports = Vec::with_capacity(layout.asset_dirs.len());
    for (name, source, target) in layout.asset_pairs() {
        let report = publish_tree(name, &source, &target)?;
        on_asset(&report);
        reports.push(report);
    }
    Ok(reports)
}

/// Stages 1-3: version, template, pages. Assets are left alone.
pub fn build_pages(
    layout: &SiteLayout,
    mut on_event: impl FnMut(BuildEvent<'_>),
) -> Result<BuildReport, BuildError> {
    on_event(BuildEvent::Stage(Stage::Template));
    let version = load_version(layout)?;
    let template = Template::load(&layout.master_template, version.as_deref())?;

    on_event(BuildEvent::Stage(Stage::Pages));
    let pages = render_pages(layout, &template, version.as_deref(), |r| {
        on_event(BuildEvent::Page(r))
    })?;

    Ok(BuildReport {
        version,
        pages,
        assets: Vec::new(),
    })
}

/// Run the full pipeline: version, template, pages, assets.
pub fn build(
    layout: &SiteLayout,
    mut on_event: impl FnMut(BuildEvent<'_>),
) -> Result<BuildReport, BuildError> {
    let mut report = build_pages(layout, &mut on_event)?;

    if !layout.asset_dirs.is_empty() {
        on_event(BuildEvent::Stage(Stage::Assets));
    }
    report.assets = publish_assets(layout, |r| on_event(BuildEvent::Asset(r)))?;

    Ok(report)
}

// ============================================================================
// Check
// ============================================================================

/// Result of validating the inputs without writing anything.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub pages: Vec<PageEntry>,
    pub assets: Vec<String>,
    /// Required inputs that do not exist.
    pub missing: Vec<PathBuf>,
    /// Problems that would not stop a build but probably indicate a mistake.
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Verify that every input a build would read is present.
///
/// Unlike [`build`], this collects every missing input instead of stopping
/// at the first one.
pub fn check(layout: &SiteLayout) -> Result<CheckReport, BuildError> {
    let mut report = CheckReport::default();

    if let Some(path) = &layout.version_file {
        if !path.is_file() {
            report.missing.push(path.clone());
        }
    }

    match fs::read_to_string(&layout.master_template) {
        Ok(raw) => match content_slots(&raw) {
            1 => {}
            0 => report.warnings.push(format!(
                "{} has no {{CONTENT}} placeholder",
                layout.master_template.display()
            )),
            n => report.warnings.push(format!(
                "{} has {n} {{CONTENT}} placeholders; only the first is filled",
                layout.master_template.display()
            )),
        },
        Err(_) => report.missing.push(layout.master_template.clone()),
    }

    match enumerate_pages(layout) {
        Ok(pages) => {
            for page in &pages {
                if !page.fragment.is_file() {
                    report.missing.push(page.fragment.clone());
                }
            }
            report.pages = pages;
        }
        Err(e) if e.is_not_found() => report.missing.push(layout.templates_dir.clone()),
        Err(e) => return Err(e),
    }

    for (name, source, _) in layout.asset_pairs() {
        if !source.is_dir() {
            report.missing.push(source);
        }
        report.assets.push(name.to_string());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PageMode, SiteConfig};
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn versioned_config() -> SiteConfig {
        SiteConfig {
            version_file: Some("VERSION".to_string()),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn build_writes_pages_and_assets() {
        let tmp = setup_site();
        let layout = site_layout(tmp.path());

        let report = build(&layout, |_| {}).unwrap();

        assert_eq!(report.version, None);
        assert_eq!(report.pages.len(), 6);
        assert_eq!(report.assets.len(), 3);
        assert_eq!(
            list_files(&tmp.path().join("www")),
            vec![
                "about.html",
                "aboutme.html",
                "demos/index.html",
                "demos/shapes/fsa.js",
                "index.html",
                "lib/diagram.min.js",
                "license.html",
                "manual.html",
                "src/diagram.js",
                "src/plugins/uml.js",
                "tutorial.html",
            ]
        );
    }

    #[test]
    fn build_emits_events_in_order() {
        let tmp = setup_site();
        let layout = site_layout(tmp.path());

        let mut order = Vec::new();
        build(&layout, |event| match event {
            BuildEvent::Stage(stage) => order.push(format!("stage:{stage:?}")),
            BuildEvent::Page(p) => order.push(format!("page:{}", p.entry.id)),
            BuildEvent::Asset(a) => order.push(format!("asset:{}", a.name)),
        })
        .unwrap();

        assert_eq!(
            order,
            vec![
                "stage:Template",
                "stage:Pages",
                "page:index",
                "page:about",
                "page:aboutme",
                "page:license",
                "page:tutorial",
                "page:manual",
                "stage:Assets",
                "asset:demos",
                "asset:lib",
                "asset:src",
            ]
        );
    }

    #[test]
    fn build_pages_leaves_assets_unpublished() {
        let tmp = setup_site();
        let layout = layout_with(tmp.path(), &versioned_config());

        let mut stages = Vec::new();
        let report = build_pages(&layout, |event| {
            if let BuildEvent::Stage(stage) = event {
                stages.push(stage);
            }
        })
        .unwrap();

        assert_eq!(stages, vec![Stage::Template, Stage::Pages]);
        assert_eq!(report.version.as_deref(), Some("0.9.2\n"));
        assert_eq!(report.pages.len(), 6);
        assert!(report.assets.is_empty());
        assert!(tmp.path().join("www/index.html").exists());
        assert!(!tmp.path().join("www/demos").exists());
    }

    #[test]
    fn build_without_assets_skips_asset_stage() {
        let tmp = setup_site();
        let mut config = SiteConfig::default();
        config.assets.dirs.clear();
        let layout = layout_with(tmp.path(), &config);

        let mut saw_asset_stage = false;
        build(&layout, |event| {
            if let BuildEvent::Stage(Stage::Assets) = event {
                saw_asset_stage = true;
            }
        })
        .unwrap();

        assert!(!saw_asset_stage);
    }

    #[test]
    fn build_without_version_keeps_marker() {
        let tmp = setup_site();
        let layout = site_layout(tmp.path());
        build(&layout, |_| {}).unwrap();
        assert!(read(tmp.path(), "www/index.html").contains("{VERSION}"));
    }

    #[test]
    fn build_with_version_replaces_every_marker() {
        let tmp = setup_site();
        let layout = layout_with(tmp.path(), &versioned_config());

        let report = build(&layout, |_| {}).unwrap();

        assert_eq!(report.version.as_deref(), Some("0.9.2\n"));
        for page in ["index", "manual"] {
            let html = read(tmp.path(), &format!("www/{page}.html"));
            assert!(!html.contains("{VERSION}"), "{page}");
            assert!(html.contains("Version 0.9.2\n"), "{page}");
        }
        assert!(read(tmp.path(), "www/manual.html").contains("release 0.9.2\n."));
    }

    #[test]
    fn missing_version_file_aborts_before_writing() {
        let tmp = setup_site();
        fs::remove_file(tmp.path().join("VERSION")).unwrap();
        let layout = layout_with(tmp.path(), &versioned_config());

        let err = build(&layout, |_| {}).unwrap_err();

        assert!(err.is_not_found());
        assert!(!tmp.path().join("www").exists());
    }

    #[test]
    fn missing_template_leaves_target_untouched() {
        let tmp = setup_site();
        fs::remove_file(tmp.path().join("templates/template.tpl")).unwrap();
        let www = tmp.path().join("www");
        fs::create_dir_all(&www).unwrap();
        fs::write(www.join("index.html"), "previous").unwrap();

        let err = build(&tmp_layout(&tmp), |_| {}).unwrap_err();

        assert!(matches!(&err, BuildError::Read { path, .. } if path.ends_with("template.tpl")));
        assert_eq!(list_files(&www), vec!["index.html"]);
        assert_eq!(read(tmp.path(), "www/index.html"), "previous");
    }

    #[test]
    fn missing_asset_source_keeps_pages() {
        let tmp = setup_site();
        fs::remove_dir_all(tmp.path().join("lib")).unwrap();

        let err = build(&tmp_layout(&tmp), |_| {}).unwrap_err();

        assert!(matches!(err, BuildError::MissingAssetSource(_)));
        assert!(tmp.path().join("www/index.html").exists());
        assert!(tmp.path().join("www/demos/index.html").exists());
        assert!(!tmp.path().join("www/src").exists());
    }

    #[test]
    fn directory_mode_build() {
        let tmp = setup_site();
        let mut config = SiteConfig::default();
        config.pages.mode = PageMode::Directory;
        config.assets.dirs.clear();
        let layout = layout_with(tmp.path(), &config);

        let report = build(&layout, |_| {}).unwrap();

        let ids: Vec<&str> = report.pages.iter().map(|p| p.entry.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["about", "aboutme", "index", "license", "manual", "tutorial"]
        );
        assert!(!tmp.path().join("www/template.html").exists());
    }

    #[test]
    fn load_version_none_when_unconfigured() {
        let tmp = setup_site();
        assert_eq!(load_version(&tmp_layout(&tmp)).unwrap(), None);
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn check_passes_on_complete_site() {
        let tmp = setup_site();
        let report = check(&layout_with(tmp.path(), &versioned_config())).unwrap();
        assert!(report.is_ok(), "missing: {:?}", report.missing);
        assert!(report.warnings.is_empty());
        assert_eq!(report.pages.len(), 6);
        assert_eq!(report.assets, vec!["demos", "lib", "src"]);
    }

    #[test]
    fn check_collects_every_missing_input() {
        let tmp = setup_site();
        fs::remove_file(tmp.path().join("VERSION")).unwrap();
        fs::remove_file(tmp.path().join("templates/about.tpl")).unwrap();
        fs::remove_file(tmp.path().join("templates/manual.tpl")).unwrap();
        fs::remove_dir_all(tmp.path().join("demos")).unwrap();

        let report = check(&layout_with(tmp.path(), &versioned_config())).unwrap();

        assert!(!report.is_ok());
        assert_eq!(
            report.missing,
            vec![
                tmp.path().join("VERSION"),
                tmp.path().join("templates/about.tpl"),
                tmp.path().join("templates/manual.tpl"),
                tmp.path().join("./demos"),
            ]
        );
    }

    #[test]
    fn check_writes_nothing() {
        let tmp = setup_site();
        check(&tmp_layout(&tmp)).unwrap();
        assert!(!tmp.path().join("www").exists());
    }

    #[test]
    fn check_warns_about_slot_count() {
        let tmp = setup_site();
        fs::write(tmp.path().join("templates/template.tpl"), "<body></body>").unwrap();
        let report = check(&tmp_layout(&tmp)).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("no {CONTENT}"));
    }

    #[test]
    fn check_reports_missing_templates_dir_in_directory_mode() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.pages.mode = PageMode::Directory;
        config.assets.dirs.clear();
        let layout = layout_with(tmp.path(), &config);

        let report = check(&layout).unwrap();

        assert_eq!(
            report.missing,
            vec![
                tmp.path().join("templates/template.tpl"),
                tmp.path().join("templates"),
            ]
        );
    }

    fn tmp_layout(tmp: &TempDir) -> SiteLayout {
        site_layout(tmp.path())
    }
}
