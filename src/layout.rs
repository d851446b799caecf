//! Resolved filesystem layout for one build.
//!
//! [`SiteConfig`] stores everything as strings relative to the site root;
//! [`SiteLayout`] joins them onto the root once so the build stages only ever
//! deal with concrete paths.

use crate::config::{PagesConfig, SiteConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub templates_dir: PathBuf,
    pub master_template: PathBuf,
    pub fragment_extension: String,
    pub output_extension: String,
    pub target_dir: PathBuf,
    pub version_file: Option<PathBuf>,
    pub pages: PagesConfig,
    pub asset_source_root: PathBuf,
    pub asset_dirs: Vec<String>,
}

impl SiteLayout {
    pub fn resolve(root: &Path, config: &SiteConfig) -> Self {
        let templates_dir = root.join(&config.templates_dir);
        Self {
            master_template: templates_dir.join(&config.master_template),
            templates_dir,
            fragment_extension: config.fragment_extension.clone(),
            output_extension: config.output_extension.clone(),
            target_dir: root.join(&config.target_dir),
            version_file: config.version_file.as_ref().map(|v| root.join(v)),
            pages: config.pages.clone(),
            asset_source_root: root.join(&config.assets.source_root),
            asset_dirs: config.assets.dirs.clone(),
        }
    }

    /// Output path for a page identifier.
    pub fn output_path(&self, page_id: &str) -> PathBuf {
        self.target_dir
            .join(format!("{}.{}", page_id, self.output_extension))
    }

    /// `(source, target)` for each configured asset directory, in order.
    pub fn asset_pairs(&self) -> impl Iterator<Item = (&str, PathBuf, PathBuf)> {
        self.asset_dirs.iter().map(|name| {
            (
                name.as_str(),
                self.asset_source_root.join(name),
                self.target_dir.join(name),
            )
        })
    }
}
