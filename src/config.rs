//! Site configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` in the
//! site root. Every key has a stock default, so a site that follows the
//! default layout needs no config file at all.
//!
//! ## Default Layout
//!
//! ```text
//! ./
//! ├── config.toml              # Optional overrides
//! ├── VERSION                  # Only read when `version_file` is set
//! ├── templates/
//! │   ├── template.tpl         # Master template with {CONTENT}
//! │   ├── index.tpl            # One fragment per page
//! │   └── ...
//! ├── demos/                   # Asset trees copied into the target
//! ├── lib/
//! ├── src/
//! └── www/                     # Target directory
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! templates_dir = "templates"
//! master_template = "template.tpl"
//! fragment_extension = "tpl"
//! output_extension = "html"
//! target_dir = "www"
//! # version_file = "VERSION"  # enables {VERSION} substitution
//!
//! [pages]
//! mode = "list"               # "list" or "directory"
//! names = ["index", "about", "aboutme", "license", "tutorial", "manual"]
//!
//! [assets]
//! source_root = "."
//! dirs = ["demos", "lib", "src"]
//! ```
//!
//! Config files are sparse: only the keys present override the stock
//! defaults. Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// File name of the site config, looked up in the site root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All paths are relative to the site root passed on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the master template and the page fragments.
    pub templates_dir: String,
    /// File name of the master template inside `templates_dir`.
    pub master_template: String,
    /// Extension of fragment files in `list` mode (without the dot).
    pub fragment_extension: String,
    /// Extension of generated pages (without the dot).
    pub output_extension: String,
    /// Directory the site is published into.
    pub target_dir: String,
    /// File whose raw contents replace `{VERSION}`. `None` disables version
    /// substitution entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_file: Option<String>,
    /// Which pages get rendered.
    pub pages: PagesConfig,
    /// Static directories copied into the target.
    pub assets: AssetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            master_template: "template.tpl".to_string(),
            fragment_extension: "tpl".to_string(),
            output_extension: "html".to_string(),
            target_dir: "www".to_string(),
            version_file: None,
            pages: PagesConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate names and extensions before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_plain_name("master_template", &self.master_template)?;
        require_extension("fragment_extension", &self.fragment_extension)?;
        require_extension("output_extension", &self.output_extension)?;

        if self.pages.mode == PageMode::List {
            if self.pages.names.is_empty() {
                return Err(ConfigError::Validation(
                    "pages.names must not be empty in list mode".into(),
                ));
            }
            for name in &self.pages.names {
                require_plain_name("pages.names", name)?;
            }
        }

        let target = normalize(Path::new(&self.target_dir));
        let mut seen = HashSet::new();
        for dir in &self.assets.dirs {
            require_plain_name("assets.dirs", dir)?;
            if !seen.insert(dir.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "assets.dirs lists '{dir}' more than once"
                )));
            }
            // Copying a tree into itself never terminates.
            let source = normalize(&Path::new(&self.assets.source_root).join(dir));
            if target.starts_with(&source) {
                return Err(ConfigError::Validation(format!(
                    "asset directory '{}' contains target_dir '{}'",
                    source.display(),
                    self.target_dir
                )));
            }
        }
        Ok(())
    }
}

/// How the set of pages is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    /// Render exactly the pages named in `pages.names`, in that order.
    #[default]
    List,
    /// Render every file in `templates_dir` except the master template.
    Directory,
}

/// Page enumeration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub mode: PageMode,
    /// Ordered page identifiers. Ignored in `directory` mode.
    pub names: Vec<String>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            mode: PageMode::List,
            names: ["index", "about", "aboutme", "license", "tutorial", "manual"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Static asset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory containing the asset source trees.
    pub source_root: String,
    /// Names of the trees to publish. Each is copied to `target_dir/<name>`.
    pub dirs: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            source_root: ".".to_string(),
            dirs: ["demos", "lib", "src"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

fn require_plain_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{field} entries must not be empty"
        )));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} entry '{value}' must be a plain name, not a path"
        )));
    }
    Ok(())
}

/// Lexically resolve `.` and `..` so `./src/../www` compares equal to `www`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn require_extension(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "{field} must be non-empty and given without a leading dot"
        )));
    }
    require_plain_name(field, value)
}

// =============================================================================
// Loading: stock defaults overlaid by the site's config.toml
// =============================================================================

/// [`SiteConfig::default`] as a TOML table, the base every overlay lands on.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Overlay `overlay` onto `base`.
///
/// `[pages]` and `[assets]` merge per key, so `[assets] dirs = [..]` keeps the
/// stock `source_root`. Scalars and arrays in the overlay replace the base.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, value) => value,
    }
}

/// Parse `<root>/config.toml` without applying defaults.
///
/// A site without a config file yields `Ok(None)`.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&text)?))
}

/// Turn the stock table plus the site's overrides into a validated config.
///
/// Unknown keys fail here, during deserialization, before validation runs.
pub fn resolve_config(
    base: toml::Value,
    overrides: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let table = match overrides {
        Some(overrides) => merge_toml(base, overrides),
        None => base,
    };
    let config: SiteConfig = table.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Config for the site at `root`; stock defaults when there is no file.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# site-stitch configuration
# ========================
# Every key is optional. Paths are relative to the site root (--root).

# Directory holding the master template and the page fragments.
templates_dir = "templates"

# Master template inside templates_dir. Must contain {CONTENT}; may
# contain {VERSION}.
master_template = "template.tpl"

# Extension of fragment files when pages.mode = "list".
fragment_extension = "tpl"

# Extension of generated pages.
output_extension = "html"

# Where the site is published.
target_dir = "www"

# Uncomment to replace {VERSION} in the template and every fragment with
# the raw contents of this file (no trimming).
# version_file = "VERSION"

[pages]
# "list":      render pages.names in order, from <templates_dir>/<name>.<fragment_extension>
# "directory": render every file in templates_dir except master_template
mode = "list"
names = ["index", "about", "aboutme", "license", "tutorial", "manual"]

[assets]
# Each directory in `dirs` is copied from <source_root>/<name> to
# <target_dir>/<name>, replacing whatever was there before.
source_root = "."
dirs = ["demos", "lib", "src"]
"##
}
