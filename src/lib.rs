//! # site-stitch
//!
//! Builds a static website by stitching one master HTML template with
//! per-page content fragments, then publishing static asset trees next to the
//! generated pages.
//!
//! # Pipeline
//!
//! ```text
//! 1. Version    VERSION            →  raw token         (optional)
//! 2. Template   templates/template.tpl  →  {VERSION} applied
//! 3. Pages      templates/<page>.tpl    →  www/<page>.html
//! 4. Assets     demos/ lib/ src/        →  www/demos/ www/lib/ www/src/
//! ```
//!
//! Stages run once, in order, on a single thread. Any missing input aborts
//! the run immediately; outputs written before the failure stay on disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`layout`] | Config paths resolved against the site root |
//! | [`version`] | Raw version token loading |
//! | [`template`] | Master template and `{CONTENT}` / `{VERSION}` substitution |
//! | [`pages`] | Page enumeration: fixed list or templates-directory listing |
//! | [`render`] | Fragment → finished page, written to the target directory |
//! | [`assets`] | Staged copy-and-swap of asset trees into the target |
//! | [`site`] | Stage orchestration and the no-write `check` pass |
//! | [`output`] | CLI output formatting |
//! | [`error`] | Path-carrying build errors |
//!
//! # Design Decisions
//!
//! ## Literal Placeholders Only
//!
//! `{CONTENT}` and `{VERSION}` are replaced by plain substring substitution.
//! There is no escaping, no conditionals, and no loops, so a page's output is
//! always predictable from its inputs by eye.
//!
//! ## Site Structure as Data
//!
//! The page list and the asset directory list live in [`config::SiteConfig`]
//! rather than in code. A different site shape is a `config.toml` edit.
//!
//! ## Asset Swap Instead of Delete-Then-Copy
//!
//! Asset trees are copied into a hidden staging directory first and renamed
//! into place afterwards (see [`assets`]). An interrupted publish never leaves
//! a published asset directory missing without its previous contents still
//! on disk.

pub mod assets;
pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod pages;
pub mod render;
pub mod site;
pub mod template;
pub mod version;

#[cfg(test)]
pub(crate) mod test_helpers;
