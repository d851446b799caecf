use clap::{Parser, Subcommand};
use site_stitch::error::BuildError;
use site_stitch::layout::SiteLayout;
use site_stitch::site::{BuildEvent, Stage};
use site_stitch::{config, output, site};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("SITE_STITCH_GIT_HASH");
    if hash.is_empty() {
        return env!("CARGO_PKG_VERSION");
    }
    let dirty = if env!("SITE_STITCH_GIT_DIRTY") == "true" {
        "-dirty"
    } else {
        ""
    };
    // Leaked once at startup
    Box::leak(format!("{} ({hash}{dirty})", env!("CARGO_PKG_VERSION")).into_boxed_str())
}

#[derive(Parser)]
#[command(name = "site-stitch")]
#[command(about = "Stitch page fragments into a template and publish static assets")]
#[command(long_about = "\
Stitch page fragments into a template and publish static assets

Run with no arguments to build the site in the current directory.

Default layout:

  ./
  ├── config.toml          # Optional; see 'site-stitch gen-config'
  ├── VERSION              # Read only when version_file is configured
  ├── templates/
  │   ├── template.tpl     # Master template containing {CONTENT}
  │   ├── index.tpl        # One fragment per page
  │   └── about.tpl
  ├── demos/  lib/  src/   # Asset trees copied verbatim
  └── www/                 # Published site

Placeholders are replaced literally:
  {CONTENT}   the page fragment (first occurrence in the template)
  {VERSION}   raw contents of the version file (every occurrence)")]
#[command(version = version_string())]
struct Cli {
    /// Site root; every configured path is relative to it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Render all pages and publish assets (the default)
    Build,
    /// Render pages only
    Pages,
    /// Publish asset directories only
    Assets,
    /// Verify every input exists without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let layout = load_layout(&cli.root)?;
            let report = site::build(&layout, |e| print_event(e, &layout, &cli.root))?;
            output::print_build_summary(&report);
            println!("==> Build complete: {}", layout.target_dir.display());
        }
        Command::Pages => {
            let layout = load_layout(&cli.root)?;
            let report = site::build_pages(&layout, |e| print_event(e, &layout, &cli.root))?;
            output::print_build_summary(&report);
        }
        Command::Assets => {
            let layout = load_layout(&cli.root)?;
            if !layout.asset_dirs.is_empty() {
                print_event(BuildEvent::Stage(Stage::Assets), &layout, &cli.root);
            }
            let report = site::BuildReport {
                assets: site::publish_assets(&layout, |r| {
                    output::print_asset_report(r, &cli.root)
                })?,
                ..Default::default()
            };
            output::print_build_summary(&report);
        }
        Command::Check => {
            let layout = load_layout(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let report = site::check(&layout)?;
            output::print_check_output(&report, &cli.root);
            if !report.is_ok() {
                return Err(BuildError::MissingInputs(report.missing.len()).into());
            }
            println!("==> All inputs present");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_layout(root: &Path) -> Result<SiteLayout, config::ConfigError> {
    let site_config = config::load_config(root)?;
    Ok(SiteLayout::resolve(root, &site_config))
}

fn print_event(event: BuildEvent<'_>, layout: &SiteLayout, root: &Path) {
    match event {
        BuildEvent::Stage(Stage::Template) => {
            println!("==> Loading template {}", layout.master_template.display())
        }
        BuildEvent::Stage(Stage::Pages) => {
            println!("==> Rendering pages → {}", layout.target_dir.display())
        }
        BuildEvent::Stage(Stage::Assets) => {
            println!("==> Publishing assets → {}", layout.target_dir.display())
        }
        BuildEvent::Page(r) => output::print_page_report(r, &layout.target_dir),
        BuildEvent::Asset(r) => output::print_asset_report(r, root),
    }
}
