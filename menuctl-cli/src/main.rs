//! menuctl - terminal launcher for a catalog of shell commands and snippets
//!
//! Running `menuctl` with no subcommand opens the three-panel menu:
//! - Categories and items come from a YAML/JSON/TOML catalog
//! - Commands run in the background; their output lands in the output panel
//! - Copy items put their name on the system clipboard
//!
//! `menuctl validate` checks a catalog without starting the TUI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use menuctl_core::{Catalog, Dispatcher, Menu, OutputLog};
use tracing::{info, warn};

mod clipboard;
mod config;
mod tracing_setup;
mod tui;

use clipboard::SystemClipboard;
use config::MenuConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "menuctl",
    author,
    version,
    about = "Keyboard-driven terminal menu for running catalogued shell commands",
    long_about = "Browse categories of commands, snippets and actions in a three-panel TUI. \
                  Commands run asynchronously and their output is collected in a scrollable panel."
)]
struct Cli {
    /// Catalog file (YAML, JSON or TOML)
    #[arg(long, short = 'c', global = true, env = "MENUCTL_CATALOG", value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Config file (default: ~/.menuctl/config.toml)
    #[arg(long, global = true, env = "MENUCTL_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Log file used while the menu is open (default: ~/.menuctl/menuctl.log)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse and validate a catalog, then print a summary
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Catalog to check (default: the catalog the menu would open)
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MenuConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Validate(args)) => {
            tracing_setup::init(&TracingConfig {
                debug: cli.debug,
                log_file: None,
            })
            .ok();
            let path = args
                .path
                .unwrap_or_else(|| config.catalog_path(cli.catalog.as_deref()));
            run_validate(&path)
        }
        None => run_menu(&cli, &config),
    }
}

fn run_validate(path: &Path) -> Result<()> {
    let catalog = Catalog::from_path(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;

    println!(
        "{}: {}, {}",
        path.display(),
        count(catalog.len(), "category", "categories"),
        count(catalog.item_count(), "item", "items")
    );
    for category in catalog.categories() {
        println!("  {} ({})", category.name(), category.items().len());
        for item in category.items() {
            println!("    {}", item);
        }
    }
    Ok(())
}

fn count(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

fn run_menu(cli: &Cli, config: &MenuConfig) -> Result<()> {
    let log_path = config.log_path(cli.log_file.as_deref());
    if let Err(err) = tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        log_file: Some(log_path.clone()),
    }) {
        eprintln!("warning: logging disabled ({:#})", err);
    }

    // A bad catalog is fatal before the terminal is touched
    let catalog_path = config.catalog_path(cli.catalog.as_deref());
    let catalog = Catalog::from_path(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    if catalog.is_empty() {
        warn!(path = %catalog_path.display(), "catalog has no categories");
    }

    info!(
        catalog = %catalog_path.display(),
        categories = catalog.len(),
        items = catalog.item_count(),
        log = %log_path.display(),
        "starting menu"
    );

    let (dispatcher, events) = Dispatcher::new(
        Arc::new(config.shell_runner()),
        Arc::new(SystemClipboard::new()),
    );
    let menu = Menu::new(catalog, OutputLog::with_max_lines(config.output.max_lines));

    tui::run(menu, dispatcher, events)?;

    // In-flight commands and clipboard writes are abandoned on quit
    info!("menu closed");
    std::process::exit(0);
}
