//! Tracing setup for menuctl
//!
//! While the menu is on screen the terminal belongs to ratatui, so log output
//! goes to a file instead of stderr.
//!
//! Usage:
//!   menuctl --debug                       # Debug logging to the log file
//!   menuctl --log-file /tmp/menuctl.log   # Log somewhere else
//!   RUST_LOG=menuctl_core=trace menuctl   # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                              # Log filter (default: info)

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Append to this file instead of writing to stderr
    pub log_file: Option<PathBuf>,
}

fn env_filter(config: &TracingConfig) -> EnvFilter {
    if config.debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = env_filter(config);

    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create log directory {:?}", parent))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(format!("Failed to open log file {:?}", path))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(config.debug) // Show targets in debug mode
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .compact()
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.debug)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
