//! menuctl configuration (`~/.menuctl/config.toml`)
//!
//! Every field is optional. CLI flags and environment variables win over the
//! file, and the file wins over built-in defaults.
//!
//! ```toml
//! catalog = "~/.menuctl/catalog.yaml"
//! shell = "bash"
//! shell_flag = "-c"
//! log_file = "~/.menuctl/menuctl.log"
//!
//! [output]
//! max_lines = 5000   # 0 keeps everything
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use menuctl_core::{MenuError, ShellRunner};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Catalog used when `--catalog` is not given
    pub catalog: Option<PathBuf>,
    /// Program that runs catalog commands
    pub shell: Option<String>,
    /// Flag passed before the command text (default `-c`)
    pub shell_flag: Option<String>,
    /// Where tracing output goes while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Line cap for the output panel; 0 means unbounded
    pub max_lines: usize,
}

impl MenuConfig {
    /// Load config from `path`, or from ~/.menuctl/config.toml
    ///
    /// A missing default file yields defaults; a missing explicit file, or
    /// any file that fails to parse, is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !config_path.exists() {
            if explicit {
                anyhow::bail!("Config not found at {:?}", config_path);
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml(&content)
            .context(format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self, MenuError> {
        toml::from_str(content).map_err(|e| MenuError::config(e.message()))
    }

    /// ~/.menuctl
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".menuctl")
    }

    /// ~/.menuctl/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Catalog to load: flag/env, then config, then ~/.menuctl/catalog.yaml
    pub fn catalog_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.catalog.as_deref().map(expand_home))
            .unwrap_or_else(|| Self::config_dir().join("catalog.yaml"))
    }

    /// Log file: flag, then config, then ~/.menuctl/menuctl.log
    pub fn log_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.log_file.as_deref().map(expand_home))
            .unwrap_or_else(|| Self::config_dir().join("menuctl.log"))
    }

    /// Runner for catalog commands
    pub fn shell_runner(&self) -> ShellRunner {
        match &self.shell {
            Some(shell) => {
                let flag = self.shell_flag.as_deref().unwrap_or("-c");
                ShellRunner::with_shell(shell, flag)
            }
            None => ShellRunner::new(),
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
