//! Process execution collaborator
//!
//! Provides a trait for running catalog commands, with:
//! - Real implementation using tokio::process and the user's shell
//! - Test doubles live next to the tests that need them

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn from_stdout(text: impl Into<String>) -> Self {
        Self {
            stdout: text.into(),
            stderr: String::new(),
        }
    }
}

/// Error while running a command
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The shell could not be started
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command ran and reported failure
    #[error("{}", failure_message(.code, .stderr))]
    Failed { code: Option<i32>, stderr: String },

    /// Failure without any detail
    #[error("unknown error")]
    Unknown,
}

impl ExecError {
    /// Human-readable detail, `None` when there is nothing to show
    pub fn detail(&self) -> Option<String> {
        match self {
            ExecError::Unknown => None,
            other => Some(other.to_string()),
        }
    }
}

fn failure_message(code: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    match (*code, stderr.is_empty()) {
        (_, false) => stderr.to_string(),
        (Some(code), true) => format!("command exited with status {}", code),
        (None, true) => "command terminated by signal".to_string(),
    }
}

/// Runs a command string, returning its captured output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<CommandOutput, ExecError>;
}

/// Real runner: `<shell> <flag> <command>` with piped output
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: String,
    flag: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        if cfg!(windows) {
            Self::with_shell("cmd", "/C")
        } else {
            Self::with_shell("sh", "-c")
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `program flag <command>` instead of the platform shell
    pub fn with_shell(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, ExecError> {
        debug!(shell = %self.program, command, "spawning command");

        // stdin is closed: the terminal belongs to the UI
        let output = Command::new(&self.program)
            .arg(&self.flag)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ExecError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ExecError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
