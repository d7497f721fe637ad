//! Action dispatch and output capture
//!
//! `Dispatcher::dispatch` runs synchronously on the event loop for the parts
//! that must be visible at once (the `$ command` echo, clearing the log) and
//! spawns one task per asynchronous action. Tasks never touch the log: each
//! sends exactly one [`DispatchEvent`] back over a channel, and the loop
//! applies it as a single append. That keeps appends whole when several
//! dispatches are in flight, with results landing in completion order.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::catalog::{CatalogItem, InternalAction, ItemKind};
use crate::clipboard::{Clipboard, ClipboardError};
use crate::exec::{CommandOutput, CommandRunner, ExecError};
use crate::output::OutputLog;

/// Shell-prompt marker echoed before a command runs
pub const PROMPT: &str = "$ ";
/// Prefix for each line a command wrote to stderr
pub const STDERR_MARKER: &str = "stderr: ";
/// Line used when a failure carries no message
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Sequence number of a dispatch within this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchId(pub u64);

/// Completion of one asynchronous dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEvent {
    pub id: DispatchId,
    /// Display name of the dispatched item
    pub item: String,
    /// Lines to append, in order (may be empty)
    pub lines: Vec<String>,
}

impl DispatchEvent {
    /// Append this event's lines as one operation
    pub fn apply(self, log: &mut OutputLog) {
        log.append_many(self.lines);
    }
}

/// What happened synchronously when an item was dispatched
#[derive(Debug)]
pub struct Dispatched {
    pub id: DispatchId,
    /// The log changed during the call and should be redrawn now
    pub redraw: bool,
    /// Outstanding task; its `DispatchEvent` arrives on the channel
    pub task: Option<JoinHandle<()>>,
}

/// Executes catalog items against the process and clipboard collaborators
pub struct Dispatcher {
    runner: Arc<dyn CommandRunner>,
    clipboard: Arc<dyn Clipboard>,
    tx: UnboundedSender<DispatchEvent>,
    next_id: u64,
}

impl Dispatcher {
    /// Create a dispatcher and the receiving end of its completion channel
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        clipboard: Arc<dyn Clipboard>,
    ) -> (Self, UnboundedReceiver<DispatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            runner,
            clipboard,
            tx,
            next_id: 0,
        };
        (dispatcher, rx)
    }

    /// Run `item`'s action
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, item: &CatalogItem, log: &mut OutputLog) -> Dispatched {
        self.next_id += 1;
        let id = DispatchId(self.next_id);
        info!(id = id.0, item = %item.name(), kind = item.kind().label(), "dispatching");

        match item.kind() {
            ItemKind::RunCommand => {
                log.append(format!("{}{}", PROMPT, item.payload()));
                let task = self.spawn_command(id, item);
                Dispatched {
                    id,
                    redraw: true,
                    task: Some(task),
                }
            }
            ItemKind::CopyText => Dispatched {
                id,
                redraw: false,
                task: Some(self.spawn_copy(id, item)),
            },
            ItemKind::InternalAction => {
                run_internal(item, log);
                Dispatched {
                    id,
                    redraw: true,
                    task: None,
                }
            }
        }
    }

    fn spawn_command(&self, id: DispatchId, item: &CatalogItem) -> JoinHandle<()> {
        let runner = Arc::clone(&self.runner);
        let tx = self.tx.clone();
        let name = item.name().to_string();
        let command = item.payload().to_string();
        let span = info_span!("command", id = id.0, command = %command);

        tokio::spawn(
            async move {
                let result = runner.run(&command).await;
                if let Err(err) = &result {
                    warn!(error = %err, "command failed");
                }
                let lines = command_lines(result);
                debug!(lines = lines.len(), "command finished");
                send(&tx, DispatchEvent { id, item: name, lines });
            }
            .instrument(span),
        )
    }

    fn spawn_copy(&self, id: DispatchId, item: &CatalogItem) -> JoinHandle<()> {
        let clipboard = Arc::clone(&self.clipboard);
        let tx = self.tx.clone();
        let name = item.name().to_string();
        let span = info_span!("copy", id = id.0, item = %name);

        tokio::spawn(
            async move {
                let result = clipboard.set_text(&name).await;
                if let Err(err) = &result {
                    warn!(error = %err, "clipboard write failed");
                }
                let line = copy_line(&name, result);
                send(&tx, DispatchEvent { id, item: name, lines: vec![line] });
            }
            .instrument(span),
        )
    }
}

fn send(tx: &UnboundedSender<DispatchEvent>, event: DispatchEvent) {
    if tx.send(event).is_err() {
        debug!("event loop closed; dropping dispatch result");
    }
}

/// Internal actions complete synchronously, so the caller always redraws once
fn run_internal(item: &CatalogItem, log: &mut OutputLog) {
    match InternalAction::from_id(item.payload()) {
        Some(action @ InternalAction::ClearOutput) => {
            debug!(action = action.id(), cleared = log.len(), "internal action");
            log.clear();
        }
        None => {
            // Silent in the UI; candidate for stricter handling
            warn!(action = %item.payload(), item = %item.name(), "ignoring unknown internal action");
        }
    }
}

/// Log lines for a finished command
pub fn command_lines(result: Result<CommandOutput, ExecError>) -> Vec<String> {
    match result {
        Ok(output) => {
            let mut lines: Vec<String> = output.stdout.lines().map(str::to_string).collect();
            lines.extend(
                output
                    .stderr
                    .lines()
                    .map(|line| format!("{}{}", STDERR_MARKER, line)),
            );
            lines
        }
        Err(err) => vec![error_line("Error: ", err.detail())],
    }
}

/// Log line for a finished clipboard write
pub fn copy_line(name: &str, result: Result<(), ClipboardError>) -> String {
    match result {
        Ok(()) => format!("Copied to clipboard: {}", name),
        Err(err) => error_line("Error copying to clipboard: ", err.detail()),
    }
}

/// `prefix + detail` squeezed onto one line, or the generic unknown-error line
fn error_line(prefix: &str, detail: Option<String>) -> String {
    let message = detail
        .map(|d| {
            d.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|m| !m.is_empty());

    match message {
        Some(message) => format!("{}{}", prefix, message),
        None => UNKNOWN_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lines_stdout_then_stderr() {
        let lines = command_lines(Ok(CommandOutput {
            stdout: "a\nb\n".into(),
            stderr: "warning: x\n".into(),
        }));
        assert_eq!(lines, vec!["a", "b", "stderr: warning: x"]);
    }

    #[test]
    fn test_command_lines_empty_output() {
        assert!(command_lines(Ok(CommandOutput::default())).is_empty());
    }

    #[test]
    fn test_command_failure_is_single_line() {
        let lines = command_lines(Err(ExecError::Failed {
            code: Some(1),
            stderr: "line one\nline two\n".into(),
        }));
        assert_eq!(lines, vec!["Error: line one line two"]);
    }

    #[test]
    fn test_command_unknown_error() {
        assert_eq!(command_lines(Err(ExecError::Unknown)), vec![UNKNOWN_ERROR]);
    }

    #[test]
    fn test_copy_lines() {
        assert_eq!(copy_line("foo", Ok(())), "Copied to clipboard: foo");
        assert_eq!(
            copy_line("foo", Err(ClipboardError::Write("denied".into()))),
            "Error copying to clipboard: denied"
        );
        assert_eq!(copy_line("foo", Err(ClipboardError::Unknown)), UNKNOWN_ERROR);
    }

    #[test]
    fn test_unknown_internal_action_is_noop() {
        let mut log = OutputLog::new();
        log.append("keep me");

        run_internal(&CatalogItem::action("later", "reticulate-splines"), &mut log);
        assert_eq!(log.lines(), vec!["keep me"]);
    }
}
