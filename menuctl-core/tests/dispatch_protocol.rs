//! Dispatch protocol tests
//!
//! Drive the dispatcher with fake collaborators and check what lands in the
//! output log and in which order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use menuctl_core::{
    Catalog, CatalogFormat, CatalogItem, Clipboard, ClipboardError, CommandOutput, CommandRunner,
    DispatchEvent, Dispatcher, Effect, ExecError, Input, Menu, OutputLog,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;

/// Answers each command from a script, after an optional delay
#[derive(Default)]
struct ScriptedRunner {
    replies: HashMap<String, (Duration, Result<CommandOutput, String>)>,
}

impl ScriptedRunner {
    fn reply(mut self, command: &str, delay_ms: u64, stdout: &str) -> Self {
        self.replies.insert(
            command.to_string(),
            (Duration::from_millis(delay_ms), Ok(CommandOutput::from_stdout(stdout))),
        );
        self
    }

    fn fail(mut self, command: &str, stderr: &str) -> Self {
        self.replies
            .insert(command.to_string(), (Duration::ZERO, Err(stderr.to_string())));
        self
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, ExecError> {
        let Some((delay, reply)) = self.replies.get(command).cloned() else {
            return Err(ExecError::Unknown);
        };
        tokio::time::sleep(delay).await;
        reply.map_err(|stderr| ExecError::Failed {
            code: Some(1),
            stderr,
        })
    }
}

/// Blocks until released, then returns `output`
struct GatedRunner {
    gate: Arc<Notify>,
    output: CommandOutput,
}

#[async_trait]
impl CommandRunner for GatedRunner {
    async fn run(&self, _command: &str) -> Result<CommandOutput, ExecError> {
        self.gate.notified().await;
        Ok(self.output.clone())
    }
}

/// Records every write and answers with a fixed result
struct FakeClipboard {
    result: Result<(), ClipboardError>,
    writes: Mutex<Vec<String>>,
}

impl FakeClipboard {
    fn ok() -> Self {
        Self::with_result(Ok(()))
    }

    fn with_result(result: Result<(), ClipboardError>) -> Self {
        Self {
            result,
            writes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        self.result.clone()
    }
}

fn dispatcher(
    runner: impl CommandRunner + 'static,
    clipboard: Arc<FakeClipboard>,
) -> (Dispatcher, UnboundedReceiver<DispatchEvent>) {
    Dispatcher::new(Arc::new(runner), clipboard)
}

#[tokio::test]
async fn run_command_echo_precedes_output() {
    let gate = Arc::new(Notify::new());
    let runner = GatedRunner {
        gate: Arc::clone(&gate),
        output: CommandOutput::from_stdout("done\n"),
    };
    let (mut dispatcher, mut rx) = dispatcher(runner, Arc::new(FakeClipboard::ok()));
    let mut log = OutputLog::new();

    let dispatched = dispatcher.dispatch(&CatalogItem::command("slow", "sleep 10"), &mut log);

    // Echo is visible while the command is still blocked
    assert!(dispatched.redraw);
    assert_eq!(log.lines(), vec!["$ sleep 10"]);
    assert!(rx.try_recv().is_err());

    gate.notify_one();
    let event = rx.recv().await.unwrap();
    assert_eq!(event.id, dispatched.id);
    event.apply(&mut log);

    assert_eq!(log.lines(), vec!["$ sleep 10", "done"]);
}

#[tokio::test]
async fn git_status_scenario() {
    let json = r#"{"categories": [{"name": "Git", "items": [
        {"name": "status", "kind": "command", "command": "git status"}
    ]}]}"#;
    let catalog = Catalog::parse(json, CatalogFormat::Json, "scenario.json").unwrap();
    let mut menu = Menu::new(catalog, OutputLog::new());

    let runner = ScriptedRunner::default().reply("git status", 0, "clean");
    let (mut dispatcher, mut rx) = dispatcher(runner, Arc::new(FakeClipboard::ok()));

    menu.handle_input(Input::Confirm);
    let effects = menu.handle_input(Input::Confirm);
    let item = match effects.as_slice() {
        [Effect::Dispatch(item)] => item.clone(),
        other => panic!("expected a single dispatch, got {:?}", other),
    };

    menu.dispatch(&mut dispatcher, &item);
    menu.record(rx.recv().await.unwrap());

    assert_eq!(menu.log().lines(), vec!["$ git status", "clean"]);
}

#[tokio::test]
async fn copy_text_success_appends_exactly_one_line() {
    let clipboard = Arc::new(FakeClipboard::ok());
    let (mut dispatcher, mut rx) = dispatcher(ScriptedRunner::default(), Arc::clone(&clipboard));
    let mut log = OutputLog::new();

    let dispatched = dispatcher.dispatch(&CatalogItem::copy("foo"), &mut log);
    assert!(!dispatched.redraw);
    assert!(log.is_empty());

    rx.recv().await.unwrap().apply(&mut log);

    assert_eq!(log.lines(), vec!["Copied to clipboard: foo"]);
    assert_eq!(*clipboard.writes.lock().unwrap(), vec!["foo".to_string()]);
}

#[tokio::test]
async fn copy_text_failure_is_reported() {
    let clipboard = Arc::new(FakeClipboard::with_result(Err(ClipboardError::Unavailable(
        "no display".into(),
    ))));
    let (mut dispatcher, mut rx) = dispatcher(ScriptedRunner::default(), clipboard);
    let mut log = OutputLog::new();

    dispatcher.dispatch(&CatalogItem::copy("foo"), &mut log);
    rx.recv().await.unwrap().apply(&mut log);

    assert_eq!(
        log.lines(),
        vec!["Error copying to clipboard: clipboard unavailable: no display"]
    );
}

#[tokio::test]
async fn clear_output_empties_log_immediately() {
    let (mut dispatcher, mut rx) = dispatcher(ScriptedRunner::default(), Arc::new(FakeClipboard::ok()));
    let mut log = OutputLog::new();
    log.append_many(["$ ls", "a", "b"]);

    let dispatched =
        dispatcher.dispatch(&CatalogItem::action("Clear", "clear-output"), &mut log);

    assert!(dispatched.redraw);
    assert!(dispatched.task.is_none());
    assert_eq!(log.len(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn unknown_internal_action_leaves_log_but_redraws() {
    let (mut dispatcher, mut rx) = dispatcher(ScriptedRunner::default(), Arc::new(FakeClipboard::ok()));
    let mut log = OutputLog::new();
    log.append("keep");

    let dispatched = dispatcher.dispatch(&CatalogItem::action("?", "frobnicate"), &mut log);

    // Completes on the spot: one redraw, nothing appended, nothing queued
    assert!(dispatched.redraw);
    assert!(dispatched.task.is_none());
    assert_eq!(log.lines(), vec!["keep"]);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn concurrent_commands_land_in_completion_order() {
    let runner = ScriptedRunner::default()
        .reply("slow", 50, "slow output")
        .reply("fast", 5, "fast output");
    let (mut dispatcher, mut rx) = dispatcher(runner, Arc::new(FakeClipboard::ok()));
    let mut log = OutputLog::new();

    let first = dispatcher.dispatch(&CatalogItem::command("a", "slow"), &mut log);
    let second = dispatcher.dispatch(&CatalogItem::command("b", "fast"), &mut log);
    assert_ne!(first.id, second.id);

    let done_first = rx.recv().await.unwrap();
    let done_second = rx.recv().await.unwrap();
    assert_eq!(done_first.id, second.id);
    assert_eq!(done_second.id, first.id);
    done_first.apply(&mut log);
    done_second.apply(&mut log);

    let lines = log.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines.contains(&"slow output".to_string()));
    assert!(lines.contains(&"fast output".to_string()));

    // One completion per dispatch, nothing more
    first.task.unwrap().await.unwrap();
    second.task.unwrap().await.unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failed_command_appends_single_error_line() {
    let runner = ScriptedRunner::default().fail("git push", "fatal: no upstream\nhint: set one\n");
    let (mut dispatcher, mut rx) = dispatcher(runner, Arc::new(FakeClipboard::ok()));
    let mut log = OutputLog::new();

    dispatcher.dispatch(&CatalogItem::command("push", "git push"), &mut log);
    rx.recv().await.unwrap().apply(&mut log);

    assert_eq!(
        log.lines(),
        vec!["$ git push", "Error: fatal: no upstream hint: set one"]
    );
}

#[tokio::test]
async fn failure_without_message_uses_generic_line() {
    let (mut dispatcher, mut rx) = dispatcher(ScriptedRunner::default(), Arc::new(FakeClipboard::ok()));
    let mut log = OutputLog::new();

    dispatcher.dispatch(&CatalogItem::command("?", "unscripted"), &mut log);
    rx.recv().await.unwrap().apply(&mut log);

    assert_eq!(log.lines(), vec!["$ unscripted", "An unknown error occurred"]);
}

#[tokio::test]
async fn dispatch_survives_closed_event_loop() {
    let (mut dispatcher, rx) = dispatcher(
        ScriptedRunner::default().reply("echo hi", 0, "hi"),
        Arc::new(FakeClipboard::ok()),
    );
    drop(rx);
    let mut log = OutputLog::new();

    let dispatched = dispatcher.dispatch(&CatalogItem::command("hi", "echo hi"), &mut log);
    dispatched.task.unwrap().await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn shell_runner_end_to_end() {
    let (mut dispatcher, mut rx) = Dispatcher::new(
        Arc::new(menuctl_core::ShellRunner::new()),
        Arc::new(FakeClipboard::ok()),
    );
    let mut log = OutputLog::new();

    dispatcher.dispatch(
        &CatalogItem::command("both", "printf 'one\\ntwo\\n'; echo oops 1>&2"),
        &mut log,
    );
    rx.recv().await.unwrap().apply(&mut log);

    assert_eq!(
        log.lines(),
        vec![
            "$ printf 'one\\ntwo\\n'; echo oops 1>&2",
            "one",
            "two",
            "stderr: oops"
        ]
    );
}
