//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use menuctl_core::{DispatchEvent, Dispatcher, Effect, Menu};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use super::event::{map_event, poll_event};
use super::ui;

/// How long to wait for input before checking for finished dispatches
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the menu until the user quits
///
/// Must be called from within a tokio runtime; dispatches spawn tasks on it.
pub fn run(
    mut menu: Menu,
    mut dispatcher: Dispatcher,
    mut events: UnboundedReceiver<DispatchEvent>,
) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_loop(&mut terminal, &mut menu, &mut dispatcher, &mut events);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
///
/// Single thread of control: input events and dispatch completions are both
/// applied here, and the screen is drawn only when something asked for it.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    menu: &mut Menu,
    dispatcher: &mut Dispatcher,
    events: &mut UnboundedReceiver<DispatchEvent>,
) -> Result<()> {
    let mut needs_redraw = true;
    let mut running = 0usize;

    loop {
        // Finished dispatches: one append and one redraw request each
        while let Ok(done) = events.try_recv() {
            debug!(id = done.id.0, item = %done.item, lines = done.lines.len(), "dispatch completed");
            menu.record(done);
            running = running.saturating_sub(1);
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|frame| ui::render(frame, menu, running))?;
            needs_redraw = false;
        }

        let Some(event) = poll_event(POLL_INTERVAL)? else {
            continue;
        };

        if let Event::Resize(_, _) = event {
            needs_redraw = true;
            continue;
        }

        let Some(input) = map_event(&event) else {
            continue;
        };

        for effect in menu.handle_input(input) {
            match effect {
                Effect::Redraw => needs_redraw = true,
                Effect::Dispatch(item) => {
                    let dispatched = menu.dispatch(dispatcher, &item);
                    if dispatched.task.is_some() {
                        running += 1;
                    }
                    needs_redraw |= dispatched.redraw;
                }
                Effect::Quit => {
                    info!(in_flight = running, "quit requested");
                    return Ok(());
                }
            }
        }
    }
}
