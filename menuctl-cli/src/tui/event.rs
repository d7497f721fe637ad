//! Event handling for the TUI
//!
//! Maps crossterm key and mouse events onto the menu's semantic inputs.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use menuctl_core::Input;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate a terminal event, `None` for anything the menu ignores
pub fn map_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

/// Handle a key event
pub fn map_key(key: &KeyEvent) -> Option<Input> {
    // Some platforms report release and repeat too; act once per press
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global quit shortcut (Ctrl+C)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Input::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => Some(Input::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Input::Down),

        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char(' ') => Some(Input::Confirm),

        // Pane cycling
        KeyCode::Tab | KeyCode::BackTab => Some(Input::CycleFocus),

        _ => None,
    }
}

/// Mouse wheel scrolls the focused panel
pub fn map_mouse(mouse: &MouseEvent) -> Option<Input> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Input::Up),
        MouseEventKind::ScrollDown => Some(Input::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_event(&press(KeyCode::Up)), Some(Input::Up));
        assert_eq!(map_event(&press(KeyCode::Char('j'))), Some(Input::Down));
        assert_eq!(map_event(&press(KeyCode::Enter)), Some(Input::Confirm));
        assert_eq!(map_event(&press(KeyCode::Tab)), Some(Input::CycleFocus));
        assert_eq!(map_event(&press(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(map_event(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&key), Some(Input::Quit));

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&key), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&key), None);
    }

    #[test]
    fn test_mouse_wheel() {
        let wheel = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_mouse(&wheel(MouseEventKind::ScrollUp)), Some(Input::Up));
        assert_eq!(map_mouse(&wheel(MouseEventKind::ScrollDown)), Some(Input::Down));
        assert_eq!(map_mouse(&wheel(MouseEventKind::Down(MouseButton::Left))), None);
    }
}
