//! Panel focus state machine
//!
//! Three panels share the screen and exactly one of them receives input at a
//! time. Focus is a single value, so holding it in two places at once is not
//! representable; every change reports the panel that gave focus up.

use tracing::debug;

/// Which panel currently receives directional and confirm input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusState {
    /// Category list (left)
    #[default]
    Categories,
    /// Item list (middle)
    Items,
    /// Output log (right)
    Output,
}

impl FocusState {
    /// All panels in cycle order
    pub const ALL: [FocusState; 3] = [FocusState::Categories, FocusState::Items, FocusState::Output];

    /// The panel after this one, wrapping
    pub fn next(self) -> Self {
        match self {
            FocusState::Categories => FocusState::Items,
            FocusState::Items => FocusState::Output,
            FocusState::Output => FocusState::Categories,
        }
    }

    /// Display name for panel titles and the status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            FocusState::Categories => "CATEGORIES",
            FocusState::Items => "ITEMS",
            FocusState::Output => "OUTPUT",
        }
    }
}

/// A completed focus hand-over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Panel that released input
    pub from: FocusState,
    /// Panel that now holds input
    pub to: FocusState,
}

/// Owns the focus state
#[derive(Debug, Clone, Default)]
pub struct FocusController {
    current: FocusState,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FocusState {
        self.current
    }

    /// True if `panel` holds input
    pub fn is_focused(&self, panel: FocusState) -> bool {
        self.current == panel
    }

    /// Advance Categories → Items → Output → Categories
    pub fn cycle(&mut self) -> FocusState {
        let target = self.current.next();
        self.set(target);
        self.current
    }

    /// Move focus to `target`; `None` if it was already there
    pub fn set(&mut self, target: FocusState) -> Option<FocusChange> {
        if self.current == target {
            return None;
        }

        let change = FocusChange {
            from: self.current,
            to: target,
        };
        self.current = target;
        debug!(from = ?change.from, to = ?change.to, "focus changed");
        Some(change)
    }
}
