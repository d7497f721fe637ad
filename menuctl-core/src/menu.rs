//! Menu state and reducer
//!
//! `Menu` owns the catalog, the confirmed selection, panel focus, per-panel
//! highlights, and the output log. Input handling is split into two pure
//! steps so each can be tested without a terminal:
//!
//! 1. [`Menu::interpret`] maps a semantic [`Input`] to a [`MenuEvent`] based on
//!    which panel has focus.
//! 2. [`Menu::apply`] folds the event into state and returns the [`Effect`]s the
//!    event loop must perform.

use tracing::debug;

use crate::catalog::{Catalog, CatalogItem};
use crate::dispatch::{DispatchEvent, Dispatched, Dispatcher};
use crate::event::{Effect, Input, MenuEvent};
use crate::focus::{FocusController, FocusState};
use crate::output::OutputLog;
use crate::selection::SelectionCursor;

#[derive(Debug)]
pub struct Menu {
    catalog: Catalog,
    cursor: SelectionCursor,
    focus: FocusController,
    /// Row the category panel's highlight sits on
    category_highlight: usize,
    /// Row the item panel's highlight sits on
    item_highlight: usize,
    /// Lines scrolled back from the tail of the log (0 follows new output)
    output_scroll: usize,
    log: OutputLog,
}

impl Menu {
    pub fn new(catalog: Catalog, log: OutputLog) -> Self {
        Self {
            catalog,
            cursor: SelectionCursor::new(),
            focus: FocusController::new(),
            category_highlight: 0,
            item_highlight: 0,
            output_scroll: 0,
            log,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    pub fn focus(&self) -> FocusState {
        self.focus.current()
    }

    pub fn is_focused(&self, panel: FocusState) -> bool {
        self.focus.is_focused(panel)
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn category_highlight(&self) -> usize {
        self.category_highlight
    }

    pub fn item_highlight(&self) -> usize {
        self.item_highlight
    }

    pub fn output_scroll(&self) -> usize {
        self.output_scroll
    }

    /// Items of the confirmed category, in catalog order
    pub fn active_items(&self) -> &[CatalogItem] {
        self.cursor.active_items(&self.catalog)
    }

    /// Interpret then apply a semantic input
    pub fn handle_input(&mut self, input: Input) -> Vec<Effect> {
        match self.interpret(input) {
            Some(event) => self.apply(event),
            None => Vec::new(),
        }
    }

    /// Resolve `input` against the focused panel
    pub fn interpret(&self, input: Input) -> Option<MenuEvent> {
        match input {
            Input::Up => Some(MenuEvent::HighlightMoved(-1)),
            Input::Down => Some(MenuEvent::HighlightMoved(1)),
            Input::CycleFocus => Some(MenuEvent::FocusCycled),
            Input::Quit => Some(MenuEvent::Quit),
            Input::Confirm => match self.focus.current() {
                FocusState::Categories if !self.catalog.is_empty() => {
                    Some(MenuEvent::CategoryChanged(self.category_highlight))
                }
                FocusState::Items if !self.active_items().is_empty() => Some(MenuEvent::ItemChosen {
                    category: self.cursor.category_index(),
                    item: self.item_highlight,
                }),
                _ => None,
            },
        }
    }

    /// Fold `event` into state
    pub fn apply(&mut self, event: MenuEvent) -> Vec<Effect> {
        match event {
            MenuEvent::CategoryChanged(index) => {
                if self.cursor.select_category(index, &self.catalog).is_none() {
                    return Vec::new();
                }
                self.category_highlight = index;
                self.item_highlight = 0;
                if self.focus.is_focused(FocusState::Categories) {
                    self.focus.set(FocusState::Items);
                }
                debug!(category = index, "category confirmed");
                vec![Effect::Redraw]
            }
            MenuEvent::ItemChosen { category, item } => {
                // Stale event from before a category switch
                if category != self.cursor.category_index() {
                    return Vec::new();
                }
                if self.cursor.select_item(item, &self.catalog).is_none() {
                    return Vec::new();
                }
                self.item_highlight = item;
                self.cursor
                    .current_item(&self.catalog)
                    .map(|chosen| vec![Effect::Dispatch(chosen.clone())])
                    .unwrap_or_default()
            }
            MenuEvent::FocusCycled => {
                self.focus.cycle();
                vec![Effect::Redraw]
            }
            MenuEvent::HighlightMoved(delta) => {
                if self.move_highlight(delta) {
                    vec![Effect::Redraw]
                } else {
                    Vec::new()
                }
            }
            MenuEvent::Quit => vec![Effect::Quit],
        }
    }

    /// Hand `item` to the dispatcher with this menu's log
    pub fn dispatch(&mut self, dispatcher: &mut Dispatcher, item: &CatalogItem) -> Dispatched {
        let before = (self.log.len(), self.log.total_appended());
        let dispatched = dispatcher.dispatch(item, &mut self.log);
        self.after_log_change(before);
        dispatched
    }

    /// Apply a completed dispatch to the log
    pub fn record(&mut self, event: DispatchEvent) {
        let before = (self.log.len(), self.log.total_appended());
        event.apply(&mut self.log);
        self.after_log_change(before);
    }

    fn move_highlight(&mut self, delta: isize) -> bool {
        match self.focus.current() {
            FocusState::Categories => {
                let len = self.catalog.len();
                let next = wrap(self.category_highlight, delta, len);
                let changed = next != self.category_highlight;
                self.category_highlight = next;
                changed
            }
            FocusState::Items => {
                let len = self.active_items().len();
                let next = wrap(self.item_highlight, delta, len);
                let changed = next != self.item_highlight;
                self.item_highlight = next;
                changed
            }
            FocusState::Output => {
                // Up scrolls back in history, down toward the tail
                let max = self.log.len().saturating_sub(1);
                let next = if delta < 0 {
                    self.output_scroll.saturating_add(delta.unsigned_abs()).min(max)
                } else {
                    self.output_scroll.saturating_sub(delta.unsigned_abs())
                };
                let changed = next != self.output_scroll;
                self.output_scroll = next;
                changed
            }
        }
    }

    /// Keep a scrolled-back view anchored while new lines arrive
    ///
    /// `before` is `(len, total_appended)` taken ahead of the change. The
    /// offset grows by the lines appended, not by the change in length, so
    /// the view holds still when a capped log evicts from the front.
    fn after_log_change(&mut self, (before_len, before_total): (usize, usize)) {
        let now = self.log.len();
        let appended = self.log.total_appended() - before_total;
        // Eviction never shrinks a log below its previous length; only clear does
        if now < before_len {
            self.output_scroll = 0;
        } else if self.output_scroll > 0 {
            self.output_scroll += appended;
        }
        self.output_scroll = self.output_scroll.min(now.saturating_sub(1));
    }
}

/// Step `current` by `delta` within `0..len`, wrapping at both ends
fn wrap(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (current as isize + delta).rem_euclid(len) as usize
}
