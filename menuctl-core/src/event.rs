//! Events flowing through the menu loop
//!
//! Terminal input is reduced to a handful of semantic [`Input`]s, the menu
//! turns those into [`MenuEvent`]s, and applying an event yields [`Effect`]s
//! for the loop to carry out.

use crate::catalog::CatalogItem;

/// Semantic input delivered once per user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move the highlight up in the focused panel
    Up,
    /// Move the highlight down in the focused panel
    Down,
    /// Confirm the highlighted row
    Confirm,
    /// Hand focus to the next panel
    CycleFocus,
    Quit,
}

/// State transitions the menu understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// A category was confirmed and is now active
    CategoryChanged(usize),
    /// An item was confirmed in the active category
    ItemChosen { category: usize, item: usize },
    /// Focus moved to the next panel
    FocusCycled,
    /// Highlight moved within the focused panel (negative is up)
    HighlightMoved(isize),
    Quit,
}

/// Side effects requested by the menu, executed by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the item's action
    Dispatch(CatalogItem),
    /// Screen contents changed
    Redraw,
    /// Leave the application
    Quit,
}
