//! Confirmed selection: which category is active and which item was chosen
//!
//! The active item set is always derived from `category_index`, so switching
//! category swaps the items in the same call that resets `item_index`.

use crate::catalog::{Catalog, CatalogItem};
use crate::event::MenuEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    category_index: usize,
    item_index: usize,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_index(&self) -> usize {
        self.category_index
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Make category `index` active
    ///
    /// Always resets `item_index` to 0, even when re-selecting the current
    /// category. Returns `None` if `index` is out of range.
    pub fn select_category(&mut self, index: usize, catalog: &Catalog) -> Option<MenuEvent> {
        if index >= catalog.len() {
            return None;
        }

        self.category_index = index;
        self.item_index = 0;
        Some(MenuEvent::CategoryChanged(index))
    }

    /// Choose item `index` of the active category
    pub fn select_item(&mut self, index: usize, catalog: &Catalog) -> Option<MenuEvent> {
        if index >= self.active_items(catalog).len() {
            return None;
        }

        self.item_index = index;
        Some(MenuEvent::ItemChosen {
            category: self.category_index,
            item: index,
        })
    }

    /// Items of the active category, in catalog order
    pub fn active_items<'a>(&self, catalog: &'a Catalog) -> &'a [CatalogItem] {
        catalog.items(self.category_index)
    }

    /// Item under the cursor, if the active category has any
    pub fn current_item<'a>(&self, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
        catalog.item(self.category_index, self.item_index)
    }

    /// Clamp indices back into range after the catalog view changed
    pub fn revalidate(&mut self, catalog: &Catalog) {
        if self.category_index >= catalog.len() {
            self.category_index = 0;
            self.item_index = 0;
            return;
        }
        if self.item_index >= self.active_items(catalog).len() {
            self.item_index = 0;
        }
    }
}
