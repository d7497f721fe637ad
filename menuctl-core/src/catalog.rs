//! Catalog model and loader
//!
//! The catalog is a two-level tree: categories, each holding an ordered list
//! of actionable items. It is loaded once at startup and never mutated.
//!
//! Document shape (YAML shown, JSON and TOML carry the same fields):
//!
//! ```yaml
//! categories:
//!   - name: Git
//!     items:
//!       - { name: status, kind: command, command: git status }
//!       - { name: main, kind: copy }
//!       - { name: Clear output, kind: action, action: clear-output }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{MenuError, Result};

/// Identifier of the only built-in internal action.
pub const CLEAR_OUTPUT: &str = "clear-output";

/// What a catalog item does when dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Run the payload as a shell command
    RunCommand,
    /// Copy the item's display name to the clipboard
    CopyText,
    /// Perform an in-app action named by the payload
    InternalAction,
}

impl ItemKind {
    /// Short label used in the item panel
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::RunCommand => "run",
            ItemKind::CopyText => "copy",
            ItemKind::InternalAction => "action",
        }
    }
}

/// In-app actions an `InternalAction` item may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalAction {
    /// Truncate the output log to empty
    ClearOutput,
}

impl InternalAction {
    /// Resolve an action identifier; `None` for identifiers we don't know
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim() {
            CLEAR_OUTPUT => Some(InternalAction::ClearOutput),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            InternalAction::ClearOutput => CLEAR_OUTPUT,
        }
    }
}

/// A single actionable entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    name: String,
    kind: ItemKind,
    payload: String,
}

impl CatalogItem {
    /// Item that runs `command` through the shell
    pub fn command(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::RunCommand,
            payload: command.into(),
        }
    }

    /// Item that copies its own name to the clipboard
    pub fn copy(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            payload: name.clone(),
            name,
            kind: ItemKind::CopyText,
        }
    }

    /// Item that performs the in-app action `action_id`
    pub fn action(name: impl Into<String>, action_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::InternalAction,
            payload: action_id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Command text for `RunCommand`, action identifier for `InternalAction`,
    /// display name for `CopyText`
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind.label())
    }
}

/// A named group of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    items: Vec<CatalogItem>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

/// The whole menu tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

/// On-disk formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
    Toml,
}

impl CatalogFormat {
    /// Pick a format from the file extension (YAML when unknown)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => CatalogFormat::Json,
            Some("toml") => CatalogFormat::Toml,
            _ => CatalogFormat::Yaml,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogFormat::Yaml => "YAML",
            CatalogFormat::Json => "JSON",
            CatalogFormat::Toml => "TOML",
        }
    }
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Load and validate a catalog file
    ///
    /// Any failure is fatal: a catalog is either loaded whole or not at all.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MenuError::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| MenuError::io(path, e))?;
        let format = CatalogFormat::from_path(path);
        let catalog = Self::parse(&content, format, path)?;

        debug!(
            path = %path.display(),
            format = format.name(),
            categories = catalog.len(),
            items = catalog.item_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse catalog text in the given format
    ///
    /// `origin` is only used for error messages.
    pub fn parse(content: &str, format: CatalogFormat, origin: impl AsRef<Path>) -> Result<Self> {
        let origin = origin.as_ref();
        let raw: RawCatalog = match format {
            CatalogFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| MenuError::parse(origin, format.name(), e))?
            }
            CatalogFormat::Json => {
                serde_json::from_str(content).map_err(|e| MenuError::parse(origin, format.name(), e))?
            }
            CatalogFormat::Toml => {
                toml::from_str(content).map_err(|e| MenuError::parse(origin, format.name(), e))?
            }
        };

        raw.validate()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Items of category `index` (empty when out of range)
    pub fn items(&self, index: usize) -> &[CatalogItem] {
        self.categories
            .get(index)
            .map(|c| c.items())
            .unwrap_or(&[])
    }

    pub fn item(&self, category: usize, item: usize) -> Option<&CatalogItem> {
        self.items(category).get(item)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total items across all categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

// Wire shape of the catalog document. Kept separate from the domain types so
// that invariants are checked once, in `validate`.

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    kind: RawKind,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    #[serde(alias = "run")]
    Command,
    #[serde(alias = "clipboard")]
    Copy,
    #[serde(alias = "internal")]
    Action,
}

impl RawCatalog {
    fn validate(self) -> Result<Catalog> {
        let mut categories = Vec::with_capacity(self.categories.len());

        for raw_category in self.categories {
            let mut items = Vec::with_capacity(raw_category.items.len());

            for raw_item in raw_category.items {
                let item = match raw_item.kind {
                    RawKind::Command => {
                        let command = raw_item.command.unwrap_or_default();
                        if command.trim().is_empty() {
                            return Err(MenuError::invalid_catalog(
                                &raw_category.name,
                                &raw_item.name,
                                "kind 'command' requires a non-empty 'command'",
                            ));
                        }
                        CatalogItem::command(raw_item.name, command)
                    }
                    RawKind::Copy => CatalogItem::copy(raw_item.name),
                    RawKind::Action => {
                        let action = raw_item.action.unwrap_or_default();
                        if action.trim().is_empty() {
                            return Err(MenuError::invalid_catalog(
                                &raw_category.name,
                                &raw_item.name,
                                "kind 'action' requires an 'action' identifier",
                            ));
                        }
                        if InternalAction::from_id(&action).is_none() {
                            warn!(
                                category = %raw_category.name,
                                item = %raw_item.name,
                                action = %action,
                                "unrecognized internal action; item will do nothing"
                            );
                        }
                        CatalogItem::action(raw_item.name, action)
                    }
                };
                items.push(item);
            }

            categories.push(Category::new(raw_category.name, items));
        }

        Ok(Catalog::new(categories))
    }
}
