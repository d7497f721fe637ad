pub mod catalog;
pub mod clipboard;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod exec;
pub mod focus;
pub mod menu;
pub mod output;
pub mod selection;

pub use catalog::{Catalog, CatalogFormat, CatalogItem, Category, InternalAction, ItemKind};
pub use clipboard::{Clipboard, ClipboardError};
pub use dispatch::{DispatchEvent, DispatchId, Dispatched, Dispatcher};
pub use error::{MenuError, Result};
pub use event::{Effect, Input, MenuEvent};
pub use exec::{CommandOutput, CommandRunner, ExecError, ShellRunner};
pub use focus::{FocusChange, FocusController, FocusState};
pub use menu::Menu;
pub use output::OutputLog;
pub use selection::SelectionCursor;
