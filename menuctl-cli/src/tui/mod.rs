//! Three-panel terminal menu
//!
//! - Categories (left): confirm to open a category
//! - Items (middle): confirm to run, copy, or act
//! - Output (right): transcript of everything dispatched this session

pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
