//! Clipboard collaborator
//!
//! Platform access lives in the binary; the core only needs success or a
//! failure message.

use async_trait::async_trait;

/// Error while writing to the clipboard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing provider)
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard opened but rejected the contents
    #[error("{0}")]
    Write(String),

    /// Failure without any detail
    #[error("unknown error")]
    Unknown,
}

impl ClipboardError {
    /// Human-readable detail, `None` when there is nothing to show
    pub fn detail(&self) -> Option<String> {
        match self {
            ClipboardError::Unknown => None,
            ClipboardError::Write(msg) if msg.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}
