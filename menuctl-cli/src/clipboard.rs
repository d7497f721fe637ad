//! System clipboard via cli-clipboard

use async_trait::async_trait;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use menuctl_core::{Clipboard, ClipboardError};
use tracing::debug;

/// Writes to the platform clipboard on a blocking thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let contents = text.to_string();

        // cli-clipboard errors are not Send; flatten them to strings here
        let result = tokio::task::spawn_blocking(move || {
            let mut ctx = ClipboardContext::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            ctx.set_contents(contents)
                .map_err(|e| ClipboardError::Write(e.to_string()))
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(join_err) => {
                debug!(error = %join_err, "clipboard task did not complete");
                Err(ClipboardError::Unknown)
            }
        }
    }
}
