//! Clipboard Source Abstraction
//!
//! Read-only access to the most recently copied text. The selection monitor
//! polls this at a fixed interval; the trait keeps the OS clipboard bridge
//! out of the core so tests and headless hosts can substitute their own
//! source. `MemoryClipboard` is the in-process implementation used by tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Read-only source of the most recently copied text.
#[async_trait]
pub trait ClipboardSource: Send + Sync {
    /// The current clipboard text, or `None` when the clipboard is empty or
    /// holds non-text content.
    async fn read_text(&self) -> Option<String>;
}

/// In-memory clipboard, for tests and hosts without a native bridge.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Arc<RwLock<Option<String>>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard content.
    pub async fn set_text(&self, text: impl Into<String>) {
        *self.content.write().await = Some(text.into());
    }

    /// Clear the clipboard.
    pub async fn clear(&self) {
        *self.content.write().await = None;
    }
}

#[async_trait]
impl ClipboardSource for MemoryClipboard {
    async fn read_text(&self) -> Option<String> {
        self.content.read().await.clone()
    }
}
