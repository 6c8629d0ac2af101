use std::sync::Mutex;

use anyhow::{Context, anyhow};
use arboard::Clipboard;

/// Destination for recognized text
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), anyhow::Error>;

    fn get_text(&self) -> Result<String, anyhow::Error>;
}

/// The OS clipboard.
///
/// Keep one instance alive for the whole process: on X11 the copied text
/// is served by the owning `Clipboard` and disappears when it is dropped.
pub struct SystemClipboard {
    inner: Mutex<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, anyhow::Error> {
        let clipboard = Clipboard::new().context("Failed to open clipboard")?;
        Ok(Self {
            inner: Mutex::new(clipboard),
        })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), anyhow::Error> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Clipboard lock poisoned"))?;
        clipboard
            .set_text(text.to_owned())
            .context("Failed to write clipboard")?;
        tracing::debug!("Wrote {} chars to clipboard", text.chars().count());
        Ok(())
    }

    fn get_text(&self) -> Result<String, anyhow::Error> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Clipboard lock poisoned"))?;
        clipboard.get_text().context("Failed to read clipboard")
    }
}
