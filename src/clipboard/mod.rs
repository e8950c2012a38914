//! Clipboard access with a headless fallback.
//!
//! [`open_clipboard`] hands back the system clipboard when one can be opened and
//! a [`NullClipboard`] otherwise, so callers never branch on availability: a
//! failed copy is reported to the user and the text is still shown.

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::warn;

/// Maximum clipboard size (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Destination for copied text
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Whether copies can succeed at all
    fn is_available(&self) -> bool {
        true
    }
}

/// System clipboard via arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Stand-in used when no system clipboard exists (headless hosts, CI)
#[derive(Debug, Default)]
pub struct NullClipboard;

impl ClipboardProvider for NullClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        anyhow::bail!("Clipboard unavailable on this system")
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// System clipboard if it initializes, otherwise [`NullClipboard`]
pub fn open_clipboard() -> Box<dyn ClipboardProvider> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            warn!("{:#}; copied text will only be displayed", e);
            Box::new(NullClipboard)
        }
    }
}

/// Validates clipboard text without accessing the clipboard
fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// Validate `text` and hand it to `provider`
///
/// # Errors
/// Returns error if:
/// - Text is empty or larger than 10MB
/// - Clipboard is locked by another process or access is denied
/// - No system clipboard exists (headless environment)
pub fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}
