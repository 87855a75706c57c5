// Copies the finished book to the system clipboard

use anyhow::{Context, Result};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait MarkdownClipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Backed by `arboard`. The handle is opened on first use and kept, since
/// some X11 setups drop the selection when its owner goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl MarkdownClipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("Failed to access the clipboard")?);
        }

        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_string())
                .context("Failed to copy to the clipboard")?;
        }
        Ok(())
    }
}
