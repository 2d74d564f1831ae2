use ch_app::{ClipboardError, ClipboardSource};
use ch_platform::WindowId;
use ch_platform_windows::clipboard;
use tracing::debug;

/// The system clipboard, opened on behalf of the app window.
pub struct SystemClipboard {
    owner: WindowId,
}

impl SystemClipboard {
    pub fn new(owner: WindowId) -> Self {
        Self { owner }
    }
}

impl ClipboardSource for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        // Another process may hold the clipboard open; try again next tick.
        clipboard::get_clipboard_text(Some(ch_platform_windows::hwnd(self.owner)))
            .inspect_err(|e| debug!("clipboard read skipped: {e}"))
            .ok()
            .flatten()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        clipboard::copy_text_to_clipboard(Some(ch_platform_windows::hwnd(self.owner)), text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}
