use ch_platform::{TrayEvent, WindowId};
use thiserror::Error;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{WM_APP, WM_LBUTTONDBLCLK, WM_RBUTTONUP};

use crate::{SafeHwnd, tray};

pub const TRAY_CALLBACK_MESSAGE: u32 = WM_APP + 1;

/// Translate a tray callback into an event, running the context menu for a right click.
pub fn tray_event_from_callback(
    hwnd: HWND,
    lparam: u32,
    menu: &[(u32, &str)],
) -> Option<TrayEvent> {
    match lparam {
        WM_RBUTTONUP => Some(TrayEvent::MenuCommand(tray::show_context_menu(hwnd, menu))),
        WM_LBUTTONDBLCLK => Some(TrayEvent::DoubleClick),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum TrayManagerError {
    #[error("tray icon error: {0}")]
    Icon(#[from] tray::TrayIconError),
    #[error("failed to add tray icon")]
    AddFailed,
}

pub type Result<T> = std::result::Result<T, TrayManagerError>;

/// Stateful system tray icon.
#[derive(Debug)]
pub struct TrayManager {
    hwnd: SafeHwnd,
    icon_id: u32,
    is_added: bool,
}

impl TrayManager {
    pub fn new() -> Self {
        Self {
            hwnd: SafeHwnd::default(),
            icon_id: 1001,
            is_added: false,
        }
    }

    pub fn initialize(&mut self, window: WindowId, tooltip: &str) -> Result<()> {
        let hwnd = crate::hwnd(window);
        self.hwnd.set(Some(hwnd));

        let icon = tray::create_default_icon()?;

        if tray::add_tray_icon(hwnd, self.icon_id, TRAY_CALLBACK_MESSAGE, tooltip, icon) {
            self.is_added = true;
            Ok(())
        } else {
            Err(TrayManagerError::AddFailed)
        }
    }

    pub fn cleanup(&mut self) {
        if !self.is_added {
            return;
        }

        if let Some(hwnd) = self.hwnd.get() {
            let _ = tray::delete_tray_icon(hwnd, self.icon_id);
        }
        self.is_added = false;
    }
}

impl Default for TrayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TrayManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}
