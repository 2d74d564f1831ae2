#![cfg(target_os = "windows")]

pub mod app_runner;
pub mod clipboard;
mod event_converter;
pub mod hotkey_manager;
pub mod hotkeys;
pub mod list_box;
pub mod message_box;
pub mod message_window;
pub mod tray;
pub mod tray_manager;
pub mod win32;
pub mod win_api;
mod window_event_converter;

pub(crate) use event_converter::EventConverter;

pub use app_runner::{TrayMenu, UserEventSender, request_exit, run_app};
pub use hotkey_manager::Win32HotkeyManager;
pub use hotkeys::Win32Registrar;
pub use list_box::ListBox;
pub use message_window::HiddenMessageWindow;
pub use tray_manager::TrayManager;

use std::ffi::c_void;

use ch_hotkey::OsError;
use ch_platform::WindowId;
use win32::HWND;

#[inline]
pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId::from_raw(hwnd.0 as usize)
}

#[inline]
pub fn hwnd(window: WindowId) -> HWND {
    HWND(window.raw() as *mut c_void)
}

/// Window handle that may not exist yet (or any more).
#[derive(Debug, Default, Clone, Copy)]
pub struct SafeHwnd {
    hwnd: Option<HWND>,
}

impl SafeHwnd {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd: Some(hwnd) }
    }

    pub fn set(&mut self, hwnd: Option<HWND>) {
        self.hwnd = hwnd;
    }

    pub fn get(&self) -> Option<HWND> {
        self.hwnd
    }

    pub fn take(&mut self) -> Option<HWND> {
        self.hwnd.take()
    }
}

/// Convert a `windows` error into the platform-neutral [`OsError`].
///
/// HRESULTs wrapping a Win32 error (`0x8007xxxx`) are reported as the bare Win32 code.
pub fn os_error(error: &windows::core::Error) -> OsError {
    let hr = error.code().0 as u32;
    let code = if hr & 0xFFFF_0000 == 0x8007_0000 {
        (hr & 0xFFFF) as i32
    } else {
        hr as i32
    };
    OsError::new(code, error.message())
}
