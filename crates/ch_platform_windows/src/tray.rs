use thiserror::Error;
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, HICON, IDI_APPLICATION, LoadIconW,
    MF_SEPARATOR, MF_STRING, SetForegroundWindow, TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenu,
};
use windows::core::PCWSTR;

use crate::win_api::to_wide_chars;

#[derive(Debug, Error)]
pub enum TrayIconError {
    #[error("windows error: {0}")]
    Windows(#[from] windows::core::Error),
}

pub type Result<T> = std::result::Result<T, TrayIconError>;

/// The stock application icon.
pub fn create_default_icon() -> Result<HICON> {
    // SAFETY: LoadIconW is a Win32 API.
    Ok(unsafe { LoadIconW(None, IDI_APPLICATION) }?)
}

/// Add a tray icon.
///
/// `callback_message` should be a private `WM_APP + N` message.
pub fn add_tray_icon(
    hwnd: HWND,
    icon_id: u32,
    callback_message: u32,
    tooltip: &str,
    icon: HICON,
) -> bool {
    let tooltip_wide = to_wide_chars(tooltip);
    let mut tooltip_array = [0u16; 128];
    let copy_len = (tooltip_wide.len().saturating_sub(1)).min(tooltip_array.len() - 1);
    tooltip_array[..copy_len].copy_from_slice(&tooltip_wide[..copy_len]);

    let nid = NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: icon_id,
        uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
        uCallbackMessage: callback_message,
        hIcon: icon,
        szTip: tooltip_array,
        ..Default::default()
    };

    unsafe { Shell_NotifyIconW(NIM_ADD, &nid).as_bool() }
}

pub fn delete_tray_icon(hwnd: HWND, icon_id: u32) -> bool {
    let nid = NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: icon_id,
        uFlags: NIF_ICON,
        ..Default::default()
    };

    unsafe { Shell_NotifyIconW(NIM_DELETE, &nid).as_bool() }
}

/// Show a context menu at the cursor.
///
/// `items` are `(command id, label)` pairs; an id of `0` inserts a separator. Returns the chosen
/// id, or 0 if the menu was dismissed.
pub fn show_context_menu(hwnd: HWND, items: &[(u32, &str)]) -> u32 {
    unsafe {
        let Ok(hmenu) = CreatePopupMenu() else {
            return 0;
        };

        for &(id, label) in items {
            if id == 0 {
                let _ = AppendMenuW(hmenu, MF_SEPARATOR, 0, PCWSTR::null());
            } else {
                let label = to_wide_chars(label);
                let _ = AppendMenuW(hmenu, MF_STRING, id as usize, PCWSTR(label.as_ptr()));
            }
        }

        let mut cursor_pos = POINT::default();
        let _ = GetCursorPos(&mut cursor_pos);

        // Required for the menu to close when the user clicks elsewhere.
        let _ = SetForegroundWindow(hwnd);

        let cmd = TrackPopupMenu(
            hmenu,
            TPM_RIGHTBUTTON | TPM_RETURNCMD,
            cursor_pos.x,
            cursor_pos.y,
            Some(0),
            hwnd,
            None,
        );

        let _ = DestroyMenu(hmenu);

        cmd.0 as u32
    }
}
