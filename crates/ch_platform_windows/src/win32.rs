pub use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};

pub use windows::Win32::UI::WindowsAndMessaging::{
    SIZE_MINIMIZED, WA_INACTIVE, WM_ACTIVATE, WM_CLOSE, WM_COMMAND, WM_CREATE, WM_DESTROY,
    WM_HOTKEY, WM_SIZE, WM_TIMER,
};

pub use windows::core::{Error, Result};
