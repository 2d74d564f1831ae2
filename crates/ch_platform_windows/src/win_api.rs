use std::{ffi::OsStr, ffi::c_void, iter::once, os::windows::ffi::OsStrExt};

use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::{COLOR_WINDOW, DEFAULT_GUI_FONT, GetStockObject, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{PROCESS_PER_MONITOR_DPI_AWARE, SetProcessDpiAwareness};
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

pub type WindowProc = unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT;

#[inline]
pub fn set_process_per_monitor_dpi_aware() -> windows::core::Result<()> {
    unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) }
}

#[inline]
pub fn get_window_user_data(hwnd: HWND) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) }
}

#[inline]
pub fn set_window_user_data(hwnd: HWND, data: isize) -> isize {
    unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, data) }
}

#[inline]
pub fn def_window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

#[inline]
pub fn get_module_handle() -> windows::core::Result<HMODULE> {
    unsafe { GetModuleHandleW(None) }
}

#[inline]
pub fn load_cursor_arrow() -> windows::core::Result<HCURSOR> {
    unsafe { LoadCursorW(None, IDC_ARROW) }
}

/// Register a window class. Registering the same class twice is harmless.
pub fn register_class(
    instance: HMODULE,
    class_name: &[u16],
    window_proc: WindowProc,
    background: HBRUSH,
) -> windows::core::Result<()> {
    let window_class = WNDCLASSW {
        lpfnWndProc: Some(window_proc),
        hInstance: instance.into(),
        lpszClassName: PCWSTR(class_name.as_ptr()),
        hbrBackground: background,
        hCursor: load_cursor_arrow()?,
        ..Default::default()
    };

    unsafe {
        RegisterClassW(&window_class);
    }
    Ok(())
}

/// Create a top-level window (initially hidden) of a freshly registered class.
pub fn create_app_window_with_params(
    window_class_name: &str,
    title: &str,
    window_proc: WindowProc,
    width: i32,
    height: i32,
    create_params: Option<*const c_void>,
) -> windows::core::Result<HWND> {
    let instance = get_module_handle()?;
    let class_name = to_wide_chars(window_class_name);
    let title = to_wide_chars(title);

    register_class(
        instance,
        &class_name,
        window_proc,
        HBRUSH((COLOR_WINDOW.0 + 1) as usize as *mut c_void),
    )?;

    unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            width,
            height,
            None,
            None,
            Some(instance.into()),
            create_params,
        )
    }
}

/// Create a message-only window: no surface, never shown, never enumerated.
pub fn create_message_only_window(
    window_class_name: &str,
    window_proc: WindowProc,
) -> windows::core::Result<HWND> {
    let instance = get_module_handle()?;
    let class_name = to_wide_chars(window_class_name);

    register_class(
        instance,
        &class_name,
        window_proc,
        HBRUSH(std::ptr::null_mut()),
    )?;

    unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR::null(),
            WINDOW_STYLE::default(),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            Some(instance.into()),
            None,
        )
    }
}

/// Create a child control of a system class (e.g. `LISTBOX`).
pub fn create_child_control(
    parent: HWND,
    system_class: &str,
    control_id: u32,
    style: WINDOW_STYLE,
    ex_style: WINDOW_EX_STYLE,
) -> windows::core::Result<HWND> {
    let instance = get_module_handle()?;
    let class_name = to_wide_chars(system_class);

    let hwnd = unsafe {
        CreateWindowExW(
            ex_style,
            PCWSTR(class_name.as_ptr()),
            PCWSTR::null(),
            WS_CHILD | WS_VISIBLE | style,
            0,
            0,
            0,
            0,
            Some(parent),
            Some(HMENU(control_id as usize as *mut c_void)),
            Some(instance.into()),
            None,
        )
    }?;

    let font = unsafe { GetStockObject(DEFAULT_GUI_FONT) };
    send_message(hwnd, WM_SETFONT, font.0 as usize, 1);
    Ok(hwnd)
}

#[inline]
pub fn hide_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
    Ok(())
}

/// Show, restore if minimized, and bring to the foreground.
#[inline]
pub fn restore_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = ShowWindow(hwnd, SW_RESTORE);
        let _ = SetForegroundWindow(hwnd);
    }
    Ok(())
}

#[inline]
pub fn start_timer(hwnd: HWND, timer_id: u32, interval_ms: u32) -> windows::core::Result<()> {
    let id = unsafe { SetTimer(Some(hwnd), timer_id as usize, interval_ms, None) };
    if id == 0 {
        return Err(unsafe { GetLastError() }.to_hresult().into());
    }
    Ok(())
}

#[inline]
pub fn stop_timer(hwnd: HWND, timer_id: u32) -> windows::core::Result<()> {
    unsafe {
        KillTimer(Some(hwnd), timer_id as usize)?;
    }
    Ok(())
}

#[inline]
pub fn destroy_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        DestroyWindow(hwnd)?;
    }
    Ok(())
}

#[inline]
pub fn quit_message_loop(exit_code: i32) {
    unsafe {
        PostQuitMessage(exit_code);
    }
}

#[inline]
pub fn run_message_loop() {
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[inline]
pub fn post_message(
    hwnd: HWND,
    msg: u32,
    wparam: usize,
    lparam: isize,
) -> windows::core::Result<()> {
    unsafe {
        PostMessageW(Some(hwnd), msg, WPARAM(wparam), LPARAM(lparam))?;
    }
    Ok(())
}

#[inline]
pub fn send_message(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> LRESULT {
    unsafe { SendMessageW(hwnd, msg, Some(WPARAM(wparam)), Some(LPARAM(lparam))) }
}

#[inline]
pub fn get_client_rect(hwnd: HWND) -> windows::core::Result<RECT> {
    let mut rect = RECT::default();
    unsafe {
        GetClientRect(hwnd, &mut rect)?;
    }
    Ok(rect)
}

#[inline]
pub fn move_window(hwnd: HWND, x: i32, y: i32, width: i32, height: i32) -> windows::core::Result<()> {
    unsafe {
        MoveWindow(hwnd, x, y, width, height, true)?;
    }
    Ok(())
}

/// Convert a Rust string to a NUL-terminated UTF-16 buffer for Win32 APIs.
#[inline]
pub fn to_wide_chars(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(once(0)).collect()
}
