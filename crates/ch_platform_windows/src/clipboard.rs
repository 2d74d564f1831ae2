use std::ffi::c_void;

use thiserror::Error;
use windows::Win32::Foundation::{HANDLE, HGLOBAL, HWND};
use windows::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, GetClipboardData, IsClipboardFormatAvailable, OpenClipboard,
    SetClipboardData,
};
use windows::Win32::System::Memory::{
    GMEM_MOVEABLE, GlobalAlloc, GlobalLock, GlobalSize, GlobalUnlock,
};

const CF_UNICODETEXT: u32 = 13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Failed to open clipboard")]
    OpenClipboardFailed,
    #[error("Failed to empty clipboard")]
    EmptyClipboardFailed,
    #[error("Failed to read clipboard data")]
    GetClipboardDataFailed,
    #[error("Failed to allocate global memory")]
    AllocateGlobalMemoryFailed,
    #[error("Failed to lock global memory")]
    LockGlobalMemoryFailed,
    #[error("Failed to set clipboard data")]
    SetClipboardDataFailed,
    #[error("Failed to close clipboard")]
    CloseClipboardFailed,
}

/// Open clipboard; closes on drop.
struct OpenedClipboard;

impl OpenedClipboard {
    fn open(owner: Option<HWND>) -> Result<Self, ClipboardError> {
        unsafe { OpenClipboard(owner) }.map_err(|_| ClipboardError::OpenClipboardFailed)?;
        Ok(Self)
    }

    fn close(self) -> Result<(), ClipboardError> {
        std::mem::forget(self);
        unsafe { CloseClipboard() }.map_err(|_| ClipboardError::CloseClipboardFailed)
    }
}

impl Drop for OpenedClipboard {
    fn drop(&mut self) {
        let _ = unsafe { CloseClipboard() };
    }
}

/// Read the clipboard as text. `Ok(None)` when it holds no text.
pub fn get_clipboard_text(owner: Option<HWND>) -> Result<Option<String>, ClipboardError> {
    if unsafe { IsClipboardFormatAvailable(CF_UNICODETEXT) }.is_err() {
        return Ok(None);
    }

    let clipboard = OpenedClipboard::open(owner)?;

    let handle = unsafe { GetClipboardData(CF_UNICODETEXT) }
        .map_err(|_| ClipboardError::GetClipboardDataFailed)?;
    let h_mem = HGLOBAL(handle.0);

    let text = unsafe {
        let ptr = GlobalLock(h_mem) as *const u16;
        if ptr.is_null() {
            return Err(ClipboardError::LockGlobalMemoryFailed);
        }

        // The block may be larger than the string; stop at the first NUL.
        let capacity = GlobalSize(h_mem) / std::mem::size_of::<u16>();
        let units = std::slice::from_raw_parts(ptr, capacity);
        let len = units.iter().position(|&u| u == 0).unwrap_or(capacity);
        let text = String::from_utf16_lossy(&units[..len]);

        let _ = GlobalUnlock(h_mem);
        text
    };

    clipboard.close()?;
    Ok(Some(text))
}

/// Replace the clipboard contents with `text`.
pub fn copy_text_to_clipboard(owner: Option<HWND>, text: &str) -> Result<(), ClipboardError> {
    let clipboard = OpenedClipboard::open(owner)?;

    unsafe { EmptyClipboard() }.map_err(|_| ClipboardError::EmptyClipboardFailed)?;

    // UTF-16 with terminating NUL
    let mut wide_text: Vec<u16> = text.encode_utf16().collect();
    wide_text.push(0);
    let data_size = wide_text.len() * std::mem::size_of::<u16>();

    unsafe {
        let h_mem = GlobalAlloc(GMEM_MOVEABLE, data_size)
            .map_err(|_| ClipboardError::AllocateGlobalMemoryFailed)?;

        let mem_ptr = GlobalLock(h_mem);
        if mem_ptr.is_null() {
            return Err(ClipboardError::LockGlobalMemoryFailed);
        }

        std::ptr::copy_nonoverlapping(wide_text.as_ptr() as *const c_void, mem_ptr, data_size);

        let _ = GlobalUnlock(h_mem);

        // Ownership of the block passes to the system on success.
        SetClipboardData(CF_UNICODETEXT, Some(HANDLE(h_mem.0)))
            .map_err(|_| ClipboardError::SetClipboardDataFailed)?;
    }

    clipboard.close()
}
