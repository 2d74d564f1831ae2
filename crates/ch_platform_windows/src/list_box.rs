use windows::Win32::Foundation::HWND;
pub use windows::Win32::UI::WindowsAndMessaging::LBN_SELCHANGE;
use windows::Win32::UI::WindowsAndMessaging::{
    LB_ADDSTRING, LB_ERR, LB_GETCURSEL, LB_SETCURSEL, LB_SETTOPINDEX, LBS_NOINTEGRALHEIGHT,
    LBS_NOTIFY, WINDOW_STYLE, WS_EX_CLIENTEDGE, WS_VSCROLL,
};

use crate::win_api;

/// Thin wrapper over a system `LISTBOX` child control.
#[derive(Debug, Clone, Copy)]
pub struct ListBox {
    hwnd: HWND,
}

impl ListBox {
    pub fn create(parent: HWND, control_id: u32) -> windows::core::Result<Self> {
        let hwnd = win_api::create_child_control(
            parent,
            "LISTBOX",
            control_id,
            WS_VSCROLL | WINDOW_STYLE(LBS_NOTIFY as u32 | LBS_NOINTEGRALHEIGHT as u32),
            WS_EX_CLIENTEDGE,
        )?;
        Ok(Self { hwnd })
    }

    /// Append a row, scroll it into view and return its index.
    pub fn push(&self, text: &str) -> Option<usize> {
        let wide = win_api::to_wide_chars(text);
        let index = win_api::send_message(self.hwnd, LB_ADDSTRING, 0, wide.as_ptr() as isize);
        if index.0 < 0 {
            return None;
        }
        let index = index.0 as usize;
        self.scroll_to(index);
        Some(index)
    }

    /// Scroll so that `index` is visible; the control clamps at the last page.
    fn scroll_to(&self, index: usize) {
        win_api::send_message(self.hwnd, LB_SETTOPINDEX, index, 0);
    }

    pub fn selected(&self) -> Option<usize> {
        let index = win_api::send_message(self.hwnd, LB_GETCURSEL, 0, 0);
        (index.0 != LB_ERR as isize).then_some(index.0 as usize)
    }

    /// Return the selected row and deselect it.
    ///
    /// A `LISTBOX` only notifies on a change, so leaving the row selected would swallow the next
    /// click on it.
    pub fn take_selection(&self) -> Option<usize> {
        let selected = self.selected()?;
        // usize::MAX is -1: no selection. The control reports LB_ERR for it.
        win_api::send_message(self.hwnd, LB_SETCURSEL, usize::MAX, 0);
        Some(selected)
    }

    /// Fill the parent's client area.
    pub fn fit_to(&self, width: i32, height: i32) {
        let _ = win_api::move_window(self.hwnd, 0, 0, width, height);
    }

    #[cfg(test)]
    fn top_index(&self) -> usize {
        use windows::Win32::UI::WindowsAndMessaging::LB_GETTOPINDEX;

        win_api::send_message(self.hwnd, LB_GETTOPINDEX, 0, 0).0 as usize
    }
}
