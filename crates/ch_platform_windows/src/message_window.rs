use std::cell::RefCell;
use std::rc::Rc;

use ch_hotkey::{HotkeyError, KeyPressedHandler, MessageWindow, decode_notification};
use ch_platform::WindowId;
use tracing::{debug, warn};

use crate::SafeHwnd;
use crate::win_api;
use crate::win32::{HWND, LPARAM, LRESULT, WM_HOTKEY, WPARAM};

const MESSAGE_WINDOW_CLASS: &str = "ClipHistoryHotkeySink";

type HandlerSlot = RefCell<Option<KeyPressedHandler>>;

/// Message-only window that receives `WM_HOTKEY` for the registrar.
///
/// The window's user data points at the handler slot owned by this struct; it is cleared before
/// the native window is destroyed.
pub struct HiddenMessageWindow {
    hwnd: SafeHwnd,
    window: WindowId,
    slot: Rc<HandlerSlot>,
}

impl HiddenMessageWindow {
    /// Create the window on the calling thread, which must run the message loop.
    pub fn create() -> Result<Self, HotkeyError> {
        let hwnd = win_api::create_message_only_window(MESSAGE_WINDOW_CLASS, window_proc)
            .map_err(|e| HotkeyError::WindowCreation(crate::os_error(&e)))?;

        let slot: Rc<HandlerSlot> = Rc::new(RefCell::new(None));
        win_api::set_window_user_data(hwnd, Rc::as_ptr(&slot) as isize);

        debug!(hwnd = ?hwnd.0, "created hotkey message window");
        Ok(Self {
            hwnd: SafeHwnd::new(hwnd),
            window: crate::window_id(hwnd),
            slot,
        })
    }
}

impl MessageWindow for HiddenMessageWindow {
    fn window_id(&self) -> WindowId {
        self.window
    }

    fn set_key_pressed_handler(&mut self, handler: Option<KeyPressedHandler>) {
        match self.slot.try_borrow_mut() {
            Ok(mut slot) => *slot = handler,
            Err(_) => warn!("hotkey handler replaced while it was running; ignoring"),
        }
    }

    fn destroy(&mut self) {
        let Some(hwnd) = self.hwnd.take() else {
            return;
        };

        win_api::set_window_user_data(hwnd, 0);
        if let Err(e) = win_api::destroy_window(hwnd) {
            warn!("couldn't destroy hotkey message window: {e}");
        }
    }
}

impl Drop for HiddenMessageWindow {
    fn drop(&mut self) {
        self.destroy();
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg != WM_HOTKEY {
        return win_api::def_window_proc(hwnd, msg, wparam, lparam);
    }

    let ptr = win_api::get_window_user_data(hwnd) as *const HandlerSlot;
    if ptr.is_null() {
        return LRESULT(0);
    }

    // SAFETY: the pointer is set from a live `Rc<HandlerSlot>` and cleared before that window
    // is destroyed; the owning struct outlives the window.
    let slot = unsafe { &*ptr };
    if let Ok(slot) = slot.try_borrow()
        && let Some(handler) = slot.as_ref()
    {
        handler(decode_notification(wparam.0, lparam.0));
    }

    LRESULT(0)
}
