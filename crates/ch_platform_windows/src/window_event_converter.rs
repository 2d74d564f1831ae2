use ch_platform::WindowEvent;

use crate::win32::{LPARAM, SIZE_MINIMIZED, WA_INACTIVE, WM_ACTIVATE, WM_SIZE, WPARAM};

pub struct WindowEventConverter;

impl WindowEventConverter {
    pub fn convert(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<WindowEvent> {
        match msg {
            WM_ACTIVATE => {
                // Low word is the activation state; the high word carries the minimized flag.
                if (wparam.0 as u32 & 0xFFFF) == WA_INACTIVE {
                    Some(WindowEvent::Deactivated)
                } else {
                    Some(WindowEvent::Activated)
                }
            }

            WM_SIZE => {
                if wparam.0 as u32 == SIZE_MINIMIZED {
                    return Some(WindowEvent::Minimized);
                }

                let lp = lparam.0 as u32;
                let width = ((lp & 0xFFFF) as i32).max(1);
                let height = (((lp >> 16) & 0xFFFF) as i32).max(1);
                Some(WindowEvent::Resized { width, height })
            }

            _ => None,
        }
    }
}
