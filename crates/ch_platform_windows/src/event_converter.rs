use ch_platform::InputEvent;

use crate::win32::{LPARAM, WM_COMMAND, WM_TIMER, WPARAM};

/// Convert Win32 window messages to platform-agnostic [`InputEvent`].
pub struct EventConverter;

impl EventConverter {
    /// Returns `None` if the message is not an input event.
    pub fn convert(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<InputEvent> {
        match msg {
            WM_TIMER => Some(InputEvent::Timer {
                id: wparam.0 as u32,
            }),

            // Menu and accelerator commands carry no control handle.
            WM_COMMAND if lparam.0 != 0 => {
                let wp = wparam.0 as u32;
                Some(InputEvent::Control {
                    id: wp & 0xFFFF,
                    notification: (wp >> 16) & 0xFFFF,
                })
            }

            _ => None,
        }
    }
}
