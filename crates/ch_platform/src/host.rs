use crate::{InputEvent, WindowEvent};

/// Opaque window identifier.
///
/// This is used to avoid leaking platform window handles (e.g. Win32 `HWND`) across crate
/// boundaries. Platform backends can convert to/from raw handles as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(usize);

impl WindowId {
    pub const INVALID: WindowId = WindowId(0);

    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Minimal platform window-message handler.
///
/// The platform backend owns the event loop and window procedure; the host app receives typed
/// events and decides what to do with them.
pub trait WindowMessageHandler {
    type WindowHandle: Copy;
    type UserEvent: Send + 'static;

    /// Handle a platform-agnostic input event.
    ///
    /// Return `Some(result)` to mark the message as handled, or `None` to fall back to other message
    /// handling paths.
    fn handle_input_event(
        &mut self,
        window: Self::WindowHandle,
        event: InputEvent,
    ) -> Option<isize>;

    /// Handle a window lifecycle event.
    fn handle_window_event(
        &mut self,
        _window: Self::WindowHandle,
        _event: WindowEvent,
    ) -> Option<isize> {
        None
    }

    /// Handle a user-defined event delivered onto the window thread.
    ///
    /// This is the preferred way to bridge callbacks and background threads into the UI thread.
    fn handle_user_event(
        &mut self,
        _window: Self::WindowHandle,
        _event: Self::UserEvent,
    ) -> Option<isize> {
        None
    }

    /// Handle a close request.
    ///
    /// If not overridden, the platform runner will fall back to the default window procedure.
    fn handle_close_requested(&mut self, _window: Self::WindowHandle) -> Option<isize> {
        None
    }

    /// Called once before the window is destroyed, while it is still valid.
    fn handle_destroy(&mut self, _window: Self::WindowHandle) {}
}

#[cfg(test)]
mod tests {
    use super::WindowId;

    #[test]
    fn invalid_window_id_is_zero() {
        assert!(!WindowId::INVALID.is_valid());
        assert_eq!(WindowId::from_raw(0), WindowId::INVALID);
        assert!(WindowId::from_raw(0x1234).is_valid());
        assert_eq!(WindowId::from_raw(0x1234).raw(), 0x1234);
    }
}
