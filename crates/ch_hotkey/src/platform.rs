use ch_platform::WindowId;

use crate::error::OsError;
use crate::types::{HotkeyId, KeyCode, KeyPressed, ModifierSet};

/// Single-slot receiver for decoded hotkey notifications.
pub type KeyPressedHandler = Box<dyn Fn(KeyPressed)>;

/// The OS global hotkey facility.
///
/// Bindings are keyed by `(window, id)`; the window is the one notifications are delivered to.
pub trait HotkeyRegistrar {
    fn bind(
        &mut self,
        window: WindowId,
        id: HotkeyId,
        modifiers: ModifierSet,
        key: KeyCode,
    ) -> Result<(), OsError>;

    fn unbind(&mut self, window: WindowId, id: HotkeyId) -> Result<(), OsError>;
}

/// A window with no visible surface that receives hotkey notifications.
///
/// Implementations decode each notification and pass it to the installed handler
/// synchronously; with no handler installed the notification is dropped.
pub trait MessageWindow {
    /// Handle the registrar binds hotkeys to.
    fn window_id(&self) -> WindowId;

    /// Install (or with `None`, remove) the notification handler.
    fn set_key_pressed_handler(&mut self, handler: Option<KeyPressedHandler>);

    /// Destroy the native window. Calling this more than once is a no-op.
    fn destroy(&mut self);
}
