/// System tray event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    DoubleClick,
    /// Context menu item chosen; `0` means the menu was dismissed.
    MenuCommand(u32),
}

/// Window lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window became the active (foreground) window.
    Activated,
    /// The window lost activation to another window.
    Deactivated,
    Resized { width: i32, height: i32 },
    Minimized,
}

impl WindowEvent {
    /// `true` for the two activation-lifecycle events.
    #[inline]
    pub fn is_activation(self) -> bool {
        matches!(self, WindowEvent::Activated | WindowEvent::Deactivated)
    }
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// System tray event.
    Tray(TrayEvent),
    /// Timer event.
    Timer { id: u32 },
    /// Child control notification (e.g. a list box selection).
    Control { id: u32, notification: u32 },
}
