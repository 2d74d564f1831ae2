use ch_hotkey::{ActivationEvent, KeyPressed};

/// Events posted onto the window thread.
#[derive(Debug, Clone, Copy)]
pub enum HostEvent {
    HotkeyPressed(KeyPressed),
    /// The main window's activation changed; drives the hotkey focus gate.
    Activation(ActivationEvent),
    ShowWindow,
}
