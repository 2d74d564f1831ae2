use ch_hotkey::{HotkeyManager, Result, TeardownPolicy};

use crate::{HiddenMessageWindow, Win32Registrar};

/// The hotkey manager wired to the real OS facility.
pub type Win32HotkeyManager = HotkeyManager<Win32Registrar, HiddenMessageWindow>;

/// Create a manager with its own message-only window on the calling thread.
pub fn create(teardown: TeardownPolicy) -> Result<Win32HotkeyManager> {
    let window = HiddenMessageWindow::create()?;
    Ok(HotkeyManager::with_teardown_policy(
        Win32Registrar,
        window,
        teardown,
    ))
}
