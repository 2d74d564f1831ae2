use ch_hotkey::{HotkeyId, HotkeyRegistrar, KeyCode, ModifierSet, OsError};
use ch_platform::WindowId;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey,
};

/// Register a global hotkey.
///
/// `modifiers` is a Win32 HOT_KEY_MODIFIERS bitmask.
pub fn register_hotkey(
    hwnd: HWND,
    hotkey_id: i32,
    modifiers: u32,
    key: u32,
) -> windows::core::Result<()> {
    // SAFETY: RegisterHotKey is an OS API. Caller provides the target HWND and key/modifier values.
    unsafe { RegisterHotKey(Some(hwnd), hotkey_id, HOT_KEY_MODIFIERS(modifiers), key) }
}

/// Unregister a global hotkey associated with a window.
pub fn unregister_hotkey(hwnd: HWND, hotkey_id: i32) -> windows::core::Result<()> {
    // SAFETY: UnregisterHotKey is an OS API.
    unsafe { UnregisterHotKey(Some(hwnd), hotkey_id) }
}

/// [`HotkeyRegistrar`] backed by `RegisterHotKey`/`UnregisterHotKey`.
///
/// [`ModifierSet`] bits are the Win32 `MOD_*` values, so they pass through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Registrar;

impl HotkeyRegistrar for Win32Registrar {
    fn bind(
        &mut self,
        window: WindowId,
        id: HotkeyId,
        modifiers: ModifierSet,
        key: KeyCode,
    ) -> Result<(), OsError> {
        register_hotkey(crate::hwnd(window), id.as_i32(), modifiers.bits(), key.0)
            .map_err(|e| crate::os_error(&e))
    }

    fn unbind(&mut self, window: WindowId, id: HotkeyId) -> Result<(), OsError> {
        unregister_hotkey(crate::hwnd(window), id.as_i32()).map_err(|e| crate::os_error(&e))
    }
}
