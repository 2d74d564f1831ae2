use std::path::PathBuf;

use ch_hotkey::{Hotkey, KeyCode, ModifierSet};

use crate::settings::TeardownSetting;

// Hotkey defaults
pub const DEFAULT_SHOW_HOTKEY: Hotkey = Hotkey::new(ModifierSet::META, KeyCode::V);

pub fn default_show_hotkey() -> String {
    DEFAULT_SHOW_HOTKEY.to_string()
}

pub fn default_pause_hotkeys_when_inactive() -> bool {
    false
}

/// The default show hotkey is often reserved by the shell, so its id may never have been bound.
pub fn default_teardown_policy() -> TeardownSetting {
    TeardownSetting::SkipInactive
}

// Clipboard polling
pub fn default_poll_interval_ms() -> u32 {
    500
}

/// Lower bound applied to `poll_interval_ms`; the clipboard is a shared OS resource.
pub const MIN_POLL_INTERVAL_MS: u32 = 50;

// Window defaults
pub fn default_start_hidden() -> bool {
    false
}

// Config directory default
pub fn default_config_dir() -> PathBuf {
    // Prefer a user home directory.
    if let Ok(home_dir) = std::env::var("USERPROFILE") {
        return PathBuf::from(home_dir);
    }
    if let Ok(home_dir) = std::env::var("HOME") {
        return PathBuf::from(home_dir);
    }

    // Fallback: program directory.
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_path_buf();
    }

    PathBuf::from(".")
}
