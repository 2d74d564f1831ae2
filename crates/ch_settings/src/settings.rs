use std::fs;
use std::path::{Path, PathBuf};

use ch_hotkey::{Hotkey, ParseHotkeyError, TeardownPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::defaults::*;

/// Serialized form of [`TeardownPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownSetting {
    Strict,
    #[default]
    SkipInactive,
}

impl From<TeardownSetting> for TeardownPolicy {
    fn from(value: TeardownSetting) -> Self {
        match value {
            TeardownSetting::Strict => TeardownPolicy::Strict,
            TeardownSetting::SkipInactive => TeardownPolicy::SkipInactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Combination that brings the history window up, e.g. `"Win+V"`.
    #[serde(default = "default_show_hotkey")]
    pub show_hotkey: String,

    /// Release the show hotkey while the history window is inactive.
    #[serde(default = "default_pause_hotkeys_when_inactive")]
    pub pause_hotkeys_when_inactive: bool,

    #[serde(default = "default_teardown_policy")]
    pub teardown_policy: TeardownSetting,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,

    #[serde(default = "default_start_hidden")]
    pub start_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hotkey: default_show_hotkey(),
            pause_hotkeys_when_inactive: default_pause_hotkeys_when_inactive(),
            teardown_policy: default_teardown_policy(),
            poll_interval_ms: default_poll_interval_ms(),
            start_hidden: default_start_hidden(),
        }
    }
}

impl Settings {
    fn settings_dir() -> PathBuf {
        default_config_dir().join(".clip_history")
    }

    /// `%USERPROFILE%\.clip_history\settings.json`
    pub fn default_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from `path`.
    ///
    /// Falls back to defaults (and writes them back) if the file is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => {
                    debug!(path = %path.display(), "loaded settings");
                    return settings;
                }
                Err(e) => warn!(path = %path.display(), "ignoring malformed settings: {e}"),
            },
            Err(e) => debug!(path = %path.display(), "no settings file: {e}"),
        }

        let default_settings = Self::default();
        if let Err(e) = default_settings.save_to(path) {
            warn!(path = %path.display(), "couldn't persist default settings: {e}");
        }
        default_settings
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The configured show hotkey; an unparseable value falls back to the default.
    pub fn show_hotkey(&self) -> Hotkey {
        match self.show_hotkey.parse() {
            Ok(hotkey) => hotkey,
            Err(e) => {
                warn!("invalid show_hotkey '{}': {e}; using default", self.show_hotkey);
                DEFAULT_SHOW_HOTKEY
            }
        }
    }

    /// Validate and store a hotkey string in canonical form (e.g. `"ctrl + alt + s"` becomes
    /// `"Ctrl+Alt+S"`).
    pub fn set_show_hotkey(&mut self, hotkey: &str) -> Result<(), ParseHotkeyError> {
        let parsed: Hotkey = hotkey.parse()?;
        self.show_hotkey = parsed.to_string();
        Ok(())
    }

    pub fn teardown_policy(&self) -> TeardownPolicy {
        self.teardown_policy.into()
    }

    /// Clipboard poll interval, clamped to [`MIN_POLL_INTERVAL_MS`].
    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS)
    }
}
