use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::Settings;

/// Unified config manager.
pub struct ConfigManager {
    path: PathBuf,
    settings: Arc<RwLock<Settings>>,
}

impl ConfigManager {
    /// Create a config manager backed by the default settings file (loads once and caches).
    pub fn new() -> Self {
        Self::with_path(Settings::default_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        let settings = Settings::load_from(&path);
        Self {
            path,
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Get a snapshot copy of current settings.
    pub fn get(&self) -> Settings {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|_| Settings::default())
    }

    /// Reload settings from disk.
    pub fn reload(&mut self) {
        let new_settings = Settings::load_from(&self.path);
        if let Ok(mut guard) = self.settings.write() {
            *guard = new_settings;
        }
    }

    /// Apply `change` to the cached settings and persist them.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> anyhow::Result<()> {
        let snapshot = {
            let mut guard = self
                .settings
                .write()
                .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
            change(&mut guard);
            guard.clone()
        };
        snapshot.save_to(&self.path).inspect_err(|e| {
            warn!(path = %self.path.display(), "couldn't save settings: {e}");
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
