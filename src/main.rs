#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

#[cfg(target_os = "windows")]
mod app;
#[cfg(target_os = "windows")]
mod clipboard;
mod constants;
#[cfg(target_os = "windows")]
mod error;
#[cfg(target_os = "windows")]
mod host_event;
#[cfg(target_os = "windows")]
mod run;

use ch_settings::ConfigManager;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ConfigManager::new();
    let settings = config.get();
    info!(
        path = %config.path().display(),
        show_hotkey = %settings.show_hotkey(),
        poll_interval_ms = settings.poll_interval_ms(),
        "starting {}",
        constants::WINDOW_TITLE
    );

    #[cfg(target_os = "windows")]
    {
        run::run(settings)?;
        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = settings;
        anyhow::bail!("{} requires Windows", constants::WINDOW_TITLE)
    }
}
