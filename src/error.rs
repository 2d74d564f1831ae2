use ch_hotkey::HotkeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("hotkey setup failed: {0}")]
    Hotkey(#[from] HotkeyError),

    #[error("window setup failed: {0}")]
    Platform(#[from] ch_platform_windows::win32::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
