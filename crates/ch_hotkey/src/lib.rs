//! Global hotkey registration core.
//!
//! [`HotkeyManager`] hands out sequential [`HotkeyId`]s, binds them through a
//! [`HotkeyRegistrar`] to the handle of a [`MessageWindow`], and republishes the window's
//! notifications as [`KeyPressed`] events. Registrations that name an owning window are paused
//! while that window is inactive (see [`gate`]).
//!
//! The crate is platform-agnostic; the Win32 registrar and message window live in
//! `ch_platform_windows`.

pub mod error;
pub mod gate;
pub mod manager;
pub mod platform;
pub mod signal;
pub mod types;

pub use error::{HotkeyError, OsError, ParseHotkeyError, Result};
pub use gate::{ActivationEvent, FocusGate};
pub use manager::{HotkeyManager, Registration, TeardownPolicy};
pub use platform::{HotkeyRegistrar, KeyPressedHandler, MessageWindow};
pub use signal::{KeyPressedSignal, SubscriptionId};
pub use types::{Hotkey, HotkeyId, KeyCode, KeyPressed, ModifierSet, decode_notification};
