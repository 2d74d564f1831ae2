// Hotkey error types
//
// Every OS-level failure in this crate is fatal to the call that hit it; nothing is retried.

use thiserror::Error;

use crate::types::{Hotkey, HotkeyId};

/// An OS failure reported by a registrar or message window backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (os error {code:#x})")]
pub struct OsError {
    pub code: i32,
    pub message: String,
}

impl OsError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Hotkey manager errors.
#[derive(Debug, Error)]
pub enum HotkeyError {
    /// The registrar refused to bind a combination (claimed elsewhere, or invalid).
    #[error("couldn't register hotkey {hotkey} (id {id}): {source}")]
    Registration {
        id: HotkeyId,
        hotkey: Hotkey,
        #[source]
        source: OsError,
    },

    /// The registrar refused to unbind an id (already unbound, unknown, or OS failure).
    #[error("couldn't unregister hotkey id {id}: {source}")]
    Unregistration {
        id: HotkeyId,
        #[source]
        source: OsError,
    },

    /// The hidden message window could not be created.
    #[error("couldn't create hotkey message window: {0}")]
    WindowCreation(#[source] OsError),

    #[error("hotkey id {0} is not registered")]
    UnknownId(HotkeyId),

    #[error("hotkey manager has been disposed")]
    Disposed,
}

impl HotkeyError {
    /// The id the failed operation was about, if any.
    pub fn id(&self) -> Option<HotkeyId> {
        match self {
            HotkeyError::Registration { id, .. }
            | HotkeyError::Unregistration { id, .. }
            | HotkeyError::UnknownId(id) => Some(*id),
            HotkeyError::WindowCreation(_) | HotkeyError::Disposed => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HotkeyError>;

/// Hotkey string parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseHotkeyError {
    #[error("empty hotkey string")]
    Empty,

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("hotkey '{0}' has no key")]
    MissingKey(String),

    #[error("hotkey '{0}' names more than one key")]
    MultipleKeys(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KeyCode, ModifierSet};

    #[test]
    fn registration_error_names_the_combination() {
        let err = HotkeyError::Registration {
            id: HotkeyId::new(4),
            hotkey: Hotkey::new(ModifierSet::CONTROL | ModifierSet::ALT, KeyCode::X),
            source: OsError::new(1409, "Hot key is already registered."),
        };
        let text = err.to_string();
        assert!(text.contains("Ctrl+Alt+X"), "{text}");
        assert!(text.contains("id 4"), "{text}");
        assert_eq!(err.id(), Some(HotkeyId::new(4)));
    }

    #[test]
    fn window_creation_error_has_no_id() {
        let err = HotkeyError::WindowCreation(OsError::new(-1, "no handle"));
        assert_eq!(err.id(), None);
        assert!(std::error::Error::source(&err).is_some());
    }
}
