use ch_hotkey::{Hotkey, KeyPressed};
use ch_platform::TrayEvent;
use tracing::{debug, warn};

pub mod history;
pub mod menu;

pub use history::{ClipboardError, ClipboardHistory, ClipboardSource, Entry};

/// Top-level application actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A registered global hotkey fired.
    HotkeyPressed(KeyPressed),
    /// System tray interaction.
    Tray(TrayEvent),
    /// The user asked to close the history window.
    CloseRequested,
    /// Clipboard poll timer elapsed.
    PollClipboard,
    /// User picked a history entry.
    SelectEntry(usize),
}

/// Top-level application commands for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show, restore and focus the history window.
    ShowWindow,
    /// Hide the history window to the tray.
    HideWindow,
    /// A new entry was appended at `index`.
    HistoryChanged { index: usize },
    /// Tear everything down and leave the message loop.
    Exit,
}

/// Core app model.
#[derive(Debug)]
pub struct AppController {
    show_hotkey: Hotkey,
    history: ClipboardHistory,
}

impl AppController {
    pub fn new(show_hotkey: Hotkey) -> Self {
        Self {
            show_hotkey,
            history: ClipboardHistory::new(),
        }
    }

    pub fn history(&self) -> &ClipboardHistory {
        &self.history
    }

    pub fn show_hotkey(&self) -> Hotkey {
        self.show_hotkey
    }

    pub fn reduce(&mut self, action: Action, clipboard: &mut dyn ClipboardSource) -> Vec<Command> {
        match action {
            Action::HotkeyPressed(event) => {
                if event.matches(self.show_hotkey) {
                    vec![Command::ShowWindow]
                } else {
                    debug!(id = %event.id, hotkey = %event.hotkey(), "ignoring hotkey");
                    Vec::new()
                }
            }

            Action::Tray(TrayEvent::DoubleClick) => vec![Command::ShowWindow],

            Action::Tray(TrayEvent::MenuCommand(id)) => match id {
                menu::SHOW => vec![Command::ShowWindow],
                menu::HIDE => vec![Command::HideWindow],
                menu::EXIT => vec![Command::Exit],
                // Dismissed menu.
                _ => Vec::new(),
            },

            // Closing only minimizes to the tray.
            Action::CloseRequested => vec![Command::HideWindow],

            Action::PollClipboard => self
                .history
                .poll(clipboard)
                .map(|index| vec![Command::HistoryChanged { index }])
                .unwrap_or_default(),

            Action::SelectEntry(index) => {
                if let Err(e) = self.history.select(index, clipboard) {
                    warn!("couldn't restore history entry: {e}");
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ch_hotkey::{HotkeyId, KeyCode, ModifierSet};

    use super::history::tests::MemoryClipboard;
    use super::*;

    fn win_v() -> Hotkey {
        Hotkey::new(ModifierSet::META, KeyCode::V)
    }

    fn pressed(modifiers: ModifierSet, key: KeyCode) -> KeyPressed {
        KeyPressed {
            id: HotkeyId::new(1),
            modifiers,
            key,
        }
    }

    #[test]
    fn show_hotkey_shows_window() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::default();

        let commands = app.reduce(
            Action::HotkeyPressed(pressed(ModifierSet::META, KeyCode::V)),
            &mut clipboard,
        );
        assert_eq!(commands, vec![Command::ShowWindow]);

        let commands = app.reduce(
            Action::HotkeyPressed(pressed(ModifierSet::CONTROL, KeyCode::V)),
            &mut clipboard,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn no_repeat_flag_does_not_affect_matching() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::default();
        let event = pressed(ModifierSet::META | ModifierSet::NO_REPEAT, KeyCode::V);

        assert_eq!(
            app.reduce(Action::HotkeyPressed(event), &mut clipboard),
            vec![Command::ShowWindow]
        );
    }

    #[test]
    fn tray_routes_to_window_commands() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::default();
        let mut route = |event| app.reduce(Action::Tray(event), &mut clipboard);

        assert_eq!(route(TrayEvent::DoubleClick), vec![Command::ShowWindow]);
        assert_eq!(route(TrayEvent::MenuCommand(menu::SHOW)), vec![Command::ShowWindow]);
        assert_eq!(route(TrayEvent::MenuCommand(menu::HIDE)), vec![Command::HideWindow]);
        assert_eq!(route(TrayEvent::MenuCommand(menu::EXIT)), vec![Command::Exit]);
        assert!(route(TrayEvent::MenuCommand(0)).is_empty());
    }

    #[test]
    fn close_hides_instead_of_exiting() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(
            app.reduce(Action::CloseRequested, &mut clipboard),
            vec![Command::HideWindow]
        );
    }

    #[test]
    fn poll_reports_only_new_entries() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::holding("one");

        assert_eq!(
            app.reduce(Action::PollClipboard, &mut clipboard),
            vec![Command::HistoryChanged { index: 0 }]
        );
        assert!(app.reduce(Action::PollClipboard, &mut clipboard).is_empty());

        clipboard.text = Some("two".into());
        assert_eq!(
            app.reduce(Action::PollClipboard, &mut clipboard),
            vec![Command::HistoryChanged { index: 1 }]
        );
        assert_eq!(app.history().len(), 2);
    }

    #[test]
    fn selecting_an_entry_restores_it() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::holding("one");
        app.reduce(Action::PollClipboard, &mut clipboard);
        clipboard.text = Some("two".into());
        app.reduce(Action::PollClipboard, &mut clipboard);

        assert!(app.reduce(Action::SelectEntry(0), &mut clipboard).is_empty());
        assert_eq!(clipboard.text.as_deref(), Some("one"));
    }

    #[test]
    fn selecting_the_same_entry_again_restores_it_again() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::holding("one");
        app.reduce(Action::PollClipboard, &mut clipboard);

        app.reduce(Action::SelectEntry(0), &mut clipboard);
        clipboard.text = Some("copied elsewhere".into());
        app.reduce(Action::SelectEntry(0), &mut clipboard);

        assert_eq!(clipboard.text.as_deref(), Some("one"));
        assert_eq!(clipboard.writes, vec!["one".to_string(), "one".to_string()]);
    }

    #[test]
    fn failed_restore_is_not_fatal() {
        let mut app = AppController::new(win_v());
        let mut clipboard = MemoryClipboard::holding("one");
        app.reduce(Action::PollClipboard, &mut clipboard);
        clipboard.locked = true;

        assert!(app.reduce(Action::SelectEntry(0), &mut clipboard).is_empty());
        assert!(app.reduce(Action::SelectEntry(9), &mut clipboard).is_empty());
        assert!(clipboard.writes.is_empty());
    }
}
