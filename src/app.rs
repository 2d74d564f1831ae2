use ch_app::{Action, AppController, Command};
use ch_hotkey::{ActivationEvent, HotkeyId, TeardownPolicy};
use ch_platform::{InputEvent, WindowEvent, WindowId, WindowMessageHandler};
use ch_platform_windows::hotkey_manager::{self, Win32HotkeyManager};
use ch_platform_windows::list_box::LBN_SELCHANGE;
use ch_platform_windows::{ListBox, TrayManager, UserEventSender, message_box, win_api};
use ch_settings::Settings;
use tracing::{debug, error, info, warn};

use crate::clipboard::SystemClipboard;
use crate::constants::{
    ENTRY_LABEL_CHARS, LIST_BOX_ID, TIMER_POLL_CLIPBOARD_ID, WINDOW_TITLE,
};
use crate::error::AppResult;
use crate::host_event::HostEvent;

/// The clipboard history window.
pub struct App {
    controller: AppController,
    hotkeys: Win32HotkeyManager,
    show_hotkey_id: Option<HotkeyId>,
    /// The show hotkey only stays bound while this window is active.
    gate_on_focus: bool,
    events: UserEventSender<HostEvent>,
    clipboard: SystemClipboard,
    list: ListBox,
    tray: TrayManager,
}

impl App {
    pub fn new(
        window: WindowId,
        settings: &Settings,
        events: UserEventSender<HostEvent>,
    ) -> AppResult<Self> {
        let hwnd = ch_platform_windows::hwnd(window);
        let show_hotkey = settings.show_hotkey();

        let mut hotkeys = hotkey_manager::create(settings.teardown_policy())?;
        let sender = events.clone();
        hotkeys.subscribe(move |event| {
            let _ = sender.send(HostEvent::HotkeyPressed(*event));
        });

        let gate_on_focus = settings.pause_hotkeys_when_inactive;
        let owner = gate_on_focus.then_some(window);
        let show_hotkey_id = match hotkeys.register(show_hotkey, owner) {
            Ok(id) => Some(id),
            Err(e) => {
                // The window is still reachable from the tray.
                warn!("{e}");
                message_box::show_warning(
                    Some(hwnd),
                    WINDOW_TITLE,
                    &format!("{e}\n\nUse the tray icon to open the history."),
                );
                None
            }
        };

        let list = ListBox::create(hwnd, LIST_BOX_ID)?;
        let client = win_api::get_client_rect(hwnd)?;
        list.fit_to(client.right - client.left, client.bottom - client.top);

        let mut tray = TrayManager::new();
        if let Err(e) = tray.initialize(window, WINDOW_TITLE) {
            warn!("tray icon unavailable: {e}");
        }

        win_api::start_timer(hwnd, TIMER_POLL_CLIPBOARD_ID, settings.poll_interval_ms())?;

        info!(hotkey = %show_hotkey, gated = gate_on_focus, "history window ready");
        Ok(Self {
            controller: AppController::new(show_hotkey),
            hotkeys,
            show_hotkey_id,
            gate_on_focus,
            events,
            clipboard: SystemClipboard::new(window),
            list,
            tray,
        })
    }

    fn dispatch(&mut self, window: WindowId, action: Action) {
        let commands = self.controller.reduce(action, &mut self.clipboard);
        for command in commands {
            self.execute(window, command);
        }
    }

    fn execute(&mut self, window: WindowId, command: Command) {
        let hwnd = ch_platform_windows::hwnd(window);
        match command {
            Command::ShowWindow => {
                let _ = win_api::restore_window(hwnd);
            }
            Command::HideWindow => {
                let _ = win_api::hide_window(hwnd);
            }
            Command::HistoryChanged { index } => {
                if let Some(entry) = self.controller.history().get(index) {
                    self.list.push(&entry.label(ENTRY_LABEL_CHARS));
                }
            }
            Command::Exit => ch_platform_windows::request_exit(window),
        }
    }

    fn shutdown(&mut self, window: WindowId) {
        let _ = win_api::stop_timer(ch_platform_windows::hwnd(window), TIMER_POLL_CLIPBOARD_ID);
        self.tray.cleanup();

        if let Err(e) = self.hotkeys.dispose() {
            error!(id = ?self.show_hotkey_id, "hotkey cleanup failed: {e}");
            // Finish with whatever is still bound so dropping the manager has nothing left to do.
            self.hotkeys.set_teardown_policy(TeardownPolicy::SkipInactive);
            if let Err(e) = self.hotkeys.dispose() {
                error!("hotkey cleanup retry failed: {e}");
            }
        }
    }
}

impl WindowMessageHandler for App {
    type WindowHandle = WindowId;
    type UserEvent = HostEvent;

    fn handle_input_event(&mut self, window: WindowId, event: InputEvent) -> Option<isize> {
        match event {
            InputEvent::Tray(tray_event) => {
                self.dispatch(window, Action::Tray(tray_event));
                Some(0)
            }

            InputEvent::Timer { id } if id == TIMER_POLL_CLIPBOARD_ID => {
                self.dispatch(window, Action::PollClipboard);
                Some(0)
            }

            InputEvent::Control { id, notification }
                if id == LIST_BOX_ID && notification == LBN_SELCHANGE =>
            {
                if let Some(index) = self.list.take_selection() {
                    self.dispatch(window, Action::SelectEntry(index));
                }
                Some(0)
            }

            _ => None,
        }
    }

    fn handle_window_event(&mut self, _window: WindowId, event: WindowEvent) -> Option<isize> {
        match event {
            WindowEvent::Resized { width, height } => self.list.fit_to(width, height),

            // Posted so the gate runs outside of whatever triggered the activation change.
            WindowEvent::Activated | WindowEvent::Deactivated if self.gate_on_focus => {
                if let Some(activation) = ActivationEvent::from_window_event(event) {
                    let _ = self.events.send(HostEvent::Activation(activation));
                }
            }

            _ => {}
        }
        // Let the default procedure finish activation and sizing.
        None
    }

    fn handle_user_event(&mut self, window: WindowId, event: HostEvent) -> Option<isize> {
        match event {
            HostEvent::HotkeyPressed(pressed) => {
                debug!(id = %pressed.id, hotkey = %pressed.hotkey(), "hotkey pressed");
                self.dispatch(window, Action::HotkeyPressed(pressed));
            }

            HostEvent::Activation(activation) => {
                if let Err(e) = self.hotkeys.handle_activation(window, activation) {
                    warn!("focus gate: {e}");
                }
            }

            HostEvent::ShowWindow => self.execute(window, Command::ShowWindow),
        }
        Some(0)
    }

    fn handle_close_requested(&mut self, window: WindowId) -> Option<isize> {
        self.dispatch(window, Action::CloseRequested);
        Some(0)
    }

    fn handle_destroy(&mut self, window: WindowId) {
        self.shutdown(window);
        info!("history window closed");
    }
}
