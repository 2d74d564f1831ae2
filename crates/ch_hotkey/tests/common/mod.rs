#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ch_hotkey::{
    Hotkey, HotkeyId, HotkeyManager, HotkeyRegistrar, KeyCode, KeyPressedHandler, MessageWindow,
    ModifierSet, OsError, TeardownPolicy, decode_notification,
};
use ch_platform::WindowId;

pub const MESSAGE_WINDOW: WindowId = WindowId::from_raw(0x1000);

/// Win32 `ERROR_HOTKEY_ALREADY_REGISTERED`.
pub const ALREADY_REGISTERED: i32 = 1409;
/// Win32 `ERROR_HOTKEY_NOT_REGISTERED`.
pub const NOT_REGISTERED: i32 = 1419;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Bind {
        id: u32,
        modifiers: ModifierSet,
        key: KeyCode,
    },
    Unbind {
        id: u32,
    },
}

#[derive(Debug, Default)]
pub struct RegistrarState {
    pub calls: Vec<Call>,
    /// Bindings the fake OS currently holds.
    pub live: BTreeMap<u32, Hotkey>,
    /// Combinations "another process" owns.
    pub claimed_elsewhere: Vec<Hotkey>,
    pub refuse_unbind: bool,
}

/// Registrar double that behaves like `RegisterHotKey`/`UnregisterHotKey`.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistrar(pub Rc<RefCell<RegistrarState>>);

impl FakeRegistrar {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn unbind_calls(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Unbind { id } => Some(id),
                Call::Bind { .. } => None,
            })
            .collect()
    }

    pub fn is_live(&self, id: HotkeyId) -> bool {
        self.0.borrow().live.contains_key(&id.get())
    }

    pub fn claim_elsewhere(&self, hotkey: Hotkey) {
        self.0.borrow_mut().claimed_elsewhere.push(hotkey);
    }

    pub fn release_elsewhere(&self) {
        self.0.borrow_mut().claimed_elsewhere.clear();
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }
}

impl HotkeyRegistrar for FakeRegistrar {
    fn bind(
        &mut self,
        window: WindowId,
        id: HotkeyId,
        modifiers: ModifierSet,
        key: KeyCode,
    ) -> Result<(), OsError> {
        assert_eq!(window, MESSAGE_WINDOW);
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::Bind {
            id: id.get(),
            modifiers,
            key,
        });

        let hotkey = Hotkey::new(modifiers, key);
        if state.claimed_elsewhere.contains(&hotkey)
            || state.live.values().any(|h| *h == hotkey)
            || state.live.contains_key(&id.get())
        {
            return Err(OsError::new(ALREADY_REGISTERED, "Hot key is already registered."));
        }
        state.live.insert(id.get(), hotkey);
        Ok(())
    }

    fn unbind(&mut self, window: WindowId, id: HotkeyId) -> Result<(), OsError> {
        assert_eq!(window, MESSAGE_WINDOW);
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::Unbind { id: id.get() });

        if state.refuse_unbind || state.live.remove(&id.get()).is_none() {
            return Err(OsError::new(NOT_REGISTERED, "Hot key is not registered."));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct WindowState {
    pub handler: Option<KeyPressedHandler>,
    pub destroyed: u32,
}

/// Message window double; [`FakeWindow::fire`] plays the role of `WM_HOTKEY`.
#[derive(Clone, Default)]
pub struct FakeWindow(pub Rc<RefCell<WindowState>>);

impl FakeWindow {
    pub fn fire(&self, wparam: usize, lparam: isize) -> bool {
        let state = self.0.borrow();
        match state.handler.as_ref() {
            Some(handler) => {
                handler(decode_notification(wparam, lparam));
                true
            }
            None => false,
        }
    }

    pub fn destroyed(&self) -> u32 {
        self.0.borrow().destroyed
    }
}

impl MessageWindow for FakeWindow {
    fn window_id(&self) -> WindowId {
        MESSAGE_WINDOW
    }

    fn set_key_pressed_handler(&mut self, handler: Option<KeyPressedHandler>) {
        self.0.borrow_mut().handler = handler;
    }

    fn destroy(&mut self) {
        self.0.borrow_mut().destroyed += 1;
    }
}

pub struct Harness {
    pub manager: HotkeyManager<FakeRegistrar, FakeWindow>,
    pub registrar: FakeRegistrar,
    pub window: FakeWindow,
}

pub fn harness() -> Harness {
    harness_with(TeardownPolicy::Strict)
}

pub fn harness_with(teardown: TeardownPolicy) -> Harness {
    let registrar = FakeRegistrar::default();
    let window = FakeWindow::default();
    let manager =
        HotkeyManager::with_teardown_policy(registrar.clone(), window.clone(), teardown);
    Harness {
        manager,
        registrar,
        window,
    }
}

/// `WM_HOTKEY` lparam for a combination.
pub fn lparam(modifiers: ModifierSet, key: KeyCode) -> isize {
    ((key.0 << 16) | (modifiers.bits() & 0xFFFF)) as isize
}
