use std::collections::BTreeMap;
use std::rc::Rc;

use ch_platform::WindowId;
use tracing::{debug, info, warn};

use crate::error::{HotkeyError, Result};
use crate::gate::{ActivationEvent, FocusGate};
use crate::platform::{HotkeyRegistrar, MessageWindow};
use crate::signal::{KeyPressedSignal, SubscriptionId};
use crate::types::{Hotkey, HotkeyId, KeyCode, KeyPressed, ModifierSet};

/// How [`HotkeyManager::unregister_all_hotkeys`] treats ids that are not currently bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeardownPolicy {
    /// Unbind every id from the last issued down to 1, including paused ids and ids whose
    /// registration failed. Any refusal aborts the sweep.
    #[default]
    Strict,
    /// Unbind only ids that are live; paused and never-bound ids are forgotten without an
    /// OS call.
    SkipInactive,
}

/// A hotkey bound (or paused) through the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id: HotkeyId,
    pub hotkey: Hotkey,
    /// Window whose activation gates this hotkey.
    pub owner: Option<WindowId>,
}

/// Global hotkey manager.
///
/// Owns the id sequence, the registrations, and the focus gate. Lives on the thread that runs
/// the message window's loop; it is deliberately `!Send`.
pub struct HotkeyManager<R: HotkeyRegistrar, W: MessageWindow> {
    registrar: R,
    window: W,
    current_id: u32,
    registrations: BTreeMap<HotkeyId, Registration>,
    gate: FocusGate,
    key_pressed: Rc<KeyPressedSignal>,
    teardown: TeardownPolicy,
    disposed: bool,
}

impl<R: HotkeyRegistrar, W: MessageWindow> HotkeyManager<R, W> {
    pub fn new(registrar: R, window: W) -> Self {
        Self::with_teardown_policy(registrar, window, TeardownPolicy::default())
    }

    /// Create a manager and subscribe it to the message window's notifications.
    pub fn with_teardown_policy(registrar: R, mut window: W, teardown: TeardownPolicy) -> Self {
        let key_pressed = Rc::new(KeyPressedSignal::new());

        let signal = Rc::clone(&key_pressed);
        window.set_key_pressed_handler(Some(Box::new(move |event: KeyPressed| {
            signal.emit(&event);
        })));

        Self {
            registrar,
            window,
            current_id: 0,
            registrations: BTreeMap::new(),
            gate: FocusGate::new(),
            key_pressed,
            teardown,
            disposed: false,
        }
    }

    /// Register a global hotkey and return its id.
    ///
    /// The id is allocated before the OS call, so a refused binding still consumes it.
    /// With an `owner`, the hotkey is paused whenever that window deactivates (see
    /// [`Self::handle_activation`]).
    pub fn register_hotkey(
        &mut self,
        modifiers: ModifierSet,
        key: KeyCode,
        owner: Option<WindowId>,
    ) -> Result<HotkeyId> {
        self.ensure_alive()?;

        self.current_id += 1;
        let id = HotkeyId::new(self.current_id);
        let hotkey = Hotkey::new(modifiers, key);

        self.registrar
            .bind(self.window.window_id(), id, modifiers, key)
            .map_err(|source| HotkeyError::Registration { id, hotkey, source })?;

        self.registrations.insert(id, Registration { id, hotkey, owner });
        if let Some(owner) = owner {
            self.gate.attach(id, owner);
        }

        debug!(%id, %hotkey, gated = owner.is_some(), "registered hotkey");
        Ok(id)
    }

    /// Convenience for [`Self::register_hotkey`] with a parsed combination.
    pub fn register(&mut self, hotkey: Hotkey, owner: Option<WindowId>) -> Result<HotkeyId> {
        self.register_hotkey(hotkey.modifiers, hotkey.key, owner)
    }

    /// Unregister a single hotkey. A paused hotkey is forgotten without an OS call.
    pub fn unregister_hotkey(&mut self, id: HotkeyId) -> Result<()> {
        self.ensure_alive()?;

        if !self.registrations.contains_key(&id) {
            return Err(HotkeyError::UnknownId(id));
        }

        if !self.gate.is_paused(id) {
            self.registrar
                .unbind(self.window.window_id(), id)
                .map_err(|source| HotkeyError::Unregistration { id, source })?;
        }

        self.registrations.remove(&id);
        self.gate.detach(id);
        debug!(%id, "unregistered hotkey");
        Ok(())
    }

    /// Unregister every id from the last issued down to 1.
    ///
    /// Ids are never reused afterwards. The first refused unbind aborts the sweep; ids already
    /// processed stay unregistered.
    pub fn unregister_all_hotkeys(&mut self) -> Result<()> {
        self.ensure_alive()?;

        let window = self.window.window_id();
        for raw in (1..=self.current_id).rev() {
            let id = HotkeyId::new(raw);

            if self.teardown == TeardownPolicy::SkipInactive && !self.is_live(id) {
                self.registrations.remove(&id);
                self.gate.detach(id);
                continue;
            }

            self.registrar
                .unbind(window, id)
                .map_err(|source| HotkeyError::Unregistration { id, source })?;

            self.registrations.remove(&id);
            self.gate.detach(id);
        }

        debug!(last_id = self.current_id, "unregistered all hotkeys");
        Ok(())
    }

    /// Drive the focus gate for every hotkey owned by `owner`.
    ///
    /// Deactivation unbinds each active gated hotkey and marks it paused; activation binds each
    /// paused one again with its original combination. Already-paused/active ids are skipped.
    pub fn handle_activation(&mut self, owner: WindowId, event: ActivationEvent) -> Result<()> {
        if self.disposed {
            return Ok(());
        }

        let window = self.window.window_id();
        match event {
            ActivationEvent::Deactivated => {
                for id in self.gate.pending_pause(owner) {
                    self.registrar
                        .unbind(window, id)
                        .map_err(|source| HotkeyError::Unregistration { id, source })?;
                    self.gate.mark_paused(id);
                    debug!(%id, "paused hotkey while owner is inactive");
                }
            }
            ActivationEvent::Activated => {
                for id in self.gate.pending_resume(owner) {
                    let Some(registration) = self.registrations.get(&id).copied() else {
                        self.gate.detach(id);
                        continue;
                    };
                    let hotkey = registration.hotkey;

                    self.registrar
                        .bind(window, id, hotkey.modifiers, hotkey.key)
                        .map_err(|source| HotkeyError::Registration { id, hotkey, source })?;
                    self.gate.mark_resumed(id);
                    debug!(%id, %hotkey, "resumed hotkey");
                }
            }
        }
        Ok(())
    }

    /// Subscribe to key presses. Handlers run synchronously, in subscription order.
    pub fn subscribe(&self, handler: impl Fn(&KeyPressed) + 'static) -> SubscriptionId {
        self.key_pressed.subscribe(handler)
    }

    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.key_pressed.unsubscribe(subscription)
    }

    /// Unregister everything, then destroy the message window.
    ///
    /// If the sweep fails the manager stays usable and the error is returned; calling again after
    /// success is a no-op.
    pub fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }

        self.unregister_all_hotkeys()?;
        self.shutdown_window();
        info!(issued = self.current_id, "hotkey manager disposed");
        Ok(())
    }

    pub fn window_id(&self) -> WindowId {
        self.window.window_id()
    }

    /// Last issued id number (0 before the first registration attempt).
    pub fn current_id(&self) -> u32 {
        self.current_id
    }

    pub fn registration(&self, id: HotkeyId) -> Option<&Registration> {
        self.registrations.get(&id)
    }

    pub fn registrations(&self) -> impl Iterator<Item = &Registration> + '_ {
        self.registrations.values()
    }

    pub fn is_paused(&self, id: HotkeyId) -> bool {
        self.gate.is_paused(id)
    }

    pub fn paused_ids(&self) -> Vec<HotkeyId> {
        self.gate.paused_ids().collect()
    }

    pub fn teardown_policy(&self) -> TeardownPolicy {
        self.teardown
    }

    pub fn set_teardown_policy(&mut self, teardown: TeardownPolicy) {
        self.teardown = teardown;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    fn is_live(&self, id: HotkeyId) -> bool {
        self.registrations.contains_key(&id) && !self.gate.is_paused(id)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.disposed {
            Err(HotkeyError::Disposed)
        } else {
            Ok(())
        }
    }

    fn shutdown_window(&mut self) {
        self.window.set_key_pressed_handler(None);
        self.window.destroy();
        self.key_pressed.clear();
        self.disposed = true;
    }
}

impl<R: HotkeyRegistrar, W: MessageWindow> Drop for HotkeyManager<R, W> {
    fn drop(&mut self) {
        if self.disposed {
            return;
        }

        if let Err(e) = self.dispose() {
            warn!("hotkey teardown failed while dropping manager: {e}");
            self.shutdown_window();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ch_platform::WindowId;

    use super::*;
    use crate::error::OsError;
    use crate::platform::KeyPressedHandler;

    #[derive(Default)]
    struct CountingRegistrar {
        binds: u32,
        unbinds: u32,
        refuse_bind: bool,
    }

    impl HotkeyRegistrar for CountingRegistrar {
        fn bind(
            &mut self,
            _: WindowId,
            _: HotkeyId,
            _: ModifierSet,
            _: KeyCode,
        ) -> std::result::Result<(), OsError> {
            if self.refuse_bind {
                return Err(OsError::new(1409, "already registered"));
            }
            self.binds += 1;
            Ok(())
        }

        fn unbind(&mut self, _: WindowId, _: HotkeyId) -> std::result::Result<(), OsError> {
            self.unbinds += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct NullWindow {
        handler: Rc<RefCell<Option<KeyPressedHandler>>>,
        destroyed: Rc<RefCell<u32>>,
    }

    impl MessageWindow for NullWindow {
        fn window_id(&self) -> WindowId {
            WindowId::from_raw(0x99)
        }

        fn set_key_pressed_handler(&mut self, handler: Option<KeyPressedHandler>) {
            *self.handler.borrow_mut() = handler;
        }

        fn destroy(&mut self) {
            *self.destroyed.borrow_mut() += 1;
        }
    }

    #[test]
    fn construction_installs_window_handler() {
        let window = NullWindow::default();
        let handler = Rc::clone(&window.handler);
        let _manager = HotkeyManager::new(CountingRegistrar::default(), window);
        assert!(handler.borrow().is_some());
    }

    #[test]
    fn failed_bind_burns_an_id() {
        let registrar = CountingRegistrar {
            refuse_bind: true,
            ..Default::default()
        };
        let mut manager = HotkeyManager::new(registrar, NullWindow::default());

        assert!(manager.register_hotkey(ModifierSet::ALT, KeyCode::X, None).is_err());
        assert_eq!(manager.current_id(), 1);
        assert!(manager.registration(HotkeyId::new(1)).is_none());
        assert_eq!(manager.registrar().binds, 0);
    }

    #[test]
    fn unregister_unknown_id_is_an_error() {
        let mut manager = HotkeyManager::new(CountingRegistrar::default(), NullWindow::default());
        let err = manager.unregister_hotkey(HotkeyId::new(3)).unwrap_err();
        assert!(matches!(err, HotkeyError::UnknownId(id) if id == HotkeyId::new(3)));
    }

    #[test]
    fn drop_disposes_and_destroys_window() {
        let window = NullWindow::default();
        let destroyed = Rc::clone(&window.destroyed);
        let handler = Rc::clone(&window.handler);
        {
            let mut manager = HotkeyManager::new(CountingRegistrar::default(), window);
            manager.register_hotkey(ModifierSet::META, KeyCode::V, None).unwrap();
        }
        assert_eq!(*destroyed.borrow(), 1);
        assert!(handler.borrow().is_none());
    }

    #[test]
    fn dispose_is_idempotent() {
        let window = NullWindow::default();
        let destroyed = Rc::clone(&window.destroyed);
        let mut manager = HotkeyManager::new(CountingRegistrar::default(), window);

        manager.dispose().unwrap();
        manager.dispose().unwrap();
        drop(manager);

        assert_eq!(*destroyed.borrow(), 1);
    }

    #[test]
    fn disposed_manager_rejects_registration() {
        let mut manager = HotkeyManager::new(CountingRegistrar::default(), NullWindow::default());
        manager.dispose().unwrap();

        assert!(manager.is_disposed());
        assert!(matches!(
            manager.register_hotkey(ModifierSet::META, KeyCode::V, None),
            Err(HotkeyError::Disposed)
        ));
        assert!(matches!(
            manager.unregister_all_hotkeys(),
            Err(HotkeyError::Disposed)
        ));
        // Lifecycle events after disposal are ignored.
        manager
            .handle_activation(WindowId::from_raw(1), ActivationEvent::Deactivated)
            .unwrap();
        assert_eq!(manager.registrar().unbinds, 0);
    }
}
