//! Window-focus gate.
//!
//! A registration with an owning window is kept bound only while that window is active. Each
//! gated id is either *Active* (bound with the OS) or *Paused* (unbound, remembered in the
//! paused set). Ids without an owner never enter the gate.
//!
//! [`FocusGate`] is pure bookkeeping; [`HotkeyManager::handle_activation`] performs the OS calls
//! and commits each transition only after its call succeeds.
//!
//! [`HotkeyManager::handle_activation`]: crate::HotkeyManager::handle_activation

use std::collections::{BTreeMap, BTreeSet};

use ch_platform::{WindowEvent, WindowId};

use crate::types::HotkeyId;

/// Owning-window lifecycle event that drives the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEvent {
    Activated,
    Deactivated,
}

impl ActivationEvent {
    pub fn from_window_event(event: WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::Activated => Some(ActivationEvent::Activated),
            WindowEvent::Deactivated => Some(ActivationEvent::Deactivated),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FocusGate {
    owners: BTreeMap<HotkeyId, WindowId>,
    paused: BTreeSet<HotkeyId>,
}

impl FocusGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start gating `id` on `owner`. The id enters in the Active state.
    pub fn attach(&mut self, id: HotkeyId, owner: WindowId) {
        self.owners.insert(id, owner);
    }

    /// Stop gating `id`. Returns `true` if it was paused at the time.
    pub fn detach(&mut self, id: HotkeyId) -> bool {
        self.owners.remove(&id);
        self.paused.remove(&id)
    }

    pub fn is_gated(&self, id: HotkeyId) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn owner(&self, id: HotkeyId) -> Option<WindowId> {
        self.owners.get(&id).copied()
    }

    pub fn is_paused(&self, id: HotkeyId) -> bool {
        self.paused.contains(&id)
    }

    pub fn paused_ids(&self) -> impl Iterator<Item = HotkeyId> + '_ {
        self.paused.iter().copied()
    }

    /// Ids owned by `owner` that a deactivation must unbind, ascending.
    pub fn pending_pause(&self, owner: WindowId) -> Vec<HotkeyId> {
        self.owned_by(owner)
            .filter(|id| !self.paused.contains(id))
            .collect()
    }

    /// Ids owned by `owner` that an activation must bind again, ascending.
    pub fn pending_resume(&self, owner: WindowId) -> Vec<HotkeyId> {
        self.owned_by(owner)
            .filter(|id| self.paused.contains(id))
            .collect()
    }

    /// Active → Paused. Returns `false` if the id was not gated or already paused.
    pub fn mark_paused(&mut self, id: HotkeyId) -> bool {
        self.owners.contains_key(&id) && self.paused.insert(id)
    }

    /// Paused → Active. Returns `false` if the id was not paused.
    pub fn mark_resumed(&mut self, id: HotkeyId) -> bool {
        self.paused.remove(&id)
    }

    fn owned_by(&self, owner: WindowId) -> impl Iterator<Item = HotkeyId> + '_ {
        self.owners
            .iter()
            .filter(move |(_, o)| **o == owner)
            .map(|(id, _)| *id)
    }
}
