mod common;

use ch_hotkey::{
    ActivationEvent, Hotkey, HotkeyError, HotkeyId, KeyCode, ModifierSet, TeardownPolicy,
};
use ch_platform::WindowId;
use common::{NOT_REGISTERED, harness, harness_with};

const OWNER: WindowId = WindowId::from_raw(0x2000);

fn register_three(h: &mut common::Harness) {
    for key in [KeyCode::V, KeyCode::C, KeyCode::X] {
        h.manager
            .register_hotkey(ModifierSet::META, key, None)
            .unwrap();
    }
}

#[test]
fn unregister_all_sweeps_ids_in_descending_order() {
    let mut h = harness();
    register_three(&mut h);

    h.manager.unregister_all_hotkeys().unwrap();

    assert_eq!(h.registrar.unbind_calls(), vec![3, 2, 1]);
    assert_eq!(h.manager.registrations().count(), 0);
}

#[test]
fn ids_are_not_reused_after_unregister_all() {
    let mut h = harness_with(TeardownPolicy::SkipInactive);
    register_three(&mut h);
    h.manager.unregister_all_hotkeys().unwrap();

    let next = h
        .manager
        .register_hotkey(ModifierSet::META, KeyCode::V, None)
        .unwrap();
    assert_eq!(next, HotkeyId::new(4));
}

#[test]
fn strict_sweep_aborts_on_a_paused_id() {
    let mut h = harness();
    register_three(&mut h);
    let gated = h
        .manager
        .register_hotkey(ModifierSet::CONTROL, KeyCode::S, Some(OWNER))
        .unwrap();
    h.manager
        .handle_activation(OWNER, ActivationEvent::Deactivated)
        .unwrap();
    h.registrar.clear_calls();

    let err = h.manager.unregister_all_hotkeys().unwrap_err();

    match err {
        HotkeyError::Unregistration { id, source } => {
            assert_eq!(id, gated);
            assert_eq!(source.code, NOT_REGISTERED);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Nothing below the failing id was attempted.
    assert_eq!(h.registrar.unbind_calls(), vec![4]);
    assert_eq!(h.manager.registrations().count(), 4);
}

#[test]
fn strict_sweep_includes_ids_whose_registration_failed() {
    let mut h = harness();
    h.manager
        .register_hotkey(ModifierSet::META, KeyCode::V, None)
        .unwrap();
    let claimed = Hotkey::new(ModifierSet::CONTROL | ModifierSet::ALT, KeyCode::X);
    h.registrar.claim_elsewhere(claimed);
    assert!(h.manager.register(claimed, None).is_err());
    h.manager
        .register_hotkey(ModifierSet::META, KeyCode::C, None)
        .unwrap();

    let err = h.manager.unregister_all_hotkeys().unwrap_err();

    assert_eq!(err.id(), Some(HotkeyId::new(2)));
    assert_eq!(h.registrar.unbind_calls(), vec![3, 2]);
    // Id 3 was processed before the abort, id 1 was not.
    assert!(h.manager.registration(HotkeyId::new(3)).is_none());
    assert!(h.manager.registration(HotkeyId::new(1)).is_some());
}

#[test]
fn skip_inactive_sweep_leaves_paused_and_phantom_ids_alone() {
    let mut h = harness_with(TeardownPolicy::SkipInactive);
    h.manager
        .register_hotkey(ModifierSet::META, KeyCode::V, None)
        .unwrap();
    let claimed = Hotkey::new(ModifierSet::CONTROL | ModifierSet::ALT, KeyCode::X);
    h.registrar.claim_elsewhere(claimed);
    assert!(h.manager.register(claimed, None).is_err());
    h.manager
        .register_hotkey(ModifierSet::META, KeyCode::C, None)
        .unwrap();
    h.manager
        .register_hotkey(ModifierSet::SHIFT, KeyCode::S, Some(OWNER))
        .unwrap();
    h.manager
        .handle_activation(OWNER, ActivationEvent::Deactivated)
        .unwrap();
    h.registrar.clear_calls();

    h.manager.unregister_all_hotkeys().unwrap();

    assert_eq!(h.registrar.unbind_calls(), vec![3, 1]);
    assert!(h.manager.paused_ids().is_empty());
    assert_eq!(h.manager.registrations().count(), 0);
}

#[test]
fn dispose_unregisters_then_destroys_window() {
    let mut h = harness();
    register_three(&mut h);

    h.manager.dispose().unwrap();

    assert_eq!(h.registrar.unbind_calls(), vec![3, 2, 1]);
    assert_eq!(h.window.destroyed(), 1);
    assert!(h.manager.is_disposed());
    // The window no longer forwards notifications.
    assert!(!h.window.fire(1, common::lparam(ModifierSet::META, KeyCode::V)));
}

#[test]
fn failed_dispose_keeps_window_until_drop() {
    let mut h = harness();
    register_three(&mut h);
    h.registrar.0.borrow_mut().refuse_unbind = true;

    assert!(h.manager.dispose().is_err());
    assert_eq!(h.window.destroyed(), 0);
    assert!(!h.manager.is_disposed());

    let window = h.window.clone();
    drop(h);
    assert_eq!(window.destroyed(), 1);
}

#[test]
fn failed_strict_dispose_can_finish_with_skip_inactive() {
    let mut h = harness();
    let claimed = Hotkey::new(ModifierSet::META, KeyCode::V);
    h.registrar.claim_elsewhere(claimed);
    assert!(h.manager.register(claimed, None).is_err());
    h.manager
        .register_hotkey(ModifierSet::CONTROL, KeyCode::C, None)
        .unwrap();

    let err = h.manager.dispose().unwrap_err();
    assert_eq!(err.id(), Some(HotkeyId::new(1)));
    assert!(!h.manager.is_disposed());

    h.manager.set_teardown_policy(TeardownPolicy::SkipInactive);
    h.registrar.clear_calls();
    h.manager.dispose().unwrap();

    // Id 2 went in the first pass; the phantom id 1 is skipped.
    assert!(h.registrar.unbind_calls().is_empty());
    assert!(h.manager.is_disposed());
    assert_eq!(h.window.destroyed(), 1);

    let window = h.window.clone();
    drop(h);
    assert_eq!(window.destroyed(), 1);
}
