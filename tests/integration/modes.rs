//! Mode controller integration tests
//!
//! Mode ring, on/off switch, callback registration and the inert behavior
//! while no external transport is bound.

use lockstep::prelude::*;
use proptest::prelude::*;

use crate::helpers::*;

#[test]
fn test_initial_state_after_bind() {
    let f = test_system(SyncMode::Leader);
    let snap = f.system.snapshot();
    assert_eq!(snap.mode, SyncMode::Leader);
    assert!(snap.available);
    assert!(!snap.active);
    assert!(!snap.following);
    assert!(!snap.leading);
    assert_eq!(snap.last_external_state, ExternalState::Stopped);
}

#[test]
fn test_mode_button_cycles() {
    let f = test_system(SyncMode::Leader);
    let controller = f.controller();
    let seen: Vec<SyncMode> = (0..6).map(|_| controller.toggle_mode()).collect();
    assert_eq!(
        seen,
        vec![
            SyncMode::Follower,
            SyncMode::Duplex,
            SyncMode::Leader,
            SyncMode::Follower,
            SyncMode::Duplex,
            SyncMode::Leader,
        ]
    );
}

#[test]
fn test_follow_registration_tracks_mode() {
    let f = test_system(SyncMode::Leader);
    let controller = f.controller();
    assert!(!f.transport.has_callback());

    controller.set_mode(SyncMode::Follower);
    assert_eq!(f.transport.registered_count(), 1);

    controller.set_mode(SyncMode::Duplex);
    assert_eq!(f.transport.registered_count(), 1);

    controller.set_mode(SyncMode::Leader);
    assert_eq!(f.transport.registered_count(), 0);
}

#[test]
fn test_unbound_controls_are_inert() {
    let (system, engine) = unbound_system(SyncMode::Follower);
    let controller = system.controller();

    assert!(!controller.is_available());
    assert_eq!(controller.toggle_mode(), SyncMode::Follower);
    controller.set_mode(SyncMode::Leader);
    assert!(!controller.toggle_on_off());
    assert!(!controller.set_active(true));

    let snap = controller.snapshot();
    assert_eq!(snap.mode, SyncMode::Follower);
    assert!(!snap.active);

    // Hooks and events are no-ops as well
    let hooks = system.hooks();
    hooks.on_transport_started();
    hooks.on_periodic_tick();
    system.events().on_play_state_changed(true);
    assert!(engine.calls().is_empty());
}

#[test]
fn test_unbind_forces_sync_off() {
    let f = test_system(SyncMode::Duplex);
    assert!(f.controller().toggle_on_off());

    f.system.unbind_transport_handle();
    assert!(!f.controller().is_active());
    assert!(!f.controller().toggle_on_off());
    assert!(!f.transport.has_callback());

    // Rebinding restores the mode's registration, sync stays off
    f.system
        .bind_transport_handle(f.transport.clone())
        .expect("rebind");
    assert!(f.transport.has_callback());
    assert!(!f.controller().is_active());
    assert_eq!(f.controller().mode(), SyncMode::Duplex);
}

#[test]
fn test_sentinel_mode_switches_off() {
    let f = test_system(SyncMode::Duplex);
    let controller = f.controller();
    controller.toggle_on_off();

    controller.set_mode(SyncMode::Last);
    assert!(!controller.is_active());
    assert_eq!(controller.mode(), SyncMode::Duplex);
}

#[test]
fn test_config_roundtrip_builds_system() {
    let config = SyncConfig {
        initial_mode: SyncMode::Follower,
        start_active: true,
        ..Default::default()
    };
    let (_, engine) = unbound_system(SyncMode::Leader);
    let system = SyncSystem::builder()
        .engine(engine)
        .config(config.clone())
        .build()
        .expect("valid config");
    assert_eq!(system.config(), &config);
    assert_eq!(system.controller().mode(), SyncMode::Follower);
}

fn live_mode() -> impl Strategy<Value = SyncMode> {
    prop::sample::select(SyncMode::ALL.to_vec())
}

proptest! {
    /// Pressing the mode button COUNT times always lands on the starting mode,
    /// and the effective directions always match the mode while active.
    #[test]
    fn prop_mode_ring_closes(start in live_mode(), presses in 0usize..12) {
        let f = test_system(start);
        f.system.stop_poller();
        let controller = f.controller();
        controller.set_active(true);

        let mut expected = start;
        for _ in 0..presses {
            expected = expected.next();
            prop_assert_eq!(controller.toggle_mode(), expected);
            let snap = controller.snapshot();
            prop_assert_eq!(snap.following, expected.follows());
            prop_assert_eq!(snap.leading, expected.leads());
            prop_assert_eq!(f.transport.has_callback(), expected.follows());
        }

        for _ in 0..SyncMode::COUNT {
            controller.toggle_mode();
        }
        prop_assert_eq!(controller.mode(), expected);
    }

    /// Without a transport no sequence of control operations turns sync on
    /// or changes the mode.
    #[test]
    fn prop_unbound_never_activates(start in live_mode(), ops in prop::collection::vec(0u8..4, 0..16)) {
        let (system, _) = unbound_system(start);
        let controller = system.controller();
        for op in ops {
            match op {
                0 => { controller.toggle_mode(); }
                1 => { controller.toggle_on_off(); }
                2 => { controller.set_active(true); }
                _ => controller.set_mode(SyncMode::Duplex),
            }
            prop_assert!(!controller.is_active());
            prop_assert_eq!(controller.mode(), start);
        }
    }
}
