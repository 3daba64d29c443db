//! Engine lifecycle hook integration tests
//!
//! Engine transitions pushed to the external clock.

use lockstep::core::testing::TransportCall;
use lockstep::prelude::*;

use crate::helpers::*;

#[test]
fn test_leader_play_stop_cycle() {
    let f = active_system(SyncMode::Leader);
    let hooks = f.hooks();

    f.engine.set_frame(480);
    hooks.on_transport_started();
    f.engine.set_frame(96_000);
    hooks.on_transport_stopped();

    assert_eq!(
        f.transport.calls(),
        vec![
            TransportCall::Start,
            TransportCall::Locate(480),
            TransportCall::Stop,
            TransportCall::Locate(96_000),
        ]
    );
    assert_eq!(f.transport.position(), 96_000);
}

#[test]
fn test_loop_wrap_pushes_position() {
    let f = active_system(SyncMode::Duplex);
    f.engine.set_playing();
    f.engine.set_frame(0);
    f.hooks().on_local_jump();
    assert_eq!(f.transport.locate_calls(), vec![0]);
}

#[test]
fn test_follower_jump_not_pushed() {
    let f = active_system(SyncMode::Follower);
    f.engine.set_frame(12_345);
    f.hooks().on_local_jump();
    f.hooks().on_transport_started();
    assert!(f.transport.calls().is_empty());
}

#[test]
fn test_switched_off_hooks_do_nothing() {
    let f = test_system(SyncMode::Leader);
    f.system.stop_poller();
    f.engine.set_frame(700);

    let hooks = f.hooks();
    hooks.on_transport_started();
    hooks.on_transport_stopped();
    hooks.on_local_jump();
    hooks.on_periodic_tick();
    assert!(f.transport.calls().is_empty());
}

#[test]
fn test_export_blocks_pushes() {
    let f = active_system(SyncMode::Duplex);
    f.engine.set_exporting(true);
    f.engine.set_frame(1_000);

    let hooks = f.hooks();
    hooks.on_transport_started();
    hooks.on_local_jump();
    hooks.on_periodic_tick();
    hooks.on_transport_stopped();
    assert!(f.transport.calls().is_empty());

    f.engine.set_exporting(false);
    hooks.on_local_jump();
    assert_eq!(f.transport.locate_calls(), vec![1_000]);
}

#[test]
fn test_stopped_seek_reaches_clock_on_tick() {
    let f = active_system(SyncMode::Leader);
    let hooks = f.hooks();

    f.engine.set_frame(1_000);
    hooks.on_periodic_tick();
    f.engine.set_frame(2_000);
    hooks.on_periodic_tick();
    hooks.on_periodic_tick();

    assert_eq!(f.transport.locate_calls(), vec![1_000, 2_000]);
    assert_eq!(f.system.snapshot().last_known_local_frame, 2_000);
}

#[test]
fn test_duplex_external_relocate_while_stopped() {
    let f = active_system(SyncMode::Duplex);
    let hooks = f.hooks();

    f.engine.set_frame(1_000);
    hooks.on_periodic_tick();
    assert_eq!(f.transport.locate_calls(), vec![1_000]);

    // Third party relocates the stopped clock: no callback, no edge
    f.transport.relocate(2_000);
    hooks.on_periodic_tick();
    assert_eq!(f.transport.position(), 2_000);
    assert_eq!(f.transport.locate_calls(), vec![1_000]);

    // Rolling then stopping again raises one edge; the engine is already stopped
    f.transport.set_state(ExternalState::Rolling);
    hooks.on_periodic_tick();
    f.transport.set_state(ExternalState::Stopped);
    hooks.on_periodic_tick();
    assert_eq!(
        f.system.snapshot().last_external_state,
        ExternalState::Stopped
    );
    assert!(f.engine.calls().is_empty());

    // The engine now moving to 2000 while stopped is pushed back out
    f.engine.set_frame(2_000);
    hooks.on_periodic_tick();
    assert_eq!(f.transport.locate_calls(), vec![1_000, 2_000]);
    assert_eq!(f.transport.position(), 2_000);
}
