//! Engine -> external clock.
//!
//! Entry points the playback engine calls on its own transitions, plus the
//! periodic tick driven by the poller. Every hook is a no-op while sync is
//! switched off, and nothing is sent to the clock during an export. Like the
//! event adapter, these may run on a real-time thread and never lock or log.

use super::context::SyncContext;
use super::events;
use super::mode::SyncMode;
use crate::compat::Arc;

/// Push the engine's position to the clock after a discontinuous jump.
pub(crate) fn on_local_jump(ctx: &SyncContext) {
    if !ctx.state.lead_enabled() || ctx.engine.is_exporting() {
        return;
    }
    ctx.adapter.request_locate(ctx.engine.current_frame());
}

pub(crate) fn on_transport_started(ctx: &SyncContext) {
    if !ctx.state.is_active() || ctx.engine.is_exporting() {
        return;
    }
    if ctx.state.lead_enabled() {
        ctx.adapter.request_start();
    }
    // A leader re-asserts its position on every start
    if ctx.state.mode() == SyncMode::Leader {
        on_local_jump(ctx);
    }
}

pub(crate) fn on_transport_stopped(ctx: &SyncContext) {
    if !ctx.state.is_active() || ctx.engine.is_exporting() {
        return;
    }
    if ctx.state.lead_enabled() {
        ctx.adapter.request_stop();
    }
    if ctx.state.mode() == SyncMode::Leader {
        on_local_jump(ctx);
    }
}

/// Catch what neither side reports while idle.
///
/// 1. The clock entering `Stopped` after a third-party relocation raises no
///    callback, so a polled stop edge stops the engine when following.
/// 2. A seek of the stopped engine raises no jump event, so a changed
///    stopped position is pushed to the clock when leading.
pub(crate) fn on_periodic_tick(ctx: &SyncContext) {
    if !ctx.state.is_active() {
        return;
    }
    if ctx.state.follow_enabled() && ctx.adapter.poll_just_stopped_edge() {
        events::on_play_state_changed(ctx, false);
    }
    if ctx.engine.is_stopped() {
        let frame = ctx.engine.current_frame();
        if ctx.state.lead_enabled() && ctx.state.swap_last_known_local_frame(frame) != frame {
            on_local_jump(ctx);
        }
    }
}

/// Lifecycle hooks handed to the playback engine.
///
/// # Example
/// ```ignore
/// let hooks = system.hooks();
/// engine.on_play(move || hooks.on_transport_started());
/// ```
#[derive(Clone)]
pub struct SyncHooks {
    ctx: Arc<SyncContext>,
}

impl SyncHooks {
    pub(crate) fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Call on any position change not caused by playback itself: loop
    /// wrap, user seek, pattern jump.
    pub fn on_local_jump(&self) {
        on_local_jump(&self.ctx);
    }

    pub fn on_transport_started(&self) {
        on_transport_started(&self.ctx);
    }

    pub fn on_transport_stopped(&self) {
        on_transport_stopped(&self.ctx);
    }

    /// Normally driven by the poller.
    pub fn on_periodic_tick(&self) {
        on_periodic_tick(&self.ctx);
    }
}
