//! External clock -> engine.
//!
//! Translates the clock's play/stop and position notifications into engine
//! calls. Runs on the clock's own thread: atomics only, no locks, no logging.
//! An export in progress suppresses both translations so renders never
//! depend on a live clock.

use super::adapter::ExternalState;
use super::context::SyncContext;
use crate::compat::Arc;
use crate::transport::{FrameCount, PlayMode, TimePos};

/// Bring the engine's play state in line with the clock.
///
/// Starts a stopped engine, otherwise uses the engine's pause toggle, so a
/// paused engine resumes instead of restarting. No-op when the engine already
/// matches.
pub(crate) fn on_play_state_changed(ctx: &SyncContext, playing: bool) {
    let engine = &*ctx.engine;
    if !ctx.state.is_active() || engine.is_exporting() || engine.is_playing() == playing {
        return;
    }
    if engine.is_stopped() {
        engine.start_playback();
    } else {
        engine.toggle_pause();
    }
}

/// Seek the engine to the clock's position. Song mode only.
pub(crate) fn on_position_changed(ctx: &SyncContext, frame: FrameCount) {
    let engine = &*ctx.engine;
    if !ctx.state.is_active() || engine.is_exporting() || engine.play_mode() != PlayMode::Song {
        return;
    }
    engine.seek_to_time(TimePos::from_frames(frame, engine.frames_per_tick()));
}

/// Body of the callback registered with the external clock.
pub(crate) fn dispatch(ctx: &SyncContext, state: ExternalState, frame: FrameCount) -> bool {
    if !ctx.state.follow_enabled() {
        return true;
    }
    let playing = match state {
        ExternalState::Stopped => false,
        ExternalState::Starting | ExternalState::Rolling => true,
        ExternalState::Looping | ExternalState::NetStarting => return true,
    };
    on_play_state_changed(ctx, playing);
    on_position_changed(ctx, frame);
    true
}

/// Handle for feeding external clock notifications to the engine by hand,
/// e.g. from a provider that reports through its own event loop instead of
/// the registered callback.
#[derive(Clone)]
pub struct ExternalEvents {
    ctx: Arc<SyncContext>,
}

impl ExternalEvents {
    pub(crate) fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    pub fn on_play_state_changed(&self, playing: bool) {
        on_play_state_changed(&self.ctx, playing);
    }

    pub fn on_position_changed(&self, frame: FrameCount) {
        on_position_changed(&self.ctx, frame);
    }

    /// Same as the registered callback: ignored unless following.
    pub fn dispatch(&self, state: ExternalState, frame: FrameCount) -> bool {
        dispatch(&self.ctx, state, frame)
    }

    /// Engine output rate, for providers that report time instead of frames.
    pub fn processing_sample_rate(&self) -> u32 {
        self.ctx.engine.output_sample_rate()
    }
}
