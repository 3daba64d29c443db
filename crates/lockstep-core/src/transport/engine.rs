//! What the sync core needs from the playback engine.

use serde::{Deserialize, Serialize};

use super::position::{FrameCount, TimePos};

/// Engine play mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Whole-song playback. The only mode that follows external relocation.
    #[default]
    Song,
    /// Pattern / beat-bassline loop playback.
    Pattern,
}

/// Playback engine interface consumed by the sync core.
///
/// Methods may be called from the external clock's real-time thread, so
/// implementations should answer from atomics and queue any real work
/// (seeks, play/pause) for their own thread.
pub trait PlaybackEngine: Send + Sync {
    fn is_playing(&self) -> bool;

    fn is_stopped(&self) -> bool;

    /// True while rendering to a file. Suppresses sync in both directions.
    fn is_exporting(&self) -> bool;

    fn play_mode(&self) -> PlayMode;

    fn current_frame(&self) -> FrameCount;

    fn frames_per_tick(&self) -> f64;

    fn output_sample_rate(&self) -> u32;

    fn seek_to_time(&self, time: TimePos);

    /// Pause a playing engine or resume a paused one.
    fn toggle_pause(&self);

    /// Start playback from the stopped state.
    fn start_playback(&self);
}
