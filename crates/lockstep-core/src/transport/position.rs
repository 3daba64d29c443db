//! Frame and tick positions.
//!
//! The external clock speaks in audio frames; the engine seeks in ticks. The
//! two meet through the engine's current frames-per-tick.

/// Absolute transport position in audio frames.
pub type FrameCount = u64;

/// Position in engine ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimePos {
    pub ticks: i64,
}

impl TimePos {
    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Convert a frame position to ticks, rounding down.
    ///
    /// A frames-per-tick that is not a positive finite number maps every
    /// frame to tick 0.
    #[inline]
    pub fn from_frames(frames: FrameCount, frames_per_tick: f64) -> Self {
        if !(frames_per_tick.is_finite() && frames_per_tick > 0.0) {
            return Self::default();
        }
        Self {
            ticks: (frames as f64 / frames_per_tick) as i64,
        }
    }

    /// Convert back to frames, rounding down. Negative positions clamp to 0.
    #[inline]
    pub fn to_frames(self, frames_per_tick: f64) -> FrameCount {
        if self.ticks <= 0 || !(frames_per_tick.is_finite() && frames_per_tick > 0.0) {
            return 0;
        }
        (self.ticks as f64 * frames_per_tick) as FrameCount
    }
}

impl core::ops::Add<i64> for TimePos {
    type Output = Self;

    #[inline]
    fn add(self, ticks: i64) -> Self {
        Self {
            ticks: self.ticks + ticks,
        }
    }
}

impl core::ops::Sub<TimePos> for TimePos {
    type Output = i64;

    #[inline]
    fn sub(self, other: TimePos) -> i64 {
        self.ticks - other.ticks
    }
}
