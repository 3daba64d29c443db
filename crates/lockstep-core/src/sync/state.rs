//! Shared sync state - lock-free so the external clock's thread can read it.

use serde::{Deserialize, Serialize};

use super::adapter::ExternalState;
use super::mode::SyncMode;
use crate::compat::{AtomicU8, Ordering};
use crate::transport::FrameCount;
use crate::{AtomicFlag, AtomicFrame};

/// Mode, on/off switch and bookkeeping shared by the control path, the
/// external clock callback, the engine hooks and the poller.
///
/// `follow` and `lead` are derived from the mode by [`SyncState::apply_mode`]
/// and only take effect while `active` is set; the `*_enabled` accessors
/// return the effective value.
#[derive(Debug)]
pub struct SyncState {
    mode: AtomicU8,
    active: AtomicFlag,
    follow: AtomicFlag,
    lead: AtomicFlag,
    /// Engine position seen by the last tick while stopped.
    last_local_frame: AtomicFrame,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new(SyncMode::Leader)
    }
}

impl SyncState {
    /// Create state in `mode`, switched off.
    pub fn new(mode: SyncMode) -> Self {
        let state = Self {
            mode: AtomicU8::new(SyncMode::Leader.to_u8()),
            active: AtomicFlag::new(false),
            follow: AtomicFlag::new(false),
            lead: AtomicFlag::new(true),
            last_local_frame: AtomicFrame::new(0),
        };
        state.apply_mode(mode);
        state
    }

    pub fn mode(&self) -> SyncMode {
        SyncMode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Store `mode` and derive both direction flags from it.
    ///
    /// Returns false for the sentinel, which changes nothing here.
    pub(crate) fn apply_mode(&self, mode: SyncMode) -> bool {
        if !mode.is_live() {
            return false;
        }
        self.follow.set(mode.follows());
        self.lead.set(mode.leads());
        self.mode.store(mode.to_u8(), Ordering::Release);
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    pub(crate) fn toggle_active(&self) -> bool {
        self.active.toggle()
    }

    /// Follow direction as configured by the mode, ignoring `active`.
    pub(crate) fn follow_flag(&self) -> bool {
        self.follow.get()
    }

    /// Engine reacts to the external clock right now.
    pub fn follow_enabled(&self) -> bool {
        self.active.get() && self.follow.get()
    }

    /// Engine drives the external clock right now.
    pub fn lead_enabled(&self) -> bool {
        self.active.get() && self.lead.get()
    }

    pub fn last_known_local_frame(&self) -> FrameCount {
        self.last_local_frame.get()
    }

    /// Record the engine's stopped position, returning the previous one.
    pub(crate) fn swap_last_known_local_frame(&self, frame: FrameCount) -> FrameCount {
        self.last_local_frame.swap(frame)
    }
}

/// Snapshot of sync state for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub mode: SyncMode,
    pub active: bool,
    /// Effective follow direction (already gated by `active`).
    pub following: bool,
    /// Effective lead direction (already gated by `active`).
    pub leading: bool,
    pub available: bool,
    pub last_known_local_frame: FrameCount,
    pub last_external_state: ExternalState,
}

impl SyncSnapshot {
    pub(crate) fn capture(
        state: &SyncState,
        available: bool,
        last_external_state: ExternalState,
    ) -> Self {
        Self {
            mode: state.mode(),
            active: state.is_active(),
            following: state.follow_enabled(),
            leading: state.lead_enabled(),
            available,
            last_known_local_frame: state.last_known_local_frame(),
            last_external_state,
        }
    }
}
