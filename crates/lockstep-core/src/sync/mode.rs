//! Sync modes, named from the engine's point of view.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which direction(s) of synchronization are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SyncMode {
    /// Engine drives the external clock and ignores its transitions.
    #[default]
    Leader = 0,
    /// Engine follows the external clock and never drives it.
    Follower = 1,
    /// Both directions; position follows the external clock.
    Duplex = 2,
    /// Sentinel, not a live mode. `set_mode(SyncMode::Last)` switches sync
    /// off and leaves the current mode in place.
    Last = 3,
}

impl SyncMode {
    /// Number of live modes.
    pub const COUNT: usize = SyncMode::Last as usize;

    /// Live modes in button order.
    pub const ALL: [SyncMode; SyncMode::COUNT] =
        [SyncMode::Leader, SyncMode::Follower, SyncMode::Duplex];

    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(val: u8) -> Self {
        match val {
            0 => SyncMode::Leader,
            1 => SyncMode::Follower,
            2 => SyncMode::Duplex,
            _ => SyncMode::Last,
        }
    }

    /// Next mode in the ring Leader -> Follower -> Duplex -> Leader.
    pub fn next(self) -> Self {
        match self {
            SyncMode::Leader => SyncMode::Follower,
            SyncMode::Follower => SyncMode::Duplex,
            SyncMode::Duplex | SyncMode::Last => SyncMode::Leader,
        }
    }

    pub fn is_live(self) -> bool {
        self != SyncMode::Last
    }

    /// Whether the engine reacts to external transitions in this mode.
    pub fn follows(self) -> bool {
        matches!(self, SyncMode::Follower | SyncMode::Duplex)
    }

    /// Whether the engine drives the external clock in this mode.
    pub fn leads(self) -> bool {
        matches!(self, SyncMode::Leader | SyncMode::Duplex)
    }

    /// Text for the mode button.
    pub fn label(self) -> &'static str {
        match self {
            SyncMode::Leader => "Leader",
            SyncMode::Follower => "Follower",
            SyncMode::Duplex => "Duplex",
            SyncMode::Last => "Off",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
