//! Sync subsystem configuration.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sync::SyncMode;
use crate::{Error, Result};

/// Default interval between two periodic ticks of the poller.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the sync subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How often the poller runs the periodic tick.
    pub poll_interval: Duration,
    /// Mode in effect before the user touches the mode button.
    pub initial_mode: SyncMode,
    /// Turn sync on as soon as a transport handle is bound.
    pub start_active: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_mode: SyncMode::Leader,
            start_active: false,
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval < MIN_POLL_INTERVAL || self.poll_interval > MAX_POLL_INTERVAL {
            return Err(Error::InvalidConfig(format!(
                "poll_interval {:?} out of range (1ms-1s)",
                self.poll_interval
            )));
        }
        if !self.initial_mode.is_live() {
            return Err(Error::InvalidConfig(format!(
                "initial_mode {:?} is not a sync mode",
                self.initial_mode
            )));
        }
        Ok(())
    }
}
