//! Mode controller - the surface behind the sync mode and on/off buttons.
//!
//! Every operation is inert while no external transport is bound: it changes
//! nothing except forcing sync off.

use tracing::{debug, info};

use super::context::SyncContext;
use super::mode::SyncMode;
use super::state::SyncSnapshot;
use crate::compat::Arc;

#[derive(Clone)]
pub struct SyncController {
    ctx: Arc<SyncContext>,
}

impl SyncController {
    pub(crate) fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Advance Leader -> Follower -> Duplex -> Leader and apply the result.
    ///
    /// Returns the mode in effect afterwards.
    pub fn toggle_mode(&self) -> SyncMode {
        let _control = self.ctx.control.lock();
        if !self.ensure_available("toggle_mode") {
            return self.ctx.state.mode();
        }
        let mode = self.ctx.state.mode().next();
        self.apply_mode(mode);
        mode
    }

    /// Switch to `mode`, (un)registering the follow callback before returning.
    ///
    /// [`SyncMode::Last`] is not a mode: it switches sync off and leaves the
    /// current mode and directions untouched.
    pub fn set_mode(&self, mode: SyncMode) {
        let _control = self.ctx.control.lock();
        if self.ensure_available("set_mode") {
            self.apply_mode(mode);
        }
    }

    pub fn mode(&self) -> SyncMode {
        self.ctx.state.mode()
    }

    /// Flip sync on or off. Returns whether sync is now on.
    pub fn toggle_on_off(&self) -> bool {
        let _control = self.ctx.control.lock();
        if !self.ensure_available("toggle_on_off") {
            return false;
        }
        let active = self.ctx.state.toggle_active();
        info!(active, mode = %self.ctx.state.mode(), "External sync toggled");
        active
    }

    /// Switch sync on or off explicitly. Returns whether sync is now on.
    pub fn set_active(&self, active: bool) -> bool {
        let _control = self.ctx.control.lock();
        if !self.ensure_available("set_active") {
            return false;
        }
        self.ctx.state.set_active(active);
        info!(active, mode = %self.ctx.state.mode(), "External sync switched");
        active
    }

    pub fn is_active(&self) -> bool {
        self.ctx.state.is_active()
    }

    /// True while an external transport is bound.
    pub fn is_available(&self) -> bool {
        self.ctx.adapter.is_available()
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        self.ctx.snapshot()
    }

    /// Caller holds the control lock.
    fn ensure_available(&self, operation: &str) -> bool {
        if self.ctx.adapter.is_available() {
            return true;
        }
        self.ctx.state.set_active(false);
        debug!(operation, "External transport not available, ignoring");
        false
    }

    /// Caller holds the control lock.
    fn apply_mode(&self, mode: SyncMode) {
        if !self.ctx.state.apply_mode(mode) {
            self.ctx.state.set_active(false);
            info!(mode = %self.ctx.state.mode(), "Sentinel mode requested, external sync off");
            return;
        }
        // Flags are already updated, so a callback still in flight after
        // unregistration sees follow disabled and does nothing.
        self.ctx.adapter.set_follow_callback(mode.follows());
        info!(%mode, "External sync mode changed");
    }
}
