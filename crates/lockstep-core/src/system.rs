//! Sync system - owns the shared sync context and the poller thread.

use std::time::Duration;

use tracing::{debug, info};

use crate::compat::{Arc, Mutex};
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::sync::context::SyncContext;
use crate::sync::{
    ExternalEvents, SyncController, SyncHooks, SyncMode, SyncPoller, SyncSnapshot,
    TransportHandle,
};
use crate::transport::PlaybackEngine;

/// External transport sync for one playback engine.
///
/// Starts unbound: every control is inert until a transport handle is bound.
pub struct SyncSystem {
    ctx: Arc<SyncContext>,
    poller: Mutex<Option<SyncPoller>>,
    config: SyncConfig,
}

impl SyncSystem {
    pub fn builder() -> SyncSystemBuilder {
        SyncSystemBuilder::default()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Install the external transport and start polling it.
    ///
    /// A previously bound handle is released first. The current mode's
    /// callback registration is re-applied to the new handle.
    pub fn bind_transport_handle(&self, handle: TransportHandle) -> Result<()> {
        self.stop_poller();
        {
            let _control = self.ctx.control.lock();
            self.release_handle();
            self.ctx.adapter.bind(handle);
            self.ctx
                .adapter
                .set_follow_callback(self.ctx.state.follow_flag());
            if self.config.start_active {
                self.ctx.state.set_active(true);
            }
            info!(
                mode = %self.ctx.state.mode(),
                active = self.ctx.state.is_active(),
                "External transport bound"
            );
        }
        self.start_poller()
    }

    /// Release the external transport. Sync is off until the next bind.
    pub fn unbind_transport_handle(&self) {
        self.stop_poller();
        let _control = self.ctx.control.lock();
        if self.release_handle() {
            info!("External transport unbound");
        }
        self.ctx.state.set_active(false);
    }

    /// (Re)start the poller. Fails with [`Error::Unavailable`] when no
    /// transport is bound.
    pub fn start_poller(&self) -> Result<()> {
        if !self.ctx.adapter.is_available() {
            return Err(Error::Unavailable);
        }
        let mut poller = self.poller.lock();
        if poller.as_ref().is_some_and(SyncPoller::is_running) {
            return Ok(());
        }
        *poller = Some(SyncPoller::spawn(
            SyncHooks::new(Arc::clone(&self.ctx)),
            self.config.poll_interval,
        )?);
        Ok(())
    }

    /// Stop and join the poller. Once this returns no tick is in flight.
    pub fn stop_poller(&self) {
        let poller = self.poller.lock().take();
        if let Some(mut poller) = poller {
            poller.stop();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .as_ref()
            .is_some_and(SyncPoller::is_running)
    }

    /// Periodic ticks run by the current poller, 0 when not polling.
    pub fn tick_count(&self) -> u64 {
        self.poller.lock().as_ref().map_or(0, SyncPoller::tick_count)
    }

    pub fn is_available(&self) -> bool {
        self.ctx.adapter.is_available()
    }

    pub fn controller(&self) -> SyncController {
        SyncController::new(Arc::clone(&self.ctx))
    }

    pub fn hooks(&self) -> SyncHooks {
        SyncHooks::new(Arc::clone(&self.ctx))
    }

    pub fn events(&self) -> ExternalEvents {
        ExternalEvents::new(Arc::clone(&self.ctx))
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        self.ctx.snapshot()
    }

    /// Caller holds the control lock. Returns whether a handle was bound.
    fn release_handle(&self) -> bool {
        self.ctx.adapter.set_follow_callback(false);
        self.ctx.adapter.unbind().is_some()
    }
}

impl Drop for SyncSystem {
    fn drop(&mut self) {
        // Retained controllers must find the transport gone, or they could
        // register the callback again
        self.unbind_transport_handle();
        debug!("Sync system dropped");
    }
}

/// Builder for [`SyncSystem`].
#[derive(Default)]
pub struct SyncSystemBuilder {
    engine: Option<Arc<dyn PlaybackEngine>>,
    config: SyncConfig,
}

impl SyncSystemBuilder {
    /// Engine to keep in sync (required).
    pub fn engine(mut self, engine: Arc<dyn PlaybackEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Mode in effect before the first mode change.
    pub fn initial_mode(mut self, mode: SyncMode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Switch sync on as soon as a transport is bound.
    pub fn start_active(mut self, active: bool) -> Self {
        self.config.start_active = active;
        self
    }

    pub fn build(self) -> Result<SyncSystem> {
        self.config.validate()?;
        let engine = self.engine.ok_or(Error::MissingEngine)?;
        let ctx = SyncContext::new(engine, self.config.initial_mode);
        debug!(mode = %self.config.initial_mode, "Sync system created");
        Ok(SyncSystem {
            ctx,
            poller: Mutex::new(None),
            config: self.config,
        })
    }
}
