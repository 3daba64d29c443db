//! State shared by the controller, the hooks, the event adapter and the poller.

use super::adapter::{ExternalState, StateCallback, TransportAdapter};
use super::events;
use super::mode::SyncMode;
use super::state::{SyncSnapshot, SyncState};
use crate::compat::{Arc, Mutex, Weak};
use crate::transport::{FrameCount, PlaybackEngine};

pub(crate) struct SyncContext {
    pub(crate) state: SyncState,
    pub(crate) adapter: TransportAdapter,
    pub(crate) engine: Arc<dyn PlaybackEngine>,
    /// Serializes mode changes, on/off and (un)binding. Never taken on the
    /// callback, hook or tick paths.
    pub(crate) control: Mutex<()>,
}

impl SyncContext {
    pub(crate) fn new(engine: Arc<dyn PlaybackEngine>, mode: SyncMode) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<SyncContext>| {
            let weak = weak.clone();
            // The provider keeps this callback alive; a strong reference here
            // would keep the whole context alive through the handle.
            let callback: StateCallback =
                Arc::new(move |state: ExternalState, frame: FrameCount| {
                    match weak.upgrade() {
                        Some(ctx) => events::dispatch(&ctx, state, frame),
                        None => true,
                    }
                });

            Self {
                state: SyncState::new(mode),
                adapter: TransportAdapter::new(callback),
                engine,
                control: Mutex::new(()),
            }
        })
    }

    pub(crate) fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot::capture(
            &self.state,
            self.adapter.is_available(),
            self.adapter.last_observed_state(),
        )
    }
}
