//! Adapter around the external transport clock.
//!
//! Sole owner of the handle to the external clock. Translates requests from
//! the engine side into start/stop/locate calls and turns the clock's queried
//! state into a "just stopped" edge, since the clock raises no callback when
//! it is relocated while already stopped.

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

use crate::compat::{Arc, AtomicU8, Ordering};
use crate::transport::FrameCount;

/// Transport state reported by the external clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExternalState {
    #[default]
    Stopped = 0,
    Starting = 1,
    Rolling = 2,
    /// Not modeled; ignored by the dispatcher.
    Looping = 3,
    /// Not modeled; ignored by the dispatcher.
    NetStarting = 4,
}

impl ExternalState {
    pub(crate) fn from_u8(val: u8) -> Self {
        match val {
            1 => ExternalState::Starting,
            2 => ExternalState::Rolling,
            3 => ExternalState::Looping,
            4 => ExternalState::NetStarting,
            _ => ExternalState::Stopped,
        }
    }
}

/// Callback registered with the external clock, invoked from its thread with
/// the new state and position. Returns `true` when ready to roll.
pub type StateCallback = Arc<dyn Fn(ExternalState, FrameCount) -> bool + Send + Sync>;

/// Primitives of the external transport provider.
///
/// All calls are fire-and-forget: the provider has no failure signal for
/// start, stop or locate.
pub trait ExternalTransport: Send + Sync {
    fn start(&self);

    fn stop(&self);

    fn locate(&self, frame: FrameCount);

    fn query_state(&self) -> ExternalState;

    /// Install `callback`, or remove the current one with `None`.
    ///
    /// Must not return until the previous callback can no longer be invoked.
    fn set_state_callback(&self, callback: Option<StateCallback>);
}

/// Shared handle to a bound external transport.
pub type TransportHandle = Arc<dyn ExternalTransport>;

pub struct TransportAdapter {
    handle: ArcSwapOption<TransportHandle>,
    follow_callback: StateCallback,
    last_state: AtomicU8,
}

impl TransportAdapter {
    /// `follow_callback` is what gets registered while following.
    pub(crate) fn new(follow_callback: StateCallback) -> Self {
        Self {
            handle: ArcSwapOption::empty(),
            follow_callback,
            last_state: AtomicU8::new(ExternalState::Stopped as u8),
        }
    }

    pub(crate) fn bind(&self, handle: TransportHandle) {
        self.last_state
            .store(ExternalState::Stopped as u8, Ordering::Release);
        self.handle.store(Some(Arc::new(handle)));
    }

    pub(crate) fn unbind(&self) -> Option<TransportHandle> {
        self.handle
            .swap(None)
            .map(|handle| TransportHandle::clone(&handle))
    }

    pub fn is_available(&self) -> bool {
        self.handle.load().is_some()
    }

    pub fn request_start(&self) {
        if let Some(handle) = &*self.handle.load() {
            handle.start();
        }
    }

    pub fn request_stop(&self) {
        if let Some(handle) = &*self.handle.load() {
            handle.stop();
        }
    }

    pub fn request_locate(&self, frame: FrameCount) {
        if let Some(handle) = &*self.handle.load() {
            handle.locate(frame);
        }
    }

    /// Register the follow callback, or unregister it. Unregistering twice is
    /// harmless.
    pub fn set_follow_callback(&self, enabled: bool) {
        if let Some(handle) = &*self.handle.load() {
            let callback = enabled.then(|| StateCallback::clone(&self.follow_callback));
            handle.set_state_callback(callback);
        }
    }

    /// Query the clock and report a transition into `Stopped`.
    ///
    /// Edge-triggered: true once per entry into `Stopped`, false while it
    /// stays there. Without a handle the tracked state resets to `Stopped`.
    pub fn poll_just_stopped_edge(&self) -> bool {
        match &*self.handle.load() {
            Some(handle) => {
                let state = handle.query_state();
                let previous = ExternalState::from_u8(
                    self.last_state.swap(state as u8, Ordering::AcqRel),
                );
                state == ExternalState::Stopped && previous != ExternalState::Stopped
            }
            None => {
                self.last_state
                    .store(ExternalState::Stopped as u8, Ordering::Release);
                false
            }
        }
    }

    /// State seen by the last poll.
    pub fn last_observed_state(&self) -> ExternalState {
        ExternalState::from_u8(self.last_state.load(Ordering::Acquire))
    }
}
