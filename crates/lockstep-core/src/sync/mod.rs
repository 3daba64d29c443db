//! External transport synchronization.
//!
//! The engine and an external clock can drive each other in either direction:
//! - [`SyncController`]: mode and on/off control
//! - [`SyncHooks`]: engine -> clock
//! - [`ExternalEvents`]: clock -> engine
//! - [`SyncPoller`]: periodic tick for what neither side reports

mod adapter;
pub(crate) mod context;
mod controller;
mod events;
mod hooks;
mod mode;
mod poller;
mod state;

pub use adapter::{
    ExternalState, ExternalTransport, StateCallback, TransportAdapter, TransportHandle,
};
pub use controller::SyncController;
pub use events::ExternalEvents;
pub use hooks::SyncHooks;
pub use mode::SyncMode;
pub use poller::SyncPoller;
pub use state::{SyncSnapshot, SyncState};
