//! Keeps a playback engine and an external transport clock in lockstep.
//!
//! # Primary API
//!
//! - [`SyncSystem`] / [`SyncSystemBuilder`]: Main entry point, owns the poller
//! - [`SyncController`]: Mode and on/off buttons
//! - [`SyncHooks`]: Engine lifecycle hooks (engine -> clock)
//! - [`ExternalEvents`]: Clock notifications (clock -> engine)
//! - [`ExternalTransport`] / [`PlaybackEngine`]: The two sides to implement
//!
//! # Example
//!
//! ```ignore
//! use lockstep_core::{SyncMode, SyncSystem};
//!
//! let system = SyncSystem::builder()
//!     .engine(engine)
//!     .initial_mode(SyncMode::Duplex)
//!     .build()?;
//!
//! system.bind_transport_handle(jack_transport)?;
//! system.controller().toggle_on_off();
//!
//! let hooks = system.hooks();
//! engine.on_play(move || hooks.on_transport_started());
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{SyncConfig, DEFAULT_POLL_INTERVAL};

mod system;
pub use system::{SyncSystem, SyncSystemBuilder};

pub mod sync;
pub use sync::{
    ExternalEvents, ExternalState, ExternalTransport, StateCallback, SyncController, SyncHooks,
    SyncMode, SyncPoller, SyncSnapshot, SyncState, TransportAdapter, TransportHandle,
};

pub(crate) mod transport;
pub use transport::{FrameCount, PlayMode, PlaybackEngine, TimePos};

pub(crate) mod compat;
pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFrame};
#[cfg(any(test, feature = "test-utils"))]
pub use lockfree::AtomicDouble;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
