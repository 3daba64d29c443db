//! # Lockstep - External Transport Sync
//!
//! Keeps a playback engine and a shared external transport clock (JACK
//! transport or similar) in lockstep, in either direction.
//!
//! ## Architecture
//!
//! Lockstep is an umbrella crate over:
//! - **lockstep-core** - Sync modes, external clock adapter, lifecycle hooks, poller
//!
//! ## Quick Start
//!
//! ```ignore
//! use lockstep::prelude::*;
//!
//! let sync = SyncSystem::builder()
//!     .engine(engine.clone())
//!     .build()?;
//!
//! // Once the audio backend has a transport client
//! sync.bind_transport_handle(transport)?;
//!
//! // Mode button cycles Leader -> Follower -> Duplex
//! let controller = sync.controller();
//! controller.toggle_mode();
//! controller.toggle_on_off();
//!
//! // Engine transitions drive the external clock
//! let hooks = sync.hooks();
//! hooks.on_transport_started();
//! ```
//!
//! ## Feature Flags
//!
//! - `test-utils` - Recording mocks of the engine and the external transport

/// Re-export of lockstep-core for direct access
pub use lockstep_core as core;

pub use lockstep_core::{
    // Lock-free primitives
    AtomicFlag,
    AtomicFrame,

    // Sync
    ExternalEvents,
    ExternalState,
    ExternalTransport,
    StateCallback,
    SyncController,
    SyncHooks,
    SyncMode,
    SyncSnapshot,
    SyncSystem,
    SyncSystemBuilder,
    TransportHandle,

    // Config
    SyncConfig,

    // Engine side
    FrameCount,
    PlayMode,
    PlaybackEngine,
    TimePos,
};

mod error;
pub use error::{Error, Result};

#[cfg(feature = "test-utils")]
pub use lockstep_core::{testing, AtomicDouble};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Error, Result};

    // Lifecycle
    pub use crate::{SyncConfig, SyncSystem, SyncSystemBuilder};

    // Controls
    pub use crate::{ExternalEvents, SyncController, SyncHooks, SyncMode, SyncSnapshot};

    // Sides to implement
    pub use crate::{
        ExternalState, ExternalTransport, FrameCount, PlayMode, PlaybackEngine, TimePos,
    };
}
