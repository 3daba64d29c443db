//! Error types for lockstep-core.

use thiserror::Error;

/// Error type for lockstep-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("External transport not available")]
    Unavailable,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No playback engine supplied to the sync system builder")]
    MissingEngine,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
