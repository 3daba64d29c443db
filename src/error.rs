//! Centralized error type for the lockstep umbrella crate.
//!
//! Wraps the core error so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] lockstep_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
