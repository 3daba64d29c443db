//! Shared synchronization primitives, re-exported from one place.

pub use parking_lot::{Mutex, RwLock};

pub use std::sync::{
    atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering},
    Arc, Weak,
};
