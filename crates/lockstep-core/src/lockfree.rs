//! Lock-free primitives for state shared with the external clock's thread.

use crate::compat::{AtomicBool, AtomicU64, Ordering};
use crate::transport::FrameCount;
#[cfg(any(test, feature = "test-utils"))]
use atomic_float::AtomicF64;

/// Cache-line aligned atomic bool.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFlag {
    value: AtomicBool,
}

impl AtomicFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Release);
    }

    /// Flip the flag, returning the new value.
    #[inline]
    pub fn toggle(&self) -> bool {
        !self.value.fetch_xor(true, Ordering::AcqRel)
    }
}

impl Clone for AtomicFlag {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Cache-line aligned atomic frame counter.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFrame {
    value: AtomicU64,
}

impl AtomicFrame {
    pub fn new(frame: FrameCount) -> Self {
        Self {
            value: AtomicU64::new(frame),
        }
    }

    #[inline]
    pub fn get(&self) -> FrameCount {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, frame: FrameCount) {
        self.value.store(frame, Ordering::Release);
    }

    /// Store `frame`, returning the previous value.
    #[inline]
    pub fn swap(&self, frame: FrameCount) -> FrameCount {
        self.value.swap(frame, Ordering::AcqRel)
    }
}

impl Clone for AtomicFrame {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFrame {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Cache-line aligned atomic f64. Only the engine mock needs one.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicDouble {
    value: AtomicF64,
}

#[cfg(any(test, feature = "test-utils"))]
impl AtomicDouble {
    pub fn new(value: f64) -> Self {
        Self {
            value: AtomicF64::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.value.store(value, Ordering::Release);
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Clone for AtomicDouble {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for AtomicDouble {
    fn default() -> Self {
        Self::new(0.0)
    }
}
