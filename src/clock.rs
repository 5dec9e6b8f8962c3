//! Monotonic millisecond clock.
//!
//! Timestamps are `u32` milliseconds since an arbitrary epoch (boot on the
//! device). They wrap after ~49 days; every comparison uses `wrapping_sub`,
//! so a wrap is invisible to the debounce filter.
//!
//! 32-bit on purpose: the ESP32 (Xtensa) has no 64-bit atomics.

use core::sync::atomic::{AtomicU32, Ordering};

/// Source of monotonic time, readable from interrupt context.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Manually driven clock for host simulation and tests.
pub struct ManualClock {
    now_ms: AtomicU32,
}

impl ManualClock {
    /// Create a clock reading `start_ms`.
    pub const fn new(start_ms: u32) -> Self {
        Self {
            now_ms: AtomicU32::new(start_ms),
        }
    }

    /// Jump to an absolute time.
    #[inline]
    pub fn set(&self, now_ms: u32) {
        self.now_ms.store(now_ms, Ordering::Release);
    }

    /// Move time forward by `delta_ms`.
    #[inline]
    pub fn advance(&self, delta_ms: u32) {
        self.now_ms.fetch_add(delta_ms, Ordering::AcqRel);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        self.now_ms.load(Ordering::Acquire)
    }
}
