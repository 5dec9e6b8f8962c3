//! Connection hand-off from the client event task to the publishing task.
//!
//! # Rules
//!
//! - The event task never calls back into the client: on the device the
//!   client's own task stays parked in its event callback until the
//!   connection is pumped again, holding the client lock
//! - `Connected` only raises this latch and rings the publisher's doorbell
//! - The publishing task takes the latch, then greets and subscribes
//! - Several connections before the publisher wakes collapse into one
//!   greeting: only the current session matters

use core::sync::atomic::{AtomicBool, Ordering};

use crate::queue::Doorbell;

/// One-shot "a connection was established" flag shared by two tasks.
pub struct ConnectLatch<'a> {
    pending: AtomicBool,
    doorbell: &'a (dyn Doorbell + Sync),
}

impl<'a> ConnectLatch<'a> {
    /// `doorbell` must be the one the publishing task waits on.
    pub const fn new(doorbell: &'a (dyn Doorbell + Sync)) -> Self {
        Self {
            pending: AtomicBool::new(false),
            doorbell,
        }
    }

    /// Event task side: record the connection and wake the publisher.
    #[inline]
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
        self.doorbell.ring();
    }

    /// Publisher side: true once per raise (or burst of raises).
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::SpinDoorbell;

    #[test]
    fn test_raise_rings_and_take_clears() {
        let doorbell = SpinDoorbell::new();
        let latch = ConnectLatch::new(&doorbell);
        assert!(!latch.take());

        latch.raise();
        latch.raise();

        // Latched ring: returns at once
        doorbell.wait();
        assert!(latch.take());
        assert!(!latch.take());
    }
}
