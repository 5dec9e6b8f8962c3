//! Interrupt capture: the falling-edge handler body.
//!
//! Pure logic over a [`Clock`] and an [`EventQueue`], no hardware
//! dependencies. The platform layer registers [`PressCapture::on_edge`] as
//! the GPIO ISR; tests call it directly.
//!
//! # Rules
//!
//! - Runs in interrupt context: no blocking, no allocation, no blocking log
//! - Counter and debounce timestamp are owned here (single writer)
//! - Other contexts see presses only through the queue, plus the read-only
//!   `presses()` diagnostic
//! - Queue full: the press is counted but lost. Never an error, never a panic

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::clock::Clock;
use crate::debounce::Debouncer;
use crate::error::QueueFull;
use crate::log_globals::ISR_LOG_STREAM;
use crate::logging::LogStream;
use crate::press::{EdgeOutcome, PressEvent};
use crate::push_warn;
use crate::queue::{Doorbell, EventQueue, QUEUE_CAPACITY};

/// Debounce + count + enqueue for one button.
///
/// # Safety
///
/// This type uses `UnsafeCell` internally but is safe to use because
/// `on_edge` has a single caller: the GPIO interrupt, which is never
/// re-entered for the same pin. Calling `on_edge` from two contexts at once
/// is outside the contract (same rule as the queue's single producer).
pub struct PressCapture<'a, D, C, const N: usize = QUEUE_CAPACITY> {
    /// Timestamp of the last accepted edge. ISR-owned.
    debouncer: UnsafeCell<Debouncer>,

    /// Accepted presses since boot. ISR writes, anyone may read.
    /// Never reset; wraps to 0 only after 2^32 presses.
    presses: AtomicU32,

    /// Edges rejected as bounce. Diagnostic only.
    bounced: AtomicU32,

    queue: &'a EventQueue<D, N>,
    clock: C,
    log: &'a LogStream,
}

// SAFETY: Single writer (ISR); shared state is atomic or ISR-private.
unsafe impl<D: Sync, C: Sync, const N: usize> Sync for PressCapture<'_, D, C, N> {}

impl<'a, D, C, const N: usize> PressCapture<'a, D, C, N>
where
    D: Doorbell,
    C: Clock,
{
    /// Create a capture feeding `queue`, debounced over `window_ms`.
    ///
    /// The first edge after creation is always accepted.
    pub fn new(queue: &'a EventQueue<D, N>, clock: C, window_ms: u32) -> Self {
        Self {
            debouncer: UnsafeCell::new(Debouncer::new(window_ms)),
            presses: AtomicU32::new(0),
            bounced: AtomicU32::new(0),
            queue,
            clock,
            log: &ISR_LOG_STREAM,
        }
    }

    /// Log queue overflows into a different stream.
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = log;
        self
    }

    /// ISR entry point: read the clock and process one falling edge.
    ///
    /// # Timing
    ///
    /// O(1), never blocks, never allocates.
    #[inline]
    pub fn on_edge(&self) -> EdgeOutcome {
        let now_ms = self.clock.now_ms();
        self.on_edge_at(now_ms)
    }

    /// Process one falling edge observed at `now_ms`.
    pub fn on_edge_at(&self, now_ms: u32) -> EdgeOutcome {
        // SAFETY: Single caller (see type-level docs), no aliasing.
        let debouncer = unsafe { &mut *self.debouncer.get() };

        if !debouncer.on_edge(now_ms) {
            self.bounced.fetch_add(1, Ordering::Relaxed);
            return EdgeOutcome::Bounced;
        }

        // Single writer: load + store is enough
        let count = self.presses.load(Ordering::Relaxed).wrapping_add(1);
        self.presses.store(count, Ordering::Relaxed);

        match self.queue.try_send(PressEvent::new(count)) {
            Ok(()) => EdgeOutcome::Queued(PressEvent::new(count)),
            Err(QueueFull(event)) => {
                push_warn!(self.log, now_ms, "Event queue full, {} dropped", event);
                EdgeOutcome::Dropped(event)
            }
        }
    }

    /// Accepted presses since boot (queued or dropped).
    ///
    /// Monotonic for any realistic lifetime: it wraps to 0 only after
    /// 2^32 accepted presses.
    #[inline]
    pub fn presses(&self) -> u32 {
        self.presses.load(Ordering::Relaxed)
    }

    /// Edges filtered as contact bounce since boot.
    #[inline]
    pub fn bounced(&self) -> u32 {
        self.bounced.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue(&self) -> &'a EventQueue<D, N> {
        self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::queue::SpinDoorbell;

    #[test]
    fn test_first_edge_after_boot_accepted() {
        let queue = EventQueue::<_, 4>::new(SpinDoorbell::new());
        let clock = ManualClock::new(10); // well inside the first window
        let log = LogStream::new();
        let capture = PressCapture::new(&queue, &clock, 200).with_log(&log);

        assert_eq!(capture.on_edge(), EdgeOutcome::Queued(PressEvent::new(1)));
    }

    #[test]
    fn test_bounce_changes_nothing() {
        let queue = EventQueue::<_, 4>::new(SpinDoorbell::new());
        let clock = ManualClock::new(1000);
        let log = LogStream::new();
        let capture = PressCapture::new(&queue, &clock, 200).with_log(&log);

        capture.on_edge();
        clock.advance(199);
        assert_eq!(capture.on_edge(), EdgeOutcome::Bounced);

        assert_eq!(capture.presses(), 1);
        assert_eq!(capture.bounced(), 1);
        assert_eq!(queue.len(), 1);
        assert!(!log.has_entries());
    }

    #[test]
    fn test_counter_wraps_only_at_u32_max() {
        let queue = EventQueue::<_, 4>::new(SpinDoorbell::new());
        let log = LogStream::new();
        let capture = PressCapture::new(&queue, ManualClock::new(0), 200).with_log(&log);
        capture.presses.store(u32::MAX - 1, Ordering::Relaxed);

        assert_eq!(capture.on_edge_at(1000).event(), Some(PressEvent::new(u32::MAX)));
        assert_eq!(capture.on_edge_at(2000).event(), Some(PressEvent::new(0)));
        assert_eq!(capture.presses(), 0);
    }
}
