//! Bounded SPSC (Single Producer, Single Consumer) event queue.
//!
//! Carries accepted presses from the interrupt capture to the publishing task.
//!
//! # Architecture
//!
//! ```text
//! GPIO ISR ──try_send()──▶ EventQueue ──recv()──▶ Publishing task
//!  (never blocks)          (lock-free)            (blocks on Doorbell)
//! ```
//!
//! # Rules
//!
//! - Producer side never blocks and never allocates (interrupt-safe)
//! - A full queue rejects the new event; it is counted in `dropped()`
//! - Consumer side blocks indefinitely until an event is available
//! - Strict FIFO

use core::cell::UnsafeCell;
use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::QueueFull;
use crate::press::PressEvent;

/// Default queue capacity: 10 presses.
pub const QUEUE_CAPACITY: usize = 10;

/// Wake-up channel between the producer and the blocked consumer.
///
/// Implementations must latch: a `ring()` that happens while nobody waits
/// makes the next `wait()` return immediately. Spurious wake-ups are fine,
/// the queue re-checks after every `wait()`.
///
/// Several contexts may ring the same bell (the ISR for presses, the client
/// event task for connections); only the consumer waits.
pub trait Doorbell {
    /// Wake the consumer. Must be callable from interrupt and task context.
    fn ring(&self);

    /// Block the calling task until the bell has been rung.
    fn wait(&self);
}

impl<D: Doorbell + ?Sized> Doorbell for &D {
    #[inline]
    fn ring(&self) {
        (**self).ring()
    }

    #[inline]
    fn wait(&self) {
        (**self).wait()
    }
}

/// Busy-waiting doorbell backed by a single atomic flag.
///
/// Portable and `no_std`. Used on the host; the device uses an RTOS
/// semaphore so the waiting task actually sleeps.
pub struct SpinDoorbell {
    rung: AtomicBool,
}

impl SpinDoorbell {
    pub const fn new() -> Self {
        Self {
            rung: AtomicBool::new(false),
        }
    }
}

impl Default for SpinDoorbell {
    fn default() -> Self {
        Self::new()
    }
}

impl Doorbell for SpinDoorbell {
    #[inline]
    fn ring(&self) {
        self.rung.store(true, Ordering::Release);
    }

    #[inline]
    fn wait(&self) {
        while !self.rung.swap(false, Ordering::AcqRel) {
            spin_loop();
        }
    }
}

/// Lock-free bounded FIFO of [`PressEvent`].
///
/// # Safety
///
/// This type uses `UnsafeCell` internally but is safe to use because:
/// - Single producer (the GPIO interrupt, enforced by design)
/// - Single consumer (the publishing task, enforced by design)
/// - The producer only writes slots the consumer has released, and
///   the consumer only reads slots the producer has published
///
/// # Indexing
///
/// Indices run modulo `2 * N` so that full (`write - read == N`) and empty
/// (`write == read`) are distinguishable for any capacity, not only powers
/// of two. Slot = index modulo `N`.
///
/// # Memory Ordering
///
/// - Producer: `Acquire` load of `read_idx`, `Release` store of `write_idx`
/// - Consumer: `Acquire` load of `write_idx`, `Release` store of `read_idx`
pub struct EventQueue<D, const N: usize = QUEUE_CAPACITY> {
    slots: UnsafeCell<[PressEvent; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
    doorbell: D,
}

// SAFETY: Single producer, single consumer, atomic coordination.
unsafe impl<D: Sync, const N: usize> Sync for EventQueue<D, N> {}
unsafe impl<D: Send, const N: usize> Send for EventQueue<D, N> {}

impl<D, const N: usize> EventQueue<D, N> {
    const WRAP: u32 = 2 * N as u32;

    /// Create an empty queue.
    ///
    /// # Panics
    ///
    /// Panics at compile time (in const context) if `N` is zero or too large.
    pub const fn new(doorbell: D) -> Self {
        assert!(N > 0, "Queue capacity must be non-zero");
        assert!(N <= (u32::MAX / 4) as usize, "Queue capacity too large");

        Self {
            slots: UnsafeCell::new([PressEvent::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            doorbell,
        }
    }

    #[inline]
    fn advance(idx: u32) -> u32 {
        let next = idx + 1;
        if next == Self::WRAP {
            0
        } else {
            next
        }
    }

    #[inline]
    fn occupied(write: u32, read: u32) -> u32 {
        (write + Self::WRAP - read) % Self::WRAP
    }

    /// Consumer side: take the oldest event without blocking.
    #[inline]
    pub fn try_recv(&self) -> Option<PressEvent> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: Slot was published by the producer's Release store and
        // will not be rewritten until read_idx moves past it.
        let event = unsafe { (*self.slots.get())[read as usize % N] };

        self.read_idx.store(Self::advance(read), Ordering::Release);
        Some(event)
    }

    /// Number of events waiting.
    #[inline]
    pub fn len(&self) -> usize {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Acquire);
        Self::occupied(write, read) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Fixed capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Events rejected because the queue was full, since creation.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn doorbell(&self) -> &D {
        &self.doorbell
    }
}

impl<D: Doorbell, const N: usize> EventQueue<D, N> {
    /// Producer side: append an event without blocking.
    ///
    /// Returns `Err(QueueFull)` if all `N` slots are taken; the event is not
    /// stored and the drop counter increments. Safe to call from an ISR.
    ///
    /// # Timing
    ///
    /// O(1), never blocks, never allocates.
    #[inline]
    pub fn try_send(&self, event: PressEvent) -> Result<(), QueueFull> {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if Self::occupied(write, read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(QueueFull(event));
        }

        // SAFETY: Single producer; the slot is free (checked above) and
        // the consumer cannot see it until write_idx is published.
        unsafe {
            (*self.slots.get())[write as usize % N] = event;
        }

        self.write_idx.store(Self::advance(write), Ordering::Release);
        self.doorbell.ring();
        Ok(())
    }

    /// Consumer side: take the oldest event, blocking until one arrives.
    ///
    /// There is no timeout.
    pub fn recv(&self) -> PressEvent {
        loop {
            if let Some(event) = self.try_recv() {
                return event;
            }
            self.doorbell.wait();
        }
    }
}
