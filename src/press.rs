//! Module: press
//!
//! Purpose: PressEvent, the value carried from the interrupt capture to the
//! publishing task.
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

use core::fmt;

/// One accepted button press.
///
/// Holds the running count of accepted presses since boot (1 for the first
/// press). Created by the interrupt capture, never mutated afterwards.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PressEvent(u32);

impl PressEvent {
    /// Placeholder used to initialize queue slots. Never observed by readers.
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    /// Number of accepted presses since boot, including this one.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0
    }
}

impl From<PressEvent> for u32 {
    fn from(event: PressEvent) -> Self {
        event.0
    }
}

impl fmt::Display for PressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "press #{}", self.0)
    }
}

/// What the interrupt capture did with one raw edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Filtered as contact bounce. No state changed.
    Bounced,
    /// Accepted and queued for publishing.
    Queued(PressEvent),
    /// Accepted and counted, but the queue was full so the event was lost.
    Dropped(PressEvent),
}

impl EdgeOutcome {
    /// True if the edge counted as a press (queued or dropped).
    #[inline]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, EdgeOutcome::Bounced)
    }

    /// The press event, if the edge was accepted.
    #[inline]
    pub fn event(&self) -> Option<PressEvent> {
        match *self {
            EdgeOutcome::Bounced => None,
            EdgeOutcome::Queued(e) | EdgeOutcome::Dropped(e) => Some(e),
        }
    }
}
