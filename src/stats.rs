//! Pipeline statistics.
//!
//! Diagnostic counters shared between the publishing task, the event handler
//! and the log drain. Lock-free, read-only for everyone but the owner of each
//! counter. Counters are never reset.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe pipeline counters.
///
/// # Usage
///
/// ```ignore
/// static STATS: PipelineStats = PipelineStats::new();
///
/// // In the publishing task:
/// match client.publish(&msg) {
///     Ok(_) => STATS.record_published(),
///     Err(_) => STATS.record_rejected(),
/// }
///
/// // In the drain task:
/// info!("{}", STATS.snapshot());
/// ```
pub struct PipelineStats {
    /// Press notifications accepted by the client.
    published: AtomicU32,

    /// Publish/subscribe requests the client rejected.
    rejected: AtomicU32,

    /// Inbound messages surfaced by the event handler.
    received: AtomicU32,

    /// Successful broker connections.
    connections: AtomicU32,

    /// Lifecycle events that fell into the "other" branch.
    other_events: AtomicU32,
}

impl PipelineStats {
    pub const fn new() -> Self {
        Self {
            published: AtomicU32::new(0),
            rejected: AtomicU32::new(0),
            received: AtomicU32::new(0),
            connections: AtomicU32::new(0),
            other_events: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_connection(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_other_event(&self) {
        self.other_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    #[inline]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            published: self.published.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            received: self.received.load(Ordering::Relaxed),
            connections: self.connections.load(Ordering::Relaxed),
            other_events: self.other_events.load(Ordering::Relaxed),
        }
    }
}

/// Process-wide statistics.
pub static PIPELINE_STATS: PipelineStats = PipelineStats::new();

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the counters at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub published: u32,
    pub rejected: u32,
    pub received: u32,
    pub connections: u32,
    pub other_events: u32,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "published={} rejected={} received={} connections={} other={}",
            self.published, self.rejected, self.received, self.connections, self.other_events
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let stats = PipelineStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());

        stats.record_published();
        stats.record_published();
        stats.record_rejected();
        stats.record_connection();

        let snap = stats.snapshot();
        assert_eq!(snap.published, 2);
        assert_eq!(snap.rejected, 1);
        assert_eq!(snap.connections, 1);
        assert_eq!(snap.received, 0);
    }
}
