//! Log drain: moves entries from the non-blocking rings to the `log` crate.
//!
//! Runs in a low-priority task where blocking output is fine. On the device
//! the `log` facade is backed by `EspLogger` (UART0 console).
//!
//! # Output
//!
//! ```text
//! I (12345) button_mqtt: [publisher] [     12340] Button pressed 3 times
//! ```

use crate::logging::{LogEntry, LogStream};

/// `log` target prefix for forwarded entries.
pub const LOG_TARGET: &str = "button_mqtt";

/// Drains a fixed set of streams and paces the periodic report.
pub struct LogDrain<'a> {
    streams: &'a [(&'static str, &'a LogStream)],
    report_period_ms: u32,
    last_report_ms: u32,
}

impl<'a> LogDrain<'a> {
    /// `streams` are drained in order, each fully, on every call.
    pub fn new(streams: &'a [(&'static str, &'a LogStream)], report_period_ms: u32) -> Self {
        Self {
            streams,
            report_period_ms,
            last_report_ms: 0,
        }
    }

    /// Drain every stream once, handing entries to `sink` with their source
    /// name. Returns the number of entries drained.
    pub fn drain_into(&self, mut sink: impl FnMut(&'static str, &LogEntry)) -> usize {
        let mut count = 0;
        for (source, stream) in self.streams {
            while let Some(entry) = stream.drain() {
                sink(*source, &entry);
                count += 1;
            }
        }
        count
    }

    /// True at most once per report period.
    pub fn report_due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_report_ms) >= self.report_period_ms {
            self.last_report_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Hand over each stream's non-zero drop count, then reset it.
    pub fn take_dropped(&self, mut report: impl FnMut(&'static str, u32)) {
        for (source, stream) in self.streams {
            let dropped = stream.dropped();
            if dropped > 0 {
                report(*source, dropped);
                stream.reset_dropped();
            }
        }
    }
}

/// Forward one entry to the `log` facade at its own level.
pub fn forward_to_log(source: &str, entry: &LogEntry) {
    log::log!(
        target: LOG_TARGET,
        log::Level::from(entry.level),
        "[{}] [{:10}] {}",
        source,
        entry.timestamp_ms,
        entry.message()
    );
}
