//! Global log stream instances.
//!
//! One stream per producing context: single producer, single consumer
//! (the log drain task).

use crate::logging::LogStream;

/// Log stream for the GPIO interrupt capture.
///
/// Only the ISR pushes here.
pub static ISR_LOG_STREAM: LogStream = LogStream::new();

/// Log stream for the publishing task.
pub static PUBLISHER_LOG_STREAM: LogStream = LogStream::new();

/// Log stream for the messaging client event handler.
///
/// Pushed from the MQTT connection task.
pub static EVENTS_LOG_STREAM: LogStream = LogStream::new();

/// All streams, in drain priority order.
pub static ALL_LOG_STREAMS: [(&str, &LogStream); 3] = [
    ("isr", &ISR_LOG_STREAM),
    ("publisher", &PUBLISHER_LOG_STREAM),
    ("events", &EVENTS_LOG_STREAM),
];
