//! Messaging client event handler.
//!
//! Three branches, nothing more:
//!
//! - **Connected**: raise the [`ConnectLatch`]; the publishing task sends
//!   the greeting (and configured subscriptions) from its own context
//! - **Received**: log topic and payload as one record, using the provided
//!   lengths only
//! - **Anything else**: log the event identifier and carry on
//!
//! The handler never calls the client and never fails.
//!
//! # Logging
//!
//! Lifecycle events go through `EVENTS_LOG_STREAM` like every other task.
//! Inbound data is logged straight through the `log` facade under
//! [`LOG_TARGET`]: the handler runs in task context, and a fixed-size ring
//! slot would cut long payloads.

use crate::clock::Clock;
use crate::log_drain::LOG_TARGET;
use crate::log_globals::EVENTS_LOG_STREAM;
use crate::logging::{LogStream, Lossy};
use crate::messaging::connect::ConnectLatch;
use crate::messaging::event::ClientEvent;
use crate::messaging::request::Request;
use crate::stats::{PipelineStats, PIPELINE_STATS};
use crate::{push_info, push_warn};

/// Which branch an event took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handled {
    /// Connected: greeting handed to the publishing task.
    Connected,
    /// Inbound data surfaced to the log.
    Surfaced,
    /// Any other event, with its identifier.
    Other(i32),
}

/// Event handler, wired to the publisher through a [`ConnectLatch`].
///
/// # Example
///
/// ```ignore
/// let handler = ClientEventHandler::new(latch, EspTimerClock);
/// while let Ok(event) = connection.next() {
///     handler.handle(&translate(event.payload()));
/// }
/// ```
pub struct ClientEventHandler<'a, C> {
    connect: &'a ConnectLatch<'a>,
    clock: C,
    log: &'a LogStream,
    stats: &'a PipelineStats,
}

impl<'a, C: Clock> ClientEventHandler<'a, C> {
    /// Create a handler logging to `EVENTS_LOG_STREAM` and counting into
    /// `PIPELINE_STATS`.
    pub fn new(connect: &'a ConnectLatch<'a>, clock: C) -> Self {
        Self {
            connect,
            clock,
            log: &EVENTS_LOG_STREAM,
            stats: &PIPELINE_STATS,
        }
    }

    /// Log into a different stream.
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = log;
        self
    }

    /// Count into a different statistics block.
    pub fn with_stats(mut self, stats: &'a PipelineStats) -> Self {
        self.stats = stats;
        self
    }

    /// Dispatch one event.
    pub fn handle(&self, event: &ClientEvent<'_>) -> Handled {
        let now = self.clock.now_ms();

        match *event {
            ClientEvent::Connected { session_present } => {
                push_info!(self.log, now, "MQTT_EVENT_CONNECTED (session present: {})", session_present);
                self.stats.record_connection();
                self.connect.raise();
                Handled::Connected
            }
            ClientEvent::Received { topic, payload } => {
                self.stats.record_received();
                log_data(topic, payload);
                Handled::Surfaced
            }
            ClientEvent::Disconnected | ClientEvent::Error { .. } => {
                self.stats.record_other_event();
                match *event {
                    ClientEvent::Error { code } => {
                        push_warn!(self.log, now, "MQTT_EVENT_ERROR code:{}", code)
                    }
                    _ => push_warn!(self.log, now, "MQTT_EVENT_DISCONNECTED"),
                };
                Handled::Other(event.id())
            }
            _ => {
                self.stats.record_other_event();
                push_info!(self.log, now, "Other event id:{} ({})", event.id(), event.name());
                Handled::Other(event.id())
            }
        }
    }
}

/// One record per inbound message, whatever its length.
fn log_data(topic: &[u8], payload: &[u8]) {
    match Request::from_topic(topic) {
        Some(request) => log::info!(
            target: LOG_TARGET,
            "MQTT_EVENT_DATA TOPIC={} DATA={} REQUEST={}",
            Lossy(topic),
            Lossy(payload),
            request
        ),
        None => log::info!(
            target: LOG_TARGET,
            "MQTT_EVENT_DATA TOPIC={} DATA={}",
            Lossy(topic),
            Lossy(payload)
        ),
    }
}
