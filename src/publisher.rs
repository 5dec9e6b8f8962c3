//! Publishing task: the queue consumer, and the only caller of the client.
//!
//! # Contract
//!
//! "One queued press, one publish. No retries."
//!
//! Blocks on the event queue for the lifetime of the process. Each press is
//! published to the request topic with the fixed press payload (QoS 0, no
//! retain by default). A rejected publish is logged and counted, then
//! forgotten: retrying would reorder presses behind newer ones, and delivery
//! failures are reported asynchronously through the client's events anyway.
//!
//! # Connections
//!
//! When a [`ConnectLatch`] is attached, a raised latch is serviced before
//! the next queued press: greeting first, then the configured
//! subscriptions. Same no-retry rule; the next connection greets again.

use crate::clock::Clock;
use crate::config::MessagingConfig;
use crate::error::PublishError;
use crate::log_globals::PUBLISHER_LOG_STREAM;
use crate::logging::LogStream;
use crate::messaging::{ConnectLatch, MessageId, MessagingClient};
use crate::press::PressEvent;
use crate::queue::{Doorbell, EventQueue, QUEUE_CAPACITY};
use crate::stats::{PipelineStats, PIPELINE_STATS};
use crate::{push_info, push_warn};

/// Consumer side of the press pipeline.
///
/// # Example
///
/// ```ignore
/// let publisher = PressPublisher::new(queue, client, EspTimerClock, CONFIG.messaging)
///     .with_connect_latch(latch);
/// std::thread::spawn(move || publisher.run());
/// ```
pub struct PressPublisher<'a, D, M: ?Sized, C, const N: usize = QUEUE_CAPACITY> {
    queue: &'a EventQueue<D, N>,
    client: &'a M,
    clock: C,
    config: MessagingConfig,
    connect: Option<&'a ConnectLatch<'a>>,
    log: &'a LogStream,
    stats: &'a PipelineStats,
}

impl<'a, D, M, C, const N: usize> PressPublisher<'a, D, M, C, N>
where
    D: Doorbell,
    M: MessagingClient + ?Sized,
    C: Clock,
{
    /// Create a publisher logging to `PUBLISHER_LOG_STREAM` and counting
    /// into `PIPELINE_STATS`.
    pub fn new(queue: &'a EventQueue<D, N>, client: &'a M, clock: C, config: MessagingConfig) -> Self {
        Self {
            queue,
            client,
            clock,
            config,
            connect: None,
            log: &PUBLISHER_LOG_STREAM,
            stats: &PIPELINE_STATS,
        }
    }

    /// Greet on every connection raised through `latch`.
    ///
    /// The latch must ring this queue's doorbell, or a connection is only
    /// noticed with the next press.
    pub fn with_connect_latch(mut self, latch: &'a ConnectLatch<'a>) -> Self {
        self.connect = Some(latch);
        self
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

    /// Publish the notification for one press.
    ///
    /// The result is returned for inspection; [`run`](Self::run) ignores it.
    pub fn publish(&self, event: PressEvent) -> Result<MessageId, PublishError> {
        let now = self.clock.now_ms();
        push_info!(self.log, now, "Button pressed {} times", event.count());

        let result = self.client.publish(
            self.config.topic,
            self.config.qos,
            self.config.retain,
            self.config.press_payload,
        );

        match result {
            Ok(id) => {
                self.stats.record_published();
                push_info!(
                    self.log,
                    now,
                    "Published button press event to {} (msg_id={})",
                    self.config.topic,
                    id
                );
            }
            Err(e) => {
                self.stats.record_rejected();
                push_warn!(self.log, now, "Press {} not published: {}", event.count(), e);
            }
        }
        result
    }

    /// Greet and subscribe if a connection is pending.
    ///
    /// Returns the greeting result, or `None` if there was nothing to do.
    pub fn service_connect(&self) -> Option<Result<MessageId, PublishError>> {
        if !self.connect?.take() {
            return None;
        }

        let now = self.clock.now_ms();
        let greeted = self.greet(now);
        self.subscribe_all(now);
        Some(greeted)
    }

    /// Block for the next press and publish it.
    ///
    /// Pending connections are serviced while waiting.
    pub fn step(&self) -> PressEvent {
        loop {
            self.service_connect();

            if let Some(event) = self.queue.try_recv() {
                // Rejection already logged and counted; nothing else to do.
                let _ = self.publish(event);
                return event;
            }

            self.queue.doorbell().wait();
        }
    }

    fn greet(&self, now: u32) -> Result<MessageId, PublishError> {
        let result = self.client.publish(
            self.config.topic,
            self.config.qos,
            self.config.retain,
            self.config.greeting,
        );

        match result {
            Ok(id) => {
                push_info!(self.log, now, "Published greeting to {} (msg_id={})", self.config.topic, id);
            }
            Err(e) => {
                self.stats.record_rejected();
                push_warn!(self.log, now, "Greeting to {} rejected: {}", self.config.topic, e);
            }
        }
        result
    }

    fn subscribe_all(&self, now: u32) {
        for topic in self.config.subscriptions {
            match self.client.subscribe(topic, self.config.qos) {
                Ok(id) => {
                    push_info!(self.log, now, "Subscribing to {} (msg_id={})", topic, id);
                }
                Err(e) => {
                    self.stats.record_rejected();
                    push_warn!(self.log, now, "Subscribe to {} rejected: {}", topic, e);
                }
            }
        }
    }

    /// Task body. Never returns.
    pub fn run(&self) -> ! {
        loop {
            self.step();
        }
    }
}
