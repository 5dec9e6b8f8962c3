//! # esp-button-mqtt
//!
//! Debounced button relay: a GPIO falling edge becomes an MQTT message.
//!
//! ## Architecture
//!
//! ```text
//! GPIO ISR ─▶ PressCapture ─▶ EventQueue ─▶ PressPublisher ─▶ MQTT client
//!             (debounce,      (SPSC,        (blocking            │
//!              count)          lock-free)    consumer)           │
//!                                                ▲               │
//!                                  ConnectLatch ─┘ (greeting)    │
//!                                                ▲               │
//! MQTT client events ◀───────────────────────────┼───────────────┘
//!        └─▶ ClientEventHandler ─────────────────┘
//! ```
//!
//! - The interrupt path never blocks, allocates or logs synchronously
//! - Presses reach the publisher only through the queue, in order
//! - Only the publishing task calls the client; the event handler hands
//!   connections over through the latch
//! - The client handle is injected; no mutable globals
//! - Every context logs into its own non-blocking ring, drained by a
//!   low-priority task into the `log` crate
//!
//! Everything outside `platform` is hardware-free and tested on the host.

#![cfg_attr(not(any(test, target_os = "espidf")), no_std)]

pub mod capture;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod log_drain;
pub mod log_globals;
pub mod logging;
pub mod messaging;
pub mod press;
pub mod publisher;
pub mod queue;
pub mod stats;

#[cfg(target_os = "espidf")]
pub mod platform;

pub use capture::PressCapture;
pub use clock::{Clock, ManualClock};
pub use config::{AppConfig, MessagingConfig, CONFIG};
pub use debounce::{Debouncer, DEBOUNCE_WINDOW_MS};
pub use error::{PublishError, QueueFull};
pub use log_globals::{EVENTS_LOG_STREAM, ISR_LOG_STREAM, PUBLISHER_LOG_STREAM};
pub use messaging::{ClientEvent, ClientEventHandler, ConnectLatch, MessagingClient, QoS};
pub use press::{EdgeOutcome, PressEvent};
pub use publisher::PressPublisher;
pub use queue::{Doorbell, EventQueue, SpinDoorbell, QUEUE_CAPACITY};
pub use stats::{PipelineStats, PIPELINE_STATS};
