//! ESP-IDF binding for the hardware-free core.
//!
//! Thin wrappers around ESP-IDF services.
//! Business logic stays in core modules, this is just I/O.

pub mod button;
pub mod clock;
pub mod doorbell;
pub mod mqtt;
pub mod network;

use core::ffi::CStr;

use esp_idf_svc::sys::EspError;
use thiserror::Error;

pub use button::{ButtonCapture, ButtonQueue};
pub use clock::EspTimerClock;
pub use doorbell::IsrDoorbell;
pub use mqtt::EspMessagingClient;

/// Startup failure. Always fatal: the firmware aborts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("ESP-IDF call failed: {0}")]
    Esp(#[from] EspError),

    #[error("invalid configuration: {0}")]
    Config(&'static str),

    #[error("out of memory allocating {0}")]
    OutOfMemory(&'static str),

    #[error("failed to spawn task {0:?}")]
    Spawn(&'static CStr),
}
