//! Error types shared by the pipeline.
//!
//! None of these are fatal. The interrupt path swallows [`QueueFull`], the
//! publishing task and the event handler log [`PublishError`] and carry on.

use thiserror::Error;

use crate::press::PressEvent;

/// Insertion into a full event queue. Carries the event that was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event queue full, {0} dropped")]
pub struct QueueFull(pub PressEvent);

/// The messaging client did not accept a publish or subscribe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Client refused the request (not connected, outbox full, ...).
    #[error("client rejected request (code {code})")]
    Rejected { code: i32 },

    /// Client handle is gone or poisoned.
    #[error("client unavailable")]
    Unavailable,
}
