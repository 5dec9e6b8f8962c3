//! Messaging client seam.
//!
//! The relay only needs two primitives from the MQTT stack: publish and
//! subscribe. Everything else (transport, TLS, reconnects) stays behind this
//! trait. On the device it is implemented by `platform::mqtt`; tests use a
//! recording fake.

use crate::error::PublishError;

/// Broker-assigned (or client-assigned) message identifier.
pub type MessageId = u32;

/// MQTT quality of service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QoS {
    /// QoS 0: may be lost, never duplicated.
    #[default]
    AtMostOnce,
    /// QoS 1: never lost, may be duplicated.
    AtLeastOnce,
    /// QoS 2: delivered exactly once.
    ExactlyOnce,
}

impl QoS {
    /// Numeric level as on the wire.
    #[inline]
    pub const fn level(self) -> u8 {
        match self {
            QoS::AtMostOnce => 0,
            QoS::AtLeastOnce => 1,
            QoS::ExactlyOnce => 2,
        }
    }
}

/// Publish/subscribe primitives the relay consumes.
///
/// Implementations must be callable concurrently from the publishing task
/// and the event handler (`&self`, serialized internally if needed).
///
/// Both calls report whether the client *accepted the request*. Delivery
/// failures show up later as client events, not here.
pub trait MessagingClient {
    /// Queue a message for sending.
    fn publish(
        &self,
        topic: &str,
        qos: QoS,
        retain: bool,
        payload: &[u8],
    ) -> Result<MessageId, PublishError>;

    /// Request a subscription.
    fn subscribe(&self, topic: &str, qos: QoS) -> Result<MessageId, PublishError>;
}

impl<M: MessagingClient + ?Sized> MessagingClient for &M {
    fn publish(
        &self,
        topic: &str,
        qos: QoS,
        retain: bool,
        payload: &[u8],
    ) -> Result<MessageId, PublishError> {
        (**self).publish(topic, qos, retain, payload)
    }

    fn subscribe(&self, topic: &str, qos: QoS) -> Result<MessageId, PublishError> {
        (**self).subscribe(topic, qos)
    }
}
