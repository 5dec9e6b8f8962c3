//! Lifecycle and data events delivered by the messaging client.

use crate::messaging::client::MessageId;

/// Event identifiers, numbered as ESP-MQTT numbers them.
pub mod event_id {
    pub const ERROR: i32 = 0;
    pub const CONNECTED: i32 = 1;
    pub const DISCONNECTED: i32 = 2;
    pub const SUBSCRIBED: i32 = 3;
    pub const UNSUBSCRIBED: i32 = 4;
    pub const PUBLISHED: i32 = 5;
    pub const DATA: i32 = 6;
    pub const BEFORE_CONNECT: i32 = 7;
    pub const DELETED: i32 = 8;
    /// `MQTT_EVENT_ANY`: stands in for an event whose identifier the
    /// client binding does not expose.
    pub const ANY: i32 = -1;
}

/// One event from the messaging client.
///
/// `Received` borrows the client's buffers: topic and payload are
/// length-delimited spans, not terminated strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientEvent<'a> {
    BeforeConnect,
    Connected {
        /// Broker resumed a previous session.
        session_present: bool,
    },
    Disconnected,
    Subscribed(MessageId),
    Unsubscribed(MessageId),
    Published(MessageId),
    Received {
        /// Empty for continuation chunks of a fragmented message.
        topic: &'a [u8],
        payload: &'a [u8],
    },
    Deleted(MessageId),
    Error {
        code: i32,
    },
    /// Identifier this crate does not know. Accepted, logged, ignored.
    Unknown(i32),
}

impl ClientEvent<'_> {
    /// Numeric identifier (see [`event_id`]).
    pub fn id(&self) -> i32 {
        match self {
            ClientEvent::Error { .. } => event_id::ERROR,
            ClientEvent::Connected { .. } => event_id::CONNECTED,
            ClientEvent::Disconnected => event_id::DISCONNECTED,
            ClientEvent::Subscribed(_) => event_id::SUBSCRIBED,
            ClientEvent::Unsubscribed(_) => event_id::UNSUBSCRIBED,
            ClientEvent::Published(_) => event_id::PUBLISHED,
            ClientEvent::Received { .. } => event_id::DATA,
            ClientEvent::BeforeConnect => event_id::BEFORE_CONNECT,
            ClientEvent::Deleted(_) => event_id::DELETED,
            ClientEvent::Unknown(id) => *id,
        }
    }

    /// Short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Error { .. } => "ERROR",
            ClientEvent::Connected { .. } => "CONNECTED",
            ClientEvent::Disconnected => "DISCONNECTED",
            ClientEvent::Subscribed(_) => "SUBSCRIBED",
            ClientEvent::Unsubscribed(_) => "UNSUBSCRIBED",
            ClientEvent::Published(_) => "PUBLISHED",
            ClientEvent::Received { .. } => "DATA",
            ClientEvent::BeforeConnect => "BEFORE_CONNECT",
            ClientEvent::Deleted(_) => "DELETED",
            ClientEvent::Unknown(_) => "UNKNOWN",
        }
    }
}
