//! ESP-MQTT client behind the [`MessagingClient`] seam.
//!
//! The connection half is pumped by a dedicated task
//! ([`run_event_loop`]), which translates each ESP-IDF event into a
//! [`ClientEvent`] and hands it to the handler. The client half belongs to
//! the publishing task.
//!
//! While an event is being handled the ESP-MQTT task is parked in its event
//! callback, holding the client's API lock. Calling the client from the
//! event task at that point would never return, so the handler doesn't.

use std::sync::Mutex;

use esp_idf_svc::mqtt::client::{
    EspMqttClient, EspMqttConnection, EventPayload, MqttClientConfiguration, QoS as EspQoS,
};
use esp_idf_svc::sys::EspError;
use log::{info, warn};

use crate::error::PublishError;
use crate::messaging::{event_id, ClientEvent, MessageId, MessagingClient, QoS};

/// Thread-safe handle to the ESP-MQTT client. Never call it from the
/// event task.
pub struct EspMessagingClient {
    inner: Mutex<EspMqttClient<'static>>,
}

impl EspMessagingClient {
    /// Create and start the client for `broker_url`.
    ///
    /// Returns the shared client and the connection the event task pumps.
    pub fn connect(broker_url: &str) -> Result<(Self, EspMqttConnection), EspError> {
        let conf = MqttClientConfiguration::default();
        let (client, connection) = EspMqttClient::new(broker_url, &conf)?;

        Ok((
            Self {
                inner: Mutex::new(client),
            },
            connection,
        ))
    }
}

fn to_esp_qos(qos: QoS) -> EspQoS {
    match qos {
        QoS::AtMostOnce => EspQoS::AtMostOnce,
        QoS::AtLeastOnce => EspQoS::AtLeastOnce,
        QoS::ExactlyOnce => EspQoS::ExactlyOnce,
    }
}

impl MessagingClient for EspMessagingClient {
    fn publish(
        &self,
        topic: &str,
        qos: QoS,
        retain: bool,
        payload: &[u8],
    ) -> Result<MessageId, PublishError> {
        let mut client = self.inner.lock().map_err(|_| PublishError::Unavailable)?;
        client
            .publish(topic, to_esp_qos(qos), retain, payload)
            .map_err(|e| PublishError::Rejected { code: e.code() })
    }

    fn subscribe(&self, topic: &str, qos: QoS) -> Result<MessageId, PublishError> {
        let mut client = self.inner.lock().map_err(|_| PublishError::Unavailable)?;
        client
            .subscribe(topic, to_esp_qos(qos))
            .map_err(|e| PublishError::Rejected { code: e.code() })
    }
}

/// Translate an ESP-IDF event payload. Borrows its topic/data buffers.
///
/// Every payload kind maps to its own event identifier. A kind this crate
/// doesn't know carries no identifier in the binding: it becomes
/// `Unknown(MQTT_EVENT_ANY)` and its full payload is logged here.
pub fn translate(payload: EventPayload<'_, EspError>) -> ClientEvent<'_> {
    #[allow(unreachable_patterns)]
    match payload {
        EventPayload::BeforeConnect => ClientEvent::BeforeConnect,
        EventPayload::Connected(session_present) => ClientEvent::Connected { session_present },
        EventPayload::Disconnected => ClientEvent::Disconnected,
        EventPayload::Subscribed(id) => ClientEvent::Subscribed(id),
        EventPayload::Unsubscribed(id) => ClientEvent::Unsubscribed(id),
        EventPayload::Published(id) => ClientEvent::Published(id),
        EventPayload::Received { topic, data, .. } => ClientEvent::Received {
            topic: topic.unwrap_or_default().as_bytes(),
            payload: data,
        },
        EventPayload::Deleted(id) => ClientEvent::Deleted(id),
        EventPayload::Error(e) => ClientEvent::Error { code: e.code() },
        other => {
            info!("Unrecognised MQTT event: {:?}", other);
            ClientEvent::Unknown(event_id::ANY)
        }
    }
}

/// Event task body: pump the connection until the client goes away.
pub fn run_event_loop(mut connection: EspMqttConnection, mut handle: impl FnMut(&ClientEvent<'_>)) {
    while let Ok(event) = connection.next() {
        handle(&translate(event.payload()));
    }
    warn!("MQTT connection closed, event task exiting");
}
