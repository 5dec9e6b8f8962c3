//! Shared test fixtures: a recording messaging client.

#![allow(dead_code)]

use std::sync::Mutex;

use esp_button_mqtt::messaging::{MessageId, MessagingClient, QoS};
use esp_button_mqtt::PublishError;

/// One call seen by the fake client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Publish {
        topic: String,
        qos: QoS,
        retain: bool,
        payload: Vec<u8>,
    },
    Subscribe {
        topic: String,
        qos: QoS,
    },
}

/// Fake client recording every call in order.
///
/// Message ids start at 1 and increase per accepted call.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    reject_with: Mutex<Option<PublishError>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that refuses every request with `error`.
    pub fn rejecting(error: PublishError) -> Self {
        let client = Self::default();
        client.set_reject(Some(error));
        client
    }

    pub fn set_reject(&self, error: Option<PublishError>) {
        *self.reject_with.lock().unwrap() = error;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Payloads of every publish, in call order.
    pub fn published_payloads(&self) -> Vec<Vec<u8>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Publish { payload, .. } => Some(payload),
                Call::Subscribe { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Result<MessageId, PublishError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        match *self.reject_with.lock().unwrap() {
            Some(error) => Err(error),
            None => Ok(calls.len() as MessageId),
        }
    }
}

impl MessagingClient for RecordingClient {
    fn publish(
        &self,
        topic: &str,
        qos: QoS,
        retain: bool,
        payload: &[u8],
    ) -> Result<MessageId, PublishError> {
        self.record(Call::Publish {
            topic: topic.to_string(),
            qos,
            retain,
            payload: payload.to_vec(),
        })
    }

    fn subscribe(&self, topic: &str, qos: QoS) -> Result<MessageId, PublishError> {
        self.record(Call::Subscribe {
            topic: topic.to_string(),
            qos,
        })
    }
}

/// Drain every entry of `stream` as rendered messages.
pub fn messages(stream: &esp_button_mqtt::logging::LogStream) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(entry) = stream.drain() {
        out.push(entry.message().to_string());
    }
    out
}
