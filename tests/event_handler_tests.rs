//! Messaging event handler tests
//!
//! Inbound data goes straight to the `log` facade; see `inbound_data_tests`.

use esp_button_mqtt::logging::LogStream;
use esp_button_mqtt::messaging::{event_id, Handled};
use esp_button_mqtt::{
    ClientEvent, ClientEventHandler, ConnectLatch, Doorbell, ManualClock, PipelineStats,
    SpinDoorbell,
};

mod common;

#[test]
fn test_connected_raises_latch_and_rings() {
    let doorbell = SpinDoorbell::new();
    let latch = ConnectLatch::new(&doorbell);
    let log = LogStream::new();
    let stats = PipelineStats::new();
    let handler = ClientEventHandler::new(&latch, ManualClock::new(100))
        .with_log(&log)
        .with_stats(&stats);

    let handled = handler.handle(&ClientEvent::Connected {
        session_present: false,
    });

    assert_eq!(handled, Handled::Connected);
    assert!(latch.is_raised());
    doorbell.wait(); // latched ring, returns at once
    assert_eq!(stats.snapshot().connections, 1);
    assert_eq!(
        common::messages(&log),
        ["MQTT_EVENT_CONNECTED (session present: false)"]
    );
}

#[test]
fn test_reconnect_raises_again() {
    let doorbell = SpinDoorbell::new();
    let latch = ConnectLatch::new(&doorbell);
    let log = LogStream::new();
    let stats = PipelineStats::new();
    let handler = ClientEventHandler::new(&latch, ManualClock::new(0))
        .with_log(&log)
        .with_stats(&stats);

    handler.handle(&ClientEvent::Connected {
        session_present: false,
    });
    assert!(latch.take());

    handler.handle(&ClientEvent::Disconnected);
    assert!(!latch.is_raised());

    handler.handle(&ClientEvent::Connected {
        session_present: true,
    });
    assert!(latch.take());
    assert_eq!(stats.snapshot().connections, 2);
}

#[test]
fn test_received_counts_and_skips_event_ring() {
    let doorbell = SpinDoorbell::new();
    let latch = ConnectLatch::new(&doorbell);
    let log = LogStream::new();
    let stats = PipelineStats::new();
    let handler = ClientEventHandler::new(&latch, ManualClock::new(0))
        .with_log(&log)
        .with_stats(&stats);

    let handled = handler.handle(&ClientEvent::Received {
        topic: b"sensor/x",
        payload: b"42",
    });

    assert_eq!(handled, Handled::Surfaced);
    assert_eq!(stats.snapshot().received, 1);
    assert!(!log.has_entries());
    assert!(!latch.is_raised());
}

#[test]
fn test_other_events_only_logged() {
    let doorbell = SpinDoorbell::new();
    let latch = ConnectLatch::new(&doorbell);
    let log = LogStream::new();
    let stats = PipelineStats::new();
    let handler = ClientEventHandler::new(&latch, ManualClock::new(0))
        .with_log(&log)
        .with_stats(&stats);

    let events = [
        ClientEvent::BeforeConnect,
        ClientEvent::Subscribed(3),
        ClientEvent::Published(4),
        ClientEvent::Disconnected,
        ClientEvent::Error { code: 7 },
        ClientEvent::Unknown(42),
    ];
    let handled: Vec<Handled> = events.iter().map(|e| handler.handle(e)).collect();

    assert_eq!(
        handled,
        [
            Handled::Other(event_id::BEFORE_CONNECT),
            Handled::Other(event_id::SUBSCRIBED),
            Handled::Other(event_id::PUBLISHED),
            Handled::Other(event_id::DISCONNECTED),
            Handled::Other(event_id::ERROR),
            Handled::Other(42),
        ]
    );
    assert!(!latch.is_raised());
    assert_eq!(stats.snapshot().other_events, 6);

    let messages = common::messages(&log);
    assert_eq!(messages[0], "Other event id:7 (BEFORE_CONNECT)");
    assert_eq!(messages[3], "MQTT_EVENT_DISCONNECTED");
    assert_eq!(messages[4], "MQTT_EVENT_ERROR code:7");
    assert_eq!(messages[5], "Other event id:42 (UNKNOWN)");
}

#[test]
fn test_unidentified_event_logged_as_any() {
    let doorbell = SpinDoorbell::new();
    let latch = ConnectLatch::new(&doorbell);
    let log = LogStream::new();
    let stats = PipelineStats::new();
    let handler = ClientEventHandler::new(&latch, ManualClock::new(0))
        .with_log(&log)
        .with_stats(&stats);

    let handled = handler.handle(&ClientEvent::Unknown(event_id::ANY));

    assert_eq!(handled, Handled::Other(-1));
    assert_eq!(common::messages(&log), ["Other event id:-1 (UNKNOWN)"]);
}
