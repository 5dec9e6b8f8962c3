//! Log ring and drain tests, including forwarding into the `log` facade

use std::sync::Mutex;

use esp_button_mqtt::log_drain::{forward_to_log, LogDrain, LOG_TARGET};
use esp_button_mqtt::log_globals::ALL_LOG_STREAMS;
use esp_button_mqtt::logging::{LogEntry, LogLevel, LogStream, Lossy, MAX_MSG_LEN};
use esp_button_mqtt::{push_debug, push_error, push_info, push_warn};

struct CapturingLogger {
    records: Mutex<Vec<(log::Level, String, String)>>,
}

impl log::Log for CapturingLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.records.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn test_forward_to_log_keeps_level_and_source() {
    // Only test in this binary touching the global logger
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let stream: LogStream = LogStream::new();
    push_warn!(stream, 1234, "Event queue full, press #{} dropped", 11);
    push_debug!(stream, 1235, "noise");

    let streams = [("isr", &stream)];
    let drain = LogDrain::new(&streams, 10_000);
    assert_eq!(drain.drain_into(forward_to_log), 2);

    let records = LOGGER.records.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].0, log::Level::Warn);
    assert_eq!(records[0].1, LOG_TARGET);
    assert_eq!(
        records[0].2,
        "[isr] [      1234] Event queue full, press #11 dropped"
    );
    assert_eq!(records[1].0, log::Level::Debug);
}

#[test]
fn test_level_mapping() {
    assert_eq!(log::Level::from(LogLevel::Error), log::Level::Error);
    assert_eq!(log::Level::from(LogLevel::Warn), log::Level::Warn);
    assert_eq!(log::Level::from(LogLevel::Info), log::Level::Info);
    assert_eq!(log::Level::from(LogLevel::Debug), log::Level::Debug);
    assert_eq!(log::Level::from(LogLevel::Trace), log::Level::Trace);
}

#[test]
fn test_entry_display() {
    let stream: LogStream = LogStream::new();
    push_error!(stream, 42, "publish failed");
    let entry = stream.drain().unwrap();

    assert_eq!(entry.to_string(), "[        42] ERROR: publish failed");
}

#[test]
fn test_long_message_truncated_on_char_boundary() {
    let stream: LogStream = LogStream::new();
    let long = "é".repeat(MAX_MSG_LEN);
    push_info!(stream, 0, "{}", long);

    let entry: LogEntry = stream.drain().unwrap();
    assert_eq!(entry.len as usize, MAX_MSG_LEN);
    // 2-byte chars fit exactly into an even length
    assert_eq!(entry.message().chars().count(), MAX_MSG_LEN / 2);
}

#[test]
fn test_lossy_rendering() {
    assert_eq!(Lossy(b"sensor/x").to_string(), "sensor/x");
    assert_eq!(Lossy(&[b'a', 0xc3, b'b']).to_string(), "a\u{FFFD}b");
    assert_eq!(Lossy(b"").to_string(), "");
}

#[test]
fn test_global_streams_named_in_drain_order() {
    let names: Vec<&str> = ALL_LOG_STREAMS.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["isr", "publisher", "events"]);
}
