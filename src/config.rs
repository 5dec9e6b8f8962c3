//! Module: config
//!
//! Purpose: Compile-time configuration for the button relay.
//!
//! Architecture:
//! - Deployment values (broker, Wi-Fi, GPIO) come from environment variables
//!   read at build time (`BROKER_URL`, `WIFI_SSID`, `WIFI_PASS`,
//!   `BUTTON_GPIO`), falling back to the defaults below
//! - Everything is `const`: no parsing, no allocation at runtime
//!
//! Safety: Safe. Read-only data.

use crate::debounce::DEBOUNCE_WINDOW_MS;
use crate::messaging::QoS;

/// Topic for the greeting and every button notification.
pub const REQUEST_TOPIC: &str = "req/call";

/// Payload published once per broker connection.
pub const GREETING_PAYLOAD: &[u8] = b"Hello";

/// Payload published for every accepted press.
pub const PRESS_PAYLOAD: &[u8] = b"Button press event";

const DEFAULT_BROKER_URL: &str = "mqtt://mqtt.eclipseprojects.io";
const DEFAULT_BUTTON_GPIO: i32 = 23;

/// Messaging behaviour of the relay.
#[derive(Clone, Copy, Debug)]
pub struct MessagingConfig {
    /// Outbound topic for greeting and presses.
    pub topic: &'static str,
    /// Payload sent on every connection.
    pub greeting: &'static [u8],
    /// Payload sent on every press.
    pub press_payload: &'static [u8],
    pub qos: QoS,
    pub retain: bool,
    /// Topics subscribed after each connection. Empty by default.
    pub subscriptions: &'static [&'static str],
}

impl MessagingConfig {
    pub const DEFAULT: Self = Self {
        topic: REQUEST_TOPIC,
        greeting: GREETING_PAYLOAD,
        press_payload: PRESS_PAYLOAD,
        qos: QoS::AtMostOnce,
        retain: false,
        subscriptions: &[],
    };
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whole-application configuration.
#[derive(Clone, Copy, Debug)]
pub struct AppConfig {
    /// MQTT broker URI, e.g. `mqtt://host:1883`.
    pub broker_url: &'static str,
    pub wifi_ssid: &'static str,
    pub wifi_password: &'static str,

    /// Button input pin (pull-down, falling edge).
    pub button_gpio: i32,
    pub debounce_window_ms: u32,

    /// Publishing task stack in bytes.
    pub publisher_stack_size: usize,
    /// Publishing task FreeRTOS priority.
    pub publisher_priority: u8,
    /// MQTT event task stack in bytes.
    pub events_stack_size: usize,

    /// Log drain polling period.
    pub drain_period_ms: u32,
    /// Interval between statistics / dropped-log reports.
    pub report_period_ms: u32,

    pub messaging: MessagingConfig,
}

impl AppConfig {
    pub const DEFAULT: Self = Self {
        broker_url: env_or(option_env!("BROKER_URL"), DEFAULT_BROKER_URL),
        wifi_ssid: env_or(option_env!("WIFI_SSID"), ""),
        wifi_password: env_or(option_env!("WIFI_PASS"), ""),
        button_gpio: match option_env!("BUTTON_GPIO") {
            Some(pin) => parse_pin(pin),
            None => DEFAULT_BUTTON_GPIO,
        },
        debounce_window_ms: DEBOUNCE_WINDOW_MS,
        publisher_stack_size: 4096,
        publisher_priority: 10,
        events_stack_size: 6144,
        drain_period_ms: 10,
        report_period_ms: 10_000,
        messaging: MessagingConfig::DEFAULT,
    };
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Global configuration.
pub static CONFIG: AppConfig = AppConfig::DEFAULT;

const fn env_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}

/// Parse a decimal GPIO number at compile time.
const fn parse_pin(s: &str) -> i32 {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "BUTTON_GPIO is empty");

    let mut value = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        assert!(b.is_ascii_digit(), "BUTTON_GPIO must be a decimal number");
        value = value * 10 + (b - b'0') as i32;
        assert!(value < 64, "BUTTON_GPIO out of range");
        i += 1;
    }
    value
}
