//! `esp_timer` as the monotonic clock.

use esp_idf_svc::sys;

use crate::clock::Clock;

/// Milliseconds since boot from the 64-bit `esp_timer`, truncated to `u32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EspTimerClock;

impl Clock for EspTimerClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        // SAFETY: esp_timer_get_time is callable from any context, ISR included
        let now_us = unsafe { sys::esp_timer_get_time() };
        (now_us / 1000) as u32
    }
}
