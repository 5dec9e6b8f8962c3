//! GPIO button input and its interrupt registration.
//!
//! # Hardware Setup
//!
//! ```text
//! 3V3 ──[button]──▶ GPIO23 ──[internal pull-down]──▶ GND
//! ```
//!
//! Interrupt on falling edge (negative edge).

use core::ffi::c_void;

use esp_idf_svc::sys::{self, esp, EspError};
use log::info;

use crate::capture::PressCapture;
use crate::platform::clock::EspTimerClock;
use crate::platform::doorbell::IsrDoorbell;
use crate::queue::EventQueue;

/// Event queue as used on the device.
pub type ButtonQueue = EventQueue<IsrDoorbell>;

/// Interrupt capture as used on the device.
pub type ButtonCapture = PressCapture<'static, IsrDoorbell, EspTimerClock>;

/// Configure `pin` as the button input and attach `capture` as its ISR.
///
/// The capture must already be wired to its queue: the interrupt is live as
/// soon as this returns.
pub fn install(pin: i32, capture: &'static ButtonCapture) -> Result<(), EspError> {
    let io_conf = sys::gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: sys::gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: sys::gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: sys::gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: sys::gpio_int_type_t_GPIO_INTR_NEGEDGE,
        ..Default::default()
    };

    // SAFETY: io_conf outlives the call; the ISR argument is 'static and
    // the handler only reads through a shared reference.
    unsafe {
        esp!(sys::gpio_config(&io_conf))?;
        esp!(sys::gpio_install_isr_service(0))?;
        esp!(sys::gpio_isr_handler_add(
            pin,
            Some(button_isr),
            capture as *const ButtonCapture as *mut c_void,
        ))?;
    }

    info!(
        "GPIO {} configured as input with pull-down enabled and interrupt on negative edge",
        pin
    );
    Ok(())
}

/// GPIO ISR trampoline.
///
/// Runs in interrupt context. Must not block, allocate or log.
unsafe extern "C" fn button_isr(arg: *mut c_void) {
    // SAFETY: arg is the &'static ButtonCapture registered in install()
    let capture = unsafe { &*(arg as *const ButtonCapture) };

    // Outcome is visible through the queue and the capture counters
    let _ = capture.on_edge();
}
