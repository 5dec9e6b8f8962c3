//! FreeRTOS binary semaphore as the queue doorbell.
//!
//! Given from the GPIO ISR (presses) and from the MQTT event task
//! (connections), taken by the publishing task. A binary semaphore latches
//! one give, which is exactly the `Doorbell` contract.

use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::{interrupt, task};
use esp_idf_svc::sys;

use crate::queue::Doorbell;

/// `queueQUEUE_TYPE_BINARY_SEMAPHORE` from FreeRTOS `queue.h`.
const QUEUE_TYPE_BINARY_SEMAPHORE: u8 = 3;

/// `queueSEND_TO_BACK` from FreeRTOS `queue.h`.
const QUEUE_SEND_TO_BACK: sys::BaseType_t = 0;

/// Doorbell rung from interrupt context.
pub struct IsrDoorbell {
    handle: sys::QueueHandle_t,
}

// SAFETY: FreeRTOS semaphores are designed for cross-task and ISR use;
// the handle is never freed.
unsafe impl Send for IsrDoorbell {}
unsafe impl Sync for IsrDoorbell {}

impl IsrDoorbell {
    /// Create the semaphore. `None` if FreeRTOS is out of heap.
    pub fn new() -> Option<Self> {
        // SAFETY: plain FreeRTOS allocation, checked for null below
        let handle = unsafe { sys::xQueueGenericCreate(1, 0, QUEUE_TYPE_BINARY_SEMAPHORE) };
        if handle.is_null() {
            None
        } else {
            Some(Self { handle })
        }
    }
}

impl Doorbell for IsrDoorbell {
    /// Callable from the ISR and from tasks; picks the matching API.
    #[inline]
    fn ring(&self) {
        if !interrupt::active() {
            // SAFETY: valid handle, task context. Zero timeout: an already
            // given semaphore means the bell is rung.
            unsafe {
                sys::xQueueGenericSend(self.handle, core::ptr::null(), 0, QUEUE_SEND_TO_BACK);
            }
            return;
        }

        let mut woken: sys::BaseType_t = 0;

        // SAFETY: valid handle, interrupt context
        unsafe {
            sys::xQueueGiveFromISR(self.handle, &mut woken);
        }

        if woken != 0 {
            task::do_yield();
        }
    }

    #[inline]
    fn wait(&self) {
        // SAFETY: valid handle, called from task context
        unsafe {
            sys::xQueueSemaphoreTake(self.handle, BLOCK);
        }
    }
}
