//! button-mqtt - firmware entry point
//!
//! 1. Bring up logging, Wi-Fi and the MQTT client
//! 2. Wire GPIO ISR -> queue -> publishing task
//! 3. Start the MQTT event task and the log drain task
//! 4. Park the main task

#[cfg(target_os = "espidf")]
mod firmware {
    use core::ffi::CStr;
    use std::thread;

    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;
    use esp_idf_svc::log::EspLogger;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::sys;
    use log::{error, info, warn};

    use esp_button_mqtt::clock::Clock;
    use esp_button_mqtt::log_drain::{forward_to_log, LogDrain};
    use esp_button_mqtt::log_globals::ALL_LOG_STREAMS;
    use esp_button_mqtt::messaging::ConnectLatch;
    use esp_button_mqtt::platform::{
        button, mqtt, network, ButtonCapture, ButtonQueue, EspMessagingClient, EspTimerClock,
        IsrDoorbell, StartupError,
    };
    use esp_button_mqtt::{ClientEventHandler, PressPublisher, CONFIG, PIPELINE_STATS};

    const VERSION_STRING: &str = env!("VERSION_STRING");

    /// Lowest application priority: draining must never delay a publish.
    const DRAIN_PRIORITY: u8 = 1;
    const DRAIN_STACK_SIZE: usize = 4096;
    /// Same priority as the publisher; the two never run long.
    const EVENTS_PRIORITY: u8 = 10;

    pub fn main() {
        sys::link_patches();
        EspLogger::initialize_default();

        if let Err(e) = run() {
            error!("Startup failed: {}", e);
            std::process::abort();
        }
    }

    fn print_banner() {
        // SAFETY: both calls are plain getters; the version string is static
        let (free_heap, idf_version) = unsafe {
            (
                sys::esp_get_free_heap_size(),
                CStr::from_ptr(sys::esp_get_idf_version()),
            )
        };

        info!("{}", VERSION_STRING);
        info!("[APP] Free memory: {} bytes", free_heap);
        info!("[APP] IDF version: {}", idf_version.to_string_lossy());
        info!("[APP] Broker: {}", CONFIG.broker_url);
    }

    /// Spawn a named FreeRTOS-backed thread with the given stack and priority.
    fn spawn<F>(name: &'static CStr, stack_size: usize, priority: u8, f: F) -> Result<(), StartupError>
    where
        F: FnOnce() + Send + 'static,
    {
        ThreadSpawnConfiguration {
            name: Some(name.to_bytes_with_nul()),
            stack_size,
            priority,
            ..Default::default()
        }
        .set()?;

        let spawned = thread::Builder::new().stack_size(stack_size).spawn(f);

        ThreadSpawnConfiguration::default().set()?;

        spawned.map(drop).map_err(|_| StartupError::Spawn(name))
    }

    fn run() -> Result<(), StartupError> {
        print_banner();

        let peripherals = Peripherals::take()?;
        let sysloop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;

        let _wifi = network::connect_wifi(
            peripherals.modem,
            sysloop,
            nvs,
            CONFIG.wifi_ssid,
            CONFIG.wifi_password,
        )?;

        // Press pipeline. Lives for the whole program.
        let doorbell = IsrDoorbell::new().ok_or(StartupError::OutOfMemory("queue doorbell"))?;
        let queue: &'static ButtonQueue = Box::leak(Box::new(ButtonQueue::new(doorbell)));
        let capture: &'static ButtonCapture = Box::leak(Box::new(ButtonCapture::new(
            queue,
            EspTimerClock,
            CONFIG.debounce_window_ms,
        )));

        // Connected events reach the publisher through the same doorbell
        let latch: &'static ConnectLatch<'static> =
            Box::leak(Box::new(ConnectLatch::new(queue.doorbell())));

        let (client, connection) = EspMessagingClient::connect(CONFIG.broker_url)?;
        let client: &'static EspMessagingClient = Box::leak(Box::new(client));

        // The event task never touches the client: the client task waits
        // inside its callback until the connection is pumped again.
        spawn(c"mqtt_events", CONFIG.events_stack_size, EVENTS_PRIORITY, move || {
            let handler = ClientEventHandler::new(latch, EspTimerClock);
            mqtt::run_event_loop(connection, |event| {
                handler.handle(event);
            });
        })?;

        spawn(
            c"publisher",
            CONFIG.publisher_stack_size,
            CONFIG.publisher_priority,
            move || {
                PressPublisher::new(queue, client, EspTimerClock, CONFIG.messaging)
                    .with_connect_latch(latch)
                    .run();
            },
        )?;

        spawn(c"log_drain", DRAIN_STACK_SIZE, DRAIN_PRIORITY, move || {
            drain_task(capture)
        })?;

        // Consumer is waiting: safe to enable the interrupt now
        button::install(CONFIG.button_gpio, capture)?;

        info!("Button relay running");

        // Keeps the Wi-Fi driver alive
        loop {
            thread::park();
        }
    }

    /// Forward ring entries to `log`, with a periodic report when anything
    /// changed.
    fn drain_task(capture: &'static ButtonCapture) -> ! {
        let clock = EspTimerClock;
        let mut drain = LogDrain::new(&ALL_LOG_STREAMS, CONFIG.report_period_ms);
        let mut last_report = None;

        loop {
            drain.drain_into(forward_to_log);

            if drain.report_due(clock.now_ms()) {
                drain.take_dropped(|source, n| {
                    warn!("Log stream {} dropped {} entries", source, n);
                });

                let report = (
                    PIPELINE_STATS.snapshot(),
                    capture.presses(),
                    capture.bounced(),
                    capture.queue().dropped(),
                );
                if last_report != Some(report) {
                    let (stats, presses, bounced, dropped) = report;
                    info!(
                        "presses={} bounced={} queue_dropped={} {}",
                        presses, bounced, dropped, stats
                    );
                    last_report = Some(report);
                }
            }

            FreeRtos::delay_ms(CONFIG.drain_period_ms);
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    firmware::main();
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("button-mqtt is ESP32 firmware; build it for an espidf target.");
    eprintln!("The hardware-free core is exercised by `cargo test` on the host.");
}
