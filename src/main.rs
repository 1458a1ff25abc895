//! SoilNode Firmware — Main Entry Point
//!
//! Bring-up order matters: peripherals first, then cloud registration,
//! then the producer threads, and only then the dispatch loop — packets
//! enqueued before registration would hit a mirror with no handles.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ button ISR ─┐                                            │
//! │ sampler    ─┼─▶ EVENT_MAILBOX ─▶ Dispatcher              │
//! │ cloud write─┘                      ├─▶ HardwareAdapter   │
//! │                                    └─▶ ParamTableAdapter │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{error, info, warn};

use soilnode::adapters::cloud_table::ParamTableAdapter;
use soilnode::adapters::hardware::HardwareAdapter;
use soilnode::config::NodeConfig;
use soilnode::dispatcher::Dispatcher;
use soilnode::drivers::button::ButtonDriver;
use soilnode::drivers::led::OnboardLed;
use soilnode::drivers::pump::PumpDriver;
use soilnode::drivers::{button, hw_init, led};
use soilnode::mailbox::EVENT_MAILBOX;
use soilnode::mirror::CloudMirror;
use soilnode::packet::DeviceKind;
use soilnode::registry::DeviceRegistry;
use soilnode::sensors::moisture::{sample_once, MoistureSensor};

/// Button poll cadence.  The ISR only records a timestamp; this thread
/// turns it into debounced toggle events.
const BUTTON_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SoilNode v{}", env!("CARGO_PKG_VERSION"));

    let config = NodeConfig::default();
    info!(
        "Config: sample every {}s, settle {}ms",
        config.sample_period_secs, config.sensor_settle_ms
    );

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.  The
        // watchdog resets the node after timeout.
        error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        warn!("ISR service init failed: {e} — button disabled");
    }

    // Known actuator state before anything can enqueue.
    led::write(config.initial_power_state);
    let mut pump = PumpDriver::new();
    pump.set(config.initial_power_state);

    // ── 3. Cloud registration ─────────────────────────────────
    let mut cloud = ParamTableAdapter::new();
    let mut mirror = CloudMirror::new();
    for device in [DeviceKind::Led, DeviceKind::Pump, DeviceKind::Sensor] {
        cloud.register_device(device, config.initial_power_state)?;
        mirror.register(device);
    }

    let registry = DeviceRegistry::new(config.initial_power_state, config.initial_sensor_reading);
    let mut dispatcher = Dispatcher::new(registry, mirror);
    let mut hw = HardwareAdapter::new(OnboardLed::new(), pump);

    // ── 4. Producer threads ───────────────────────────────────
    let sample_period = Duration::from_secs(u64::from(config.sample_period_secs));
    let settle_ms = config.sensor_settle_ms;
    let initial_reading = config.initial_sensor_reading;
    thread::Builder::new()
        .name("sampler".into())
        .stack_size(4096)
        .spawn(move || {
            let mut sensor = MoistureSensor::new(settle_ms, initial_reading);
            loop {
                thread::sleep(sample_period);
                sample_once(&mut sensor, &EVENT_MAILBOX);
            }
        })?;

    thread::Builder::new()
        .name("button".into())
        .stack_size(4096)
        .spawn(move || {
            let boot = Instant::now();
            let mut btn = ButtonDriver::new();
            loop {
                thread::sleep(BUTTON_POLL);
                let now_ms = boot.elapsed().as_millis() as u32;
                if btn.poll(now_ms) {
                    button::toggle_onboard_led(&EVENT_MAILBOX);
                }
            }
        })?;

    info!("System ready. Entering dispatch loop.");

    // ── 5. Dispatch loop ──────────────────────────────────────
    dispatcher.run(&EVENT_MAILBOX, &mut hw, &mut cloud)
}
