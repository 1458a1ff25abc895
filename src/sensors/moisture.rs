//! Resistive soil-moisture probe driver and sampling producer.
//!
//! The probe is power-cycled around every read to slow electrode
//! corrosion.  One sample is:
//!
//! 1. drive the probe power GPIO high
//! 2. wait for the reading to stabilise (settle delay)
//! 3. read the raw 12-bit ADC value
//! 4. map it into the 0–100 domain range
//! 5. cut probe power
//!
//! The settle delay blocks only the sampler's own thread — never the
//! dispatcher.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC oneshot channel configured by hw_init.
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use log::{debug, warn};

use crate::drivers::hw_init;
use crate::mailbox::Mailbox;
use crate::packet::{DeviceKind, EventPacket, Payload};
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_MOISTURE_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_moisture_adc(raw: u16) {
    SIM_MOISTURE_ADC.store(raw, Ordering::Relaxed);
}

/// Mapped sensor domain range: 0 (bone dry) – 100 (saturated).
pub const SENSOR_RANGE: i32 = 100;

// Value boundaries for the moisture reading — the higher, the drier.
// Available to future watering-control logic.
pub const MOISTURE_DRY: i32 = 80;
pub const MOISTURE_WET: i32 = 60;

/// Linear range mapping with floor-toward-zero integer division —
/// exactly the classic Arduino `map()` formula.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

pub struct MoistureSensor {
    power_gpio: i32,
    adc_channel: u32,
    settle: Duration,
    last: f32,
}

impl MoistureSensor {
    pub fn new(settle_ms: u32, initial_reading: f32) -> Self {
        Self {
            power_gpio: pins::SENSOR_POWER_GPIO,
            adc_channel: pins::SENSOR_ADC_CHANNEL,
            settle: Duration::from_millis(u64::from(settle_ms)),
            last: initial_reading,
        }
    }

    /// Run the full power-enable / settle / read / convert /
    /// power-disable sequence and return the mapped value.
    pub fn read(&mut self) -> f32 {
        hw_init::gpio_write(self.power_gpio, true);
        std::thread::sleep(self.settle);

        let raw = i32::from(self.read_adc());
        let mapped = map_range(raw, 0, pins::ADC_RAW_MAX, 0, SENSOR_RANGE);

        hw_init::gpio_write(self.power_gpio, false);

        debug!("moisture: raw={raw} mapped={mapped}");
        self.last = mapped as f32;
        self.last
    }

    /// Last successful sample (or the initial reading before any).
    pub fn last_reading(&self) -> f32 {
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_MOISTURE_ADC.load(Ordering::Relaxed)
    }
}

/// One sampler period: read the probe and report the sample toward the
/// cloud.  A full mailbox drops the sample — the next period replaces
/// it anyway.
pub fn sample_once(sensor: &mut MoistureSensor, mailbox: &Mailbox) -> f32 {
    let value = sensor.read();
    let packet = EventPacket::device_to_mirror(DeviceKind::Sensor, Payload::SensorValue(value));
    if mailbox.try_enqueue(packet.to_raw()).is_err() {
        warn!("moisture: mailbox full, sample dropped");
    }
    value
}
