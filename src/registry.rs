//! Device registry — per-device actuation logic and cached state.
//!
//! One authoritative value per device kind, owned by the dispatcher
//! task and mutated nowhere else.  Because only the single consumer
//! touches this struct, no locking is needed and torn writes are
//! impossible by construction.

use log::{info, warn};

use crate::error::RouteError;
use crate::packet::{DeviceKind, Payload};
use crate::ports::ActuatorPort;

/// Cached device state plus the actuation policy for cloud writes.
#[derive(Debug)]
pub struct DeviceRegistry {
    led_on: bool,
    pump_on: bool,
    /// Last successful moisture sample.  Never written by the cloud —
    /// the sensor is read-only from the mirror's perspective.
    sensor_value: f32,
}

impl DeviceRegistry {
    /// Initialise the cache from the startup inputs.  Does not touch
    /// hardware — the caller applies the initial state through the
    /// actuator port during bring-up.
    pub fn new(initial_power_state: bool, initial_sensor_reading: f32) -> Self {
        Self {
            led_on: initial_power_state,
            pump_on: initial_power_state,
            sensor_value: initial_sensor_reading,
        }
    }

    /// Apply a cloud-originated payload to a device: actuate, then
    /// update the cache.  Actuation is idempotent, so re-applying the
    /// current state is harmless.
    pub fn apply(
        &mut self,
        hw: &mut impl ActuatorPort,
        device: DeviceKind,
        payload: Payload,
    ) -> Result<(), RouteError> {
        match (device, payload) {
            (DeviceKind::Led, Payload::OnOff(on)) => {
                hw.set_led(on);
                self.led_on = on;
                info!("registry: LED -> {}", if on { "on" } else { "off" });
                Ok(())
            }
            (DeviceKind::Pump, Payload::OnOff(on)) => {
                hw.set_pump(on);
                self.pump_on = on;
                info!("registry: pump -> {}", if on { "on" } else { "off" });
                Ok(())
            }
            (DeviceKind::Led | DeviceKind::Pump, Payload::Level(level)) => {
                // Brightness / speed are accepted on the wire but not
                // yet wired to hardware; state is left unchanged.
                warn!("registry: level {level} for {device:?} not wired to hardware yet");
                Ok(())
            }
            (DeviceKind::Sensor, _) => Err(RouteError::SensorReadOnly),
            (_, Payload::SensorValue(_)) => Err(RouteError::PayloadMismatch(device)),
        }
    }

    /// Record the latest successful moisture sample as it passes
    /// through the dispatcher on its way to the mirror.
    pub fn record_sample(&mut self, value: f32) {
        self.sensor_value = value;
    }

    pub fn led_on(&self) -> bool {
        self.led_on
    }

    pub fn pump_on(&self) -> bool {
        self.pump_on
    }

    pub fn sensor_value(&self) -> f32 {
        self.sensor_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHw {
        led_calls: Vec<bool>,
        pump_calls: Vec<bool>,
    }

    impl ActuatorPort for RecordingHw {
        fn set_led(&mut self, on: bool) {
            self.led_calls.push(on);
        }
        fn set_pump(&mut self, on: bool) {
            self.pump_calls.push(on);
        }
    }

    #[test]
    fn led_on_off_updates_cache_and_hardware() {
        let mut reg = DeviceRegistry::new(false, 20.0);
        let mut hw = RecordingHw::default();

        reg.apply(&mut hw, DeviceKind::Led, Payload::OnOff(true)).unwrap();
        assert!(reg.led_on());
        assert_eq!(hw.led_calls, vec![true]);

        reg.apply(&mut hw, DeviceKind::Led, Payload::OnOff(false)).unwrap();
        assert!(!reg.led_on());
        assert_eq!(hw.led_calls, vec![true, false]);
    }

    #[test]
    fn applying_same_state_twice_is_idempotent() {
        let mut reg = DeviceRegistry::new(false, 20.0);
        let mut hw = RecordingHw::default();

        reg.apply(&mut hw, DeviceKind::Led, Payload::OnOff(true)).unwrap();
        reg.apply(&mut hw, DeviceKind::Led, Payload::OnOff(true)).unwrap();

        assert!(reg.led_on());
        // Same hardware call repeated, no error.
        assert_eq!(hw.led_calls, vec![true, true]);
    }

    #[test]
    fn sensor_rejects_cloud_writes() {
        let mut reg = DeviceRegistry::new(false, 20.0);
        let mut hw = RecordingHw::default();

        let err = reg
            .apply(&mut hw, DeviceKind::Sensor, Payload::SensorValue(1.0))
            .unwrap_err();
        assert_eq!(err, RouteError::SensorReadOnly);
        assert!(hw.led_calls.is_empty() && hw.pump_calls.is_empty());
    }

    #[test]
    fn level_placeholder_leaves_state_unchanged() {
        let mut reg = DeviceRegistry::new(false, 20.0);
        let mut hw = RecordingHw::default();

        reg.apply(&mut hw, DeviceKind::Pump, Payload::Level(3)).unwrap();
        assert!(!reg.pump_on());
        assert!(hw.pump_calls.is_empty());
    }

    #[test]
    fn record_sample_tracks_latest_reading() {
        let mut reg = DeviceRegistry::new(false, 20.0);
        assert!((reg.sensor_value() - 20.0).abs() < f32::EPSILON);
        reg.record_sample(63.0);
        assert!((reg.sensor_value() - 63.0).abs() < f32::EPSILON);
    }
}
