//! Hardware adapter — bridges real actuators to the port traits.
//!
//! Owns the LED and pump drivers and exposes them through
//! [`ActuatorPort`].  This is the only module the dispatcher reaches
//! hardware through; on non-espidf targets the underlying drivers use
//! cfg-gated simulation stubs.

use crate::drivers::led::OnboardLed;
use crate::drivers::pump::PumpDriver;
use crate::ports::ActuatorPort;

/// Concrete adapter that combines the actuators behind the port trait.
pub struct HardwareAdapter {
    led: OnboardLed,
    pump: PumpDriver,
}

impl HardwareAdapter {
    pub fn new(led: OnboardLed, pump: PumpDriver) -> Self {
        Self { led, pump }
    }

    /// Last state written to the pump relay.
    pub fn pump_on(&self) -> bool {
        self.pump.is_on()
    }
}

impl ActuatorPort for HardwareAdapter {
    fn set_led(&mut self, on: bool) {
        self.led.set(on);
    }

    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }
}
