//! Water pump driver (relay-switched, on/off only).
//!
//! A dumb actuator: energise the relay, remember what we did.  Speed
//! control is a future addition — today the pump DC motor is either
//! across the supply or it isn't.

use crate::drivers::hw_init;
use crate::pins;

pub struct PumpDriver {
    on: bool,
}

impl Default for PumpDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PumpDriver {
    pub fn new() -> Self {
        Self { on: false }
    }

    /// Switch the relay.  Idempotent — re-asserting the current level
    /// is a harmless repeated register write.
    pub fn set(&mut self, on: bool) {
        let level = if on {
            pins::RELAY_ACTIVE_HIGH
        } else {
            !pins::RELAY_ACTIVE_HIGH
        };
        hw_init::gpio_write(pins::RELAY_GPIO, level);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_tracks_state() {
        let mut pump = PumpDriver::new();
        assert!(!pump.is_on());
        pump.set(true);
        assert!(pump.is_on());
        pump.set(true); // repeat is a no-op side effect
        assert!(pump.is_on());
        pump.set(false);
        assert!(!pump.is_on());
    }
}
