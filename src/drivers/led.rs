//! Onboard RGB LED driver.
//!
//! The LED is a plain on/off indicator in this firmware: "on" drives
//! the fixed dim-green colour from `pins::LED_ON_RGB`, "off" clears all
//! three channels.
//!
//! The applied state lives in a static atomic rather than in the driver
//! struct because two contexts legitimately need it: the dispatcher
//! (via [`OnboardLed`]) and the button producer, which reads the last
//! hardware state to compute its toggle without waiting for the
//! dispatcher.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::drivers::hw_init;
use crate::pins;

/// Last state actually written to the hardware.
static LED_ON: AtomicBool = AtomicBool::new(false);

/// Drive the LED.  Lock-free; safe from any producer context.
pub fn write(on: bool) {
    LED_ON.store(on, Ordering::Release);
    let (r, g, b) = if on { pins::LED_ON_RGB } else { (0, 0, 0) };
    hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r);
    hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g);
    hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
}

/// Last applied hardware state.
pub fn is_on() -> bool {
    LED_ON.load(Ordering::Acquire)
}

/// Dispatcher-side handle to the LED for the actuator port.
pub struct OnboardLed;

impl Default for OnboardLed {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardLed {
    pub fn new() -> Self {
        Self
    }

    pub fn set(&mut self, on: bool) {
        write(on);
    }

    pub fn is_on(&self) -> bool {
        is_on()
    }
}
