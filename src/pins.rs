//! GPIO / peripheral pin assignments for the SoilNode board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// User button (active-low, shares the boot strapping pin)
// ---------------------------------------------------------------------------

/// Momentary push-button for toggling the onboard LED.
pub const BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Onboard RGB LED (discrete R/G/B on LEDC channels)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

/// LED "on" colour — matches H,S,V = 120,100,10 (dim green).
pub const LED_ON_RGB: (u8, u8, u8) = (0, 25, 0);

// ---------------------------------------------------------------------------
// Water pump (relay-switched)
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay coil.
pub const RELAY_GPIO: i32 = 2;
/// Relay is energised when the line is driven to this level.
pub const RELAY_ACTIVE_HIGH: bool = true;

// ---------------------------------------------------------------------------
// Soil moisture sensor (resistive probe, power-cycled between reads)
// ---------------------------------------------------------------------------

/// Digital output that powers the probe only while sampling, to slow
/// electrode corrosion.
pub const SENSOR_POWER_GPIO: i32 = 7;
/// ADC1 channel wired to the probe's analog output.
pub const SENSOR_ADC_CHANNEL: u32 = 0;
/// Full-scale raw ADC reading (12-bit oneshot).
pub const ADC_RAW_MAX: i32 = 4095;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
