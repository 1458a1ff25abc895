//! System configuration parameters
//!
//! The two caller-supplied startup inputs (initial power state, initial
//! sensor reading) plus the sampling timings.  Supplied once at process
//! start; nothing here is hot-reloaded.

use serde::{Deserialize, Serialize};

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Startup state ---
    /// Initial on/off state applied to the LED and pump at boot.
    pub initial_power_state: bool,
    /// Initial sensor reading cached until the first real sample.
    pub initial_sensor_reading: f32,

    // --- Sampling ---
    /// Soil-moisture sampling period (seconds).
    pub sample_period_secs: u32,
    /// Probe power-on settle delay before the ADC read (milliseconds).
    pub sensor_settle_ms: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            initial_power_state: false,
            initial_sensor_reading: 20.0,
            sample_period_secs: 20,
            sensor_settle_ms: 100,
        }
    }
}
