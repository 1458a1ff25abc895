//! Sensor drivers.

pub mod moisture;

pub use moisture::MoistureSensor;
