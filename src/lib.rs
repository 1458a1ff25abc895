//! SoilNode firmware library.
//!
//! Event-routing core of a single-node soil-moisture controller: three
//! producers (button ISR, sensor timer, cloud write handler) push raw
//! packets into one bounded mailbox, and a single dispatcher drains it,
//! routing each packet to the hardware side or the cloud mirror.
//!
//! ```text
//!   button ──┐
//!   sensor ──┼──▶ Mailbox ──▶ Dispatcher ──┬──▶ DeviceRegistry ──▶ ActuatorPort
//!   cloud  ──┘                             └──▶ CloudMirror    ──▶ CloudPort
//! ```
//!
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module, so the routing core builds and tests on the host.

#![deny(unused_must_use)]

pub mod cloud;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod mailbox;
pub mod mirror;
pub mod packet;
pub mod ports;
pub mod registry;

mod pins;

// Outer ring: hardware-facing modules with cfg-gated sim stubs.
pub mod adapters;
pub mod drivers;
pub mod sensors;
