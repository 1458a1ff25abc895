//! Hardware drivers.
//!
//! Dual-target: on ESP-IDF these drive real peripherals through
//! [`hw_init`]'s raw-sys helpers; on the host they track state
//! in-memory so the whole stack tests without a board.

pub mod button;
pub mod hw_init;
pub mod led;
pub mod pump;
