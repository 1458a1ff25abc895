//! Mock adapters for integration tests.
//!
//! Records every actuator and cloud call so tests can assert on the
//! full command history without touching real GPIO or a cloud session.

use soilnode::error::MirrorError;
use soilnode::packet::DeviceKind;
use soilnode::ports::{ActuatorPort, CloudPort, ParamValue};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    SetLed(bool),
    SetPump(bool),
}

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn led_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetLed(on) => Some(*on),
                ActuatorCall::SetPump(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetPump(on) => Some(*on),
                ActuatorCall::SetLed(_) => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn set_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetLed(on));
    }

    fn set_pump(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetPump(on));
    }
}

// ── Recording cloud port ──────────────────────────────────────

pub struct MockCloud {
    pub reports: Vec<(DeviceKind, String, ParamValue)>,
}

#[allow(dead_code)]
impl MockCloud {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    pub fn last_for(&self, device: DeviceKind, param: &str) -> Option<ParamValue> {
        self.reports
            .iter()
            .rev()
            .find(|(d, p, _)| *d == device && p == param)
            .map(|(_, _, v)| *v)
    }
}

impl Default for MockCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudPort for MockCloud {
    fn update_and_report(
        &mut self,
        device: DeviceKind,
        param: &str,
        value: ParamValue,
    ) -> Result<(), MirrorError> {
        self.reports.push((device, param.to_owned(), value));
        Ok(())
    }
}
