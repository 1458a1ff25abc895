//! Cloud mirror — per-device reporting toward the cloud parameter store.
//!
//! Hardware-originated changes (button toggles, moisture samples) end
//! here: the mirror picks the parameter slot for the device kind and
//! pushes the value through the [`CloudPort`].  A device that was never
//! registered with the cloud layer is a configuration error surfaced to
//! the caller — there is no retry path.

use crate::cloud::{PARAM_BRIGHTNESS, PARAM_POWER, PARAM_SPEED, PARAM_TEMPERATURE};
use crate::error::{Error, MirrorError, RouteError};
use crate::packet::{DeviceKind, Payload};
use crate::ports::{CloudPort, ParamValue};

/// Tracks which device kinds completed cloud registration at startup.
#[derive(Debug, Default)]
pub struct CloudMirror {
    registered: [bool; 3],
}

impl CloudMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a device as registered with the cloud layer.  Called once
    /// per device during bring-up, after the cloud adapter has created
    /// its parameter slots.
    pub fn register(&mut self, device: DeviceKind) {
        self.registered[device as usize] = true;
    }

    pub fn is_registered(&self, device: DeviceKind) -> bool {
        self.registered[device as usize]
    }

    /// Report one payload for one device.  Exactly one port call per
    /// invocation; errors propagate to the dispatcher, which logs and
    /// moves on.
    pub fn report(
        &self,
        cloud: &mut impl CloudPort,
        device: DeviceKind,
        payload: Payload,
    ) -> Result<(), Error> {
        if !self.is_registered(device) {
            return Err(MirrorError::NotRegistered(device).into());
        }

        let (param, value) = match (device, payload) {
            (DeviceKind::Led | DeviceKind::Pump, Payload::OnOff(on)) => {
                (PARAM_POWER, ParamValue::Bool(on))
            }
            (DeviceKind::Led, Payload::Level(v)) => (PARAM_BRIGHTNESS, ParamValue::Int(v)),
            (DeviceKind::Pump, Payload::Level(v)) => (PARAM_SPEED, ParamValue::Int(v)),
            // The probe is mislabelled as a temperature parameter on the
            // cloud side for now; the device attribute says as much.
            (DeviceKind::Sensor, Payload::SensorValue(v)) => {
                (PARAM_TEMPERATURE, ParamValue::Float(v))
            }
            _ => return Err(RouteError::PayloadMismatch(device).into()),
        };

        cloud.update_and_report(device, param, value)?;
        Ok(())
    }
}
