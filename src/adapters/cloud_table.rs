//! In-memory cloud parameter table.
//!
//! Stands where the cloud agent plugs in: each device registers the
//! parameter slots it mirrors, and every report updates the slot and
//! logs the pushed value.  The dispatcher only sees [`CloudPort`], so a
//! real transport can replace this adapter without touching the core.

use log::info;

use crate::cloud::{PARAM_BRIGHTNESS, PARAM_POWER, PARAM_SPEED, PARAM_TEMPERATURE};
use crate::error::{Error, MirrorError, Result};
use crate::packet::DeviceKind;
use crate::ports::{CloudPort, ParamValue};

/// Fixed-capacity table; three devices with at most two params each.
const MAX_PARAMS: usize = 8;

struct ParamSlot {
    device: DeviceKind,
    name: heapless::String<16>,
    value: ParamValue,
}

/// Heap-free parameter store implementing [`CloudPort`].
pub struct ParamTableAdapter {
    slots: heapless::Vec<ParamSlot, MAX_PARAMS>,
}

impl ParamTableAdapter {
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
        }
    }

    /// Create the parameter slots a device mirrors.  Must run during
    /// bring-up, before the dispatcher starts reporting.
    pub fn register_device(&mut self, device: DeviceKind, initial_power: bool) -> Result<()> {
        match device {
            DeviceKind::Led => {
                self.add_slot(device, PARAM_POWER, ParamValue::Bool(initial_power))?;
                self.add_slot(device, PARAM_BRIGHTNESS, ParamValue::Int(0))?;
            }
            DeviceKind::Pump => {
                self.add_slot(device, PARAM_POWER, ParamValue::Bool(initial_power))?;
                self.add_slot(device, PARAM_SPEED, ParamValue::Int(0))?;
            }
            DeviceKind::Sensor => {
                self.add_slot(device, PARAM_TEMPERATURE, ParamValue::Float(0.0))?;
            }
        }
        Ok(())
    }

    /// Current value of a slot, if the device registered it.
    pub fn get(&self, device: DeviceKind, param: &str) -> Option<ParamValue> {
        self.slots
            .iter()
            .find(|s| s.device == device && s.name.as_str() == param)
            .map(|s| s.value)
    }

    fn add_slot(&mut self, device: DeviceKind, name: &str, value: ParamValue) -> Result<()> {
        let name =
            heapless::String::try_from(name).map_err(|_| Error::Init("param name too long"))?;
        self.slots
            .push(ParamSlot {
                device,
                name,
                value,
            })
            .map_err(|_| Error::Init("cloud param table full"))?;
        Ok(())
    }
}

impl Default for ParamTableAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudPort for ParamTableAdapter {
    fn update_and_report(
        &mut self,
        device: DeviceKind,
        param: &str,
        value: ParamValue,
    ) -> core::result::Result<(), MirrorError> {
        let mut device_known = false;
        for slot in self.slots.iter_mut() {
            if slot.device != device {
                continue;
            }
            device_known = true;
            if slot.name.as_str() == param {
                slot.value = value;
                info!("cloud report: {device:?}.{param} = {value:?}");
                return Ok(());
            }
        }
        if device_known {
            Err(MirrorError::HandleMissing(device))
        } else {
            Err(MirrorError::NotRegistered(device))
        }
    }
}
