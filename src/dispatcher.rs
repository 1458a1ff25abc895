//! Dispatcher — the single consumer of the event mailbox.
//!
//! Two logical states, forever: *Idle* (bounded wait on the mailbox)
//! and *Routing* (processing exactly one packet).  Routing is a plain
//! match on direction:
//!
//! ```text
//! MirrorToDevice ──▶ DeviceRegistry  (actuate + cache)
//! DeviceToMirror ──▶ CloudMirror     (report toward the cloud)
//! ```
//!
//! The dispatcher exclusively owns all device state; producers reach it
//! only through packets.  One packet per loop iteration gives
//! at-most-one concurrent actuation per device kind with no locking.
//! Every routing failure is logged and the packet dropped — the loop
//! never stops for a bad packet.

use std::time::Duration;

use log::{debug, error};

use crate::error::{Error, Result};
use crate::mailbox::Mailbox;
use crate::mirror::CloudMirror;
use crate::packet::{DeviceKind, Direction, Payload, RawPacket};
use crate::ports::{ActuatorPort, CloudPort};
use crate::registry::DeviceRegistry;

/// Bounded wait per Idle cycle before re-checking the mailbox.
const DEQUEUE_TIMEOUT: Duration = Duration::from_millis(100);

/// Where a successfully routed packet went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Applied to hardware via the device registry.
    Actuated(DeviceKind),
    /// Reported toward the cloud via the mirror.
    Mirrored(DeviceKind),
}

/// Single-consumer router owning the registry and mirror.
pub struct Dispatcher {
    registry: DeviceRegistry,
    mirror: CloudMirror,
}

impl Dispatcher {
    pub fn new(registry: DeviceRegistry, mirror: CloudMirror) -> Self {
        Self { registry, mirror }
    }

    /// Decode and route one raw packet.
    pub fn dispatch(
        &mut self,
        raw: RawPacket,
        hw: &mut impl ActuatorPort,
        cloud: &mut impl CloudPort,
    ) -> Result<Route> {
        let packet = raw.decode().map_err(Error::Packet)?;
        debug!(
            "dispatch: {:?} {:?} {:?}",
            packet.direction, packet.device, packet.payload
        );

        match packet.direction {
            Direction::MirrorToDevice => {
                self.registry
                    .apply(hw, packet.device, packet.payload)
                    .map_err(Error::Route)?;
                Ok(Route::Actuated(packet.device))
            }
            Direction::DeviceToMirror => {
                // The latest successful sample is the sensor's source
                // of truth; actuator caches are untouched by
                // device-originated traffic.
                if let Payload::SensorValue(v) = packet.payload {
                    self.registry.record_sample(v);
                }
                self.mirror.report(cloud, packet.device, packet.payload)?;
                Ok(Route::Mirrored(packet.device))
            }
        }
    }

    /// Consumer loop: Idle → Routing → Idle, for the process lifetime.
    pub fn run(
        &mut self,
        mailbox: &Mailbox,
        hw: &mut impl ActuatorPort,
        cloud: &mut impl CloudPort,
    ) -> ! {
        loop {
            let Some(raw) = mailbox.dequeue_with_timeout(DEQUEUE_TIMEOUT) else {
                continue; // empty-on-timeout: stay Idle
            };
            if let Err(e) = self.dispatch(raw, hw, cloud) {
                // Log-and-drop: no retry, no propagation.
                error!("dispatch: {e} — packet dropped");
            }
        }
    }

    /// Read-only view of the cached device state.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn mirror_mut(&mut self) -> &mut CloudMirror {
        &mut self.mirror
    }
}
