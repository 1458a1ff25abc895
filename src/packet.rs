//! Event packet model — the unit of communication on the mailbox.
//!
//! Every state change in the system travels as one immutable packet,
//! tagged with a direction and a target device:
//!
//! ```text
//! DeviceToMirror   hardware happened → report it to the cloud
//! MirrorToDevice   cloud asked for it → apply it to hardware
//! ```
//!
//! The mailbox itself carries [`RawPacket`], the fixed-layout struct
//! producers in interrupt/timer contexts can build without allocation.
//! The dispatcher decodes it into a typed [`EventPacket`] on dequeue;
//! unknown tags are rejected there, logged, and dropped.

use crate::error::PacketError;

// ── Direction ─────────────────────────────────────────────────

/// Which side of the system must process a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Hardware-originated change, to be reported toward the cloud.
    DeviceToMirror = 0,
    /// Cloud-originated write, to be applied to hardware.
    MirrorToDevice = 1,
}

impl Direction {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::DeviceToMirror),
            1 => Some(Self::MirrorToDevice),
            _ => None,
        }
    }
}

// ── Device kind ───────────────────────────────────────────────

/// Target device for a packet.  The set is closed and known at compile
/// time, so routing is a plain `match`, never dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceKind {
    Led = 0,
    Pump = 1,
    Sensor = 2,
}

impl DeviceKind {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Led),
            1 => Some(Self::Pump),
            2 => Some(Self::Sensor),
            _ => None,
        }
    }
}

// ── Payload ───────────────────────────────────────────────────

/// Typed payload.  The tag must be consistent with the target device:
/// `OnOff`/`Level` for Led and Pump, `SensorValue` for Sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    /// Boolean power state for Led / Pump.
    OnOff(bool),
    /// Brightness or pump speed (0–100).  Currently a placeholder —
    /// accepted on the wire but not yet wired to hardware.
    Level(u8),
    /// Mapped soil-moisture reading (0–100 domain range).
    SensorValue(f32),
}

// ── Event packet ──────────────────────────────────────────────

/// One immutable state-change message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPacket {
    pub direction: Direction,
    pub device: DeviceKind,
    pub payload: Payload,
}

impl EventPacket {
    /// Hardware-originated on/off change for an actuator.
    pub fn device_to_mirror(device: DeviceKind, payload: Payload) -> Self {
        Self {
            direction: Direction::DeviceToMirror,
            device,
            payload,
        }
    }

    /// Cloud-originated write toward an actuator.
    pub fn mirror_to_device(device: DeviceKind, payload: Payload) -> Self {
        Self {
            direction: Direction::MirrorToDevice,
            device,
            payload,
        }
    }

    /// Invariant check: the payload tag matches the target device.
    /// A Sensor packet never carries `OnOff` or `Level`.
    pub fn payload_matches_device(&self) -> bool {
        matches!(
            (self.device, self.payload),
            (DeviceKind::Led | DeviceKind::Pump, Payload::OnOff(_) | Payload::Level(_))
                | (DeviceKind::Sensor, Payload::SensorValue(_))
        )
    }

    /// Encode into the fixed mailbox layout.
    pub fn to_raw(self) -> RawPacket {
        let mut raw = RawPacket {
            direction: self.direction as u8,
            device: self.device as u8,
            ..RawPacket::default()
        };
        match self.payload {
            Payload::OnOff(on) => {
                raw.on_off = on;
                raw.is_on_off = true;
            }
            Payload::Level(level) => match self.device {
                DeviceKind::Pump => raw.pump_speed = level,
                _ => raw.brightness = level,
            },
            Payload::SensorValue(v) => raw.sensor = v,
        }
        raw
    }
}

// ── Raw packet ────────────────────────────────────────────────

/// Fixed-layout packet as carried by the mailbox.  All payload fields
/// are present; the device tag plus `is_on_off` select which one is
/// meaningful.  Small and `Copy`, safe to build in a timer or
/// interrupt-adjacent context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawPacket {
    pub direction: u8,
    pub device: u8,
    pub on_off: bool,
    pub brightness: u8,
    pub pump_speed: u8,
    pub sensor: f32,
    /// Discriminates `OnOff` from `Level` for Led / Pump packets.
    pub is_on_off: bool,
}

impl RawPacket {
    /// Decode into a typed packet, rejecting unknown tags.
    pub fn decode(self) -> Result<EventPacket, PacketError> {
        let direction =
            Direction::from_u8(self.direction).ok_or(PacketError::UnknownDirection(self.direction))?;
        let device = DeviceKind::from_u8(self.device).ok_or(PacketError::UnknownDevice(self.device))?;

        let payload = match device {
            DeviceKind::Sensor => Payload::SensorValue(self.sensor),
            DeviceKind::Led => {
                if self.is_on_off {
                    Payload::OnOff(self.on_off)
                } else {
                    Payload::Level(self.brightness)
                }
            }
            DeviceKind::Pump => {
                if self.is_on_off {
                    Payload::OnOff(self.on_off)
                } else {
                    Payload::Level(self.pump_speed)
                }
            }
        };

        Ok(EventPacket {
            direction,
            device,
            payload,
        })
    }
}
