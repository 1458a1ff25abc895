//! Unified error types for the SoilNode firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! dispatch loop's error handling uniform.  All variants are `Copy` so they
//! can be cheaply logged and discarded without allocation.

use core::fmt;

use crate::packet::DeviceKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A raw packet could not be decoded into a typed event.
    Packet(PacketError),
    /// A packet reached a handler that cannot process it.
    Route(RouteError),
    /// Reporting toward the cloud parameter store failed.
    Mirror(MirrorError),
    /// Peripheral or cloud-registration initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packet(e) => write!(f, "packet: {e}"),
            Self::Route(e) => write!(f, "route: {e}"),
            Self::Mirror(e) => write!(f, "mirror: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Packet decode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// The raw direction tag maps to no known direction.
    UnknownDirection(u8),
    /// The raw device tag maps to no known device kind.
    UnknownDevice(u8),
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDirection(tag) => write!(f, "unknown direction tag {tag}"),
            Self::UnknownDevice(tag) => write!(f, "unknown device tag {tag}"),
        }
    }
}

impl From<PacketError> for Error {
    fn from(e: PacketError) -> Self {
        Self::Packet(e)
    }
}

// ---------------------------------------------------------------------------
// Routing errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// The sensor accepts no writes from the cloud side.
    SensorReadOnly,
    /// Payload tag does not match the target device (e.g. a sensor
    /// packet carrying an on/off flag).
    PayloadMismatch(DeviceKind),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorReadOnly => write!(f, "sensor is read-only"),
            Self::PayloadMismatch(dev) => write!(f, "payload mismatch for {dev:?}"),
        }
    }
}

impl From<RouteError> for Error {
    fn from(e: RouteError) -> Self {
        Self::Route(e)
    }
}

// ---------------------------------------------------------------------------
// Cloud mirror errors
// ---------------------------------------------------------------------------

/// Mirror failures are configuration errors: the device was never
/// registered with the cloud layer, so no parameter handle exists.
/// Surfaced to the caller, never retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorError {
    /// No cloud registration exists for this device kind.
    NotRegistered(DeviceKind),
    /// The cloud layer has no parameter slot under the requested name.
    HandleMissing(DeviceKind),
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered(dev) => write!(f, "{dev:?} not registered with cloud"),
            Self::HandleMissing(dev) => write!(f, "no parameter handle for {dev:?}"),
        }
    }
}

impl From<MirrorError> for Error {
    fn from(e: MirrorError) -> Self {
        Self::Mirror(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
