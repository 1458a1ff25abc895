//! Port traits — the boundary between the routing core and the outside
//! world.
//!
//! ```text
//!   Mailbox ──▶ Dispatcher ──▶ ActuatorPort (hardware)
//!                         └──▶ CloudPort    (parameter store)
//! ```
//!
//! The dispatcher consumes these via generics, so the routing core never
//! touches GPIO registers or the cloud agent directly and the whole
//! pipeline tests on the host with mock adapters.

use crate::error::MirrorError;
use crate::packet::DeviceKind;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: dispatcher → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the device registry calls this to command
/// actuators.  Implementations must be idempotent — re-applying the
/// current state is a harmless repeat of the same hardware write.
pub trait ActuatorPort {
    /// Drive the onboard LED on or off.
    fn set_led(&mut self, on: bool);

    /// Energise or release the pump relay.
    fn set_pump(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Cloud port (driven adapter: dispatcher → parameter store)
// ───────────────────────────────────────────────────────────────

/// A value pushed into a cloud-facing parameter slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(u8),
    Float(f32),
}

/// Outbound port toward the cloud parameter store.  The transport
/// behind it (RainMaker agent, MQTT bridge, in-memory table for tests)
/// is somebody else's problem; the core only pushes values.
pub trait CloudPort {
    /// Push `value` into the parameter `param` of the device's cloud
    /// registration and report it.  A missing registration or handle is
    /// a configuration error surfaced to the caller, not retried.
    fn update_and_report(
        &mut self,
        device: DeviceKind,
        param: &str,
        value: ParamValue,
    ) -> Result<(), MirrorError>;
}
