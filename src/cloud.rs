//! Cloud parameter-write producer.
//!
//! The cloud stack invokes this path from its own callback thread when
//! an external write arrives for a device parameter.  Known parameters
//! become `MirrorToDevice` packets on the mailbox and are optimistically
//! echoed back as acknowledged; unknown parameter names are logged and
//! ignored — the handler always reports success so a junk write can
//! never fault the cloud session.

use log::{error, info, warn};

use crate::error::MirrorError;
use crate::mailbox::Mailbox;
use crate::packet::{DeviceKind, EventPacket, Payload};
use crate::ports::{CloudPort, ParamValue};

// ── External parameter-name contract ──────────────────────────

/// On/off parameter carried by the LED and pump devices.
pub const PARAM_POWER: &str = "Power";
/// LED brightness placeholder (accepted, not yet actuated).
pub const PARAM_BRIGHTNESS: &str = "Brightness";
/// Pump speed placeholder (accepted, not yet actuated).
pub const PARAM_SPEED: &str = "Speed";
/// Sensor reading slot.  The moisture probe is mislabelled as a
/// temperature parameter on the cloud side for now.
pub const PARAM_TEMPERATURE: &str = "Temperature";

/// Handle one parameter write from the cloud.
///
/// Always returns `Ok(())` toward the cloud session: an unknown
/// parameter name or a full mailbox produces a log line and nothing
/// else.  A known parameter is enqueued for the dispatcher and echoed
/// back through `cloud` immediately (optimistic acknowledgement — the
/// hardware catches up when the packet is routed).
pub fn handle_param_write(
    device: DeviceKind,
    param: &str,
    value: ParamValue,
    mailbox: &Mailbox,
    cloud: &mut impl CloudPort,
) -> Result<(), MirrorError> {
    // Each device accepts its own small parameter set; anything else
    // falls through to the ignore path.
    let payload = match (device, param, value) {
        (DeviceKind::Led | DeviceKind::Pump, PARAM_POWER, ParamValue::Bool(on)) => {
            Payload::OnOff(on)
        }
        (DeviceKind::Led, PARAM_BRIGHTNESS, ParamValue::Int(level))
        | (DeviceKind::Pump, PARAM_SPEED, ParamValue::Int(level)) => Payload::Level(level),
        _ => {
            // Silently ignore: unknown names (and type-mismatched
            // values) must not fault the cloud session.
            error!("cloud: unknown param '{param}' for {device:?} — ignored");
            return Ok(());
        }
    };

    info!("cloud: write {device:?}/{param} = {value:?}");

    let packet = EventPacket::mirror_to_device(device, payload);
    if mailbox.try_enqueue(packet.to_raw()).is_err() {
        // Accepted data-loss path: the write is acknowledged but the
        // hardware never sees it; the cloud view self-corrects on the
        // next device-originated report.
        warn!("cloud: mailbox full, write to {device:?}/{param} dropped");
        return Ok(());
    }

    // Optimistic echo — acknowledge before the dispatcher applies it.
    cloud.update_and_report(device, param, value)?;
    Ok(())
}

/// Parse a JSON write request (`{"Power": true, "Brightness": 25}`)
/// and apply each entry.  This is the shape the cloud agent delivers
/// per-device write callbacks in.
pub fn handle_write_request(
    device: DeviceKind,
    body: &str,
    mailbox: &Mailbox,
    cloud: &mut impl CloudPort,
) -> Result<(), MirrorError> {
    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            error!("cloud: unparseable write request ({e}) — ignored");
            return Ok(());
        }
    };

    let Some(map) = parsed.as_object() else {
        error!("cloud: write request is not a parameter map — ignored");
        return Ok(());
    };

    for (param, raw) in map {
        let value = match raw {
            serde_json::Value::Bool(b) => ParamValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(v) if v <= u64::from(u8::MAX) => ParamValue::Int(v as u8),
                _ => {
                    error!("cloud: out-of-range value for '{param}' — ignored");
                    continue;
                }
            },
            _ => {
                error!("cloud: unsupported value type for '{param}' — ignored");
                continue;
            }
        };
        handle_param_write(device, param, value, mailbox, cloud)?;
    }
    Ok(())
}
