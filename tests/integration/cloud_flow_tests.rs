//! Dispatcher against the real in-memory parameter table.
//!
//! Same wiring as the firmware's main, minus the hardware: reports
//! routed by the dispatcher must land in the table slots the devices
//! registered at bring-up.

use std::time::Duration;

use soilnode::adapters::cloud_table::ParamTableAdapter;
use soilnode::cloud::{PARAM_POWER, PARAM_TEMPERATURE};
use soilnode::dispatcher::Dispatcher;
use soilnode::error::{Error, MirrorError};
use soilnode::mailbox::Mailbox;
use soilnode::mirror::CloudMirror;
use soilnode::packet::{DeviceKind, EventPacket, Payload};
use soilnode::ports::ParamValue;
use soilnode::registry::DeviceRegistry;

use crate::mock_adapters::MockHardware;

fn bring_up() -> (Dispatcher, ParamTableAdapter) {
    let mut table = ParamTableAdapter::new();
    let mut mirror = CloudMirror::new();
    for device in [DeviceKind::Led, DeviceKind::Pump, DeviceKind::Sensor] {
        table.register_device(device, false).unwrap();
        mirror.register(device);
    }
    let registry = DeviceRegistry::new(false, 20.0);
    (Dispatcher::new(registry, mirror), table)
}

#[test]
fn device_reports_land_in_registered_slots() {
    let mb = Mailbox::new();
    let (mut d, mut table) = bring_up();
    let mut hw = MockHardware::new();

    let led = EventPacket::device_to_mirror(DeviceKind::Led, Payload::OnOff(true)).to_raw();
    let sample =
        EventPacket::device_to_mirror(DeviceKind::Sensor, Payload::SensorValue(42.0)).to_raw();
    mb.try_enqueue(led).unwrap();
    mb.try_enqueue(sample).unwrap();

    while let Some(raw) = mb.dequeue_with_timeout(Duration::from_millis(5)) {
        d.dispatch(raw, &mut hw, &mut table).unwrap();
    }

    assert_eq!(
        table.get(DeviceKind::Led, PARAM_POWER),
        Some(ParamValue::Bool(true))
    );
    assert_eq!(
        table.get(DeviceKind::Sensor, PARAM_TEMPERATURE),
        Some(ParamValue::Float(42.0))
    );
}

#[test]
fn skipped_table_registration_surfaces_as_mirror_error() {
    let mb = Mailbox::new();
    let mut hw = MockHardware::new();

    // Mirror thinks the pump registered, but the table has no slots
    // for it — the half-finished bring-up every registration bug
    // reduces to.
    let mut table = ParamTableAdapter::new();
    let mut mirror = CloudMirror::new();
    mirror.register(DeviceKind::Pump);
    let mut d = Dispatcher::new(DeviceRegistry::new(false, 20.0), mirror);

    let raw = EventPacket::device_to_mirror(DeviceKind::Pump, Payload::OnOff(true)).to_raw();
    mb.try_enqueue(raw).unwrap();

    let raw = mb.dequeue_with_timeout(Duration::from_millis(5)).unwrap();
    let err = d.dispatch(raw, &mut hw, &mut table).unwrap_err();
    assert_eq!(
        err,
        Error::Mirror(MirrorError::NotRegistered(DeviceKind::Pump))
    );
}
