//! ISR-debounced push-button producer.
//!
//! ## Hardware
//!
//! Active-low momentary switch on the boot pin.  The GPIO ISR records
//! the raw edge timestamp into an atomic; the button task polls
//! [`ButtonDriver::poll`] and classifies a debounced press.
//!
//! ## Producer semantics
//!
//! A debounced press toggles the LED *immediately* in the producer
//! context (responsiveness beats purity here), then enqueues a
//! `DeviceToMirror/Led` packet so the cloud view catches up.  If the
//! mailbox is full the packet is dropped: the hardware has already
//! changed and the cloud stays stale until the next report — an
//! accepted eventual-consistency gap, not a fault.

use core::sync::atomic::{AtomicU32, Ordering};

use log::{info, warn};

use crate::drivers::led;
use crate::mailbox::Mailbox;
use crate::packet::{DeviceKind, EventPacket, Payload};

/// Edge must be this old before we trust it (contact bounce).
const DEBOUNCE_MS: u32 = 30;

/// Raw ISR timestamp (milliseconds since boot, truncated to u32).
/// Written by the ISR, read by the button task.
static BUTTON_ISR_TIMESTAMP: AtomicU32 = AtomicU32::new(0);

/// ISR handler — register this on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn button_isr_handler(now_ms: u32) {
    BUTTON_ISR_TIMESTAMP.store(now_ms, Ordering::Release);
}

/// Debounce state machine polled from the button task.
pub struct ButtonDriver {
    last_seen_ms: u32,
}

impl Default for ButtonDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonDriver {
    pub fn new() -> Self {
        Self { last_seen_ms: 0 }
    }

    /// Returns `true` exactly once per debounced press edge.
    /// `now_ms` is monotonic milliseconds since boot.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let isr_ms = BUTTON_ISR_TIMESTAMP.load(Ordering::Acquire);
        if isr_ms == 0 || isr_ms == self.last_seen_ms {
            return false;
        }
        if now_ms.wrapping_sub(isr_ms) < DEBOUNCE_MS {
            return false; // still inside the bounce window
        }
        self.last_seen_ms = isr_ms;
        true
    }
}

/// The button press action: invert the LED's last hardware state,
/// apply it right away, and report the change toward the cloud.
/// Returns the new LED state.
pub fn toggle_onboard_led(mailbox: &Mailbox) -> bool {
    let new_state = !led::is_on();
    led::write(new_state);
    info!("button: LED toggled -> {}", if new_state { "on" } else { "off" });

    let packet = EventPacket::device_to_mirror(DeviceKind::Led, Payload::OnOff(new_state));
    if mailbox.try_enqueue(packet.to_raw()).is_err() {
        warn!("button: mailbox full, cloud view stale until next report");
    }
    new_state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Direction;
    use std::time::Duration;

    // Tests share the ISR timestamp and LED state atomics; serialize them.
    static STATE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn reset_isr() {
        BUTTON_ISR_TIMESTAMP.store(0, Ordering::SeqCst);
    }

    #[test]
    fn no_press_no_event() {
        let _guard = STATE_LOCK.lock().unwrap();
        reset_isr();
        let mut btn = ButtonDriver::new();
        assert!(!btn.poll(100));
        assert!(!btn.poll(500));
    }

    #[test]
    fn press_fires_once_after_debounce() {
        let _guard = STATE_LOCK.lock().unwrap();
        reset_isr();
        let mut btn = ButtonDriver::new();
        button_isr_handler(1000);
        assert!(!btn.poll(1010), "inside bounce window");
        assert!(btn.poll(1040), "debounced press");
        assert!(!btn.poll(1100), "edge already consumed");
    }

    #[test]
    fn toggle_inverts_and_enqueues_device_to_mirror() {
        let _guard = STATE_LOCK.lock().unwrap();
        reset_isr();
        let mb = Mailbox::new();

        led::write(false);
        assert!(toggle_onboard_led(&mb));
        assert!(led::is_on());

        let pkt = mb
            .dequeue_with_timeout(Duration::from_millis(10))
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(pkt.direction, Direction::DeviceToMirror);
        assert_eq!(pkt.device, DeviceKind::Led);
        assert_eq!(pkt.payload, Payload::OnOff(true));

        // Second press inverts back.
        assert!(!toggle_onboard_led(&mb));
        assert!(!led::is_on());
    }

    #[test]
    fn full_mailbox_drops_report_but_still_toggles() {
        let _guard = STATE_LOCK.lock().unwrap();
        reset_isr();
        let mb = Mailbox::new();
        let filler = EventPacket::mirror_to_device(DeviceKind::Pump, Payload::OnOff(false)).to_raw();
        while mb.try_enqueue(filler).is_ok() {}

        led::write(false);
        assert!(toggle_onboard_led(&mb), "hardware toggles regardless");
        assert!(led::is_on());
        assert!(mb.dropped() >= 1);
    }
}
