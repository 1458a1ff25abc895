//! Bounded FIFO mailbox — the only synchronisation point between
//! producers and the dispatcher.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button press │────▶│              │     │              │
//! │ Sample timer │────▶│   Mailbox    │────▶│  Dispatcher  │
//! │ Cloud write  │────▶│  (bounded)   │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Producers run in latency-sensitive contexts (ISR-adjacent callbacks,
//! timer threads, the cloud stack's callback thread) and must never
//! block: [`Mailbox::try_enqueue`] fails immediately when the queue is
//! full and the incoming packet is dropped (drop-newest).  The single
//! consumer waits with a bounded timeout via
//! [`Mailbox::dequeue_with_timeout`].
//!
//! Backed by an `embassy-sync` MPMC channel so the same code runs on
//! ESP-IDF tasks and host threads without heap allocation.

use core::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::packet::RawPacket;

/// Default mailbox capacity.  Matches the event-queue depth the board
/// has shipped with; overflow beyond this is an accepted data-loss path.
pub const MAILBOX_CAP: usize = 50;

/// Poll granularity for the consumer's bounded wait.
const DEQUEUE_POLL: Duration = Duration::from_millis(1);

/// Error returned when the mailbox is at capacity.  Carries the packet
/// back so a caller in a non-realtime context could decide to retry;
/// the firmware's producers never do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MailboxFull(pub RawPacket);

/// Bounded multi-producer / single-consumer packet queue.
pub struct Mailbox {
    channel: Channel<CriticalSectionRawMutex, RawPacket, MAILBOX_CAP>,
    dropped: AtomicU32,
}

/// The shared event mailbox.  Producers reference this static from
/// their own contexts; the dispatcher is its only consumer.
pub static EVENT_MAILBOX: Mailbox = Mailbox::new();

impl Mailbox {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Non-blocking enqueue.  On a full mailbox the packet is rejected
    /// (drop-newest), the drop counter is bumped, and the caller gets
    /// the packet back.  Never blocks — safe from timer and
    /// interrupt-adjacent contexts.
    pub fn try_enqueue(&self, packet: RawPacket) -> Result<(), MailboxFull> {
        match self.channel.try_send(packet) {
            Ok(()) => Ok(()),
            Err(embassy_sync::channel::TrySendError::Full(p)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Err(MailboxFull(p))
            }
        }
    }

    /// Bounded wait for the next packet.  Polls the channel until the
    /// timeout elapses; returns `None` on an empty-queue timeout.
    /// Single-consumer discipline: only the dispatcher calls this.
    pub fn dequeue_with_timeout(&self, timeout: Duration) -> Option<RawPacket> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(packet) = self.channel.try_receive() {
                return Some(packet);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(DEQUEUE_POLL);
        }
    }

    /// Current queue depth.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Packets rejected because the mailbox was full since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}
