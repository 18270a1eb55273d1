//! Latest-value-wins handoff between a producer thread and the controller
//!
//! Unlike the bounded command queue used for control events, this channel
//! holds a single slot: a publish replaces whatever the consumer has not yet
//! taken. Producers never block and never see backpressure, and the consumer
//! always observes the newest value as of its last take.
//!
//! ```text
//! producer thread                 controller thread
//!   publish(e1) ─┐
//!   publish(e2) ─┼─► [ slot: e3 ] ─► try_take() == Some(e3)
//!   publish(e3) ─┘                   try_take() == None
//! ```
//!
//! Both endpoints are deliberately not `Clone`: exactly one publisher and one
//! consumer exist per channel.

use crossbeam::atomic::AtomicCell;
use std::sync::Arc;

/// Create a new latest-value channel (publisher/receiver pair)
pub fn latest_value_channel<T>() -> (LatestSender<T>, LatestReceiver<T>) {
    let slot = Arc::new(AtomicCell::new(None));
    (
        LatestSender {
            slot: Arc::clone(&slot),
        },
        LatestReceiver { slot },
    )
}

/// Publishing side, owned by the producer thread
pub struct LatestSender<T> {
    slot: Arc<AtomicCell<Option<T>>>,
}

impl<T> LatestSender<T> {
    /// Publish a value, replacing any unread one (never blocks)
    #[inline]
    pub fn publish(&self, value: T) {
        // The displaced value (if any) is dropped here on the producer side
        drop(self.slot.swap(Some(value)));
    }
}

/// Consuming side, owned by the controller
pub struct LatestReceiver<T> {
    slot: Arc<AtomicCell<Option<T>>>,
}

impl<T> LatestReceiver<T> {
    /// Take the most recent unread value, if any (never blocks)
    #[inline]
    pub fn try_take(&self) -> Option<T> {
        self.slot.take()
    }

    /// Discard any pending value
    ///
    /// Returns true if a value was discarded.
    pub fn purge(&self) -> bool {
        self.slot.take().is_some()
    }
}
