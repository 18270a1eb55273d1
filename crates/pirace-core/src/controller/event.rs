//! Lock-free control event queue (input adapter → controller)
//!
//! The input side pushes events without blocking; the controller reads them
//! at the start of each tick. The queue is bounded: when it is full the
//! event is handed back to the sender instead of being queued.
//!
//! ```ignore
//! let (mut tx, rx) = control_channel();
//! tx.send(ControlEvent::StartRace).ok();
//! let controller = RaceController::new(6, YieldPolicy::default(), rx);
//! ```

use crate::types::ProducerId;

/// Discrete control events produced by an input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Run a single producer on its own
    StartSingle(ProducerId),
    /// Run every producer at once
    StartRace,
    /// Tear every producer down and return to idle
    Reset,
    /// Change the digit target by `delta` (clamped; ignored during a run)
    AdjustTarget(i32),
    /// Stop the controller service
    Shutdown,
}

impl ControlEvent {
    /// Mode starts and resets; at most one of these is applied per tick
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            ControlEvent::StartSingle(_) | ControlEvent::StartRace | ControlEvent::Reset
        )
    }
}

/// Capacity of the control queue
///
/// Humans generate a handful of events per second; 64 absorbs key repeat
/// bursts with room to spare.
pub const CONTROL_QUEUE_CAPACITY: usize = 64;

/// Create a new control channel (sender/receiver pair)
pub fn control_channel() -> (ControlSender, ControlReceiver) {
    let (producer, consumer) = rtrb::RingBuffer::new(CONTROL_QUEUE_CAPACITY);
    (ControlSender { producer }, ControlReceiver { consumer })
}

/// Send side, owned by the input adapter
pub struct ControlSender {
    producer: rtrb::Producer<ControlEvent>,
}

impl ControlSender {
    /// Queue an event (non-blocking)
    ///
    /// Returns `Err(event)` if the queue is full.
    pub fn send(&mut self, event: ControlEvent) -> Result<(), ControlEvent> {
        self.producer.push(event).map_err(|e| match e {
            rtrb::PushError::Full(value) => value,
        })
    }

    /// Check if the queue has space for more events
    pub fn has_space(&self) -> bool {
        self.producer.slots() > 0
    }
}

/// Receive side, owned by the controller
pub struct ControlReceiver {
    consumer: rtrb::Consumer<ControlEvent>,
}

impl ControlReceiver {
    /// Look at the next event without consuming it
    pub fn peek(&self) -> Option<ControlEvent> {
        self.consumer.peek().ok().copied()
    }

    /// Consume the next event
    pub fn pop(&mut self) -> Option<ControlEvent> {
        self.consumer.pop().ok()
    }
}
