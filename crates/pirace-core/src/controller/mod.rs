//! Race controller - producer lifecycle and convergence tracking
//!
//! The controller owns every producer slot and is the only place that
//! mutates the digit target or the race mode. Each [`tick`](RaceController::tick):
//!
//! 1. promotes an armed mode to running (starting or resuming its producers)
//! 2. reads pending control events, applying at most one mode start or reset
//! 3. drains each running producer's latest estimate and measures it
//! 4. pauses producers that reached the digit target
//! 5. returns a [`RenderModel`] for the display
//!
//! ```text
//!        StartSingle / StartRace          tick
//!  Idle ─────────────────────────► Armed ──────► Running
//!   ▲                                │              │
//!   │            Reset               ▼     Reset    │
//!   └──────────── Resetting ◄────────┴──────────────┘
//! ```
//!
//! Conflicting or out-of-range requests are ignored, never reported as
//! errors. When every producer in the mode has converged the state stays
//! `Running`; the render model flags the run as complete and a reset is
//! required before the next one.

mod event;
mod render;
mod state;

pub use event::{
    control_channel, ControlEvent, ControlReceiver, ControlSender, CONTROL_QUEUE_CAPACITY,
};
pub use render::{DisplayAdapter, ProducerView, RenderModel};
pub use state::{ProducerState, RaceMode, RaceState};

use crate::channel::{latest_value_channel, LatestReceiver};
use crate::config::RaceConfig;
use crate::meter::matching_digits;
use crate::producer::{ProducerHandle, YieldPolicy};
use crate::types::{
    Estimate, ProducerId, MAX_DIGIT_TARGET, MIN_DIGIT_TARGET, NUM_PRODUCERS, REFERENCE_PI,
};

/// One producer slot: thread handle, channel end and last observation
struct ProducerSlot {
    id: ProducerId,
    handle: Option<ProducerHandle>,
    receiver: LatestReceiver<Estimate>,
    estimate: Estimate,
    matching: u32,
    state: ProducerState,
}

impl ProducerSlot {
    fn new(id: ProducerId, policy: YieldPolicy) -> Self {
        let (sender, receiver) = latest_value_channel();
        Self {
            id,
            handle: Some(ProducerHandle::new(id, sender, policy)),
            receiver,
            estimate: Estimate::default(),
            matching: 0,
            state: ProducerState::Idle,
        }
    }

    fn start(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        match handle.start() {
            Ok(()) => self.state = ProducerState::Running,
            Err(e) => log::error!("{}", e),
        }
    }

    /// Destroy the thread and build a fresh paused handle
    ///
    /// The sender comes back from the joined thread and is reused; if it was
    /// lost a new channel replaces the old one.
    fn rebuild(&mut self, policy: YieldPolicy) {
        self.state = ProducerState::Reset;

        let sender = match self.handle.take().and_then(ProducerHandle::destroy) {
            Some(sender) => {
                if self.receiver.purge() {
                    log::trace!("{}: purged unread estimate", self.id);
                }
                sender
            }
            None => {
                let (sender, receiver) = latest_value_channel();
                self.receiver = receiver;
                sender
            }
        };

        self.handle = Some(ProducerHandle::new(self.id, sender, policy));
        self.estimate = Estimate::default();
        self.matching = 0;
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
        self.receiver.purge();
    }

    fn view(&self, digit_target: u32) -> ProducerView {
        ProducerView {
            id: self.id,
            label: self.id.name(),
            estimate: self.estimate.value,
            elapsed: self.estimate.elapsed,
            step_count: self.estimate.step_count,
            matching_digits: self.matching,
            digit_target,
            state: self.state,
            indicator: self.state == ProducerState::Running,
        }
    }
}

/// The race state machine
pub struct RaceController {
    state: RaceState,
    digit_target: u32,
    reference: f64,
    policy: YieldPolicy,
    slots: [ProducerSlot; NUM_PRODUCERS],
    events: ControlReceiver,
    shutdown_requested: bool,
}

impl RaceController {
    /// Create an idle controller with paused, unstarted producers
    pub fn new(digit_target: u32, policy: YieldPolicy, events: ControlReceiver) -> Self {
        Self {
            state: RaceState::Idle,
            digit_target: digit_target.clamp(MIN_DIGIT_TARGET, MAX_DIGIT_TARGET),
            reference: REFERENCE_PI,
            policy,
            slots: std::array::from_fn(|i| ProducerSlot::new(ProducerId::ALL[i], policy)),
            events,
            shutdown_requested: false,
        }
    }

    /// Create a controller from the loaded configuration
    pub fn from_config(config: &RaceConfig, events: ControlReceiver) -> Self {
        Self::new(config.digit_target, config.yield_policy, events)
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    pub fn digit_target(&self) -> u32 {
        self.digit_target
    }

    pub fn producer_state(&self, id: ProducerId) -> ProducerState {
        self.slots[id.index()].state
    }

    /// Last estimate observed for a producer
    pub fn estimate(&self, id: ProducerId) -> Estimate {
        self.slots[id.index()].estimate
    }

    pub fn matching_digits(&self, id: ProducerId) -> u32 {
        self.slots[id.index()].matching
    }

    /// Indicator outputs in slot order (true while a producer is running)
    pub fn indicators(&self) -> [bool; NUM_PRODUCERS] {
        std::array::from_fn(|i| self.slots[i].state == ProducerState::Running)
    }

    /// Every producer named by the running mode has converged
    pub fn is_complete(&self) -> bool {
        match self.state {
            RaceState::Running(mode) => {
                mode != RaceMode::None
                    && mode
                        .producers()
                        .all(|id| self.producer_state(id) == ProducerState::Converged)
            }
            _ => false,
        }
    }

    /// A `Shutdown` event has been received
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Run one control-loop pass
    pub fn tick(&mut self) -> RenderModel {
        self.promote_armed();
        self.process_events();
        self.drain();
        self.render()
    }

    /// Compose the render model from the current observations
    pub fn render(&self) -> RenderModel {
        RenderModel {
            state: self.state,
            mode: self.state.mode(),
            digit_target: self.digit_target,
            complete: self.is_complete(),
            producers: std::array::from_fn(|i| self.slots[i].view(self.digit_target)),
        }
    }

    /// Destroy every producer thread
    pub fn shutdown(mut self) {
        log::info!("Race controller shutting down");
        for slot in &mut self.slots {
            slot.stop();
        }
    }

    fn promote_armed(&mut self) {
        let RaceState::Armed(mode) = self.state else {
            return;
        };
        for id in mode.producers() {
            self.slots[id.index()].start();
        }
        self.state = RaceState::Running(mode);
        log::info!("Race running: {:?}", mode);
    }

    fn process_events(&mut self) {
        let mut lifecycle_applied = false;

        while let Some(event) = self.events.peek() {
            // Later mode starts / resets wait for the next tick
            if event.is_lifecycle() && lifecycle_applied {
                break;
            }
            self.events.pop();

            match event {
                ControlEvent::StartSingle(id) => {
                    lifecycle_applied = true;
                    self.start_single(id);
                }
                ControlEvent::StartRace => {
                    lifecycle_applied = true;
                    self.start_race();
                }
                ControlEvent::Reset => {
                    lifecycle_applied = true;
                    self.reset();
                }
                ControlEvent::AdjustTarget(delta) => self.adjust_target(delta),
                ControlEvent::Shutdown => {
                    log::debug!("Shutdown requested");
                    self.shutdown_requested = true;
                }
            }
        }
    }

    fn start_single(&mut self, id: ProducerId) {
        if self.state != RaceState::Idle || self.producer_state(id) != ProducerState::Idle {
            log::debug!("Ignoring start of {} in state {:?}", id, self.state);
            return;
        }
        self.state = RaceState::Armed(RaceMode::Single(id));
        log::info!("Armed single run: {}", id);
    }

    fn start_race(&mut self) {
        if self.state != RaceState::Idle {
            log::debug!("Ignoring race start in state {:?}", self.state);
            return;
        }
        self.state = RaceState::Armed(RaceMode::Race);
        log::info!("Armed race");
    }

    fn reset(&mut self) {
        if self.state == RaceState::Idle {
            log::debug!("Ignoring reset while idle");
            return;
        }

        self.state = RaceState::Resetting;
        log::info!("Resetting producers");
        for slot in &mut self.slots {
            slot.rebuild(self.policy);
        }

        for slot in &mut self.slots {
            slot.state = ProducerState::Idle;
        }
        self.state = RaceState::Idle;
        log::info!("Reset complete");
    }

    fn adjust_target(&mut self, delta: i32) {
        let busy = self.state != RaceState::Idle
            || self.slots.iter().any(|s| s.state != ProducerState::Idle);
        if busy {
            log::debug!("Ignoring digit target change during a run");
            return;
        }

        let target = (self.digit_target as i64 + delta as i64)
            .clamp(MIN_DIGIT_TARGET as i64, MAX_DIGIT_TARGET as i64) as u32;
        if target != self.digit_target {
            log::info!("Digit target {} -> {}", self.digit_target, target);
            self.digit_target = target;
        }
    }

    fn drain(&mut self) {
        let target = self.digit_target;
        let reference = self.reference;

        for slot in &mut self.slots {
            // Converged slots keep the estimate that met the target
            if slot.state != ProducerState::Running {
                continue;
            }

            if let Some(estimate) = slot.receiver.try_take() {
                slot.estimate = estimate;
                slot.matching = matching_digits(estimate.value, reference);
                log::trace!(
                    "{}: {} ({} digits, step {})",
                    slot.id,
                    estimate.value,
                    slot.matching,
                    estimate.step_count
                );
            }

            if slot.matching >= target {
                slot.state = ProducerState::Converged;
                if let Some(handle) = &slot.handle {
                    handle.pause();
                }
                log::info!(
                    "{} converged to {} digits after {} steps in {:.3}s",
                    slot.id,
                    slot.matching,
                    slot.estimate.step_count,
                    slot.estimate.elapsed.as_secs_f64()
                );
            }
        }
    }
}
