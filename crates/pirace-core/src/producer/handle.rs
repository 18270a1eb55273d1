//! Producer thread handle and run loop

use super::YieldPolicy;
use crate::channel::LatestSender;
use crate::error::{RaceError, RaceResult};
use crate::series::{series_for, Series};
use crate::types::{Estimate, ProducerId};

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long a saturated producer sleeps between state checks
const SATURATED_IDLE: Duration = Duration::from_millis(10);

/// Lifecycle requested by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Paused,
    Running,
    Destroyed,
}

/// Lock-free run state shared with the producer thread
///
/// Written only by the owning handle, read by the thread once per iteration.
struct ProducerControl {
    state: AtomicU8,
}

impl ProducerControl {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(0),
        }
    }

    #[inline]
    fn state(&self) -> RunState {
        match self.state.load(Ordering::Acquire) {
            1 => RunState::Running,
            2 => RunState::Destroyed,
            _ => RunState::Paused,
        }
    }

    #[inline]
    fn set(&self, state: RunState) {
        let value = match state {
            RunState::Paused => 0,
            RunState::Running => 1,
            RunState::Destroyed => 2,
        };
        self.state.store(value, Ordering::Release);
    }
}

/// Where the producer's channel sender currently lives
enum Worker {
    /// Not started yet: the handle still holds the sender
    Pending(LatestSender<Estimate>),
    /// Thread running; joining it returns the sender
    Spawned(JoinHandle<LatestSender<Estimate>>),
    /// Sender lost (spawn failure or producer panic) or already torn down
    Gone,
}

/// Handle to one producer slot's thread
///
/// Created paused with no thread. The first [`start`](Self::start) spawns
/// the thread with a fresh accumulator; [`destroy`](Self::destroy) tears it
/// down and hands the channel sender back for the next handle.
pub struct ProducerHandle {
    id: ProducerId,
    control: Arc<ProducerControl>,
    worker: Worker,
    policy: YieldPolicy,
}

impl ProducerHandle {
    /// Create a paused handle publishing into `sender`
    pub fn new(id: ProducerId, sender: LatestSender<Estimate>, policy: YieldPolicy) -> Self {
        Self {
            id,
            control: Arc::new(ProducerControl::new()),
            worker: Worker::Pending(sender),
            policy,
        }
    }

    /// Whether the thread has been spawned
    pub fn is_started(&self) -> bool {
        matches!(self.worker, Worker::Spawned(_))
    }

    /// Whether the producer is currently iterating
    pub fn is_running(&self) -> bool {
        self.is_started() && self.control.state() == RunState::Running
    }

    /// Start the producer, spawning its thread on first use
    ///
    /// On an already started handle this is the same as [`resume`](Self::resume).
    /// If the thread cannot be spawned the sender is lost and the handle
    /// stays stopped.
    pub fn start(&mut self) -> RaceResult<()> {
        let sender = match std::mem::replace(&mut self.worker, Worker::Gone) {
            Worker::Pending(sender) => sender,
            other => {
                self.worker = other;
                self.resume();
                return Ok(());
            }
        };

        self.control.set(RunState::Running);

        let id = self.id;
        let control = Arc::clone(&self.control);
        let policy = self.policy;
        let spawned = thread::Builder::new()
            .name(format!("producer-{}", id.name().to_lowercase()))
            .spawn(move || run_producer(id, series_for(id), sender, control, policy));

        match spawned {
            Ok(handle) => {
                log::info!("{} producer started", id);
                self.worker = Worker::Spawned(handle);
                Ok(())
            }
            Err(source) => {
                self.control.set(RunState::Paused);
                Err(RaceError::SpawnFailed { producer: id, source })
            }
        }
    }

    /// Suspend iteration, keeping the accumulator
    pub fn pause(&self) {
        if let Worker::Spawned(_) = self.worker {
            self.control.set(RunState::Paused);
            log::debug!("{} producer paused", self.id);
        }
    }

    /// Continue a paused producer
    pub fn resume(&self) {
        if let Worker::Spawned(handle) = &self.worker {
            self.control.set(RunState::Running);
            handle.thread().unpark();
            log::debug!("{} producer resumed", self.id);
        }
    }

    /// Tear the producer down and return its channel sender
    ///
    /// Blocks until the thread has exited. Returns `None` if the sender was
    /// lost to a failed spawn or a panicking producer.
    pub fn destroy(mut self) -> Option<LatestSender<Estimate>> {
        self.teardown()
    }

    fn teardown(&mut self) -> Option<LatestSender<Estimate>> {
        match std::mem::replace(&mut self.worker, Worker::Gone) {
            Worker::Pending(sender) => Some(sender),
            Worker::Spawned(handle) => {
                self.control.set(RunState::Destroyed);
                handle.thread().unpark();
                match handle.join() {
                    Ok(sender) => {
                        log::debug!("{} producer destroyed", self.id);
                        Some(sender)
                    }
                    Err(_) => {
                        log::error!("{} producer thread panicked", self.id);
                        None
                    }
                }
            }
            Worker::Gone => None,
        }
    }
}

impl Drop for ProducerHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Running time with paused intervals excluded
#[derive(Default)]
struct RunClock {
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl RunClock {
    #[inline]
    fn resume(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(at) = self.resumed_at.take() {
            self.accumulated += at.elapsed();
        }
    }

    #[inline]
    fn elapsed(&self) -> Duration {
        self.accumulated + self.resumed_at.map(|at| at.elapsed()).unwrap_or_default()
    }
}

/// Producer thread body
///
/// Returns the sender so the next handle for this slot can reuse the channel.
fn run_producer(
    id: ProducerId,
    mut series: Box<dyn Series>,
    sender: LatestSender<Estimate>,
    control: Arc<ProducerControl>,
    policy: YieldPolicy,
) -> LatestSender<Estimate> {
    log::debug!("{} producer thread running", id);

    let interval = policy.interval();
    let mut clock = RunClock::default();
    let mut since_yield = 0u64;
    let mut saturated = false;

    loop {
        match control.state() {
            RunState::Destroyed => break,
            RunState::Paused => {
                clock.pause();
                thread::park();
                continue;
            }
            RunState::Running => clock.resume(),
        }

        if saturated {
            thread::park_timeout(SATURATED_IDLE);
            continue;
        }

        match series.advance() {
            Some(value) => {
                sender.publish(Estimate::new(value, clock.elapsed(), series.terms()));
            }
            None => {
                log::debug!("{} saturated after {} terms", id, series.terms());
                saturated = true;
                continue;
            }
        }

        since_yield += 1;
        if since_yield >= interval {
            since_yield = 0;
            policy.yield_now();
        }
    }

    log::debug!("{} producer thread exiting", id);
    sender
}
