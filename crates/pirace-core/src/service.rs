//! RaceService - runs the controller's tick loop on a dedicated thread
//!
//! ```text
//! ┌───────────────┐  ControlEvent   ┌──────────────────┐  RenderModel  ┌─────────┐
//! │ Input adapter │ ──────────────► │  RaceController  │ ────────────► │ Display │
//! └───────────────┘   (rtrb SPSC)   │ (race-controller │               └─────────┘
//!                                   │      thread)     │
//!                                   └──────────────────┘
//!                                       ▲  ▲  ▲  latest-value slots
//!                                  producer threads
//! ```
//!
//! Each pass ticks the controller, hands the render model to the display,
//! then sleeps for the rest of the period. A `Shutdown` event ends the loop
//! and destroys every producer.

use crate::controller::{DisplayAdapter, RaceController};
use crate::error::{RaceError, RaceResult};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Controller service entry point
pub struct RaceService {
    controller: RaceController,
    display: Box<dyn DisplayAdapter>,
    period: Duration,
}

impl RaceService {
    /// Spawn the controller loop in a background thread
    pub fn spawn(
        controller: RaceController,
        display: Box<dyn DisplayAdapter>,
        period: Duration,
    ) -> RaceResult<RaceServiceHandle> {
        let service = RaceService {
            controller,
            display,
            period,
        };

        let handle = thread::Builder::new()
            .name("race-controller".into())
            .spawn(move || service.run())
            .map_err(RaceError::ServiceSpawnFailed)?;

        Ok(RaceServiceHandle {
            thread_handle: Some(handle),
        })
    }

    /// Main service loop
    fn run(mut self) {
        log::info!("RaceService started (period {:?})", self.period);

        loop {
            let started = Instant::now();

            let model = self.controller.tick();
            self.display.render(&model);

            if self.controller.shutdown_requested() {
                break;
            }

            if let Some(rest) = self.period.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }

        self.controller.shutdown();
        log::info!("RaceService stopped");
    }
}

/// Handle to the running controller service
pub struct RaceServiceHandle {
    thread_handle: Option<JoinHandle<()>>,
}

impl RaceServiceHandle {
    /// Check if the service is still running
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Wait for the service to exit (after a `Shutdown` event)
    pub fn join(mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("RaceService thread panicked");
            }
        }
    }
}
