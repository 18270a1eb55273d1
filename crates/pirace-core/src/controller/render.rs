//! Render model handed to display adapters once per tick

use super::state::{ProducerState, RaceMode, RaceState};
use crate::types::{ProducerId, NUM_PRODUCERS};
use std::time::Duration;

/// Snapshot of one producer slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProducerView {
    pub id: ProducerId,
    pub label: &'static str,
    pub estimate: f64,
    pub elapsed: Duration,
    pub step_count: u64,
    pub matching_digits: u32,
    pub digit_target: u32,
    pub state: ProducerState,
    /// Running indicator (LED); cleared on convergence and reset
    pub indicator: bool,
}

/// Everything a display needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub state: RaceState,
    pub mode: RaceMode,
    pub digit_target: u32,
    /// Every producer in the current mode has converged
    pub complete: bool,
    pub producers: [ProducerView; NUM_PRODUCERS],
}

impl RenderModel {
    /// View of a single producer
    pub fn producer(&self, id: ProducerId) -> &ProducerView {
        &self.producers[id.index()]
    }

    /// Indicator outputs in slot order
    pub fn indicators(&self) -> [bool; NUM_PRODUCERS] {
        std::array::from_fn(|i| self.producers[i].indicator)
    }
}

/// Renders the controller's output
///
/// Layout, fonts and highlighting are entirely up to the implementation.
pub trait DisplayAdapter: Send {
    fn render(&mut self, model: &RenderModel);
}
