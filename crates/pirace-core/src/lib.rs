//! pirace core - concurrent series producers racing towards pi
//!
//! - [`series`]: the numeric algorithms (Leibniz, Euler/Basel, Chudnovsky)
//! - [`channel`]: latest-value-wins handoff from producer to controller
//! - [`producer`]: thread lifecycle around a series (start/pause/resume/destroy)
//! - [`meter`]: matching-digit convergence check
//! - [`controller`]: the race state machine and render model
//! - [`service`]: periodic tick loop running the controller on its own thread

pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod meter;
pub mod producer;
pub mod series;
pub mod service;
pub mod types;

pub use error::{RaceError, RaceResult};
pub use types::*;
