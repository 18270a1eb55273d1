//! Error types for producer and controller plumbing
//!
//! The numeric core has no error paths; these cover the environment
//! (thread creation, queue capacity).

use crate::types::ProducerId;
use thiserror::Error;

/// Errors that can occur while running a race
#[derive(Error, Debug)]
pub enum RaceError {
    /// The OS refused to create a producer thread
    #[error("Failed to spawn {producer} producer thread: {source}")]
    SpawnFailed {
        producer: ProducerId,
        #[source]
        source: std::io::Error,
    },

    /// The controller service thread could not be created
    #[error("Failed to spawn race controller thread: {0}")]
    ServiceSpawnFailed(#[source] std::io::Error),

    /// The control event queue is full
    #[error("Control event queue is full")]
    ControlQueueFull,
}

/// Result type for race operations
pub type RaceResult<T> = Result<T, RaceError>;
