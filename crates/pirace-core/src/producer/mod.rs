//! Producers - a series running on its own thread
//!
//! A [`ProducerHandle`] owns one producer slot's thread and exposes the
//! lifecycle the controller drives:
//!
//! ```text
//!  new ──start──► Running ──pause──► Paused ──resume──► Running
//!   │                │                  │
//!   └────────────────┴──────destroy─────┴──► (thread joined, sender returned)
//! ```
//!
//! The series accumulator lives on the producer thread's stack and is
//! dropped when the thread exits, so a destroyed handle cannot leak state
//! into the next run. Pausing parks the thread without touching its state.

mod handle;
mod policy;

pub use handle::ProducerHandle;
pub use policy::YieldPolicy;
