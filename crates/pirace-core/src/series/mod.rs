//! Series algorithms - the numeric half of a producer
//!
//! Every algorithm implements [`Series`]: one call to [`Series::advance`]
//! folds exactly one more term into the accumulator and returns the new
//! approximation of pi. Thread lifecycle, timing and publishing live in
//! [`crate::producer`] and are shared by all algorithms.
//!
//! Adding an algorithm means one new [`ProducerId`] variant and one
//! `Series` impl wired into [`series_for`].

mod basel;
mod chudnovsky;
mod leibniz;

pub use basel::BaselSeries;
pub use chudnovsky::ChudnovskySeries;
pub use leibniz::LeibnizSeries;

use crate::types::ProducerId;

/// An unbounded series converging to pi
///
/// Implementations own all of their accumulator state. Dropping the value
/// is the only way to reset it.
pub trait Series: Send {
    /// Fold one more term into the accumulator
    ///
    /// Returns the new estimate, or `None` once further terms can no longer
    /// change the representable result. After the first `None` every later
    /// call also returns `None`.
    fn advance(&mut self) -> Option<f64>;

    /// Number of terms folded in so far
    fn terms(&self) -> u64;
}

/// Build a fresh accumulator for the given producer
pub fn series_for(id: ProducerId) -> Box<dyn Series> {
    match id {
        ProducerId::Leibniz => Box::new(LeibnizSeries::new()),
        ProducerId::Euler => Box::new(BaselSeries::new()),
        ProducerId::Chudnovsky => Box::new(ChudnovskySeries::new()),
    }
}
