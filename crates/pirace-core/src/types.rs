//! Common types for pirace
//!
//! Producer identifiers, the estimate record each producer emits, and the
//! process-wide reference value every estimate is measured against.

use std::time::Duration;

/// Reference value of pi all estimates are compared to
pub const REFERENCE_PI: f64 = std::f64::consts::PI;

/// Number of producer slots (one per series algorithm)
pub const NUM_PRODUCERS: usize = 3;

/// Digit target range accepted by the controller
pub const MIN_DIGIT_TARGET: u32 = 1;
pub const MAX_DIGIT_TARGET: u32 = 10;
pub const DEFAULT_DIGIT_TARGET: u32 = 6;

/// Series algorithm identifiers
///
/// The discriminant doubles as the producer slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ProducerId {
    Leibniz = 0,
    Euler = 1,
    Chudnovsky = 2,
}

impl ProducerId {
    /// All producers in slot order
    pub const ALL: [ProducerId; NUM_PRODUCERS] =
        [ProducerId::Leibniz, ProducerId::Euler, ProducerId::Chudnovsky];

    /// Slot index of this producer
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ProducerId::Leibniz => "Leibniz",
            ProducerId::Euler => "Euler",
            ProducerId::Chudnovsky => "Chudnovsky",
        }
    }
}

impl std::fmt::Display for ProducerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One emission of a producer
///
/// Immutable once created and superseded by the next emission from the same
/// producer. `Estimate::default()` is the zeroed value shown after a reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Estimate {
    /// Current approximation of pi
    pub value: f64,
    /// Running time of the producer (paused intervals excluded)
    pub elapsed: Duration,
    /// Number of series terms folded into `value`
    pub step_count: u64,
}

impl Estimate {
    /// Create a new estimate
    pub fn new(value: f64, elapsed: Duration, step_count: u64) -> Self {
        Self {
            value,
            elapsed,
            step_count,
        }
    }

    /// True for the zeroed estimate (nothing produced yet)
    pub fn is_zero(&self) -> bool {
        self.step_count == 0 && self.value == 0.0 && self.elapsed.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_index_roundtrip() {
        for (i, id) in ProducerId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(ProducerId::ALL[id.index()], *id);
        }
    }

    #[test]
    fn test_default_estimate_is_zero() {
        assert!(Estimate::default().is_zero());
        assert!(!Estimate::new(3.0, Duration::ZERO, 1).is_zero());
    }
}
