//! Yield cadence for producer loops

use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// How often a producer hands its core back to the scheduler
///
/// Every `every` iterations the producer either calls
/// [`std::thread::yield_now`] (`sleep_us == 0`) or sleeps for `sleep_us`
/// microseconds. This is a fairness knob, not a correctness requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldPolicy {
    /// Iterations between yields (values below 1 are treated as 1)
    pub every: u64,
    /// Sleep length in microseconds; 0 means a plain yield
    pub sleep_us: u64,
}

impl Default for YieldPolicy {
    fn default() -> Self {
        Self {
            every: 1000,
            sleep_us: 0,
        }
    }
}

impl YieldPolicy {
    /// Create a policy
    pub fn new(every: u64, sleep: Duration) -> Self {
        Self {
            every,
            sleep_us: sleep.as_micros() as u64,
        }
    }

    /// Iterations between yields, at least 1
    #[inline]
    pub fn interval(&self) -> u64 {
        self.every.max(1)
    }

    /// Sleep length applied at each yield point
    pub fn sleep(&self) -> Duration {
        Duration::from_micros(self.sleep_us)
    }

    /// Give the scheduler a chance to run something else
    pub fn yield_now(&self) {
        if self.sleep_us == 0 {
            thread::yield_now();
        } else {
            thread::sleep(self.sleep());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_never_zero() {
        let policy = YieldPolicy { every: 0, sleep_us: 0 };
        assert_eq!(policy.interval(), 1);
    }

    #[test]
    fn test_sleep_roundtrip() {
        let policy = YieldPolicy::new(10, Duration::from_millis(2));
        assert_eq!(policy.sleep_us, 2000);
        assert_eq!(policy.sleep(), Duration::from_millis(2));
    }
}
