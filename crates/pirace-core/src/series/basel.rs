//! Euler's solution to the Basel problem - π²/6 = Σ 1/n²

use super::Series;

/// Basel series, estimate = sqrt(6 · Σ 1/n²)
///
/// Every term is positive, so the estimate approaches pi monotonically
/// from below.
#[derive(Debug, Default)]
pub struct BaselSeries {
    sum: f64,
    n: u64,
}

impl BaselSeries {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Series for BaselSeries {
    fn advance(&mut self) -> Option<f64> {
        self.n += 1;
        let n = self.n as f64;
        self.sum += 1.0 / (n * n);
        Some((6.0 * self.sum).sqrt())
    }

    fn terms(&self) -> u64 {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::matching_digits;
    use std::f64::consts::PI;

    #[test]
    fn test_first_term() {
        let mut series = BaselSeries::new();
        let first = series.advance().unwrap();
        assert!((first - 6.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(series.terms(), 1);
    }

    #[test]
    fn test_monotonic_from_below() {
        let mut series = BaselSeries::new();
        let mut last = 0.0;
        for _ in 0..10_000 {
            let value = series.advance().unwrap();
            assert!(value > last);
            assert!(value < PI);
            last = value;
        }
    }

    #[test]
    fn test_matching_digits_never_decrease() {
        let mut series = BaselSeries::new();
        let mut best = 0;
        for _ in 0..200_000 {
            let digits = matching_digits(series.advance().unwrap(), PI);
            assert!(digits >= best, "dropped from {best} to {digits}");
            best = digits;
        }
        assert!(best >= 4);
    }
}
