//! Leibniz series - π/4 = 1 - 1/3 + 1/5 - 1/7 + ...

use super::Series;

/// Alternating Leibniz series
///
/// Converges slowly (error ~ 1/n) and the estimate overshoots and
/// undershoots pi on alternate terms.
#[derive(Debug, Default)]
pub struct LeibnizSeries {
    sum: f64,
    k: u64,
}

impl LeibnizSeries {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Series for LeibnizSeries {
    fn advance(&mut self) -> Option<f64> {
        let term = 1.0 / (2.0 * self.k as f64 + 1.0);
        if self.k % 2 == 0 {
            self.sum += term;
        } else {
            self.sum -= term;
        }
        self.k += 1;
        Some(4.0 * self.sum)
    }

    fn terms(&self) -> u64 {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::{matching_digits, MATCH_PRECISION};
    use std::f64::consts::PI;

    /// Leading fractional digits that agree when both values are truncated
    fn positional_agreement(value: f64) -> u32 {
        let value = format!("{:.20}", value);
        let reference = format!("{:.20}", PI);
        let (Some((_, a)), Some((_, b))) = (value.split_once('.'), reference.split_once('.'))
        else {
            return 0;
        };
        a.bytes()
            .zip(b.bytes())
            .take(MATCH_PRECISION)
            .take_while(|(x, y)| x == y)
            .count() as u32
    }

    #[test]
    fn test_first_terms() {
        let mut series = LeibnizSeries::new();
        assert_eq!(series.advance(), Some(4.0));
        let second = series.advance().unwrap();
        assert!((second - (4.0 - 4.0 / 3.0)).abs() < 1e-12);
        assert_eq!(series.terms(), 2);
    }

    #[test]
    fn test_alternates_around_pi() {
        let mut series = LeibnizSeries::new();
        for k in 0..100 {
            let value = series.advance().unwrap();
            if k % 2 == 0 {
                assert!(value > PI);
            } else {
                assert!(value < PI);
            }
        }
    }

    #[test]
    fn test_reaches_four_digits() {
        let mut series = LeibnizSeries::new();
        let converged = (0..1_000_000)
            .filter_map(|_| series.advance())
            .any(|v| matching_digits(v, PI) >= 4);
        assert!(converged);
    }

    #[test]
    fn test_never_overreports_positional_agreement() {
        let mut series = LeibnizSeries::new();
        for step in 1..=1_500_000u64 {
            let value = series.advance().unwrap();
            let reported = matching_digits(value, PI);
            let actual = positional_agreement(value);
            assert!(
                reported <= actual,
                "step {step}: {value} reported {reported} digits, only {actual} agree"
            );
        }
    }
}
