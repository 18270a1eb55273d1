//! Chudnovsky series with binary-splitting accumulation
//!
//! ```text
//!   1/π = 12 Σ (-1)^k (6k)! (13591409 + 545140134k) / ((3k)! (k!)³ 640320^(3k+3/2))
//! ```
//!
//! Each step merges the single-term range `[k, k+1)` into the accumulated
//! `[0, k)` range using the usual P/Q/T recurrences, then evaluates
//! `π = 426880 · √10005 · Q / T`.
//!
//! Every term adds roughly 14 decimal digits, so `f64` is exhausted after a
//! couple of terms. P and Q grow by ~10¹⁶ per term and would overflow after
//! about twenty, so the series stops at the precision cap computed in
//! [`precision_cap`].

use super::Series;

/// 640320³ / 24
const C3_OVER_24: f64 = 10_939_058_860_032_000.0;
const LINEAR_A: f64 = 13_591_409.0;
const LINEAR_B: f64 = 545_140_134.0;

/// Binary-splitting state for the Chudnovsky series
#[derive(Debug)]
pub struct ChudnovskySeries {
    p: f64,
    q: f64,
    t: f64,
    k: u64,
    cap: u64,
}

impl ChudnovskySeries {
    pub fn new() -> Self {
        Self {
            p: 1.0,
            q: 1.0,
            t: 0.0,
            k: 0,
            cap: precision_cap(),
        }
    }

    /// Number of terms this series will fold in before saturating
    pub fn cap(&self) -> u64 {
        self.cap
    }
}

impl Default for ChudnovskySeries {
    fn default() -> Self {
        Self::new()
    }
}

impl Series for ChudnovskySeries {
    fn advance(&mut self) -> Option<f64> {
        if self.k >= self.cap {
            return None;
        }

        let k = self.k;
        let (p_k, q_k) = term_factors(k);
        let t_k = alternating(k) * p_k * linear(k);

        // Merge [0, k) with [k, k + 1)
        self.t = self.t * q_k + self.p * t_k;
        self.p *= p_k;
        self.q *= q_k;
        self.k += 1;

        Some(426_880.0 * 10_005f64.sqrt() * self.q / self.t)
    }

    fn terms(&self) -> u64 {
        self.k
    }
}

/// P(k, k+1) and Q(k, k+1) for a single term
fn term_factors(k: u64) -> (f64, f64) {
    if k == 0 {
        return (1.0, 1.0);
    }
    let k = k as f64;
    let p = (6.0 * k - 5.0) * (2.0 * k - 1.0) * (6.0 * k - 1.0);
    let q = k * k * k * C3_OVER_24;
    (p, q)
}

fn linear(k: u64) -> f64 {
    LINEAR_A + LINEAR_B * k as f64
}

fn alternating(k: u64) -> f64 {
    if k % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Number of terms that still change an `f64` result
///
/// Walks the term magnitudes `a_k · (A + Bk)` with `a_k = a_{k-1} · P/Q` and
/// stops at the first term whose magnitude relative to the running sum
/// falls below `f64::EPSILON`.
pub fn precision_cap() -> u64 {
    let mut sum = linear(0);
    let mut a = 1.0;
    let mut k = 1;
    loop {
        let (p, q) = term_factors(k);
        a *= p / q;
        let term = a * linear(k);
        if term < f64::EPSILON * sum.abs() {
            return k;
        }
        sum += alternating(k) * term;
        k += 1;
    }
}
