//! Convergence meter - counts correct leading fractional digits
//!
//! Both values are rendered with the same fixed number of fractional digits
//! and compared character by character after their decimal points. The
//! count stops at the first mismatch, so a digit that coincidentally matches
//! again further right is never counted.
//!
//! Values are formatted with more digits than are counted. Rounding at the
//! tenth digit would let a run of nines carry into an earlier position
//! (3.14158999995 -> 3.1415900000) and report one digit too many.

/// Upper bound of [`matching_digits`]
pub const MATCH_PRECISION: usize = 10;

/// Fractional digits used when formatting values for comparison
const FORMAT_PRECISION: usize = 15;

/// Count consecutive matching fractional digits of `estimate` against `reference`
///
/// Integer parts are not compared. Non-finite inputs match nothing.
pub fn matching_digits(estimate: f64, reference: f64) -> u32 {
    if !estimate.is_finite() || !reference.is_finite() {
        return 0;
    }

    let estimate = format!("{:.*}", FORMAT_PRECISION, estimate);
    let reference = format!("{:.*}", FORMAT_PRECISION, reference);

    let (Some(est_frac), Some(ref_frac)) = (fraction(&estimate), fraction(&reference)) else {
        return 0;
    };

    est_frac
        .bytes()
        .zip(ref_frac.bytes())
        .take(MATCH_PRECISION)
        .take_while(|(a, b)| a == b)
        .count() as u32
}

/// Fractional digit run after the decimal point
fn fraction(formatted: &str) -> Option<&str> {
    formatted.split_once('.').map(|(_, frac)| frac)
}
