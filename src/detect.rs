//! Instability heuristics: stateless predicates on operands and results that flag the classic
//! ways a floating point computation goes wrong (catastrophic cancellation, operating on numbers
//! that have no significant digits left, branching on a comparison whose outcome is decided by
//! rounding noise).
//!
//! The predicates never alter a result. The arithmetic operators evaluate them, when the
//! `diagnostics` feature is enabled, and [record](crate::counters) the ones that fire.

use crate::{Float, Shadow, Instability};

/// How many decimal digits of relative precision an addition may lose, relative to its least
/// precise operand, before it counts as a cancellation.
pub const CANCELLATION_DIGITS: i32 = 4;

/// Number of significant decimal digits of `value`, given that it is off by `error`:
///
///   - `+∞` if `error` is 0,
///   - `0` if `|error / value| ≥ 1` (including `value == 0` with a nonzero `error`),
///   - `-log10(|error / value|)` otherwise.
///
/// If either argument is NaN, so is the result.
#[inline]
pub fn significant_digits<F: Float>(value: F, error: F) -> F {
  if error == F::ZERO {
    F::INFINITY
  } else {
    let relative = (error / value).abs();
    if relative >= F::ONE {
      F::ZERO
    } else {
      -relative.log10()
    }
  }
}

/// Whether a `(value, error)` pair has no trustworthy digit left: `error ≠ 0` and
/// `|value| < 10·|error|`.
//
// The `error != 0` test is not needed for correctness, but numbers with no error at all are very
// common (anything that was just converted from a native float) and it short-circuits them.
#[inline]
pub fn non_significant<F: Float>(value: F, error: F) -> bool {
  error != F::ZERO && value.abs() < F::TEN * error.abs()
}

/// Of two shadow numbers, the one with the larger *relative* error. Ties go to `b`.
#[inline]
pub fn min_precision<F: Float>(a: Shadow<F>, b: Shadow<F>) -> Shadow<F> {
  if (a.error * b.value).abs() > (a.value * b.error).abs() {
    a
  } else {
    b
  }
}

/// Whether computing `result` (with error `error`) from operands whose least precise one is
/// `reference` lost more than [`CANCELLATION_DIGITS`] digits of relative precision.
///
/// A reference with no error never triggers: there is no precision to lose relative to an exact
/// operand.
#[inline]
pub fn is_cancellation<F: Float>(reference: Shadow<F>, result: F, error: F) -> bool {
  let threshold = F::of_i32(10_i32.pow(CANCELLATION_DIGITS as u32));
  reference.error != F::ZERO
    && (error * reference.value).abs() > threshold * (reference.error * result).abs()
}

/// Whether comparing `a` with `b` is unstable, i.e. their difference is not significant given
/// their errors, so that the outcome of the comparison may be decided by rounding noise.
#[inline]
pub fn is_unstable_branching<F: Float>(a: Shadow<F>, b: Shadow<F>) -> bool {
  non_significant(a.value - b.value, a.error - b.error)
}

/// Evaluate `unstable` and record an instability of `kind` if it holds. Compiles to nothing
/// without the `diagnostics` feature (and `unstable` is never evaluated).
#[inline(always)]
pub(crate) fn watch(kind: Instability, unstable: impl FnOnce() -> bool) {
  #[cfg(feature = "diagnostics")]
  if unstable() {
    crate::counters::record(kind)
  }
  #[cfg(not(feature = "diagnostics"))]
  let _ = (kind, unstable);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sf64;

  #[test]
  fn digits_boundaries() {
    assert_eq!(significant_digits(1.0_f64, 0.), f64::INFINITY);
    assert_eq!(significant_digits(0.0_f64, 0.), f64::INFINITY);
    assert_eq!(significant_digits(1.0_f64, 1.), 0.);
    assert_eq!(significant_digits(1.0_f64, -2.), 0.);
    assert_eq!(significant_digits(0.0_f64, 1e-300), 0.);
    assert!((significant_digits(1.0_f64, 1e-10) - 10.).abs() < 1e-9);
    assert!((significant_digits(-250.0_f32, 0.025) - 4.).abs() < 1e-5);
    assert!(significant_digits(f64::NAN, 1.).is_nan());
  }

  #[test]
  fn non_significant_boundaries() {
    assert!(!non_significant(0.0_f64, 0.));
    assert!(non_significant(0.0_f64, 1e-300));
    assert!(non_significant(1.0_f64, 0.2));
    assert!(!non_significant(1.0_f64, 0.1));
    assert!(!non_significant(1.0_f64, 0.05));
    assert!(non_significant(-1.0_f64, -0.5));
  }

  #[test]
  fn min_precision_picks_larger_relative_error() {
    let a = sf64::new(1., 1e-3);
    let b = sf64::new(1000., 1e-3);
    assert_eq!(min_precision(a, b).value(), 1.);
    assert_eq!(min_precision(b, a).value(), 1.);
    // Ties go to the second argument
    let c = sf64::new(2., 2e-3);
    assert_eq!(min_precision(a, c).value(), 2.);
    assert_eq!(min_precision(c, a).value(), 1.);
  }

  #[test]
  fn cancellation() {
    // Reference has 16 digits, result has 0: cancellation
    let reference = sf64::new(1e16, 1.);
    assert!(is_cancellation(reference, 0., 1.));
    // Lost 3 digits: fine. Lost 5: cancellation.
    let reference = sf64::new(1., 1e-12);
    assert!(!is_cancellation(reference, 1., 1e-9));
    assert!(is_cancellation(reference, 1., 1e-7));
    // Exact reference never triggers
    assert!(!is_cancellation(sf64::new(1., 0.), 0., 1.));
  }

  #[test]
  fn branching() {
    let a = sf64::new(1., 0.01);
    let b = sf64::new(1.001, -0.01);
    assert!(is_unstable_branching(a, b));
    assert!(is_unstable_branching(b, a));
    let c = sf64::new(2., 0.01);
    assert!(!is_unstable_branching(a, c));
    // Equal, exact numbers compare stably
    assert!(!is_unstable_branching(sf64::from(1.), sf64::from(1.)));
  }
}
