//! This module and its submodules contain the scalar shadow number: a floating point value paired
//! with a running estimate of its own rounding error.
//!
//! Every operation follows the same recipe:
//!
//!   1. Compute the result natively, in the working precision. This is the `value` of the result,
//!      so a program using shadow numbers computes *exactly* the same values as it would with
//!      native floats: same special values, same overflows, same rounding.
//!   2. Compute the rounding error of that native operation, either exactly with an
//!      [error-free transformation](crate::eft) or approximately by re-evaluation in a more
//!      precise tier (see [`Float`](crate::Float)).
//!   3. Fold in the errors already carried by the operands, propagated through the operation to
//!      first order. The sum is the `error` of the result.
//!   4. Optionally, check the operands and result against the [instability
//!      heuristics](crate::detect) and bump the [counters](crate::counters).
//!
//! Some notation used in the comments: for a shadow number `x`, `x.v` is its value and `x.e` its
//! error, so that its "true" value is estimated to be `x.v + x.e`.

/// A floating point number in working precision `F`, together with an estimate of the error it
/// has accumulated: the true (real-number) result of the computation that produced it is estimated
/// to be [`value`](Self::value) + [`error`](Self::error).
///
/// Examples:
///
/// ```
/// # use shadow_float::{sf64, Shadow};
/// let third = sf64::from(1.) / 3_f64;
/// assert_eq!(third.value(), 1. / 3.);
/// assert!(third.error() != 0.);  // 1/3 is not representable
///
/// // Ask how many digits can be trusted
/// let x = sf64::from(1.) + 1e16_f64 - 1e16_f64;
/// assert_eq!(x.digits(), 0.);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Shadow<F: crate::Float> {
  pub(crate) value: F,
  pub(crate) error: F,
}

/// Basics: construction, accessors, and derived quantities.
mod basics;
pub use basics::Untrustworthy;

/// Conversions and operand promotion.
mod convert;
pub use convert::Operand;
pub(crate) use convert::promote;

/// Arithmetic operators.
mod ops;

/// Negation, absolute value.
mod unary;

/// Elementary functions.
mod math;

/// Comparisons, `min`, `max`.
mod cmp;

/// Formatting.
mod fmt;

/// Reductions over iterators.
mod iter;
