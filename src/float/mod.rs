//! This module contains the machine floating point operations needed by the shadow arithmetic.
//! These are hidden from the end-user, which only sees the sealed [`Float`] trait, implemented
//! for `f32` and `f64`, and the [`Scalar`] and [`Promote`] traits that drive mixed-precision
//! arithmetic.

/// The trait for the machine floating point types that can be used as the *working precision* of
/// a [`Shadow`](crate::Shadow) number (only satisfied by `f32` and `f64`).
///
/// This is a *sealed* type.
pub trait Float: Sealed {}

/// Actual operations implemented here.
pub trait Sealed:
  core::fmt::Debug + core::fmt::Display + core::fmt::LowerExp +
  Copy + Clone + Default +
  PartialEq + PartialOrd +
  core::ops::Add<Self, Output=Self> + core::ops::AddAssign<Self> +
  core::ops::Sub<Self, Output=Self> + core::ops::SubAssign<Self> +
  core::ops::Mul<Self, Output=Self> +
  core::ops::Div<Self, Output=Self> +
  core::ops::Neg<Output=Self> +
  Send + Sync + 'static
{
  const ZERO: Self;
  const ONE: Self;
  const TWO: Self;
  const HALF: Self;
  const TEN: Self;
  const INFINITY: Self;
  const NAN: Self;

  fn of_i32(x: i32) -> Self;
  fn to_f64(self) -> f64;

  /// `self * a + b` with a single rounding.
  fn mul_add(self, a: Self, b: Self) -> Self;

  fn abs(self) -> Self;
  fn floor(self) -> Self;
  fn log10(self) -> Self;
  fn sqrt(self) -> Self;
  fn cbrt(self) -> Self;
  fn exp(self) -> Self;
  fn sin(self) -> Self;
  fn cos(self) -> Self;
  fn tan(self) -> Self;
  fn powf(self, other: Self) -> Self;

  fn is_finite(self) -> bool;
  fn is_nan(self) -> bool;

  /// `√|self|`, evaluated in the extended tier and rounded back to `Self`.
  fn sqrt_abs_extended(self) -> Self;

  /// The error of `result = f(value)` when the argument really is `value + error`, i.e. an
  /// estimate of `f(value + error) - result`. See [`precise`] for how each tier computes it.
  fn correction(f: Function, value: Self, error: Self, result: Self) -> Self;

  /// As [`Sealed::correction`], for `result = x.powf(y)` with arguments `x + ex` and `y + ey`.
  fn pow_correction(x: Self, ex: Self, y: Self, ey: Self, result: Self) -> Self;
}

/// The elementary functions with no closed-form error-free transformation; their error is
/// estimated by re-evaluation (see [`Sealed::correction`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
  Cbrt,
  Exp,
  Sin,
  Cos,
  Tan,
}

/// Extended-tier re-evaluation of the elementary functions.
mod precise;

/// `impl Float for f32, f64`.
mod ieee;

/// Raw host scalars and the promotion table for mixed-precision arithmetic.
mod promote;
pub use promote::{Promote, Scalar};
