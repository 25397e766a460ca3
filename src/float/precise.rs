//! There is no closed-form error-free transformation for `cbrt`, `exp`, `sin`, `cos`, `tan`, or
//! `pow`. Instead we estimate `f(value + error) - f(value)` by evaluating more precisely than the
//! working precision allows.
//!
//!   - For `f32`, the extended tier is `f64`: we simply re-evaluate `f` at `value + error` in
//!     `f64` and subtract the native `f32` result. This also captures the rounding error of the
//!     `f32` library call itself.
//!   - For `f64`, there is no wider hardware type, so the extended tier is a double-double
//!     ([`TwoFloat`]). The correction has two parts. The rounding error of the `f64` library call
//!     itself is `f(value)` in double-double less the native result. The propagated part
//!     `f(v + e) - f(v)` is rewritten with an identity that has no cancellation, e.g.
//!     `exp(v + e) - exp(v) = exp(v) · expm1(e)`, since `value + error` rounds right back to
//!     `value` in `f64` whenever the error is below half an ulp.

use twofloat::TwoFloat;

use super::Function;

pub(super) fn recompute_f32(f: Function, value: f32, error: f32, result: f32) -> f32 {
  let x = f64::from(value) + f64::from(error);
  let precise = match f {
    Function::Cbrt => x.cbrt(),
    Function::Exp => x.exp(),
    Function::Sin => x.sin(),
    Function::Cos => x.cos(),
    Function::Tan => x.tan(),
  };
  (precise - f64::from(result)) as f32
}

pub(super) fn recompute_pow_f32(x: f32, ex: f32, y: f32, ey: f32, result: f32) -> f32 {
  let x = f64::from(x) + f64::from(ex);
  let y = f64::from(y) + f64::from(ey);
  (x.powf(y) - f64::from(result)) as f32
}

/// `hi` of a double-double difference, or zero where the double-double evaluation broke down.
#[inline]
fn finite_or_zero(x: TwoFloat) -> f64 {
  let hi = x.hi();
  if hi.is_finite() { hi } else { 0. }
}

/// The rounding error of the native `f64` evaluation `result` of `f(value)`.
fn rounding_f64(f: Function, value: f64, result: f64) -> f64 {
  // Every function here is exact at zero
  if value == 0. || !value.is_finite() || !result.is_finite() {
    return 0.
  }
  let x = TwoFloat::from(value);
  let precise = match f {
    Function::Cbrt => {
      // Odd; evaluated on the magnitude
      let own = finite_or_zero(TwoFloat::from(value.abs()).cbrt() - TwoFloat::from(result.abs()));
      return if value < 0. { -own } else { own }
    },
    Function::Exp => x.exp(),
    Function::Sin => x.sin(),
    Function::Cos => x.cos(),
    Function::Tan => x.tan(),
  };
  finite_or_zero(precise - TwoFloat::from(result))
}

/// `f(v + e) - f(v)`, without cancellation.
fn propagated_f64(f: Function, value: f64, error: f64, result: f64) -> f64 {
  match f {
    // cbrt(v + e) - cbrt(v) = e / (a² + ab + b²), where a = cbrt(v + e), b = cbrt(v)
    Function::Cbrt => {
      let a = (value + error).cbrt();
      let b = result;
      error / a.mul_add(a, b.mul_add(b, a * b))
    },
    // exp(v + e) - exp(v) = exp(v) · (exp(e) - 1)
    Function::Exp => result * error.exp_m1(),
    // sin(v + e) - sin(v) = 2 cos(v + e/2) sin(e/2)
    Function::Sin => {
      let half = 0.5 * error;
      2. * (value + half).cos() * half.sin()
    },
    // cos(v + e) - cos(v) = -2 sin(v + e/2) sin(e/2)
    Function::Cos => {
      let half = 0.5 * error;
      -2. * (value + half).sin() * half.sin()
    },
    // tan(v + e) - tan(v) = sin(e) / (cos(v) cos(v + e))
    Function::Tan => error.sin() / (value.cos() * (value + error).cos()),
  }
}

pub(super) fn difference_f64(f: Function, value: f64, error: f64, result: f64) -> f64 {
  let own = rounding_f64(f, value, result);
  if error == 0. {
    return own
  }
  propagated_f64(f, value, error, result) + own
}

/// `base^n` by repeated squaring. Exact whenever the power of a short mantissa fits in a
/// double-double, so that exact native powers report no rounding.
fn powi(mut base: TwoFloat, mut n: u32) -> TwoFloat {
  let mut power = TwoFloat::from(1.);
  while n > 0 {
    if n & 1 == 1 {
      power = power * base;
    }
    base = base * base;
    n >>= 1;
  }
  power
}

/// The rounding error of the native `f64` evaluation `result` of `x.powf(y)`.
fn pow_rounding_f64(x: f64, y: f64, result: f64) -> f64 {
  if result == 0. || !result.is_finite() {
    return 0.
  }
  let base = TwoFloat::from(x);
  let precise = if y.fract() == 0. && y.abs() <= 64. {
    let power = powi(base, y.abs() as u32);
    if y < 0. { TwoFloat::from(1.) / power } else { power }
  } else if x > 0. {
    (TwoFloat::from(y) * base.ln()).exp()
  } else {
    return 0.
  };
  finite_or_zero(precise - TwoFloat::from(result))
}

pub(super) fn difference_pow_f64(x: f64, ex: f64, y: f64, ey: f64, result: f64) -> f64 {
  let own = pow_rounding_f64(x, y, result);
  if ex == 0. && ey == 0. {
    return own
  }
  let propagated = if x > 0. && result.is_finite() {
    // (x + ex)^(y + ey) - x^y = x^y · (exp(d) - 1),
    // d = (y + ey) ln(x + ex) - y ln(x) = ey ln(x + ex) + y ln(1 + ex/x)
    let d = ey.mul_add((x + ex).ln(), y * (ex / x).ln_1p());
    result * d.exp_m1()
  } else {
    // Negative or zero base: no logarithm to work with, fall back to re-evaluation.
    (x + ex).powf(y + ey) - result
  };
  propagated + own
}
