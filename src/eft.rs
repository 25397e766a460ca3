//! Error-free transformations: given the rounded result of an operation on two (or three)
//! floating point numbers, recover the *exact* rounding error of that operation, using nothing but
//! working-precision arithmetic.
//!
//! All of these are pure functions: no side effects, no instability checks. Notation:
//! `fl(x)` is `x` rounded to the working precision; `a ⊕ b` is `fl(a + b)`.

use crate::Float;

/// Given `result = a ⊕ b`, return the rounding error `(a + b) - result`, which is always exactly
/// representable (Knuth's TwoSum). No precondition on the magnitudes of `a` and `b`.
#[inline]
pub fn two_sum<F: Float>(a: F, b: F, result: F) -> F {
  // Recover the part of `b` that made it into `result`, then the part of `a` that did, and add up
  // what each of them lost.
  let b_virtual = result - a;
  let a_virtual = result - b_virtual;
  let b_lost = b - b_virtual;
  let a_lost = a - a_virtual;
  a_lost + b_lost
}

/// As [`two_sum`], but only exact if `|a| ≥ |b|` (Dekker's FastTwoSum). Half the operations; if the
/// precondition does not hold the result is a (usually good) approximation.
#[inline]
pub fn fast_two_sum<F: Float>(a: F, b: F, result: F) -> F {
  let b_virtual = result - a;
  b - b_virtual
}

/// Given `result = fl(a · b)`, return the rounding error `a · b - result`, exact as long as the
/// product does not underflow. One fused multiply-add does the whole job.
#[inline]
pub fn fast_two_prod<F: Float>(a: F, b: F, result: F) -> F {
  a.mul_add(b, -result)
}

/// Given `result = fl(a · b + c)` (a fused multiply-add), return its rounding error
/// `a · b + c - result`.
///
/// This is ErrFma from Boldo & Muller, "Some Functions Computable with a Fused-mac": the exact
/// error is the sum of two floats, which we return already summed (i.e. rounded once more).
#[inline]
pub fn eft_fma<F: Float>(a: F, b: F, c: F, result: F) -> F {
  // a·b = u1 + u2 exactly
  let u1 = a * b;
  let u2 = fast_two_prod(a, b, u1);

  // c + u2 = alpha1 + alpha2 exactly
  let alpha1 = c + u2;
  let alpha2 = two_sum(c, u2, alpha1);

  // u1 + alpha1 = beta1 + beta2 exactly
  let beta1 = u1 + alpha1;
  let beta2 = two_sum(u1, alpha1, beta1);

  // a·b + c - result = (beta1 - result) + beta2 + alpha2, where `beta1 - result` is exact
  let gamma = (beta1 - result) + beta2;
  let error1 = gamma + alpha2;
  let error2 = fast_two_sum(gamma, alpha2, error1);

  error1 + error2
}
