use super::*;
use crate::{Float, Instability, detect, eft};

impl<F: Float> Shadow<F> {
  /// To first order, `(a.v + a.e)(b.v + b.e) = a.v·b.v + a.v·b.e + b.v·a.e`. The native product
  /// `a.v·b.v` is rounded; its rounding error is recovered exactly by [`eft::fast_two_prod`].
  /// The cross terms are folded in with two fused multiply-adds.
  #[inline]
  pub(crate) fn mul(self, other: Self) -> Self {
    let value = self.value * other.value;
    let rounding = eft::fast_two_prod(self.value, other.value, value);
    let error = self.value.mul_add(other.error, other.value.mul_add(self.error, rounding));
    detect::watch(Instability::Multiplication, || {
      self.non_significant() && other.non_significant()
    });
    Self { value, error }
  }
}

use core::ops::{Mul, MulAssign};
super::mk_ops!{Mul, MulAssign, mul, mul_assign}
