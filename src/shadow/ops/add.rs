use super::*;
use crate::{Float, Instability, detect, eft};

impl<F: Float> Shadow<F> {
  /// The error of `a ± b` has two parts: the rounding error of the native sum, recovered exactly
  /// by [`eft::two_sum`], and the sum of the operands' errors (addition propagates them
  /// unchanged, to first order and in fact exactly).
  ///
  /// Addition is where catastrophic cancellation happens: if `a` and `b` nearly cancel, the
  /// result may have far fewer significant digits than the operands.
  #[inline]
  pub(crate) fn add(self, other: Self) -> Self {
    let value = self.value + other.value;
    let rounding = eft::two_sum(self.value, other.value, value);
    let error = rounding + self.error + other.error;
    detect::watch(Instability::Cancellation, || {
      detect::is_cancellation(detect::min_precision(self, other), value, error)
    });
    Self { value, error }
  }

  #[inline]
  pub(crate) fn sub(self, other: Self) -> Self {
    let value = self.value - other.value;
    let rounding = eft::two_sum(self.value, -other.value, value);
    let error = rounding + self.error - other.error;
    detect::watch(Instability::Cancellation, || {
      detect::is_cancellation(detect::min_precision(self, other), value, error)
    });
    Self { value, error }
  }
}

use core::ops::{Add, AddAssign, Sub, SubAssign};
super::mk_ops!{Add, AddAssign, add, add_assign}
super::mk_ops!{Sub, SubAssign, sub, sub_assign}
