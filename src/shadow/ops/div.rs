use super::*;
use crate::{Float, Instability, detect};

impl<F: Float> Shadow<F> {
  /// For `q = fl(a.v / b.v)`, the remainder `a.v - b.v·q` is exactly representable and one fused
  /// multiply-add computes it. Then
  ///
  ///   (a.v + a.e) / (b.v + b.e) - q = (remainder + a.e - q·b.e) / (b.v + b.e)
  ///
  /// which holds exactly (not just to first order) up to the roundings in evaluating it.
  #[inline]
  pub(crate) fn div(self, other: Self) -> Self {
    let value = self.value / other.value;
    let remainder = -other.value.mul_add(value, -self.value);
    let error = -value.mul_add(other.error, -(remainder + self.error)) / (other.value + other.error);
    detect::watch(Instability::Division, || other.non_significant());
    Self { value, error }
  }
}

use core::ops::{Div, DivAssign};
super::mk_ops!{Div, DivAssign, div, div_assign}
