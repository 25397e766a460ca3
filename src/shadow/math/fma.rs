use super::*;
use crate::float::Promote;
use crate::{Float, Instability, detect, eft};

impl<F: Float> Shadow<F> {
  /// Fused multiply-add: `self * b + c` with a single rounding of the value. The operands may be
  /// any mix of shadow numbers and raw scalars; the result has their promoted working precision.
  ///
  /// ```
  /// # use shadow_float::{sf32, sf64};
  /// let x = sf64::from(0.1_f64).mul_add(10_i32, -1_i32);
  /// assert_eq!(x.value(), 0.1_f64.mul_add(10., -1.));
  /// assert_eq!(x.error(), 0.);  // 0.1·10 - 1 is representable, for the 0.1 that is stored
  ///
  /// let y: sf64 = sf32::ONE.mul_add(2_f32, 1_f64);
  /// assert_eq!(y.value(), 3.);
  /// ```
  #[allow(clippy::type_complexity)]
  pub fn mul_add<B: Operand, C: Operand>(self, b: B, c: C)
    -> Shadow<<<F as Promote<B::Kind>>::Output as Promote<C::Kind>>::Output>
  where
    F: Promote<B::Kind>,
    <F as Promote<B::Kind>>::Output: Promote<C::Kind>,
  {
    let (a, b) = promote(self, b);
    let (a, c_wide) = promote(a, c);
    let (b, _) = promote(b, c);
    a.fma(b, c_wide)
  }

  /// The value's rounding error comes from [`eft::eft_fma`]. The incoming errors propagate as for
  /// a product followed by a sum: `a.v·b.e + b.v·a.e + c.e`.
  pub(crate) fn fma(self, b: Self, c: Self) -> Self {
    let value = self.value.mul_add(b.value, c.value);
    let rounding = eft::eft_fma(self.value, b.value, c.value, value);
    let error = b.value.mul_add(self.error, self.value.mul_add(b.error, rounding + c.error));
    detect::watch(Instability::Cancellation, || {
      let reference = detect::min_precision(self, detect::min_precision(b, c));
      detect::is_cancellation(reference, value, error)
    });
    Self { value, error }
  }
}
