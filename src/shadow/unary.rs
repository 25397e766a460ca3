use super::*;
use crate::Float;

impl<F: Float> core::ops::Neg for Shadow<F> {
  type Output = Shadow<F>;

  /// Exact: negates the value and the error.
  #[inline]
  fn neg(self) -> Self::Output {
    Shadow { value: -self.value, error: -self.error }
  }
}

impl<F: Float> core::ops::Neg for &Shadow<F> {
  type Output = Shadow<F>;

  /// Exact: negates the value and the error.
  #[inline]
  fn neg(self) -> Self::Output {
    -*self
  }
}

impl<F: Float> Shadow<F> {
  /// Return the absolute value of `self`. This is exact, and the error flips sign along with the
  /// value, so that `|x|.v + |x|.e` is still `±(x.v + x.e)`.
  ///
  /// The value is the native absolute value, so `-0.0` becomes `0.0`; the error flips only for a
  /// negative value.
  #[inline]
  pub fn abs(self) -> Self {
    let error = if self.value < F::ZERO { -self.error } else { self.error };
    Shadow { value: self.value.abs(), error }
  }
}
