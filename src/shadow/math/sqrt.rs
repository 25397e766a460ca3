use super::*;
use crate::{Float, Instability, detect};

impl<F: Float> Shadow<F> {
  /// Returns the square root of `self`.
  ///
  /// The error is one Newton step from the native result `q`: the remainder `v - q²` is exact
  /// with a fused multiply-add, and `√(v + e) - q ≈ (v - q² + e) / 2q`. When `q` is zero that
  /// step divides by zero, and the error is `√|e|` instead, evaluated in the extended tier.
  ///
  /// Negative values give NaN, like the native `sqrt`.
  ///
  /// ```
  /// # use shadow_float::sf64;
  /// let x = sf64::from(2_i32).sqrt();
  /// assert_eq!(x.value(), 2_f64.sqrt());
  /// assert!(x.error() != 0.);
  /// ```
  pub fn sqrt(self) -> Self {
    let value = self.value.sqrt();
    let error = if value == F::ZERO {
      self.error.sqrt_abs_extended()
    } else {
      let remainder = -value.mul_add(value, -self.value);
      (remainder + self.error) / (value + value)
    };
    detect::watch(Instability::Function, || self.non_significant());
    Self { value, error }
  }
}
