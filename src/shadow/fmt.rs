use super::*;
use crate::Float;
use crate::digits::Digits;

impl<F: Float> core::fmt::Display for Shadow<F> {
  /// Only the significant digits of the value, or `@.0` if there are none; see
  /// [`digits`](crate::digits).
  ///
  /// The alternate form (`{:#}`) shows everything: value, error, and number of significant
  /// digits.
  ///
  /// ```
  /// # use shadow_float::sf64;
  /// let x = sf64::new(3.14159, 1e-3);
  /// assert_eq!(format!("{x}"), "3.14e0");
  /// assert_eq!(format!("{x:#}"), "3.14159e0 (error: 1e-3, digits: 3)");
  /// ```
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    if f.alternate() {
      write!(f, "{:e} (error: {:e}, digits: {})", self.value, self.error, self.digits().floor())
    } else {
      core::fmt::Display::fmt(&Digits::new(self.value, self.error), f)
    }
  }
}

impl<F: Float> core::fmt::Debug for Shadow<F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Shadow")
      .field("value", &self.value)
      .field("error", &self.error)
      .finish()
  }
}
