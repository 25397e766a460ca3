use super::*;
use crate::Float;
use crate::detect;

impl<F: Float> Shadow<F> {
  /// Zero, with no error. The additive identity, and the [`Default`].
  pub const ZERO: Self = Self { value: F::ZERO, error: F::ZERO };

  /// One, with no error. The multiplicative identity.
  pub const ONE: Self = Self { value: F::ONE, error: F::ZERO };

  /// Construct a shadow number from a `value` that is already known to be off by `error`, i.e.
  /// whose true value is `value + error` (for instance a measured quantity, or a constant that had
  /// to be rounded).
  ///
  /// To construct a shadow number from an exact value, use [`From`].
  ///
  /// ```
  /// # use shadow_float::sf64;
  /// let pi = sf64::new(core::f64::consts::PI, 1.2246467991473532e-16);
  /// assert_eq!(pi.value(), core::f64::consts::PI);
  /// ```
  #[inline]
  pub const fn new(value: F, error: F) -> Self {
    Self { value, error }
  }

  /// The value, i.e. what a native float would have computed.
  #[inline]
  pub fn value(self) -> F {
    self.value
  }

  /// The estimated error, i.e. how far the true result is from [`value`](Self::value): the true
  /// result is estimated to be `value + error`.
  #[inline]
  pub fn error(self) -> F {
    self.error
  }

  /// The best available estimate of the true result, `value + error`, rounded to `F`.
  #[inline]
  pub fn corrected(self) -> F {
    self.value + self.error
  }

  /// The number of decimal digits of [`value`](Self::value) that can be trusted given the
  /// estimated error. This is `+∞` for a number with no error, and `0` if the error is as large as
  /// the value itself.
  ///
  /// ```
  /// # use shadow_float::sf64;
  /// assert_eq!(sf64::from(2.).digits(), f64::INFINITY);
  /// assert_eq!(sf64::new(1., 1.).digits(), 0.);
  /// assert!((sf64::new(1., 1e-10).digits() - 10.).abs() < 1e-9);
  /// ```
  #[inline]
  pub fn digits(self) -> F {
    detect::significant_digits(self.value, self.error)
  }

  /// Whether `self` has lost all its trustworthy digits (its error is more than a tenth of its
  /// value).
  #[inline]
  pub fn non_significant(self) -> bool {
    detect::non_significant(self.value, self.error)
  }

  /// `true` if the value is neither infinite nor NaN.
  #[inline]
  pub fn is_finite(self) -> bool {
    self.value.is_finite()
  }

  /// The value, if it has at least one significant digit; otherwise an [`Untrustworthy`] error
  /// carrying the value and its error.
  ///
  /// ```
  /// # use shadow_float::sf64;
  /// assert_eq!((sf64::from(1.) / 4_i32).trusted(), Ok(0.25));
  /// assert!((sf64::from(1.) + 1e16_f64 - 1e16_f64).trusted().is_err());
  /// ```
  pub fn trusted(self) -> Result<F, Untrustworthy<F>> {
    if detect::significant_digits(self.value, self.error).floor() > F::ZERO {
      Ok(self.value)
    } else {
      Err(Untrustworthy { value: self.value, error: self.error })
    }
  }
}

/// The error returned by [`Shadow::trusted`] when the estimated error has swallowed every
/// significant digit of the value.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("no significant digits left in {value:e} (estimated error {error:e})")]
pub struct Untrustworthy<F: Float> {
  /// The computed value.
  pub value: F,
  /// Its estimated error.
  pub error: F,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{sf32, sf64};

  #[test]
  fn zero_error_identity() {
    for x in [0., 1., -2.5, 1e300, f64::MIN_POSITIVE, f64::INFINITY] {
      let s = sf64::from(x);
      assert_eq!(s.value(), x);
      assert_eq!(s.error(), 0.);
      assert_eq!(s.digits(), f64::INFINITY);
      assert!(!s.non_significant());
    }
    let s = sf32::from(0.1_f32);
    assert_eq!(s.error(), 0.);
    assert_eq!(s.digits(), f32::INFINITY);
  }

  #[test]
  fn default_is_zero() {
    let s = sf64::default();
    assert_eq!(s.value(), 0.);
    assert_eq!(s.error(), 0.);
    assert_eq!(sf64::ZERO.value(), 0.);
    assert_eq!(sf32::ONE.value(), 1.);
  }

  #[test]
  fn corrected() {
    assert_eq!(sf64::new(1., 0.5).corrected(), 1.5);
  }

  #[test]
  fn trusted() {
    assert_eq!(sf64::new(3., 1e-3).trusted(), Ok(3.));
    assert_eq!(sf64::new(3., 3.).trusted(), Err(Untrustworthy { value: 3., error: 3. }));
    assert_eq!(sf64::new(0., 1e-300).trusted(), Err(Untrustworthy { value: 0., error: 1e-300 }));
    assert_eq!(
      sf64::new(3., 3.).trusted().unwrap_err().to_string(),
      "no significant digits left in 3e0 (estimated error 3e0)",
    );
  }
}
