use super::*;
use crate::float::{Function, Promote};
use crate::{Float, Instability, detect};

/// The functions of one argument with no error-free transformation: compute natively, then ask
/// the extended tier for `f(v + e) - f(v)`.
macro_rules! elementary {
  ($(#[$doc:meta])* $name:ident => $function:ident) => {
    $(#[$doc])*
    pub fn $name(self) -> Self {
      let value = self.value.$name();
      let error = F::correction(Function::$function, self.value, self.error, value);
      detect::watch(Instability::Function, || self.non_significant());
      Self { value, error }
    }
  };
}

impl<F: Float> Shadow<F> {
  elementary!{
    /// Returns the cube root of `self`.
    cbrt => Cbrt
  }

  elementary!{
    /// Returns `e^self`.
    ///
    /// ```
    /// # use shadow_float::sf64;
    /// let x = sf64::new(1., 1e-12).exp();
    /// assert_eq!(x.value(), 1_f64.exp());
    /// assert!((x.error() - 1_f64.exp() * 1e-12).abs() < 1e-15);
    /// ```
    exp => Exp
  }

  elementary!{
    /// Returns the sine of `self` (in radians).
    sin => Sin
  }

  elementary!{
    /// Returns the cosine of `self` (in radians).
    cos => Cos
  }

  elementary!{
    /// Returns the tangent of `self` (in radians).
    tan => Tan
  }

  /// `self` raised to the power `other`, where `other` may be another shadow number or a raw
  /// scalar; the result has the promoted working precision, as for the arithmetic operators.
  ///
  /// ```
  /// # use shadow_float::{sf32, sf64};
  /// let x: sf64 = sf32::from(3_f32).powf(2_f64);
  /// assert_eq!((x.value(), x.error()), (9., 0.));
  /// ```
  pub fn powf<B: Operand>(self, other: B) -> Shadow<<F as Promote<B::Kind>>::Output>
  where
    F: Promote<B::Kind>,
  {
    let (base, exponent) = promote(self, other);
    base.pow(exponent)
  }

  pub(crate) fn pow(self, other: Self) -> Self {
    let value = self.value.powf(other.value);
    let error = F::pow_correction(self.value, self.error, other.value, other.error, value);
    detect::watch(Instability::Power, || self.non_significant() || other.non_significant());
    Self { value, error }
  }
}
