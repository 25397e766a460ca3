use super::*;
use crate::float::Function;
use crate::{Instability, eft};

impl<F: Float> Tagged<F> {
  /// The number with value `value` whose contributions are those of `self` scaled so that they
  /// add up to `propagated`, plus `own` at the active site. For the functions whose error is only
  /// known in total.
  fn rescale(&self, value: F, propagated: F, own: F) -> Self {
    let incoming = self.error();
    let ratio = if incoming == F::ZERO { F::ZERO } else { propagated / incoming };
    Self::combine(&self.store, value, [&self.errors[..]], own, |[e]| e * ratio)
  }

  /// Returns the square root of `self`. Per tag, `e[t] / 2q` for the native root `q`, and the
  /// exact remainder `v - q²` is attributed to the active site. See [`Shadow::sqrt`].
  pub fn sqrt(&self) -> Self {
    let value = self.value.sqrt();
    detect::watch(Instability::Function, || self.non_significant());
    if value == F::ZERO {
      // No derivative at zero: the error is only known in total
      let propagated = self.error().sqrt_abs_extended();
      self.rescale(value, propagated, F::ZERO)
    } else {
      let remainder = -value.mul_add(value, -self.value);
      let twice = value + value;
      Self::combine(&self.store, value, [&self.errors[..]], remainder / twice, |[e]| e / twice)
    }
  }

  /// Fused multiply-add: `self * b + c` with a single rounding of the value. Per tag,
  /// `a.v·b.e[t] + b.v·a.e[t] + c.e[t]`.
  pub fn mul_add(&self, b: &Self, c: &Self) -> Self {
    let value = self.value.mul_add(b.value, c.value);
    let rounding = eft::eft_fma(self.value, b.value, c.value, value);
    let (x, y) = (self.value, b.value);
    let operands = [&self.errors[..], &b.errors[..], &c.errors[..]];
    let result = Self::combine(&self.store, value, operands, rounding, |[ea, eb, ec]| {
      y.mul_add(ea, x.mul_add(eb, ec))
    });
    detect::watch(Instability::Cancellation, || {
      let (a, b, c) = (self.to_shadow(), b.to_shadow(), c.to_shadow());
      let reference = detect::min_precision(a, detect::min_precision(b, c));
      detect::is_cancellation(reference, value, result.error())
    });
    result
  }
}

/// Functions with no error-free transformation: the total error comes from the scalar variant,
/// the function's own rounding (its error on the exact argument) goes to the active site, and the
/// rest is shared among the incoming contributions in proportion.
macro_rules! elementary {
  ($($(#[$doc:meta])* $name:ident => $function:ident),* $(,)?) => {
    impl<F: Float> Tagged<F> {
      $(
        $(#[$doc])*
        pub fn $name(&self) -> Self {
          let total = self.to_shadow().$name();
          let own = F::correction(Function::$function, self.value, F::ZERO, total.value);
          self.rescale(total.value, total.error - own, own)
        }
      )*
    }
  };
}

elementary!{
  /// Returns the cube root of `self`.
  cbrt => Cbrt,
  /// Returns `e^self`.
  exp => Exp,
  /// Returns the sine of `self` (in radians).
  sin => Sin,
  /// Returns the cosine of `self` (in radians).
  cos => Cos,
  /// Returns the tangent of `self` (in radians).
  tan => Tan,
}

impl<F: Float> Tagged<F> {
  /// `self` raised to the power `other`. The total error is that of [`Shadow::powf`], the
  /// rounding of `powf` itself goes to the active site, and what the base and the exponent each
  /// propagate is shared among their own contributions in proportion.
  ///
  /// ```
  /// # use shadow_float::{Store, Tag, Tagged};
  /// let store = Store::<f64>::new();
  /// let x = Tagged::new(&store, 2., 1e-12);
  /// let _site = store.enter(Tag(1));
  /// let y = x.powf(&Tagged::exact(&store, 10.));
  /// assert_eq!(y.value(), 1024.);
  /// assert_eq!(y.contribution(Tag(1)), 0.);  // exact power
  /// assert!((y.contribution(Tag::ROOT) - 5120e-12).abs() < 1e-18);
  /// ```
  pub fn powf(&self, other: &Self) -> Self {
    let (x, y) = (self.to_shadow(), other.to_shadow());
    let total = x.pow(y);
    let own = F::pow_correction(x.value, F::ZERO, y.value, F::ZERO, total.value);
    let base = F::pow_correction(x.value, x.error, y.value, F::ZERO, total.value) - own;
    let exponent = total.error - own - base;
    let ratio = |propagated: F, incoming: F| {
      if incoming == F::ZERO { F::ZERO } else { propagated / incoming }
    };
    let (rx, ry) = (ratio(base, x.error), ratio(exponent, y.error));
    let operands = [&self.errors[..], &other.errors[..]];
    Self::combine(&self.store, total.value, operands, own, |[a, b]| a.mul_add(rx, b * ry))
  }

  /// `self` raised to a raw power, which carries no error.
  pub fn powf_raw(&self, exponent: F) -> Self {
    self.powf(&self.lift(exponent))
  }
}

//
// Comparisons, as for the scalar variant: decided by the values, watched for unstable branching
// using the total errors.
//

impl<F: Float> Tagged<F> {
  fn watch_branching(&self, other: &Self) {
    detect::watch(Instability::Branching, || {
      detect::is_unstable_branching(self.to_shadow(), other.to_shadow())
    });
  }

  /// The operand with the smaller value; `self` if they are equal, `other` if either is NaN. The
  /// other operand is dropped.
  pub fn min(self, other: Self) -> Self {
    self.watch_branching(&other);
    if self.value <= other.value { self } else { other }
  }

  /// The operand with the larger value; `self` if they are equal, `other` if either is NaN. The
  /// other operand is dropped.
  pub fn max(self, other: Self) -> Self {
    self.watch_branching(&other);
    if self.value >= other.value { self } else { other }
  }
}

impl<F: Float> PartialEq for Tagged<F> {
  fn eq(&self, other: &Self) -> bool {
    self.watch_branching(other);
    self.value == other.value
  }
}

impl<F: Float> PartialOrd for Tagged<F> {
  fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
    self.watch_branching(other);
    self.value.partial_cmp(&other.value)
  }
}

impl<F: Float> PartialEq<F> for Tagged<F> {
  fn eq(&self, other: &F) -> bool {
    self.to_shadow().equals(Shadow::from(*other))
  }
}

impl<F: Float> PartialOrd<F> for Tagged<F> {
  fn partial_cmp(&self, other: &F) -> Option<core::cmp::Ordering> {
    self.to_shadow().compare(Shadow::from(*other))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{sf32, sf64, tf32, tf64};

  fn rel(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
  }

  #[test]
  fn sqrt() {
    let store = Store::<f64>::new();
    let two = tf64::exact(&store, 2.);
    let _site = store.enter(Tag(1));
    let root = two.sqrt();
    let scalar = sf64::from(2_i32).sqrt();
    assert_eq!((root.value(), root.error()), (scalar.value(), scalar.error()));
    assert_eq!(root.contribution(Tag(1)), scalar.error());

    let x = {
      let _site = store.enter(Tag(2));
      tf64::new(&store, 4., 1e-10)
    };
    let root = x.sqrt();
    assert_eq!(root.value(), 2.);
    assert_eq!(root.contribution(Tag(2)), 1e-10 / 4.);
    assert_eq!(root.contribution(Tag(1)), 0.);
  }

  #[test]
  fn sqrt_of_zero() {
    let store = Store::<f64>::new();
    let x = {
      let _site = store.enter(Tag(1));
      tf64::new(&store, 0., 1e-20)
    };
    let root = x.sqrt();
    assert_eq!(root.value(), 0.);
    assert!(rel(root.contribution(Tag(1)), 1e-10) < 1e-12);
    assert_eq!(root.contribution(Tag::ROOT), 0.);
    // Nothing to propagate
    assert_eq!(tf64::exact(&store, 0.).sqrt().error(), 0.);
  }

  #[test]
  fn elementary() {
    let store = Store::<f64>::new();
    let x = {
      let _site = store.enter(Tag(1));
      tf64::new(&store, 0.8, 1e-12)
    };
    let _site = store.enter(Tag(2));
    let exact = sf64::from(0.8);
    for (tagged, scalar, own) in [
      (x.exp(), sf64::new(0.8, 1e-12).exp(), exact.exp()),
      (x.sin(), sf64::new(0.8, 1e-12).sin(), exact.sin()),
      (x.cos(), sf64::new(0.8, 1e-12).cos(), exact.cos()),
      (x.tan(), sf64::new(0.8, 1e-12).tan(), exact.tan()),
      (x.cbrt(), sf64::new(0.8, 1e-12).cbrt(), exact.cbrt()),
    ] {
      assert_eq!(tagged.value(), scalar.value());
      assert!(rel(tagged.error(), scalar.error()) < 1e-12);
      // The rounding of the function itself, on the exact argument
      assert!(own.error() != 0.);
      assert_eq!(tagged.contribution(Tag(2)), own.error());
      assert!(rel(tagged.contribution(Tag(1)), scalar.error() - own.error()) < 1e-12);
    }
  }

  #[test]
  fn elementary_rounding_goes_to_site() {
    let store = Store::<f32>::new();
    let x = tf32::exact(&store, 0.7);
    let _site = store.enter(Tag(3));
    let y = x.exp();
    assert_eq!(y.contribution(Tag(3)), sf32::from(0.7_f32).exp().error());
    assert_eq!(y.contribution(Tag::ROOT), 0.);
  }

  #[test]
  fn pow() {
    let store = Store::<f64>::new();
    let x = {
      let _site = store.enter(Tag(1));
      tf64::new(&store, 2., 1e-12)
    };
    let y = {
      let _site = store.enter(Tag(2));
      tf64::new(&store, 1. / 3., -1e-13)
    };
    let _site = store.enter(Tag(3));
    let z = x.powf(&y);
    let scalar = sf64::new(2., 1e-12).powf(sf64::new(1. / 3., -1e-13));
    assert_eq!(z.value(), scalar.value());
    assert!(rel(z.error(), scalar.error()) < 1e-12);
    // Own rounding, on the exact arguments
    let own = sf64::from(2_i32).powf(1_f64 / 3.);
    assert!(own.error() != 0.);
    assert_eq!(z.contribution(Tag(3)), own.error());
    // d/dx x^y = y x^(y-1), d/dy x^y = x^y ln(x)
    assert!(rel(z.contribution(Tag(1)), z.value() / 3. / 2. * 1e-12) < 1e-6);
    assert!(rel(z.contribution(Tag(2)), z.value() * 2_f64.ln() * -1e-13) < 1e-6);
    assert_eq!(z.contribution(Tag::ROOT), 0.);

    let w = x.powf_raw(10.);
    assert_eq!(w.value(), 1024.);
    assert!(rel(w.contribution(Tag(1)), 5120e-12) < 1e-6);
    assert_eq!(w.contribution(Tag(3)), 0.);
    assert!(rel(w.error(), sf64::new(2., 1e-12).powf(10_i32).error()) < 1e-15);
  }

  #[cfg(feature = "diagnostics")]
  #[test]
  fn unstable_pow() {
    use crate::counters;
    let store = Store::<f64>::new();
    let noise = tf64::new(&store, 1e-3, 1.);
    let fine = tf64::exact(&store, 2.);
    let ((), counts) = counters::observe(|| {
      let _ = noise.powf(&fine);
      let _ = fine.powf(&noise);
      let _ = fine.powf_raw(0.5);
    });
    assert_eq!(counts.unstable_powers, 2);
    assert_eq!(counts.instabilities, 2);
  }

  #[test]
  fn fma() {
    let store = Store::<f64>::new();
    let a = tf64::new(&store, 0.1, 1e-18);
    let b = tf64::exact(&store, 10.);
    let c = tf64::exact(&store, -1.);
    let _site = store.enter(Tag(1));
    let x = a.mul_add(&b, &c);
    let scalar = sf64::new(0.1, 1e-18).mul_add(10_f64, -1_f64);
    assert_eq!(x.value(), scalar.value());
    assert_eq!(x.contribution(Tag::ROOT), 10. * 1e-18);
    assert_eq!(x.contribution(Tag(1)), 0.);
    assert_eq!(x.error(), scalar.error());
  }

  #[test]
  fn comparisons() {
    let store = Store::<f64>::new();
    let a = tf64::new(&store, 1., 1e-3);
    let b = tf64::exact(&store, 2.);
    assert!(a < b);
    assert!(a != b);
    assert!(a == 1_f64);
    assert!(b > 1.5_f64);
    assert_eq!(a.clone().min(b.clone()).value(), 1.);
    assert_eq!(a.clone().max(b.clone()).value(), 2.);
    let m = a.clone().min(tf64::exact(&store, 1.));
    assert_eq!(m.error(), 1e-3);
  }

  #[cfg(feature = "diagnostics")]
  #[test]
  fn unstable_branching() {
    use crate::counters;
    let store = Store::<f64>::new();
    let a = tf64::new(&store, 1., 0.01);
    let b = tf64::new(&store, 1.001, -0.01);
    let ((), counts) = counters::observe(|| {
      let _ = a == b;
      let _ = a < b;
      let _ = a >= b;
      let _ = a.clone().max(b.clone());
    });
    assert_eq!(counts.unstable_branchings, 4);
    let ((), counts) = counters::observe(|| {
      let _ = a < tf64::exact(&store, 2.);
    });
    assert!(counts.is_clean());
  }
}
