use super::*;
use crate::{Instability, eft};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

//
// The kernels take both operands by reference and return a fresh number, whose vector comes from
// the store of the left operand. Owned operands are dropped (and their vectors recycled) by the
// operator impls.
//

impl<F: Float> Tagged<F> {
  pub(crate) fn add(&self, other: &Self) -> Self {
    let value = self.value + other.value;
    let rounding = eft::two_sum(self.value, other.value, value);
    let operands = [&self.errors[..], &other.errors[..]];
    let result = Self::combine(&self.store, value, operands, rounding, |[a, b]| a + b);
    detect::watch(Instability::Cancellation, || {
      let reference = detect::min_precision(self.to_shadow(), other.to_shadow());
      detect::is_cancellation(reference, value, result.error())
    });
    result
  }

  pub(crate) fn sub(&self, other: &Self) -> Self {
    let value = self.value - other.value;
    let rounding = eft::two_sum(self.value, -other.value, value);
    let operands = [&self.errors[..], &other.errors[..]];
    let result = Self::combine(&self.store, value, operands, rounding, |[a, b]| a - b);
    detect::watch(Instability::Cancellation, || {
      let reference = detect::min_precision(self.to_shadow(), other.to_shadow());
      detect::is_cancellation(reference, value, result.error())
    });
    result
  }

  /// Per tag, `a.v·b.e[t] + b.v·a.e[t]`.
  pub(crate) fn mul(&self, other: &Self) -> Self {
    let (x, y) = (self.value, other.value);
    let value = x * y;
    let rounding = eft::fast_two_prod(x, y, value);
    let operands = [&self.errors[..], &other.errors[..]];
    let result = Self::combine(&self.store, value, operands, rounding, |[a, b]| x.mul_add(b, y * a));
    detect::watch(Instability::Multiplication, || {
      self.non_significant() && other.non_significant()
    });
    result
  }

  /// Per tag, `(a.e[t] - q·b.e[t]) / (b.v + b.e)`, where `b.e` is the total error of the divisor.
  /// The remainder of the native division is attributed to the active site.
  pub(crate) fn div(&self, other: &Self) -> Self {
    let value = self.value / other.value;
    let remainder = -other.value.mul_add(value, -self.value);
    let divisor = other.value + other.error();
    let operands = [&self.errors[..], &other.errors[..]];
    let result = Self::combine(&self.store, value, operands, remainder / divisor, |[a, b]| {
      -value.mul_add(b, -a) / divisor
    });
    detect::watch(Instability::Division, || other.non_significant());
    result
  }
}

impl<F: Float> Neg for Tagged<F> {
  type Output = Self;

  /// Exact; the vector is reused.
  fn neg(mut self) -> Self {
    self.value = -self.value;
    for e in &mut self.errors {
      *e = -*e;
    }
    self
  }
}

impl<F: Float> Neg for &Tagged<F> {
  type Output = Tagged<F>;

  fn neg(self) -> Tagged<F> {
    -self.clone()
  }
}

impl<F: Float> Tagged<F> {
  /// The absolute value; like negation, exact. See [`Shadow::abs`].
  pub fn abs(self) -> Self {
    let mut x = if self.value < F::ZERO { -self } else { self };
    x.value = x.value.abs();
    x
  }
}

/// Helper macro for implementing a binary operator between tagged numbers (owned or borrowed) and
/// raw values of the working precision, on either side. Everything is handed to the inherent
/// kernel `$name` by reference; a raw value becomes an exact tagged number first.
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident) => {
    impl<F: Float> $trait<Tagged<F>> for Tagged<F> {
      type Output = Tagged<F>;
      #[inline]
      fn $name(self, rhs: Tagged<F>) -> Tagged<F> {
        Tagged::$name(&self, &rhs)
      }
    }

    impl<F: Float> $trait<&Tagged<F>> for Tagged<F> {
      type Output = Tagged<F>;
      #[inline]
      fn $name(self, rhs: &Tagged<F>) -> Tagged<F> {
        Tagged::$name(&self, rhs)
      }
    }

    impl<F: Float> $trait<Tagged<F>> for &Tagged<F> {
      type Output = Tagged<F>;
      #[inline]
      fn $name(self, rhs: Tagged<F>) -> Tagged<F> {
        Tagged::$name(self, &rhs)
      }
    }

    impl<F: Float> $trait<&Tagged<F>> for &Tagged<F> {
      type Output = Tagged<F>;
      #[inline]
      fn $name(self, rhs: &Tagged<F>) -> Tagged<F> {
        Tagged::$name(self, rhs)
      }
    }

    impl<F: Float> $trait<F> for Tagged<F> {
      type Output = Tagged<F>;
      #[inline]
      fn $name(self, rhs: F) -> Tagged<F> {
        Tagged::$name(&self, &self.lift(rhs))
      }
    }

    impl<F: Float> $trait<F> for &Tagged<F> {
      type Output = Tagged<F>;
      #[inline]
      fn $name(self, rhs: F) -> Tagged<F> {
        Tagged::$name(self, &self.lift(rhs))
      }
    }

    impl<F: Float> $trait_assign<Tagged<F>> for Tagged<F> {
      #[inline]
      fn $name_assign(&mut self, rhs: Tagged<F>) {
        *self = Tagged::$name(self, &rhs)
      }
    }

    impl<F: Float> $trait_assign<&Tagged<F>> for Tagged<F> {
      #[inline]
      fn $name_assign(&mut self, rhs: &Tagged<F>) {
        *self = Tagged::$name(self, rhs)
      }
    }

    impl<F: Float> $trait_assign<F> for Tagged<F> {
      #[inline]
      fn $name_assign(&mut self, rhs: F) {
        let rhs = self.lift(rhs);
        *self = Tagged::$name(self, &rhs)
      }
    }

    mk_ops!{@scalar $trait, $name, f32}
    mk_ops!{@scalar $trait, $name, f64}
  };

  // Raw value on the left; the result is attached to the store of the right operand.
  (@scalar $trait:ident, $name:ident, $lhs:ty) => {
    impl $trait<Tagged<$lhs>> for $lhs {
      type Output = Tagged<$lhs>;
      #[inline]
      fn $name(self, rhs: Tagged<$lhs>) -> Tagged<$lhs> {
        Tagged::$name(&rhs.lift(self), &rhs)
      }
    }

    impl $trait<&Tagged<$lhs>> for $lhs {
      type Output = Tagged<$lhs>;
      #[inline]
      fn $name(self, rhs: &Tagged<$lhs>) -> Tagged<$lhs> {
        Tagged::$name(&rhs.lift(self), rhs)
      }
    }
  };
}

mk_ops!{Add, AddAssign, add, add_assign}
mk_ops!{Sub, SubAssign, sub, sub_assign}
mk_ops!{Mul, MulAssign, mul, mul_assign}
mk_ops!{Div, DivAssign, div, div_assign}

impl<F: Float> core::iter::Sum for Tagged<F> {
  /// Left-to-right sum, attached to the store of the first element. The sum of no elements is an
  /// exact zero attached to a new store; fold from [`Tagged::zero`] to sum into a given one.
  fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
    match iter.next() {
      Some(first) => iter.fold(first, |acc, x| Tagged::add(&acc, &x)),
      None => Self::zero(&Store::new()),
    }
  }
}

impl<'a, F: Float> core::iter::Sum<&'a Tagged<F>> for Tagged<F> {
  fn sum<I: Iterator<Item = &'a Self>>(mut iter: I) -> Self {
    match iter.next() {
      Some(first) => iter.fold(first.clone(), |acc, x| Tagged::add(&acc, x)),
      None => Self::zero(&Store::new()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{sf64, tf32, tf64};

  /// Every combination of operand types must be accepted.
  #[allow(dead_code)]
  fn ops(store: &Store<f64>) {
    let mut a = tf64::exact(store, 1.);
    let b = tf64::exact(store, 2.);
    let _: tf64 = a.clone() + b.clone();
    let _: tf64 = &a - b.clone();
    let _: tf64 = a.clone() * &b;
    let _: tf64 = &a / &b;
    let _: tf64 = &a + 2_f64;
    let _: tf64 = a.clone() - 2_f64;
    let _: tf64 = 2_f64 * &a;
    let _: tf64 = 2_f64 / a.clone();
    a += &b;
    a -= b.clone();
    a *= 2_f64;
    a /= &b;
    let c = tf32::exact(&Store::new(), 1.);
    let _: tf32 = 2_f32 + &c;
  }

  /// The tagged total follows the scalar shadow number.
  #[test]
  fn matches_scalar() {
    let store = Store::<f64>::new();
    let (a, b) = (tf64::new(&store, 0.1, 1e-18), tf64::new(&store, 0.3, -2e-18));
    let (sa, sb) = (sf64::new(0.1, 1e-18), sf64::new(0.3, -2e-18));
    let cases = [
      (&a + &b, sa + sb),
      (&a - &b, sa - sb),
      (&a * &b, sa * sb),
      (&a / &b, sa / sb),
      (&a * 3_f64 - 0.3_f64, sa * 3_f64 - 0.3_f64),
      (1_f64 / &b, 1_f64 / sb),
    ];
    for (tagged, scalar) in cases {
      assert_eq!(tagged.value(), scalar.value());
      // Same terms, summed in a different order
      assert!((tagged.error() - scalar.error()).abs() < 1e-31);
    }
  }

  #[test]
  fn attribution() {
    let store = Store::<f64>::new();
    let one = tf64::exact(&store, 1.);
    let third = {
      let _site = store.enter(Tag(1));
      &one / 3_f64
    };
    assert_eq!(third.contribution(Tag(1)), -3_f64.mul_add(1. / 3., -1.) / 3.);
    let x = {
      let _site = store.enter(Tag(2));
      &third + 1e16_f64
    };
    // The error of the division is carried along unchanged, and the addition adds its own
    assert_eq!(x.contribution(Tag(1)), third.error());
    assert_eq!(x.contribution(Tag(2)), eft::two_sum(1. / 3., 1e16, x.value()));
    assert_eq!(x.contribution(Tag::ROOT), 0.);
    let scalar = sf64::from(1_i32) / 3_i32 + 1e16_f64;
    assert_eq!(x.value(), scalar.value());
    assert_eq!(x.error(), scalar.error());
  }

  #[test]
  fn scaling() {
    let store = Store::<f64>::new();
    let x = {
      let _site = store.enter(Tag(1));
      tf64::new(&store, 2., 1e-10)
    };
    let _site = store.enter(Tag(2));
    // Multiplying by an exact power of two scales the contribution, and adds none
    let y = &x * 4_f64;
    assert_eq!(y.contribution(Tag(1)), 4e-10);
    assert_eq!(y.contribution(Tag(2)), 0.);
    let z = 1_f64 / &x;
    assert!((z.contribution(Tag(1)) + 1e-10 / 4.).abs() < 1e-20);
  }

  #[test]
  fn neg_abs() {
    let store = Store::<f64>::new();
    let x = tf64::new(&store, -2., 1e-3);
    let y = -&x;
    assert_eq!((y.value(), y.error()), (2., -1e-3));
    let z = x.abs();
    assert_eq!((z.value(), z.error()), (2., -1e-3));
    let w = z.abs();
    assert_eq!((w.value(), w.error()), (2., -1e-3));
    let zero = tf64::new(&store, -0., 1e-300).abs();
    assert!(zero.value().is_sign_positive());
    assert_eq!(zero.error(), 1e-300);
  }

  #[test]
  fn pool_reaches_steady_state() {
    let store = Store::<f64>::new();
    let mut acc = tf64::exact(&store, 0.);
    let x = tf64::exact(&store, 0.1);
    acc += &x;
    let idle = store.idle();
    for _ in 0 .. 100 {
      acc += &x;
      acc = acc * 1_f64;
    }
    assert_eq!(store.idle(), idle + 1);
    assert!(acc.error() != 0.);
  }

  #[test]
  fn sum() {
    let store = Store::<f64>::new();
    let xs: Vec<tf64> = (1 ..= 10_u16)
      .map(|i| {
        let _site = store.enter(Tag(i));
        tf64::exact(&store, 1.) / f64::from(i)
      })
      .collect();
    let scalar: sf64 = (1 ..= 10_i32).map(|i| sf64::from(1_i32) / i).sum();
    let _site = store.enter(Tag(11));
    let s: tf64 = xs.iter().sum();
    assert_eq!(s.value(), scalar.value());
    assert!((s.error() - scalar.error()).abs() < 1e-30);
    assert!(s.store().same(&store));
    // Each division's rounding is carried by its own site, the additions' by the active one
    assert_eq!(s.contribution(Tag(3)), xs[2].error());
    assert!(s.contribution(Tag(11)) != 0.);
    assert_eq!(s.contribution(Tag(1)), 0.);

    let owned: tf64 = xs.into_iter().sum();
    assert_eq!((owned.value(), owned.error()), (s.value(), s.error()));

    let from_zero = [0.1_f64, 0.2, 0.3].into_iter()
      .fold(tf64::zero(&store), |acc, x| acc + x);
    assert_eq!(from_zero.value(), 0.1 + 0.2 + 0.3);
    assert!(from_zero.store().same(&store));

    let empty: tf64 = core::iter::empty::<tf64>().sum();
    assert_eq!((empty.value(), empty.error()), (0., 0.));
    assert!(!empty.store().same(&store));
  }

  #[cfg(feature = "diagnostics")]
  #[test]
  fn instabilities_are_detected() {
    use crate::counters;
    let store = Store::<f64>::new();
    let (x, counts) = counters::observe(|| tf64::exact(&store, 1.) + 1e16_f64 - 1e16_f64);
    assert_eq!(x.value(), 0.);
    assert_eq!(counts.cancellations, 1);
    let noise = tf64::new(&store, 1e-3, 1e-2);
    let ((), counts) = counters::observe(|| {
      let _ = &noise * &noise;
      let _ = 1_f64 / &noise;
      let _ = &noise * 2_f64;
    });
    assert_eq!(counts.unstable_multiplications, 1);
    assert_eq!(counts.unstable_divisions, 1);
    assert_eq!(counts.instabilities, 2);
  }
}
