use super::{Float, Function, Sealed, precise};

/// Implementation of almost all functions; the extended-tier ones differ per type.
macro_rules! impl_common {
  ($float:ident) => {
    const ZERO: Self = 0.;
    const ONE: Self = 1.;
    const TWO: Self = 2.;
    const HALF: Self = 0.5;
    const TEN: Self = 10.;
    const INFINITY: Self = $float::INFINITY;
    const NAN: Self = $float::NAN;

    #[inline]
    fn of_i32(x: i32) -> Self { x as $float }

    #[inline]
    fn to_f64(self) -> f64 { self.into() }

    #[inline]
    fn mul_add(self, a: Self, b: Self) -> Self { $float::mul_add(self, a, b) }

    #[inline]
    fn abs(self) -> Self { $float::abs(self) }

    #[inline]
    fn floor(self) -> Self { $float::floor(self) }

    #[inline]
    fn log10(self) -> Self { $float::log10(self) }

    #[inline]
    fn sqrt(self) -> Self { $float::sqrt(self) }

    #[inline]
    fn cbrt(self) -> Self { $float::cbrt(self) }

    #[inline]
    fn exp(self) -> Self { $float::exp(self) }

    #[inline]
    fn sin(self) -> Self { $float::sin(self) }

    #[inline]
    fn cos(self) -> Self { $float::cos(self) }

    #[inline]
    fn tan(self) -> Self { $float::tan(self) }

    #[inline]
    fn powf(self, other: Self) -> Self { $float::powf(self, other) }

    #[inline]
    fn is_finite(self) -> bool { $float::is_finite(self) }

    #[inline]
    fn is_nan(self) -> bool { $float::is_nan(self) }
  };
}

impl Sealed for f32 {
  impl_common!{f32}

  #[inline]
  fn sqrt_abs_extended(self) -> Self {
    f64::from(self).abs().sqrt() as f32
  }

  #[inline]
  fn correction(f: Function, value: Self, error: Self, result: Self) -> Self {
    precise::recompute_f32(f, value, error, result)
  }

  #[inline]
  fn pow_correction(x: Self, ex: Self, y: Self, ey: Self, result: Self) -> Self {
    precise::recompute_pow_f32(x, ex, y, ey, result)
  }
}

impl Sealed for f64 {
  impl_common!{f64}

  #[inline]
  fn sqrt_abs_extended(self) -> Self {
    self.abs().sqrt()
  }

  #[inline]
  fn correction(f: Function, value: Self, error: Self, result: Self) -> Self {
    precise::difference_f64(f, value, error, result)
  }

  #[inline]
  fn pow_correction(x: Self, ex: Self, y: Self, ey: Self, result: Self) -> Self {
    precise::difference_pow_f64(x, ex, y, ey, result)
  }
}

impl Float for f32 {}
impl Float for f64 {}
