//! Significant-digit reporter: render a value with only as many digits as its estimated error
//! justifies.
//!
//! A value with `d` significant digits (see [`significant_digits`](crate::detect::significant_digits))
//! is rendered in scientific notation with `min(17, ⌊d⌋)` significant digits. 17 digits are enough
//! to identify any `f64`, so that is also what a number with no error at all gets. A value with no
//! significant digit at all (`⌊d⌋ ≤ 0`, or NaN) is rendered as the sentinel [`NO_DIGITS`].
//!
//! ```
//! # use shadow_float::digits::render;
//! assert_eq!(render(3.14159_f64, 1e-3), "3.14e0");
//! assert_eq!(render(1.0_f64, 1.0), "@.0");
//! assert_eq!(render(0.5_f64, 0.), "5.0000000000000000e-1");
//! ```

use crate::{Float, detect};

/// Rendered in place of a value that has no significant digits.
pub const NO_DIGITS: &str = "@.0";

/// The most significant digits ever rendered.
pub const MAX_DIGITS: usize = 17;

/// How many significant digits of `value` to render given that it is off by `error`, or `None` if
/// there are none.
pub fn displayed<F: Float>(value: F, error: F) -> Option<usize> {
  let digits = detect::significant_digits(value, error).floor();
  if !(digits > F::ZERO) {
    None
  } else if digits >= F::of_i32(MAX_DIGITS as i32) {
    Some(MAX_DIGITS)
  } else {
    Some(digits.to_f64() as usize)
  }
}

/// A `(value, error)` pair that [`Display`](core::fmt::Display)s as only its significant digits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Digits<F: Float> {
  pub value: F,
  pub error: F,
}

impl<F: Float> Digits<F> {
  pub const fn new(value: F, error: F) -> Self {
    Self { value, error }
  }
}

impl<F: Float> core::fmt::Display for Digits<F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match displayed(self.value, self.error) {
      None => f.pad(NO_DIGITS),
      Some(digits) => write!(f, "{:.*e}", digits - 1, self.value),
    }
  }
}

/// Render `value` with only its significant digits, given that it is off by `error`.
pub fn render<F: Float>(value: F, error: F) -> String {
  Digits::new(value, error).to_string()
}
