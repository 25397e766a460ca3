use super::*;
use crate::Float;
use crate::float::{Promote, Scalar};

/// Anything that can appear as an operand next to a [`Shadow`]: another shadow number (of any
/// working precision, owned or borrowed) or a raw host [`Scalar`], which is taken to be exact.
///
/// Binary operations promote both operands to the common working precision given by the
/// [`Promote`] table for their [`Kind`](Operand::Kind)s.
pub trait Operand: Copy {
  /// The row/column of the promotion table this operand falls in: the working precision of a
  /// shadow number, or the type of a raw scalar.
  type Kind: Copy;

  /// Split into value and error.
  fn parts(self) -> (Self::Kind, Self::Kind);
}

impl<F: Float> Operand for Shadow<F> {
  type Kind = F;

  #[inline]
  fn parts(self) -> (F, F) {
    (self.value, self.error)
  }
}

impl<F: Float> Operand for &Shadow<F> {
  type Kind = F;

  #[inline]
  fn parts(self) -> (F, F) {
    (self.value, self.error)
  }
}

impl<S: Scalar> Operand for S {
  type Kind = S;

  #[inline]
  fn parts(self) -> (S, S) {
    (self, S::ZERO)
  }
}

/// Bring two operands to their common working precision.
#[inline]
pub(crate) fn promote<A, B>(a: A, b: B) -> (
  Shadow<<A::Kind as Promote<B::Kind>>::Output>,
  Shadow<<A::Kind as Promote<B::Kind>>::Output>,
)
where
  A: Operand,
  B: Operand,
  A::Kind: Promote<B::Kind>,
{
  let (a_value, a_error) = a.parts();
  let (b_value, b_error) = b.parts();
  let a = Shadow {
    value: <A::Kind as Promote<B::Kind>>::lhs(a_value),
    error: <A::Kind as Promote<B::Kind>>::lhs(a_error),
  };
  let b = Shadow {
    value: <A::Kind as Promote<B::Kind>>::rhs(b_value),
    error: <A::Kind as Promote<B::Kind>>::rhs(b_error),
  };
  (a, b)
}

impl<F: Float> From<F> for Shadow<F> {
  /// An exact value: the error is zero.
  #[inline]
  fn from(value: F) -> Self {
    Self { value, error: F::ZERO }
  }
}

impl<F: Float> From<i32> for Shadow<F> {
  /// Converted as by `as`; if `value` is not representable in `F` the rounding error is **not**
  /// recorded, just like a raw `i32` operand in mixed arithmetic.
  #[inline]
  fn from(value: i32) -> Self {
    Self { value: F::of_i32(value), error: F::ZERO }
  }
}

impl From<Shadow<f32>> for Shadow<f64> {
  /// Widening is exact, for the value and for the error.
  #[inline]
  fn from(x: Shadow<f32>) -> Self {
    Self { value: x.value.into(), error: x.error.into() }
  }
}
