use super::*;
use crate::float::Promote;
use crate::{Float, Instability, detect};

//
// Comparisons are decided by the values alone, exactly as the native comparison of the values
// would be. But since a program branches on their outcome, every comparison is also an
// opportunity to detect an *unstable branching*: if the two operands are equal to within their
// errors, the outcome may have been decided by rounding noise, and a more precise computation
// could have taken the other branch.
//

impl<F: Float> Shadow<F> {
  #[inline]
  fn watch_branching(self, other: Self) {
    detect::watch(Instability::Branching, || detect::is_unstable_branching(self, other));
  }

  #[inline]
  pub(crate) fn equals(self, other: Self) -> bool {
    self.watch_branching(other);
    self.value == other.value
  }

  #[inline]
  pub(crate) fn compare(self, other: Self) -> Option<core::cmp::Ordering> {
    self.watch_branching(other);
    self.value.partial_cmp(&other.value)
  }

  #[inline]
  pub(crate) fn minimum(self, other: Self) -> Self {
    self.watch_branching(other);
    if self.value <= other.value { self } else { other }
  }

  #[inline]
  pub(crate) fn maximum(self, other: Self) -> Self {
    self.watch_branching(other);
    if self.value >= other.value { self } else { other }
  }

  /// The operand with the smaller value, error included; `self` if they are equal, `other` if
  /// either value is NaN.
  ///
  /// Like a comparison, this may record an unstable branching.
  ///
  /// ```
  /// # use shadow_float::sf64;
  /// let x = sf64::new(1., 1e-17).min(2_i32);
  /// assert_eq!((x.value(), x.error()), (1., 1e-17));
  /// ```
  pub fn min<B: Operand>(self, other: B) -> Shadow<<F as Promote<B::Kind>>::Output>
  where
    F: Promote<B::Kind>,
  {
    let (a, b) = promote(self, other);
    a.minimum(b)
  }

  /// The operand with the larger value, error included; `self` if they are equal, `other` if
  /// either value is NaN.
  ///
  /// Like a comparison, this may record an unstable branching.
  pub fn max<B: Operand>(self, other: B) -> Shadow<<F as Promote<B::Kind>>::Output>
  where
    F: Promote<B::Kind>,
  {
    let (a, b) = promote(self, other);
    a.maximum(b)
  }
}

impl<F: Float, B: Operand> PartialEq<B> for Shadow<F>
where
  F: Promote<B::Kind>,
{
  #[inline]
  fn eq(&self, other: &B) -> bool {
    let (a, b) = promote(*self, *other);
    a.equals(b)
  }
}

impl<F: Float, B: Operand> PartialOrd<B> for Shadow<F>
where
  F: Promote<B::Kind>,
{
  #[inline]
  fn partial_cmp(&self, other: &B) -> Option<core::cmp::Ordering> {
    let (a, b) = promote(*self, *other);
    a.compare(b)
  }
}

/// Comparisons with a raw scalar on the left.
macro_rules! mk_cmp {
  ($lhs:ty) => {
    impl<F: Float> PartialEq<Shadow<F>> for $lhs
    where
      $lhs: Promote<F>,
    {
      #[inline]
      fn eq(&self, other: &Shadow<F>) -> bool {
        let (a, b) = promote(*self, other);
        a.equals(b)
      }
    }

    impl<F: Float> PartialOrd<Shadow<F>> for $lhs
    where
      $lhs: Promote<F>,
    {
      #[inline]
      fn partial_cmp(&self, other: &Shadow<F>) -> Option<core::cmp::Ordering> {
        let (a, b) = promote(*self, other);
        a.compare(b)
      }
    }
  };
}

mk_cmp!{f32}
mk_cmp!{f64}
mk_cmp!{i32}
