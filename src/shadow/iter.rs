use super::*;
use crate::Float;

impl<F: Float> core::iter::Sum for Shadow<F> {
  /// Left-to-right sum, exactly as a loop of `+=` would compute it (including the instability
  /// checks). The sum of no elements is zero, with no error.
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::ZERO, Self::add)
  }
}

impl<'a, F: Float> core::iter::Sum<&'a Shadow<F>> for Shadow<F> {
  fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
    iter.fold(Self::ZERO, |acc, x| acc.add(*x))
  }
}

impl<F: Float> core::iter::Product for Shadow<F> {
  /// Left-to-right product. The product of no elements is one, with no error.
  fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::ONE, Self::mul)
  }
}

impl<'a, F: Float> core::iter::Product<&'a Shadow<F>> for Shadow<F> {
  fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
    iter.fold(Self::ONE, |acc, x| acc.mul(*x))
  }
}
