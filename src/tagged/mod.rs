//! This module and its submodules contain the tagged shadow number, which does not just estimate
//! its error but breaks it down by the code site that introduced it.
//!
//! Instead of a single error, a tagged number carries a vector of *contributions*, indexed by
//! [`Tag`]: `errors[t]` is the part of the error that comes from roundings performed while site
//! `t` was [active](Store::enter). Each operation computes its value and rounding error exactly as
//! the scalar [`Shadow`](crate::Shadow) does, pushes the operands' contributions through the same
//! first-order formulas tag by tag, and adds its own rounding error at the active site. The total
//! error is the sum of the contributions.
//!
//! The vectors come from, and go back to, a [`Store`], so that a long computation does not
//! allocate at every step.
//!
//! ```
//! # use shadow_float::{Store, Tag, Tagged};
//! let store = Store::<f64>::new();
//! let x = Tagged::exact(&store, 1.);
//! let third = {
//!   let _site = store.enter(Tag(1));
//!   x / 3_f64
//! };
//! let y = {
//!   let _site = store.enter(Tag(2));
//!   &third * 3_f64 - 1_f64
//! };
//! assert_eq!(y.contribution(Tag::ROOT), 0.);
//! assert!(y.contribution(Tag(1)) != 0.);  // 1/3 was rounded
//! assert_eq!(y.error(), y.contribution(Tag(1)) + y.contribution(Tag(2)));
//! ```

use crate::{Float, Shadow, Untrustworthy, detect};

/// A floating point number in working precision `F`, together with a breakdown of its estimated
/// error by code site. See the [module documentation](self).
pub struct Tagged<F: Float> {
  pub(crate) value: F,
  pub(crate) errors: Vec<F>,
  pub(crate) store: Store<F>,
}

/// The error vectors and the active site.
mod store;
pub use store::{Site, Store, Tag};

/// Arithmetic operators.
mod ops;

/// Elementary functions, fused multiply-add, comparisons.
mod math;

/// The contribution at index `i`; vectors are implicitly padded with zeros.
#[inline]
fn at<F: Float>(errors: &[F], i: usize) -> F {
  errors.get(i).copied().unwrap_or(F::ZERO)
}

impl<F: Float> Tagged<F> {
  /// A number with no error, attached to `store`.
  pub fn exact(store: &Store<F>, value: F) -> Self {
    Self { value, errors: store.acquire(), store: store.clone() }
  }

  /// An exact zero attached to `store`; the starting point of a sum.
  #[inline]
  pub fn zero(store: &Store<F>) -> Self {
    Self::exact(store, F::ZERO)
  }

  /// A number `value` that is already off by `error` (see [`Shadow::new`]); the error is
  /// attributed to the active site of `store`.
  pub fn new(store: &Store<F>, value: F, error: F) -> Self {
    let mut errors = store.acquire();
    errors.resize(store.site().index() + 1, F::ZERO);
    errors[store.site().index()] = error;
    Self { value, errors, store: store.clone() }
  }

  /// An exact number attached to the same store as `self`.
  #[inline]
  pub(crate) fn lift(&self, value: F) -> Self {
    Self::exact(&self.store, value)
  }

  /// The number with value `value`, whose contributions are those of `operands` combined tag by
  /// tag with `f`, plus `own` (the rounding of the operation itself) at the active site.
  pub(crate) fn combine<const N: usize>(
    store: &Store<F>,
    value: F,
    operands: [&[F]; N],
    own: F,
    f: impl Fn([F; N]) -> F,
  ) -> Self {
    let site = store.site().index();
    let len = operands.iter().map(|e| e.len()).fold(site + 1, usize::max);
    let mut errors = store.acquire();
    errors.extend((0 .. len).map(|i| f(operands.map(|e| at(e, i)))));
    errors[site] += own;
    Self { value, errors, store: store.clone() }
  }

  /// The value, i.e. what a native float would have computed.
  #[inline]
  pub fn value(&self) -> F {
    self.value
  }

  /// The total estimated error: the sum of the contributions of all sites.
  pub fn error(&self) -> F {
    self.errors.iter().fold(F::ZERO, |acc, &e| acc + e)
  }

  /// The part of the error introduced while `tag` was the active site.
  #[inline]
  pub fn contribution(&self, tag: Tag) -> F {
    at(&self.errors, tag.index())
  }

  /// The nonzero contributions, by site.
  pub fn contributions(&self) -> impl Iterator<Item = (Tag, F)> + '_ {
    self.errors.iter().enumerate()
      .filter(|&(_, &e)| e != F::ZERO)
      // Indices never exceed the largest tag
      .map(|(i, &e)| (Tag(i as u16), e))
  }

  /// The site with the largest contribution in magnitude, if any site contributed.
  ///
  /// ```
  /// # use shadow_float::{Store, Tag, Tagged};
  /// let store = Store::<f64>::new();
  /// let x = Tagged::exact(&store, 0.1);
  /// let _site = store.enter(Tag(5));
  /// let y = &x + 1e16_f64 - 1e16_f64;
  /// assert_eq!(y.culprit(), Some(Tag(5)));
  /// ```
  pub fn culprit(&self) -> Option<Tag> {
    self.contributions()
      .fold(None, |best: Option<(Tag, F)>, (tag, e)| match best {
        Some((_, b)) if !(e.abs() > b.abs()) => best,
        _ => Some((tag, e)),
      })
      .map(|(tag, _)| tag)
  }

  /// The store this number is attached to.
  #[inline]
  pub fn store(&self) -> &Store<F> {
    &self.store
  }

  /// The scalar shadow number with the same value and total error.
  #[inline]
  pub fn to_shadow(&self) -> Shadow<F> {
    Shadow::new(self.value, self.error())
  }

  /// See [`Shadow::digits`].
  pub fn digits(&self) -> F {
    detect::significant_digits(self.value, self.error())
  }

  /// See [`Shadow::non_significant`].
  pub fn non_significant(&self) -> bool {
    detect::non_significant(self.value, self.error())
  }

  /// See [`Shadow::is_finite`].
  #[inline]
  pub fn is_finite(&self) -> bool {
    self.value.is_finite()
  }

  /// See [`Shadow::corrected`].
  pub fn corrected(&self) -> F {
    self.value + self.error()
  }

  /// See [`Shadow::trusted`].
  pub fn trusted(&self) -> Result<F, Untrustworthy<F>> {
    self.to_shadow().trusted()
  }
}

impl<F: Float> Drop for Tagged<F> {
  fn drop(&mut self) {
    self.store.release(core::mem::take(&mut self.errors));
  }
}

impl<F: Float> Clone for Tagged<F> {
  fn clone(&self) -> Self {
    let mut errors = self.store.acquire();
    errors.extend_from_slice(&self.errors);
    Self { value: self.value, errors, store: self.store.clone() }
  }
}

impl<F: Float> From<&Tagged<F>> for Shadow<F> {
  fn from(x: &Tagged<F>) -> Self {
    x.to_shadow()
  }
}

impl<F: Float> core::fmt::Display for Tagged<F> {
  /// As for [`Shadow`], according to the total error.
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&self.to_shadow(), f)
  }
}

impl<F: Float> core::fmt::Debug for Tagged<F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Tagged")
      .field("value", &self.value)
      .field("errors", &self.errors)
      .finish()
  }
}
