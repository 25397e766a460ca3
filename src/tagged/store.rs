use core::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::Float;

/// Identifies a code site: errors introduced by the operations executed while a site is active
/// are attributed to its tag. Tags index a dense vector, so they should be small integers; being
/// 16 bits wide bounds every vector to `u16::MAX + 1` entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u16);

impl Tag {
  /// The site that is active when no other has been [entered](Store::enter).
  pub const ROOT: Self = Self(0);

  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }
}

impl core::fmt::Display for Tag {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

struct Pool<F> {
  free: RefCell<Vec<Vec<F>>>,
  site: Cell<Tag>,
}

/// The store behind a family of [`Tagged`](crate::Tagged) numbers: a free list of error vectors,
/// recycled as the numbers are created and dropped, and the currently active [`Tag`].
///
/// A store belongs to the thread that created it. Handles are cheap reference-counted clones, and
/// are neither `Send` nor `Sync`, so a store (or a number attached to one) can never reach another
/// thread; each worker of a parallel computation creates its own.
///
/// ```compile_fail
/// # use shadow_float::Store;
/// let store = Store::<f64>::new();
/// std::thread::spawn(move || drop(store));
/// ```
#[derive(Clone)]
pub struct Store<F: Float>(Rc<Pool<F>>);

impl<F: Float> Store<F> {
  pub fn new() -> Self {
    Self(Rc::new(Pool { free: RefCell::new(Vec::new()), site: Cell::new(Tag::ROOT) }))
  }

  /// An empty vector, recycled from the free list if there is one (capacity retained).
  pub fn acquire(&self) -> Vec<F> {
    let vector = self.0.free.borrow_mut().pop().unwrap_or_default();
    debug_assert!(vector.is_empty());
    vector
  }

  /// Clear `vector` and put it on the free list.
  pub fn release(&self, mut vector: Vec<F>) {
    vector.clear();
    self.0.free.borrow_mut().push(vector);
  }

  /// The number of vectors on the free list.
  pub fn idle(&self) -> usize {
    self.0.free.borrow().len()
  }

  /// The active site.
  pub fn site(&self) -> Tag {
    self.0.site.get()
  }

  /// Make `tag` the active site until the returned guard is dropped, at which point the
  /// previously active site is restored. Sites nest.
  ///
  /// ```
  /// # use shadow_float::{Store, Tag};
  /// let store = Store::<f64>::new();
  /// {
  ///   let _site = store.enter(Tag(3));
  ///   assert_eq!(store.site(), Tag(3));
  /// }
  /// assert_eq!(store.site(), Tag::ROOT);
  /// ```
  pub fn enter(&self, tag: Tag) -> Site<'_, F> {
    let previous = self.0.site.replace(tag);
    Site { store: self, previous }
  }

  /// Whether `self` and `other` are handles to the same store.
  pub fn same(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl<F: Float> Default for Store<F> {
  fn default() -> Self {
    Self::new()
  }
}

impl<F: Float> core::fmt::Debug for Store<F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Store")
      .field("site", &self.site())
      .field("idle", &self.idle())
      .finish()
  }
}

/// Guard returned by [`Store::enter`].
#[must_use = "the site is left as soon as the guard is dropped"]
pub struct Site<'a, F: Float> {
  store: &'a Store<F>,
  previous: Tag,
}

impl<F: Float> Drop for Site<'_, F> {
  fn drop(&mut self) {
    self.store.0.site.set(self.previous);
  }
}
