//! Instability counters.
//!
//! Every thread has its own set of counters, bumped by the arithmetic operators whenever one of
//! the [instability heuristics](crate::detect) fires (only with the `diagnostics` feature, which
//! is on by default). Since they are thread-local, counting never races and never costs more than
//! a non-atomic increment.
//!
//! To get totals for a multi-threaded computation, have each worker [`take`] its counts when it
//! finishes and merge them, either by summing [`InstabilityCounters`] directly or through a
//! [`SharedCounters`] that workers can [`merge`](SharedCounters::merge) into concurrently.
//!
//! ```
//! # use shadow_float::{sf64, counters};
//! let (x, counts) = counters::observe(|| sf64::from(1.) + 1e16_f64 - 1e16_f64);
//! assert_eq!(x.value(), 0.);
//! assert_eq!(counts.cancellations, 1);
//! assert_eq!(counts.instabilities, 1);
//! ```

use core::cell::Cell;
use core::sync::atomic::{AtomicU64, Ordering};

/// The kinds of numerical instability that are detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instability {
  /// An addition or subtraction (or the addition inside a fused multiply-add) lost more than
  /// [`CANCELLATION_DIGITS`](crate::detect::CANCELLATION_DIGITS) digits of relative precision.
  Cancellation,
  /// A multiplication of two numbers that both have no significant digits.
  Multiplication,
  /// A division by a number that has no significant digits.
  Division,
  /// An elementary function (`sqrt`, `cbrt`, `exp`, `sin`, `cos`, `tan`) applied to a number
  /// that has no significant digits.
  Function,
  /// A power where the base or the exponent has no significant digits.
  Power,
  /// A comparison (or `min`/`max`) whose outcome may have been decided by rounding noise.
  Branching,
}

impl core::fmt::Display for Instability {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::Cancellation => "cancellation",
      Self::Multiplication => "unstable multiplication",
      Self::Division => "unstable division",
      Self::Function => "unstable function",
      Self::Power => "unstable power",
      Self::Branching => "unstable branching",
    })
  }
}

/// A snapshot of the instability counters. `instabilities` is the total of all the others.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstabilityCounters {
  pub cancellations: u64,
  pub unstable_multiplications: u64,
  pub unstable_divisions: u64,
  pub unstable_functions: u64,
  pub unstable_powers: u64,
  pub unstable_branchings: u64,
  pub instabilities: u64,
}

impl InstabilityCounters {
  /// All zero.
  pub const ZERO: Self = Self {
    cancellations: 0,
    unstable_multiplications: 0,
    unstable_divisions: 0,
    unstable_functions: 0,
    unstable_powers: 0,
    unstable_branchings: 0,
    instabilities: 0,
  };

  /// The count for a given kind of instability.
  pub fn get(&self, kind: Instability) -> u64 {
    match kind {
      Instability::Cancellation => self.cancellations,
      Instability::Multiplication => self.unstable_multiplications,
      Instability::Division => self.unstable_divisions,
      Instability::Function => self.unstable_functions,
      Instability::Power => self.unstable_powers,
      Instability::Branching => self.unstable_branchings,
    }
  }

  /// `true` if no instability was recorded.
  pub fn is_clean(&self) -> bool {
    self.instabilities == 0
  }

  /// Add the counts of `other` into `self`.
  pub fn merge(&mut self, other: &Self) {
    self.cancellations += other.cancellations;
    self.unstable_multiplications += other.unstable_multiplications;
    self.unstable_divisions += other.unstable_divisions;
    self.unstable_functions += other.unstable_functions;
    self.unstable_powers += other.unstable_powers;
    self.unstable_branchings += other.unstable_branchings;
    self.instabilities += other.instabilities;
  }

  fn bump(&mut self, kind: Instability) {
    match kind {
      Instability::Cancellation => self.cancellations += 1,
      Instability::Multiplication => self.unstable_multiplications += 1,
      Instability::Division => self.unstable_divisions += 1,
      Instability::Function => self.unstable_functions += 1,
      Instability::Power => self.unstable_powers += 1,
      Instability::Branching => self.unstable_branchings += 1,
    }
    self.instabilities += 1;
  }
}

impl core::ops::AddAssign for InstabilityCounters {
  fn add_assign(&mut self, rhs: Self) {
    self.merge(&rhs)
  }
}

impl core::ops::Add for InstabilityCounters {
  type Output = Self;

  fn add(mut self, rhs: Self) -> Self {
    self.merge(&rhs);
    self
  }
}

impl core::iter::Sum for InstabilityCounters {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::ZERO, |acc, x| acc + x)
  }
}

impl core::fmt::Display for InstabilityCounters {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "{} instabilities ({} cancellations, {} unstable multiplications, {} unstable divisions, \
       {} unstable functions, {} unstable powers, {} unstable branchings)",
      self.instabilities,
      self.cancellations,
      self.unstable_multiplications,
      self.unstable_divisions,
      self.unstable_functions,
      self.unstable_powers,
      self.unstable_branchings,
    )
  }
}

thread_local! {
  static COUNTERS: Cell<InstabilityCounters> = const { Cell::new(InstabilityCounters::ZERO) };
}

/// Record one instability of `kind` on the current thread.
#[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
pub(crate) fn record(kind: Instability) {
  COUNTERS.with(|counters| {
    let mut c = counters.get();
    c.bump(kind);
    counters.set(c);
  });
  #[cfg(feature = "diagnostics")]
  log::trace!(target: "shadow_float::instability", "{kind} detected");
}

/// The current thread's counters.
pub fn snapshot() -> InstabilityCounters {
  COUNTERS.with(Cell::get)
}

/// The current thread's counters, resetting them to zero.
pub fn take() -> InstabilityCounters {
  COUNTERS.with(|counters| counters.replace(InstabilityCounters::ZERO))
}

/// Reset the current thread's counters to zero.
pub fn reset() {
  COUNTERS.with(|counters| counters.set(InstabilityCounters::ZERO))
}

/// Run `f`, and return its result along with the instabilities it caused on the current thread.
/// Counts recorded before the call are left in place (and do not show up in the returned counts).
pub fn observe<R>(f: impl FnOnce() -> R) -> (R, InstabilityCounters) {
  let before = take();
  let result = f();
  let during = take();
  COUNTERS.with(|counters| counters.set(before + during));
  (result, during)
}

/// Instability counters that can be shared across threads, to aggregate the thread-local counts
/// of a parallel computation.
///
/// ```
/// # use shadow_float::{sf64, counters, SharedCounters};
/// let shared = SharedCounters::new();
/// std::thread::scope(|s| {
///   for _ in 0..4 {
///     s.spawn(|| {
///       let _ = sf64::from(1.) + 1e16_f64 - 1e16_f64;
///       shared.merge(&counters::take());
///     });
///   }
/// });
/// assert_eq!(shared.snapshot().cancellations, 4);
/// ```
#[derive(Debug, Default)]
pub struct SharedCounters {
  cancellations: AtomicU64,
  unstable_multiplications: AtomicU64,
  unstable_divisions: AtomicU64,
  unstable_functions: AtomicU64,
  unstable_powers: AtomicU64,
  unstable_branchings: AtomicU64,
  instabilities: AtomicU64,
}

impl SharedCounters {
  pub const fn new() -> Self {
    Self {
      cancellations: AtomicU64::new(0),
      unstable_multiplications: AtomicU64::new(0),
      unstable_divisions: AtomicU64::new(0),
      unstable_functions: AtomicU64::new(0),
      unstable_powers: AtomicU64::new(0),
      unstable_branchings: AtomicU64::new(0),
      instabilities: AtomicU64::new(0),
    }
  }

  /// Add `counts` (typically the result of [`take`] on a worker thread) to the totals.
  pub fn merge(&self, counts: &InstabilityCounters) {
    self.cancellations.fetch_add(counts.cancellations, Ordering::Relaxed);
    self.unstable_multiplications.fetch_add(counts.unstable_multiplications, Ordering::Relaxed);
    self.unstable_divisions.fetch_add(counts.unstable_divisions, Ordering::Relaxed);
    self.unstable_functions.fetch_add(counts.unstable_functions, Ordering::Relaxed);
    self.unstable_powers.fetch_add(counts.unstable_powers, Ordering::Relaxed);
    self.unstable_branchings.fetch_add(counts.unstable_branchings, Ordering::Relaxed);
    self.instabilities.fetch_add(counts.instabilities, Ordering::Relaxed);
    #[cfg(feature = "diagnostics")]
    if !counts.is_clean() {
      log::debug!("merged {counts}");
    }
  }

  /// The totals so far. Merges that happen concurrently with this call may be partially included.
  pub fn snapshot(&self) -> InstabilityCounters {
    InstabilityCounters {
      cancellations: self.cancellations.load(Ordering::Relaxed),
      unstable_multiplications: self.unstable_multiplications.load(Ordering::Relaxed),
      unstable_divisions: self.unstable_divisions.load(Ordering::Relaxed),
      unstable_functions: self.unstable_functions.load(Ordering::Relaxed),
      unstable_powers: self.unstable_powers.load(Ordering::Relaxed),
      unstable_branchings: self.unstable_branchings.load(Ordering::Relaxed),
      instabilities: self.instabilities.load(Ordering::Relaxed),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bump_and_total() {
    let mut c = InstabilityCounters::ZERO;
    c.bump(Instability::Cancellation);
    c.bump(Instability::Branching);
    c.bump(Instability::Branching);
    assert_eq!(c.cancellations, 1);
    assert_eq!(c.get(Instability::Branching), 2);
    assert_eq!(c.get(Instability::Power), 0);
    assert_eq!(c.instabilities, 3);
    assert!(!c.is_clean());
  }

  #[test]
  fn thread_local_record() {
    reset();
    record(Instability::Division);
    record(Instability::Division);
    assert_eq!(snapshot().unstable_divisions, 2);
    assert_eq!(take().instabilities, 2);
    assert!(snapshot().is_clean());
  }

  #[test]
  fn observe_preserves_outer_counts() {
    reset();
    record(Instability::Function);
    let ((), inner) = observe(|| record(Instability::Power));
    assert_eq!(inner.unstable_powers, 1);
    assert_eq!(inner.unstable_functions, 0);
    let outer = take();
    assert_eq!(outer.unstable_functions, 1);
    assert_eq!(outer.unstable_powers, 1);
  }

  #[test]
  fn other_threads_do_not_interfere() {
    reset();
    std::thread::spawn(|| record(Instability::Multiplication)).join().unwrap();
    assert!(snapshot().is_clean());
  }

  #[test]
  fn shared_merge() {
    let shared = SharedCounters::new();
    let mut c = InstabilityCounters::ZERO;
    c.bump(Instability::Multiplication);
    shared.merge(&c);
    shared.merge(&c);
    assert_eq!(shared.snapshot(), c + c);
    assert_eq!([c, c, c].into_iter().sum::<InstabilityCounters>().instabilities, 3);
  }

  /// A parallel reduction: each task computes on its own thread's counters and store, and the
  /// counts are aggregated when it finishes.
  #[cfg(feature = "diagnostics")]
  #[test]
  fn parallel_reduction() {
    use crate::{Store, Tag, sf64, tf64};
    use rayon::prelude::*;

    const TASKS: u64 = 64;
    let shared = SharedCounters::new();
    let total: sf64 = (0 .. TASKS)
      .into_par_iter()
      .map(|_| {
        let lost = sf64::from(1.) + 1e16_f64 - 1e16_f64;
        let store = Store::<f64>::new();
        let tagged = {
          let _site = store.enter(Tag(1));
          tf64::exact(&store, 1.) + 1e16_f64 - 1e16_f64
        };
        assert_eq!(tagged.contribution(Tag(1)), 1.);
        shared.merge(&take());
        lost
      })
      .reduce(|| sf64::ZERO, |a, b| a + b);

    assert_eq!(total.value(), 0.);
    assert_eq!(total.error(), 64.);
    let counts = shared.snapshot();
    assert_eq!(counts.cancellations, 2 * TASKS);
    assert_eq!(counts.instabilities, 2 * TASKS);
  }

  #[test]
  fn display() {
    let mut c = InstabilityCounters::ZERO;
    c.bump(Instability::Cancellation);
    assert_eq!(
      c.to_string(),
      "1 instabilities (1 cancellations, 0 unstable multiplications, 0 unstable divisions, \
       0 unstable functions, 0 unstable powers, 0 unstable branchings)",
    );
  }
}
