//! This crate provides *shadow numbers*: self-validating floating point numbers that carry, next
//! to their value, a running estimate of the rounding error they have accumulated.
//!
//! # Introduction
//!
//! A floating point computation rounds at almost every step, and the errors compound silently:
//! a program may print 17 confident-looking digits of which none are right. A shadow number
//! computes exactly the same value as the native float would (same operations, same roundings,
//! same special values), but also keeps a second number, the estimated *error*, such that
//! `value + error` is (to first order) the result the computation would have had in exact
//! arithmetic. From those two numbers it can tell how many digits of the value are significant.
//!
//! The error of each basic operation is recovered exactly with *error-free transformations*
//! ([`eft`]) and propagated through the operations like a first-order derivative. Along the way
//! the operators watch for the classic numerical instabilities ([`detect`]): catastrophic
//! cancellation, operations on numbers with no significant digits left, and comparisons whose
//! outcome is decided by rounding noise. These are tallied in per-thread [`counters`].
//!
//! # Usage
//!
//! ```
//! use shadow_float::{sf32, sf64, counters};
//!
//! // Create shadow numbers from native floats or ints; they start with no error.
//! let a = sf64::from(0.1);
//! let b = sf64::from(3_i32);
//!
//! // Compute with the usual operators and functions, mixing precisions and raw scalars freely.
//! let c = (a * b - 0.3_f64).abs().sqrt();
//! let d: sf64 = sf32::from(1.5_f32) * c;
//!
//! // The value is what `f64` would have computed; the error is how far off it is.
//! assert_eq!(c.value(), (0.1_f64 * 3. - 0.3).abs().sqrt());
//! assert!(c.error() != 0.);
//!
//! // Display only shows significant digits.
//! let x = sf64::from(1.) + 1e16_f64 - 1e16_f64;
//! assert_eq!(x.value(), 0.);  // Should be 1!
//! assert_eq!(x.to_string(), "@.0");  // No significant digit left
//! # let _ = d;
//!
//! // Ask what went wrong.
//! let (_, counts) = counters::observe(|| sf64::from(1.) + 1e16_f64 - 1e16_f64);
//! assert_eq!(counts.cancellations, 1);
//! ```
//!
//! A [tagged](Tagged) variant goes further and attributes the error to the code sites that
//! introduced it.
//!
//! # Features
//!
//! - `diagnostics` (default): compile in the instability checks and counters. Without it the
//!   operators only compute value and error, which is faster; the predicates in [`detect`] remain
//!   available.

/// The machine floating point types, and the promotion rules between them.
mod float;

pub mod eft;
pub mod detect;
pub mod counters;
pub mod digits;

/// The scalar shadow number.
mod shadow;

/// The tagged shadow number, and the store of its error vectors.
mod tagged;

pub use float::{Float, Promote, Scalar};
pub use shadow::{Operand, Shadow, Untrustworthy};
pub use tagged::{Site, Store, Tag, Tagged};
pub use counters::{Instability, InstabilityCounters, SharedCounters};

/// Shadow number with single precision (`f32`) values and errors.
#[allow(non_camel_case_types)]
pub type sf32 = Shadow<f32>;

/// Shadow number with double precision (`f64`) values and errors.
#[allow(non_camel_case_types)]
pub type sf64 = Shadow<f64>;

/// Tagged shadow number with single precision (`f32`) values and errors.
#[allow(non_camel_case_types)]
pub type tf32 = Tagged<f32>;

/// Tagged shadow number with double precision (`f64`) values and errors.
#[allow(non_camel_case_types)]
pub type tf64 = Tagged<f64>;


#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x400} else {0x4000};
