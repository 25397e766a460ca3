use super::Float;

/// The promotion table for mixed-type arithmetic: `Lhs: Promote<Rhs>` says that combining an `Lhs`
/// with an `Rhs` yields a result in working precision [`Output`](Promote::Output), the same type
/// the usual numeric promotion rules would pick for the underlying values.
///
/// | lhs \ rhs | `f32` | `f64` | `i32` |
/// |-----------|-------|-------|-------|
/// | `f32`     | `f32` | `f64` | `f32` |
/// | `f64`     | `f64` | `f64` | `f64` |
/// | `i32`     | `f32` | `f64` |       |
///
/// Widening between floats is exact. An `i32` that is not exactly representable in the result
/// type is rounded, just like an `as` cast.
///
/// This is a *sealed* trait.
pub trait Promote<Rhs>: Copy + Sealed {
  type Output: Float;

  /// Convert the left-hand operand to the common type.
  fn lhs(self) -> Self::Output;

  /// Convert the right-hand operand to the common type.
  fn rhs(rhs: Rhs) -> Self::Output;
}

/// A host number that shadow numbers can be mixed with (`f32`, `f64`, `i32`).
///
/// This is a *sealed* trait.
pub trait Scalar: Copy + Sealed {
  /// The additive identity, used as the (exact) error of a raw scalar.
  const ZERO: Self;
}

pub trait Sealed {}
impl Sealed for f32 {}
impl Sealed for f64 {}
impl Sealed for i32 {}

impl Scalar for f32 { const ZERO: Self = 0.; }
impl Scalar for f64 { const ZERO: Self = 0.; }
impl Scalar for i32 { const ZERO: Self = 0; }

/// One row of the table.
macro_rules! promote {
  ($lhs:ty, $rhs:ty => $out:ty) => {
    impl Promote<$rhs> for $lhs {
      type Output = $out;

      #[inline]
      #[allow(clippy::unnecessary_cast)]
      fn lhs(self) -> $out { self as $out }

      #[inline]
      #[allow(clippy::unnecessary_cast)]
      fn rhs(rhs: $rhs) -> $out { rhs as $out }
    }
  };
}

promote!{f32, f32 => f32}
promote!{f32, f64 => f64}
promote!{f32, i32 => f32}
promote!{f64, f32 => f64}
promote!{f64, f64 => f64}
promote!{f64, i32 => f64}
promote!{i32, f32 => f32}
promote!{i32, f64 => f64}
