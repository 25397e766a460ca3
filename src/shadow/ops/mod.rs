use super::*;
use crate::float::Promote;

/// Addition and subtraction (both use the same error-free transformation, TwoSum).
mod add;

/// Multiplication.
mod mul;

/// Division.
mod div;

/// Helper macro for implementing a binary operator for all combinations of shadow numbers (owned
/// or borrowed, of any working precision) and raw scalars, on either side. Both operands are
/// promoted to their common working precision and handed to the inherent method `$name`.
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident) => {
    impl<F: crate::Float, B: Operand> $trait<B> for Shadow<F>
    where
      F: Promote<B::Kind>,
    {
      type Output = Shadow<<F as Promote<B::Kind>>::Output>;

      #[inline]
      fn $name(self, rhs: B) -> Self::Output {
        let (a, b) = promote(self, rhs);
        a.$name(b)
      }
    }

    impl<F: crate::Float, B: Operand> $trait<B> for &Shadow<F>
    where
      F: Promote<B::Kind>,
    {
      type Output = Shadow<<F as Promote<B::Kind>>::Output>;

      #[inline]
      fn $name(self, rhs: B) -> Self::Output {
        let (a, b) = promote(self, rhs);
        a.$name(b)
      }
    }

    impl<F: crate::Float, B: Operand> $trait_assign<B> for Shadow<F>
    where
      F: Promote<B::Kind, Output = F>,
    {
      #[inline]
      fn $name_assign(&mut self, rhs: B) {
        let (a, b) = promote(*self, rhs);
        *self = a.$name(b)
      }
    }

    $crate::shadow::ops::mk_ops!{@scalar $trait, $name, f32}
    $crate::shadow::ops::mk_ops!{@scalar $trait, $name, f64}
    $crate::shadow::ops::mk_ops!{@scalar $trait, $name, i32}
  };

  // Raw scalar on the left.
  (@scalar $trait:ident, $name:ident, $lhs:ty) => {
    impl<F: crate::Float> $trait<Shadow<F>> for $lhs
    where
      $lhs: Promote<F>,
    {
      type Output = Shadow<<$lhs as Promote<F>>::Output>;

      #[inline]
      fn $name(self, rhs: Shadow<F>) -> Self::Output {
        let (a, b) = promote(self, rhs);
        a.$name(b)
      }
    }

    impl<F: crate::Float> $trait<&Shadow<F>> for $lhs
    where
      $lhs: Promote<F>,
    {
      type Output = Shadow<<$lhs as Promote<F>>::Output>;

      #[inline]
      fn $name(self, rhs: &Shadow<F>) -> Self::Output {
        let (a, b) = promote(self, rhs);
        a.$name(b)
      }
    }
  };
}

pub(crate) use mk_ops;

/// Macro for instantiating the suite of tests for a binary operator of shadow numbers.
macro_rules! mk_tests {
  ($op:tt, $op_assign:tt) => {
    use crate::{sf32, sf64};

    /// Every combination of operand types must be accepted, with the promoted result type.
    #[allow(dead_code)]
    fn ops() {
      let mut a = sf64::ONE;
      let b = sf32::ONE;
      let _: sf64 = a $op a;
      let _: sf64 = &a $op a;
      let _: sf64 = a $op &a;
      let _: sf64 = &a $op &a;
      let _: sf64 = a $op b;
      let _: sf64 = b $op a;
      let _: sf32 = b $op b;
      let _: sf32 = b $op 2_f32;
      let _: sf64 = b $op 2_f64;
      let _: sf32 = b $op 2_i32;
      let _: sf64 = a $op 2_f32;
      let _: sf64 = a $op 2_i32;
      let _: sf32 = 2_f32 $op b;
      let _: sf64 = 2_f64 $op b;
      let _: sf32 = 2_i32 $op &b;
      let _: sf64 = 2_i32 $op a;
      let c = a;
      a $op_assign c;
      a $op_assign &c;
      a $op_assign b;
      a $op_assign 2_f64;
      a $op_assign 2_i32;
    }

    #[test]
    fn exact_operands_have_zero_error() {
      let x = sf64::from(6_i32) $op sf64::from(2_i32);
      assert_eq!(x.error(), 0.);
      assert_eq!(x.digits(), f64::INFINITY);
    }

    #[test]
    fn mixed_precision_matches_native() {
      // The value is always exactly what the native computation would give.
      let (a, b) = (0.1_f32, 0.3_f64);
      assert_eq!((sf32::from(a) $op sf64::from(b)).value(), f64::from(a) $op b);
      assert_eq!((sf32::from(a) $op b).value(), f64::from(a) $op b);
      assert_eq!((a $op sf64::from(b)).value(), f64::from(a) $op b);
      assert_eq!((sf32::from(a) $op 3_i32).value(), a $op 3_f32);
      assert_eq!((3_i32 $op sf32::from(a)).value(), 3_f32 $op a);
    }

    #[test]
    fn assign_matches_binary() {
      let a = sf64::new(0.7, 1e-17);
      let b = sf64::new(-0.3, 2e-17);
      let mut c = a;
      c $op_assign b;
      let d = a $op b;
      assert_eq!((c.value(), c.error()), (d.value(), d.error()));
    }
  };
}

pub(crate) use mk_tests;
