// ============================================================================
// Operator Macros
// std::ops forwarding onto the value types' inherent methods
// ============================================================================
//
// Binary operators are implemented for references only (`&a + &b`), so the
// inherent immutable methods (`a.add(&b)`) never get shadowed by a by-value
// trait method that would consume the receiver.

/// `&T op &T -> T` plus `T op= &T` / `T op= T`.
macro_rules! forward_ref_binops {
    ($T:ident; $($Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $method:ident, $assign:ident;)+) => {$(
        impl<'a, 'b> std::ops::$Op<&'b $T> for &'a $T {
            type Output = $T;

            #[inline]
            fn $op(self, rhs: &'b $T) -> $T {
                $T::$method(self, rhs)
            }
        }

        impl<'b> std::ops::$OpAssign<&'b $T> for $T {
            #[inline]
            fn $op_assign(&mut self, rhs: &'b $T) {
                self.$assign(rhs)
            }
        }

        impl std::ops::$OpAssign<$T> for $T {
            #[inline]
            fn $op_assign(&mut self, rhs: $T) {
                self.$assign(&rhs)
            }
        }
    )+};
}

/// `&T op i64 -> T` plus `T op= i64`.
macro_rules! forward_i64_binops {
    ($T:ident; $($Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $method:ident, $assign:ident;)+) => {$(
        impl<'a> std::ops::$Op<i64> for &'a $T {
            type Output = $T;

            #[inline]
            fn $op(self, rhs: i64) -> $T {
                $T::$method(self, rhs)
            }
        }

        impl std::ops::$OpAssign<i64> for $T {
            #[inline]
            fn $op_assign(&mut self, rhs: i64) {
                self.$assign(rhs)
            }
        }
    )+};
}

/// `-T` and `-&T` through a `negate` in-place method.
macro_rules! forward_neg {
    ($T:ident) => {
        impl std::ops::Neg for $T {
            type Output = $T;

            #[inline]
            fn neg(mut self) -> $T {
                self.negate();
                self
            }
        }

        impl<'a> std::ops::Neg for &'a $T {
            type Output = $T;

            #[inline]
            fn neg(self) -> $T {
                let mut out = self.clone();
                out.negate();
                out
            }
        }
    };
}
