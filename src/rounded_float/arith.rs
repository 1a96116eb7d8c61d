// ============================================================================
// Rounded Float Arithmetic
// Correctly rounded operations at the receiver's precision
// ============================================================================
//
// Division by zero and invalid operands never fail here: the engine returns
// an infinity or NaN and raises the sticky flag.

use super::{Rounded, RoundedFloat, RoundingMode, Ternary};
use crate::integer::Integer;
use crate::numeric::{NumericError, NumericResult, Precision};
use gmp_mpfr_sys::mpfr;
use std::cmp::Ordering;
use std::os::raw::c_long;

/// `exp` clamped into the engine's exponent argument type.
#[inline]
fn clamp_exponent(exp: i64) -> c_long {
    c_long::try_from(exp).unwrap_or(if exp < 0 { c_long::MIN } else { c_long::MAX })
}

impl RoundedFloat {
    // ========================================================================
    // Binary Operations
    // ========================================================================

    pub fn add(&self, rhs: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::add(dst, self.raw(), rhs.raw(), mode.to_engine())
        })
    }

    pub fn sub(&self, rhs: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::sub(dst, self.raw(), rhs.raw(), mode.to_engine())
        })
    }

    pub fn mul(&self, rhs: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::mul(dst, self.raw(), rhs.raw(), mode.to_engine())
        })
    }

    /// `x / 0` is a signed infinity (`0 / 0` is NaN) with the matching flag.
    pub fn div(&self, rhs: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::div(dst, self.raw(), rhs.raw(), mode.to_engine())
        })
    }

    pub fn assign_add(&mut self, rhs: &RoundedFloat, mode: RoundingMode) -> Ternary {
        let rnd = mode.to_engine();
        self.assign_binary(rhs, |dst, a, b| unsafe { mpfr::add(dst, a, b, rnd) })
    }

    pub fn assign_sub(&mut self, rhs: &RoundedFloat, mode: RoundingMode) -> Ternary {
        let rnd = mode.to_engine();
        self.assign_binary(rhs, |dst, a, b| unsafe { mpfr::sub(dst, a, b, rnd) })
    }

    pub fn assign_mul(&mut self, rhs: &RoundedFloat, mode: RoundingMode) -> Ternary {
        let rnd = mode.to_engine();
        self.assign_binary(rhs, |dst, a, b| unsafe { mpfr::mul(dst, a, b, rnd) })
    }

    pub fn assign_div(&mut self, rhs: &RoundedFloat, mode: RoundingMode) -> Ternary {
        let rnd = mode.to_engine();
        self.assign_binary(rhs, |dst, a, b| unsafe { mpfr::div(dst, a, b, rnd) })
    }

    /// `self^exponent`.
    pub fn pow(&self, exponent: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::pow(dst, self.raw(), exponent.raw(), mode.to_engine())
        })
    }

    pub fn pow_i64(&self, exponent: i64, mode: RoundingMode) -> Rounded<RoundedFloat> {
        match c_long::try_from(exponent) {
            Ok(e) => RoundedFloat::compute(self.precision(), |dst| unsafe {
                mpfr::pow_si(dst, self.raw(), e, mode.to_engine())
            }),
            Err(_) => RoundedFloat::compute(self.precision(), |dst| unsafe {
                mpfr::pow_z(dst, self.raw(), Integer::from(exponent).raw(), mode.to_engine())
            }),
        }
    }

    /// `self × a + b` with a single rounding.
    pub fn fma(&self, a: &RoundedFloat, b: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::fma(dst, self.raw(), a.raw(), b.raw(), mode.to_engine())
        })
    }

    /// `sqrt(self² + other²)` without intermediate overflow.
    pub fn hypot(&self, other: &RoundedFloat, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::hypot(dst, self.raw(), other.raw(), mode.to_engine())
        })
    }

    // ========================================================================
    // Roots
    // ========================================================================

    /// Square root; `sqrt(-0) = -0`.
    ///
    /// # Errors
    /// Returns `NegativeSquareRoot` for values below zero, including -∞.
    pub fn sqrt(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        if self.sign() == Some(Ordering::Less) {
            return Err(NumericError::NegativeSquareRoot);
        }
        Ok(RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::sqrt(dst, self.raw(), mode.to_engine())
        }))
    }

    /// Cube root, defined for every sign.
    pub fn cbrt(&self, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::cbrt(dst, self.raw(), mode.to_engine())
        })
    }

    // ========================================================================
    // Mixed i64 Operations
    // ========================================================================

    pub fn add_i64(&self, rhs: i64, mode: RoundingMode) -> Rounded<RoundedFloat> {
        let rnd = mode.to_engine();
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            match c_long::try_from(rhs) {
                Ok(v) => mpfr::add_si(dst, self.raw(), v, rnd),
                Err(_) => mpfr::add_z(dst, self.raw(), Integer::from(rhs).raw(), rnd),
            }
        })
    }

    pub fn sub_i64(&self, rhs: i64, mode: RoundingMode) -> Rounded<RoundedFloat> {
        let rnd = mode.to_engine();
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            match c_long::try_from(rhs) {
                Ok(v) => mpfr::sub_si(dst, self.raw(), v, rnd),
                Err(_) => mpfr::sub_z(dst, self.raw(), Integer::from(rhs).raw(), rnd),
            }
        })
    }

    pub fn mul_i64(&self, rhs: i64, mode: RoundingMode) -> Rounded<RoundedFloat> {
        let rnd = mode.to_engine();
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            match c_long::try_from(rhs) {
                Ok(v) => mpfr::mul_si(dst, self.raw(), v, rnd),
                Err(_) => mpfr::mul_z(dst, self.raw(), Integer::from(rhs).raw(), rnd),
            }
        })
    }

    pub fn div_i64(&self, rhs: i64, mode: RoundingMode) -> Rounded<RoundedFloat> {
        let rnd = mode.to_engine();
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            match c_long::try_from(rhs) {
                Ok(v) => mpfr::div_si(dst, self.raw(), v, rnd),
                Err(_) => mpfr::div_z(dst, self.raw(), Integer::from(rhs).raw(), rnd),
            }
        })
    }

    pub fn assign_add_i64(&mut self, rhs: i64, mode: RoundingMode) -> Ternary {
        let out = self.add_i64(rhs, mode);
        *self = out.value;
        out.ternary
    }

    pub fn assign_sub_i64(&mut self, rhs: i64, mode: RoundingMode) -> Ternary {
        let out = self.sub_i64(rhs, mode);
        *self = out.value;
        out.ternary
    }

    pub fn assign_mul_i64(&mut self, rhs: i64, mode: RoundingMode) -> Ternary {
        let out = self.mul_i64(rhs, mode);
        *self = out.value;
        out.ternary
    }

    pub fn assign_div_i64(&mut self, rhs: i64, mode: RoundingMode) -> Ternary {
        let out = self.div_i64(rhs, mode);
        *self = out.value;
        out.ternary
    }

    /// `lhs - rhs` rounded to `precision`.
    pub fn i64_sub(lhs: i64, rhs: &RoundedFloat, precision: Precision, mode: RoundingMode) -> Rounded<RoundedFloat> {
        let rnd = mode.to_engine();
        match c_long::try_from(lhs) {
            Ok(v) => RoundedFloat::compute(precision, |dst| unsafe { mpfr::si_sub(dst, v, rhs.raw(), rnd) }),
            Err(_) => {
                let lhs = RoundedFloat::from_i64(lhs, Precision::WORD, RoundingMode::Nearest).value;
                RoundedFloat::compute(precision, |dst| unsafe { mpfr::sub(dst, lhs.raw(), rhs.raw(), rnd) })
            }
        }
    }

    /// `lhs / rhs` rounded to `precision`.
    pub fn i64_div(lhs: i64, rhs: &RoundedFloat, precision: Precision, mode: RoundingMode) -> Rounded<RoundedFloat> {
        let rnd = mode.to_engine();
        match c_long::try_from(lhs) {
            Ok(v) => RoundedFloat::compute(precision, |dst| unsafe { mpfr::si_div(dst, v, rhs.raw(), rnd) }),
            Err(_) => {
                let lhs = RoundedFloat::from_i64(lhs, Precision::WORD, RoundingMode::Nearest).value;
                RoundedFloat::compute(precision, |dst| unsafe { mpfr::div(dst, lhs.raw(), rhs.raw(), rnd) })
            }
        }
    }

    // ========================================================================
    // Sign
    // ========================================================================

    /// Flip the sign in place; exact.
    pub fn negate(&mut self) {
        let p = self.raw_mut();
        unsafe { mpfr::neg(p, p, mpfr::rnd_t::RNDN) };
    }

    /// Absolute value at the same precision; exact.
    pub fn abs(&self) -> RoundedFloat {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::abs(dst, self.raw(), mpfr::rnd_t::RNDN)
        })
        .value
    }

    // ========================================================================
    // Powers of Two
    // ========================================================================

    /// `self × 2^exp`; a negative `exp` divides. Rounds only on overflow or
    /// underflow.
    pub fn mul_pow2(&self, exp: i64, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::mul_2si(dst, self.raw(), clamp_exponent(exp), mode.to_engine())
        })
    }

    /// # Errors
    /// Returns `InvalidExponent` for negative `exp`.
    pub fn div_pow2(&self, exp: i64, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        if exp < 0 {
            return Err(NumericError::InvalidExponent(exp));
        }
        Ok(RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::div_2si(dst, self.raw(), clamp_exponent(exp), mode.to_engine())
        }))
    }

    pub fn mul_pow2_assign(&mut self, exp: i64, mode: RoundingMode) -> Ternary {
        let p = self.raw_mut();
        let code = unsafe { mpfr::mul_2si(p, p, clamp_exponent(exp), mode.to_engine()) };
        Ternary::from_engine(code)
    }

    // ========================================================================
    // Rounding to Integer
    // ========================================================================
    //
    // The integral value is chosen by the operation; `mode` only matters when
    // that integer is not representable at the receiver's precision.

    pub fn floor(&self, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::rint_floor(dst, self.raw(), mode.to_engine())
        })
    }

    pub fn ceil(&self, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::rint_ceil(dst, self.raw(), mode.to_engine())
        })
    }

    pub fn trunc(&self, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::rint_trunc(dst, self.raw(), mode.to_engine())
        })
    }

    /// Nearest integer in the direction of `mode` (ties to even for
    /// `Nearest`).
    pub fn round_to_integer(&self, mode: RoundingMode) -> Rounded<RoundedFloat> {
        RoundedFloat::compute(self.precision(), |dst| unsafe {
            mpfr::rint(dst, self.raw(), mode.to_engine())
        })
    }
}

impl std::ops::Neg for RoundedFloat {
    type Output = RoundedFloat;

    fn neg(mut self) -> RoundedFloat {
        self.negate();
        self
    }
}

impl<'a> std::ops::Neg for &'a RoundedFloat {
    type Output = RoundedFloat;

    fn neg(self) -> RoundedFloat {
        let mut out = self.clone();
        out.negate();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounded_float::{ExceptionFlags, ExceptionTracker};

    const N: RoundingMode = RoundingMode::Nearest;

    fn p(bits: i64) -> Precision {
        Precision::new(bits).unwrap()
    }

    fn rf(v: f64) -> RoundedFloat {
        RoundedFloat::from_f64(v, p(53), N).value
    }

    fn at(v: i64, bits: i64) -> RoundedFloat {
        RoundedFloat::from_i64(v, p(bits), N).value
    }

    #[test]
    fn test_basic_arithmetic_matches_f64() {
        assert_eq!(rf(0.1).add(&rf(0.2), N).value.to_f64(N), 0.1 + 0.2);
        assert_eq!(rf(1.5).sub(&rf(4.0), N).value, rf(-2.5));
        assert_eq!(rf(1.5).mul(&rf(-2.0), N).value, -3i64);
        assert_eq!(rf(1.0).div(&rf(3.0), N).value.to_f64(N), 1.0 / 3.0);
    }

    #[test]
    fn test_directed_rounding_brackets_exact_result() {
        let one = at(1, 64);
        let three = at(3, 64);
        let lo = one.div(&three, RoundingMode::Down);
        let hi = one.div(&three, RoundingMode::Up);
        assert_eq!(lo.ternary, Ternary::RoundedDown);
        assert_eq!(hi.ternary, Ternary::RoundedUp);
        assert!(lo.value < hi.value);
        let exact = at(6, 64).div(&at(3, 64), RoundingMode::Down);
        assert!(exact.is_exact());
    }

    #[test]
    fn test_result_uses_receiver_precision() {
        let narrow = at(1, 10);
        let wide = at(3, 300);
        assert_eq!(narrow.add(&wide, N).value.precision(), p(10));
        assert_eq!(RoundedFloat::i64_sub(1, &wide, p(20), N).value.precision(), p(20));
    }

    #[test]
    fn test_division_by_zero_yields_infinity_and_flag() {
        let _guard = ExceptionTracker::serialize();
        ExceptionTracker::clear(ExceptionFlags::ALL);

        let (q, raised) = ExceptionTracker::observe(ExceptionFlags::ALL, || {
            rf(1.0).div(&rf(0.0), N)
        });
        assert!(q.value.is_infinite());
        assert!(!q.value.is_sign_negative());
        assert!(raised.contains(ExceptionFlags::DIVIDE_BY_ZERO));

        let (neg, _) = ExceptionTracker::observe(ExceptionFlags::ALL, || rf(-1.0).div_i64(0, N));
        assert!(neg.value.is_infinite() && neg.value.is_sign_negative());

        let (nan, raised) = ExceptionTracker::observe(ExceptionFlags::ALL, || rf(0.0).div(&rf(0.0), N));
        assert!(nan.value.is_nan());
        assert!(raised.contains(ExceptionFlags::INVALID));
        ExceptionTracker::clear(ExceptionFlags::ALL);
    }

    #[test]
    fn test_sqrt() {
        let two = at(2, 100);
        let root = two.sqrt(N).unwrap().value;
        // root lies within one ulp (2^-99 on [1, 2)) of sqrt(2)
        let reference = at(2, 200).sqrt(N).unwrap().value;
        let err = reference.sub(&root, N).value.abs();
        let ulp = at(1, 200).mul_pow2(-99, N).value;
        assert!(err <= ulp);

        let lo = two.sqrt(RoundingMode::Down).unwrap().value;
        let hi = two.sqrt(RoundingMode::Up).unwrap().value;
        assert!(lo < reference && reference < hi);
        let step = hi.sub(&lo, N).value;
        assert_eq!(step, at(1, 100).mul_pow2(-99, N).value);

        assert_eq!(at(-4, 100).sqrt(N), Err(NumericError::NegativeSquareRoot));
        assert_eq!(
            RoundedFloat::infinity(p(100), true).sqrt(N),
            Err(NumericError::NegativeSquareRoot)
        );
        let neg_zero = rf(-0.0).sqrt(N).unwrap().value;
        assert!(neg_zero.is_zero() && neg_zero.is_sign_negative());
        assert!(RoundedFloat::nan(p(53)).sqrt(N).unwrap().value.is_nan());
    }

    #[test]
    fn test_cbrt_pow_fma_hypot() {
        assert_eq!(rf(-27.0).cbrt(N).value, -3i64);
        assert_eq!(rf(2.0).pow(&rf(10.0), N).value, 1024i64);
        assert_eq!(rf(2.0).pow_i64(-2, N).value, rf(0.25));
        assert_eq!(rf(2.0).fma(&rf(3.0), &rf(1.0), N).value, 7i64);
        assert_eq!(rf(3.0).hypot(&rf(4.0), N).value, 5i64);
    }

    #[test]
    fn test_mixed_i64_forms() {
        let x = at(0, 128);
        assert_eq!(x.add_i64(i64::MIN, N).value, i64::MIN);
        assert_eq!(x.sub_i64(i64::MIN, N).value.to_string(), "9223372036854775808");
        assert_eq!(rf(1.5).mul_i64(-2, N).value, -3i64);
        assert_eq!(rf(-9.0).div_i64(2, N).value, rf(-4.5));
        assert_eq!(RoundedFloat::i64_sub(10, &rf(2.5), p(53), N).value, rf(7.5));
        assert_eq!(RoundedFloat::i64_div(-3, &rf(2.0), p(53), N).value, rf(-1.5));

        let mut y = rf(1.0);
        y.assign_add_i64(2, N);
        y.assign_mul_i64(-4, N);
        y.assign_sub_i64(1, N);
        y.assign_div_i64(13, N);
        assert_eq!(y, -1i64);
    }

    #[test]
    fn test_self_aliasing_in_place() {
        let mut a = rf(1.5);
        let alias = a.clone();
        a.assign_mul(&alias, N);
        assert_eq!(a, rf(2.25));
        assert_eq!(alias, rf(1.5));
        assert_eq!(rf(0.1).add(&rf(0.1), N).value, rf(0.1).add(&rf(0.1).deep_copy(), N).value);
        let mut b = rf(3.0);
        let same = b.clone();
        assert!(b.assign_div(&same, N).is_exact());
        assert_eq!(b, 1i64);
    }

    #[test]
    fn test_pow2_scaling() {
        assert_eq!(rf(3.0).mul_pow2(4, N).value, 48i64);
        assert_eq!(rf(3.0).mul_pow2(-1, N).value, rf(1.5));
        assert_eq!(rf(3.0).div_pow2(2, N).unwrap().value, rf(0.75));
        assert_eq!(rf(3.0).div_pow2(-1, N), Err(NumericError::InvalidExponent(-1)));
        let mut z = rf(1.0);
        assert!(z.mul_pow2_assign(-3, N).is_exact());
        assert_eq!(z, rf(0.125));
    }

    #[test]
    fn test_rounding_to_integer() {
        let x = rf(-2.5);
        assert_eq!(x.floor(N).value, -3i64);
        assert_eq!(x.ceil(N).value, -2i64);
        assert_eq!(x.trunc(N).value, -2i64);
        assert_eq!(x.round_to_integer(N).value, -2i64);
        assert_eq!(x.round_to_integer(RoundingMode::Down).value, -3i64);
        assert_eq!(rf(3.5).round_to_integer(N).value, 4i64);
        assert_eq!(x.floor(N).ternary, Ternary::RoundedDown);
        assert!(rf(4.0).floor(N).is_exact());
    }

    #[test]
    fn test_negation() {
        let a = rf(2.0);
        assert_eq!(-&a, -2i64);
        assert_eq!(-a.clone(), -2i64);
        assert_eq!(a, 2i64);
        assert_eq!(rf(-7.0).abs(), 7i64);
    }
}
