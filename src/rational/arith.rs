// ============================================================================
// Rational Arithmetic
// Fused engine operations; results come back already canonical
// ============================================================================

use super::Rational;
use crate::integer::{bit_count, Integer};
use crate::numeric::{NumericError, NumericResult};
use gmp_mpfr_sys::gmp;
use std::os::raw::c_ulong;

impl Rational {
    // ========================================================================
    // Binary Operations
    // ========================================================================

    pub fn add(&self, rhs: &Rational) -> Rational {
        Rational::compute(|dst| unsafe { gmp::mpq_add(dst, self.raw(), rhs.raw()) })
    }

    pub fn sub(&self, rhs: &Rational) -> Rational {
        Rational::compute(|dst| unsafe { gmp::mpq_sub(dst, self.raw(), rhs.raw()) })
    }

    pub fn mul(&self, rhs: &Rational) -> Rational {
        Rational::compute(|dst| unsafe { gmp::mpq_mul(dst, self.raw(), rhs.raw()) })
    }

    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Rational) -> NumericResult<Rational> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Rational::compute(|dst| unsafe {
            gmp::mpq_div(dst, self.raw(), rhs.raw())
        }))
    }

    pub fn assign_add(&mut self, rhs: &Rational) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpq_add(dst, a, b) });
    }

    pub fn assign_sub(&mut self, rhs: &Rational) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpq_sub(dst, a, b) });
    }

    pub fn assign_mul(&mut self, rhs: &Rational) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpq_mul(dst, a, b) });
    }

    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero; `self` is unchanged.
    pub fn checked_div_assign(&mut self, rhs: &Rational) -> NumericResult<()> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpq_div(dst, a, b) });
        Ok(())
    }

    // ========================================================================
    // Mixed i64 Operations
    // ========================================================================

    pub fn add_i64(&self, rhs: i64) -> Rational {
        self.add(&Rational::from(rhs))
    }

    pub fn sub_i64(&self, rhs: i64) -> Rational {
        self.sub(&Rational::from(rhs))
    }

    pub fn mul_i64(&self, rhs: i64) -> Rational {
        self.mul(&Rational::from(rhs))
    }

    pub fn div_i64(&self, rhs: i64) -> NumericResult<Rational> {
        self.checked_div(&Rational::from(rhs))
    }

    pub fn assign_add_i64(&mut self, rhs: i64) {
        self.assign_add(&Rational::from(rhs));
    }

    pub fn assign_sub_i64(&mut self, rhs: i64) {
        self.assign_sub(&Rational::from(rhs));
    }

    pub fn assign_mul_i64(&mut self, rhs: i64) {
        self.assign_mul(&Rational::from(rhs));
    }

    /// `lhs - rhs` for a native left operand.
    pub fn i64_sub(lhs: i64, rhs: &Rational) -> Rational {
        Rational::from(lhs).sub(rhs)
    }

    /// `lhs / rhs` for a native left operand.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero.
    pub fn i64_div(lhs: i64, rhs: &Rational) -> NumericResult<Rational> {
        Rational::from(lhs).checked_div(rhs)
    }

    // ========================================================================
    // Unary Operations
    // ========================================================================

    pub fn negate(&mut self) {
        let p = self.raw_mut();
        unsafe { gmp::mpq_neg(p, p) };
    }

    pub fn abs(&self) -> Rational {
        Rational::compute(|dst| unsafe { gmp::mpq_abs(dst, self.raw()) })
    }

    /// `1 / self`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for zero.
    pub fn inverted(&self) -> NumericResult<Rational> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Rational::compute(|dst| unsafe { gmp::mpq_inv(dst, self.raw()) }))
    }

    /// Replace `self` with `1 / self`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for zero; `self` is unchanged.
    pub fn invert(&mut self) -> NumericResult<()> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let p = self.raw_mut();
        unsafe { gmp::mpq_inv(p, p) };
        Ok(())
    }

    /// `self^exp`; negative exponents invert.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for zero raised to a negative power.
    pub fn pow(&self, exp: i32) -> NumericResult<Rational> {
        if exp < 0 && self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let e = c_ulong::from(exp.unsigned_abs());
        // coprime parts stay coprime under powers
        Ok(Rational::compute(|dst| unsafe {
            gmp::mpz_pow_ui(gmp::mpq_numref(dst), gmp::mpq_numref_const(self.raw()), e);
            gmp::mpz_pow_ui(gmp::mpq_denref(dst), gmp::mpq_denref_const(self.raw()), e);
            if exp < 0 {
                gmp::mpq_inv(dst, dst);
            }
        }))
    }

    // ========================================================================
    // Powers of Two
    // ========================================================================

    /// `self × 2^exp`; a negative `exp` divides by `2^|exp|`.
    pub fn mul_pow2(&self, exp: i64) -> Rational {
        let shift = bit_count(exp.unsigned_abs());
        Rational::compute(|dst| unsafe {
            if exp >= 0 {
                gmp::mpq_mul_2exp(dst, self.raw(), shift);
            } else {
                gmp::mpq_div_2exp(dst, self.raw(), shift);
            }
        })
    }

    /// `self / 2^exp`.
    ///
    /// # Errors
    /// Returns `InvalidExponent` for negative `exp`.
    pub fn div_pow2(&self, exp: i64) -> NumericResult<Rational> {
        if exp < 0 {
            return Err(NumericError::InvalidExponent(exp));
        }
        Ok(self.mul_pow2(-exp))
    }

    pub fn mul_pow2_assign(&mut self, exp: i64) {
        let shift = bit_count(exp.unsigned_abs());
        let p = self.raw_mut();
        unsafe {
            if exp >= 0 {
                gmp::mpq_mul_2exp(p, p, shift);
            } else {
                gmp::mpq_div_2exp(p, p, shift);
            }
        }
    }

    pub fn div_pow2_assign(&mut self, exp: i64) -> NumericResult<()> {
        if exp < 0 {
            return Err(NumericError::InvalidExponent(exp));
        }
        self.mul_pow2_assign(-exp);
        Ok(())
    }

    // ========================================================================
    // Rounding to Integer
    // ========================================================================

    pub fn floor(&self) -> Integer {
        Integer::compute(|dst| unsafe {
            gmp::mpz_fdiv_q(dst, gmp::mpq_numref_const(self.raw()), gmp::mpq_denref_const(self.raw()))
        })
    }

    pub fn ceil(&self) -> Integer {
        Integer::compute(|dst| unsafe {
            gmp::mpz_cdiv_q(dst, gmp::mpq_numref_const(self.raw()), gmp::mpq_denref_const(self.raw()))
        })
    }

    pub fn trunc(&self) -> Integer {
        Integer::compute(|dst| unsafe {
            gmp::mpz_tdiv_q(dst, gmp::mpq_numref_const(self.raw()), gmp::mpq_denref_const(self.raw()))
        })
    }

    /// Nearest integer, ties away from zero.
    pub fn round(&self) -> Integer {
        // trunc((2n ± d) / 2d)
        let numerator = self.numerator();
        let denominator = self.denominator();
        let mut twice = numerator.mul_pow2(1);
        if numerator.is_negative() {
            twice.assign_sub(&denominator);
        } else {
            twice.assign_add(&denominator);
        }
        let divisor = denominator.mul_pow2(1);
        Integer::compute(|dst| unsafe { gmp::mpz_tdiv_q(dst, twice.raw(), divisor.raw()) })
    }

    /// `self - trunc(self)`, same sign as `self`.
    pub fn fract(&self) -> Rational {
        self.sub(&Rational::from_integer(&self.trunc()))
    }
}

forward_ref_binops! { Rational;
    Add::add, AddAssign::add_assign => add, assign_add;
    Sub::sub, SubAssign::sub_assign => sub, assign_sub;
    Mul::mul, MulAssign::mul_assign => mul, assign_mul;
}

forward_i64_binops! { Rational;
    Add::add, AddAssign::add_assign => add_i64, assign_add_i64;
    Sub::sub, SubAssign::sub_assign => sub_i64, assign_sub_i64;
    Mul::mul, MulAssign::mul_assign => mul_i64, assign_mul_i64;
}

forward_neg!(Rational);
