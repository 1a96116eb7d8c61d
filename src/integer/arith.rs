// ============================================================================
// Integer Arithmetic
// Immutable and in-place arithmetic, mixed i64 forms, powers and roots
// ============================================================================

use super::Integer;
use crate::numeric::{NumericError, NumericResult};
use gmp_mpfr_sys::gmp;
use std::os::raw::c_ulong;

/// Engine shift count for a magnitude, saturating on narrow `bitcnt_t`.
#[inline]
pub(crate) fn bit_count(magnitude: u64) -> gmp::bitcnt_t {
    gmp::bitcnt_t::try_from(magnitude).unwrap_or(gmp::bitcnt_t::MAX)
}

impl Integer {
    // ========================================================================
    // Binary Operations (immutable)
    // ========================================================================

    pub fn add(&self, rhs: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_add(dst, self.raw(), rhs.raw()) })
    }

    pub fn sub(&self, rhs: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_sub(dst, self.raw(), rhs.raw()) })
    }

    pub fn mul(&self, rhs: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_mul(dst, self.raw(), rhs.raw()) })
    }

    /// Quotient truncated toward zero.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_tdiv_q(dst, self.raw(), rhs.raw())
        }))
    }

    /// Remainder with the sign of `self`.
    pub fn checked_rem(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_tdiv_r(dst, self.raw(), rhs.raw())
        }))
    }

    /// Truncating quotient and remainder in one engine call.
    pub fn div_rem(&self, rhs: &Integer) -> NumericResult<(Integer, Integer)> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let mut rem = Integer::new();
        let quot = Integer::compute(|q| unsafe {
            gmp::mpz_tdiv_qr(q, rem.raw_mut(), self.raw(), rhs.raw())
        });
        Ok((quot, rem))
    }

    /// Quotient rounded toward negative infinity.
    pub fn div_floor(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_fdiv_q(dst, self.raw(), rhs.raw())
        }))
    }

    /// Remainder with the sign of `rhs`.
    pub fn rem_floor(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_fdiv_r(dst, self.raw(), rhs.raw())
        }))
    }

    /// Quotient rounded toward positive infinity.
    pub fn div_ceil(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_cdiv_q(dst, self.raw(), rhs.raw())
        }))
    }

    /// Non-negative remainder, `0 <= r < |rhs|`.
    pub fn rem_euclid(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_mod(dst, self.raw(), rhs.raw())
        }))
    }

    /// Quotient matching [`Integer::rem_euclid`].
    pub fn div_euclid(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_positive() {
            self.div_floor(rhs)
        } else {
            self.div_ceil(rhs)
        }
    }

    /// Whether `rhs` divides `self`; zero divides only zero.
    pub fn is_divisible_by(&self, rhs: &Integer) -> bool {
        unsafe { gmp::mpz_divisible_p(self.raw(), rhs.raw()) != 0 }
    }

    /// Quotient of a division known to leave no remainder.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor and `InvalidInput` when
    /// `rhs` does not divide `self`.
    pub fn div_exact(&self, rhs: &Integer) -> NumericResult<Integer> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if !self.is_divisible_by(rhs) {
            return Err(NumericError::InvalidInput);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_divexact(dst, self.raw(), rhs.raw())
        }))
    }

    // ========================================================================
    // Binary Operations (in place)
    // ========================================================================

    pub fn assign_add(&mut self, rhs: &Integer) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_add(dst, a, b) });
    }

    pub fn assign_sub(&mut self, rhs: &Integer) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_sub(dst, a, b) });
    }

    pub fn assign_mul(&mut self, rhs: &Integer) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_mul(dst, a, b) });
    }

    /// In-place truncating division; `self` is untouched on error.
    pub fn checked_div_assign(&mut self, rhs: &Integer) -> NumericResult<()> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_tdiv_q(dst, a, b) });
        Ok(())
    }

    pub fn checked_rem_assign(&mut self, rhs: &Integer) -> NumericResult<()> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_tdiv_r(dst, a, b) });
        Ok(())
    }

    // ========================================================================
    // Mixed i64 Operations
    // ========================================================================
    //
    // The operand's unsigned magnitude is used throughout, so i64::MIN never
    // has to be negated in signed arithmetic.

    pub fn add_i64(&self, rhs: i64) -> Integer {
        let mut out = self.clone();
        out.assign_add_i64(rhs);
        out
    }

    pub fn sub_i64(&self, rhs: i64) -> Integer {
        let mut out = self.clone();
        out.assign_sub_i64(rhs);
        out
    }

    pub fn mul_i64(&self, rhs: i64) -> Integer {
        let mut out = self.clone();
        out.assign_mul_i64(rhs);
        out
    }

    /// Truncating division by an `i64`.
    pub fn div_i64(&self, rhs: i64) -> NumericResult<Integer> {
        if rhs == 0 {
            return Err(NumericError::DivisionByZero);
        }
        let magnitude = rhs.unsigned_abs();
        let mut out = match c_ulong::try_from(magnitude) {
            Ok(d) => Integer::compute(|dst| unsafe {
                gmp::mpz_tdiv_q_ui(dst, self.raw(), d);
            }),
            Err(_) => self.checked_div(&Integer::from(magnitude))?,
        };
        if rhs < 0 {
            out.negate();
        }
        Ok(out)
    }

    pub fn assign_add_i64(&mut self, rhs: i64) {
        let magnitude = rhs.unsigned_abs();
        match c_ulong::try_from(magnitude) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    if rhs >= 0 {
                        gmp::mpz_add_ui(p, p, m);
                    } else {
                        gmp::mpz_sub_ui(p, p, m);
                    }
                }
            }
            Err(_) => self.assign_add(&Integer::from(rhs)),
        }
    }

    pub fn assign_sub_i64(&mut self, rhs: i64) {
        let magnitude = rhs.unsigned_abs();
        match c_ulong::try_from(magnitude) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    if rhs >= 0 {
                        gmp::mpz_sub_ui(p, p, m);
                    } else {
                        gmp::mpz_add_ui(p, p, m);
                    }
                }
            }
            Err(_) => self.assign_sub(&Integer::from(rhs)),
        }
    }

    pub fn assign_mul_i64(&mut self, rhs: i64) {
        let magnitude = rhs.unsigned_abs();
        match c_ulong::try_from(magnitude) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    gmp::mpz_mul_ui(p, p, m);
                    if rhs < 0 {
                        gmp::mpz_neg(p, p);
                    }
                }
            }
            Err(_) => self.assign_mul(&Integer::from(rhs)),
        }
    }

    /// `lhs - rhs` for a native left operand.
    pub fn i64_sub(lhs: i64, rhs: &Integer) -> Integer {
        let magnitude = lhs.unsigned_abs();
        match c_ulong::try_from(magnitude) {
            Ok(m) if lhs >= 0 => Integer::compute(|dst| unsafe { gmp::mpz_ui_sub(dst, m, rhs.raw()) }),
            Ok(m) => Integer::compute(|dst| unsafe {
                gmp::mpz_neg(dst, rhs.raw());
                gmp::mpz_sub_ui(dst, dst, m);
            }),
            Err(_) => Integer::from(lhs).sub(rhs),
        }
    }

    /// `lhs / rhs` truncated, for a native left operand.
    pub fn i64_div(lhs: i64, rhs: &Integer) -> NumericResult<Integer> {
        Integer::from(lhs).checked_div(rhs)
    }

    // ========================================================================
    // Unary Operations
    // ========================================================================

    /// Flip the sign in place, reading and writing through one pointer.
    pub fn negate(&mut self) {
        let p = self.raw_mut();
        unsafe { gmp::mpz_neg(p, p) };
    }

    pub fn abs(&self) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_abs(dst, self.raw()) })
    }

    pub fn abs_in_place(&mut self) {
        if self.is_negative() {
            self.negate();
        }
    }

    // ========================================================================
    // Powers of Two
    // ========================================================================

    /// `self × 2^exp`; a negative `exp` shifts right (floor) by `|exp|`.
    pub fn mul_pow2(&self, exp: i64) -> Integer {
        let shift = bit_count(exp.unsigned_abs());
        Integer::compute(|dst| unsafe {
            if exp >= 0 {
                gmp::mpz_mul_2exp(dst, self.raw(), shift);
            } else {
                gmp::mpz_fdiv_q_2exp(dst, self.raw(), shift);
            }
        })
    }

    /// `floor(self / 2^exp)`.
    ///
    /// # Errors
    /// Returns `InvalidExponent` for negative `exp`; unlike
    /// [`Integer::mul_pow2`] the sign is not reinterpreted.
    pub fn div_pow2(&self, exp: i64) -> NumericResult<Integer> {
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
                gmp::mpz_mul_2exp(p, p, shift);
            } else {
                gmp::mpz_fdiv_q_2exp(p, p, shift);
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
    // Powers and Roots
    // ========================================================================

    pub fn pow(&self, exp: u32) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_pow_ui(dst, self.raw(), c_ulong::from(exp)) })
    }

    /// `self^exp mod modulus`, non-negative.
    ///
    /// A negative `exp` uses the modular inverse of `self`.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero modulus
    /// - `NotInvertible` for a negative exponent without an inverse
    pub fn pow_mod(&self, exp: &Integer, modulus: &Integer) -> NumericResult<Integer> {
        if modulus.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if exp.is_negative() {
            let inverse = self.invert_mod(modulus).ok_or(NumericError::NotInvertible)?;
            return inverse.pow_mod(&exp.abs(), modulus);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_powm(dst, self.raw(), exp.raw(), modulus.raw())
        }))
    }

    /// Truncated square root.
    ///
    /// # Errors
    /// Returns `NegativeSquareRoot` for negative values.
    pub fn sqrt(&self) -> NumericResult<Integer> {
        if self.is_negative() {
            return Err(NumericError::NegativeSquareRoot);
        }
        Ok(Integer::compute(|dst| unsafe { gmp::mpz_sqrt(dst, self.raw()) }))
    }

    /// Truncated square root and remainder `self - root²`.
    pub fn sqrt_rem(&self) -> NumericResult<(Integer, Integer)> {
        if self.is_negative() {
            return Err(NumericError::NegativeSquareRoot);
        }
        let mut rem = Integer::new();
        let root = Integer::compute(|dst| unsafe {
            gmp::mpz_sqrtrem(dst, rem.raw_mut(), self.raw())
        });
        Ok((root, rem))
    }

    /// Truncated `n`-th root.
    ///
    /// # Errors
    /// - `DivisionByZero` for `n == 0`
    /// - `EvenRootOfNegative` for an even `n` and negative `self`
    pub fn root(&self, n: u32) -> NumericResult<Integer> {
        if n == 0 {
            return Err(NumericError::DivisionByZero);
        }
        if n % 2 == 0 && self.is_negative() {
            return Err(NumericError::EvenRootOfNegative);
        }
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_root(dst, self.raw(), c_ulong::from(n));
        }))
    }

    pub fn is_perfect_square(&self) -> bool {
        unsafe { gmp::mpz_perfect_square_p(self.raw()) != 0 }
    }

    pub fn is_perfect_power(&self) -> bool {
        unsafe { gmp::mpz_perfect_power_p(self.raw()) != 0 }
    }
}

forward_ref_binops! { Integer;
    Add::add, AddAssign::add_assign => add, assign_add;
    Sub::sub, SubAssign::sub_assign => sub, assign_sub;
    Mul::mul, MulAssign::mul_assign => mul, assign_mul;
}

forward_i64_binops! { Integer;
    Add::add, AddAssign::add_assign => add_i64, assign_add_i64;
    Sub::sub, SubAssign::sub_assign => sub_i64, assign_sub_i64;
    Mul::mul, MulAssign::mul_assign => mul_i64, assign_mul_i64;
}

forward_neg!(Integer);
