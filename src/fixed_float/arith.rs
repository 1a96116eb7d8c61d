// ============================================================================
// Fixed Float Arithmetic
// Truncating operations at the receiver's precision
// ============================================================================

use super::FixedFloat;
use crate::integer::bit_count;
use crate::numeric::{NumericError, NumericResult, Precision};
use gmp_mpfr_sys::gmp;
use std::os::raw::c_ulong;

impl FixedFloat {
    // ========================================================================
    // Binary Operations
    // ========================================================================

    pub fn add(&self, rhs: &FixedFloat) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_add(dst, self.raw(), rhs.raw())
        })
    }

    pub fn sub(&self, rhs: &FixedFloat) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_sub(dst, self.raw(), rhs.raw())
        })
    }

    pub fn mul(&self, rhs: &FixedFloat) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_mul(dst, self.raw(), rhs.raw())
        })
    }

    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero; the engine has no
    /// infinity to return instead.
    pub fn checked_div(&self, rhs: &FixedFloat) -> NumericResult<FixedFloat> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_div(dst, self.raw(), rhs.raw())
        }))
    }

    pub fn assign_add(&mut self, rhs: &FixedFloat) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpf_add(dst, a, b) });
    }

    pub fn assign_sub(&mut self, rhs: &FixedFloat) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpf_sub(dst, a, b) });
    }

    pub fn assign_mul(&mut self, rhs: &FixedFloat) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpf_mul(dst, a, b) });
    }

    pub fn checked_div_assign(&mut self, rhs: &FixedFloat) -> NumericResult<()> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpf_div(dst, a, b) });
        Ok(())
    }

    // ========================================================================
    // Mixed i64 Operations
    // ========================================================================

    pub fn add_i64(&self, rhs: i64) -> FixedFloat {
        let mut out = self.clone();
        out.assign_add_i64(rhs);
        out
    }

    pub fn sub_i64(&self, rhs: i64) -> FixedFloat {
        let mut out = self.clone();
        out.assign_sub_i64(rhs);
        out
    }

    pub fn mul_i64(&self, rhs: i64) -> FixedFloat {
        let mut out = self.clone();
        out.assign_mul_i64(rhs);
        out
    }

    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero.
    pub fn div_i64(&self, rhs: i64) -> NumericResult<FixedFloat> {
        let mut out = self.clone();
        out.div_i64_assign(rhs)?;
        Ok(out)
    }

    pub fn assign_add_i64(&mut self, rhs: i64) {
        match c_ulong::try_from(rhs.unsigned_abs()) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    if rhs >= 0 {
                        gmp::mpf_add_ui(p, p, m);
                    } else {
                        gmp::mpf_sub_ui(p, p, m);
                    }
                }
            }
            Err(_) => self.assign_add(&FixedFloat::from_i64(rhs, Precision::WORD)),
        }
    }

    pub fn assign_sub_i64(&mut self, rhs: i64) {
        match c_ulong::try_from(rhs.unsigned_abs()) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    if rhs >= 0 {
                        gmp::mpf_sub_ui(p, p, m);
                    } else {
                        gmp::mpf_add_ui(p, p, m);
                    }
                }
            }
            Err(_) => self.assign_sub(&FixedFloat::from_i64(rhs, Precision::WORD)),
        }
    }

    pub fn assign_mul_i64(&mut self, rhs: i64) {
        match c_ulong::try_from(rhs.unsigned_abs()) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    gmp::mpf_mul_ui(p, p, m);
                    if rhs < 0 {
                        gmp::mpf_neg(p, p);
                    }
                }
            }
            Err(_) => self.assign_mul(&FixedFloat::from_i64(rhs, Precision::WORD)),
        }
    }

    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero; `self` is unchanged.
    pub fn div_i64_assign(&mut self, rhs: i64) -> NumericResult<()> {
        if rhs == 0 {
            return Err(NumericError::DivisionByZero);
        }
        match c_ulong::try_from(rhs.unsigned_abs()) {
            Ok(m) => {
                let p = self.raw_mut();
                unsafe {
                    gmp::mpf_div_ui(p, p, m);
                    if rhs < 0 {
                        gmp::mpf_neg(p, p);
                    }
                }
                Ok(())
            }
            Err(_) => self.checked_div_assign(&FixedFloat::from_i64(rhs, Precision::WORD)),
        }
    }

    /// `lhs - rhs` computed at `precision`.
    pub fn i64_sub(lhs: i64, rhs: &FixedFloat, precision: Precision) -> FixedFloat {
        match c_ulong::try_from(lhs.unsigned_abs()) {
            Ok(m) => FixedFloat::compute(precision, |dst| unsafe {
                if lhs >= 0 {
                    gmp::mpf_ui_sub(dst, m, rhs.raw());
                } else {
                    gmp::mpf_add_ui(dst, rhs.raw(), m);
                    gmp::mpf_neg(dst, dst);
                }
            }),
            Err(_) => FixedFloat::from_i64(lhs, precision).sub(rhs),
        }
    }

    /// `lhs / rhs` computed at `precision`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero.
    pub fn i64_div(lhs: i64, rhs: &FixedFloat, precision: Precision) -> NumericResult<FixedFloat> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match c_ulong::try_from(lhs.unsigned_abs()) {
            Ok(m) => Ok(FixedFloat::compute(precision, |dst| unsafe {
                gmp::mpf_ui_div(dst, m, rhs.raw());
                if lhs < 0 {
                    gmp::mpf_neg(dst, dst);
                }
            })),
            Err(_) => FixedFloat::from_i64(lhs, precision).checked_div(rhs),
        }
    }

    // ========================================================================
    // Unary Operations
    // ========================================================================

    pub fn negate(&mut self) {
        let p = self.raw_mut();
        unsafe { gmp::mpf_neg(p, p) };
    }

    pub fn abs(&self) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe { gmp::mpf_abs(dst, self.raw()) })
    }

    /// # Errors
    /// Returns `NegativeSquareRoot` for negative values.
    pub fn sqrt(&self) -> NumericResult<FixedFloat> {
        if self.is_negative() {
            return Err(NumericError::NegativeSquareRoot);
        }
        Ok(FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_sqrt(dst, self.raw())
        }))
    }

    pub fn pow(&self, exp: u32) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_pow_ui(dst, self.raw(), c_ulong::from(exp))
        })
    }

    /// `|self - other| / |self|`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `self` is zero.
    pub fn relative_diff(&self, other: &FixedFloat) -> NumericResult<FixedFloat> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(FixedFloat::compute(self.precision(), |dst| unsafe {
            gmp::mpf_reldiff(dst, self.raw(), other.raw())
        }))
    }

    // ========================================================================
    // Powers of Two
    // ========================================================================

    /// `self × 2^exp`; a negative `exp` divides by `2^|exp|`.
    pub fn mul_pow2(&self, exp: i64) -> FixedFloat {
        let shift = bit_count(exp.unsigned_abs());
        FixedFloat::compute(self.precision(), |dst| unsafe {
            if exp >= 0 {
                gmp::mpf_mul_2exp(dst, self.raw(), shift);
            } else {
                gmp::mpf_div_2exp(dst, self.raw(), shift);
            }
        })
    }

    /// # Errors
    /// Returns `InvalidExponent` for negative `exp`.
    pub fn div_pow2(&self, exp: i64) -> NumericResult<FixedFloat> {
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
                gmp::mpf_mul_2exp(p, p, shift);
            } else {
                gmp::mpf_div_2exp(p, p, shift);
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
    // Integral Parts
    // ========================================================================

    pub fn floor(&self) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe { gmp::mpf_floor(dst, self.raw()) })
    }

    pub fn ceil(&self) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe { gmp::mpf_ceil(dst, self.raw()) })
    }

    pub fn trunc(&self) -> FixedFloat {
        FixedFloat::compute(self.precision(), |dst| unsafe { gmp::mpf_trunc(dst, self.raw()) })
    }
}

forward_ref_binops! { FixedFloat;
    Add::add, AddAssign::add_assign => add, assign_add;
    Sub::sub, SubAssign::sub_assign => sub, assign_sub;
    Mul::mul, MulAssign::mul_assign => mul, assign_mul;
}

forward_i64_binops! { FixedFloat;
    Add::add, AddAssign::add_assign => add_i64, assign_add_i64;
    Sub::sub, SubAssign::sub_assign => sub_i64, assign_sub_i64;
    Mul::mul, MulAssign::mul_assign => mul_i64, assign_mul_i64;
}

forward_neg!(FixedFloat);
