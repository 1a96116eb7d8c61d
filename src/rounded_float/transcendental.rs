// ============================================================================
// Transcendental Functions
// Exponential, logarithmic, hyperbolic and trigonometric families
// ============================================================================
//
// These run strict: an underflow, overflow, invalid operation or division by
// zero raised during the call becomes an error instead of a silent special
// value. Inexact results are expected and never reported.

use super::{ExceptionFlags, ExceptionTracker, Rounded, RoundedFloat, RoundingMode};
use crate::numeric::NumericResult;
use gmp_mpfr_sys::mpfr::{self, mpfr_t, rnd_t};
use std::os::raw::c_int;

impl RoundedFloat {
    /// Apply `f` under the strict exception mask.
    fn strict_unary<F>(&self, mode: RoundingMode, f: F) -> NumericResult<Rounded<RoundedFloat>>
    where
        F: FnOnce(*mut mpfr_t, *const mpfr_t, rnd_t) -> c_int,
    {
        self.strict_unary_with(ExceptionFlags::STRICT, mode, f)
    }

    pub(crate) fn strict_unary_with<F>(
        &self,
        mask: ExceptionFlags,
        mode: RoundingMode,
        f: F,
    ) -> NumericResult<Rounded<RoundedFloat>>
    where
        F: FnOnce(*mut mpfr_t, *const mpfr_t, rnd_t) -> c_int,
    {
        let rnd = mode.to_engine();
        ExceptionTracker::strict(mask, || {
            RoundedFloat::compute(self.precision(), |dst| f(dst, self.raw(), rnd))
        })
    }

    // ========================================================================
    // Exponential Family
    // ========================================================================

    /// # Errors
    /// `FloatingPoint` on overflow, underflow or a NaN operand.
    pub fn exp(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::exp(d, s, r) })
    }

    pub fn exp2(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::exp2(d, s, r) })
    }

    pub fn exp10(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::exp10(d, s, r) })
    }

    /// `e^self - 1`, accurate near zero.
    pub fn expm1(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::expm1(d, s, r) })
    }

    // ========================================================================
    // Logarithms
    // ========================================================================

    /// Natural logarithm.
    ///
    /// # Errors
    /// `FloatingPoint` with `INVALID` for negative input and
    /// `DIVIDE_BY_ZERO` for zero.
    pub fn ln(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::log(d, s, r) })
    }

    pub fn log2(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::log2(d, s, r) })
    }

    pub fn log10(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::log10(d, s, r) })
    }

    /// `ln(1 + self)`, accurate near zero.
    pub fn ln_1p(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::log1p(d, s, r) })
    }

    // ========================================================================
    // Hyperbolic Family
    // ========================================================================

    pub fn sinh(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::sinh(d, s, r) })
    }

    pub fn cosh(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::cosh(d, s, r) })
    }

    pub fn tanh(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::tanh(d, s, r) })
    }

    pub fn asinh(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::asinh(d, s, r) })
    }

    /// # Errors
    /// `FloatingPoint` with `INVALID` below one.
    pub fn acosh(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::acosh(d, s, r) })
    }

    /// # Errors
    /// `FloatingPoint` with `INVALID` outside [-1, 1] and `DIVIDE_BY_ZERO`
    /// at ±1.
    pub fn atanh(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::atanh(d, s, r) })
    }

    // ========================================================================
    // Trigonometric Family
    // ========================================================================

    pub fn sin(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::sin(d, s, r) })
    }

    pub fn cos(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::cos(d, s, r) })
    }

    pub fn tan(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::tan(d, s, r) })
    }

    pub fn atan(&self, mode: RoundingMode) -> NumericResult<Rounded<RoundedFloat>> {
        self.strict_unary(mode, |d, s, r| unsafe { mpfr::atan(d, s, r) })
    }
}
