// ============================================================================
// Fixed Float
// Truncating binary floating point with a per-value precision
// ============================================================================
//
// Backed by the GMP `mpf_t` type: no rounding modes, no infinities, no NaN.
// Every result is truncated to the precision of the value that produced it.
// The engine allocates whole limbs, so the effective precision reported by
// `precision()` is at least the requested width.

mod arith;

use crate::convert::{detect_float_prefix, place_radix_point, Radix};
use crate::integer::Integer;
use crate::native::{buffer_to_string, to_c_string, NativeHandle, ValueContainer};
use crate::numeric::{NumericError, NumericResult, Precision};
use crate::rational::Rational;
use gmp_mpfr_sys::gmp::{self, mpf_t};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::os::raw::{c_char, c_long};

/// Arbitrary-precision float that truncates instead of rounding.
///
/// Division by zero returns `DivisionByZero`: the engine has no infinity or
/// NaN to return instead, so every quotient and reciprocal checks its divisor
/// first.
///
/// # Example
/// ```
/// use multiprecision::{FixedFloat, Precision};
///
/// let p = Precision::new(128).unwrap();
/// let x = FixedFloat::from_i64(3, p);
/// let y = x.mul_pow2(-2);
/// assert_eq!(y.to_string(), "0.75");
/// ```
#[derive(Clone)]
pub struct FixedFloat {
    container: ValueContainer<mpf_t>,
}

// ============================================================================
// Storage Plumbing
// ============================================================================

impl FixedFloat {
    #[inline]
    pub(crate) fn from_handle(handle: NativeHandle<mpf_t>) -> Self {
        Self {
            container: ValueContainer::from_handle(handle),
        }
    }

    /// Run `f` against a fresh zero at `precision`.
    #[inline]
    pub(crate) fn compute<F: FnOnce(*mut mpf_t)>(precision: Precision, f: F) -> Self {
        let mut handle = NativeHandle::with_precision(precision);
        f(handle.as_mut_ptr());
        Self::from_handle(handle)
    }

    #[inline]
    pub(crate) fn raw(&self) -> *const mpf_t {
        self.container.as_ptr()
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self) -> *mut mpf_t {
        self.container.ensure_unique()
    }

    pub(crate) fn assign_binary<F>(&mut self, rhs: &FixedFloat, op: F)
    where
        F: FnOnce(*mut mpf_t, *const mpf_t, *const mpf_t),
    {
        if self.container.shares_storage_with(&rhs.container) {
            let mut out = NativeHandle::with_precision(self.precision());
            op(out.as_mut_ptr(), self.raw(), rhs.raw());
            self.container.replace(out);
        } else {
            let dst = self.container.ensure_unique();
            op(dst, dst, rhs.raw());
        }
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            container: self.container.detached(),
        }
    }

    #[inline]
    pub fn shares_storage_with(&self, other: &FixedFloat) -> bool {
        self.container.shares_storage_with(&other.container)
    }

    #[inline]
    pub fn storage_ref_count(&self) -> usize {
        self.container.ref_count()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl FixedFloat {
    /// Zero at `precision`.
    pub fn new(precision: Precision) -> Self {
        Self {
            container: ValueContainer::with_precision(precision),
        }
    }

    pub fn from_i64(value: i64, precision: Precision) -> Self {
        Self::compute(precision, |dst| unsafe {
            match c_long::try_from(value) {
                Ok(v) => gmp::mpf_set_si(dst, v),
                Err(_) => gmp::mpf_set_z(dst, Integer::from(value).raw()),
            }
        })
    }

    /// `None` for NaN and infinities.
    pub fn from_f64(value: f64, precision: Precision) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self::compute(precision, |dst| unsafe { gmp::mpf_set_d(dst, value) }))
    }

    pub fn from_integer(value: &Integer, precision: Precision) -> Self {
        Self::compute(precision, |dst| unsafe { gmp::mpf_set_z(dst, value.raw()) })
    }

    /// Truncated to `precision`.
    pub fn from_rational(value: &Rational, precision: Precision) -> Self {
        Self::compute(precision, |dst| unsafe { gmp::mpf_set_q(dst, value.raw()) })
    }

    pub fn from_decimal(value: Decimal, precision: Precision) -> Self {
        Self::from_rational(&Rational::from_decimal(value), precision)
    }

    /// Parse positional notation in `base`.
    ///
    /// Bases 2..=10 also accept an `e` exponent; every base accepts `@`. The
    /// exponent is decimal and counts powers of the base. Base `0` reads a
    /// `0x` or `0b` prefix as hex or binary and decimal otherwise. Returns
    /// `None` for malformed text or an invalid base.
    pub fn parse(text: &str, base: i32, precision: Precision) -> Option<Self> {
        let (base, text) = match Radix::engine_parse_base(base)? {
            0 => detect_float_prefix(text),
            b => (b, text.to_string()),
        };
        let c_text = to_c_string(&text)?;
        let mut handle = NativeHandle::<mpf_t>::with_precision(precision);
        // a negative base makes the engine read the exponent in decimal
        let rc = unsafe { gmp::mpf_set_str(handle.as_mut_ptr(), c_text.as_ptr(), -base) };
        if rc == 0 {
            Some(Self::from_handle(handle))
        } else {
            None
        }
    }

    /// Base-10 [`FixedFloat::parse`] with an error instead of `None`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for malformed text.
    pub fn from_str_with_precision(text: &str, precision: Precision) -> NumericResult<Self> {
        Self::parse(text, 10, precision).ok_or(NumericError::InvalidInput)
    }
}

// ============================================================================
// Precision
// ============================================================================

impl FixedFloat {
    /// Effective precision; at least what was requested.
    #[inline]
    pub fn precision(&self) -> Precision {
        self.container.precision()
    }

    /// Reallocate at `precision`; truncates when narrowing.
    pub fn set_precision(&mut self, precision: Precision) {
        let mut handle = NativeHandle::<mpf_t>::with_precision(precision);
        unsafe { gmp::mpf_set(handle.as_mut_ptr(), self.raw()) };
        self.container.replace(handle);
    }

    /// Copy of `self` at `precision`.
    pub fn with_precision(&self, precision: Precision) -> Self {
        Self::compute(precision, |dst| unsafe { gmp::mpf_set(dst, self.raw()) })
    }
}

// ============================================================================
// Queries and Conversions
// ============================================================================

impl FixedFloat {
    #[inline]
    pub fn sign(&self) -> Ordering {
        unsafe { gmp::mpf_sgn(self.raw()) }.cmp(&0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }

    pub fn is_integer(&self) -> bool {
        unsafe { gmp::mpf_integer_p(self.raw()) != 0 }
    }

    /// Exact conversion: `None` unless integral and within `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.to_integer().to_i64()
    }

    #[inline]
    pub fn fits_i64(&self) -> bool {
        self.to_i64().is_some()
    }

    /// Truncated toward zero.
    pub fn to_f64(&self) -> f64 {
        unsafe { gmp::mpf_get_d(self.raw()) }
    }

    /// Integer part, truncated toward zero.
    pub fn to_integer(&self) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_set_f(dst, self.raw()) })
    }

    /// Exact rational value.
    pub fn to_rational(&self) -> Rational {
        Rational::compute(|dst| unsafe { gmp::mpq_set_f(dst, self.raw()) })
    }

    /// Render in `radix` with at most `digits` significant digits; `0`
    /// produces every digit the precision supports.
    pub fn to_string_radix(&self, radix: Radix, digits: usize) -> String {
        let capacity = if digits == 0 {
            self.max_digits(radix)
        } else {
            digits
        } + 2;
        let mut buffer = vec![0u8; capacity];
        let mut exponent: gmp::exp_t = 0;
        unsafe {
            gmp::mpf_get_str(
                buffer.as_mut_ptr() as *mut c_char,
                &mut exponent,
                radix.get(),
                digits,
                self.raw(),
            );
        }
        place_radix_point(&buffer_to_string(buffer), exponent as i64)
    }

    /// Upper bound on the digits the engine emits for `digits == 0`.
    fn max_digits(&self, radix: Radix) -> usize {
        // the engine works with up to a few guard limbs past the precision
        let bits = u64::from(self.precision().bits()) + 3 * 64;
        let bits_per_digit = u64::from(radix.magnitude().ilog2());
        (bits / bits_per_digit) as usize + 8
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl PartialEq for FixedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FixedFloat {}

impl PartialOrd for FixedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.shares_storage_with(other) {
            return Ordering::Equal;
        }
        unsafe { gmp::mpf_cmp(self.raw(), other.raw()) }.cmp(&0)
    }
}

impl PartialEq<i64> for FixedFloat {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<i64> for FixedFloat {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        let ord = match c_long::try_from(*other) {
            Ok(v) => unsafe { gmp::mpf_cmp_si(self.raw(), v) }.cmp(&0),
            Err(_) => unsafe { gmp::mpf_cmp_z(self.raw(), Integer::from(*other).raw()) }.cmp(&0),
        };
        Some(ord)
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for FixedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_radix(Radix::DECIMAL, 0))
    }
}

impl fmt::Debug for FixedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedFloat({}, {})", self, self.precision())
    }
}
