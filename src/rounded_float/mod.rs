// ============================================================================
// Rounded Float
// Correctly rounded binary floating point with explicit rounding modes
// ============================================================================
//
// This module provides:
// - RoundedFloat: MPFR-backed value with per-value precision
// - RoundingMode / Ternary / Rounded<T>: rounding direction in and out
// - ExceptionFlags / ExceptionTracker: the engine's sticky flag register
//
// No rounding mode is stored on a value; every operation that can round
// takes one and reports how it rounded.

mod arith;
mod exceptions;
mod rounding;
mod transcendental;

pub use exceptions::{ExceptionFlags, ExceptionGuard, ExceptionTracker};
pub use rounding::{Rounded, RoundingMode, Ternary};

use crate::convert::{place_radix_point, Radix};
use crate::integer::Integer;
use crate::native::{to_c_string, NativeHandle, ValueContainer};
use crate::numeric::{NumericError, NumericResult, Precision};
use crate::rational::Rational;
use gmp_mpfr_sys::mpfr::{self, mpfr_t};
use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt;
use std::os::raw::{c_int, c_long};
use std::ptr;

/// Largest base whose digits cannot spell `nan` or `inf`.
const SPECIAL_WORD_MAX_BASE: i32 = 16;

/// Arbitrary-precision float with IEEE-style special values.
///
/// Division by zero and invalid operations produce infinities and NaN and
/// raise the matching [`ExceptionFlags`] instead of failing.
///
/// # Example
/// ```
/// use multiprecision::{Precision, RoundedFloat, RoundingMode, Ternary};
///
/// let p = Precision::new(100).unwrap();
/// let two = RoundedFloat::from_i64(2, p, RoundingMode::Nearest).value;
/// let root = two.sqrt(RoundingMode::Down).unwrap();
/// assert_eq!(root.ternary, Ternary::RoundedDown);
/// ```
#[derive(Clone)]
pub struct RoundedFloat {
    container: ValueContainer<mpfr_t>,
}

// ============================================================================
// Storage Plumbing
// ============================================================================

impl RoundedFloat {
    #[inline]
    pub(crate) fn from_handle(handle: NativeHandle<mpfr_t>) -> Self {
        Self {
            container: ValueContainer::from_handle(handle),
        }
    }

    /// Run a rounding engine call against a fresh destination at `precision`.
    #[inline]
    pub(crate) fn compute<F>(precision: Precision, f: F) -> Rounded<Self>
    where
        F: FnOnce(*mut mpfr_t) -> c_int,
    {
        let mut handle = NativeHandle::with_precision(precision);
        let code = f(handle.as_mut_ptr());
        Rounded::new(Self::from_handle(handle), Ternary::from_engine(code))
    }

    #[inline]
    pub(crate) fn raw(&self) -> *const mpfr_t {
        self.container.as_ptr()
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self) -> *mut mpfr_t {
        self.container.ensure_unique()
    }

    pub(crate) fn assign_binary<F>(&mut self, rhs: &RoundedFloat, op: F) -> Ternary
    where
        F: FnOnce(*mut mpfr_t, *const mpfr_t, *const mpfr_t) -> c_int,
    {
        let code = if self.container.shares_storage_with(&rhs.container) {
            let mut out = NativeHandle::with_precision(self.precision());
            let code = op(out.as_mut_ptr(), self.raw(), rhs.raw());
            self.container.replace(out);
            code
        } else {
            let dst = self.container.ensure_unique();
            op(dst, dst, rhs.raw())
        };
        Ternary::from_engine(code)
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            container: self.container.detached(),
        }
    }

    #[inline]
    pub fn shares_storage_with(&self, other: &RoundedFloat) -> bool {
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

impl RoundedFloat {
    /// Positive zero at `precision`.
    pub fn new(precision: Precision) -> Self {
        Self {
            container: ValueContainer::with_precision(precision),
        }
    }

    pub fn nan(precision: Precision) -> Self {
        Self::special(precision, |raw| unsafe { mpfr::set_nan(raw) })
    }

    pub fn infinity(precision: Precision, negative: bool) -> Self {
        let sign = if negative { -1 } else { 1 };
        Self::special(precision, |raw| unsafe { mpfr::set_inf(raw, sign) })
    }

    fn special<F: FnOnce(*mut mpfr_t)>(precision: Precision, f: F) -> Self {
        let mut handle = NativeHandle::with_precision(precision);
        f(handle.as_mut_ptr());
        Self::from_handle(handle)
    }

    pub fn from_i64(value: i64, precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        let rnd = mode.to_engine();
        Self::compute(precision, |dst| unsafe {
            match c_long::try_from(value) {
                Ok(v) => mpfr::set_si(dst, v, rnd),
                Err(_) => mpfr::set_z(dst, Integer::from(value).raw(), rnd),
            }
        })
    }

    /// Any `f64`, including NaN and infinities.
    pub fn from_f64(value: f64, precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        Self::compute(precision, |dst| unsafe { mpfr::set_d(dst, value, mode.to_engine()) })
    }

    pub fn from_integer(value: &Integer, precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        Self::compute(precision, |dst| unsafe {
            mpfr::set_z(dst, value.raw(), mode.to_engine())
        })
    }

    pub fn from_rational(value: &Rational, precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        Self::compute(precision, |dst| unsafe {
            mpfr::set_q(dst, value.raw(), mode.to_engine())
        })
    }

    /// π rounded to `precision`.
    pub fn pi(precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        Self::compute(precision, |dst| unsafe { mpfr::const_pi(dst, mode.to_engine()) })
    }

    /// ln 2 rounded to `precision`.
    pub fn ln2(precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        Self::compute(precision, |dst| unsafe { mpfr::const_log2(dst, mode.to_engine()) })
    }

    /// Parse positional text in `base`, correctly rounded.
    ///
    /// `@nan@`, `@inf@` and `-@inf@` are special values in every base. The
    /// bare words `nan`, `inf` and `-inf` are special only in base `0` and
    /// bases up to 16, where their letters cannot be digits. Base `0` reads
    /// a `0x` or `0b` prefix as hex or binary and decimal otherwise. An `@`
    /// exponent is decimal and counts powers of the base. Returns `None` for
    /// malformed text or an invalid base.
    pub fn parse(text: &str, base: i32, precision: Precision, mode: RoundingMode) -> Option<Rounded<Self>> {
        let base = Radix::engine_parse_base(base)?;
        if let Some(special) = Self::parse_special(text, base, precision) {
            return Some(Rounded::exact(special));
        }
        let c_text = to_c_string(text)?;
        let mut handle = NativeHandle::<mpfr_t>::with_precision(precision);
        let mut end = ptr::null_mut();
        let code = unsafe {
            mpfr::strtofr(handle.as_mut_ptr(), c_text.as_ptr(), &mut end, base, mode.to_engine())
        };
        // the whole text must be consumed
        let consumed = !end.is_null() && unsafe { *end } == 0 && end != c_text.as_ptr() as *mut _;
        if !consumed {
            return None;
        }
        Some(Rounded::new(Self::from_handle(handle), Ternary::from_engine(code)))
    }

    fn parse_special(text: &str, base: i32, precision: Precision) -> Option<Self> {
        let lowered = text.trim().to_ascii_lowercase();
        let (negative, word) = match lowered.as_bytes().first() {
            Some(b'-') => (true, &lowered[1..]),
            Some(b'+') => (false, &lowered[1..]),
            _ => (false, lowered.as_str()),
        };
        let bare_words = base <= SPECIAL_WORD_MAX_BASE;
        match word {
            "@nan@" => Some(Self::nan(precision)),
            "nan" if bare_words => Some(Self::nan(precision)),
            "@inf@" => Some(Self::infinity(precision, negative)),
            "inf" if bare_words => Some(Self::infinity(precision, negative)),
            _ => None,
        }
    }
}

// ============================================================================
// Precision
// ============================================================================

impl RoundedFloat {
    #[inline]
    pub fn precision(&self) -> Precision {
        self.container.precision()
    }

    /// Reallocate at `precision`, rounding with `mode` when narrowing.
    pub fn set_precision(&mut self, precision: Precision, mode: RoundingMode) -> Ternary {
        let mut handle = NativeHandle::<mpfr_t>::with_precision(precision);
        let code = unsafe { mpfr::set(handle.as_mut_ptr(), self.raw(), mode.to_engine()) };
        self.container.replace(handle);
        Ternary::from_engine(code)
    }

    /// Copy of `self` rounded to `precision`.
    pub fn with_precision(&self, precision: Precision, mode: RoundingMode) -> Rounded<Self> {
        Self::compute(precision, |dst| unsafe { mpfr::set(dst, self.raw(), mode.to_engine()) })
    }
}

// ============================================================================
// Classification
// ============================================================================

impl RoundedFloat {
    #[inline]
    pub fn is_nan(&self) -> bool {
        unsafe { mpfr::nan_p(self.raw()) != 0 }
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        unsafe { mpfr::inf_p(self.raw()) != 0 }
    }

    /// Neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        unsafe { mpfr::number_p(self.raw()) != 0 }
    }

    /// True for both signed zeros.
    #[inline]
    pub fn is_zero(&self) -> bool {
        unsafe { mpfr::zero_p(self.raw()) != 0 }
    }

    /// Sign bit; set for `-0` and negative NaN too.
    #[inline]
    pub fn is_sign_negative(&self) -> bool {
        unsafe { mpfr::signbit(self.raw()) != 0 }
    }

    /// Sign against zero; `None` for NaN. Signed zeros compare equal.
    pub fn sign(&self) -> Option<Ordering> {
        if self.is_nan() {
            return None;
        }
        Some(unsafe { mpfr::sgn(self.raw()) }.cmp(&0))
    }

    pub fn is_integer(&self) -> bool {
        unsafe { mpfr::integer_p(self.raw()) != 0 }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl RoundedFloat {
    /// Exact conversion: `None` unless a finite integer within `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.to_integer(RoundingMode::TowardZero)?.to_i64()
    }

    #[inline]
    pub fn fits_i64(&self) -> bool {
        self.to_i64().is_some()
    }

    pub fn to_f64(&self, mode: RoundingMode) -> f64 {
        unsafe { mpfr::get_d(self.raw(), mode.to_engine()) }
    }

    /// Round to an integer with `mode`; `None` for NaN and infinities.
    pub fn to_integer(&self, mode: RoundingMode) -> Option<Integer> {
        if !self.is_finite() {
            return None;
        }
        Some(Integer::compute(|dst| unsafe {
            mpfr::get_z(dst, self.raw(), mode.to_engine());
        }))
    }

    /// Exact value; `None` for NaN and infinities.
    pub fn to_rational(&self) -> Option<Rational> {
        if !self.is_finite() {
            return None;
        }
        Some(Rational::compute(|dst| unsafe { mpfr::get_q(dst, self.raw()) }))
    }

    /// Render in `radix` with `digits` significant digits, rounding with
    /// `mode`. `digits == 0` emits enough digits to read the value back
    /// exactly at the same precision.
    ///
    /// NaN and infinities print as `nan` and `inf` up to base 16 and as
    /// `@nan@` and `@inf@` above it, where the bare words are digit strings.
    pub fn to_string_radix(&self, radix: Radix, digits: usize, mode: RoundingMode) -> String {
        let bare_words = radix.magnitude() <= SPECIAL_WORD_MAX_BASE;
        if self.is_nan() {
            return if bare_words { "nan" } else { "@nan@" }.to_string();
        }
        if self.is_infinite() {
            let word = if bare_words { "inf" } else { "@inf@" };
            return if self.is_sign_negative() { format!("-{word}") } else { word.to_string() };
        }
        if self.is_zero() {
            return "0".to_string();
        }

        let mut exponent: mpfr::exp_t = 0;
        let text = unsafe {
            let s = mpfr::get_str(
                ptr::null_mut(),
                &mut exponent,
                radix.get(),
                digits,
                self.raw(),
                mode.to_engine(),
            );
            if s.is_null() {
                tracing::warn!(radix = radix.get(), "engine refused to format value");
                return String::new();
            }
            let owned = CStr::from_ptr(s).to_string_lossy().into_owned();
            mpfr::free_str(s);
            owned
        };
        place_radix_point(&text, exponent as i64)
    }
}

// ============================================================================
// Comparison
// ============================================================================
//
// Comparisons check for NaN first so they never raise the invalid flag.

impl PartialEq for RoundedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for RoundedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if unsafe { mpfr::unordered_p(self.raw(), other.raw()) } != 0 {
            return None;
        }
        Some(unsafe { mpfr::cmp(self.raw(), other.raw()) }.cmp(&0))
    }
}

impl PartialEq<i64> for RoundedFloat {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<i64> for RoundedFloat {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        if self.is_nan() {
            return None;
        }
        let ord = match c_long::try_from(*other) {
            Ok(v) => unsafe { mpfr::cmp_si(self.raw(), v) },
            Err(_) => unsafe { mpfr::cmp_z(self.raw(), Integer::from(*other).raw()) },
        };
        Some(ord.cmp(&0))
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for RoundedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_radix(Radix::DECIMAL, 0, RoundingMode::Nearest))
    }
}

impl fmt::Debug for RoundedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundedFloat({}, {})", self, self.precision())
    }
}

impl RoundedFloat {
    /// Base-10 nearest-rounded [`RoundedFloat::parse`] with an error instead
    /// of `None`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for malformed text.
    pub fn from_str_with_precision(text: &str, precision: Precision) -> NumericResult<Self> {
        Self::parse(text, 10, precision, RoundingMode::Nearest)
            .map(Rounded::into_value)
            .ok_or(NumericError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(bits: i64) -> Precision {
        Precision::new(bits).unwrap()
    }

    fn rf(v: f64) -> RoundedFloat {
        RoundedFloat::from_f64(v, p(53), RoundingMode::Nearest).value
    }

    #[test]
    fn test_construction_and_ternary() {
        let exact = RoundedFloat::from_i64(5, p(8), RoundingMode::Nearest);
        assert!(exact.is_exact());
        assert_eq!(exact.value, 5i64);

        // 257 needs 9 bits
        let down = RoundedFloat::from_i64(257, p(8), RoundingMode::Down);
        assert_eq!(down.ternary, Ternary::RoundedDown);
        assert_eq!(down.value, 256i64);
        let up = RoundedFloat::from_i64(257, p(8), RoundingMode::Up);
        assert_eq!(up.ternary, Ternary::RoundedUp);
        assert_eq!(up.value, 258i64);

        let big = RoundedFloat::from_integer(&Integer::from(i64::MIN), p(64), RoundingMode::Nearest);
        assert_eq!(big.value, i64::MIN);
    }

    #[test]
    fn test_specials() {
        let nan = RoundedFloat::nan(p(53));
        assert!(nan.is_nan());
        assert_eq!(nan.sign(), None);
        assert_ne!(nan, nan.clone());
        assert!(nan.partial_cmp(&rf(1.0)).is_none());

        let neg_inf = RoundedFloat::infinity(p(53), true);
        assert!(neg_inf.is_infinite());
        assert!(neg_inf < rf(-1e300));
        assert_eq!(neg_inf.to_string(), "-inf");
        assert_eq!(RoundedFloat::from_f64(f64::INFINITY, p(53), RoundingMode::Nearest).value.to_string(), "inf");
        assert_eq!(nan.to_string(), "nan");
    }

    #[test]
    fn test_constants() {
        let pi = RoundedFloat::pi(p(53), RoundingMode::Nearest).value;
        assert_eq!(pi.to_f64(RoundingMode::Nearest), std::f64::consts::PI);
        let ln2 = RoundedFloat::ln2(p(53), RoundingMode::Nearest).value;
        assert_eq!(ln2.to_f64(RoundingMode::Nearest), std::f64::consts::LN_2);
        let lo = RoundedFloat::pi(p(20), RoundingMode::Down).value;
        let hi = RoundedFloat::pi(p(20), RoundingMode::Up).value;
        assert!(lo < hi);
    }

    #[test]
    fn test_parse_and_format() {
        let x = RoundedFloat::parse("-3.25", 10, p(53), RoundingMode::Nearest).unwrap();
        assert!(x.is_exact());
        assert_eq!(x.value.to_string(), "-3.25");
        assert_eq!(
            RoundedFloat::parse("ff.8", 16, p(53), RoundingMode::Nearest).unwrap().value,
            rf(255.5)
        );
        assert_eq!(rf(255.5).to_string_radix(Radix::HEX_UPPER, 0, RoundingMode::Nearest), "FF.8");
        assert_eq!(rf(0.0).to_string(), "0");
        assert_eq!(rf(1e-3).to_string_radix(Radix::DECIMAL, 3, RoundingMode::Nearest), "0.001");
        assert_eq!(rf(1234.0).to_string_radix(Radix::DECIMAL, 2, RoundingMode::Nearest), "1200");

        let third = RoundedFloat::parse("0.1", 10, p(53), RoundingMode::Nearest).unwrap();
        assert!(!third.is_exact());

        assert!(RoundedFloat::parse("1.2.3", 10, p(53), RoundingMode::Nearest).is_none());
        assert!(RoundedFloat::parse("", 10, p(53), RoundingMode::Nearest).is_none());
        assert!(RoundedFloat::parse("1", 70, p(53), RoundingMode::Nearest).is_none());
        assert!(RoundedFloat::parse("nan", 10, p(53), RoundingMode::Nearest).unwrap().value.is_nan());
        let neg_inf = RoundedFloat::parse("-@inf@", 36, p(53), RoundingMode::Nearest).unwrap().value;
        assert!(neg_inf.is_infinite() && neg_inf.is_sign_negative());
        assert_eq!(
            RoundedFloat::from_str_with_precision("x", p(53)),
            Err(NumericError::InvalidInput)
        );
    }

    #[test]
    fn test_special_words_do_not_shadow_digits() {
        // "inf" is 24171 in base 36 and "nan" is 13511 in base 24
        let inf_digits = RoundedFloat::from_i64(24171, p(53), RoundingMode::Nearest).value;
        let text = inf_digits.to_string_radix(Radix::new(36).unwrap(), 0, RoundingMode::Nearest);
        assert_eq!(text, "inf");
        assert_eq!(RoundedFloat::parse(&text, 36, p(53), RoundingMode::Nearest).unwrap().value, 24171i64);

        let nan_digits = RoundedFloat::from_i64(13511, p(53), RoundingMode::Nearest).value;
        let text = nan_digits.to_string_radix(Radix::new(24).unwrap(), 0, RoundingMode::Nearest);
        assert_eq!(text, "nan");
        assert_eq!(RoundedFloat::parse(&text, 24, p(53), RoundingMode::Nearest).unwrap().value, 13511i64);

        let base36 = Radix::new(36).unwrap();
        let inf = RoundedFloat::infinity(p(53), false);
        let neg_inf = RoundedFloat::infinity(p(53), true);
        let nan = RoundedFloat::nan(p(53));
        assert_eq!(inf.to_string_radix(base36, 0, RoundingMode::Nearest), "@inf@");
        assert_eq!(neg_inf.to_string_radix(base36, 0, RoundingMode::Nearest), "-@inf@");
        assert_eq!(nan.to_string_radix(base36, 0, RoundingMode::Nearest), "@nan@");
        assert_eq!(inf.to_string_radix(Radix::HEX, 0, RoundingMode::Nearest), "inf");

        let back = RoundedFloat::parse("-@inf@", 36, p(53), RoundingMode::Nearest).unwrap().value;
        assert!(back.is_infinite() && back.is_sign_negative());
        assert!(RoundedFloat::parse("@nan@", 62, p(53), RoundingMode::Nearest).unwrap().value.is_nan());
        assert!(RoundedFloat::parse("-inf", 16, p(53), RoundingMode::Nearest).unwrap().value.is_infinite());
    }

    #[test]
    fn test_parse_base_zero_detects_prefix() {
        let parse0 = |text: &str| RoundedFloat::parse(text, 0, p(53), RoundingMode::Nearest).unwrap().value;
        assert_eq!(parse0("0x10"), 16i64);
        assert_eq!(parse0("-0b101.1"), rf(-5.5));
        assert_eq!(parse0("1.5"), rf(1.5));
        assert_eq!(parse0("2.5e1"), 25i64);
        assert!(parse0("inf").is_infinite());
        assert!(RoundedFloat::parse("0x1g", 0, p(53), RoundingMode::Nearest).is_none());
    }

    #[test]
    fn test_extreme_exponents_use_exponent_notation() {
        let huge = rf(1.0).mul_pow2(1000, RoundingMode::Nearest).value;
        let text = huge.to_string();
        assert_eq!(text, "1.0715086071862673@301");
        assert_eq!(RoundedFloat::parse(&text, 10, p(53), RoundingMode::Nearest).unwrap().value, huge);

        let tiny = rf(-1.0).mul_pow2(-300, RoundingMode::Nearest).value;
        let text = tiny.to_string_radix(Radix::HEX, 0, RoundingMode::Nearest);
        assert_eq!(text, "-1@-75");
        assert_eq!(RoundedFloat::parse(&text, 16, p(53), RoundingMode::Nearest).unwrap().value, tiny);

        assert_eq!(rf(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn test_set_precision_rounds_with_mode() {
        let third = RoundedFloat::from_rational(&Rational::from_i64s(1, 3).unwrap(), p(200), RoundingMode::Nearest).value;
        let shared = third.clone();

        let mut down = third.clone();
        assert_eq!(down.set_precision(p(10), RoundingMode::Down), Ternary::RoundedDown);
        let mut up = third.clone();
        assert_eq!(up.set_precision(p(10), RoundingMode::Up), Ternary::RoundedUp);
        assert!(down < up);
        assert_eq!(down.precision(), p(10));
        assert_eq!(shared, third);
        assert_eq!(shared.precision(), p(200));

        let mut widened = rf(1.5);
        assert_eq!(widened.set_precision(p(300), RoundingMode::Nearest), Ternary::Exact);
        assert_eq!(widened, rf(1.5));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(rf(42.0).to_i64(), Some(42));
        assert_eq!(rf(42.5).to_i64(), None);
        assert_eq!(rf(1e30).to_i64(), None);
        assert_eq!(RoundedFloat::nan(p(53)).to_i64(), None);
        assert_eq!(rf(-2.5).to_integer(RoundingMode::Down).unwrap(), -3i64);
        assert_eq!(rf(-2.5).to_integer(RoundingMode::TowardZero).unwrap(), -2i64);
        assert!(RoundedFloat::infinity(p(53), false).to_integer(RoundingMode::Nearest).is_none());
        assert_eq!(rf(-0.375).to_rational().unwrap(), Rational::from_i64s(-3, 8).unwrap());
        assert_eq!(rf(0.1).to_f64(RoundingMode::Nearest), 0.1);
    }

    #[test]
    fn test_comparisons_leave_flags_alone() {
        let _guard = ExceptionTracker::serialize();
        ExceptionTracker::clear(ExceptionFlags::ALL);
        let nan = RoundedFloat::nan(p(53));
        assert!(nan.partial_cmp(&rf(0.0)).is_none());
        assert!(nan != 0i64);
        assert!(rf(1.0) > 0i64);
        assert!(rf(-0.0) == rf(0.0));
        assert!(!ExceptionTracker::test(ExceptionFlags::INVALID));
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let a = rf(2.0);
        let mut b = a.clone();
        assert!(a.shares_storage_with(&b));
        b.negate();
        assert!(!a.shares_storage_with(&b));
        assert_eq!(a, 2i64);
        assert_eq!(b, -2i64);
    }

    proptest! {
        #[test]
        fn prop_decimal_round_trip(v in any::<f64>().prop_filter("finite", |v| v.is_finite()), bits in 2i64..300) {
            let x = RoundedFloat::from_f64(v, p(bits), RoundingMode::Nearest).value;
            let text = x.to_string_radix(Radix::DECIMAL, 0, RoundingMode::Nearest);
            let back = RoundedFloat::parse(&text, 10, p(bits), RoundingMode::Nearest).unwrap().value;
            prop_assert_eq!(back, x);
        }

        #[test]
        fn prop_every_radix_round_trip(v in any::<f64>().prop_filter("finite", |v| v.is_finite()), base in prop_oneof![2i32..=62, -36i32..=-2]) {
            let x = RoundedFloat::from_f64(v, p(53), RoundingMode::Nearest).value;
            let text = x.to_string_radix(Radix::new(base).unwrap(), 0, RoundingMode::Nearest);
            let back = RoundedFloat::parse(&text, base, p(53), RoundingMode::Nearest).unwrap().value;
            prop_assert_eq!(back, x);
        }
    }
}
