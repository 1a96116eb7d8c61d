// ============================================================================
// Rational
// Exact fraction kept in reduced form, with copy-on-write value semantics
// ============================================================================

mod arith;
mod canonical;

pub use canonical::Canonicalizer;

use crate::convert::{Radix, RadixFormat};
use crate::integer::Integer;
use crate::native::{buffer_to_string, to_c_string, NativeHandle, ValueContainer};
use crate::numeric::{NumericError, NumericResult};
use gmp_mpfr_sys::gmp::{self, mpq_t};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::os::raw::c_char;
use std::str::FromStr;

/// Arbitrary-precision rational number.
///
/// Every value is canonical: the denominator is positive, numerator and
/// denominator share no common factor, and zero is `0/1`.
///
/// # Example
/// ```
/// use multiprecision::Rational;
///
/// let half = Rational::from_i64s(1, 2).unwrap();
/// let third = Rational::from_i64s(1, 3).unwrap();
/// assert_eq!((&half + &third).to_string(), "5/6");
/// ```
#[derive(Clone)]
pub struct Rational {
    container: ValueContainer<mpq_t>,
}

// ============================================================================
// Storage Plumbing
// ============================================================================

impl Rational {
    #[inline]
    pub(crate) fn from_handle(handle: NativeHandle<mpq_t>) -> Self {
        debug_assert!(unsafe { canonical::is_canonical(handle.as_ptr()) });
        Self {
            container: ValueContainer::from_handle(handle),
        }
    }

    /// Run `f` against a fresh `0/1` destination. `f` must leave it canonical.
    #[inline]
    pub(crate) fn compute<F: FnOnce(*mut mpq_t)>(f: F) -> Self {
        let mut handle = NativeHandle::new();
        f(handle.as_mut_ptr());
        Self::from_handle(handle)
    }

    #[inline]
    pub(crate) fn raw(&self) -> *const mpq_t {
        self.container.as_ptr()
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self) -> *mut mpq_t {
        self.container.ensure_unique()
    }

    /// In-place binary update; aliased operands go through a fresh
    /// destination.
    pub(crate) fn assign_binary<F>(&mut self, rhs: &Rational, op: F)
    where
        F: FnOnce(*mut mpq_t, *const mpq_t, *const mpq_t),
    {
        if self.container.shares_storage_with(&rhs.container) {
            let mut out = NativeHandle::new();
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
    pub fn shares_storage_with(&self, other: &Rational) -> bool {
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

impl Rational {
    /// Zero, `0/1`.
    pub fn new() -> Self {
        Self {
            container: ValueContainer::new(),
        }
    }

    pub fn from_integer(value: &Integer) -> Self {
        Self::compute(|dst| unsafe { gmp::mpq_set_z(dst, value.raw()) })
    }

    /// Canonical `numerator / denominator`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `denominator` is zero.
    pub fn from_parts(numerator: &Integer, denominator: &Integer) -> NumericResult<Self> {
        if denominator.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::compute(|dst| unsafe {
            gmp::mpz_set(gmp::mpq_numref(dst), numerator.raw());
            gmp::mpz_set(gmp::mpq_denref(dst), denominator.raw());
            canonical::reduce_nonzero(dst);
        }))
    }

    /// # Errors
    /// Returns `DivisionByZero` when `denominator` is zero.
    pub fn from_i64s(numerator: i64, denominator: i64) -> NumericResult<Self> {
        Self::from_parts(&Integer::from(numerator), &Integer::from(denominator))
    }

    /// Exact value of a finite `f64`; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self::compute(|dst| unsafe { gmp::mpq_set_d(dst, value) }))
    }

    /// Exact value of a decimal: `mantissa / 10^scale`, reduced.
    pub fn from_decimal(value: Decimal) -> Self {
        let numerator = Integer::from(value.mantissa());
        let denominator = Integer::from(10u32).pow(value.scale());
        Self::compute(|dst| unsafe {
            gmp::mpz_set(gmp::mpq_numref(dst), numerator.raw());
            gmp::mpz_set(gmp::mpq_denref(dst), denominator.raw());
            canonical::reduce_nonzero(dst);
        })
    }

    /// Parse `num/den` or `num` in `base`.
    ///
    /// `None` for malformed text, an invalid base, or a zero denominator.
    /// Non-reduced input such as `6/8` is accepted and reduced.
    pub fn parse(text: &str, base: i32) -> Option<Self> {
        let base = Radix::engine_parse_base(base)?;
        let c_text = to_c_string(text)?;
        let mut handle = NativeHandle::<mpq_t>::new();
        let raw = handle.as_mut_ptr();
        let rc = unsafe { gmp::mpq_set_str(raw, c_text.as_ptr(), base) };
        if rc != 0 {
            return None;
        }
        unsafe { canonical::canonicalize(raw) }.ok()?;
        Some(Self::from_handle(handle))
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Integer> for Rational {
    fn from(value: &Integer) -> Self {
        Self::from_integer(value)
    }
}

impl From<Integer> for Rational {
    fn from(value: Integer) -> Self {
        Self::from_integer(&value)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(&Integer::from(value))
    }
}

impl From<Decimal> for Rational {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

// ============================================================================
// Parts
// ============================================================================

impl Rational {
    pub fn numerator(&self) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpq_get_num(dst, self.raw()) })
    }

    /// Always positive.
    pub fn denominator(&self) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpq_get_den(dst, self.raw()) })
    }

    pub fn into_parts(self) -> (Integer, Integer) {
        (self.numerator(), self.denominator())
    }

    /// Replace the numerator and re-reduce.
    pub fn set_numerator(&mut self, numerator: &Integer) {
        let p = self.raw_mut();
        unsafe {
            gmp::mpz_set(gmp::mpq_numref(p), numerator.raw());
            canonical::reduce_nonzero(p);
        }
    }

    /// Replace the denominator and re-reduce.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator; `self` is unchanged.
    pub fn set_denominator(&mut self, denominator: &Integer) -> NumericResult<()> {
        if denominator.is_zero() {
            tracing::debug!("rejecting zero denominator");
            return Err(NumericError::DivisionByZero);
        }
        let p = self.raw_mut();
        unsafe {
            gmp::mpz_set(gmp::mpq_denref(p), denominator.raw());
            canonical::reduce_nonzero(p);
        }
        Ok(())
    }

    /// Replace both parts and re-reduce.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator; `self` is unchanged.
    pub fn set_parts(&mut self, numerator: &Integer, denominator: &Integer) -> NumericResult<()> {
        *self = Self::from_parts(numerator, denominator)?;
        Ok(())
    }
}

// ============================================================================
// Queries and Conversions
// ============================================================================

impl Rational {
    #[inline]
    pub fn sign(&self) -> Ordering {
        unsafe { gmp::mpq_sgn(self.raw()) }.cmp(&0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign() == Ordering::Greater
    }

    /// Whether the denominator is one.
    pub fn is_integer(&self) -> bool {
        unsafe { gmp::mpz_cmp_ui(gmp::mpq_denref_const(self.raw()), 1) == 0 }
    }

    /// Exact conversion: `None` unless integral and within `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.numerator().to_i64()
    }

    #[inline]
    pub fn fits_i64(&self) -> bool {
        self.to_i64().is_some()
    }

    /// Nearest `f64`, truncated toward zero.
    pub fn to_f64(&self) -> f64 {
        unsafe { gmp::mpq_get_d(self.raw()) }
    }

    /// `rust_decimal` approximation, rounded to the decimal's 28 digits.
    ///
    /// # Errors
    /// Returns `Overflow` when either part lies outside the decimal range.
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        let numerator = self.numerator().to_decimal()?;
        let denominator = self.denominator().to_decimal()?;
        numerator
            .checked_div(denominator)
            .ok_or(NumericError::Overflow)
    }

    /// `num/den`, or just `num` for integral values.
    pub fn to_string_radix(&self, radix: Radix) -> String {
        let base = radix.magnitude();
        let size = unsafe {
            gmp::mpz_sizeinbase(gmp::mpq_numref_const(self.raw()), base)
                + gmp::mpz_sizeinbase(gmp::mpq_denref_const(self.raw()), base)
        } + 3;
        let mut buffer = vec![0u8; size];
        unsafe {
            gmp::mpq_get_str(buffer.as_mut_ptr() as *mut c_char, radix.get(), self.raw());
        }
        buffer_to_string(buffer)
    }
}

// ============================================================================
// Comparison and Hashing
// ============================================================================

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other) || unsafe { gmp::mpq_equal(self.raw(), other.raw()) != 0 }
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.shares_storage_with(other) {
            return Ordering::Equal;
        }
        unsafe { gmp::mpq_cmp(self.raw(), other.raw()) }.cmp(&0)
    }
}

impl PartialEq<Integer> for Rational {
    fn eq(&self, other: &Integer) -> bool {
        unsafe { gmp::mpq_cmp_z(self.raw(), other.raw()) == 0 }
    }
}

impl PartialOrd<Integer> for Rational {
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(unsafe { gmp::mpq_cmp_z(self.raw(), other.raw()) }.cmp(&0))
    }
}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // canonical parts are unique per value
        self.numerator().hash(state);
        self.denominator().hash(state);
    }
}

// ============================================================================
// Display, Parsing, Serialization
// ============================================================================

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_radix(Radix::DECIMAL))
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self)
    }
}

impl FromStr for Rational {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 10).ok_or(NumericError::InvalidInput)
    }
}

impl RadixFormat for Rational {
    fn format_radix(&self, radix: Radix) -> String {
        self.to_string_radix(radix)
    }

    fn parse_radix(text: &str, base: i32) -> Option<Self> {
        Self::parse(text, base)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rational {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_radix(Radix::DECIMAL))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rational {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Rational::parse(&text, 10)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid rational: {text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quickcheck::{quickcheck, TestResult};

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64s(n, d).unwrap()
    }

    #[test]
    fn test_construction_reduces() {
        let r = q(6, 8);
        assert_eq!(r.numerator(), Integer::from(3i64));
        assert_eq!(r.denominator(), Integer::from(4i64));
        assert_eq!(q(3, -9).to_string(), "-1/3");
        assert_eq!(q(0, -5).to_string(), "0");
        assert_eq!(q(0, -5).denominator(), Integer::from(1i64));
        assert_eq!(Rational::from_i64s(1, 0), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_extreme_parts() {
        let r = q(i64::MIN, i64::MIN);
        assert_eq!(r.to_i64(), Some(1));
        let s = q(1, i64::MIN);
        assert_eq!(s.to_string(), "-1/9223372036854775808");
    }

    #[test]
    fn test_setters_canonicalize() {
        let mut r = q(1, 4);
        r.set_numerator(&Integer::from(2i64));
        assert_eq!(r.to_string(), "1/2");
        r.set_denominator(&Integer::from(-6i64)).unwrap();
        assert_eq!(r.to_string(), "-1/6");
        r.set_parts(&Integer::from(10i64), &Integer::from(4i64)).unwrap();
        assert_eq!(r.to_string(), "5/2");
    }

    #[test]
    fn test_zero_denominator_setter_leaves_value() {
        let mut r = q(3, 7);
        assert_eq!(
            r.set_denominator(&Integer::new()),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            r.set_parts(&Integer::one(), &Integer::new()),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(r, q(3, 7));
    }

    #[test]
    fn test_setter_does_not_leak_into_clone() {
        let a = q(1, 3);
        let mut b = a.clone();
        b.set_numerator(&Integer::from(2i64));
        assert_eq!(a.to_string(), "1/3");
        assert_eq!(b.to_string(), "2/3");
    }

    #[test]
    fn test_radix_format_and_parse() {
        let r = q(255, 16);
        assert_eq!(r.to_string_radix(Radix::HEX), "ff/10");
        assert_eq!(Rational::parse("ff/10", 16).unwrap(), r);
        assert_eq!(Rational::parse("6/8", 10).unwrap(), q(3, 4));
        assert_eq!(Rational::parse("1/-2", 10).unwrap(), q(-1, 2));
        assert_eq!(Rational::parse("42", 10).unwrap().to_string(), "42");
        assert!(Rational::parse("1/0", 10).is_none());
        assert!(Rational::parse("1/", 10).is_none());
        assert!(Rational::parse("", 10).is_none());
        assert!(Rational::parse("1/2", 63).is_none());
    }

    #[test]
    fn test_f64_and_decimal_conversions() {
        assert_eq!(Rational::from_f64(0.375).unwrap(), q(3, 8));
        assert!(Rational::from_f64(f64::NAN).is_none());
        assert_eq!(q(1, 4).to_f64(), 0.25);

        let d = Decimal::new(-125, 2);
        assert_eq!(Rational::from_decimal(d), q(-5, 4));
        assert_eq!(q(-5, 4).to_decimal().unwrap(), d);
        assert_eq!(Rational::from(Decimal::new(7, 0)), q(7, 1));
    }

    #[test]
    fn test_to_i64_requires_integer_and_range() {
        assert_eq!(q(8, 2).to_i64(), Some(4));
        assert_eq!(q(7, 2).to_i64(), None);
        let big = Rational::from_integer(&Integer::from(i64::MAX).add_i64(1));
        assert!(big.is_integer());
        assert!(!big.fits_i64());
    }

    #[test]
    fn test_ordering_and_integer_comparison() {
        assert!(q(1, 3) < q(1, 2));
        assert!(q(-1, 2) < q(-1, 3));
        assert_eq!(q(4, 2), Integer::from(2i64));
        assert!(q(5, 2) > Integer::from(2i64));
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(q(2, 4));
        assert!(set.contains(&q(1, 2)));
        assert!(set.contains(&Rational::parse("3/6", 10).unwrap()));
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:>6}", q(1, 2)), "   1/2");
        assert_eq!(format!("{:?}", q(-1, 2)), "Rational(-1/2)");
    }

    proptest! {
        #[test]
        fn prop_constructed_values_are_canonical(n in any::<i64>(), d in any::<i64>().prop_filter("non-zero", |d| *d != 0)) {
            let r = Rational::from_i64s(n, d).unwrap();
            prop_assert!(Canonicalizer::is_canonical(&r.numerator(), &r.denominator()));
        }

        #[test]
        fn prop_radix_round_trip(n in any::<i64>(), d in 1i64..=i64::MAX, base in prop_oneof![2i32..=62, -36i32..=-2]) {
            let r = Rational::from_i64s(n, d).unwrap();
            let text = r.to_string_radix(Radix::new(base).unwrap());
            prop_assert_eq!(Rational::parse(&text, base), Some(r));
        }
    }

    #[test]
    fn test_quickcheck_cross_multiplication() {
        fn agrees(a: i64, b: i64, c: i64, d: i64) -> TestResult {
            if b == 0 || d == 0 {
                return TestResult::discard();
            }
            let lhs = Rational::from_i64s(a, b).unwrap();
            let rhs = Rational::from_i64s(c, d).unwrap();
            let cross = Integer::from(a)
                .mul(&Integer::from(d))
                .cmp(&Integer::from(c).mul(&Integer::from(b)));
            let sign_flip = (b < 0) != (d < 0);
            let expected = if sign_flip { cross.reverse() } else { cross };
            TestResult::from_bool(lhs.cmp(&rhs) == expected)
        }
        quickcheck(agrees as fn(i64, i64, i64, i64) -> TestResult);
    }
}
