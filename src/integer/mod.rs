// ============================================================================
// Integer
// Arbitrary-precision signed integer with copy-on-write value semantics
// ============================================================================

mod arith;
mod bits;
mod number_theory;

pub use number_theory::Primality;

pub(crate) use arith::bit_count;
pub(crate) use bits::import_magnitude;

use crate::convert::{Radix, RadixFormat};
use crate::native::{buffer_to_string, to_c_string, NativeHandle, ValueContainer};
use crate::numeric::{NumericError, NumericResult};
use gmp_mpfr_sys::gmp::{self, mpz_t};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::os::raw::{c_char, c_long, c_ulong};
use std::str::FromStr;

/// Arbitrary-precision integer.
///
/// Clones are cheap and share storage; the first mutation of a shared value
/// deep copies it, so a clone never sees another clone's changes.
///
/// # Example
/// ```
/// use multiprecision::Integer;
///
/// let a = Integer::from(1u64 << 40);
/// let b = a.mul(&a);
/// assert_eq!(b.to_string(), "1208925819614629174706176");
/// assert_eq!(a.to_string(), "1099511627776");
/// ```
#[derive(Clone)]
pub struct Integer {
    container: ValueContainer<mpz_t>,
}

// ============================================================================
// Storage Plumbing
// ============================================================================

impl Integer {
    #[inline]
    pub(crate) fn from_handle(handle: NativeHandle<mpz_t>) -> Self {
        Self {
            container: ValueContainer::from_handle(handle),
        }
    }

    /// Run `f` against a fresh zero-valued destination and wrap the result.
    #[inline]
    pub(crate) fn compute<F: FnOnce(*mut mpz_t)>(f: F) -> Self {
        let mut handle = NativeHandle::new();
        f(handle.as_mut_ptr());
        Self::from_handle(handle)
    }

    #[inline]
    pub(crate) fn raw(&self) -> *const mpz_t {
        self.container.as_ptr()
    }

    /// Unique pointer for single-operand in-place mutation.
    #[inline]
    pub(crate) fn raw_mut(&mut self) -> *mut mpz_t {
        self.container.ensure_unique()
    }

    /// In-place binary update `self = op(self, rhs)`.
    ///
    /// When both operands share one native struct the result is computed
    /// into a fresh destination and swapped in, instead of handing the
    /// engine the same storage as destination and source.
    pub(crate) fn assign_binary<F>(&mut self, rhs: &Integer, op: F)
    where
        F: FnOnce(*mut mpz_t, *const mpz_t, *const mpz_t),
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

    /// Copy with storage of its own, never shared with `self`.
    pub fn deep_copy(&self) -> Self {
        Self {
            container: self.container.detached(),
        }
    }

    /// Whether both values currently reference the same native struct.
    #[inline]
    pub fn shares_storage_with(&self, other: &Integer) -> bool {
        self.container.shares_storage_with(&other.container)
    }

    /// Number of values referencing this value's native struct.
    #[inline]
    pub fn storage_ref_count(&self) -> usize {
        self.container.ref_count()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Integer {
    /// Zero.
    pub fn new() -> Self {
        Self {
            container: ValueContainer::new(),
        }
    }

    pub fn zero() -> Self {
        Self::new()
    }

    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// Truncate a finite `f64` toward zero; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self::compute(|dst| unsafe { gmp::mpz_set_d(dst, value) }))
    }

    /// Parse `text` in `base` (`0` auto-detects `0x`, `0b`, `0` prefixes).
    ///
    /// Returns `None` for malformed text or an invalid base. The result is
    /// built in fresh storage, so a failed parse never leaves a half-written
    /// value behind.
    pub fn parse(text: &str, base: i32) -> Option<Self> {
        let base = Radix::engine_parse_base(base)?;
        let c_text = to_c_string(text)?;
        let mut handle = NativeHandle::<mpz_t>::new();
        let rc = unsafe { gmp::mpz_set_str(handle.as_mut_ptr(), c_text.as_ptr(), base) };
        if rc == 0 {
            Some(Self::from_handle(handle))
        } else {
            None
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self::compute(|dst| unsafe {
            match c_ulong::try_from(value) {
                Ok(v) => gmp::mpz_set_ui(dst, v),
                Err(_) => import_magnitude(dst, &value.to_be_bytes()),
            }
        })
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        // unsigned_abs keeps i64::MIN representable
        let mut out = Self::from(value.unsigned_abs());
        if value < 0 {
            out.negate();
        }
        out
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u128> for Integer {
    fn from(value: u128) -> Self {
        Self::compute(|dst| unsafe { import_magnitude(dst, &value.to_be_bytes()) })
    }
}

impl From<i128> for Integer {
    fn from(value: i128) -> Self {
        let mut out = Self::from(value.unsigned_abs());
        if value < 0 {
            out.negate();
        }
        out
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Integer {
    /// Sign as an ordering against zero.
    #[inline]
    pub fn sign(&self) -> Ordering {
        unsafe { gmp::mpz_sgn(self.raw()) }.cmp(&0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign() == Ordering::Greater
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == Ordering::Less
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        !self.test_bit(0)
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.test_bit(0)
    }

    /// Bits needed for the magnitude; zero for zero.
    pub fn significant_bits(&self) -> u64 {
        if self.is_zero() {
            0
        } else {
            unsafe { gmp::mpz_sizeinbase(self.raw(), 2) as u64 }
        }
    }

    /// Magnitude as `u128`, `None` when wider than 128 bits.
    fn magnitude_u128(&self) -> Option<u128> {
        if self.significant_bits() > 128 {
            return None;
        }
        Some(
            self.to_bytes_be()
                .iter()
                .fold(0u128, |acc, &b| (acc << 8) | u128::from(b)),
        )
    }

    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = self.magnitude_u128()?;
        if self.is_negative() {
            if magnitude <= i128::MAX as u128 + 1 {
                Some((magnitude as i128).wrapping_neg())
            } else {
                None
            }
        } else {
            i128::try_from(magnitude).ok()
        }
    }

    pub fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            None
        } else {
            self.magnitude_u128()
        }
    }

    /// Exact conversion, `None` when out of range.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|v| i64::try_from(v).ok())
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }

    #[inline]
    pub fn fits_i64(&self) -> bool {
        self.to_i64().is_some()
    }

    /// Nearest `f64` truncated toward zero (engine semantics).
    pub fn to_f64(&self) -> f64 {
        unsafe { gmp::mpz_get_d(self.raw()) }
    }

    /// Render in `radix` with an optional leading `-`.
    pub fn to_string_radix(&self, radix: Radix) -> String {
        let size = unsafe { gmp::mpz_sizeinbase(self.raw(), radix.magnitude()) } + 2;
        let mut buffer = vec![0u8; size];
        unsafe {
            gmp::mpz_get_str(
                buffer.as_mut_ptr() as *mut c_char,
                radix.get(),
                self.raw(),
            );
        }
        buffer_to_string(buffer)
    }

    /// Convert to `rust_decimal::Decimal` at scale 0.
    ///
    /// # Errors
    /// Returns `Overflow` beyond the 96-bit decimal mantissa.
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let value = self.to_i128().ok_or(NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(value, 0).map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// Comparison and Hashing
// ============================================================================

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.shares_storage_with(other) {
            return Ordering::Equal;
        }
        unsafe { gmp::mpz_cmp(self.raw(), other.raw()) }.cmp(&0)
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<i64> for Integer {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        let ord = match c_long::try_from(*other) {
            Ok(v) => unsafe { gmp::mpz_cmp_si(self.raw(), v) }.cmp(&0),
            Err(_) => self.cmp(&Integer::from(*other)),
        };
        Some(ord)
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign().hash(state);
        self.to_bytes_be().hash(state);
    }
}

// ============================================================================
// Display, Parsing, Serialization
// ============================================================================

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string_radix(Radix::DECIMAL);
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        f.pad_integral(!negative, "", digits)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

impl fmt::LowerHex for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string_radix(Radix::HEX);
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        f.pad_integral(!negative, "0x", digits)
    }
}

impl fmt::UpperHex for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string_radix(Radix::HEX_UPPER);
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        f.pad_integral(!negative, "0x", digits)
    }
}

impl fmt::Binary for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string_radix(Radix::BINARY);
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        f.pad_integral(!negative, "0b", digits)
    }
}

impl FromStr for Integer {
    type Err = NumericError;

    /// Parse a base-10 integer with an optional leading `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 10).ok_or(NumericError::InvalidInput)
    }
}

impl RadixFormat for Integer {
    fn format_radix(&self, radix: Radix) -> String {
        self.to_string_radix(radix)
    }

    fn parse_radix(text: &str, base: i32) -> Option<Self> {
        Self::parse(text, base)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Integer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_radix(Radix::DECIMAL))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Integer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Integer::parse(&text, 10)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid integer: {text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_construction_from_primitives() {
        assert_eq!(Integer::new().to_string(), "0");
        assert_eq!(Integer::from(-42i64).to_string(), "-42");
        assert_eq!(Integer::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Integer::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(
            Integer::from(i128::MIN).to_string(),
            "-170141183460469231731687303715884105728"
        );
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Integer::from_f64(-3.99).unwrap(), -3i64);
        assert_eq!(Integer::from_f64(1e20).unwrap().to_string(), "100000000000000000000");
        assert!(Integer::from_f64(f64::NAN).is_none());
        assert!(Integer::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_fits_requires_range() {
        assert_eq!(Integer::from(i64::MAX).to_i64(), Some(i64::MAX));
        assert_eq!(Integer::from(i64::MIN).to_i64(), Some(i64::MIN));
        let past_max = Integer::from(i64::MAX).add_i64(1);
        assert_eq!(past_max.to_i64(), None);
        assert_eq!(past_max.to_u64(), Some(1u64 << 63));
        assert_eq!(Integer::from(-1i64).to_u64(), None);
        assert!(!Integer::from(u128::MAX).fits_i64());
    }

    #[test]
    fn test_to_string_radix() {
        let x = Integer::from(255u64);
        assert_eq!(x.to_string_radix(Radix::HEX), "ff");
        assert_eq!(x.to_string_radix(Radix::HEX_UPPER), "FF");
        assert_eq!(x.to_string_radix(Radix::BINARY), "11111111");
        assert_eq!(Integer::from(-61i64).to_string_radix(Radix::new(62).unwrap()), "-z");
    }

    #[test]
    fn test_parse_valid_and_invalid() {
        assert_eq!(Integer::parse("ff", 16).unwrap(), 255i64);
        assert_eq!(Integer::parse("0x1f", 0).unwrap(), 31i64);
        assert_eq!(Integer::parse("-101", 2).unwrap(), -5i64);
        assert_eq!(Integer::parse("FF", -16).unwrap(), 255i64);
        assert!(Integer::parse("", 10).is_none());
        assert!(Integer::parse("12a", 10).is_none());
        assert!(Integer::parse("1 2", 10).is_none());
        assert!(Integer::parse("10", 1).is_none());
        assert!(Integer::parse("10", 63).is_none());
    }

    #[test]
    fn test_from_str_and_display_padding() {
        let x: Integer = "-1234".parse().unwrap();
        assert_eq!(format!("{:>8}", x), "   -1234");
        assert_eq!(format!("{:#x}", Integer::from(255u64)), "0xff");
        assert_eq!(format!("{:X}", Integer::from(255u64)), "FF");
        assert_eq!(format!("{:b}", Integer::from(5u64)), "101");
        assert_eq!("nope".parse::<Integer>(), Err(NumericError::InvalidInput));
    }

    #[test]
    fn test_ordering_and_i64_comparison() {
        let a = Integer::from(-5i64);
        let b = Integer::from(7i64);
        assert!(a < b);
        assert!(a == -5i64);
        assert!(b > 6i64);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Integer::from(12i64));
        assert!(set.contains(&Integer::parse("c", 16).unwrap()));
        assert!(!set.contains(&Integer::from(-12i64)));
    }

    #[test]
    fn test_clone_shares_until_mutation() {
        let a = Integer::from(10i64);
        let mut b = a.clone();
        assert!(a.shares_storage_with(&b));
        assert_eq!(a.storage_ref_count(), 2);

        b.assign_add_i64(1);
        assert!(!a.shares_storage_with(&b));
        assert_eq!(a, 10i64);
        assert_eq!(b, 11i64);
    }

    #[test]
    fn test_deep_copy_is_unshared() {
        let a = Integer::from(3i64);
        let b = a.deep_copy();
        assert!(!a.shares_storage_with(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Integer::from(-12345i64).to_decimal().unwrap().to_string(), "-12345");
        assert_eq!(
            Integer::from(u128::MAX).to_decimal(),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Integer>();
    }

    #[test]
    fn test_shared_reads_across_threads() {
        let a = Integer::from(u64::MAX).mul(&Integer::from(u64::MAX));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let local = a.clone();
                std::thread::spawn(move || local.to_string())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), a.to_string());
        }
    }

    proptest! {
        #[test]
        fn prop_radix_round_trip(v in any::<i128>(), base in prop_oneof![2i32..=62, -36i32..=-2]) {
            let x = Integer::from(v);
            let radix = Radix::new(base).unwrap();
            let text = x.to_string_radix(radix);
            prop_assert_eq!(Integer::parse(&text, base), Some(x));
        }

        #[test]
        fn prop_i128_conversion_exact(v in any::<i128>()) {
            prop_assert_eq!(Integer::from(v).to_i128(), Some(v));
        }
    }
}
