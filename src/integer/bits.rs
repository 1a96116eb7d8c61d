// ============================================================================
// Bit Operations
// Two's-complement bitwise logic, bit access and byte import/export
// ============================================================================

use super::arith::bit_count;
use super::Integer;
use gmp_mpfr_sys::gmp::{self, mpz_t};
use std::os::raw::c_void;

/// Overwrite `dst` with the unsigned big-endian magnitude in `bytes`.
///
/// # Safety
/// `dst` must point to an initialized `mpz_t`.
pub(crate) unsafe fn import_magnitude(dst: *mut mpz_t, bytes: &[u8]) {
    gmp::mpz_import(dst, bytes.len(), 1, 1, 1, 0, bytes.as_ptr() as *const c_void);
}

impl Integer {
    pub fn and(&self, rhs: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_and(dst, self.raw(), rhs.raw()) })
    }

    pub fn or(&self, rhs: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_ior(dst, self.raw(), rhs.raw()) })
    }

    pub fn xor(&self, rhs: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_xor(dst, self.raw(), rhs.raw()) })
    }

    /// One's complement, `-self - 1`.
    pub fn complement(&self) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_com(dst, self.raw()) })
    }

    pub fn assign_and(&mut self, rhs: &Integer) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_and(dst, a, b) });
    }

    pub fn assign_or(&mut self, rhs: &Integer) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_ior(dst, a, b) });
    }

    pub fn assign_xor(&mut self, rhs: &Integer) {
        self.assign_binary(rhs, |dst, a, b| unsafe { gmp::mpz_xor(dst, a, b) });
    }

    /// Set bits; `None` for negative values (infinitely many).
    pub fn count_ones(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        Some(unsafe { gmp::mpz_popcount(self.raw()) } as u64)
    }

    /// Differing bits; `None` when the signs differ.
    pub fn hamming_distance(&self, other: &Integer) -> Option<u64> {
        if self.is_negative() != other.is_negative() {
            return None;
        }
        Some(unsafe { gmp::mpz_hamdist(self.raw(), other.raw()) } as u64)
    }

    pub fn test_bit(&self, index: u64) -> bool {
        unsafe { gmp::mpz_tstbit(self.raw(), bit_count(index)) != 0 }
    }

    pub fn set_bit(&mut self, index: u64) {
        let p = self.raw_mut();
        unsafe { gmp::mpz_setbit(p, bit_count(index)) };
    }

    pub fn clear_bit(&mut self, index: u64) {
        let p = self.raw_mut();
        unsafe { gmp::mpz_clrbit(p, bit_count(index)) };
    }

    pub fn toggle_bit(&mut self, index: u64) {
        let p = self.raw_mut();
        unsafe { gmp::mpz_combit(p, bit_count(index)) };
    }

    /// First set bit at or after `start`.
    pub fn find_one(&self, start: u64) -> Option<u64> {
        let found = unsafe { gmp::mpz_scan1(self.raw(), bit_count(start)) };
        (found != gmp::bitcnt_t::MAX).then_some(found as u64)
    }

    /// First clear bit at or after `start`.
    pub fn find_zero(&self, start: u64) -> Option<u64> {
        let found = unsafe { gmp::mpz_scan0(self.raw(), bit_count(start)) };
        (found != gmp::bitcnt_t::MAX).then_some(found as u64)
    }

    /// Magnitude as big-endian bytes without leading zeros; empty for zero.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let len = ((self.significant_bits() + 7) / 8) as usize;
        let mut bytes = vec![0u8; len];
        if len > 0 {
            let mut written = 0usize;
            unsafe {
                gmp::mpz_export(
                    bytes.as_mut_ptr() as *mut c_void,
                    &mut written,
                    1,
                    1,
                    1,
                    0,
                    self.raw(),
                );
            }
            bytes.truncate(written);
        }
        bytes
    }

    /// Non-negative value from big-endian magnitude bytes.
    pub fn from_bytes_be(bytes: &[u8]) -> Integer {
        Integer::compute(|dst| unsafe { import_magnitude(dst, bytes) })
    }
}

forward_ref_binops! { Integer;
    BitAnd::bitand, BitAndAssign::bitand_assign => and, assign_and;
    BitOr::bitor, BitOrAssign::bitor_assign => or, assign_or;
    BitXor::bitxor, BitXorAssign::bitxor_assign => xor, assign_xor;
}

impl<'a> std::ops::Not for &'a Integer {
    type Output = Integer;

    fn not(self) -> Integer {
        self.complement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Integer {
        Integer::from(v)
    }

    #[test]
    fn test_bitwise_twos_complement() {
        assert_eq!(int(0b1100).and(&int(0b1010)), 0b1000i64);
        assert_eq!(&int(0b1100) | &int(0b1010), 0b1110i64);
        assert_eq!(&int(0b1100) ^ &int(0b1010), 0b0110i64);
        assert_eq!(!&int(5), -6i64);
        assert_eq!(int(-1).and(&int(0xff)), 0xffi64);
    }

    #[test]
    fn test_bit_access() {
        let mut x = Integer::new();
        x.set_bit(70);
        assert!(x.test_bit(70));
        assert_eq!(x.significant_bits(), 71);
        x.toggle_bit(0);
        assert!(x.is_odd());
        x.clear_bit(70);
        assert_eq!(x, 1i64);
        assert_eq!(int(0b1000).find_one(0), Some(3));
        assert_eq!(int(0).find_one(0), None);
        assert_eq!(int(0b0111).find_zero(0), Some(3));
    }

    #[test]
    fn test_bit_mutation_is_copy_on_write() {
        let a = int(0);
        let mut b = a.clone();
        b.set_bit(3);
        assert_eq!(a, 0i64);
        assert_eq!(b, 8i64);
    }

    #[test]
    fn test_population_counts() {
        assert_eq!(int(0xff).count_ones(), Some(8));
        assert_eq!(int(-1).count_ones(), None);
        assert_eq!(int(0b1010).hamming_distance(&int(0b0110)), Some(2));
        assert_eq!(int(-1).hamming_distance(&int(1)), None);
    }

    #[test]
    fn test_bytes_round_trip() {
        let x = Integer::parse("0102030405060708090a", 16).unwrap();
        let bytes = x.to_bytes_be();
        assert_eq!(bytes, (1u8..=10).collect::<Vec<_>>());
        assert_eq!(Integer::from_bytes_be(&bytes), x);
        assert!(Integer::new().to_bytes_be().is_empty());
        assert_eq!(Integer::from_bytes_be(&[0, 0, 1]), 1i64);
        assert_eq!(int(-258).to_bytes_be(), vec![1, 2]);
    }
}
