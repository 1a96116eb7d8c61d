// ============================================================================
// Canonicalizer
// Reduced normal form for rationals whose parts were set independently
// ============================================================================
//
// Canonical form: denominator > 0, gcd(|numerator|, denominator) = 1, and
// zero is exactly 0/1.
//
// Fused engine arithmetic (add, mul, inverse, ...) already returns canonical
// results and skips this pass. It runs only after a numerator or
// denominator was written directly.

use crate::integer::Integer;
use crate::native::NativeHandle;
use crate::numeric::{NumericError, NumericResult};
use gmp_mpfr_sys::gmp::{self, mpq_t, mpz_t};

/// Reduces numerator/denominator pairs to canonical form.
pub struct Canonicalizer;

impl Canonicalizer {
    /// Reduce `(numerator, denominator)`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator.
    ///
    /// # Example
    /// ```
    /// use multiprecision::{Canonicalizer, Integer};
    ///
    /// let (n, d) = Canonicalizer::reduce(&Integer::from(6), &Integer::from(-8)).unwrap();
    /// assert_eq!((n.to_i64(), d.to_i64()), (Some(-3), Some(4)));
    /// ```
    pub fn reduce(numerator: &Integer, denominator: &Integer) -> NumericResult<(Integer, Integer)> {
        let mut pair = NativeHandle::<mpq_t>::new();
        let raw = pair.as_mut_ptr();
        unsafe {
            gmp::mpz_set(gmp::mpq_numref(raw), numerator.raw());
            gmp::mpz_set(gmp::mpq_denref(raw), denominator.raw());
            canonicalize(raw)?;
        }
        let num = Integer::compute(|dst| unsafe { gmp::mpq_get_num(dst, pair.as_ptr()) });
        let den = Integer::compute(|dst| unsafe { gmp::mpq_get_den(dst, pair.as_ptr()) });
        Ok((num, den))
    }

    /// Whether the pair is already canonical.
    pub fn is_canonical(numerator: &Integer, denominator: &Integer) -> bool {
        unsafe { parts_are_canonical(numerator.raw(), denominator.raw()) }
    }
}

unsafe fn parts_are_canonical(num: *const mpz_t, den: *const mpz_t) -> bool {
    if gmp::mpz_sgn(den) <= 0 {
        return false;
    }
    if gmp::mpz_sgn(num) == 0 {
        return gmp::mpz_cmp_ui(den, 1) == 0;
    }
    let mut g = NativeHandle::<mpz_t>::new();
    gmp::mpz_gcd(g.as_mut_ptr(), num, den);
    gmp::mpz_cmp_ui(g.as_ptr(), 1) == 0
}

/// Whether the engine rational at `raw` is canonical.
///
/// # Safety
/// `raw` must point to an initialized `mpq_t`.
pub(crate) unsafe fn is_canonical(raw: *const mpq_t) -> bool {
    parts_are_canonical(gmp::mpq_numref_const(raw), gmp::mpq_denref_const(raw))
}

/// Canonicalize the engine rational at `raw` in place.
///
/// The zero-denominator check runs before any write, so on error the value
/// is exactly as it was.
///
/// # Safety
/// `raw` must point to an initialized, uniquely owned `mpq_t`.
pub(crate) unsafe fn canonicalize(raw: *mut mpq_t) -> NumericResult<()> {
    if gmp::mpz_sgn(gmp::mpq_denref_const(raw)) == 0 {
        tracing::debug!("rejecting rational with zero denominator");
        return Err(NumericError::DivisionByZero);
    }
    reduce_nonzero(raw);
    Ok(())
}

/// Canonicalize a rational whose denominator is already known to be
/// non-zero.
///
/// # Safety
/// `raw` must point to an initialized, uniquely owned `mpq_t` with a
/// non-zero denominator.
pub(crate) unsafe fn reduce_nonzero(raw: *mut mpq_t) {
    let num = gmp::mpq_numref(raw);
    let den = gmp::mpq_denref(raw);

    if gmp::mpz_sgn(num) == 0 {
        gmp::mpz_set_ui(den, 1);
        return;
    }

    let mut g = NativeHandle::<mpz_t>::new();
    gmp::mpz_gcd(g.as_mut_ptr(), num, den);
    if gmp::mpz_cmp_ui(g.as_ptr(), 1) != 0 {
        gmp::mpz_divexact(num, num, g.as_ptr());
        gmp::mpz_divexact(den, den, g.as_ptr());
    }

    if gmp::mpz_sgn(den) < 0 {
        gmp::mpz_neg(num, num);
        gmp::mpz_neg(den, den);
    }
}
