// ============================================================================
// Secure Random
// Operating system entropy turned into uniform multiple-precision values
// ============================================================================

use crate::fixed_float::FixedFloat;
use crate::integer::{bit_count, import_magnitude, Integer};
use crate::numeric::{NumericError, NumericResult, Precision};
use crate::rounded_float::RoundedFloat;
use gmp_mpfr_sys::gmp;
use gmp_mpfr_sys::mpfr::{self, rnd_t};
use rand::rngs::OsRng;
use rand::RngCore;
use smallvec::SmallVec;

/// Stack capacity for entropy buffers; covers values up to 512 bits.
const INLINE_ENTROPY_BYTES: usize = 64;

/// Uniform values backed by the operating system entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecureRandom {
    margin: u32,
}

impl SecureRandom {
    /// Extra working bits used while scaling a float into `[0, 1)`.
    pub const DEFAULT_MARGIN: u32 = 64;

    pub fn new() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
        }
    }

    pub fn with_margin(margin: u32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    fn entropy(bits: u32) -> NumericResult<SmallVec<[u8; INLINE_ENTROPY_BYTES]>> {
        let len = bits.div_ceil(8) as usize;
        let mut buf: SmallVec<[u8; INLINE_ENTROPY_BYTES]> = SmallVec::from_elem(0, len);
        OsRng.try_fill_bytes(&mut buf).map_err(|err| {
            tracing::warn!(error = %err, bits, "entropy source failed");
            NumericError::EntropyUnavailable
        })?;
        Ok(buf)
    }

    /// Uniform integer in `[0, 2^bits)`.
    ///
    /// # Errors
    /// `InvalidPrecision` for a zero or oversized width, `EntropyUnavailable`
    /// when the operating system source fails.
    pub fn integer_bits(&self, bits: i64) -> NumericResult<Integer> {
        let width = Precision::new(bits)?.bits();
        let bytes = Self::entropy(width)?;
        Ok(Integer::compute(|dst| unsafe {
            import_magnitude(dst, &bytes);
            gmp::mpz_fdiv_r_2exp(dst, dst, bit_count(width.into()));
        }))
    }

    /// Uniform value in `[0, 1)` whose lowest significant bit is `2^-bits`.
    ///
    /// The random integer is scaled at `bits + margin` precision and rounded
    /// once toward negative infinity, so the result never reaches one.
    ///
    /// # Errors
    /// See [`SecureRandom::integer_bits`].
    pub fn rounded_float(&self, bits: i64) -> NumericResult<RoundedFloat> {
        let precision = Precision::new(bits)?;
        let mantissa = self.integer_bits(bits)?;
        let shift = bit_count(precision.bits().into());
        let scaled = RoundedFloat::compute(precision.widened(self.margin), |dst| unsafe {
            mpfr::set_z(dst, mantissa.raw(), rnd_t::RNDZ);
            mpfr::div_2ui(dst, dst, shift, rnd_t::RNDZ)
        })
        .value;
        Ok(RoundedFloat::compute(precision, |dst| unsafe {
            mpfr::set(dst, scaled.raw(), rnd_t::RNDD)
        })
        .value)
    }

    /// Uniform value in `[0, 1)` at `bits` of precision.
    ///
    /// # Errors
    /// See [`SecureRandom::integer_bits`].
    pub fn fixed_float(&self, bits: i64) -> NumericResult<FixedFloat> {
        let precision = Precision::new(bits)?;
        let mantissa = self.integer_bits(bits)?;
        let shift = bit_count(precision.bits().into());
        Ok(FixedFloat::compute(precision, |dst| unsafe {
            gmp::mpf_set_z(dst, mantissa.raw());
            gmp::mpf_div_2exp(dst, dst, shift);
        }))
    }
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundedFloat {
    /// Uniform value in `[0, 1)` at `bits` of precision from operating
    /// system entropy.
    ///
    /// # Errors
    /// `InvalidPrecision` or `EntropyUnavailable`.
    pub fn secure_random(bits: i64) -> NumericResult<RoundedFloat> {
        SecureRandom::new().rounded_float(bits)
    }
}
