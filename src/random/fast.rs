// ============================================================================
// Fast Random
// Seedable engine-side generator for simulations and tests
// ============================================================================

use crate::fixed_float::FixedFloat;
use crate::integer::{bit_count, Integer};
use crate::numeric::{NumericError, NumericResult, Precision};
use crate::rounded_float::RoundedFloat;
use gmp_mpfr_sys::gmp::{self, randstate_t};
use gmp_mpfr_sys::mpfr;
use std::fmt;
use std::mem::MaybeUninit;

// gmp-mpfr-sys declares `rop` as `mpf_t` by value; GMP takes a pointer.
extern "C" {
    #[link_name = "__gmpf_urandomb"]
    fn mpf_urandomb(rop: gmp::mpf_ptr, state: gmp::randstate_ptr, nbits: gmp::bitcnt_t);
}

/// Mersenne Twister generator with reproducible output for a given seed.
///
/// ```
/// use multiprecision::{FastRandom, Integer};
///
/// let mut a = FastRandom::with_seed(&Integer::from(42));
/// let mut b = FastRandom::with_seed(&Integer::from(42));
/// assert_eq!(a.integer_bits(128), b.integer_bits(128));
/// ```
pub struct FastRandom {
    state: randstate_t,
}

// The state is plain engine memory with no thread affinity.
unsafe impl Send for FastRandom {}

impl FastRandom {
    /// Generator with the engine's default seed.
    pub fn new() -> Self {
        let mut state = MaybeUninit::uninit();
        unsafe {
            gmp::randinit_mt(state.as_mut_ptr());
            Self {
                state: state.assume_init(),
            }
        }
    }

    pub fn with_seed(seed: &Integer) -> Self {
        let mut rng = Self::new();
        rng.reseed(seed);
        rng
    }

    pub fn from_u64(seed: u64) -> Self {
        Self::with_seed(&Integer::from(seed))
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: &Integer) {
        unsafe { gmp::randseed(&mut self.state, seed.raw()) };
    }

    /// Uniform integer in `[0, 2^bits)`.
    pub fn integer_bits(&mut self, bits: u64) -> Integer {
        let state: *mut randstate_t = &mut self.state;
        Integer::compute(|dst| unsafe { gmp::mpz_urandomb(dst, state, bit_count(bits)) })
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// # Errors
    /// `InvalidInput` when `bound` is not positive.
    pub fn integer_below(&mut self, bound: &Integer) -> NumericResult<Integer> {
        if !bound.is_positive() {
            return Err(NumericError::InvalidInput);
        }
        let state: *mut randstate_t = &mut self.state;
        Ok(Integer::compute(|dst| unsafe {
            gmp::mpz_urandomm(dst, state, bound.raw())
        }))
    }

    /// Uniform value in `[0, 1)` filling `precision` bits.
    pub fn fixed_float(&mut self, precision: Precision) -> FixedFloat {
        let state: *mut randstate_t = &mut self.state;
        FixedFloat::compute(precision, |dst| unsafe {
            mpf_urandomb(dst, state, precision.bits().into())
        })
    }

    /// Uniform value in `[0, 1)` with every bit of `precision` random.
    pub fn rounded_float(&mut self, precision: Precision) -> RoundedFloat {
        let state: *mut randstate_t = &mut self.state;
        RoundedFloat::compute(precision, |dst| unsafe { mpfr::urandomb(dst, state) }).value
    }
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FastRandom {
    /// The clone continues the same sequence independently.
    fn clone(&self) -> Self {
        let mut state = MaybeUninit::uninit();
        unsafe {
            gmp::randinit_set(state.as_mut_ptr(), &self.state);
            Self {
                state: state.assume_init(),
            }
        }
    }
}

impl Drop for FastRandom {
    fn drop(&mut self) {
        unsafe { gmp::randclear(&mut self.state) };
    }
}

impl fmt::Debug for FastRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastRandom").finish_non_exhaustive()
    }
}
