// ============================================================================
// Number Theory
// gcd/lcm, modular inverse, symbols, primality, combinatorial sequences
// ============================================================================

use super::Integer;
use crate::numeric::{NumericError, NumericResult};
use gmp_mpfr_sys::gmp;
use std::os::raw::{c_int, c_ulong};

/// Outcome of a probabilistic primality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primality {
    /// Definitely composite
    Composite,
    /// Passed every round; composite with negligible probability
    ProbablyPrime,
    /// Proven prime
    Prime,
}

impl Integer {
    /// Greatest common divisor, always non-negative.
    pub fn gcd(&self, other: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_gcd(dst, self.raw(), other.raw()) })
    }

    /// Least common multiple, always non-negative; zero if either is zero.
    pub fn lcm(&self, other: &Integer) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_lcm(dst, self.raw(), other.raw()) })
    }

    /// `(g, s, t)` with `g = gcd(self, other) = s·self + t·other`.
    pub fn extended_gcd(&self, other: &Integer) -> (Integer, Integer, Integer) {
        let mut s = Integer::new();
        let mut t = Integer::new();
        let g = Integer::compute(|dst| unsafe {
            gmp::mpz_gcdext(dst, s.raw_mut(), t.raw_mut(), self.raw(), other.raw())
        });
        (g, s, t)
    }

    /// Inverse of `self` modulo `modulus`, in `[0, |modulus|)`.
    ///
    /// `None` when no inverse exists or `modulus` is zero.
    pub fn invert_mod(&self, modulus: &Integer) -> Option<Integer> {
        if modulus.is_zero() {
            return None;
        }
        let mut found = 0;
        let inverse = Integer::compute(|dst| unsafe {
            found = gmp::mpz_invert(dst, self.raw(), modulus.raw());
        });
        (found != 0).then_some(inverse)
    }

    /// Jacobi symbol `(self / n)`.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless `n` is odd and positive.
    pub fn jacobi(&self, n: &Integer) -> NumericResult<i32> {
        if !n.is_positive() || n.is_even() {
            return Err(NumericError::InvalidInput);
        }
        Ok(unsafe { gmp::mpz_jacobi(self.raw(), n.raw()) } as i32)
    }

    /// Legendre symbol `(self / p)` for an odd prime `p`.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless `p` is odd and positive.
    pub fn legendre(&self, p: &Integer) -> NumericResult<i32> {
        if !p.is_positive() || p.is_even() {
            return Err(NumericError::InvalidInput);
        }
        Ok(unsafe { gmp::mpz_legendre(self.raw(), p.raw()) } as i32)
    }

    /// Kronecker symbol `(self / n)`, defined for every `n`.
    pub fn kronecker(&self, n: &Integer) -> i32 {
        unsafe { gmp::mpz_kronecker(self.raw(), n.raw()) as i32 }
    }

    /// Probabilistic primality with `rounds` Miller-Rabin repetitions.
    pub fn primality(&self, rounds: u32) -> Primality {
        let rounds = c_int::try_from(rounds.max(1)).unwrap_or(c_int::MAX);
        match unsafe { gmp::mpz_probab_prime_p(self.raw(), rounds) } {
            0 => Primality::Composite,
            1 => Primality::ProbablyPrime,
            _ => Primality::Prime,
        }
    }

    /// Smallest probable prime greater than `self`.
    pub fn next_prime(&self) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_nextprime(dst, self.raw()) })
    }

    /// `n!`
    pub fn factorial(n: u32) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_fac_ui(dst, c_ulong::from(n)) })
    }

    /// Binomial coefficient `C(n, k)`; negative `n` follows the
    /// `(-1)^k · C(-n + k - 1, k)` extension.
    pub fn binomial(n: &Integer, k: u32) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_bin_ui(dst, n.raw(), c_ulong::from(k)) })
    }

    /// `n`-th Fibonacci number, `F(0) = 0`.
    pub fn fibonacci(n: u32) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_fib_ui(dst, c_ulong::from(n)) })
    }

    /// `n`-th Lucas number, `L(0) = 2`.
    pub fn lucas(n: u32) -> Integer {
        Integer::compute(|dst| unsafe { gmp::mpz_lucnum_ui(dst, c_ulong::from(n)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Integer {
        Integer::from(v)
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(int(-12).gcd(&int(18)), 6i64);
        assert_eq!(int(4).lcm(&int(6)), 12i64);
        assert_eq!(int(0).gcd(&int(0)), 0i64);
    }

    #[test]
    fn test_extended_gcd_identity() {
        let a = int(240);
        let b = int(46);
        let (g, s, t) = a.extended_gcd(&b);
        assert_eq!(g, 2i64);
        assert_eq!(s.mul(&a).add(&t.mul(&b)), g);
    }

    #[test]
    fn test_invert_mod() {
        assert_eq!(int(3).invert_mod(&int(11)).unwrap(), 4i64);
        assert!(int(6).invert_mod(&int(9)).is_none());
        assert!(int(6).invert_mod(&int(0)).is_none());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(int(2).jacobi(&int(7)).unwrap(), 1);
        assert_eq!(int(3).legendre(&int(7)).unwrap(), -1);
        assert_eq!(int(2).jacobi(&int(8)), Err(NumericError::InvalidInput));
        assert_eq!(int(2).legendre(&int(-7)), Err(NumericError::InvalidInput));
        assert_eq!(int(2).kronecker(&int(8)), 0);
        assert_eq!(int(3).kronecker(&int(8)), -1);
        assert_eq!(int(5).kronecker(&int(-1)), 1);
    }

    #[test]
    fn test_primality() {
        assert_eq!(int(97).primality(25), Primality::Prime);
        assert_eq!(int(91).primality(25), Primality::Composite);
        let mersenne = int(1).mul_pow2(127).sub_i64(1);
        assert_ne!(mersenne.primality(25), Primality::Composite);
        assert_eq!(int(89).next_prime(), 97i64);
    }

    #[test]
    fn test_sequences() {
        assert_eq!(Integer::factorial(20), 2_432_902_008_176_640_000i64);
        assert_eq!(Integer::binomial(&int(10), 3), 120i64);
        assert_eq!(Integer::fibonacci(10), 55i64);
        assert_eq!(Integer::lucas(0), 2i64);
        assert_eq!(Integer::lucas(5), 11i64);
    }
}
