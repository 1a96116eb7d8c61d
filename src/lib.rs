// ============================================================================
// Multiprecision Library
// Arbitrary-precision value types with copy-on-write semantics over GMP/MPFR
// ============================================================================

//! # Multiprecision
//!
//! Integer, rational and floating-point values of unbounded size backed by
//! the GMP and MPFR engines.
//!
//! ## Features
//!
//! - **Value semantics**: clones share storage until one of them is mutated
//! - **Canonical rationals**: reduced, positive denominator, always
//! - **Two float families**: `FixedFloat` (fast, truncating) and
//!   `RoundedFloat` (correctly rounded, five rounding modes, ternary results)
//! - **Strict exceptions**: transcendental functions report overflow,
//!   underflow, invalid and division-by-zero flags as errors
//! - **Radix I/O** in bases 2 through 62 and line-oriented streams
//! - **Randomness** from a seedable engine generator or OS entropy
//!
//! ## Example
//!
//! ```rust
//! use multiprecision::prelude::*;
//!
//! let half = Rational::from_i64s(1, 2).unwrap();
//! let third = Rational::from_i64s(1, 3).unwrap();
//! assert_eq!((&half + &third).to_string(), "5/6");
//!
//! let p = Precision::new(100).unwrap();
//! let two = RoundedFloat::from_i64(2, p, RoundingMode::Nearest).value;
//! let root = two.sqrt(RoundingMode::Nearest).unwrap();
//! assert!(!root.is_exact());
//!
//! let big = Integer::from(2).pow(100);
//! assert_eq!(big.to_string(), "1267650600228229401496703205376");
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod convert;
pub mod fixed_float;
pub mod integer;
#[cfg(feature = "logging")]
pub mod logging;
pub(crate) mod native;
pub mod numeric;
pub mod random;
pub mod rational;
pub mod rounded_float;

pub use config::NumericConfig;
pub use convert::Radix;
pub use fixed_float::FixedFloat;
pub use integer::{Integer, Primality};
pub use numeric::{NumericError, NumericResult, Precision};
pub use random::{FastRandom, SecureRandom};
pub use rational::{Canonicalizer, Rational};
pub use rounded_float::{
    ExceptionFlags, ExceptionGuard, ExceptionTracker, Rounded, RoundedFloat, RoundingMode, Ternary,
};

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::NumericConfig;
    pub use crate::convert::{read_value, write_value, Radix, RadixFormat};
    pub use crate::fixed_float::FixedFloat;
    pub use crate::integer::{Integer, Primality};
    pub use crate::numeric::{NumericError, NumericResult, Precision};
    pub use crate::random::{FastRandom, SecureRandom};
    pub use crate::rational::Rational;
    pub use crate::rounded_float::{
        ExceptionFlags, ExceptionTracker, Rounded, RoundedFloat, RoundingMode, Ternary,
    };
}
