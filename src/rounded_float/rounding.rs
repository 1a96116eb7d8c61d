// ============================================================================
// Rounding
// Rounding modes, ternary results and the value-plus-direction pair
// ============================================================================

use gmp_mpfr_sys::mpfr::rnd_t;
use std::cmp::Ordering;
use std::fmt;
use std::os::raw::c_int;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction used when a result is not representable at the target
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Round to nearest, ties to even
    #[default]
    Nearest,
    /// Round toward zero (truncate)
    TowardZero,
    /// Round toward +∞
    Up,
    /// Round toward -∞
    Down,
    /// Round away from zero
    AwayFromZero,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::Nearest,
        RoundingMode::TowardZero,
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::AwayFromZero,
    ];

    #[inline]
    pub(crate) fn to_engine(self) -> rnd_t {
        match self {
            RoundingMode::Nearest => rnd_t::RNDN,
            RoundingMode::TowardZero => rnd_t::RNDZ,
            RoundingMode::Up => rnd_t::RNDU,
            RoundingMode::Down => rnd_t::RNDD,
            RoundingMode::AwayFromZero => rnd_t::RNDA,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Nearest => "nearest",
            RoundingMode::TowardZero => "toward-zero",
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::AwayFromZero => "away-from-zero",
        };
        f.pad(name)
    }
}

/// How a stored result relates to the exact mathematical result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ternary {
    Exact,
    /// Stored value is greater than the exact result
    RoundedUp,
    /// Stored value is less than the exact result
    RoundedDown,
}

impl Ternary {
    #[inline]
    pub(crate) fn from_engine(code: c_int) -> Self {
        match code.cmp(&0) {
            Ordering::Equal => Ternary::Exact,
            Ordering::Greater => Ternary::RoundedUp,
            Ordering::Less => Ternary::RoundedDown,
        }
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        self == Ternary::Exact
    }

    /// Stored value compared with the exact result.
    pub fn as_ordering(self) -> Ordering {
        match self {
            Ternary::Exact => Ordering::Equal,
            Ternary::RoundedUp => Ordering::Greater,
            Ternary::RoundedDown => Ordering::Less,
        }
    }
}

/// A result together with the direction it was rounded in.
#[derive(Debug, Clone, PartialEq)]
pub struct Rounded<T> {
    pub value: T,
    pub ternary: Ternary,
}

impl<T> Rounded<T> {
    #[inline]
    pub fn new(value: T, ternary: Ternary) -> Self {
        Self { value, ternary }
    }

    #[inline]
    pub fn exact(value: T) -> Self {
        Self::new(value, Ternary::Exact)
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.ternary.is_exact()
    }

    /// Drop the ternary and keep the value.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Rounded<U> {
        Rounded::new(f(self.value), self.ternary)
    }
}
