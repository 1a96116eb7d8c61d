// ============================================================================
// Precision
// Validated significand width for floating-point value types
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of significant bits retained by a floating-point value.
///
/// Always within `[MIN_BITS, MAX_BITS]`; construction is the only place the
/// range is checked, so every native struct sees a valid width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct Precision(u32);

impl Precision {
    /// Smallest accepted width
    pub const MIN_BITS: u32 = 1;

    /// Largest accepted width (portable bound for both engines)
    pub const MAX_BITS: u32 = i32::MAX as u32;

    /// IEEE-754 binary64 significand width
    pub const DOUBLE: Self = Self(53);

    /// IEEE-754 binary128 significand width
    pub const QUAD: Self = Self(113);

    /// Wide enough to hold any `i64` exactly
    pub(crate) const WORD: Self = Self(64);

    /// Create a precision from a bit count.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` for zero, negative, or oversized widths.
    pub fn new(bits: i64) -> NumericResult<Self> {
        if bits < Self::MIN_BITS as i64 || bits > Self::MAX_BITS as i64 {
            return Err(NumericError::InvalidPrecision(bits));
        }
        Ok(Self(bits as u32))
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Widen by `extra` bits, saturating at `MAX_BITS`.
    #[inline]
    pub fn widened(self, extra: u32) -> Self {
        Self(self.0.saturating_add(extra).min(Self::MAX_BITS))
    }

    /// Rebuild from a width reported by the engine.
    #[inline]
    pub(crate) fn from_engine(bits: u64) -> Self {
        Self((bits.clamp(Self::MIN_BITS as u64, Self::MAX_BITS as u64)) as u32)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DOUBLE
    }
}

impl TryFrom<i64> for Precision {
    type Error = NumericError;

    fn try_from(bits: i64) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<Precision> for i64 {
    fn from(p: Precision) -> Self {
        p.0 as i64
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_validation() {
        assert_eq!(Precision::new(0), Err(NumericError::InvalidPrecision(0)));
        assert_eq!(Precision::new(-5), Err(NumericError::InvalidPrecision(-5)));
        assert!(Precision::new(i64::from(u32::MAX)).is_err());
        assert_eq!(Precision::new(1).unwrap().bits(), 1);
        assert_eq!(Precision::new(100).unwrap().bits(), 100);
    }

    #[test]
    fn test_widened_saturates() {
        let p = Precision::new(Precision::MAX_BITS as i64).unwrap();
        assert_eq!(p.widened(64).bits(), Precision::MAX_BITS);
        assert_eq!(Precision::DOUBLE.widened(11).bits(), 64);
    }

    #[test]
    fn test_display() {
        assert_eq!(Precision::QUAD.to_string(), "113 bits");
    }
}
