// ============================================================================
// Radix
// Validated number bases for formatting and parsing
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output base for `to_string_radix`.
///
/// Accepts `[2, 62]` (lowercase letters up to base 36, both cases above) and
/// `[-36, -2]` (uppercase letters, magnitude used as the base).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Radix(i32);

impl Radix {
    pub const BINARY: Self = Self(2);
    pub const OCTAL: Self = Self(8);
    pub const DECIMAL: Self = Self(10);
    pub const HEX: Self = Self(16);
    pub const HEX_UPPER: Self = Self(-16);

    /// Validate an output base.
    ///
    /// # Errors
    /// Returns `InvalidRadix` outside `[2, 62] ∪ [-36, -2]`.
    pub fn new(base: i32) -> NumericResult<Self> {
        if (2..=62).contains(&base) || (-36..=-2).contains(&base) {
            Ok(Self(base))
        } else {
            Err(NumericError::InvalidRadix(base))
        }
    }

    /// The base as given, sign included.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The numeric base.
    #[inline]
    pub const fn magnitude(self) -> i32 {
        self.0.abs()
    }

    /// Whether letter digits are printed in uppercase.
    #[inline]
    pub const fn is_uppercase(self) -> bool {
        self.0 < 0
    }

    /// Map a parse base to the engine base.
    ///
    /// `0` auto-detects prefixes: `0x`, `0b` and `0` for integers, `0x` and
    /// `0b` for floats (see [`detect_float_prefix`]). Negative bases read the
    /// same digits as their magnitude (the engine is case-insensitive up to
    /// base 36). Anything else is `None`.
    pub(crate) fn engine_parse_base(base: i32) -> Option<i32> {
        match base {
            0 | 2..=62 => Some(base),
            -36..=-2 => Some(-base),
            _ => None,
        }
    }
}

/// Resolve base `0` for float text the engine cannot auto-detect itself.
///
/// After an optional sign, `0x`/`0X` selects base 16 and `0b`/`0B` base 2;
/// anything else is decimal. Returns the base and the text with the prefix
/// removed and a leading `+` dropped.
pub(crate) fn detect_float_prefix(text: &str) -> (i32, String) {
    let trimmed = text.trim();
    let (sign, body) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };
    let (base, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        Some("0b") | Some("0B") => (2, &body[2..]),
        _ => (10, body),
    };
    (base, format!("{sign}{digits}"))
}

impl Default for Radix {
    fn default() -> Self {
        Self::DECIMAL
    }
}

impl TryFrom<i32> for Radix {
    type Error = NumericError;

    fn try_from(base: i32) -> Result<Self, Self::Error> {
        Self::new(base)
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radix_ranges() {
        for base in 2..=62 {
            assert!(Radix::new(base).is_ok());
        }
        for base in -36..=-2 {
            assert!(Radix::new(base).is_ok());
        }
        for base in [-37, -1, 0, 1, 63, i32::MIN, i32::MAX] {
            assert_eq!(Radix::new(base), Err(NumericError::InvalidRadix(base)));
        }
    }

    #[test]
    fn test_magnitude_and_case() {
        assert_eq!(Radix::HEX_UPPER.magnitude(), 16);
        assert!(Radix::HEX_UPPER.is_uppercase());
        assert!(!Radix::HEX.is_uppercase());
    }

    #[test]
    fn test_engine_parse_base() {
        assert_eq!(Radix::engine_parse_base(0), Some(0));
        assert_eq!(Radix::engine_parse_base(-16), Some(16));
        assert_eq!(Radix::engine_parse_base(62), Some(62));
        assert_eq!(Radix::engine_parse_base(1), None);
        assert_eq!(Radix::engine_parse_base(-40), None);
    }

    #[test]
    fn test_detect_float_prefix() {
        assert_eq!(detect_float_prefix("0x1f.8"), (16, "1f.8".to_string()));
        assert_eq!(detect_float_prefix(" -0B101.1"), (2, "-101.1".to_string()));
        assert_eq!(detect_float_prefix("+1.5e2"), (10, "1.5e2".to_string()));
        assert_eq!(detect_float_prefix("0.75"), (10, "0.75".to_string()));
        assert_eq!(detect_float_prefix("0x"), (16, String::new()));
    }
}
