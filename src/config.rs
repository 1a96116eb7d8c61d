// ============================================================================
// Numeric Configuration
// Defaults for precision, rounding, radix and strictness in one place
// ============================================================================

use crate::convert::Radix;
use crate::fixed_float::FixedFloat;
use crate::numeric::{NumericError, NumericResult, Precision};
use crate::random::SecureRandom;
use crate::rounded_float::{ExceptionFlags, ExceptionTracker, Rounded, RoundedFloat, RoundingMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest accepted working margin for secure random floats.
const MAX_SECURE_MARGIN: u32 = 4096;

/// Shared defaults for building, parsing and formatting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericConfig {
    /// Precision for floats created through this configuration
    pub default_precision: Precision,

    /// Rounding mode for rounded-float construction and formatting
    pub default_rounding: RoundingMode,

    /// Base for parsing and formatting
    pub default_radix: Radix,

    /// Extra working bits for secure random floats
    pub secure_margin: u32,

    /// Exception flags that make a strict operation fail
    pub strict_mask: ExceptionFlags,
}

impl NumericConfig {
    pub fn new(default_precision: Precision) -> Self {
        Self {
            default_precision,
            default_rounding: RoundingMode::Nearest,
            default_radix: Radix::DECIMAL,
            secure_margin: SecureRandom::DEFAULT_MARGIN,
            strict_mask: ExceptionFlags::STRICT,
        }
    }

    /// Builder method: Set default precision
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.default_precision = precision;
        self
    }

    /// Builder method: Set default rounding mode
    pub fn with_rounding(mut self, mode: RoundingMode) -> Self {
        self.default_rounding = mode;
        self
    }

    /// Builder method: Set default radix
    pub fn with_radix(mut self, radix: Radix) -> Self {
        self.default_radix = radix;
        self
    }

    /// Builder method: Set the secure random working margin
    pub fn with_secure_margin(mut self, margin: u32) -> Self {
        self.secure_margin = margin;
        self
    }

    /// Builder method: Set the strict exception mask
    pub fn with_strict_mask(mut self, mask: ExceptionFlags) -> Self {
        self.strict_mask = mask;
        self
    }

    /// Validate the configuration.
    ///
    /// Fields are public and may come from deserialized input, so every
    /// value is checked again here.
    ///
    /// # Errors
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> NumericResult<()> {
        Precision::new(i64::from(self.default_precision.bits()))
            .map_err(|_| invalid("default precision out of range"))?;

        Radix::new(self.default_radix.get()).map_err(|_| invalid("default radix out of range"))?;

        if self.secure_margin == 0 || self.secure_margin > MAX_SECURE_MARGIN {
            return Err(invalid("secure margin must be between 1 and 4096 bits"));
        }

        if self.strict_mask.is_empty() {
            return Err(invalid("strict mask cannot be empty"));
        }
        if ExceptionFlags::from_bits_truncate(self.strict_mask.bits()) != self.strict_mask {
            return Err(invalid("strict mask contains unknown flags"));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> NumericError {
    NumericError::InvalidConfig(reason.to_string())
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self::double_like()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl NumericConfig {
    /// Same significand width as an IEEE 754 double
    pub fn double_like() -> Self {
        Self::new(Precision::DOUBLE)
    }

    /// Same significand width as an IEEE 754 quadruple
    pub fn quad_like() -> Self {
        Self::new(Precision::QUAD)
    }

    /// 256-bit working precision for error-sensitive computations
    pub fn high_precision() -> Self {
        Self::new(Precision::DOUBLE.widened(203))
    }
}

// ============================================================================
// Config-Driven Construction
// ============================================================================

impl NumericConfig {
    pub fn zero_rounded(&self) -> RoundedFloat {
        RoundedFloat::new(self.default_precision)
    }

    pub fn zero_fixed(&self) -> FixedFloat {
        FixedFloat::new(self.default_precision)
    }

    /// Parse with the default radix, precision and rounding mode.
    pub fn parse_rounded(&self, text: &str) -> Option<Rounded<RoundedFloat>> {
        RoundedFloat::parse(
            text,
            self.default_radix.get(),
            self.default_precision,
            self.default_rounding,
        )
    }

    /// Format with the default radix and rounding mode, using as many
    /// digits as an exact read-back needs.
    pub fn format_rounded(&self, value: &RoundedFloat) -> String {
        value.to_string_radix(self.default_radix, 0, self.default_rounding)
    }

    /// # Errors
    /// `InvalidPrecision` or `EntropyUnavailable`.
    pub fn secure_random(&self) -> NumericResult<RoundedFloat> {
        SecureRandom::with_margin(self.secure_margin)
            .rounded_float(i64::from(self.default_precision.bits()))
    }

    /// Run `op` failing on any flag in the strict mask.
    ///
    /// # Errors
    /// `FloatingPoint` with the raised subset of the mask.
    pub fn strict<T, F: FnOnce() -> T>(&self, op: F) -> NumericResult<T> {
        ExceptionTracker::strict(self.strict_mask, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = NumericConfig::new(Precision::new(80).unwrap());
        assert_eq!(config.default_precision.bits(), 80);
        assert_eq!(config.default_rounding, RoundingMode::Nearest);
        assert_eq!(config.default_radix, Radix::DECIMAL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = NumericConfig::quad_like()
            .with_rounding(RoundingMode::Down)
            .with_radix(Radix::HEX)
            .with_secure_margin(32)
            .with_strict_mask(ExceptionFlags::ALL);

        assert_eq!(config.default_precision, Precision::QUAD);
        assert_eq!(config.default_rounding, RoundingMode::Down);
        assert_eq!(config.default_radix, Radix::HEX);
        assert_eq!(config.secure_margin, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = NumericConfig::default().with_secure_margin(0);
        assert!(matches!(config.validate(), Err(NumericError::InvalidConfig(_))));

        let config = NumericConfig::default().with_strict_mask(ExceptionFlags::EMPTY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_preset_configs() {
        assert_eq!(NumericConfig::double_like().default_precision.bits(), 53);
        assert_eq!(NumericConfig::quad_like().default_precision.bits(), 113);
        assert_eq!(NumericConfig::high_precision().default_precision.bits(), 256);
        assert_eq!(NumericConfig::default(), NumericConfig::double_like());
    }

    #[test]
    fn test_config_driven_values() {
        let config = NumericConfig::double_like().with_radix(Radix::HEX);
        assert!(config.zero_rounded().is_zero());
        assert_eq!(config.zero_rounded().precision(), Precision::DOUBLE);
        assert!(config.zero_fixed().is_zero());

        let parsed = config.parse_rounded("1.8").unwrap();
        assert!(parsed.is_exact());
        assert_eq!(config.format_rounded(&parsed.value), "1.8");
        assert!(config.parse_rounded("1.g").is_none());

        let r = config.secure_random().unwrap();
        assert!(r >= 0 && r < 1);
    }

    #[test]
    fn test_strict_uses_mask() {
        let _guard = ExceptionTracker::serialize();
        let config = NumericConfig::double_like();
        let one = RoundedFloat::from_i64(1, config.default_precision, config.default_rounding).value;
        let zero = config.zero_rounded();
        let result = config.strict(|| one.div(&zero, config.default_rounding));
        assert_eq!(
            result,
            Err(NumericError::FloatingPoint(ExceptionFlags::DIVIDE_BY_ZERO))
        );

        let lenient = config.with_strict_mask(ExceptionFlags::OVERFLOW);
        let inf = lenient.strict(|| one.div(&zero, RoundingMode::Nearest)).unwrap();
        assert!(inf.value.is_infinite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = NumericConfig::quad_like().with_rounding(RoundingMode::Up);
        let json = serde_json::to_string(&config).unwrap();
        let back: NumericConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
