// ============================================================================
// Numeric Errors
// Error types for multiple-precision arithmetic operations
// ============================================================================

use crate::rounded_float::ExceptionFlags;
use thiserror::Error;

/// Errors that can occur during multiple-precision arithmetic operations.
///
/// Every fallible operation either fully succeeds or returns one of these
/// and leaves its receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum NumericError {
    /// Precision outside `[Precision::MIN_BITS, Precision::MAX_BITS]`
    #[error("invalid precision: {0} bits")]
    InvalidPrecision(i64),
    /// Radix outside `[2, 62]` or `[-36, -2]`
    #[error("invalid radix: {0}")]
    InvalidRadix(i32),
    /// Negative exponent passed where only non-negative ones are accepted
    #[error("invalid exponent: {0} (must not be negative)")]
    InvalidExponent(i64),
    /// Attempted exact division by zero
    #[error("division by zero")]
    DivisionByZero,
    /// Square root of a negative value
    #[error("square root of a negative value")]
    NegativeSquareRoot,
    /// Even root of a negative value
    #[error("even root of a negative value")]
    EvenRootOfNegative,
    /// Modular inverse does not exist
    #[error("value is not invertible for the given modulus")]
    NotInvertible,
    /// Result does not fit the requested target type
    #[error("arithmetic overflow: result does not fit the target type")]
    Overflow,
    /// Input string or value is invalid
    #[error("invalid input: could not parse value")]
    InvalidInput,
    /// One or more floating-point exception flags fired during a strict operation
    #[error("floating-point exception: {0}")]
    FloatingPoint(ExceptionFlags),
    /// The operating system entropy source failed
    #[error("secure entropy source unavailable")]
    EntropyUnavailable,
    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::InvalidPrecision(0).to_string(),
            "invalid precision: 0 bits"
        );
        assert_eq!(NumericError::InvalidRadix(63).to_string(), "invalid radix: 63");
        assert_eq!(
            NumericError::FloatingPoint(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT)
                .to_string(),
            "floating-point exception: overflow | inexact"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::DivisionByZero, NumericError::DivisionByZero);
        assert_ne!(NumericError::DivisionByZero, NumericError::NegativeSquareRoot);
        assert_ne!(
            NumericError::InvalidExponent(-1),
            NumericError::InvalidExponent(-2)
        );
    }
}
