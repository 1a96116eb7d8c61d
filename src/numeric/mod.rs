// ============================================================================
// Numeric Module
// Shared vocabulary for the multiple-precision value types
// ============================================================================
//
// This module provides:
// - NumericError / NumericResult: the error taxonomy for every operation
// - Precision: validated significand width for the float types
//
// Design principles:
// - Validation happens before any engine call
// - All fallible arithmetic returns Result (no panics)
// - No operation partially mutates its receiver

mod errors;
mod precision;

pub use errors::{NumericError, NumericResult};
pub use precision::Precision;
