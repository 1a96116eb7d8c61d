// ============================================================================
// Random Module
// Uniform random values for every multiple-precision type
// ============================================================================
//
// Two sources are provided:
// - FastRandom: seedable Mersenne Twister state owned by the engine. Fast and
//   reproducible, never for secrets.
// - SecureRandom: operating system entropy turned into uniform values.

mod fast;
mod secure;

pub use fast::FastRandom;
pub use secure::SecureRandom;
