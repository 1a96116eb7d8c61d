// ============================================================================
// Conversion Module
// Radix formatting, radix-point reconstruction and line-oriented I/O
// ============================================================================

mod line_io;
mod radix;
mod radix_point;

pub use line_io::{read_line, read_value, read_with, write_line, write_value, RadixFormat};
pub(crate) use radix::detect_float_prefix;
pub use radix::Radix;
pub use radix_point::place_radix_point;
