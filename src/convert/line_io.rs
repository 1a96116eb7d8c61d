// ============================================================================
// Line-Oriented I/O
// One value per line: formatted text plus '\n'
// ============================================================================

use super::radix::Radix;
use std::io::{self, BufRead, Write};

/// Values that format to, and parse from, a single radix-notation line.
pub trait RadixFormat: Sized {
    /// Render in `radix`; never fails once the radix is validated.
    fn format_radix(&self, radix: Radix) -> String;

    /// Parse `text` in `base` (0 auto-detects), `None` when malformed.
    fn parse_radix(text: &str, base: i32) -> Option<Self>;
}

/// Write `text` followed by a newline.
pub fn write_line<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.write_all(b"\n")
}

/// Write `value` in `radix` followed by a newline.
pub fn write_value<W: Write, T: RadixFormat>(
    writer: &mut W,
    value: &T,
    radix: Radix,
) -> io::Result<()> {
    write_line(writer, &value.format_radix(radix))
}

/// Consume bytes up to a newline or end of stream.
///
/// Returns the line without its terminator and surrounding whitespace.
/// End of stream, I/O errors, invalid UTF-8 and blank lines are all `None`.
pub fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buffer = Vec::new();
    match reader.read_until(b'\n', &mut buffer) {
        Ok(0) => None,
        Ok(_) => {
            let text = match String::from_utf8(buffer) {
                Ok(text) => text,
                Err(_) => {
                    tracing::debug!("discarding line with invalid UTF-8");
                    return None;
                }
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "line read failed");
            None
        }
    }
}

/// Read one line and hand it to `parse`.
pub fn read_with<R, T, F>(reader: &mut R, parse: F) -> Option<T>
where
    R: BufRead,
    F: FnOnce(&str) -> Option<T>,
{
    let line = read_line(reader)?;
    let parsed = parse(&line);
    if parsed.is_none() {
        tracing::debug!(line = %line, "malformed numeric line");
    }
    parsed
}

/// Read one line and parse it in `base`.
pub fn read_value<R: BufRead, T: RadixFormat>(reader: &mut R, base: i32) -> Option<T> {
    read_with(reader, |line| T::parse_radix(line, base))
}
