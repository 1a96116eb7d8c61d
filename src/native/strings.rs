// ============================================================================
// String Marshaling
// Moving text across the engine boundary
// ============================================================================

use std::ffi::CString;

/// Prepare user text for an engine `set_str` call.
///
/// Surrounding whitespace is trimmed. The engine silently skips interior
/// whitespace, so text containing any is rejected here along with empty
/// text and interior NUL bytes.
pub(crate) fn to_c_string(text: &str) -> Option<CString> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }
    CString::new(trimmed).ok()
}

/// Collect the NUL-terminated text the engine wrote into `buffer`.
pub(crate) fn buffer_to_string(mut buffer: Vec<u8>) -> String {
    if let Some(end) = buffer.iter().position(|&b| b == 0) {
        buffer.truncate(end);
    }
    // Engine output is always ASCII digits, letters, '-', '/' or '.'
    String::from_utf8_lossy(&buffer).into_owned()
}
