//! Log sanitization utilities
//!
//! Keeps TXT payloads and other long response bodies from flooding debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Byte offset of the `max_chars`-th character, or `None` if `s` is shorter.
fn char_boundary_after(s: &str, max_chars: usize) -> Option<usize> {
    s.char_indices().nth(max_chars).map(|(idx, _)| idx)
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` characters followed by the total byte length.
pub fn truncate_for_log(s: &str) -> String {
    match char_boundary_after(s, TRUNCATE_LIMIT) {
        None => s.to_string(),
        Some(cut) => format!("{}... [truncated, total {} bytes]", &s[..cut], s.len()),
    }
}
