//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending `…` when
/// anything was cut.
///
/// Counts `char`s rather than bytes, so multi-byte text is never split inside
/// a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &s[..end]),
        None => s.to_string(),
    }
}
