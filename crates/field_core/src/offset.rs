//! Char/byte offset utilities for node-local strings.
//!
//! Fragment-level offsets are counted in characters; these helpers convert
//! to byte indices at the point where a `String` is actually edited.

/// Number of characters in a string.
#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `chars`-th character boundary, clamped to the end.
///
/// # Examples
///
/// ```
/// use field_core::byte_for_char;
///
/// let s = "a\u{20AC}b"; // '€' is 3 bytes
/// assert_eq!(byte_for_char(s, 0), 0);
/// assert_eq!(byte_for_char(s, 1), 1);
/// assert_eq!(byte_for_char(s, 2), 4);
/// assert_eq!(byte_for_char(s, 100), 5);
/// ```
pub fn byte_for_char(s: &str, chars: usize) -> usize {
    s.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Character immediately before the `chars` boundary, if any.
pub(crate) fn char_before(s: &str, chars: usize) -> Option<char> {
    if chars == 0 {
        return None;
    }
    s.chars().nth(chars - 1)
}

/// Character immediately after the `chars` boundary, if any.
pub(crate) fn char_after(s: &str, chars: usize) -> Option<char> {
    s.chars().nth(chars)
}
