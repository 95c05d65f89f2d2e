//! Decides whether another argument group follows the previous one.

use super::{line_end, Delimiter, ACCEPTED_BETWEEN_ARGUMENTS, COMMENT};

/// Offset of the next `delimiter` group if only separators come before it.
///
/// Separators are blanks, tabs, line breaks and comments. A comment with no
/// line break after it ends the search.
///
/// ```ignore
/// let s = " \n % blah blah \n { other ";
/// assert_eq!(has_next_argument(s, Delimiter::Brace), Some(17));
/// ```
#[inline]
pub fn has_next_argument(text: &str, delimiter: Delimiter) -> Option<usize> {
    next_argument(text, &[delimiter]).map(|(offset, _)| offset)
}

/// Like [`has_next_argument`], accepting any of several opening delimiters.
///
/// Returns the offset of the opening delimiter and which one was found.
pub fn next_argument(text: &str, delimiters: &[Delimiter]) -> Option<(usize, Delimiter)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == COMMENT {
            i = line_end(bytes, i)?;
            continue;
        }
        if let Some(&delimiter) = delimiters.iter().find(|d| d.open_byte() == b) {
            return Some((i, delimiter));
        }
        if !ACCEPTED_BETWEEN_ARGUMENTS.contains(&b) {
            return None;
        }
        i += 1;
    }
    None
}
