//! Locating macro invocations in raw text.

use std::borrow::Cow;

use super::{line_end, COMMENT, ESCAPE};

/// Prefix `name` with the escape marker unless it already has one.
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    if name.as_bytes().first() == Some(&ESCAPE) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\\{name}"))
    }
}

/// Position of the next invocation of `macro_name` at or after `from`.
///
/// Comments are skipped, and a comment running to the end of the text ends the
/// search. Escape pairs such as `\\` and `\%` are consumed as a unit. A control
/// word only matches when it is not followed by another letter, so `\foo`
/// never matches inside `\foobar`.
pub fn find_next(text: &str, macro_name: &str, from: usize) -> Option<usize> {
    let name = normalize_name(macro_name);
    let needle = name.as_bytes();
    let bytes = text.as_bytes();

    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            COMMENT => i = line_end(bytes, i)? + 1,
            ESCAPE => {
                if bytes[i..].starts_with(needle) && is_boundary(bytes, i + needle.len(), needle) {
                    return Some(i);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    None
}

/// Control words end at the first non-letter; control symbols end immediately.
fn is_boundary(bytes: &[u8], end: usize, needle: &[u8]) -> bool {
    let control_word = needle.len() > 1 && needle[1..].iter().all(u8::is_ascii_alphabetic);
    !control_word || bytes.get(end).is_none_or(|b| !b.is_ascii_alphabetic())
}

/// Iterator over all invocation positions of one macro.
///
/// Positions advance past the matched name; callers that consume arguments
/// should use [`find_next`] directly to resume after the arguments instead.
#[derive(Debug, Clone)]
pub struct Invocations<'a> {
    text: &'a str,
    name: Cow<'a, str>,
    cursor: usize,
}

impl<'a> Invocations<'a> {
    /// Iterate over invocations of `macro_name` in `text`.
    pub fn new(text: &'a str, macro_name: &'a str) -> Self {
        Self {
            text,
            name: normalize_name(macro_name),
            cursor: 0,
        }
    }
}

impl Iterator for Invocations<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let at = find_next(self.text, &self.name, self.cursor)?;
        self.cursor = at + self.name.len();
        Some(at)
    }
}
