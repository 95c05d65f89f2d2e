//! Nesting-aware group matching.

use super::{is_escaped, line_end, Delimiter, COMMENT, ESCAPE};
use crate::diagnostic::ScanError;

/// A matched delimiter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group<'a> {
    /// Text strictly between the delimiters.
    pub inner: &'a str,
    /// Byte offset of the opening delimiter.
    pub open: usize,
    /// Byte offset of the closing delimiter.
    pub close: usize,
}

impl<'a> Group<'a> {
    /// The group including both delimiters, as it appears in `text`.
    pub fn outer(&self, text: &'a str) -> &'a str {
        &text[self.open..=self.close]
    }
}

/// Find the first `delimiter` group at or after `start` and its matching close.
///
/// The opening delimiter does not have to sit at `start`; the first unescaped
/// occurrence after it is used. Escaped delimiters and comment bodies do not
/// affect the depth. Inside a bracket or parenthesis group, delimiters within
/// a nested brace group are ignored, so `[{]}]` is a single group.
///
/// ```ignore
/// let group = find_matching("Hello (Louis) how are you ?", 4, Delimiter::Paren)?;
/// assert_eq!((group.inner, group.open, group.close), ("Louis", 6, 12));
/// ```
pub fn find_matching(text: &str, start: usize, delimiter: Delimiter) -> Result<Group<'_>, ScanError> {
    let bytes = text.as_bytes();
    let (open_byte, close_byte) = (delimiter.open_byte(), delimiter.close_byte());
    let shielded_by_braces = delimiter != Delimiter::Brace;

    let open = find_opening(bytes, start, open_byte).ok_or(ScanError::MissingGroup {
        open: delimiter.open(),
        position: start,
    })?;

    let mut depth = 0usize;
    let mut braces = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            ESCAPE => {
                i += 2;
                continue;
            }
            COMMENT => match line_end(bytes, i) {
                Some(nl) => {
                    i = nl + 1;
                    continue;
                }
                None => break,
            },
            b'{' if shielded_by_braces => braces += 1,
            b'}' if shielded_by_braces => braces = braces.saturating_sub(1),
            b if b == open_byte && braces == 0 => depth += 1,
            b if b == close_byte && braces == 0 => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Group {
                        inner: &text[open + 1..i],
                        open,
                        close: i,
                    });
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(ScanError::MalformedGroup {
        open: delimiter.open(),
        position: open,
    })
}

/// First unescaped `open_byte` at or after `start`, outside comments.
fn find_opening(bytes: &[u8], start: usize, open_byte: u8) -> Option<usize> {
    if start >= bytes.len() {
        return None;
    }
    let mut i = if is_escaped(bytes, start) { start + 1 } else { start };
    while i < bytes.len() {
        match bytes[i] {
            ESCAPE => i += 2,
            COMMENT => i = line_end(bytes, i)? + 1,
            b if b == open_byte => return Some(i),
            _ => i += 1,
        }
    }
    None
}
