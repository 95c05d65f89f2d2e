//! Argument list extraction.

use std::ops::Range;

use super::{find_matching, next_argument, Delimiter, Group};
use crate::diagnostic::ScanError;

/// Delimiters accepted for macro arguments: mandatory `{}` and optional `[]`.
pub const ARGUMENT_DELIMITERS: [Delimiter; 2] = [Delimiter::Brace, Delimiter::Bracket];

/// One argument group of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Text between the delimiters.
    pub text: String,
    /// The group as written, delimiters included.
    pub as_written: String,
    /// Which delimiters enclose the group.
    pub delimiter: Delimiter,
}

impl Argument {
    fn from_group(text: &str, group: &Group<'_>, delimiter: Delimiter) -> Self {
        Self {
            text: group.inner.to_string(),
            as_written: group.outer(text).to_string(),
            delimiter,
        }
    }

    /// Whether this is a bracket (optional) argument.
    #[inline]
    pub fn is_optional(&self) -> bool {
        self.delimiter == Delimiter::Bracket
    }
}

/// Result of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// Argument groups in source order, optional ones included.
    pub arguments: Vec<Argument>,
    /// Source from the first opening delimiter through the last closing one.
    pub as_written: &'a str,
    /// Byte offset where `as_written` starts.
    pub start: usize,
    /// Byte offset just past `as_written`.
    pub end: usize,
}

impl Extraction<'_> {
    /// Byte range of `as_written` in the scanned text.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Argument texts, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.text.as_str()).collect()
    }

    /// Number of mandatory (brace) arguments.
    pub fn mandatory_count(&self) -> usize {
        self.arguments.iter().filter(|a| !a.is_optional()).count()
    }
}

/// Extract up to `arity` mandatory arguments following `start`.
///
/// Groups may be separated by blanks, line breaks and comments. Bracket groups
/// met on the way are recorded as optional arguments without counting towards
/// `arity`. Extraction stops once `arity` brace groups were read or when the
/// next non-separator character does not open a group.
///
/// A too large `arity` swallows unrelated groups that happen to follow:
///
/// ```text
/// \MyMacro{A}{B}{C}
/// {\bf An other text}
/// ```
///
/// With `arity = 4` the `{\bf ...}` group becomes a fourth argument. Resolve
/// the arity from the macro definition when it is known.
pub fn extract(text: &str, start: usize, arity: usize) -> Result<Extraction<'_>, ScanError> {
    let mut arguments = Vec::new();
    let mut mandatory = 0;
    let mut cursor = start.min(text.len());
    let mut first = None;

    while mandatory < arity {
        let Some((offset, delimiter)) = next_argument(&text[cursor..], &ARGUMENT_DELIMITERS) else {
            break;
        };
        let group = find_matching(text, cursor + offset, delimiter)?;
        first.get_or_insert(group.open);
        if delimiter == Delimiter::Brace {
            mandatory += 1;
        }
        arguments.push(Argument::from_group(text, &group, delimiter));
        cursor = group.close + 1;
    }

    let begin = first.unwrap_or(cursor);
    Ok(Extraction {
        arguments,
        as_written: &text[begin..cursor],
        start: begin,
        end: cursor,
    })
}
