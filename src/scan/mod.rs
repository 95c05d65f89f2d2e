//! Low-level text scanning over raw LaTeX source.
//!
//! Everything in this module is a pure function over `&str`:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Scanning Pipeline                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  find_next(text, "\foo", from)        (locate)               │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  extract(text, after_name, arity)     (arguments)            │
//! │        │                                                     │
//! │        ├─► next_argument(rest, [{, [])   (separator)         │
//! │        │                                                     │
//! │        └─► find_matching(text, at, {)    (brace)             │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All positions are byte offsets. Every delimiter the scanners stop on is
//! ASCII, so the offsets they return are always valid `char` boundaries.

mod arguments;
mod brace;
mod locate;
mod separator;

pub use arguments::{extract, Argument, Extraction, ARGUMENT_DELIMITERS};
pub use brace::{find_matching, Group};
pub use locate::{find_next, normalize_name, Invocations};
pub use separator::{has_next_argument, next_argument};

/// Escape marker preceding macro names.
pub const ESCAPE: u8 = b'\\';

/// Comment introducer; a comment runs to the end of the line.
pub const COMMENT: u8 = b'%';

/// Characters allowed between two argument groups of the same invocation.
pub const ACCEPTED_BETWEEN_ARGUMENTS: &[u8] = &[b'%', b' ', b'\t', b'\n', b'\r'];

// =============================================================================
// Delimiter
// =============================================================================

/// A pair of grouping delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `{` … `}`: mandatory arguments.
    Brace,
    /// `[` … `]`: optional arguments.
    Bracket,
    /// `(` … `)`.
    Paren,
}

impl Delimiter {
    /// Look up the delimiter pair opened by `c`.
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '{' => Some(Self::Brace),
            '[' => Some(Self::Bracket),
            '(' => Some(Self::Paren),
            _ => None,
        }
    }

    /// The opening character.
    pub const fn open(self) -> char {
        match self {
            Self::Brace => '{',
            Self::Bracket => '[',
            Self::Paren => '(',
        }
    }

    /// The closing character.
    pub const fn close(self) -> char {
        match self {
            Self::Brace => '}',
            Self::Bracket => ']',
            Self::Paren => ')',
        }
    }

    #[inline]
    pub(crate) const fn open_byte(self) -> u8 {
        self.open() as u8
    }

    #[inline]
    pub(crate) const fn close_byte(self) -> u8 {
        self.close() as u8
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.open(), self.close())
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Whether the byte at `index` is preceded by an odd run of escape markers.
#[inline]
pub(crate) fn is_escaped(bytes: &[u8], index: usize) -> bool {
    bytes[..index].iter().rev().take_while(|&&b| b == ESCAPE).count() % 2 == 1
}

/// Position of the next line feed at or after `from`.
#[inline]
pub(crate) fn line_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == b'\n')
        .map(|offset| from + offset)
}
