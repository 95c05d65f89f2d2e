//! Line-wise comment handling.

use crate::scan::{COMMENT, ESCAPE};

/// Byte offset of the first unescaped `%` in `line`.
pub(crate) fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            ESCAPE => i += 2,
            COMMENT => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Remove comment bodies and everything after `end_marker`.
///
/// The `%` itself is kept so that a comment still swallows the line break
/// when TeX reads the result. Line structure is preserved, which makes the
/// operation idempotent.
pub(crate) fn strip_comments(text: &str, end_marker: &str) -> String {
    let mut stripped = text
        .split('\n')
        .map(|line| match comment_start(line) {
            Some(at) => &line[..=at],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if !end_marker.is_empty()
        && let Some(at) = stripped.find(end_marker)
    {
        stripped.truncate(at + end_marker.len());
    }
    stripped
}

/// Replace `from` with `to` outside comments, one line at a time.
pub(crate) fn replace_outside_comments(text: &str, from: &str, to: &str) -> String {
    text.split('\n')
        .map(|line| match comment_start(line) {
            Some(at) => {
                let (code, comment) = line.split_at(at);
                format!("{}{comment}", code.replace(from, to))
            }
            None => line.replace(from, to),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const END: &str = r"\end{document}";

    #[test]
    fn test_comment_start() {
        assert_eq!(comment_start("a % b"), Some(2));
        assert_eq!(comment_start(r"50\% off % real"), Some(9));
        assert_eq!(comment_start(r"line\\% comment"), Some(6));
        assert_eq!(comment_start("no comment"), None);
    }

    #[test]
    fn test_comment_after_backslash_run() {
        let even = format!("{}% c", "\\".repeat(10_000));
        assert_eq!(comment_start(&even), Some(10_000));
        let odd = format!("\\{even}");
        assert_eq!(comment_start(&odd), None);
    }

    #[test]
    fn test_strip_keeps_marker() {
        let text = "a % one\nb\\% two % three\n% whole line\nc";
        assert_eq!(strip_comments(text, END), "a %\nb\\% two %\n%\nc");
    }

    #[test]
    fn test_strip_truncates_after_end() {
        let text = "\\begin{document}\nHi\n\\end{document}\nTrailing notes\n";
        assert_eq!(strip_comments(text, END), "\\begin{document}\nHi\n\\end{document}");
    }

    #[test]
    fn test_strip_ignores_commented_end() {
        let text = "% \\end{document}\nbody";
        assert_eq!(strip_comments(text, END), "%\nbody");
    }

    #[test]
    fn test_strip_idempotent() {
        let text = "x % c\n\n  y%\n\\end{document} % done\nz\n";
        let once = strip_comments(text, END);
        assert_eq!(strip_comments(&once, END), once);
    }

    #[test]
    fn test_replace_outside_comments() {
        let text = "foo bar % foo\nfoo";
        assert_eq!(replace_outside_comments(text, "foo", "baz"), "baz bar % foo\nbaz");
    }

    #[test]
    fn test_replace_keeps_trailing_newline() {
        assert_eq!(replace_outside_comments("a\n", "a", "b"), "b\n");
    }
}
