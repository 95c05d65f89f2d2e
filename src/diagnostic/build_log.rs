//! Extracting warnings from a LaTeX `.log` file.

use super::warning::Warning;

const LATEX_WARNING: &str = "LaTeX Warning: ";
const CAPACITY_EXCEEDED: &str = "! TeX capacity exceeded";

/// Collect the warnings of a compilation log.
///
/// Recognized lines:
///
/// ```text
/// LaTeX Warning: Reference `sec:intro' on page 3 undefined on input line 42.
/// LaTeX Warning: Citation `knuth84' on page 1 undefined on input line 7.
/// LaTeX Warning: Label `eq:1' multiply defined.
/// ! TeX capacity exceeded, sorry [main memory size=5000000].
/// ```
pub fn parse_log(text: &str) -> Vec<Warning> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Warning> {
    if let Some(rest) = line.strip_prefix(CAPACITY_EXCEEDED) {
        let detail = rest.trim_start_matches([',', ' ']).trim_end_matches('.');
        return Some(Warning::new(super::WarningKind::CapacityExceeded, detail));
    }

    let message = line.split_once(LATEX_WARNING)?.1;
    if let Some(rest) = message.strip_prefix("Reference ") {
        let (label, page) = label_and_page(rest)?;
        Some(Warning::undefined_reference(label, page))
    } else if let Some(rest) = message.strip_prefix("Citation ") {
        let (label, page) = label_and_page(rest)?;
        Some(Warning::undefined_citation(label, page))
    } else if let Some(rest) = message.strip_prefix("Label ") {
        let (label, tail) = quoted(rest)?;
        tail.trim_start()
            .starts_with("multiply defined")
            .then(|| Warning::multiply_defined_label(label))
    } else {
        None
    }
}

/// Split `` `label' ...`` into the label and the rest.
fn quoted(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('`')?;
    let end = inner.find('\'')?;
    Some((&inner[..end], &inner[end + 1..]))
}

/// Parse `` `label' on page N undefined``.
fn label_and_page(text: &str) -> Option<(&str, &str)> {
    let (label, tail) = quoted(text)?;
    let page = tail.trim_start().strip_prefix("on page ")?;
    let page = page.split_whitespace().next()?;
    Some((label, page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::WarningKind;

    const LOG: &str = "\
This is pdfTeX, Version 3.14159265
(./main.aux)
LaTeX Warning: Reference `sec:intro' on page 3 undefined on input line 42.
Package natbib Warning: Citation `other' on page 9 undefined on input line 3.
LaTeX Warning: Citation `knuth84' on page 1 undefined on input line 7.
LaTeX Warning: Label `eq:1' multiply defined.
LaTeX Warning: There were undefined references.
! TeX capacity exceeded, sorry [main memory size=5000000].
";

    #[test]
    fn test_parse_log() {
        let warnings = parse_log(LOG);
        assert_eq!(warnings.len(), 4);

        assert_eq!(warnings[0], Warning::undefined_reference("sec:intro", "3"));
        assert_eq!(warnings[1], Warning::undefined_citation("knuth84", "1"));
        assert_eq!(warnings[2], Warning::multiply_defined_label("eq:1"));
        assert_eq!(warnings[3].kind, WarningKind::CapacityExceeded);
        assert_eq!(warnings[3].label, "sorry [main memory size=5000000]");
    }

    #[test]
    fn test_unrelated_lines() {
        assert!(parse_log("Overfull \\hbox (1.2pt too wide)\n").is_empty());
        assert!(parse_log("LaTeX Warning: Reference `x' broken").is_empty());
    }
}
