//! Warning formatting utilities.

use std::fmt::Write;

use super::warning::{Warning, WarningKind};

// ============================================================================
// Options
// ============================================================================

/// Display style for warning output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Banner line with title, label and page.
    #[default]
    Rich,
    /// `kind: label (page N)` on one line.
    Short,
}

/// Options for controlling warning formatting.
///
/// # Example
///
/// ```ignore
/// use latex_scan::diagnostic::{DiagnosticOptions, DisplayStyle};
///
/// // Default: colored rich output
/// let opts = DiagnosticOptions::default();
///
/// // Plain text (no ANSI colors) for logging
/// let opts = DiagnosticOptions::plain();
///
/// // Short format for editor integration
/// let opts = DiagnosticOptions::short();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Display style.
    pub style: DisplayStyle,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            colored: true,
            style: DisplayStyle::Rich,
        }
    }
}

impl DiagnosticOptions {
    /// Create options for colored terminal output.
    pub fn colored() -> Self {
        Self::default()
    }

    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Create options for short, uncolored output.
    pub fn short() -> Self {
        Self {
            colored: false,
            style: DisplayStyle::Short,
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set display style.
    pub fn with_style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }
}

// ============================================================================
// Coloring
// ============================================================================

/// Apply color to text based on warning kind.
#[cfg(feature = "colored-diagnostics")]
fn colorize(text: &str, kind: WarningKind) -> String {
    use owo_colors::OwoColorize;
    match kind {
        WarningKind::UndefinedReference | WarningKind::UndefinedCitation => {
            text.yellow().to_string()
        }
        WarningKind::MultiplyDefinedLabel | WarningKind::DuplicateDefinition => {
            text.magenta().to_string()
        }
        WarningKind::MissingFile => text.cyan().to_string(),
        WarningKind::CapacityExceeded => text.red().bold().to_string(),
    }
}

#[cfg(feature = "colored-diagnostics")]
fn emphasize(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.white().bold().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize(text: &str, _kind: WarningKind) -> String {
    text.to_owned()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn emphasize(text: &str) -> String {
    text.to_owned()
}

// ============================================================================
// Formatting
// ============================================================================

/// Format one warning.
pub fn format_warning(warning: &Warning, options: &DiagnosticOptions) -> String {
    let paint = |s: &str| {
        if options.colored {
            colorize(s, warning.kind)
        } else {
            s.to_owned()
        }
    };
    let label = if options.colored {
        emphasize(&warning.label)
    } else {
        warning.label.clone()
    };

    let mut out = String::new();
    match options.style {
        DisplayStyle::Rich => {
            let _ = write!(out, "{} {} {label}", paint("------"), paint(warning.kind.title()));
            if let Some(page) = &warning.page {
                let _ = write!(out, " {} {page}", paint("on page"));
            }
            let _ = write!(out, " {}", paint("------"));
        }
        DisplayStyle::Short => {
            let _ = write!(out, "{}: {label}", paint(warning.kind.title()));
            if let Some(page) = &warning.page {
                let _ = write!(out, " (page {page})");
            }
        }
    }
    out
}

/// Format warnings, one per line.
pub fn format_warnings(warnings: &[Warning], options: &DiagnosticOptions) -> String {
    warnings
        .iter()
        .map(|w| format_warning(w, options))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_plain() {
        let w = Warning::undefined_reference("eq:1", "4");
        assert_eq!(
            format_warning(&w, &DiagnosticOptions::plain()),
            "------ Undefined reference eq:1 on page 4 ------"
        );
    }

    #[test]
    fn test_short() {
        let w = Warning::multiply_defined_label("sec:a");
        assert_eq!(
            format_warning(&w, &DiagnosticOptions::short()),
            "Multiply defined label: sec:a"
        );
        let w = Warning::undefined_citation("knuth84", "2");
        assert_eq!(
            format_warning(&w, &DiagnosticOptions::short()),
            "Undefined citation: knuth84 (page 2)"
        );
    }

    #[test]
    fn test_format_many() {
        let warnings = vec![
            Warning::missing_file("a.tex"),
            Warning::missing_file("b.tex"),
        ];
        let out = format_warnings(&warnings, &DiagnosticOptions::short());
        assert_eq!(out.lines().count(), 2);
    }

    #[cfg(feature = "colored-diagnostics")]
    #[test]
    fn test_colored_contains_label() {
        let w = Warning::undefined_reference("eq:1", "4");
        let out = format_warning(&w, &DiagnosticOptions::colored());
        assert!(out.contains("eq:1"));
        assert!(out.contains('\u{1b}'));
    }
}
