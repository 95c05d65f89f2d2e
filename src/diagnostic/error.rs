//! Scanning error type.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for scanning and document operations.
///
/// Recoverable conditions (duplicate definitions, multiply-defined labels,
/// missing inclusion files) are not errors; they are reported as
/// [`Warning`](super::Warning)s to the document's sink instead.
///
/// # Example
///
/// ```ignore
/// match aux.newlabel_value("eq:main") {
///     Ok(record) => println!("see page {}", record.page),
///     Err(ScanError::LabelNotFound(label)) => eprintln!("undefined reference {label}"),
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ScanError {
    /// No opening delimiter at or after the search position.
    #[error("expected `{open}` at or after byte {position}")]
    MissingGroup {
        /// The opening delimiter that was searched for.
        open: char,
        /// Where the search started.
        position: usize,
    },

    /// An opened group never returns to depth zero.
    #[error("unbalanced `{open}` group opened at byte {position}")]
    MalformedGroup {
        /// The opening delimiter of the group.
        open: char,
        /// Byte offset of the opening delimiter.
        position: usize,
    },

    /// No interpreter is registered for the macro.
    #[error("no interpreter registered for macro `{0}`")]
    UnknownMacroKind(String),

    /// An occurrence does not have the shape its interpreter expects.
    #[error("malformed `{name}` occurrence: {reason}")]
    MalformedOccurrence {
        /// Macro name, including the backslash.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A cross-reference label is absent from the document.
    #[error("label `{0}` not found")]
    LabelNotFound(String),

    /// A file includes itself, directly or transitively.
    #[error("cyclic inclusion: {}", display_chain(.chain))]
    CyclicInclusion {
        /// The inclusion chain, ending with the file seen twice.
        chain: Vec<PathBuf>,
    },

    /// The document has no file identity to save to.
    #[error("document has no file path")]
    MissingPath,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Create a malformed-occurrence error.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOccurrence {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether an occurrence did not have the shape its interpreter expects.
    pub fn is_malformed_occurrence(&self) -> bool {
        matches!(self, Self::MalformedOccurrence { .. })
    }

    /// Whether this is an undefined-reference condition.
    pub fn is_label_not_found(&self) -> bool {
        matches!(self, Self::LabelNotFound(_))
    }
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
