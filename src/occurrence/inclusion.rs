//! File inclusion (`\input`, `\include`).

use std::path::{Path, PathBuf};

use super::Occurrence;
use crate::diagnostic::ScanError;

/// A file spliced into the document at the invocation site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    /// File identifier as written, relative to the main document.
    pub file: String,
}

impl Inclusion {
    /// Interpret an inclusion occurrence extracted with one argument.
    pub fn from_occurrence(occurrence: &Occurrence) -> Result<Self, ScanError> {
        let argument = occurrence
            .mandatory_arguments()
            .next()
            .ok_or_else(|| ScanError::malformed(occurrence.name(), "expected a file name"))?;
        Ok(Self {
            file: argument.text.trim().to_string(),
        })
    }

    /// Resolve the identifier against `base`.
    ///
    /// The configured default extension is appended when the identifier has
    /// none, the way TeX looks up `\input{chapter}` as `chapter.tex`.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        resolve_identifier(base, &self.file)
    }
}

/// Resolve a file identifier against `base`, adding the default extension.
pub(crate) fn resolve_identifier(base: &Path, file: &str) -> PathBuf {
    let path = base.join(file);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(&crate::config::get().default_extension)
    }
}
