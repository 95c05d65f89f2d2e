//! Self-contained source bundling.

use std::path::{Path, PathBuf};

use super::include::load_or_warn;
use super::{splice, Document};
use crate::diagnostic::ScanError;
use crate::storage::Storage;

const BIBLIOGRAPHY: &str = r"\bibliography";
const PRINT_INDEX: &str = r"\printindex";

/// Where [`Document::rough_source`] reads build artifacts and what it is
/// called afterwards.
///
/// Unset artifact paths are derived from the document path by changing the
/// extension to `bbl` or `ind`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoughSourceOptions {
    /// Path given to the result. Defaults to the document's own path.
    pub output: Option<PathBuf>,
    /// Compiled bibliography (`.bbl`).
    pub bibliography: Option<PathBuf>,
    /// Compiled index (`.ind`).
    pub index: Option<PathBuf>,
}

impl RoughSourceOptions {
    /// Create options with every path derived from the document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the `.bbl` path.
    pub fn with_bibliography(mut self, path: impl Into<PathBuf>) -> Self {
        self.bibliography = Some(path.into());
        self
    }

    /// Set the `.ind` path.
    pub fn with_index(mut self, path: impl Into<PathBuf>) -> Self {
        self.index = Some(path.into());
        self
    }
}

impl Document {
    /// A single-file version of the document, suitable for submission to
    /// services that do not run BibTeX or makeindex.
    ///
    /// Comments are stripped, inclusions expanded recursively, then
    /// `\bibliography{..}` is replaced by the `.bbl` content and `\printindex`
    /// by the `.ind` content. A missing artifact is reported as a warning and
    /// its macro is left in place. The result is not saved.
    pub fn rough_source(
        &self,
        storage: &dyn Storage,
        options: &RoughSourceOptions,
    ) -> Result<Self, ScanError> {
        let expanded = self
            .strip_comments()
            .substitute_all_inclusions(storage)?
            .strip_comments();

        let with_bibliography = expanded.splice_artifact(
            storage,
            BIBLIOGRAPHY,
            1,
            options.bibliography.as_deref(),
            "bbl",
        )?;
        let mut bundled = with_bibliography.splice_artifact(
            storage,
            PRINT_INDEX,
            0,
            options.index.as_deref(),
            "ind",
        )?;

        if let Some(output) = &options.output {
            bundled.path = Some(output.clone());
        }
        log::debug!("rough source is {} bytes", bundled.raw.len());
        Ok(bundled)
    }

    /// Replace every `macro_name` invocation with the content of an artifact.
    fn splice_artifact(
        &self,
        storage: &dyn Storage,
        macro_name: &str,
        arity: usize,
        explicit: Option<&Path>,
        extension: &str,
    ) -> Result<Self, ScanError> {
        let sites = self.search_occurrences(macro_name, arity)?;
        if sites.is_empty() {
            return Ok(self.clone());
        }

        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => self
                .path
                .as_deref()
                .map(|p| p.with_extension(extension))
                .ok_or(ScanError::MissingPath)?,
        };
        let Some(content) = load_or_warn(storage, &path, self.sink.as_ref())? else {
            return Ok(self.clone());
        };

        let edits = sites.iter().map(|o| (o.span(), content.as_str()));
        Ok(self.derive(splice(&self.raw, edits)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::diagnostic::{Diagnostics, WarningKind};
    use crate::storage::MapStorage;

    fn project() -> MapStorage {
        let storage = MapStorage::new();
        storage.insert(
            "main.tex",
            "\\begin{document}\n\\input{intro} % the intro\n\\bibliography{refs}\n\\printindex\n\\end{document}\nscratch",
        );
        storage.insert("intro.tex", "Intro text. % todo\n");
        storage.insert("main.bbl", "BIB");
        storage.insert("main.ind", "IND");
        storage
    }

    #[test]
    fn test_rough_source() {
        let storage = project();
        let doc = Document::load(&storage, "main.tex").unwrap();
        let options = RoughSourceOptions::new().with_output("arxiv.tex");

        let out = doc.rough_source(&storage, &options).unwrap();
        assert_eq!(
            out.raw_text(),
            "\\begin{document}\nIntro text. %\n %\nBIB\nIND\n\\end{document}"
        );
        assert_eq!(out.path(), Some(Path::new("arxiv.tex")));
        assert!(storage.get("arxiv.tex").is_none());
    }

    #[test]
    fn test_rough_source_missing_artifact() {
        let storage = project();
        storage.remove("main.ind");
        let sink = Arc::new(Diagnostics::new());
        let doc = Document::load(&storage, "main.tex")
            .unwrap()
            .with_sink(sink.clone());

        let out = doc.rough_source(&storage, &RoughSourceOptions::new()).unwrap();
        assert!(out.raw_text().contains(r"\printindex"));
        assert!(out.raw_text().contains("BIB"));
        assert_eq!(sink.count(WarningKind::MissingFile), 1);
        assert_eq!(out.path(), Some(Path::new("main.tex")));
    }

    #[test]
    fn test_rough_source_explicit_artifacts() {
        let storage = project();
        storage.insert("build/refs.bbl", "OTHER");
        let doc = Document::load(&storage, "main.tex").unwrap();
        let options = RoughSourceOptions::new().with_bibliography("build/refs.bbl");

        let out = doc.rough_source(&storage, &options).unwrap();
        assert!(out.raw_text().contains("OTHER"));
    }

    #[test]
    fn test_rough_source_needs_path_for_artifacts() {
        let doc = Document::new(r"\bibliography{refs}");
        let err = doc
            .rough_source(&MapStorage::new(), &RoughSourceOptions::new())
            .unwrap_err();
        assert!(matches!(err, ScanError::MissingPath));
    }
}
