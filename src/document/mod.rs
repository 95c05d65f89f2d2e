//! LaTeX documents and the operations that query or rewrite them.
//!
//! A [`Document`] is an immutable value: every operation that changes text
//! returns a new document carrying the same path and diagnostic sink.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Document                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  raw text ──► stripped text (lazy)                           │
//! │     │                                                        │
//! │     ├─► search_occurrences / occurrences / analyse           │
//! │     ├─► definition_table (lazy)  ──► statistics              │
//! │     ├─► included_file_identifiers (lazy)                     │
//! │     │       └─► substitute_inclusion / _all_inclusions       │
//! │     ├─► labels / newlabel_value        (.aux)                │
//! │     ├─► log_warnings                   (.log)                │
//! │     └─► rough_source                                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Searches run over the raw text, so every span an occurrence reports can be
//! used to slice [`Document::raw_text`] directly.

mod bundle;
mod comments;
mod definitions;
mod include;
mod labels;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use bundle::RoughSourceOptions;
pub use definitions::{DefinitionTable, MacroStatistics};

use crate::diagnostic::{DiagnosticSink, LogSink, ScanError};
use crate::occurrence::{search_occurrences, Interpretation, MacroDefinition, Occurrence};
use crate::scan::normalize_name;
use crate::storage::{DiskStorage, Storage};

/// The text of one LaTeX file plus lazily computed views of it.
///
/// # Example
///
/// ```ignore
/// use latex_scan::Document;
///
/// let doc = Document::new(r"\newcommand{\Foo}[2]{bar} \Foo{a}{b}");
/// let def = doc.macro_definition(r"\Foo")?.unwrap();
/// assert_eq!(def.declared_arity, 2);
///
/// let uses = doc.occurrences(r"\Foo")?;
/// assert_eq!(uses.last().unwrap().argument_texts(), vec!["a", "b"]);
/// ```
#[derive(Clone)]
pub struct Document {
    raw: String,
    path: Option<PathBuf>,
    sink: Arc<dyn DiagnosticSink>,
    stripped: OnceLock<String>,
    definitions: OnceLock<DefinitionTable>,
    inclusions: OnceLock<Vec<String>>,
}

impl Document {
    /// Create a document without a file identity.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            raw: text.into(),
            path: None,
            sink: Arc::new(LogSink),
            stripped: OnceLock::new(),
            definitions: OnceLock::new(),
            inclusions: OnceLock::new(),
        }
    }

    /// Set the file identity used by [`save`](Self::save) and for resolving
    /// inclusions.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Route warnings to `sink` instead of the `log` facade.
    ///
    /// Documents derived from this one inherit the sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Load `path` from `storage`.
    pub fn load(storage: &dyn Storage, path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let text = storage.load(path)?;
        log::debug!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::new(text).with_path(path))
    }

    /// Load `path` from the file system.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        Self::load(&DiskStorage, path)
    }

    /// Write the raw text back to the document's own path.
    pub fn save(&self, storage: &dyn Storage) -> Result<(), ScanError> {
        let path = self.path.as_deref().ok_or(ScanError::MissingPath)?;
        storage.save(path, &self.raw)?;
        Ok(())
    }

    /// Write the raw text to `path` and return the document with that identity.
    pub fn save_as(
        &self,
        storage: &dyn Storage,
        path: impl Into<PathBuf>,
    ) -> Result<Self, ScanError> {
        let path = path.into();
        storage.save(&path, &self.raw)?;
        Ok(self.clone().with_path(path))
    }

    /// The text as given.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// The text with comment bodies removed and nothing after the end marker.
    pub fn stripped_text(&self) -> &str {
        self.stripped
            .get_or_init(|| comments::strip_comments(&self.raw, &crate::config::get().end_marker))
    }

    /// File identity, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory inclusions are resolved against.
    fn base_dir(&self) -> &Path {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(Path::new(""))
    }

    /// A new document with `text`, keeping this one's path and sink.
    fn derive(&self, text: String) -> Self {
        Self {
            raw: text,
            path: self.path.clone(),
            sink: Arc::clone(&self.sink),
            stripped: OnceLock::new(),
            definitions: OnceLock::new(),
            inclusions: OnceLock::new(),
        }
    }

    // ========================================================================
    // Searching
    // ========================================================================

    /// Every invocation of `macro_name` with up to `arity` argument groups.
    pub fn search_occurrences(
        &self,
        macro_name: &str,
        arity: usize,
    ) -> Result<Vec<Occurrence>, ScanError> {
        search_occurrences(&self.raw, macro_name, arity)
    }

    /// Every invocation of `macro_name`, with the arity taken from its
    /// definition in this document.
    ///
    /// Macros the document does not define take as many argument groups as
    /// directly follow them.
    pub fn occurrences(&self, macro_name: &str) -> Result<Vec<Occurrence>, ScanError> {
        let arity = self
            .macro_definition(macro_name)?
            .map_or(usize::MAX, MacroDefinition::mandatory_arity);
        self.search_occurrences(macro_name, arity)
    }

    /// Interpret every invocation with the global kind registry.
    pub fn analyse_use_of_macro(
        &self,
        macro_name: &str,
        arity: usize,
    ) -> Result<Vec<Interpretation>, ScanError> {
        self.search_occurrences(macro_name, arity)?
            .iter()
            .map(Occurrence::analyse)
            .collect()
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    /// Macros defined in this document. Computed once per document.
    pub fn definition_table(&self) -> Result<&DefinitionTable, ScanError> {
        if let Some(table) = self.definitions.get() {
            return Ok(table);
        }
        let table = DefinitionTable::scan(
            &self.raw,
            &crate::config::get().definition_commands,
            self.sink.as_ref(),
        )?;
        Ok(self.definitions.get_or_init(|| table))
    }

    /// The effective definition of `name`.
    pub fn macro_definition(&self, name: &str) -> Result<Option<&MacroDefinition>, ScanError> {
        let name = normalize_name(name);
        Ok(self.definition_table()?.get(&name))
    }

    /// Definition and uses of `name`.
    pub fn statistics(&self, name: &str) -> Result<MacroStatistics, ScanError> {
        let definition = self.macro_definition(name)?.cloned();
        let occurrences = self.occurrences(name)?;
        Ok(MacroStatistics::new(
            normalize_name(name).into_owned(),
            definition,
            occurrences,
        ))
    }

    // ========================================================================
    // Text rewriting
    // ========================================================================

    /// A new document whose raw text is [`stripped_text`](Self::stripped_text).
    pub fn strip_comments(&self) -> Self {
        self.derive(self.stripped_text().to_string())
    }

    /// Replace `from` with `to` everywhere except inside comments.
    ///
    /// Works line by line, so `from` cannot span a line break; use
    /// [`replace_full`](Self::replace_full) for that.
    pub fn replace(&self, from: &str, to: &str) -> Self {
        self.derive(comments::replace_outside_comments(&self.raw, from, to))
    }

    /// Replace `from` with `to` everywhere, comments included.
    pub fn replace_full(&self, from: &str, to: &str) -> Self {
        self.derive(self.raw.replace(from, to))
    }
}

/// Replace each span in `text` with the matching replacement.
///
/// Spans must be sorted and disjoint.
fn splice<'a>(
    text: &str,
    edits: impl IntoIterator<Item = (std::ops::Range<usize>, &'a str)>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (span, replacement) in edits {
        out.push_str(&text[cursor..span.start]);
        out.push_str(replacement);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("len", &self.raw.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Document {}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Diagnostics, WarningKind};
    use crate::storage::MapStorage;
    use tempfile::TempDir;

    #[test]
    fn test_strip_comments_idempotent() {
        let doc = Document::new("a % x\nb\n\\end{document}\nafter % y");
        let once = doc.strip_comments();
        assert_eq!(once.raw_text(), "a %\nb\n\\end{document}");
        assert_eq!(once.strip_comments(), once);
    }

    #[test]
    fn test_definition_table() {
        let doc = Document::new(r"\newcommand{\Foo}[2]{bar}");
        let table = doc.definition_table().unwrap();
        let def = table.get(r"\Foo").unwrap();
        assert_eq!(def.declared_arity, 2);
        assert_eq!(def.body, "bar");
        assert!(std::ptr::eq(table, doc.definition_table().unwrap()));
    }

    #[test]
    fn test_duplicate_definition_warns_once() {
        let sink = Arc::new(Diagnostics::new());
        let doc = Document::new("\\newcommand{\\Foo}{first}\n\\newcommand{\\Foo}{second}")
            .with_sink(sink.clone());

        assert_eq!(doc.macro_definition("Foo").unwrap().unwrap().body, "second");
        doc.definition_table().unwrap();
        assert_eq!(sink.count(WarningKind::DuplicateDefinition), 1);
    }

    #[test]
    fn test_occurrences_use_defined_arity() {
        let doc = Document::new("\\newcommand{\\Pair}[2]{(#1,#2)}\n\\Pair{a}{b}{c}");
        let uses = doc.occurrences(r"\Pair").unwrap();
        let last = uses.last().unwrap();
        assert_eq!(last.argument_texts(), vec!["a", "b"]);
        assert_eq!(last.as_written(), r"\Pair{a}{b}");
    }

    #[test]
    fn test_occurrences_greedy_when_undefined() {
        let doc = Document::new(r"\textbf{a}{b}[c]{d} end");
        let uses = doc.occurrences(r"\textbf").unwrap();
        assert_eq!(uses[0].argument_texts(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_statistics() {
        let doc = Document::new("\\newcommand{\\R}{\\mathbb{R}}\n$x \\in \\R$, $\\R^2$");
        let stats = doc.statistics("R").unwrap();
        assert_eq!(stats.name, r"\R");
        assert!(stats.definition.is_some());
        assert_eq!(stats.number_of_use, 2);
    }

    #[test]
    fn test_analyse_use_of_macro() {
        let doc = Document::new(r"\input{a} \input{b}");
        let files: Vec<_> = doc
            .analyse_use_of_macro(r"\input", 1)
            .unwrap()
            .iter()
            .map(|i| i.as_inclusion().unwrap().file.clone())
            .collect();
        assert_eq!(files, vec!["a", "b"]);
    }

    #[test]
    fn test_analyse_unknown_kind() {
        let doc = Document::new(r"\emph{x}");
        let err = doc.analyse_use_of_macro(r"\emph", 1).unwrap_err();
        assert!(matches!(err, ScanError::UnknownMacroKind(_)));
    }

    #[test]
    fn test_replace_outside_comments() {
        let doc = Document::new("colour % colour\ncolour");
        assert_eq!(doc.replace("colour", "color").raw_text(), "color % colour\ncolor");
        assert_eq!(doc.replace_full("colour", "color").raw_text(), "color % color\ncolor");
    }

    #[test]
    fn test_derived_keeps_path() {
        let doc = Document::new("x").with_path("main.tex");
        assert_eq!(doc.replace("x", "y").path(), Some(Path::new("main.tex")));
    }

    #[test]
    fn test_save_without_path() {
        let err = Document::new("x").save(&MapStorage::new()).unwrap_err();
        assert!(matches!(err, ScanError::MissingPath));
    }

    #[test]
    fn test_save_as_and_load() {
        let storage = MapStorage::new();
        let doc = Document::new("hello").save_as(&storage, "out.tex").unwrap();
        assert_eq!(doc.path(), Some(Path::new("out.tex")));
        assert_eq!(Document::load(&storage, "out.tex").unwrap(), doc);
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paper.tex");
        std::fs::write(&path, "\\section{Intro}\n").unwrap();

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.raw_text(), "\\section{Intro}\n");
        doc.replace("Intro", "Overview").save(&DiskStorage).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\\section{Overview}\n");
    }

    #[test]
    fn test_splice() {
        assert_eq!(splice("abcdef", [(1..2, "X"), (4..6, "")]), "aXcd");
    }
}
