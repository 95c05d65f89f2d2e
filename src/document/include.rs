//! Inclusion listing and substitution.

use std::io;
use std::path::{Path, PathBuf};

use super::{splice, Document};
use crate::diagnostic::{DiagnosticSink, ScanError, Warning};
use crate::occurrence::{resolve_identifier, search_occurrences, Inclusion, Occurrence};
use crate::storage::Storage;

/// Every inclusion invocation in `text`, in source order.
///
/// The brace-less form `\input file` is left alone.
fn inclusion_sites(text: &str) -> Result<Vec<(Occurrence, Inclusion)>, ScanError> {
    let mut sites = Vec::new();
    for command in &crate::config::get().inclusion_commands {
        for occurrence in search_occurrences(text, command, 1)? {
            if occurrence.mandatory_arguments().next().is_none() {
                log::trace!("skipping {command} without a braced file name at {:?}", occurrence.span());
                continue;
            }
            let inclusion = Inclusion::from_occurrence(&occurrence)?;
            sites.push((occurrence, inclusion));
        }
    }
    sites.sort_by_key(|(occurrence, _)| occurrence.span().start);
    Ok(sites)
}

/// Load `path`, turning a missing file into a warning.
pub(super) fn load_or_warn(
    storage: &dyn Storage,
    path: &Path,
    sink: &dyn DiagnosticSink,
) -> Result<Option<String>, ScanError> {
    match storage.load(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            sink.report(Warning::missing_file(path.display().to_string()));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

impl Document {
    /// File identifiers of every `\input`/`\include`, in source order.
    ///
    /// Identifiers are returned as written, without extension resolution.
    /// Computed once per document.
    pub fn included_file_identifiers(&self) -> Result<&[String], ScanError> {
        if let Some(files) = self.inclusions.get() {
            return Ok(files);
        }
        let files = inclusion_sites(&self.raw)?
            .into_iter()
            .map(|(_, inclusion)| inclusion.file)
            .collect();
        Ok(self.inclusions.get_or_init(|| files))
    }

    /// Replace every inclusion of `file` with `replacement`.
    ///
    /// Not recursive: inclusions inside `replacement` are left as they are.
    pub fn substitute_inclusion(&self, file: &str, replacement: &str) -> Result<Self, ScanError> {
        let sites = inclusion_sites(&self.raw)?;
        let edits = sites
            .iter()
            .filter(|(_, inclusion)| inclusion.file == file)
            .map(|(occurrence, _)| (occurrence.span(), replacement));
        Ok(self.derive(splice(&self.raw, edits)))
    }

    /// Replace every inclusion of `file` with the file's content from `storage`.
    ///
    /// A missing file is reported as a warning and the document is returned
    /// unchanged.
    pub fn substitute_inclusion_from(
        &self,
        file: &str,
        storage: &dyn Storage,
    ) -> Result<Self, ScanError> {
        let path = resolve_identifier(self.base_dir(), file);
        match load_or_warn(storage, &path, self.sink.as_ref())? {
            Some(text) => self.substitute_inclusion(file, &text),
            None => Ok(self.clone()),
        }
    }

    /// Expand every inclusion recursively.
    ///
    /// Nested identifiers resolve against the directory of this document,
    /// as TeX resolves them against the directory it was started in. A file
    /// that appears in its own inclusion chain fails with
    /// [`ScanError::CyclicInclusion`]; including the same file from two
    /// different places is fine.
    pub fn substitute_all_inclusions(&self, storage: &dyn Storage) -> Result<Self, ScanError> {
        let mut chain: Vec<PathBuf> = self.path.iter().cloned().collect();
        let expanded = self.expand(&self.raw, storage, &mut chain)?;
        Ok(self.derive(expanded))
    }

    fn expand(
        &self,
        text: &str,
        storage: &dyn Storage,
        chain: &mut Vec<PathBuf>,
    ) -> Result<String, ScanError> {
        let sites = inclusion_sites(text)?;
        if sites.is_empty() {
            return Ok(text.to_string());
        }

        let mut replacements = Vec::with_capacity(sites.len());
        for (occurrence, inclusion) in &sites {
            let path = resolve_identifier(self.base_dir(), &inclusion.file);
            if chain.contains(&path) {
                let mut cycle = chain.clone();
                cycle.push(path);
                return Err(ScanError::CyclicInclusion { chain: cycle });
            }

            let replacement = match load_or_warn(storage, &path, self.sink.as_ref())? {
                Some(content) => {
                    log::debug!("expanding {} (depth {})", path.display(), chain.len());
                    chain.push(path);
                    let expanded = self.expand(&content, storage, chain);
                    chain.pop();
                    expanded?
                }
                None => occurrence.as_written().to_string(),
            };
            replacements.push((occurrence.span(), replacement));
        }

        Ok(splice(
            text,
            replacements.iter().map(|(span, r)| (span.clone(), r.as_str())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::diagnostic::{Diagnostics, WarningKind};
    use crate::storage::MapStorage;

    #[test]
    fn test_included_file_identifiers() {
        let doc = Document::new("\\include{b}\n% \\input{hidden}\n\\input{a} \\input{b.tex}");
        assert_eq!(doc.included_file_identifiers().unwrap(), ["b", "a", "b.tex"]);
    }

    #[test]
    fn test_unbraced_input_left_alone() {
        let storage = MapStorage::new();
        storage.insert("a.tex", "A");
        let doc = Document::new("\\input preamble\n\\input{a}\n\\include");
        assert_eq!(doc.included_file_identifiers().unwrap(), ["a"]);

        let out = doc.substitute_all_inclusions(&storage).unwrap();
        assert_eq!(out.raw_text(), "\\input preamble\nA\n\\include");
    }

    #[test]
    fn test_substitute_removes_identifier() {
        let doc = Document::new(r"A \input{intro} B \input{intro} C \input{other}");
        let out = doc.substitute_inclusion("intro", "X").unwrap();
        assert_eq!(out.raw_text(), r"A X B X C \input{other}");
        assert!(!out
            .included_file_identifiers()
            .unwrap()
            .contains(&"intro".to_string()));
    }

    #[test]
    fn test_substitute_from_storage() {
        let storage = MapStorage::new();
        storage.insert("chapters/one.tex", "Chapter one.");
        let doc = Document::new(r"\input{chapters/one}").with_path("main.tex");
        let out = doc.substitute_inclusion_from("chapters/one", &storage).unwrap();
        assert_eq!(out.raw_text(), "Chapter one.");
    }

    #[test]
    fn test_substitute_missing_file() {
        let sink = Arc::new(Diagnostics::new());
        let doc = Document::new(r"see \input{nowhere}").with_sink(sink.clone());
        let out = doc.substitute_inclusion_from("nowhere", &MapStorage::new()).unwrap();
        assert_eq!(out, doc);
        assert_eq!(sink.count(WarningKind::MissingFile), 1);
        assert_eq!(sink.warnings()[0].label, "nowhere.tex");
    }

    #[test]
    fn test_substitute_all_recursive() {
        let storage = MapStorage::new();
        storage.insert("main.tex", "[\\input{a}]");
        storage.insert("a.tex", "a(\\input{b})(\\input{b})");
        storage.insert("b.tex", "b");

        let doc = Document::load(&storage, "main.tex").unwrap();
        let out = doc.substitute_all_inclusions(&storage).unwrap();
        assert_eq!(out.raw_text(), "[a(b)(b)]");
        assert!(out.included_file_identifiers().unwrap().is_empty());
    }

    #[test]
    fn test_substitute_all_nested_directory() {
        let storage = MapStorage::new();
        storage.insert("paper/a.tex", "A \\input{sub/b}");
        storage.insert("paper/sub/b.tex", "B");

        let doc = Document::new("\\input{a}").with_path("paper/main.tex");
        let out = doc.substitute_all_inclusions(&storage).unwrap();
        assert_eq!(out.raw_text(), "A B");
    }

    #[test]
    fn test_cyclic_inclusion() {
        let storage = MapStorage::new();
        storage.insert("a.tex", "\\input{b}");
        storage.insert("b.tex", "\\input{a}");

        let doc = Document::new("\\input{a}");
        let err = doc.substitute_all_inclusions(&storage).unwrap_err();
        match err {
            ScanError::CyclicInclusion { chain } => {
                let names: Vec<_> = chain
                    .iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect();
                assert_eq!(names, vec!["a.tex", "b.tex", "a.tex"]);
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_self_inclusion_of_root() {
        let storage = MapStorage::new();
        storage.insert("main.tex", "\\input{main}");
        let doc = Document::load(&storage, "main.tex").unwrap();
        assert!(matches!(
            doc.substitute_all_inclusions(&storage),
            Err(ScanError::CyclicInclusion { .. })
        ));
    }

    #[test]
    fn test_substitute_all_missing_keeps_macro() {
        let sink = Arc::new(Diagnostics::new());
        let storage = MapStorage::new();
        storage.insert("a.tex", "A");
        let doc = Document::new("\\input{a} \\input{gone}").with_sink(sink.clone());

        let out = doc.substitute_all_inclusions(&storage).unwrap();
        assert_eq!(out.raw_text(), "A \\input{gone}");
        assert_eq!(sink.count(WarningKind::MissingFile), 1);
    }
}
