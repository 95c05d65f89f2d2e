//! Parallel processing of independent documents.
//!
//! Every helper runs one task per document on the rayon thread pool and
//! returns results in input order. A failure in one document does not stop
//! the others.
//!
//! # Example
//!
//! ```ignore
//! use latex_scan::{batch, Document, DiskStorage};
//!
//! let docs: Vec<Document> = paths.iter().map(Document::from_file).collect::<Result<_, _>>()?;
//! let refs = batch::search_all(&docs, r"\ref", 1);
//! let full = batch::expand_all(&docs, &DiskStorage);
//! ```

use rayon::prelude::*;

use crate::diagnostic::ScanError;
use crate::document::{DefinitionTable, Document};
use crate::occurrence::Occurrence;
use crate::storage::Storage;

/// Search every document for `macro_name`.
pub fn search_all(
    documents: &[Document],
    macro_name: &str,
    arity: usize,
) -> Vec<Result<Vec<Occurrence>, ScanError>> {
    if documents.is_empty() {
        return vec![];
    }
    log::debug!("searching {} document(s) for {macro_name}", documents.len());

    documents
        .par_iter()
        .map(|doc| doc.search_occurrences(macro_name, arity))
        .collect()
}

/// Expand the inclusions of every document.
pub fn expand_all(
    documents: &[Document],
    storage: &dyn Storage,
) -> Vec<Result<Document, ScanError>> {
    documents
        .par_iter()
        .map(|doc| doc.substitute_all_inclusions(storage))
        .collect()
}

/// The definition table of every document.
pub fn collect_definitions(documents: &[Document]) -> Vec<Result<DefinitionTable, ScanError>> {
    documents
        .par_iter()
        .map(|doc| doc.definition_table().cloned())
        .collect()
}
