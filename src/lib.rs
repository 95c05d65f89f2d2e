//! # latex-scan
//!
//! A scanner for LaTeX source that finds macro invocations and their
//! argument groups without parsing TeX.
//!
//! The scanner understands just enough of the input syntax to be reliable on
//! real documents:
//!
//! - **Comments**: `%` to end of line, never searched
//! - **Escapes**: `\%`, `\{` and friends are literal characters
//! - **Groups**: `{...}` and `[...]` nest; separators between groups may be
//!   whitespace or comments
//! - **As written**: every occurrence keeps its exact source text and span
//!
//! On top of that sit document-level operations: macro definition tables,
//! recursive `\input` expansion with cycle detection, `.aux` label lookup,
//! `.log` warning extraction and single-file bundling.
//!
//! ## Quick Start
//!
//! ```ignore
//! use latex_scan::prelude::*;
//!
//! let doc = Document::from_file("paper.tex")?;
//!
//! // Every \cite with its key
//! for cite in doc.search_occurrences(r"\cite", 1)? {
//!     println!("{} at {:?}", cite[0].text, cite.span());
//! }
//!
//! // One self-contained file, inclusions and bibliography spliced in
//! let bundle = doc.rough_source(&DiskStorage, &RoughSourceOptions::new())?;
//! bundle.save_as(&DiskStorage, "arxiv.tex")?;
//! ```
//!
//! ## Low-Level API
//!
//! - [`scan`]: Pure scanning functions over `&str`
//! - [`occurrence`]: Occurrences and the macro kind registry
//! - [`config`]: Process-wide command names and markers
//! - [`storage`]: Where document text comes from
//! - [`diagnostic`]: Errors and warnings

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "batch")]
pub mod batch;
pub mod config;
pub mod diagnostic;
pub mod document;
pub mod occurrence;
pub mod prelude;
pub mod scan;
pub mod storage;

// =============================================================================
// Documents
// =============================================================================

pub use document::{DefinitionTable, Document, MacroStatistics, RoughSourceOptions};

// =============================================================================
// Occurrences
// =============================================================================

pub use occurrence::{
    // Searching
    search_occurrences, Occurrence,
    // Interpretations
    Inclusion, LabelRecord, MacroDefinition,
    // Registry
    register_kind, Interpretation, Interpreter, KindRegistry, NamePattern,
};

// =============================================================================
// Scanning
// =============================================================================

pub use scan::{extract, find_matching, find_next, Argument, Delimiter, Extraction, Group};

// =============================================================================
// Diagnostics
// =============================================================================

pub use diagnostic::{
    // Error type
    ScanError,
    // Warnings and where they go
    DiagnosticSink, Diagnostics, LogSink, NullSink, Warning, WarningKind,
    // Filtering and summary
    DiagnosticSummary, FilterType, WarningFilter,
    // Formatting
    format_warning, format_warnings, DiagnosticOptions, DisplayStyle,
    // Build logs
    parse_log,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{Config, ConfigBuilder};
pub use storage::{DiskStorage, MapStorage, Storage};
