//! Prelude module for convenient imports.
//!
//! ```ignore
//! use latex_scan::prelude::*;
//! ```

// Documents
pub use crate::document::{DefinitionTable, Document, MacroStatistics, RoughSourceOptions};

// Occurrences
pub use crate::occurrence::{
    search_occurrences, Inclusion, Interpretation, LabelRecord, MacroDefinition, Occurrence,
};

// Diagnostics
pub use crate::diagnostic::{
    DiagnosticOptions, DiagnosticSink, Diagnostics, ScanError, Warning, WarningKind,
};

// Storage
pub use crate::storage::{DiskStorage, MapStorage, Storage};

// Batch
#[cfg(feature = "batch")]
pub use crate::batch::{collect_definitions, expand_all, search_all};
