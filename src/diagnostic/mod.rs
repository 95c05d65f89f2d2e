//! Errors and warnings.
//!
//! Fatal conditions are [`ScanError`]s. Recoverable ones become [`Warning`]s,
//! reported to the [`DiagnosticSink`] of the document that produced them.

mod build_log;
mod error;
mod filter;
mod format;
mod sink;
mod warning;

// Re-export all public types
pub use build_log::parse_log;
pub use error::ScanError;
pub use filter::{filter_warnings, FilterType, WarningFilter};
pub use format::{format_warning, format_warnings, DiagnosticOptions, DisplayStyle};
pub use sink::{DiagnosticSink, DiagnosticSummary, Diagnostics, LogSink, NullSink};
pub use warning::{Warning, WarningKind};
