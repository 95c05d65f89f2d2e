//! Destinations for warnings.

use parking_lot::Mutex;

use super::filter::WarningFilter;
use super::warning::{Warning, WarningKind};

/// Receives warnings produced while scanning.
///
/// Documents hold their sink behind an `Arc`, so implementations must be
/// shareable across threads.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one warning.
    fn report(&self, warning: Warning);
}

/// Forwards warnings to the `log` facade at `warn` level.
///
/// This is the default sink of every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, warning: Warning) {
        log::warn!("{warning}");
    }
}

/// Discards all warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _warning: Warning) {}
}

// ============================================================================
// DiagnosticSummary
// ============================================================================

/// Count of collected warnings by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    /// Undefined references and citations.
    pub undefined: usize,
    /// Multiply defined labels and duplicate macro definitions.
    pub duplicates: usize,
    /// Everything else.
    pub other: usize,
}

impl DiagnosticSummary {
    /// Create summary from warnings.
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        warnings.iter().fold(Self::default(), |mut summary, w| {
            match w.kind {
                WarningKind::UndefinedReference | WarningKind::UndefinedCitation => {
                    summary.undefined += 1
                }
                WarningKind::MultiplyDefinedLabel | WarningKind::DuplicateDefinition => {
                    summary.duplicates += 1
                }
                WarningKind::MissingFile | WarningKind::CapacityExceeded => summary.other += 1,
            }
            summary
        })
    }

    /// Total number of warnings.
    pub fn total(&self) -> usize {
        self.undefined + self.duplicates + self.other
    }

    /// Whether there are any warnings at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl std::fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match self.total() {
            0 => write!(f, "no warnings"),
            n => write!(
                f,
                "{n} warning{} ({} undefined, {} duplicate{}, {} other)",
                plural(n),
                self.undefined,
                self.duplicates,
                plural(self.duplicates),
                self.other
            ),
        }
    }
}

// ============================================================================
// Diagnostics (Collection)
// ============================================================================

/// A thread-safe collection of warnings.
///
/// # Example
///
/// ```ignore
/// let diagnostics = Arc::new(Diagnostics::new());
/// let doc = Document::new(text).with_sink(diagnostics.clone());
/// doc.definition_table()?;
/// for warning in diagnostics.warnings() {
///     println!("{warning}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Mutex<Vec<Warning>>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected warnings.
    pub fn warnings(&self) -> Vec<Warning> {
        self.items.lock().clone()
    }

    /// Remove and return all collected warnings.
    pub fn take(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.items.lock())
    }

    /// Number of collected warnings.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Check if there are no warnings.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Count warnings of one kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.items.lock().iter().filter(|w| w.kind == kind).count()
    }

    /// Get a summary of warning counts.
    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary::from_warnings(&self.items.lock())
    }

    /// Warnings not excluded by `filter`.
    pub fn filtered(&self, filter: &WarningFilter) -> Vec<Warning> {
        self.items
            .lock()
            .iter()
            .filter(|w| !filter.matches(w))
            .cloned()
            .collect()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&self, warning: Warning) {
        self.items.lock().push(warning);
    }
}
