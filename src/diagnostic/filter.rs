//! Warning filtering utilities.

use super::warning::{Warning, WarningKind};

/// Filter type for matching warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterType {
    /// Match all warnings of the kind.
    All,
    /// Match warnings whose label contains the text.
    LabelContains(String),
    /// Match warnings whose label starts with the text.
    LabelPrefix(String),
}

impl FilterType {
    fn matches(&self, warning: &Warning) -> bool {
        match self {
            FilterType::All => true,
            FilterType::LabelContains(text) => warning.label.contains(text.as_str()),
            FilterType::LabelPrefix(prefix) => warning.label.starts_with(prefix.as_str()),
        }
    }
}

/// Filter for excluding warnings.
///
/// Combines warning kind and filter type for precise control.
///
/// # Example
///
/// ```ignore
/// use latex_scan::diagnostic::{FilterType, WarningFilter, WarningKind};
///
/// // Ignore every duplicate definition
/// let filter = WarningFilter::new(WarningKind::DuplicateDefinition, FilterType::All);
///
/// // Ignore undefined references to figures
/// let filter = WarningFilter::new(
///     WarningKind::UndefinedReference,
///     FilterType::LabelPrefix("fig:".into()),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningFilter {
    /// The kind to match.
    pub kind: WarningKind,
    /// The filter type to apply.
    pub filter: FilterType,
}

impl WarningFilter {
    /// Create a new warning filter.
    pub fn new(kind: WarningKind, filter: FilterType) -> Self {
        Self { kind, filter }
    }

    /// Check if a warning should be filtered out.
    pub fn matches(&self, warning: &Warning) -> bool {
        warning.kind == self.kind && self.filter.matches(warning)
    }
}

/// Drop warnings matched by any of `filters`.
pub fn filter_warnings(warnings: &[Warning], filters: &[WarningFilter]) -> Vec<Warning> {
    warnings
        .iter()
        .filter(|w| !filters.iter().any(|f| f.matches(w)))
        .cloned()
        .collect()
}
