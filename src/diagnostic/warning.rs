//! Warning records.

use std::fmt;

/// What a [`Warning`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// `\ref` to a label that is not defined.
    UndefinedReference,
    /// `\cite` of a key that is not defined.
    UndefinedCitation,
    /// A label defined more than once.
    MultiplyDefinedLabel,
    /// A macro defined more than once in the same document.
    DuplicateDefinition,
    /// A file to splice in could not be found.
    MissingFile,
    /// TeX ran out of memory.
    CapacityExceeded,
}

impl WarningKind {
    /// Short human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::UndefinedReference => "Undefined reference",
            Self::UndefinedCitation => "Undefined citation",
            Self::MultiplyDefinedLabel => "Multiply defined label",
            Self::DuplicateDefinition => "Macro defined twice",
            Self::MissingFile => "File not found",
            Self::CapacityExceeded => "TeX capacity exceeded",
        }
    }
}

/// A non-fatal condition found while scanning, built from a label and a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// What kind of problem this is.
    pub kind: WarningKind,
    /// The label, citation key, macro name or file concerned.
    pub label: String,
    /// Page reference, when the source provides one.
    pub page: Option<String>,
}

impl Warning {
    /// Create a warning without page information.
    pub fn new(kind: WarningKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            page: None,
        }
    }

    /// Attach a page reference.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Undefined `\ref` on `page`.
    pub fn undefined_reference(label: impl Into<String>, page: impl Into<String>) -> Self {
        Self::new(WarningKind::UndefinedReference, label).with_page(page)
    }

    /// Undefined `\cite` on `page`.
    pub fn undefined_citation(label: impl Into<String>, page: impl Into<String>) -> Self {
        Self::new(WarningKind::UndefinedCitation, label).with_page(page)
    }

    /// Label defined more than once.
    pub fn multiply_defined_label(label: impl Into<String>) -> Self {
        Self::new(WarningKind::MultiplyDefinedLabel, label)
    }

    /// Macro defined more than once.
    pub fn duplicate_definition(name: impl Into<String>) -> Self {
        Self::new(WarningKind::DuplicateDefinition, name)
    }

    /// File that could not be loaded.
    pub fn missing_file(path: impl Into<String>) -> Self {
        Self::new(WarningKind::MissingFile, path)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind.title(), self.label)?;
        if let Some(page) = &self.page {
            write!(f, " on page {page}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let w = Warning::undefined_reference("eq:1", "4");
        assert_eq!(w.to_string(), "Undefined reference `eq:1` on page 4");
        let w = Warning::duplicate_definition(r"\Foo");
        assert_eq!(w.to_string(), r"Macro defined twice `\Foo`");
    }
}
