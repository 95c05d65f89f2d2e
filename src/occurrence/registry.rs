//! Explicit registry of macro interpreters.

use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{Inclusion, LabelRecord, MacroDefinition, Occurrence};
use crate::diagnostic::ScanError;

/// A specialized reading of an [`Occurrence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// `\newlabel` from an auxiliary file.
    Label(LabelRecord),
    /// `\newcommand` and friends.
    Definition(MacroDefinition),
    /// `\input` and friends.
    Inclusion(Inclusion),
}

impl Interpretation {
    /// The label record, if this is one.
    pub fn as_label(&self) -> Option<&LabelRecord> {
        match self {
            Self::Label(record) => Some(record),
            _ => None,
        }
    }

    /// The macro definition, if this is one.
    pub fn as_definition(&self) -> Option<&MacroDefinition> {
        match self {
            Self::Definition(definition) => Some(definition),
            _ => None,
        }
    }

    /// The inclusion, if this is one.
    pub fn as_inclusion(&self) -> Option<&Inclusion> {
        match self {
            Self::Inclusion(inclusion) => Some(inclusion),
            _ => None,
        }
    }
}

/// Function turning an occurrence into its interpretation.
pub type Interpreter = fn(&Occurrence) -> Result<Interpretation, ScanError>;

/// How a registry entry matches macro names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// The exact name, backslash included.
    Exact(String),
    /// Any name starting with this prefix.
    Prefix(String),
}

/// Maps macro names to interpreters.
///
/// Exact entries win over prefix entries; among prefix entries the one
/// registered last wins.
///
/// # Example
///
/// ```ignore
/// let mut registry = KindRegistry::default();
/// registry.register(NamePattern::Exact(r"\subfile".into()), |occ| {
///     Inclusion::from_occurrence(occ).map(Interpretation::Inclusion)
/// });
/// ```
#[derive(Debug, Clone)]
pub struct KindRegistry {
    exact: FxHashMap<String, Interpreter>,
    prefixes: Vec<(String, Interpreter)>,
}

impl KindRegistry {
    /// Create a registry with no entries.
    pub fn empty() -> Self {
        Self {
            exact: FxHashMap::default(),
            prefixes: Vec::new(),
        }
    }

    /// Register an interpreter, replacing any previous one for the same pattern.
    pub fn register(&mut self, pattern: NamePattern, interpreter: Interpreter) -> &mut Self {
        match pattern {
            NamePattern::Exact(name) => {
                self.exact.insert(name, interpreter);
            }
            NamePattern::Prefix(prefix) => {
                self.prefixes.retain(|(p, _)| *p != prefix);
                self.prefixes.push((prefix, interpreter));
            }
        }
        self
    }

    /// Look up the interpreter for `name`.
    pub fn lookup(&self, name: &str) -> Option<Interpreter> {
        self.exact.get(name).copied().or_else(|| {
            self.prefixes
                .iter()
                .rev()
                .find(|(prefix, _)| name.starts_with(prefix.as_str()))
                .map(|(_, interpreter)| *interpreter)
        })
    }

    /// Whether an interpreter is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Interpret `occurrence`, failing with [`ScanError::UnknownMacroKind`]
    /// when nothing is registered for its name.
    pub fn interpret(&self, occurrence: &Occurrence) -> Result<Interpretation, ScanError> {
        let interpreter = self
            .lookup(occurrence.name())
            .ok_or_else(|| ScanError::UnknownMacroKind(occurrence.name().to_string()))?;
        interpreter(occurrence)
    }
}

impl Default for KindRegistry {
    /// The built-in kinds, named after the current [`Config`](crate::Config).
    fn default() -> Self {
        let config = crate::config::get();
        let mut registry = Self::empty();
        registry.register(NamePattern::Exact(config.label_command.clone()), |occ| {
            LabelRecord::from_occurrence(occ).map(Interpretation::Label)
        });
        for command in &config.definition_commands {
            registry.register(NamePattern::Exact(command.clone()), |occ| {
                MacroDefinition::from_occurrence(occ).map(Interpretation::Definition)
            });
        }
        for command in &config.inclusion_commands {
            registry.register(NamePattern::Exact(command.clone()), |occ| {
                Inclusion::from_occurrence(occ).map(Interpretation::Inclusion)
            });
        }
        registry
    }
}

// =============================================================================
// Global Registry
// =============================================================================

/// Registry used by [`Occurrence::analyse`].
static REGISTRY: LazyLock<RwLock<KindRegistry>> =
    LazyLock::new(|| RwLock::new(KindRegistry::default()));

/// Add an interpreter to the global registry.
pub fn register_kind(pattern: NamePattern, interpreter: Interpreter) {
    REGISTRY.write().register(pattern, interpreter);
}

/// Interpret `occurrence` with the global registry.
pub fn interpret(occurrence: &Occurrence) -> Result<Interpretation, ScanError> {
    REGISTRY.read().interpret(occurrence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::search_occurrences;

    fn first(text: &str, name: &str, arity: usize) -> Occurrence {
        search_occurrences(text, name, arity).unwrap().remove(0)
    }

    #[test]
    fn test_default_kinds() {
        let registry = KindRegistry::default();
        assert!(registry.contains(r"\newlabel"));
        assert!(registry.contains(r"\newcommand"));
        assert!(registry.contains(r"\renewcommand"));
        assert!(registry.contains(r"\input"));
        assert!(!registry.contains(r"\section"));
    }

    #[test]
    fn test_unknown_kind() {
        let occ = first(r"\section{Intro}", r"\section", 1);
        let err = KindRegistry::default().interpret(&occ).unwrap_err();
        assert!(matches!(err, ScanError::UnknownMacroKind(name) if name == r"\section"));
    }

    #[test]
    fn test_dispatch() {
        let occ = first(r"\input{chapter1}", r"\input", 1);
        let interpretation = occ.analyse().unwrap();
        assert_eq!(interpretation.as_inclusion().unwrap().file, "chapter1");
        assert!(interpretation.as_label().is_none());
    }

    #[test]
    fn test_prefix_pattern() {
        let mut registry = KindRegistry::empty();
        registry.register(NamePattern::Prefix(r"\sub".into()), |occ| {
            Inclusion::from_occurrence(occ).map(Interpretation::Inclusion)
        });
        let occ = first(r"\subfile{part}", r"\subfile", 1);
        let interpretation = occ.analyse_with(&registry).unwrap();
        assert_eq!(interpretation.as_inclusion().unwrap().file, "part");
    }

    #[test]
    fn test_register_global() {
        register_kind(NamePattern::Exact(r"\includeonlyfile".into()), |occ| {
            Inclusion::from_occurrence(occ).map(Interpretation::Inclusion)
        });
        let occ = first(r"\includeonlyfile{x}", r"\includeonlyfile", 1);
        assert!(occ.analyse().is_ok());
    }
}
