//! Macro definition tables and usage statistics.

use rustc_hash::FxHashMap;

use crate::diagnostic::{DiagnosticSink, ScanError, Warning};
use crate::occurrence::{search_occurrences, MacroDefinition, Occurrence};

/// Number of brace groups a definition command takes: the name and the body.
const DEFINITION_ARITY: usize = 2;

/// Macros defined in a document, keyed by name (backslash included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionTable {
    entries: FxHashMap<String, MacroDefinition>,
}

impl DefinitionTable {
    /// Scan `text` for every definition command and build the table.
    ///
    /// Both `\newcommand{\R}{...}` and `\newcommand\R{...}` are recognized.
    /// Definitions without a readable name or body are skipped. Definitions
    /// are applied in source order, so a redefinition replaces the earlier
    /// one. Each replacement reports a duplicate-definition warning to `sink`.
    pub(crate) fn scan(
        text: &str,
        commands: &[String],
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ScanError> {
        let mut definitions = Vec::new();
        for command in commands {
            for occurrence in search_occurrences(text, command, DEFINITION_ARITY)? {
                let parsed = if occurrence.arguments().is_empty() {
                    MacroDefinition::from_unbraced(text, &occurrence)
                } else {
                    MacroDefinition::from_occurrence(&occurrence)
                };
                match parsed {
                    Ok(definition) => definitions.push(definition),
                    Err(e) if e.is_malformed_occurrence() => {
                        log::warn!("skipping definition at {:?}: {e}", occurrence.span());
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        definitions.sort_by_key(|d| d.span.start);

        let mut entries = FxHashMap::default();
        let mut covered = 0;
        for definition in definitions {
            // Nested in the body of an earlier definition.
            if definition.span.start < covered {
                continue;
            }
            covered = definition.span.end;
            if entries.contains_key(&definition.name) {
                sink.report(Warning::duplicate_definition(&definition.name));
            }
            entries.insert(definition.name.clone(), definition);
        }

        log::debug!("definition table holds {} macro(s)", entries.len());
        Ok(Self { entries })
    }

    /// Definition of `name`.
    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.entries.get(name)
    }

    /// Whether `name` is defined.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of defined macros.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, definition)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MacroDefinition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Defined names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// How a macro is defined and used in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroStatistics {
    /// Macro name, including the backslash.
    pub name: String,
    /// The effective definition, if the document defines the macro.
    pub definition: Option<MacroDefinition>,
    /// Every use, excluding the name inside its own definition.
    pub occurrences: Vec<Occurrence>,
    /// `occurrences.len()`.
    pub number_of_use: usize,
}

impl MacroStatistics {
    pub(crate) fn new(
        name: String,
        definition: Option<MacroDefinition>,
        occurrences: Vec<Occurrence>,
    ) -> Self {
        let occurrences: Vec<_> = match &definition {
            Some(def) => occurrences
                .into_iter()
                .filter(|o| !def.span.contains(&o.span().start))
                .collect(),
            None => occurrences,
        };
        Self {
            name,
            definition,
            number_of_use: occurrences.len(),
            occurrences,
        }
    }

    /// Whether the macro is used at all.
    pub fn is_used(&self) -> bool {
        self.number_of_use > 0
    }
}
