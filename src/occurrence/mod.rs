//! Macro occurrences and their specialized interpretations.
//!
//! An [`Occurrence`] is one invocation site: the macro name, the argument
//! groups that follow it, and the exact source text it spans. Known macro
//! kinds can be interpreted further through the [`KindRegistry`]:
//!
//! | Macro                                         | Interpretation      |
//! |-----------------------------------------------|---------------------|
//! | `\newlabel`                                   | [`LabelRecord`]     |
//! | `\newcommand`, `\renewcommand`, `\providecommand` | [`MacroDefinition`] |
//! | `\input`, `\include`                          | [`Inclusion`]       |

mod definition;
mod inclusion;
mod label;
mod registry;

use std::ops::Range;

pub use definition::MacroDefinition;
pub use inclusion::Inclusion;
pub(crate) use inclusion::resolve_identifier;
pub use label::LabelRecord;
pub use registry::{
    interpret, register_kind, Interpretation, Interpreter, KindRegistry, NamePattern,
};

use crate::diagnostic::ScanError;
use crate::scan::{extract, find_next, normalize_name, Argument};

/// One invocation of a macro in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    name: String,
    arguments: Vec<Argument>,
    as_written: String,
    span: Range<usize>,
    starred: bool,
}

impl Occurrence {
    /// Build an occurrence from its parts.
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<Argument>,
        as_written: impl Into<String>,
        span: Range<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            arguments,
            as_written: as_written.into(),
            span,
            starred: false,
        }
    }

    /// Mark the occurrence as the starred form (`\section*`).
    pub fn with_star(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    /// Macro name, including the backslash.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All argument groups, optional ones included.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The argument at `index`.
    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    /// Argument texts in order.
    pub fn argument_texts(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.text.as_str()).collect()
    }

    /// Mandatory (brace) arguments only.
    pub fn mandatory_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| !a.is_optional())
    }

    /// Number of argument groups.
    pub fn number_of_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// The invocation exactly as written, from the backslash to the last group.
    pub fn as_written(&self) -> &str {
        &self.as_written
    }

    /// Byte range of [`as_written`](Self::as_written) in the scanned text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Whether the invocation used the starred form.
    pub fn is_starred(&self) -> bool {
        self.starred
    }

    /// Interpret with the global registry.
    pub fn analyse(&self) -> Result<Interpretation, ScanError> {
        interpret(self)
    }

    /// Interpret with an explicit registry.
    pub fn analyse_with(&self, registry: &KindRegistry) -> Result<Interpretation, ScanError> {
        registry.interpret(self)
    }
}

impl std::ops::Index<usize> for Occurrence {
    type Output = Argument;

    fn index(&self, index: usize) -> &Argument {
        &self.arguments[index]
    }
}

impl std::fmt::Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_written)
    }
}

/// Find every invocation of `macro_name` in `text` with up to `arity` arguments.
///
/// A `*` directly after the name is consumed and recorded. Invocations inside
/// comments are never reported. Scanning resumes after the last consumed
/// argument, so arguments are never searched for nested invocations.
pub fn search_occurrences(
    text: &str,
    macro_name: &str,
    arity: usize,
) -> Result<Vec<Occurrence>, ScanError> {
    let name = normalize_name(macro_name);
    let mut occurrences = Vec::new();
    let mut cursor = 0;

    while let Some(at) = find_next(text, &name, cursor) {
        let mut after = at + name.len();
        let starred = text.as_bytes().get(after) == Some(&b'*');
        if starred {
            after += 1;
        }

        let extraction = extract(text, after, arity)?;
        let end = if extraction.arguments.is_empty() {
            after
        } else {
            extraction.end
        };

        log::trace!("{name} at {at}..{end} with {} argument(s)", extraction.arguments.len());
        occurrences.push(
            Occurrence::new(name.as_ref(), extraction.arguments, &text[at..end], at..end)
                .with_star(starred),
        );
        cursor = end;
    }

    log::debug!("found {} occurrence(s) of {name}", occurrences.len());
    Ok(occurrences)
}
