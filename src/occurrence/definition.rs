//! User macro definitions (`\newcommand` and friends).

use std::ops::Range;

use super::Occurrence;
use crate::diagnostic::ScanError;
use crate::scan::{extract, Argument, ESCAPE};

/// A macro defined in the document.
///
/// ```text
/// \newcommand{\Foo}[2][x]{body #1 #2}
///             ^^^^  ^  ^  ^^^^^^^^^^
///             name  |  |  body
///          arity ---'  '--- default of #1
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    /// Defined name, including the backslash.
    pub name: String,
    /// Declared number of parameters (0 without an arity bracket).
    pub declared_arity: usize,
    /// Default for the first parameter, which makes it optional.
    pub default_argument: Option<String>,
    /// Replacement text.
    pub body: String,
    /// The defining command (`\newcommand`, `\renewcommand`, ...).
    pub command: String,
    /// Byte range of the definition in its document.
    pub span: Range<usize>,
}

impl MacroDefinition {
    /// Interpret a definition occurrence extracted with two mandatory arguments.
    pub fn from_occurrence(occurrence: &Occurrence) -> Result<Self, ScanError> {
        let arguments = occurrence.arguments();
        let name = arguments
            .first()
            .filter(|a| !a.is_optional())
            .ok_or_else(|| ScanError::malformed(occurrence.name(), "expected the defined name first"))?;
        Self::from_parts(
            occurrence.name(),
            name.text.trim(),
            &arguments[1..],
            occurrence.span(),
        )
    }

    /// Interpret a definition whose name is not braced, as in
    /// `\newcommand\R{\mathbb{R}}`.
    ///
    /// `occurrence` is the bare command; the name, the optional groups and
    /// the body are read from `text` after it.
    pub fn from_unbraced(text: &str, occurrence: &Occurrence) -> Result<Self, ScanError> {
        let span = occurrence.span();
        let rest = &text[span.end..];
        let name_start = span.end + rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let name_end = name_start
            + control_sequence_len(&text[name_start..])
                .ok_or_else(|| ScanError::malformed(occurrence.name(), "expected the defined name first"))?;

        let extraction = extract(text, name_end, 1)?;
        Self::from_parts(
            occurrence.name(),
            &text[name_start..name_end],
            &extraction.arguments,
            span.start..extraction.end.max(name_end),
        )
    }

    /// Build from the groups following the name: `[arity][default]{body}`.
    fn from_parts(
        command: &str,
        name: &str,
        groups: &[Argument],
        span: Range<usize>,
    ) -> Result<Self, ScanError> {
        let malformed = |reason: &str| ScanError::malformed(command, reason);

        let (body, optional) = groups
            .split_last()
            .filter(|(body, _)| !body.is_optional())
            .ok_or_else(|| malformed("expected a definition body"))?;

        let optional: Vec<_> = optional.iter().filter(|a| a.is_optional()).collect();
        let declared_arity = match optional.first() {
            Some(arity) => arity
                .text
                .trim()
                .parse()
                .map_err(|_| malformed(&format!("invalid arity `{}`", arity.text)))?,
            None => 0,
        };

        Ok(Self {
            name: name.to_string(),
            declared_arity,
            default_argument: optional.get(1).map(|a| a.text.clone()),
            body: body.text.clone(),
            command: command.to_string(),
            span,
        })
    }

    /// Number of brace arguments an invocation takes.
    pub fn mandatory_arity(&self) -> usize {
        self.declared_arity
            .saturating_sub(usize::from(self.default_argument.is_some()))
    }
}

/// Length of the control sequence starting `text`: an escape followed by
/// a run of letters or by a single other character.
fn control_sequence_len(text: &str) -> Option<usize> {
    let rest = text.strip_prefix(char::from(ESCAPE))?;
    let letters = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    if letters > 0 {
        return Some(1 + letters);
    }
    rest.chars().next().map(|c| 1 + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::search_occurrences;

    fn define(text: &str) -> Result<MacroDefinition, ScanError> {
        let occ = search_occurrences(text, r"\newcommand", 2).unwrap().remove(0);
        MacroDefinition::from_occurrence(&occ)
    }

    #[test]
    fn test_with_arity() {
        let def = define(r"\newcommand{\Foo}[2]{bar}").unwrap();
        assert_eq!(def.name, r"\Foo");
        assert_eq!(def.declared_arity, 2);
        assert_eq!(def.body, "bar");
        assert_eq!(def.default_argument, None);
        assert_eq!(def.mandatory_arity(), 2);
        assert_eq!(def.span, 0..25);
    }

    #[test]
    fn test_without_arity() {
        let def = define(r"\newcommand{\R}{\mathbb{R}}").unwrap();
        assert_eq!(def.name, r"\R");
        assert_eq!(def.declared_arity, 0);
        assert_eq!(def.body, r"\mathbb{R}");
    }

    #[test]
    fn test_with_default() {
        let def = define(r"\newcommand{\Vect}[2][n]{#2_{#1}}").unwrap();
        assert_eq!(def.declared_arity, 2);
        assert_eq!(def.default_argument.as_deref(), Some("n"));
        assert_eq!(def.mandatory_arity(), 1);
        assert_eq!(def.body, "#2_{#1}");
    }

    #[test]
    fn test_multiline_body() {
        let def = define("\\newcommand{\\Foo}[1] % comment\n{\n  #1\n}").unwrap();
        assert_eq!(def.declared_arity, 1);
        assert_eq!(def.body, "\n  #1\n");
    }

    #[test]
    fn test_invalid_arity() {
        assert!(matches!(
            define(r"\newcommand{\Foo}[x]{bar}"),
            Err(ScanError::MalformedOccurrence { .. })
        ));
    }

    #[test]
    fn test_missing_body() {
        assert!(define(r"\newcommand{\Foo} text").is_err());
    }

    fn define_unbraced(text: &str) -> Result<MacroDefinition, ScanError> {
        let occ = search_occurrences(text, r"\newcommand", 2).unwrap().remove(0);
        assert!(occ.arguments().is_empty());
        MacroDefinition::from_unbraced(text, &occ)
    }

    #[test]
    fn test_unbraced_name() {
        let text = r"\newcommand\R{\mathbb{R}} rest";
        let def = define_unbraced(text).unwrap();
        assert_eq!(def.name, r"\R");
        assert_eq!(def.body, r"\mathbb{R}");
        assert_eq!(def.declared_arity, 0);
        assert_eq!(&text[def.span.clone()], r"\newcommand\R{\mathbb{R}}");
    }

    #[test]
    fn test_unbraced_name_with_arity() {
        let def = define_unbraced(r"\newcommand \Vect[2][n]{#2_{#1}}").unwrap();
        assert_eq!(def.name, r"\Vect");
        assert_eq!(def.declared_arity, 2);
        assert_eq!(def.default_argument.as_deref(), Some("n"));
        assert_eq!(def.body, "#2_{#1}");
    }

    #[test]
    fn test_unbraced_symbol_name() {
        let def = define_unbraced(r"\newcommand\!{bang}").unwrap();
        assert_eq!(def.name, r"\!");
        assert_eq!(def.body, "bang");
    }

    #[test]
    fn test_unbraced_malformed() {
        let err = define_unbraced(r"\newcommand R{x}").unwrap_err();
        assert!(err.is_malformed_occurrence());
        assert!(define_unbraced(r"\newcommand\R text").unwrap_err().is_malformed_occurrence());
    }
}
