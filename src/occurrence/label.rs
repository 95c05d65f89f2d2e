//! `\newlabel` records from auxiliary files.

use super::Occurrence;
use crate::diagnostic::ScanError;
use crate::scan::extract;

/// Number of fields hyperref writes in the second `\newlabel` argument.
const LABEL_FIELDS: usize = 5;

/// One cross-reference entry of an `.aux` file.
///
/// ```text
/// \newlabel{sec:intro}{{1}{3}{Introduction\relax }{section.1}{}}
///           ^^^^^^^^^   ^  ^  ^^^^^^^^^^^^^^^^^^   ^^^^^^^^^  ^
///           name     value page  section            fourth  fifth
/// ```
///
/// Plain LaTeX only writes `{value}{page}`; the missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRecord {
    /// Label identifier.
    pub name: String,
    /// Printed value (section or equation number).
    pub value: String,
    /// Page the label sits on.
    pub page: String,
    /// Section title, with `\relax` tokens removed.
    pub section: String,
    /// Hyperref anchor, kept verbatim.
    pub fourth: String,
    /// Trailing field, kept verbatim.
    pub fifth: String,
}

impl LabelRecord {
    /// Interpret a `\newlabel` occurrence extracted with two arguments.
    pub fn from_occurrence(occurrence: &Occurrence) -> Result<Self, ScanError> {
        let mut mandatory = occurrence.mandatory_arguments();
        let (Some(name), Some(data)) = (mandatory.next(), mandatory.next()) else {
            return Err(ScanError::malformed(
                occurrence.name(),
                "expected a label name and a data group",
            ));
        };

        let mut fields = extract(&data.text, 0, LABEL_FIELDS)?
            .arguments
            .into_iter()
            .map(|a| a.text);
        let mut next = || fields.next().unwrap_or_default();

        let relax = &crate::config::get().relax_marker;
        Ok(Self {
            name: name.text.clone(),
            value: next(),
            page: next(),
            section: next().replace(relax.as_str(), ""),
            fourth: next(),
            fifth: next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::search_occurrences;

    fn labels(text: &str) -> Vec<LabelRecord> {
        search_occurrences(text, r"\newlabel", 2)
            .unwrap()
            .iter()
            .map(|o| LabelRecord::from_occurrence(o).unwrap())
            .collect()
    }

    #[test]
    fn test_hyperref_label() {
        let text = r"\newlabel{sec:intro}{{1}{3}{Introduction\relax }{section.1}{}}";
        let record = &labels(text)[0];
        assert_eq!(record.name, "sec:intro");
        assert_eq!(record.value, "1");
        assert_eq!(record.page, "3");
        assert_eq!(record.section, "Introduction ");
        assert_eq!(record.fourth, "section.1");
        assert_eq!(record.fifth, "");
    }

    #[test]
    fn test_plain_label() {
        let record = &labels(r"\newlabel{eq:1}{{2.4}{17}}")[0];
        assert_eq!(record.value, "2.4");
        assert_eq!(record.page, "17");
        assert!(record.section.is_empty());
    }

    #[test]
    fn test_nested_value() {
        let record = &labels(r"\newlabel{thm}{{\textbf {3}}{5}{}{}{}}")[0];
        assert_eq!(record.value, r"\textbf {3}");
        assert_eq!(record.page, "5");
    }

    #[test]
    fn test_missing_data_group() {
        let occ = search_occurrences(r"\newlabel{lonely}", r"\newlabel", 2)
            .unwrap()
            .remove(0);
        assert!(matches!(
            LabelRecord::from_occurrence(&occ),
            Err(ScanError::MalformedOccurrence { .. })
        ));
    }
}
