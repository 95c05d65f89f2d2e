//! Build artifacts: `.aux` label records and `.log` warnings.

use super::Document;
use crate::diagnostic::{parse_log, ScanError, Warning};
use crate::occurrence::LabelRecord;

impl Document {
    /// Every `\newlabel` record, in source order. Meant for `.aux` files.
    ///
    /// Bare `\newlabel` tokens without a name and a data group, such as the
    /// ones hyperref writes when it redefines the command, are skipped.
    pub fn labels(&self) -> Result<Vec<LabelRecord>, ScanError> {
        let command = &crate::config::get().label_command;
        let mut records = Vec::new();
        for occurrence in self.search_occurrences(command, 2)? {
            if occurrence.mandatory_arguments().count() < 2 {
                log::trace!("skipping bare {command} at {:?}", occurrence.span());
                continue;
            }
            records.push(LabelRecord::from_occurrence(&occurrence)?);
        }
        Ok(records)
    }

    /// The record of `label`.
    ///
    /// When the label is written more than once, a multiply-defined warning
    /// is reported and the last record is returned.
    pub fn newlabel_value(&self, label: &str) -> Result<LabelRecord, ScanError> {
        let mut matching: Vec<_> = self
            .labels()?
            .into_iter()
            .filter(|record| record.name == label)
            .collect();

        if matching.len() > 1 {
            self.sink.report(Warning::multiply_defined_label(label));
        }
        matching
            .pop()
            .ok_or_else(|| ScanError::LabelNotFound(label.to_string()))
    }

    /// Warnings recorded by TeX. Meant for `.log` files.
    pub fn log_warnings(&self) -> Vec<Warning> {
        parse_log(&self.raw)
    }
}
