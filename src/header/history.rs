//! HISTORY_HEADER: a dated list of processing steps applied to the file.

use super::{FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, quoted, repeated};
use crate::constants::SYTM_NULL_VALUE;
use crate::format::{current_sytm, set_indexed, strip_quotes_and_spaces};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryHeader {
    pub creation_date: String,
    pub processes: Vec<String>,
}

impl Default for HistoryHeader {
    fn default() -> Self {
        Self {
            creation_date: SYTM_NULL_VALUE.to_string(),
            processes: Vec::new(),
        }
    }
}

type Spec = FieldSpec<HistoryHeader>;

static HISTORY_FIELDS: &[Spec] = &[
    Spec::scalar(
        "CREATION_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.creation_date.clone()),
        |h, v| h.creation_date = v.into_text(),
    ),
    Spec::repeated(
        "PROCESS",
        |h| FieldValue::Many(h.processes.clone()),
        |h, v| h.processes.push(v.into_text()),
    ),
];

impl HistoryHeader {
    /// A new history block dated now
    pub fn dated_now() -> Self {
        Self {
            creation_date: current_sytm(),
            processes: Vec::new(),
        }
    }

    pub fn add_process(&mut self, process: impl Into<String>) {
        self.processes.push(process.into());
    }

    pub fn set_process(&mut self, process: &str, number: usize) {
        set_indexed(
            &mut self.processes,
            strip_quotes_and_spaces(process).to_string(),
            number,
        );
    }

    pub fn processes(&self) -> &[String] {
        &self.processes
    }

    /// Indices of process lines containing `text`
    pub fn find_process(&self, text: &str) -> Vec<usize> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.contains(text))
            .map(|(index, _)| index)
            .collect()
    }
}

impl HeaderRecord for HistoryHeader {
    const KIND: HeaderKind = HeaderKind::History;

    fn fields() -> &'static [FieldSpec<Self>] {
        HISTORY_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        let mut lines = vec![quoted("CREATION_DATE", &self.creation_date)];
        lines.extend(repeated("PROCESS", &self.processes));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        format!("In History Header field {field} was changed from \"{old}\" to \"{new}\"")
    }
}
