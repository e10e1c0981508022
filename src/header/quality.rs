//! QUALITY_HEADER: quality-control tests applied and the flag legend.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, quoted, repeated,
    single_quoted_change,
};
use crate::constants::{NO_QUALITY_TESTS, QCFF_LEGEND, QUALITY_CODES_LEGEND, SYTM_NULL_VALUE};
use crate::format::{current_sytm, set_indexed, strip_quotes_and_spaces};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityHeader {
    pub quality_date: String,
    pub quality_tests: Vec<String>,
    pub quality_comments: Vec<String>,
}

impl Default for QualityHeader {
    fn default() -> Self {
        Self {
            quality_date: SYTM_NULL_VALUE.to_string(),
            quality_tests: Vec::new(),
            quality_comments: Vec::new(),
        }
    }
}

type Spec = FieldSpec<QualityHeader>;

static QUALITY_FIELDS: &[Spec] = &[
    Spec::scalar(
        "QUALITY_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.quality_date.clone()),
        |h, v| h.quality_date = v.into_text(),
    ),
    Spec::repeated(
        "QUALITY_TESTS",
        |h| FieldValue::Many(h.quality_tests.clone()),
        |h, v| h.quality_tests.push(v.into_text()),
    ),
    Spec::repeated(
        "QUALITY_COMMENTS",
        |h| FieldValue::Many(h.quality_comments.clone()),
        |h, v| h.quality_comments.push(v.into_text()),
    ),
];

impl QualityHeader {
    pub fn set_quality_test(&mut self, test: &str, number: usize) {
        set_indexed(
            &mut self.quality_tests,
            strip_quotes_and_spaces(test).to_string(),
            number,
        );
    }

    pub fn set_quality_comment(&mut self, comment: &str, number: usize) {
        set_indexed(
            &mut self.quality_comments,
            strip_quotes_and_spaces(comment).to_string(),
            number,
        );
    }

    pub fn quality_tests(&self) -> &[String] {
        &self.quality_tests
    }

    pub fn quality_comments(&self) -> &[String] {
        &self.quality_comments
    }

    /// Append the standard quality code legend (skipping lines already
    /// present)
    pub fn add_quality_codes(&mut self) {
        self.prepare_for_legend();
        self.append_missing(QUALITY_CODES_LEGEND);
    }

    /// Append the QCFF channel explanation (skipping lines already present)
    pub fn add_qcff_info(&mut self) {
        self.prepare_for_legend();
        self.append_missing(QCFF_LEGEND);
    }

    fn prepare_for_legend(&mut self) {
        if self.quality_date == SYTM_NULL_VALUE {
            self.quality_date = current_sytm();
        }
        if self.quality_tests.is_empty() {
            self.quality_tests.push(NO_QUALITY_TESTS.to_string());
        }
    }

    fn append_missing(&mut self, legend: &[&str]) {
        // Parsed comments lose the legend's indentation
        for line in legend {
            let wanted = line.trim();
            if !self
                .quality_comments
                .iter()
                .any(|comment| comment.trim() == wanted)
            {
                self.quality_comments.push((*line).to_string());
            }
        }
    }
}

impl HeaderRecord for QualityHeader {
    const KIND: HeaderKind = HeaderKind::Quality;

    fn fields() -> &'static [FieldSpec<Self>] {
        QUALITY_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        let mut lines = vec![quoted("QUALITY_DATE", &self.quality_date)];
        lines.extend(repeated("QUALITY_TESTS", &self.quality_tests));
        lines.extend(repeated("QUALITY_COMMENTS", &self.quality_comments));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        single_quoted_change(Self::KIND, field, old, new)
    }
}
