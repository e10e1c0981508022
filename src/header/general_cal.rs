//! GENERAL_CAL_HEADER: calibration described by type, equation and
//! coefficients.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, plain, quoted, repeated,
    single_quoted_change,
};
use crate::constants::SYTM_NULL_VALUE;
use crate::format::{format_coefficients, set_indexed, strip_quotes_and_spaces};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralCalHeader {
    pub parameter_code: String,
    pub calibration_type: String,
    pub calibration_date: String,
    pub application_date: String,
    pub number_coefficients: i64,
    pub coefficients: Vec<f64>,
    pub calibration_equation: String,
    pub calibration_comments: Vec<String>,
}

impl Default for GeneralCalHeader {
    fn default() -> Self {
        Self {
            parameter_code: String::new(),
            calibration_type: String::new(),
            calibration_date: SYTM_NULL_VALUE.to_string(),
            application_date: SYTM_NULL_VALUE.to_string(),
            number_coefficients: 0,
            coefficients: Vec::new(),
            calibration_equation: String::new(),
            calibration_comments: Vec::new(),
        }
    }
}

type Spec = FieldSpec<GeneralCalHeader>;

static GENERAL_CAL_FIELDS: &[Spec] = &[
    Spec::scalar(
        "PARAMETER_CODE",
        FieldKind::Text,
        |h| FieldValue::from(&h.parameter_code),
        |h, v| h.parameter_code = v.into_text().to_uppercase(),
    ),
    Spec::scalar(
        "CALIBRATION_TYPE",
        FieldKind::Text,
        |h| FieldValue::from(&h.calibration_type),
        |h, v| h.calibration_type = v.into_text(),
    ),
    Spec::scalar(
        "CALIBRATION_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.calibration_date.clone()),
        |h, v| h.calibration_date = v.into_text(),
    ),
    Spec::scalar(
        "APPLICATION_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.application_date.clone()),
        |h, v| h.application_date = v.into_text(),
    ),
    Spec::scalar(
        "NUMBER_OF_COEFFICIENTS",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.number_coefficients),
        |h, v| h.number_coefficients = v.as_integer(),
    ),
    Spec::scalar(
        "COEFFICIENTS",
        FieldKind::NumberList,
        |h| FieldValue::NumberList(h.coefficients.clone()),
        |h, v| h.coefficients = v.into_numbers(),
    ),
    Spec::scalar(
        "CALIBRATION_EQUATION",
        FieldKind::Text,
        |h| FieldValue::from(&h.calibration_equation),
        |h, v| h.calibration_equation = v.into_text(),
    ),
    Spec::repeated(
        "CALIBRATION_COMMENTS",
        |h| FieldValue::Many(h.calibration_comments.clone()),
        |h, v| h.calibration_comments.push(v.into_text()),
    ),
];

impl GeneralCalHeader {
    pub fn set_coefficient(&mut self, coefficient: f64, number: usize) {
        set_indexed(&mut self.coefficients, coefficient, number);
        self.number_coefficients = self.coefficients.len() as i64;
    }

    pub fn set_calibration_comment(&mut self, comment: &str, number: usize) {
        set_indexed(
            &mut self.calibration_comments,
            strip_quotes_and_spaces(comment).to_string(),
            number,
        );
    }

    pub fn add_calibration_comment(&mut self, comment: &str) {
        self.set_calibration_comment(comment, 0);
    }
}

impl HeaderRecord for GeneralCalHeader {
    const KIND: HeaderKind = HeaderKind::GeneralCal;

    fn fields() -> &'static [FieldSpec<Self>] {
        GENERAL_CAL_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        let mut lines = vec![
            quoted("PARAMETER_CODE", &self.parameter_code),
            quoted("CALIBRATION_TYPE", &self.calibration_type),
            quoted("CALIBRATION_DATE", &self.calibration_date),
            quoted("APPLICATION_DATE", &self.application_date),
            plain("NUMBER_OF_COEFFICIENTS", self.number_coefficients),
            plain("COEFFICIENTS", format_coefficients(&self.coefficients)),
            quoted("CALIBRATION_EQUATION", &self.calibration_equation),
        ];
        lines.extend(repeated("CALIBRATION_COMMENTS", &self.calibration_comments));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        single_quoted_change(Self::KIND, field, old, new)
    }
}
