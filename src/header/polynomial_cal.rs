//! POLYNOMIAL_CAL_HEADER: polynomial calibration of one parameter.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, plain, quoted,
    single_quoted_change,
};
use crate::constants::SYTM_NULL_VALUE;
use crate::format::{format_coefficients, set_indexed};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialCalHeader {
    pub parameter_code: String,
    pub calibration_date: String,
    pub application_date: String,
    pub number_coefficients: i64,
    pub coefficients: Vec<f64>,
}

impl Default for PolynomialCalHeader {
    fn default() -> Self {
        Self {
            parameter_code: String::new(),
            calibration_date: SYTM_NULL_VALUE.to_string(),
            application_date: SYTM_NULL_VALUE.to_string(),
            number_coefficients: 0,
            coefficients: Vec::new(),
        }
    }
}

type Spec = FieldSpec<PolynomialCalHeader>;

static POLYNOMIAL_CAL_FIELDS: &[Spec] = &[
    Spec::scalar(
        "PARAMETER_CODE",
        FieldKind::Text,
        |h| FieldValue::from(&h.parameter_code),
        |h, v| h.parameter_code = v.into_text(),
    ),
    Spec::scalar(
        "PARAMETER_NAME",
        FieldKind::Text,
        |h| FieldValue::from(&h.parameter_code),
        |h, v| h.parameter_code = v.into_text(),
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
        "NUMBER_COEFFICIENTS",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.number_coefficients),
        |h, v| h.number_coefficients = v.as_integer(),
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
];

impl PolynomialCalHeader {
    /// Append (`number == 0` or past the end) or replace coefficient
    /// `number`; the coefficient count follows
    pub fn set_coefficient(&mut self, coefficient: f64, number: usize) {
        set_indexed(&mut self.coefficients, coefficient, number);
        self.number_coefficients = self.coefficients.len() as i64;
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl HeaderRecord for PolynomialCalHeader {
    const KIND: HeaderKind = HeaderKind::PolynomialCal;

    fn fields() -> &'static [FieldSpec<Self>] {
        POLYNOMIAL_CAL_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        vec![
            quoted("PARAMETER_CODE", &self.parameter_code),
            quoted("CALIBRATION_DATE", &self.calibration_date),
            quoted("APPLICATION_DATE", &self.application_date),
            plain("NUMBER_COEFFICIENTS", self.number_coefficients),
            plain("COEFFICIENTS", format_coefficients(&self.coefficients)),
        ]
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        single_quoted_change(Self::KIND, field, old, new)
    }
}
