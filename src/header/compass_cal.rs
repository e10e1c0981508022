//! COMPASS_CAL_HEADER: paired compass directions and their corrections.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, plain, quoted,
    single_quoted_change,
};
use crate::constants::SYTM_NULL_VALUE;
use crate::error::{OdfError, Result};
use crate::format::{format_coefficients, format_repr, set_indexed};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct CompassCalHeader {
    pub parameter_code: String,
    pub calibration_date: String,
    pub application_date: String,
    pub directions: Vec<f64>,
    pub corrections: Vec<f64>,
}

impl Default for CompassCalHeader {
    fn default() -> Self {
        Self {
            parameter_code: String::new(),
            calibration_date: SYTM_NULL_VALUE.to_string(),
            application_date: SYTM_NULL_VALUE.to_string(),
            directions: Vec::new(),
            corrections: Vec::new(),
        }
    }
}

type Spec = FieldSpec<CompassCalHeader>;

static COMPASS_CAL_FIELDS: &[Spec] = &[
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
        "DIRECTIONS",
        FieldKind::NumberList,
        |h| FieldValue::NumberList(h.directions.clone()),
        |h, v| h.directions = v.into_numbers(),
    ),
    Spec::scalar(
        "CORRECTIONS",
        FieldKind::NumberList,
        |h| FieldValue::NumberList(h.corrections.clone()),
        |h, v| h.corrections = v.into_numbers(),
    ),
];

impl CompassCalHeader {
    /// Directions are compass bearings in `[0, 360)`
    pub fn set_direction(&mut self, direction: f64, number: usize) -> Result<()> {
        check_bearing("DIRECTIONS", direction)?;
        set_indexed(&mut self.directions, direction, number);
        Ok(())
    }

    pub fn set_correction(&mut self, correction: f64, number: usize) -> Result<()> {
        check_bearing("CORRECTIONS", correction)?;
        set_indexed(&mut self.corrections, correction, number);
        Ok(())
    }
}

fn check_bearing(field: &str, value: f64) -> Result<()> {
    if (0.0..360.0).contains(&value) {
        Ok(())
    } else {
        Err(OdfError::format(
            HeaderKind::CompassCal,
            field,
            format_repr(value),
            "must be >= 0 and < 360",
        ))
    }
}

impl HeaderRecord for CompassCalHeader {
    const KIND: HeaderKind = HeaderKind::CompassCal;

    fn fields() -> &'static [FieldSpec<Self>] {
        COMPASS_CAL_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        vec![
            quoted("PARAMETER_CODE", &self.parameter_code),
            quoted("CALIBRATION_DATE", &self.calibration_date),
            quoted("APPLICATION_DATE", &self.application_date),
            plain("DIRECTIONS", format_coefficients(&self.directions)),
            plain("CORRECTIONS", format_coefficients(&self.corrections)),
        ]
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        single_quoted_change(Self::KIND, field, old, new)
    }
}
