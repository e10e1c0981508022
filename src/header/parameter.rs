//! PARAMETER_HEADER: metadata for one data column.
//!
//! `NULL_VALUE`, `MINIMUM_VALUE` and `MAXIMUM_VALUE` are typed by the
//! parameter's `TYPE` (and `UNITS` for time extrema), so they are held as
//! raw text during parsing and resolved in [`HeaderRecord::finish`] once the
//! whole block has been read.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, fixed, plain, quoted,
    single_quoted_change,
};
use crate::constants::{INT_NULL_VALUE, NULL_VALUE, SYTM_NULL_VALUE, TIME_UNITS};
use crate::error::{OdfError, Result};
use crate::format::{
    coerce_datetime, coerce_integral, coerce_number, format_fixed, format_repr, is_null,
    is_valid_datetime,
};
use crate::lookup::ParameterInfo;
use crate::models::{FileVersion, ParameterType};
use crate::records::PrintFormat;
use tracing::debug;

/// Minimum or maximum of a column, typed by the parameter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Extremum {
    #[default]
    Null,
    Number(f64),
    /// Canonical SYTM text
    Date(String),
}

impl Extremum {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Extremum::Null => FieldValue::Float(NULL_VALUE),
            Extremum::Number(value) => FieldValue::Float(*value),
            Extremum::Date(date) => FieldValue::Date(date.clone()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Extremum::Number(value) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterHeader {
    pub param_type: ParameterType,
    pub name: String,
    pub units: String,
    pub code: String,
    pub wmo_code: String,
    /// Canonical date for SYTM parameters, float text otherwise
    pub null_value: String,
    pub print_field_order: i64,
    pub print_field_width: i64,
    pub print_decimal_places: i64,
    pub angle_of_section: f64,
    pub magnetic_variation: f64,
    pub depth: f64,
    pub minimum_value: Extremum,
    pub maximum_value: Extremum,
    pub number_valid: i64,
    pub number_null: i64,
    pending: PendingValues,
}

/// Raw text of type-dependent fields awaiting `finish`
#[derive(Debug, Clone, Default, PartialEq)]
struct PendingValues {
    null_value: Option<String>,
    minimum_value: Option<String>,
    maximum_value: Option<String>,
}

impl Default for ParameterHeader {
    fn default() -> Self {
        Self {
            param_type: ParameterType::default(),
            name: String::new(),
            units: String::new(),
            code: String::new(),
            wmo_code: String::new(),
            null_value: format_repr(NULL_VALUE),
            print_field_order: INT_NULL_VALUE,
            print_field_width: INT_NULL_VALUE,
            print_decimal_places: INT_NULL_VALUE,
            angle_of_section: NULL_VALUE,
            magnetic_variation: NULL_VALUE,
            depth: NULL_VALUE,
            minimum_value: Extremum::Null,
            maximum_value: Extremum::Null,
            number_valid: 0,
            number_null: 0,
            pending: PendingValues::default(),
        }
    }
}

type Spec = FieldSpec<ParameterHeader>;

static PARAMETER_FIELDS: &[Spec] = &[
    Spec::scalar(
        "TYPE",
        FieldKind::Text,
        |h| FieldValue::Text(h.param_type.to_string()),
        |h, v| h.param_type = ParameterType::from_tag(&v.into_text()),
    ),
    Spec::scalar(
        "NAME",
        FieldKind::Text,
        |h| FieldValue::from(&h.name),
        |h, v| h.name = v.into_text(),
    ),
    Spec::scalar(
        "UNITS",
        FieldKind::Text,
        |h| FieldValue::from(&h.units),
        |h, v| h.units = v.into_text(),
    ),
    Spec::scalar(
        "CODE",
        FieldKind::Text,
        |h| FieldValue::from(&h.code),
        |h, v| h.code = v.into_text(),
    ),
    Spec::scalar(
        "WMO_CODE",
        FieldKind::Text,
        |h| FieldValue::from(&h.wmo_code),
        |h, v| h.wmo_code = v.into_text(),
    ),
    Spec::scalar(
        "NULL_VALUE",
        FieldKind::Text,
        |h| FieldValue::from(&h.null_value),
        |h, v| h.pending.null_value = Some(v.into_text()),
    ),
    Spec::scalar(
        "PRINT_FIELD_ORDER",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.print_field_order),
        |h, v| h.print_field_order = v.as_integer(),
    ),
    Spec::scalar(
        "PRINT_FIELD_WIDTH",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.print_field_width),
        |h, v| h.print_field_width = v.as_integer(),
    ),
    Spec::scalar(
        "PRINT_DECIMAL_PLACES",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.print_decimal_places),
        |h, v| h.print_decimal_places = v.as_integer(),
    ),
    Spec::scalar(
        "ANGLE_OF_SECTION",
        FieldKind::Float,
        |h| FieldValue::Float(h.angle_of_section),
        |h, v| h.angle_of_section = v.as_float(),
    ),
    Spec::scalar(
        "MAGNETIC_VARIATION",
        FieldKind::Float,
        |h| FieldValue::Float(h.magnetic_variation),
        |h, v| h.magnetic_variation = v.as_float(),
    ),
    Spec::scalar(
        "DEPTH",
        FieldKind::Float,
        |h| FieldValue::Float(h.depth),
        |h, v| h.depth = v.as_float(),
    ),
    Spec::scalar(
        "MINIMUM_VALUE",
        FieldKind::Text,
        |h| h.minimum_value.to_field_value(),
        |h, v| h.pending.minimum_value = Some(v.into_text()),
    ),
    Spec::scalar(
        "MAXIMUM_VALUE",
        FieldKind::Text,
        |h| h.maximum_value.to_field_value(),
        |h, v| h.pending.maximum_value = Some(v.into_text()),
    ),
    Spec::scalar(
        "NUMBER_VALID",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.number_valid),
        |h, v| h.number_valid = v.as_integer(),
    ),
    Spec::scalar(
        "NUMBER_NULL",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.number_null),
        |h, v| h.number_null = v.as_integer(),
    ),
];

impl ParameterHeader {
    /// Quality flag column header for parameter `code`, covering `rows`
    /// data rows
    pub fn quality_flag_for(code: &str, rows: usize) -> Self {
        Self {
            param_type: ParameterType::Sing,
            name: format!("Quality Flag for Parameter: {code}"),
            units: "none".to_string(),
            code: format!("Q{code}"),
            print_field_width: 1,
            print_decimal_places: 0,
            minimum_value: Extremum::Number(0.0),
            maximum_value: Extremum::Number(0.0),
            number_valid: rows as i64,
            number_null: 0,
            ..Self::default()
        }
    }

    /// New header for `code` described by a reference table entry
    pub fn from_reference(code: &str, param_type: ParameterType, info: &ParameterInfo) -> Self {
        let null_value = if param_type == ParameterType::Sytm {
            SYTM_NULL_VALUE.to_string()
        } else {
            format_repr(NULL_VALUE)
        };
        Self {
            param_type,
            name: info.description.clone(),
            units: info.units.clone(),
            code: code.to_string(),
            null_value,
            print_field_width: i64::from(info.print_field_width),
            print_decimal_places: i64::from(info.print_decimal_places),
            ..Self::default()
        }
    }

    /// Date/time valued extrema: SYTM columns, or GMT/UTC units
    pub fn is_time(&self) -> bool {
        self.param_type == ParameterType::Sytm || TIME_UNITS.contains(&self.units.as_str())
    }

    pub fn is_quality_flag(&self) -> bool {
        self.code.starts_with('Q') && self.units == "none"
    }

    /// Numeric null sentinel declared by this parameter, if numeric
    pub fn null_number(&self) -> Option<f64> {
        if self.param_type == ParameterType::Sytm {
            None
        } else {
            coerce_number(&self.null_value).ok()
        }
    }

    /// Declared decimal places; `None` when the header leaves them null
    pub fn decimals(&self) -> Option<usize> {
        usize::try_from(self.print_decimal_places).ok()
    }

    /// Data column rendering width and precision. Without declared
    /// decimals numbers keep their shortest round-trip text.
    pub fn print_format(&self) -> PrintFormat {
        let width = self.print_field_width.max(0) as usize;
        match self.decimals() {
            Some(decimals)
                if self.param_type != ParameterType::Sytm && !self.code.starts_with("SYTM") =>
            {
                PrintFormat::numeric(width, decimals)
            }
            _ => PrintFormat::text(width),
        }
    }

    fn resolve_null_value(&self, raw: &str) -> Result<String> {
        if self.param_type == ParameterType::Sytm {
            return Ok(coerce_datetime(raw));
        }
        if raw.is_empty() {
            debug!("Parameter {} has an empty NULL_VALUE", self.code);
            return Ok(format_repr(NULL_VALUE));
        }
        match coerce_number(raw) {
            Ok(value) => Ok(format_repr(value)),
            Err(_) if is_valid_datetime(raw) => Ok(raw.to_string()),
            Err(err) => Err(OdfError::format(
                Self::KIND,
                "NULL_VALUE",
                raw,
                err.to_string(),
            )),
        }
    }

    fn resolve_extremum(&self, field: &str, raw: &str) -> Result<Extremum> {
        if self.param_type == ParameterType::Sytm
            || (self.is_time() && is_valid_datetime(raw))
        {
            return Ok(Extremum::Date(coerce_datetime(raw)));
        }

        let invalid = |reason: String| OdfError::format(Self::KIND, field, raw, reason);
        match self.param_type {
            ParameterType::Inte => coerce_integral(raw)
                .map(|value| Extremum::Number(value as f64))
                .map_err(|err| invalid(err.to_string())),
            ParameterType::Sing | ParameterType::Doub => coerce_number(raw)
                .map(Extremum::Number)
                .map_err(|err| invalid(err.to_string())),
            _ => Ok(Extremum::Null),
        }
    }

    fn render_extremum(&self, key: &str, value: &Extremum) -> String {
        match value {
            Extremum::Date(date) => quoted(key, date),
            Extremum::Null if self.is_time() => quoted(key, SYTM_NULL_VALUE),
            Extremum::Null => plain(key, format_repr(NULL_VALUE)),
            Extremum::Number(number) if self.is_time() && is_null(*number) => {
                quoted(key, SYTM_NULL_VALUE)
            }
            Extremum::Number(number) => match self.decimals() {
                Some(decimals) => plain(key, format_fixed(*number, decimals)),
                None => plain(key, format_repr(*number)),
            },
        }
    }
}

impl HeaderRecord for ParameterHeader {
    const KIND: HeaderKind = HeaderKind::Parameter;

    fn fields() -> &'static [FieldSpec<Self>] {
        PARAMETER_FIELDS
    }

    fn finish(&mut self) -> Result<()> {
        if self.code.is_empty() && !self.wmo_code.is_empty() {
            self.code = self.wmo_code.clone();
        }

        let pending = std::mem::take(&mut self.pending);
        if let Some(raw) = pending.null_value {
            self.null_value = self.resolve_null_value(&raw)?;
        }
        if let Some(raw) = pending.minimum_value {
            self.minimum_value = self.resolve_extremum("MINIMUM_VALUE", &raw)?;
        }
        if let Some(raw) = pending.maximum_value {
            self.maximum_value = self.resolve_extremum("MAXIMUM_VALUE", &raw)?;
        }
        Ok(())
    }

    fn render_lines(&self, version: FileVersion) -> Vec<String> {
        let mut lines = vec![
            quoted("TYPE", self.param_type.as_str()),
            quoted("NAME", &self.name),
            quoted("UNITS", &self.units),
            quoted("CODE", &self.code),
        ];
        if !self.wmo_code.is_empty() {
            lines.push(quoted("WMO_CODE", &self.wmo_code));
        }
        if self.param_type == ParameterType::Sytm {
            lines.push(quoted("NULL_VALUE", &coerce_datetime(&self.null_value)));
        } else {
            lines.push(plain("NULL_VALUE", &self.null_value));
        }
        if version == FileVersion::V3 {
            lines.push(plain("PRINT_FIELD_ORDER", self.print_field_order));
        }
        lines.push(plain("PRINT_FIELD_WIDTH", self.print_field_width));
        lines.push(plain("PRINT_DECIMAL_PLACES", self.print_decimal_places));
        lines.push(fixed("ANGLE_OF_SECTION", self.angle_of_section, 1));
        lines.push(fixed("MAGNETIC_VARIATION", self.magnetic_variation, 1));
        lines.push(fixed("DEPTH", self.depth, 1));
        lines.push(self.render_extremum("MINIMUM_VALUE", &self.minimum_value));
        lines.push(self.render_extremum("MAXIMUM_VALUE", &self.maximum_value));
        lines.push(plain("NUMBER_VALID", self.number_valid));
        lines.push(plain("NUMBER_NULL", self.number_null));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        single_quoted_change(Self::KIND, field, old, new)
    }
}
