//! Static key tables mapping `KEY = VALUE` lines onto typed header fields.
//!
//! Each header kind declares one [`FieldSpec`] per wire key. Parsing looks
//! the key up, coerces the raw text according to the declared
//! [`FieldKind`] and hands the typed [`FieldValue`] to the setter.

use crate::constants::{INT_NULL_VALUE, NULL_VALUE};
use crate::format::{
    coerce_datetime, coerce_integer, coerce_number, format_coefficients, format_repr,
    parse_number_list, strip_quotes_and_spaces, CoercionError,
};
use std::fmt;

/// Coercion applied to the raw text of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Date,
    NumberList,
}

impl FieldKind {
    pub fn coerce(self, raw: &str) -> Result<FieldValue, CoercionError> {
        Ok(match self {
            FieldKind::Text => FieldValue::Text(strip_quotes_and_spaces(raw).to_string()),
            FieldKind::Integer => FieldValue::Integer(coerce_integer(raw)?),
            FieldKind::Float => FieldValue::Float(coerce_number(raw)?),
            FieldKind::Date => FieldValue::Date(coerce_datetime(raw)),
            FieldKind::NumberList => FieldValue::NumberList(parse_number_list(raw)?),
        })
    }
}

/// A typed field value, also used for old/new values in change messages
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(String),
    NumberList(Vec<f64>),
    Many(Vec<String>),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) | FieldValue::Date(text) => text,
            other => other.to_string(),
        }
    }

    pub fn as_integer(&self) -> i64 {
        match self {
            FieldValue::Integer(value) => *value,
            FieldValue::Float(value) if value.is_finite() => value.trunc() as i64,
            _ => INT_NULL_VALUE,
        }
    }

    pub fn as_float(&self) -> f64 {
        match self {
            FieldValue::Float(value) => *value,
            FieldValue::Integer(value) => *value as f64,
            _ => NULL_VALUE,
        }
    }

    pub fn into_numbers(self) -> Vec<f64> {
        match self {
            FieldValue::NumberList(values) => values,
            FieldValue::Float(value) => vec![value],
            FieldValue::Integer(value) => vec![value as f64],
            _ => Vec::new(),
        }
    }

    /// Text and dates are quoted in change messages that quote only
    /// non-numeric values
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldValue::Text(_) | FieldValue::Date(_) | FieldValue::Many(_)
        )
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) | FieldValue::Date(text) => f.write_str(text),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Float(value) => f.write_str(&format_repr(*value)),
            FieldValue::NumberList(values) => f.write_str(&format_coefficients(values)),
            FieldValue::Many(values) => f.write_str(&values.join(" | ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(value: Vec<f64>) -> Self {
        FieldValue::NumberList(value)
    }
}

/// One wire key of a header kind
pub struct FieldSpec<H: 'static> {
    pub key: &'static str,
    pub kind: FieldKind,
    /// Repeated keys accumulate into a list instead of overwriting
    pub repeated: bool,
    pub get: fn(&H) -> FieldValue,
    pub set: fn(&mut H, FieldValue),
}

impl<H: 'static> FieldSpec<H> {
    pub const fn scalar(
        key: &'static str,
        kind: FieldKind,
        get: fn(&H) -> FieldValue,
        set: fn(&mut H, FieldValue),
    ) -> Self {
        Self {
            key,
            kind,
            repeated: false,
            get,
            set,
        }
    }

    pub const fn repeated(
        key: &'static str,
        get: fn(&H) -> FieldValue,
        set: fn(&mut H, FieldValue),
    ) -> Self {
        Self {
            key,
            kind: FieldKind::Text,
            repeated: true,
            get,
            set,
        }
    }
}

/// Split `KEY = VALUE` on the first `=`, dropping v2 trailing commas;
/// the key is upper-cased
pub fn split_key_value(line: &str) -> Option<(String, &str)> {
    let cleaned = line.trim().trim_end_matches([',', ' ']);
    let (key, value) = cleaned.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_ascii_uppercase(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key_value_handles_v2_commas() {
        let (key, value) = split_key_value("  cruise_number = 'BCD2023669',").unwrap();
        assert_eq!(key, "CRUISE_NUMBER");
        assert_eq!(value, "'BCD2023669'");

        let (key, value) = split_key_value("  CALIBRATION_EQUATION = 'y = a + b*x'").unwrap();
        assert_eq!(key, "CALIBRATION_EQUATION");
        assert_eq!(value, "'y = a + b*x'");

        assert!(split_key_value("CRUISE_HEADER,").is_none());
    }

    #[test]
    fn test_empty_coefficient_value_parses_to_empty_list() {
        let (_, value) = split_key_value("  COEFFICIENTS = ,").unwrap();
        assert_eq!(
            FieldKind::NumberList.coerce(value).unwrap(),
            FieldValue::NumberList(Vec::new())
        );
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Float(-999.0).to_string(), "-999.0");
        assert_eq!(FieldValue::Integer(1810).to_string(), "1810");
        assert_eq!(FieldValue::from("DFO BIO").to_string(), "DFO BIO");
    }

    #[test]
    fn test_kind_coercion_errors_carry_raw_value() {
        let err = FieldKind::Float.coerce("'12,5'").unwrap_err();
        assert_eq!(err.value, "'12,5'");
        assert_eq!(
            FieldKind::Date.coerce("garbage").unwrap(),
            FieldValue::Date(crate::constants::SYTM_NULL_VALUE.to_string())
        );
    }
}
