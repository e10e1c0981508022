//! Null sentinels and field-level value coercion.
//!
//! Everything here is a pure function over text: quote stripping, Fortran
//! exponent repair, lenient date parsing with canonical SYTM output, and the
//! fixed number formats the ODF wire contract depends on.

use crate::constants::{NULL_VALUE, SYTM_FORMAT, SYTM_NULL_VALUE};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// A raw token that could not be coerced to the requested type
#[derive(Error, Debug, Clone, PartialEq)]
#[error("expected {expected}, found '{value}'")]
pub struct CoercionError {
    pub value: String,
    pub expected: &'static str,
}

impl CoercionError {
    fn new(value: &str, expected: &'static str) -> Self {
        Self {
            value: value.to_string(),
            expected,
        }
    }
}

/// Date/time layouts accepted on input, most specific first
const DATETIME_FORMATS: &[&str] = &[
    "%d-%b-%Y %H:%M:%S%.f",
    "%d-%b-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%d-%b-%Y", "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%Y%m%d"];

fn fortran_exponent() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^([+-]?\d*\.\d+)[dD]([+-]?\d+)$").ok())
        .as_ref()
}

/// Remove one layer of surrounding single quotes plus any padding whitespace
pub fn strip_quotes_and_spaces(token: &str) -> &str {
    let trimmed = token.trim();
    let trimmed = trimmed.strip_prefix('\'').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('\'').unwrap_or(trimmed);
    trimmed.trim()
}

/// Rewrite a Fortran `D` exponent as `E`, only when the whole token is a
/// numeric literal
pub fn fortran_to_e(token: &str) -> Cow<'_, str> {
    match fortran_exponent() {
        Some(pattern) => pattern.replace(token, "${1}E${2}"),
        None => Cow::Borrowed(token),
    }
}

pub fn coerce_number(token: &str) -> Result<f64, CoercionError> {
    let stripped = strip_quotes_and_spaces(token);
    if stripped.is_empty() {
        return Err(CoercionError::new(token, "a number"));
    }
    fortran_to_e(stripped)
        .parse::<f64>()
        .map_err(|_| CoercionError::new(token, "a number"))
}

/// Integer fields accept float text and truncate, e.g. `12.0`
pub fn coerce_integer(token: &str) -> Result<i64, CoercionError> {
    let stripped = strip_quotes_and_spaces(token);
    if let Ok(value) = stripped.parse::<i64>() {
        return Ok(value);
    }
    let value = coerce_number(token).map_err(|_| CoercionError::new(token, "an integer"))?;
    if value.is_finite() {
        Ok(value.trunc() as i64)
    } else {
        Err(CoercionError::new(token, "an integer"))
    }
}

/// Strict integral parse used for INTE extrema
pub fn coerce_integral(token: &str) -> Result<i64, CoercionError> {
    let value = coerce_number(token).map_err(|_| CoercionError::new(token, "an integer"))?;
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(CoercionError::new(token, "an integer"))
    }
}

/// Parse a date/time in any of the accepted layouts
pub fn parse_datetime(token: &str) -> Option<NaiveDateTime> {
    let stripped = strip_quotes_and_spaces(token);
    if stripped.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(stripped, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(stripped) {
        return Some(parsed.naive_utc());
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(stripped, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

/// Canonical `DD-MMM-YYYY HH:MM:SS.ss`, upper-case, centiseconds truncated
pub fn format_sytm(value: &NaiveDateTime) -> String {
    let centiseconds = (value.nanosecond() % 1_000_000_000) / 10_000_000;
    format!("{}.{:02}", value.format(SYTM_FORMAT), centiseconds).to_uppercase()
}

/// Lenient date coercion: canonical output, or the null sentinel when the
/// token is empty or unparseable
pub fn coerce_datetime(token: &str) -> String {
    match parse_datetime(token) {
        Some(parsed) => format_sytm(&parsed),
        None => {
            let stripped = strip_quotes_and_spaces(token);
            if !stripped.is_empty() {
                debug!("Unparseable date '{}' replaced by null sentinel", stripped);
            }
            SYTM_NULL_VALUE.to_string()
        }
    }
}

pub fn is_valid_datetime(token: &str) -> bool {
    parse_datetime(token).is_some()
}

/// Current local time in canonical form
pub fn current_sytm() -> String {
    format_sytm(&Local::now().naive_local())
}

pub fn is_null(value: f64) -> bool {
    (value - NULL_VALUE).abs() < f64::EPSILON
}

/// Shortest round-trip representation with a trailing `.0` on integral
/// values and a signed two-digit exponent, e.g. `-999.0`, `0.5`, `1e-05`
pub fn format_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    pad_exponent(format!("{value:?}"))
}

/// Fixed decimals, except the null sentinel which keeps its raw form
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if is_null(value) {
        format_repr(value)
    } else {
        format!("{value:.decimals$}")
    }
}

/// Scientific notation with `precision` mantissa digits, e.g. `6.00000000e+00`
pub fn format_scientific(value: f64, precision: usize) -> String {
    pad_exponent(format!("{value:.precision$e}"))
}

/// `1e-5` -> `1e-05`, `6.0e0` -> `6.0e+00`
fn pad_exponent(raw: String) -> String {
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}

/// Space separated scientific list; empty lists render as an empty string
pub fn format_coefficients(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format_scientific(*value, 8))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a whitespace separated list of numbers, Fortran exponents allowed
pub fn parse_number_list(raw: &str) -> Result<Vec<f64>, CoercionError> {
    strip_quotes_and_spaces(raw)
        .split_whitespace()
        .map(|token| coerce_number(token).map_err(|_| CoercionError::new(raw, "a list of numbers")))
        .collect()
}

/// Split a data line into cells; quotes are removed. A line with an
/// unquoted comma is a CSV row where every comma ends a cell, so `a,,b`
/// keeps its empty middle cell. Other lines split on runs of whitespace.
pub fn tokenize(line: &str) -> Vec<String> {
    if has_unquoted_comma(line) {
        tokenize_csv(line)
    } else {
        tokenize_whitespace(line)
    }
}

fn has_unquoted_comma(line: &str) -> bool {
    let mut quote: Option<char> = None;
    for c in line.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ',' => return true,
            None => {}
        }
    }
    false
}

/// Comma separated cells, surrounding blanks trimmed, empty cells kept
pub fn tokenize_csv(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => quote = Some(c),
                ',' => tokens.push(std::mem::take(&mut current).trim().to_string()),
                c => current.push(c),
            },
        }
    }

    tokens.push(current.trim().to_string());
    tokens
}

fn tokenize_whitespace(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for c in line.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() || c == ',' => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}

/// Indexed list assignment: `number == 0` or past the end appends,
/// otherwise replaces entry `number` (1-based)
pub fn set_indexed<T>(list: &mut Vec<T>, value: T, number: usize) {
    if number == 0 || number > list.len() {
        list.push(value);
    } else {
        list[number - 1] = value;
    }
}
