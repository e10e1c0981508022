//! ODF header records.
//!
//! One concrete type per header block kind. Every kind implements
//! [`HeaderRecord`], which supplies the shared `KEY = VALUE` parser (driven
//! by the kind's static field table), version-aware block rendering and
//! change-log helpers. Kind-specific formatting lives in `render_lines` and
//! `change_message`.

mod compass_cal;
mod cruise;
mod event;
pub mod fields;
mod general_cal;
mod history;
mod instrument;
mod meteo;
mod parameter;
mod polynomial_cal;
mod quality;
mod record;

#[cfg(test)]
mod tests;

pub use compass_cal::CompassCalHeader;
pub use cruise::CruiseHeader;
pub use event::EventHeader;
pub use fields::{FieldKind, FieldSpec, FieldValue};
pub use general_cal::GeneralCalHeader;
pub use history::HistoryHeader;
pub use instrument::InstrumentHeader;
pub use meteo::MeteoHeader;
pub use parameter::{Extremum, ParameterHeader};
pub use polynomial_cal::PolynomialCalHeader;
pub use quality::QualityHeader;
pub use record::RecordHeader;

use crate::change_log::ChangeLog;
use crate::error::{OdfError, Result};
use crate::format::format_fixed;
use crate::models::FileVersion;
use fields::split_key_value;
use std::fmt;
use tracing::debug;

/// Header block kinds, in canonical render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    Odf,
    Cruise,
    Event,
    Meteo,
    Quality,
    Instrument,
    GeneralCal,
    PolynomialCal,
    CompassCal,
    History,
    Parameter,
    Record,
}

impl HeaderKind {
    pub const ALL: [HeaderKind; 12] = [
        HeaderKind::Odf,
        HeaderKind::Cruise,
        HeaderKind::Event,
        HeaderKind::Meteo,
        HeaderKind::Quality,
        HeaderKind::Instrument,
        HeaderKind::GeneralCal,
        HeaderKind::PolynomialCal,
        HeaderKind::CompassCal,
        HeaderKind::History,
        HeaderKind::Parameter,
        HeaderKind::Record,
    ];

    /// Block heading as written in files
    pub fn heading(self) -> &'static str {
        match self {
            HeaderKind::Odf => "ODF_HEADER",
            HeaderKind::Cruise => "CRUISE_HEADER",
            HeaderKind::Event => "EVENT_HEADER",
            HeaderKind::Meteo => "METEO_HEADER",
            HeaderKind::Quality => "QUALITY_HEADER",
            HeaderKind::Instrument => "INSTRUMENT_HEADER",
            HeaderKind::GeneralCal => "GENERAL_CAL_HEADER",
            HeaderKind::PolynomialCal => "POLYNOMIAL_CAL_HEADER",
            HeaderKind::CompassCal => "COMPASS_CAL_HEADER",
            HeaderKind::History => "HISTORY_HEADER",
            HeaderKind::Parameter => "PARAMETER_HEADER",
            HeaderKind::Record => "RECORD_HEADER",
        }
    }

    /// Name used in change-log messages, e.g. `Polynomial Cal`
    pub fn label(self) -> &'static str {
        match self {
            HeaderKind::Odf => "ODF",
            HeaderKind::Cruise => "Cruise",
            HeaderKind::Event => "Event",
            HeaderKind::Meteo => "Meteo",
            HeaderKind::Quality => "Quality",
            HeaderKind::Instrument => "Instrument",
            HeaderKind::GeneralCal => "General Cal",
            HeaderKind::PolynomialCal => "Polynomial Cal",
            HeaderKind::CompassCal => "Compass Cal",
            HeaderKind::History => "History",
            HeaderKind::Parameter => "Parameter",
            HeaderKind::Record => "Record",
        }
    }

    /// Recognise a block heading line such as `EVENT_HEADER,`
    pub fn from_heading(line: &str) -> Option<Self> {
        let name = line.trim().trim_end_matches([',', ' ']);
        Self::ALL.into_iter().find(|kind| kind.heading() == name)
    }

    /// Lines ending in `HEADER` or `HEADER,` open a block, known kind or not
    pub fn is_heading_line(line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.contains('=') && trimmed.trim_end_matches(',').ends_with("HEADER")
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Shared behaviour of every header block type
pub trait HeaderRecord: Default + Sized + 'static {
    const KIND: HeaderKind;

    /// Wire keys accepted by `populate`, with their coercions
    fn fields() -> &'static [FieldSpec<Self>];

    /// Body lines (`  KEY = VALUE`), without heading or v2 commas
    fn render_lines(&self, version: FileVersion) -> Vec<String>;

    /// Change-log wording for this header kind
    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String;

    /// Post-parse hook for fields whose coercion depends on other fields
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    fn populate<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        Self::populate_numbered(
            lines
                .iter()
                .enumerate()
                .map(|(index, line)| (index + 1, line.as_ref())),
        )
    }

    /// Parse body lines tagged with their line numbers in the source text
    fn populate_numbered<'a>(lines: impl IntoIterator<Item = (usize, &'a str)>) -> Result<Self> {
        let mut header = Self::default();

        for (line_number, line) in lines {
            let Some((key, raw)) = split_key_value(line) else {
                debug!("Skipping non key/value line in {}: {}", Self::KIND, line.trim());
                continue;
            };

            let Some(spec) = Self::field_spec(&key) else {
                debug!("Ignoring unknown {} field {}", Self::KIND, key);
                continue;
            };

            let value = spec
                .kind
                .coerce(raw)
                .map_err(|err| OdfError::format(Self::KIND, &key, raw, err.to_string()))
                .map_err(|err| err.at_line(line_number))?;
            (spec.set)(&mut header, value);
        }

        header.finish()?;
        Ok(header)
    }

    /// Heading plus body; v2 comma-terminates every line but the last
    fn render(&self, version: FileVersion) -> String {
        render_block(Self::KIND.heading(), &self.render_lines(version), version)
    }

    fn field_spec(key: &str) -> Option<&'static FieldSpec<Self>> {
        let key = key.trim().to_ascii_uppercase();
        Self::fields().iter().find(|spec| spec.key == key)
    }

    fn field_value(&self, key: &str) -> Option<FieldValue> {
        Self::field_spec(key).map(|spec| (spec.get)(self))
    }

    /// Assign a field from raw text using the same coercion as parsing;
    /// repeated fields append
    fn set_field(&mut self, key: &str, raw: &str) -> Result<()> {
        let spec = Self::field_spec(key).ok_or_else(|| {
            OdfError::format(Self::KIND, key.to_ascii_uppercase(), raw, "unknown field")
        })?;
        let value = spec
            .kind
            .coerce(raw)
            .map_err(|err| OdfError::format(Self::KIND, spec.key, raw, err.to_string()))?;
        (spec.set)(self, value);
        self.finish()
    }

    /// `set_field` plus a change-log entry in this kind's wording
    fn change_field(&mut self, key: &str, raw: &str, log: &mut ChangeLog) -> Result<()> {
        let spec = Self::field_spec(key).ok_or_else(|| {
            OdfError::format(Self::KIND, key.to_ascii_uppercase(), raw, "unknown field")
        })?;
        let old = if spec.repeated {
            FieldValue::Text(String::new())
        } else {
            (spec.get)(self)
        };
        self.set_field(spec.key, raw)?;
        let new = spec
            .kind
            .coerce(raw)
            .map_err(|err| OdfError::format(Self::KIND, spec.key, raw, err.to_string()))?;
        log.append(Self::change_message(spec.key, &old, &new));
        Ok(())
    }

    fn log_change(
        &self,
        log: &mut ChangeLog,
        field: &str,
        old: impl Into<FieldValue>,
        new: impl Into<FieldValue>,
    ) {
        let field = field.trim().to_ascii_uppercase();
        log.append(Self::change_message(&field, &old.into(), &new.into()));
    }
}

/// Join a heading and body lines into a block terminated by a newline
pub fn render_block(heading: &str, lines: &[String], version: FileVersion) -> String {
    let mut block = String::new();
    let mut all = std::iter::once(heading).chain(lines.iter().map(String::as_str)).peekable();

    while let Some(line) = all.next() {
        block.push_str(line);
        if version == FileVersion::V2 && all.peek().is_some() {
            block.push(',');
        }
        block.push('\n');
    }
    block
}

/// `  KEY = 'value'`
pub(crate) fn quoted(key: &str, value: &str) -> String {
    format!("  {key} = '{value}'")
}

/// `  KEY = value`
pub(crate) fn plain(key: &str, value: impl fmt::Display) -> String {
    format!("  {key} = {value}")
}

/// `  KEY = value` with fixed decimals; the null sentinel stays raw
pub(crate) fn fixed(key: &str, value: f64, decimals: usize) -> String {
    format!("  {key} = {}", format_fixed(value, decimals))
}

/// One quoted line per entry, or a single empty entry for an empty list
pub(crate) fn repeated(key: &str, values: &[String]) -> Vec<String> {
    if values.is_empty() {
        vec![quoted(key, "")]
    } else {
        values.iter().map(|value| quoted(key, value)).collect()
    }
}

/// Text fields from legacy files sometimes carry `*` padding
pub(crate) fn strip_stars(value: &str) -> String {
    value.trim_matches(|c| c == '*' || c == ' ' || c == '\'').to_string()
}

/// `In <Kind> Header field F was changed from 'old' to 'new'`
pub(crate) fn single_quoted_change(
    kind: HeaderKind,
    field: &str,
    old: &FieldValue,
    new: &FieldValue,
) -> String {
    format!(
        "In {} Header field {field} was changed from '{old}' to '{new}'",
        kind.label()
    )
}
