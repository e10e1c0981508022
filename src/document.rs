//! The ODF document aggregate.
//!
//! Owns every header block plus the data block. A document is read from
//! decoded text lines, edited through its headers, brought back into a
//! consistent state with [`OdfDocument::update`] and rendered for either
//! wire version. No file I/O happens here.
//!
//! The parameter header list and the data block are private so that column
//! changes go through methods that keep headers, print formats and data in
//! lock-step.

use crate::change_log::ChangeLog;
use crate::constants::{
    DATA_MARKER, NULL_VALUE, ODF_EXTENSION, ODF_SPECIFICATION_VERSION_3,
    QUALITY_FLAG_EXCLUDED_PREFIXES, SYTM_CODE, SYTM_NULL_VALUE,
};
use crate::error::{OdfError, Result};
use crate::format::{coerce_datetime, current_sytm, is_null, parse_datetime, strip_quotes_and_spaces};
use crate::header::fields::split_key_value;
use crate::header::{
    CompassCalHeader, CruiseHeader, EventHeader, Extremum, GeneralCalHeader, HeaderKind,
    HeaderRecord, HistoryHeader, InstrumentHeader, MeteoHeader, ParameterHeader,
    PolynomialCalHeader, QualityHeader, RecordHeader, render_block,
};
use crate::models::{FileVersion, ParameterType};
use crate::records::{DataRecords, DataValue};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OdfDocument {
    pub file_specification: String,
    /// Wire version the document was read as
    pub source_version: FileVersion,
    pub cruise: CruiseHeader,
    pub event: EventHeader,
    pub meteo: Option<MeteoHeader>,
    pub quality: Option<QualityHeader>,
    pub instrument: InstrumentHeader,
    pub general_cals: Vec<GeneralCalHeader>,
    pub polynomial_cals: Vec<PolynomialCalHeader>,
    pub compass_cals: Vec<CompassCalHeader>,
    pub histories: Vec<HistoryHeader>,
    pub record: RecordHeader,
    parameters: Vec<ParameterHeader>,
    data: DataRecords,
}

/// One header block found while scanning: its kind (if known), the
/// heading text and its numbered body lines
struct Block<'a> {
    kind: Option<HeaderKind>,
    heading: &'a str,
    lines: Vec<(usize, &'a str)>,
}

impl OdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole document from decoded text lines
    pub fn read<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let marker = lines
            .iter()
            .position(|line| is_data_marker(line.as_ref()))
            .ok_or_else(|| OdfError::structure(format!("data marker '{DATA_MARKER}' not found")))?;

        let blocks = split_blocks(&lines[..marker]);
        debug!("Found {} header blocks before line {}", blocks.len(), marker + 1);

        let mut document = OdfDocument {
            source_version: FileVersion::V2,
            ..OdfDocument::default()
        };
        let mut seen: Vec<HeaderKind> = Vec::new();

        for block in blocks {
            let Some(kind) = block.kind else {
                warn!("Skipping unknown header block {}", block.heading);
                continue;
            };

            let singleton = !matches!(
                kind,
                HeaderKind::GeneralCal
                    | HeaderKind::PolynomialCal
                    | HeaderKind::CompassCal
                    | HeaderKind::History
                    | HeaderKind::Parameter
            );
            if singleton && seen.contains(&kind) {
                warn!("Duplicate {} block; the later block replaces the earlier", kind);
            }
            seen.push(kind);

            document.populate_block(kind, block.lines)?;
        }

        for required in [
            HeaderKind::Cruise,
            HeaderKind::Event,
            HeaderKind::Instrument,
            HeaderKind::Record,
        ] {
            if !seen.contains(&required) {
                return Err(OdfError::structure(format!("required {required} block is missing")));
            }
        }

        let codes: Vec<String> = document.parameters.iter().map(|p| p.code.clone()).collect();
        let mut formats = HashMap::new();
        for parameter in &document.parameters {
            if formats
                .insert(parameter.code.clone(), parameter.print_format())
                .is_some()
            {
                return Err(OdfError::structure(format!(
                    "parameter code {} is declared more than once",
                    parameter.code
                )));
            }
        }

        document.data = DataRecords::populate(&codes, formats, &lines[marker + 1..])?;
        debug!(
            "Read ODF document {} with {} parameters and {} data rows",
            document.file_specification,
            document.parameters.len(),
            document.data.len()
        );
        Ok(document)
    }

    fn populate_block(&mut self, kind: HeaderKind, lines: Vec<(usize, &str)>) -> Result<()> {
        match kind {
            HeaderKind::Odf => self.populate_odf_block(&lines)?,
            HeaderKind::Cruise => self.cruise = CruiseHeader::populate_numbered(lines)?,
            HeaderKind::Event => self.event = EventHeader::populate_numbered(lines)?,
            HeaderKind::Meteo => self.meteo = Some(MeteoHeader::populate_numbered(lines)?),
            HeaderKind::Quality => self.quality = Some(QualityHeader::populate_numbered(lines)?),
            HeaderKind::Instrument => {
                self.instrument = InstrumentHeader::populate_numbered(lines)?
            }
            HeaderKind::GeneralCal => self
                .general_cals
                .push(GeneralCalHeader::populate_numbered(lines)?),
            HeaderKind::PolynomialCal => self
                .polynomial_cals
                .push(PolynomialCalHeader::populate_numbered(lines)?),
            HeaderKind::CompassCal => self
                .compass_cals
                .push(CompassCalHeader::populate_numbered(lines)?),
            HeaderKind::History => self.histories.push(HistoryHeader::populate_numbered(lines)?),
            HeaderKind::Parameter => self
                .parameters
                .push(ParameterHeader::populate_numbered(lines)?),
            HeaderKind::Record => self.record = RecordHeader::populate_numbered(lines)?,
        }
        Ok(())
    }

    fn populate_odf_block(&mut self, lines: &[(usize, &str)]) -> Result<()> {
        for &(line_number, line) in lines {
            let Some((key, raw)) = split_key_value(line) else {
                continue;
            };
            match key.as_str() {
                "FILE_SPECIFICATION" => {
                    self.file_specification = strip_quotes_and_spaces(raw).to_string();
                }
                "ODF_SPECIFICATION_VERSION" => {
                    let version = strip_quotes_and_spaces(raw).parse::<f64>().map_err(|_| {
                        OdfError::format(HeaderKind::Odf, key.as_str(), raw, "expected a number")
                            .at_line(line_number)
                    })?;
                    self.source_version = FileVersion::from_specification(version);
                }
                other => debug!("Ignoring unknown ODF_HEADER field {}", other),
            }
        }
        Ok(())
    }

    /// Render the whole document for `version`
    pub fn render(&self, version: FileVersion) -> String {
        let mut odf_lines = vec![format!("  FILE_SPECIFICATION = {}", self.file_specification)];
        if version == FileVersion::V3 {
            odf_lines.push(format!(
                "  ODF_SPECIFICATION_VERSION = {ODF_SPECIFICATION_VERSION_3}"
            ));
        }

        let mut output = render_block(HeaderKind::Odf.heading(), &odf_lines, version);
        output.push_str(&self.cruise.render(version));
        output.push_str(&self.event.render(version));
        if let Some(meteo) = &self.meteo {
            output.push_str(&meteo.render(version));
        }
        if let Some(quality) = &self.quality {
            output.push_str(&quality.render(version));
        }
        output.push_str(&self.instrument.render(version));
        for cal in &self.general_cals {
            output.push_str(&cal.render(version));
        }
        for cal in &self.polynomial_cals {
            output.push_str(&cal.render(version));
        }
        for cal in &self.compass_cals {
            output.push_str(&cal.render(version));
        }
        for history in &self.histories {
            output.push_str(&history.render(version));
        }
        for parameter in &self.parameters {
            output.push_str(&parameter.render(version));
        }
        output.push_str(&self.record.render(version));
        output.push_str(DATA_MARKER);
        output.push('\n');
        match version {
            FileVersion::V2 => output.push_str(&self.data.render_legacy()),
            FileVersion::V3 => output.push_str(&self.data.render_csv()),
        }
        output
    }

    /// Recompute record counts and per-parameter statistics from the live
    /// headers and data block
    pub fn update(&mut self) -> Result<()> {
        self.check_columns()?;

        self.record.num_calibration = (self.general_cals.len() + self.polynomial_cals.len()) as i64;
        self.record.num_history = self.histories.len() as i64;
        self.record.num_swing = self.compass_cals.len() as i64;
        self.record.num_param = self.parameters.len() as i64;
        self.record.num_cycle = self.data.len() as i64;

        for (index, parameter) in self.parameters.iter_mut().enumerate() {
            parameter.print_field_order = index as i64 + 1;
            self.data
                .set_print_format(&parameter.code, parameter.print_format())?;

            let column = self.data.column(&parameter.code).ok_or_else(|| {
                OdfError::consistency(format!("no data column for {}", parameter.code))
            })?;
            update_statistics(parameter, column);
        }
        Ok(())
    }

    fn check_columns(&self) -> Result<()> {
        let header_codes: Vec<&str> = self.parameters.iter().map(|p| p.code.as_str()).collect();
        let data_codes: Vec<&str> = self.data.parameter_list().iter().map(String::as_str).collect();
        if header_codes != data_codes {
            return Err(OdfError::consistency(format!(
                "parameter headers [{}] do not match data columns [{}]",
                header_codes.join(", "),
                data_codes.join(", ")
            )));
        }
        if let Some(code) = data_codes
            .iter()
            .find(|code| self.data.print_format(code).is_none())
        {
            return Err(OdfError::consistency(format!("no print format for column {code}")));
        }
        Ok(())
    }

    /// Move the change log into the newest History block, creating one
    /// dated now if the document has none
    pub fn flush_change_log(&mut self, log: &mut ChangeLog) {
        if log.is_empty() {
            return;
        }
        if self.histories.is_empty() {
            self.histories.push(HistoryHeader::dated_now());
        }
        if let Some(history) = self.histories.last_mut() {
            log.drain_into(history);
        }
    }

    /// Append a new History block dated now
    pub fn add_history(&mut self) -> &mut HistoryHeader {
        self.histories.push(HistoryHeader::dated_now());
        let last = self.histories.len() - 1;
        &mut self.histories[last]
    }

    /// Add a process line to the newest History block
    pub fn add_to_history(&mut self, process: impl Into<String>) {
        match self.histories.last_mut() {
            Some(history) => history.add_process(process),
            None => self.add_history().add_process(process),
        }
    }

    /// `DATATYPE_CRUISE_EVENT_QUALIFIER1_QUALIFIER2`
    pub fn generate_file_spec(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.event.data_type,
            self.cruise.cruise_number,
            self.event.event_number,
            self.event.event_qualifier1,
            self.event.event_qualifier2
        )
    }

    pub fn refresh_file_specification(&mut self) {
        self.file_specification = self.generate_file_spec();
    }

    /// Current local time in canonical form
    pub fn generate_creation_date() -> String {
        current_sytm()
    }

    /// Output file name: the file specification plus `.ODF`
    pub fn to_file_name(&self) -> String {
        let stem = if self.file_specification.is_empty() {
            self.generate_file_spec()
        } else {
            self.file_specification.clone()
        };
        format!("{stem}.{ODF_EXTENSION}")
    }

    pub fn parameters(&self) -> &[ParameterHeader] {
        &self.parameters
    }

    pub fn parameter_codes(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.code.as_str()).collect()
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn is_parameter_code(&self, code: &str) -> bool {
        self.parameters.iter().any(|p| p.code == code)
    }

    pub fn parameter(&self, code: &str) -> Option<&ParameterHeader> {
        self.parameters.iter().find(|p| p.code == code)
    }

    /// Changing the code through this reference breaks lock-step with the
    /// data block, which `update` reports
    pub fn parameter_mut(&mut self, code: &str) -> Option<&mut ParameterHeader> {
        self.parameters.iter_mut().find(|p| p.code == code)
    }

    pub fn data(&self) -> &DataRecords {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataRecords {
        &mut self.data
    }

    fn parameter_index(&self, code: &str) -> Result<usize> {
        self.parameters
            .iter()
            .position(|p| p.code == code)
            .ok_or_else(|| OdfError::structure(format!("no parameter {code} in document")))
    }

    /// Insert a parameter header and its data column at `index`
    pub fn insert_parameter(
        &mut self,
        index: usize,
        header: ParameterHeader,
        values: Vec<DataValue>,
    ) -> Result<()> {
        if self.is_parameter_code(&header.code) {
            return Err(OdfError::consistency(format!(
                "parameter {} already exists",
                header.code
            )));
        }
        let index = index.min(self.parameters.len());
        self.data
            .insert_column(index, &header.code, header.print_format(), values)?;
        self.parameters.insert(index, header);
        Ok(())
    }

    /// Append a parameter header and its data column
    pub fn add_parameter(&mut self, header: ParameterHeader, values: Vec<DataValue>) -> Result<()> {
        let index = self.parameters.len();
        self.insert_parameter(index, header, values)
    }

    /// Drop a parameter header together with its data column
    pub fn remove_parameter(&mut self, code: &str, log: &mut ChangeLog) -> Result<ParameterHeader> {
        let index = self.parameter_index(code)?;
        self.data.remove_column(code)?;
        let removed = self.parameters.remove(index);
        log.append(format!("Parameter \"{code}\" was removed."));
        Ok(removed)
    }

    /// Insert an all-zero `Q<code>` column right after parameter `code`
    pub fn add_quality_flag(&mut self, code: &str, log: &mut ChangeLog) -> Result<()> {
        let index = self.parameter_index(code)?;
        let rows = self.data.len();
        let header = ParameterHeader::quality_flag_for(code, rows);
        let flag_code = header.code.clone();

        self.insert_parameter(index + 1, header, vec![DataValue::Number(0.0); rows])?;
        log.append(format!("Quality flag column \"{flag_code}\" was added."));
        Ok(())
    }

    /// Add quality flag columns for every eligible parameter and move
    /// `SYTM_01` to the first column; returns the number of flags added
    pub fn add_quality_flags(&mut self, log: &mut ChangeLog) -> Result<usize> {
        if self.data.is_empty() {
            return Err(OdfError::structure("cannot add quality flags to an empty data block"));
        }

        let eligible: Vec<String> = self
            .parameters
            .iter()
            .filter(|p| {
                !QUALITY_FLAG_EXCLUDED_PREFIXES
                    .iter()
                    .any(|prefix| p.code.starts_with(prefix))
            })
            .filter(|p| !p.is_quality_flag())
            .filter(|p| !self.is_parameter_code(&format!("Q{}", p.code)))
            .map(|p| p.code.clone())
            .collect();

        for code in &eligible {
            self.add_quality_flag(code, log)?;
        }

        if let Ok(index) = self.parameter_index(SYTM_CODE) {
            if index > 0 {
                let sytm = self.parameters.remove(index);
                self.parameters.insert(0, sytm);
                let order: Vec<String> = self.parameters.iter().map(|p| p.code.clone()).collect();
                self.data.reorder(&order)?;
            }
        }

        debug!("Added {} quality flag columns", eligible.len());
        Ok(eligible.len())
    }
}

impl FromStr for OdfDocument {
    type Err = OdfError;

    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        Self::read(&lines)
    }
}

fn is_data_marker(line: &str) -> bool {
    line.trim().trim_end_matches(',').trim() == DATA_MARKER
}

/// Split header text into blocks at heading lines; lines before the first
/// heading are ignored
fn split_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<Block<'_>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        if HeaderKind::is_heading_line(line) {
            blocks.push(Block {
                kind: HeaderKind::from_heading(line),
                heading: line.trim().trim_end_matches(','),
                lines: Vec::new(),
            });
            continue;
        }
        match blocks.last_mut() {
            Some(block) => block.lines.push((index + 1, line)),
            None => debug!("Skipping line {} before the first header block", index + 1),
        }
    }
    blocks
}

fn is_null_cell(value: &DataValue, null_number: Option<f64>) -> bool {
    match value {
        DataValue::Number(number) => {
            is_null(*number) || null_number.is_some_and(|null| (number - null).abs() < f64::EPSILON)
        }
        DataValue::Text(text) => text.is_empty() || text.eq_ignore_ascii_case(SYTM_NULL_VALUE),
    }
}

fn update_statistics(parameter: &mut ParameterHeader, column: &[DataValue]) {
    let null_number = parameter.null_number();
    let nulls = column
        .iter()
        .filter(|value| is_null_cell(value, null_number))
        .count();
    parameter.number_null = nulls as i64;
    parameter.number_valid = (column.len() - nulls) as i64;

    match parameter.param_type {
        ParameterType::Sytm => {
            let as_date = |value: &DataValue| match value {
                DataValue::Text(text) => coerce_datetime(text),
                DataValue::Number(_) => SYTM_NULL_VALUE.to_string(),
            };
            if let (Some(first), Some(last)) = (column.first(), column.last()) {
                parameter.minimum_value = Extremum::Date(as_date(first));
                parameter.maximum_value = Extremum::Date(as_date(last));
            }
            if !is_time_ordered(column) {
                warn!(
                    "Column {} is not time-ordered; its first and last rows are used as extremes",
                    parameter.code
                );
            }
        }
        ParameterType::Sing | ParameterType::Doub | ParameterType::Inte => {
            let valid = column
                .iter()
                .filter(|value| !is_null_cell(value, null_number))
                .filter_map(DataValue::as_number);
            let (min, max) = valid.fold((None::<f64>, None::<f64>), |(min, max), value| {
                (
                    Some(min.map_or(value, |m| m.min(value))),
                    Some(max.map_or(value, |m| m.max(value))),
                )
            });
            parameter.minimum_value = min.map_or(Extremum::Number(NULL_VALUE), Extremum::Number);
            parameter.maximum_value = max.map_or(Extremum::Number(NULL_VALUE), Extremum::Number);
        }
        _ => debug!(
            "Leaving extremes of {} parameter {} unchanged",
            parameter.param_type, parameter.code
        ),
    }
}

fn is_time_ordered(column: &[DataValue]) -> bool {
    let times: Vec<_> = column
        .iter()
        .filter_map(DataValue::as_text)
        .filter_map(parse_datetime)
        .collect();
    times.windows(2).all(|pair| pair[0] <= pair[1])
}
