//! The ODF data block.
//!
//! A rectangular, column-major table whose column set is the parameter code
//! list. The code list, the per-column print formats and the columns are
//! only ever changed together, so the three stay in lock-step.

use crate::constants::{NULL_VALUE, SYTM_NULL_VALUE};
use crate::error::{OdfError, Result};
use crate::format::{coerce_number, format_repr, tokenize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Column width and, for numeric columns, decimal places (`w.d` or `w`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintFormat {
    pub width: usize,
    pub decimals: Option<usize>,
}

impl PrintFormat {
    pub fn numeric(width: usize, decimals: usize) -> Self {
        Self {
            width,
            decimals: Some(decimals),
        }
    }

    pub fn text(width: usize) -> Self {
        Self {
            width,
            decimals: None,
        }
    }
}

impl fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decimals {
            Some(decimals) => write!(f, "{}.{}", self.width, decimals),
            None => write!(f, "{}", self.width),
        }
    }
}

impl FromStr for PrintFormat {
    type Err = OdfError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OdfError::structure(format!("invalid print format '{s}'"));
        match s.trim().split_once('.') {
            Some((width, decimals)) => Ok(Self::numeric(
                width.parse().map_err(|_| invalid())?,
                decimals.parse().map_err(|_| invalid())?,
            )),
            None => Ok(Self::text(s.trim().parse().map_err(|_| invalid())?)),
        }
    }
}

/// One data cell
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Number(f64),
    /// Non-numeric cell, stored without its quotes (e.g. a SYTM timestamp)
    Text(String),
}

impl DataValue {
    /// Numeric when the token parses as a number, text otherwise
    pub fn from_token(token: &str) -> Self {
        match coerce_number(token) {
            Ok(value) => DataValue::Number(value),
            Err(_) => DataValue::Text(token.to_string()),
        }
    }

    /// Missing cell of column `code`: the time null for SYTM, -999 otherwise
    pub fn null_for(code: &str) -> Self {
        if code.starts_with("SYTM") {
            DataValue::Text(SYTM_NULL_VALUE.to_string())
        } else {
            DataValue::Number(NULL_VALUE)
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Number(value) => Some(*value),
            DataValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(text) => Some(text),
            DataValue::Number(_) => None,
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Number(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRecords {
    parameter_list: Vec<String>,
    print_formats: HashMap<String, PrintFormat>,
    columns: Vec<Vec<DataValue>>,
    row_count: usize,
}

impl DataRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table with the given columns
    pub fn with_columns(
        parameter_codes: &[String],
        print_formats: HashMap<String, PrintFormat>,
    ) -> Result<Self> {
        for code in parameter_codes {
            if !print_formats.contains_key(code) {
                return Err(OdfError::consistency(format!(
                    "no print format for parameter {code}"
                )));
            }
        }
        Ok(Self {
            parameter_list: parameter_codes.to_vec(),
            print_formats,
            columns: vec![Vec::new(); parameter_codes.len()],
            row_count: 0,
        })
    }

    /// Tokenize raw data lines into rows with columns in
    /// `parameter_codes` order
    pub fn populate<S: AsRef<str>>(
        parameter_codes: &[String],
        print_formats: HashMap<String, PrintFormat>,
        lines: &[S],
    ) -> Result<Self> {
        let mut records = Self::with_columns(parameter_codes, print_formats)?;

        let mut first_row = true;
        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let tokens = tokenize(line);
            let is_header_row = first_row && tokens == records.parameter_list;
            first_row = false;
            if is_header_row {
                debug!("Skipping column header row in data block");
                continue;
            }

            if tokens.len() != records.parameter_list.len() {
                return Err(OdfError::structure(format!(
                    "data row {} has {} values but {} parameters are declared",
                    index + 1,
                    tokens.len(),
                    records.parameter_list.len()
                )));
            }

            for ((code, column), token) in records
                .parameter_list
                .iter()
                .zip(records.columns.iter_mut())
                .zip(&tokens)
            {
                let value = if token.is_empty() {
                    DataValue::null_for(code)
                } else {
                    DataValue::from_token(token)
                };
                column.push(value);
            }
            records.row_count += 1;
        }

        debug!(
            "Populated data block: {} rows x {} columns",
            records.row_count,
            records.parameter_list.len()
        );
        Ok(records)
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn parameter_list(&self) -> &[String] {
        &self.parameter_list
    }

    pub fn print_formats(&self) -> &HashMap<String, PrintFormat> {
        &self.print_formats
    }

    pub fn print_format(&self, code: &str) -> Option<PrintFormat> {
        self.print_formats.get(code).copied()
    }

    pub fn set_print_format(&mut self, code: &str, format: PrintFormat) -> Result<()> {
        match self.print_formats.get_mut(code) {
            Some(existing) => {
                *existing = format;
                Ok(())
            }
            None => Err(unknown_column(code)),
        }
    }

    fn column_index(&self, code: &str) -> Option<usize> {
        self.parameter_list.iter().position(|c| c == code)
    }

    pub fn column(&self, code: &str) -> Option<&[DataValue]> {
        self.column_index(code).map(|index| self.columns[index].as_slice())
    }

    /// Cells can be edited in place; the column length is fixed
    pub fn column_mut(&mut self, code: &str) -> Option<&mut [DataValue]> {
        self.column_index(code)
            .map(|index| self.columns[index].as_mut_slice())
    }

    pub fn value(&self, row: usize, code: &str) -> Option<&DataValue> {
        self.column(code).and_then(|column| column.get(row))
    }

    pub fn set_value(&mut self, row: usize, code: &str, value: DataValue) -> Result<()> {
        let rows = self.row_count;
        let column = self.column_mut(code).ok_or_else(|| unknown_column(code))?;
        let cell = column.get_mut(row).ok_or_else(|| {
            OdfError::structure(format!("row {row} out of range for {rows} data rows"))
        })?;
        *cell = value;
        Ok(())
    }

    pub fn push_row(&mut self, row: Vec<DataValue>) -> Result<()> {
        if row.len() != self.parameter_list.len() {
            return Err(OdfError::consistency(format!(
                "row has {} values but the data block has {} columns",
                row.len(),
                self.parameter_list.len()
            )));
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.push(value);
        }
        self.row_count += 1;
        Ok(())
    }

    /// Iterate rows as vectors of cell references, in column order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&DataValue>> + '_ {
        (0..self.row_count).map(move |row| self.columns.iter().map(|column| &column[row]).collect())
    }

    /// Insert a column at `index`; `values` must cover every row
    pub fn insert_column(
        &mut self,
        index: usize,
        code: &str,
        format: PrintFormat,
        values: Vec<DataValue>,
    ) -> Result<()> {
        if self.column_index(code).is_some() {
            return Err(OdfError::consistency(format!(
                "data block already has a column {code}"
            )));
        }
        if self.parameter_list.is_empty() {
            self.row_count = values.len();
        } else if values.len() != self.row_count {
            return Err(OdfError::consistency(format!(
                "column {code} has {} values but the data block has {} rows",
                values.len(),
                self.row_count
            )));
        }

        let index = index.min(self.parameter_list.len());
        self.parameter_list.insert(index, code.to_string());
        self.print_formats.insert(code.to_string(), format);
        self.columns.insert(index, values);
        Ok(())
    }

    /// Remove a column, its code and its print format; returns the cells
    pub fn remove_column(&mut self, code: &str) -> Result<Vec<DataValue>> {
        let index = self.column_index(code).ok_or_else(|| unknown_column(code))?;
        self.parameter_list.remove(index);
        self.print_formats.remove(code);
        let values = self.columns.remove(index);
        if self.parameter_list.is_empty() {
            self.row_count = 0;
        }
        Ok(values)
    }

    /// Reorder columns to `order`, which must be a permutation of the
    /// current code list
    pub fn reorder(&mut self, order: &[String]) -> Result<()> {
        let mut sorted_current = self.parameter_list.clone();
        let mut sorted_new = order.to_vec();
        sorted_current.sort();
        sorted_new.sort();
        if sorted_current != sorted_new {
            return Err(OdfError::consistency(
                "column reorder must be a permutation of the existing columns",
            ));
        }

        let mut columns = std::mem::take(&mut self.columns);
        let mut reordered = Vec::with_capacity(order.len());
        for code in order {
            if let Some(index) = self.column_index(code) {
                reordered.push(std::mem::take(&mut columns[index]));
            }
        }
        self.columns = reordered;
        self.parameter_list = order.to_vec();
        Ok(())
    }

    /// Fixed-width legacy rows: cells right-justified to the column width
    pub fn render_legacy(&self) -> String {
        self.render_with(" ", |format, _code, value| {
            let text = match (value, format.decimals) {
                (DataValue::Number(number), Some(decimals)) => format!("{number:.decimals$}"),
                (DataValue::Number(number), None) => format_repr(*number),
                (DataValue::Text(text), _) => format!("'{text}'"),
            };
            format!("{text:>width$}", width = format.width)
        })
    }

    /// Header-less CSV rows; quality flag (`Q...`) columns as integers
    pub fn render_csv(&self) -> String {
        self.render_with(",", |format, code, value| match (value, format.decimals) {
            (DataValue::Number(number), _) if code.starts_with('Q') && number.is_finite() => {
                format!("{}", number.trunc() as i64)
            }
            (DataValue::Number(number), Some(decimals)) => format!("{number:.decimals$}"),
            (DataValue::Number(number), None) => format_repr(*number),
            (DataValue::Text(text), _) => format!("'{text}'"),
        })
    }

    fn render_with<F>(&self, separator: &str, render_cell: F) -> String
    where
        F: Fn(PrintFormat, &str, &DataValue) -> String,
    {
        let formats: Vec<PrintFormat> = self
            .parameter_list
            .iter()
            .map(|code| self.print_formats.get(code).copied().unwrap_or(PrintFormat::text(0)))
            .collect();

        let mut output = String::new();
        for row in 0..self.row_count {
            let cells: Vec<String> = self
                .parameter_list
                .iter()
                .zip(&self.columns)
                .zip(&formats)
                .map(|((code, column), format)| render_cell(*format, code, &column[row]))
                .collect();
            output.push_str(&cells.join(separator));
            output.push('\n');
        }
        output
    }
}

fn unknown_column(code: &str) -> OdfError {
    OdfError::structure(format!("no data column for parameter {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataRecords {
        let codes = vec!["SYTM_01".to_string(), "TEMP_01".to_string()];
        let formats = HashMap::from([
            ("SYTM_01".to_string(), PrintFormat::text(23)),
            ("TEMP_01".to_string(), PrintFormat::numeric(10, 4)),
        ]);
        let lines = [
            "'10-SEP-2023 10:45:43.00'    12.3450",
            "'10-SEP-2023 10:45:44.00'    12.4000",
            "'10-SEP-2023 10:45:45.00'  -999.0000",
        ];
        DataRecords::populate(&codes, formats, &lines).unwrap()
    }

    #[test]
    fn test_populate_keeps_quoted_timestamp_as_text() {
        let records = sample();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.value(0, "SYTM_01"),
            Some(&DataValue::Text("10-SEP-2023 10:45:43.00".to_string()))
        );
        assert_eq!(records.value(1, "TEMP_01"), Some(&DataValue::Number(12.4)));
    }

    #[test]
    fn test_populate_rejects_ragged_rows() {
        let codes = vec!["PRES_01".to_string(), "TEMP_01".to_string()];
        let formats = HashMap::from([
            ("PRES_01".to_string(), PrintFormat::numeric(10, 1)),
            ("TEMP_01".to_string(), PrintFormat::numeric(10, 4)),
        ]);
        let err = DataRecords::populate(&codes, formats, &["1.0 2.0", "3.0"]).unwrap_err();
        assert!(matches!(err, OdfError::Structure { .. }));
    }

    #[test]
    fn test_populate_csv_empty_cells_become_nulls() {
        let codes = vec!["SYTM_01".to_string(), "HCDT_01".to_string()];
        let formats = HashMap::from([
            ("SYTM_01".to_string(), PrintFormat::text(23)),
            ("HCDT_01".to_string(), PrintFormat::numeric(10, 3)),
        ]);
        let lines = ["'03-APR-2022 02:00:00.00',", ",200.000"];
        let records = DataRecords::populate(&codes, formats, &lines).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records.value(0, "HCDT_01"), Some(&DataValue::Number(NULL_VALUE)));
        assert_eq!(
            records.value(1, "SYTM_01"),
            Some(&DataValue::Text(SYTM_NULL_VALUE.to_string()))
        );
    }

    #[test]
    fn test_populate_requires_print_formats() {
        let codes = vec!["PRES_01".to_string()];
        let err = DataRecords::populate(&codes, HashMap::new(), &["1.0"]).unwrap_err();
        assert!(matches!(err, OdfError::Consistency { .. }));
    }

    #[test]
    fn test_render_legacy_right_justifies() {
        let records = sample();
        let rendered = records.render_legacy();
        let first = rendered.lines().next().unwrap();
        assert_eq!(first, "'10-SEP-2023 10:45:43.00'    12.3450");
        assert!(rendered.contains("'  -999.0000"));
    }

    #[test]
    fn test_render_csv_casts_quality_flags() {
        let mut records = sample();
        records
            .insert_column(
                2,
                "QTEMP_01",
                PrintFormat::numeric(1, 0),
                vec![DataValue::Number(0.0); 3],
            )
            .unwrap();
        let rendered = records.render_csv();
        assert_eq!(
            rendered.lines().next().unwrap(),
            "'10-SEP-2023 10:45:43.00',12.3450,0"
        );
    }

    #[test]
    fn test_csv_input_with_header_row() {
        let codes = vec!["PRES_01".to_string(), "TEMP_01".to_string()];
        let formats = HashMap::from([
            ("PRES_01".to_string(), PrintFormat::numeric(8, 1)),
            ("TEMP_01".to_string(), PrintFormat::numeric(8, 3)),
        ]);
        let records =
            DataRecords::populate(&codes, formats, &["PRES_01,TEMP_01", "1.0,2.5", "2.0,2.25"])
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.render_csv(), "1.0,2.500\n2.0,2.250\n");
    }

    #[test]
    fn test_insert_and_remove_keep_lock_step() {
        let mut records = sample();
        records
            .insert_column(2, "QTEMP_01", PrintFormat::numeric(1, 0), vec![0.0.into(); 3])
            .unwrap();
        assert_eq!(records.parameter_list(), ["SYTM_01", "TEMP_01", "QTEMP_01"]);
        assert!(records.print_format("QTEMP_01").is_some());

        let err = records
            .insert_column(0, "PSAL_01", PrintFormat::numeric(10, 4), vec![0.0.into(); 2])
            .unwrap_err();
        assert!(matches!(err, OdfError::Consistency { .. }));

        let removed = records.remove_column("TEMP_01").unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(records.parameter_list(), ["SYTM_01", "QTEMP_01"]);
        assert!(records.print_format("TEMP_01").is_none());
        assert!(records.remove_column("TEMP_01").is_err());
    }

    #[test]
    fn test_reorder_moves_columns_with_codes() {
        let mut records = sample();
        records
            .reorder(&["TEMP_01".to_string(), "SYTM_01".to_string()])
            .unwrap();
        assert_eq!(records.value(0, "TEMP_01"), Some(&DataValue::Number(12.345)));
        assert!(records.reorder(&["TEMP_01".to_string()]).is_err());
    }

    #[test]
    fn test_print_format_text_form() {
        assert_eq!("10.4".parse::<PrintFormat>().unwrap(), PrintFormat::numeric(10, 4));
        assert_eq!("23".parse::<PrintFormat>().unwrap(), PrintFormat::text(23));
        assert_eq!(PrintFormat::numeric(10, 4).to_string(), "10.4");
        assert!("x.y".parse::<PrintFormat>().is_err());
    }
}
