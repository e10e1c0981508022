//! GF3 parameter code reference table.
//!
//! Maps the four-letter stem of a parameter code (`TEMP` in `TEMP_01`) to
//! its description, units and print format. The default table is compiled
//! in from `data/parameter_codes.csv`; a replacement table can be loaded
//! from disk.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

const EMBEDDED_TABLE: &str = include_str!("../data/parameter_codes.csv");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub code: String,
    pub description: String,
    pub units: String,
    pub print_field_width: u32,
    pub print_decimal_places: u32,
}

impl ParameterInfo {
    /// Placeholder returned for codes missing from the table
    pub fn unknown(code: &str) -> Self {
        Self {
            code: code.to_string(),
            description: "Unknown".to_string(),
            units: "Unknown".to_string(),
            print_field_width: 0,
            print_decimal_places: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.description == "Unknown" && self.units == "Unknown"
    }
}

/// Source of parameter reference data
pub trait ParameterLookup {
    fn lookup(&self, code: &str) -> Option<&ParameterInfo>;

    fn lookup_or_unknown(&self, code: &str) -> ParameterInfo {
        self.lookup(code).cloned().unwrap_or_else(|| {
            debug!("Parameter code {} not found in reference table", code);
            ParameterInfo::unknown(code)
        })
    }
}

/// `TEMP_01` -> `TEMP`; codes without a sensor suffix are returned as-is
pub fn code_stem(code: &str) -> &str {
    let code = code.trim();
    code.split_once('_').map_or(code, |(stem, _)| stem)
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: BTreeMap<String, ParameterInfo>,
}

impl ReferenceTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = BTreeMap::new();
        for record in csv_reader.deserialize() {
            let info: ParameterInfo = record?;
            entries.insert(info.code.to_ascii_uppercase(), info);
        }

        debug!("Loaded {} parameter reference entries", entries.len());
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// The compiled-in table
    pub fn embedded() -> &'static ReferenceTable {
        static TABLE: OnceLock<ReferenceTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            ReferenceTable::from_reader(EMBEDDED_TABLE.as_bytes()).unwrap_or_else(|err| {
                warn!("Embedded parameter table could not be read: {}", err);
                ReferenceTable::default()
            })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ParameterInfo> {
        self.entries.values()
    }
}

impl ParameterLookup for ReferenceTable {
    fn lookup(&self, code: &str) -> Option<&ParameterInfo> {
        self.entries.get(&code_stem(code).to_ascii_uppercase())
    }
}

/// Look a code up in the compiled-in table
pub fn lookup_parameter(code: &str) -> ParameterInfo {
    ReferenceTable::embedded().lookup_or_unknown(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_loads() {
        let table = ReferenceTable::embedded();
        assert!(table.len() > 20);
        assert!(table.lookup("SYTM").is_some());
    }

    #[test]
    fn test_lookup_uses_code_stem() {
        let info = lookup_parameter("TEMP_01");
        assert_eq!(info.code, "TEMP");
        assert_eq!(info.units, "degrees C");
        assert_eq!(info.print_field_width, 10);
        assert_eq!(info.print_decimal_places, 4);

        assert_eq!(lookup_parameter("sncntr_01").code, "SNCNTR");
    }

    #[test]
    fn test_unknown_code() {
        let info = lookup_parameter("ZZZZ_01");
        assert!(info.is_unknown());
        assert_eq!(info.code, "ZZZZ_01");
        assert_eq!(info.print_field_width, 0);
        assert_eq!(info.print_decimal_places, 0);
    }

    #[test]
    fn test_custom_table() {
        let csv = "code,description,units,print_field_width,print_decimal_places\n\
                   BEAM, Beam Attenuation ,1/m,10,3\n";
        let table = ReferenceTable::from_reader(csv.as_bytes()).unwrap();
        let info = table.lookup("BEAM_02").unwrap();
        assert_eq!(info.description, "Beam Attenuation");
        assert!(table.lookup("TEMP_01").is_none());
    }

    #[test]
    fn test_malformed_table_is_an_error() {
        let csv = "code,description,units,print_field_width,print_decimal_places\n\
                   TEMP,Temperature,degrees C,wide,4\n";
        assert!(ReferenceTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_code_stem() {
        assert_eq!(code_stem("PSAL_01"), "PSAL");
        assert_eq!(code_stem("SYTM"), "SYTM");
    }
}
