//! Document aggregate tests
//!
//! Fixtures are the sample files used by the integration tests.

pub mod editing;
pub mod reading;
pub mod rendering;

use crate::document::OdfDocument;

pub(super) const CTD_V2: &str = include_str!("../../../tests/data/CTD_BCD2023666_001_1_DN.ODF");
pub(super) const MADCP_V3: &str =
    include_str!("../../../tests/data/MADCP_HUD2022001_1844_3072_3600.ODF");

pub(super) fn ctd() -> OdfDocument {
    CTD_V2.parse().unwrap()
}

fn sytm_block() -> &'static str {
    "PARAMETER_HEADER
  TYPE = 'SYTM'
  NAME = 'System Time'
  UNITS = 'GMT'
  CODE = 'SYTM_01'
  NULL_VALUE = '17-NOV-1858 00:00:00.00'
  PRINT_FIELD_WIDTH = 23
  PRINT_DECIMAL_PLACES = 0
"
}

fn temp_block() -> &'static str {
    "PARAMETER_HEADER
  TYPE = 'SING'
  NAME = 'Sea Temperature'
  UNITS = 'degrees C'
  CODE = 'TEMP_01'
  NULL_VALUE = -999.0
  PRINT_FIELD_WIDTH = 10
  PRINT_DECIMAL_PLACES = 4
"
}

/// Smallest readable document: two parameters, three rows, blocks in
/// non-canonical order
pub(super) fn minimal_text(sytm_first: bool) -> String {
    let (params, rows) = if sytm_first {
        (
            format!("{}{}", sytm_block(), temp_block()),
            [
                "'10-SEP-2023 10:45:43.00',12.3450",
                "'10-SEP-2023 10:45:44.00',12.4000",
                "'10-SEP-2023 10:45:45.00',12.5000",
            ],
        )
    } else {
        (
            format!("{}{}", temp_block(), sytm_block()),
            [
                "12.3450,'10-SEP-2023 10:45:43.00'",
                "12.4000,'10-SEP-2023 10:45:44.00'",
                "12.5000,'10-SEP-2023 10:45:45.00'",
            ],
        )
    };

    format!(
        "RECORD_HEADER
  NUM_PARAM = 2
INSTRUMENT_HEADER
  INST_TYPE = 'Sea-Bird'
EVENT_HEADER
  DATA_TYPE = 'CTD'
  EVENT_NUMBER = '002'
CRUISE_HEADER
  CRUISE_NUMBER = 'BCD2023666'
{params}-- DATA --
{}
",
        rows.join("\n")
    )
}

pub(super) fn minimal(sytm_first: bool) -> OdfDocument {
    minimal_text(sytm_first).parse().unwrap()
}
