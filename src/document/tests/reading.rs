//! Block discovery and dispatch

use super::{CTD_V2, MADCP_V3, ctd, minimal};
use crate::document::OdfDocument;
use crate::error::OdfError;
use crate::header::{Extremum, HeaderKind};
use crate::models::FileVersion;
use crate::records::DataValue;

#[test]
fn test_read_v2_ctd() {
    let doc = ctd();

    assert_eq!(doc.file_specification, "CTD_BCD2023666_001_1_DN");
    assert_eq!(doc.source_version, FileVersion::V2);
    assert_eq!(doc.cruise.organization, "DFO BIO");
    assert_eq!(doc.event.initial_latitude, 44.6935);
    assert_eq!(doc.instrument.model, "SBE 25plus");
    assert!(doc.meteo.is_none());
    assert!(doc.quality.is_none());
    assert_eq!(doc.polynomial_cals[0].coefficients(), [0.0, 1.0]);
    assert_eq!(doc.histories.len(), 1);
    assert_eq!(
        doc.parameter_codes(),
        ["SYTM_01", "PRES_01", "TEMP_01", "PSAL_01"]
    );
    assert_eq!(doc.record.num_cycle, 5);
    assert_eq!(doc.data().len(), 5);
    assert_eq!(
        doc.data().value(2, "TEMP_01"),
        Some(&DataValue::Number(-999.0))
    );
    assert_eq!(
        doc.parameter("TEMP_01").unwrap().maximum_value,
        Extremum::Number(12.45)
    );
}

#[test]
fn test_read_v3_normalizes_dates_and_skips_csv_header() {
    let doc: OdfDocument = MADCP_V3.parse().unwrap();

    assert_eq!(doc.source_version, FileVersion::V3);
    assert_eq!(doc.cruise.start_date, "01-APR-2022 00:00:00.00");
    assert_eq!(doc.cruise.end_date, "30-APR-2022 00:00:00.00");
    assert_eq!(doc.cruise.area_of_operation, "Scotian Shelf");
    assert_eq!(doc.event.creation_date, "02-MAY-2022 14:00:00.00");

    let meteo = doc.meteo.as_ref().unwrap();
    assert_eq!(meteo.cloud_cover, 6);
    assert_eq!(doc.quality.as_ref().unwrap().quality_tests(), ["Range check"]);
    assert_eq!(doc.general_cals[0].parameter_code, "HCSP_01");
    assert_eq!(doc.compass_cals[0].parameter_code, "HCDT_01");
    assert_eq!(doc.compass_cals[0].corrections, vec![1.5, -0.5, 0.0, 2.0]);

    assert_eq!(doc.data().len(), 4);
    assert_eq!(
        doc.data().value(0, "SYTM_01"),
        Some(&DataValue::Text("03-APR-2022 00:00:00.00".to_string()))
    );
}

#[test]
fn test_blocks_out_of_canonical_order() {
    let doc = minimal(true);
    assert_eq!(doc.cruise.cruise_number, "BCD2023666");
    assert_eq!(doc.event.event_number, "002");
    assert_eq!(doc.parameter_codes(), ["SYTM_01", "TEMP_01"]);
    assert_eq!(doc.data().len(), 3);
}

#[test]
fn test_missing_data_marker() {
    let text = CTD_V2.replace("-- DATA --", "");
    let err = text.parse::<OdfDocument>().unwrap_err();
    assert!(matches!(err, OdfError::Structure { .. }));
}

#[test]
fn test_missing_required_block() {
    let text = CTD_V2.replace("INSTRUMENT_HEADER,\n", "");
    let err = text.parse::<OdfDocument>().unwrap_err();
    match err {
        OdfError::Structure { reason } => assert!(reason.contains("INSTRUMENT_HEADER")),
        other => panic!("expected a structure error, got {other:?}"),
    }
}

#[test]
fn test_unknown_block_is_skipped() {
    let text = CTD_V2.replace(
        "INSTRUMENT_HEADER,\n",
        "MYSTERY_HEADER,\n  FOO = 'bar',\nINSTRUMENT_HEADER,\n",
    );
    let doc: OdfDocument = text.parse().unwrap();
    assert_eq!(doc.instrument.model, "SBE 25plus");
}

#[test]
fn test_format_error_carries_file_line() {
    let text = CTD_V2.replace(
        "INITIAL_LATITUDE = 44.693500",
        "INITIAL_LATITUDE = 'forty four'",
    );
    let expected_line = text
        .lines()
        .position(|line| line.contains("INITIAL_LATITUDE"))
        .unwrap()
        + 1;

    let err = text.parse::<OdfDocument>().unwrap_err();

    match err {
        OdfError::Format {
            header, field, line, ..
        } => {
            assert_eq!(header, HeaderKind::Event);
            assert_eq!(field, "INITIAL_LATITUDE");
            assert_eq!(line, Some(expected_line));
        }
        other => panic!("expected a format error, got {other:?}"),
    }
}

#[test]
fn test_ragged_data_row() {
    let text = format!("{CTD_V2}'10-SEP-2023 10:45:48.00'        6.0\n");
    let err = text.parse::<OdfDocument>().unwrap_err();
    assert!(matches!(err, OdfError::Structure { .. }));
}

#[test]
fn test_duplicate_parameter_code() {
    let text = CTD_V2.replace("CODE = 'PSAL_01'", "CODE = 'TEMP_01'");
    let err = text.parse::<OdfDocument>().unwrap_err();
    assert!(matches!(err, OdfError::Structure { .. }));
}

#[test]
fn test_read_accepts_line_slices() {
    let lines: Vec<String> = CTD_V2.lines().map(str::to_string).collect();
    let doc = OdfDocument::read(&lines).unwrap();
    assert_eq!(doc.parameters().len(), 4);
}
