//! Header edits, history and column changes

use super::{ctd, minimal};
use crate::change_log::ChangeLog;
use crate::document::OdfDocument;
use crate::error::OdfError;
use crate::header::{HeaderRecord, ParameterHeader};
use crate::lookup::lookup_parameter;
use crate::models::{FileVersion, ParameterType};
use crate::records::{DataValue, PrintFormat};

#[test]
fn test_cruise_edit_lands_in_history() {
    let mut doc = ctd();
    doc.cruise.set_organization("OLD ORG");
    let mut log = ChangeLog::new();

    doc.cruise.change_field("ORGANIZATION", "DFO BIO", &mut log).unwrap();
    doc.flush_change_log(&mut log);

    assert!(log.is_empty());
    assert_eq!(doc.histories.len(), 1);
    assert_eq!(
        doc.histories[0].processes().last().unwrap(),
        r#"In Cruise Header field ORGANIZATION was changed from "OLD ORG" to "DFO BIO""#
    );
    assert!(doc.render(FileVersion::V3).contains(
        r#"  PROCESS = 'In Cruise Header field ORGANIZATION was changed from "OLD ORG" to "DFO BIO"'"#
    ));
}

#[test]
fn test_flush_creates_history_when_missing() {
    let mut doc = OdfDocument::new();
    let mut log = ChangeLog::new();

    doc.flush_change_log(&mut log);
    assert!(doc.histories.is_empty());

    log.append("Converted to ODF v3");
    doc.flush_change_log(&mut log);
    assert_eq!(doc.histories.len(), 1);
    assert_eq!(doc.histories[0].processes(), ["Converted to ODF v3"]);
}

#[test]
fn test_add_history_and_add_to_history() {
    let mut doc = ctd();
    doc.add_history().add_process("Despiked");
    doc.add_to_history("Bin averaged to 1 dbar");

    assert_eq!(doc.histories.len(), 2);
    assert_eq!(
        doc.histories[1].processes(),
        ["Despiked", "Bin averaged to 1 dbar"]
    );

    let mut empty = OdfDocument::new();
    empty.add_to_history("first step");
    assert_eq!(empty.histories.len(), 1);
}

#[test]
fn test_quality_flag_insertion() {
    let mut doc = minimal(true);
    let mut log = ChangeLog::new();

    doc.add_quality_flag("TEMP_01", &mut log).unwrap();

    assert_eq!(doc.parameter_codes(), ["SYTM_01", "TEMP_01", "QTEMP_01"]);
    assert_eq!(doc.data().parameter_list(), ["SYTM_01", "TEMP_01", "QTEMP_01"]);
    assert_eq!(
        doc.data().column("QTEMP_01").unwrap(),
        [DataValue::Number(0.0), DataValue::Number(0.0), DataValue::Number(0.0)]
    );
    assert_eq!(
        doc.data().print_format("QTEMP_01"),
        Some(PrintFormat::numeric(1, 0))
    );
    assert_eq!(log.entries(), [r#"Quality flag column "QTEMP_01" was added."#]);

    let err = doc.add_quality_flag("TEMP_01", &mut log).unwrap_err();
    assert!(matches!(err, OdfError::Consistency { .. }));
    assert!(doc.add_quality_flag("PSAL_01", &mut log).is_err());
}

#[test]
fn test_add_quality_flags_to_every_eligible_parameter() {
    let mut doc = ctd();
    let mut log = ChangeLog::new();

    let added = doc.add_quality_flags(&mut log).unwrap();

    assert_eq!(added, 3);
    assert_eq!(
        doc.parameter_codes(),
        ["SYTM_01", "PRES_01", "QPRES_01", "TEMP_01", "QTEMP_01", "PSAL_01", "QPSAL_01"]
    );
    assert_eq!(log.len(), 3);
    assert_eq!(doc.add_quality_flags(&mut log).unwrap(), 0);

    doc.update().unwrap();
    let rendered = doc.render(FileVersion::V3);
    assert!(rendered.contains("-- DATA --\n'10-SEP-2023 10:45:43.00',1.0,0,12.4500,0,30.1234,0\n"));
}

#[test]
fn test_add_quality_flags_moves_system_time_first() {
    let mut doc = minimal(false);
    let mut log = ChangeLog::new();

    doc.add_quality_flags(&mut log).unwrap();

    assert_eq!(doc.parameter_codes(), ["SYTM_01", "TEMP_01", "QTEMP_01"]);
    assert_eq!(
        doc.data().value(0, "SYTM_01"),
        Some(&DataValue::Text("10-SEP-2023 10:45:43.00".to_string()))
    );
    assert!(doc.update().is_ok());
}

#[test]
fn test_add_quality_flags_needs_data() {
    let mut doc = OdfDocument::new();
    let mut log = ChangeLog::new();
    assert!(matches!(
        doc.add_quality_flags(&mut log),
        Err(OdfError::Structure { .. })
    ));
}

#[test]
fn test_remove_parameter() {
    let mut doc = ctd();
    let mut log = ChangeLog::new();

    let removed = doc.remove_parameter("PSAL_01", &mut log).unwrap();

    assert_eq!(removed.name, "Practical Salinity");
    assert_eq!(doc.parameter_codes(), ["SYTM_01", "PRES_01", "TEMP_01"]);
    assert!(doc.data().column("PSAL_01").is_none());
    assert!(doc.data().print_format("PSAL_01").is_none());
    assert_eq!(log.entries(), [r#"Parameter "PSAL_01" was removed."#]);

    assert!(matches!(
        doc.remove_parameter("PSAL_01", &mut log),
        Err(OdfError::Structure { .. })
    ));
    doc.update().unwrap();
    assert_eq!(doc.record.num_param, 3);
}

#[test]
fn test_add_parameter_from_reference() {
    let mut doc = ctd();
    let header =
        ParameterHeader::from_reference("DOXY_01", ParameterType::Sing, &lookup_parameter("DOXY_01"));

    let short = vec![DataValue::Number(6.1); 2];
    assert!(matches!(
        doc.add_parameter(header.clone(), short),
        Err(OdfError::Consistency { .. })
    ));
    assert_eq!(doc.parameters().len(), 4);

    doc.add_parameter(header, vec![DataValue::Number(6.1); 5]).unwrap();
    doc.update().unwrap();

    let doxy = doc.parameter("DOXY_01").unwrap();
    assert_eq!(doxy.units, "ml/l");
    assert_eq!(doxy.print_field_order, 5);
    assert_eq!(doxy.number_valid, 5);
    assert!(doc.is_parameter_code("DOXY_01"));
    assert_eq!(doc.parameter_names().last(), Some(&"Dissolved Oxygen Concentration"));
}

#[test]
fn test_file_spec_and_name() {
    let mut doc = ctd();
    assert_eq!(doc.generate_file_spec(), "CTD_BCD2023666_001_1_DN");

    doc.event.event_number = "002".to_string();
    assert_eq!(doc.to_file_name(), "CTD_BCD2023666_001_1_DN.ODF");
    doc.refresh_file_specification();
    assert_eq!(doc.to_file_name(), "CTD_BCD2023666_002_1_DN.ODF");
}

#[test]
fn test_generate_creation_date_is_canonical() {
    let date = OdfDocument::generate_creation_date();
    assert_eq!(crate::format::coerce_datetime(&date), date);
}
