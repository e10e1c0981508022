//! Type-dependent PARAMETER_HEADER fields

use crate::error::OdfError;
use crate::header::{Extremum, HeaderRecord, ParameterHeader};
use crate::lookup::lookup_parameter;
use crate::models::{FileVersion, ParameterType};
use crate::records::PrintFormat;

fn temperature_lines() -> Vec<&'static str> {
    vec![
        "  TYPE = 'DOUB',",
        "  NAME = 'Sea Temperature',",
        "  UNITS = 'degrees C',",
        "  CODE = 'TEMP_01',",
        "  NULL_VALUE = '-99.0000000D+02',",
        "  PRINT_FIELD_WIDTH = 10,",
        "  PRINT_DECIMAL_PLACES = 4,",
        "  ANGLE_OF_SECTION = -999.0,",
        "  MAGNETIC_VARIATION = -999.0,",
        "  DEPTH = 0.0,",
        "  MINIMUM_VALUE = 3.1D+00,",
        "  MAXIMUM_VALUE = 12.44567,",
        "  NUMBER_VALID = 301,",
        "  NUMBER_NULL = 0",
    ]
}

#[test]
fn test_numeric_parameter_resolution() {
    let param = ParameterHeader::populate(&temperature_lines()).unwrap();

    assert_eq!(param.param_type, ParameterType::Doub);
    assert_eq!(param.null_value, "-9900.0");
    assert_eq!(param.null_number(), Some(-9900.0));
    assert_eq!(param.minimum_value, Extremum::Number(3.1));
    assert_eq!(param.maximum_value.as_number(), Some(12.44567));
    assert_eq!(param.number_valid, 301);
    assert_eq!(param.print_format(), PrintFormat::numeric(10, 4));
}

#[test]
fn test_numeric_extrema_render_with_column_decimals() {
    let param = ParameterHeader::populate(&temperature_lines()).unwrap();
    let rendered = param.render(FileVersion::V2);

    assert!(rendered.contains("  MINIMUM_VALUE = 3.1000,\n"));
    assert!(rendered.contains("  MAXIMUM_VALUE = 12.4457,\n"));
    assert!(rendered.contains("  NULL_VALUE = -9900.0,\n"));
    assert!(rendered.contains("  DEPTH = 0.0,\n"));
    assert!(!rendered.contains("PRINT_FIELD_ORDER"));
    assert!(param.render(FileVersion::V3).contains("  PRINT_FIELD_ORDER = -999\n"));
}

#[test]
fn test_sytm_parameter_uses_dates() {
    let lines = [
        "  MINIMUM_VALUE = '10-sep-2023 10:45:43.00',",
        "  MAXIMUM_VALUE = '2023-09-10 11:00:00',",
        "  TYPE = 'SYTM',",
        "  NAME = 'System Time',",
        "  UNITS = 'GMT',",
        "  CODE = 'SYTM_01',",
        "  NULL_VALUE = '17-NOV-1858 00:00:00.00',",
        "  PRINT_FIELD_WIDTH = 23,",
        "  PRINT_DECIMAL_PLACES = 0",
    ];

    let param = ParameterHeader::populate(&lines).unwrap();

    assert_eq!(
        param.minimum_value,
        Extremum::Date("10-SEP-2023 10:45:43.00".to_string())
    );
    assert_eq!(
        param.maximum_value,
        Extremum::Date("10-SEP-2023 11:00:00.00".to_string())
    );
    assert_eq!(param.print_format(), PrintFormat::text(23));
    assert!(param.is_time());
    assert_eq!(param.null_number(), None);

    let rendered = param.render(FileVersion::V3);
    assert!(rendered.contains("  NULL_VALUE = '17-NOV-1858 00:00:00.00'\n"));
    assert!(rendered.contains("  MINIMUM_VALUE = '10-SEP-2023 10:45:43.00'\n"));
}

#[test]
fn test_time_units_on_float_parameter() {
    let param = ParameterHeader::populate(&[
        "  TYPE = 'SING',",
        "  UNITS = 'UTC',",
        "  CODE = 'TIME_01',",
        "  MINIMUM_VALUE = '2023-09-10 10:00:00',",
        "  MAXIMUM_VALUE = -999.0",
    ])
    .unwrap();

    assert!(matches!(param.minimum_value, Extremum::Date(_)));
    assert_eq!(param.maximum_value, Extremum::Number(-999.0));
    assert!(
        param
            .render(FileVersion::V3)
            .contains("  MAXIMUM_VALUE = '17-NOV-1858 00:00:00.00'\n")
    );
}

#[test]
fn test_integer_extrema_must_be_integral() {
    let err = ParameterHeader::populate(&[
        "  TYPE = 'INTE',",
        "  CODE = 'CNTR_01',",
        "  MINIMUM_VALUE = 2.5",
    ])
    .unwrap_err();
    assert!(matches!(err, OdfError::Format { ref field, .. } if field == "MINIMUM_VALUE"));

    let param = ParameterHeader::populate(&[
        "  TYPE = 'INTE',",
        "  CODE = 'CNTR_01',",
        "  MINIMUM_VALUE = 1.0",
    ])
    .unwrap();
    assert_eq!(param.minimum_value, Extremum::Number(1.0));
}

#[test]
fn test_bad_null_value_is_rejected() {
    let err = ParameterHeader::populate(&["  TYPE = 'SING',", "  NULL_VALUE = 'none'"])
        .unwrap_err();
    assert!(matches!(err, OdfError::Format { ref field, .. } if field == "NULL_VALUE"));
}

#[test]
fn test_code_falls_back_to_wmo_code() {
    let param = ParameterHeader::populate(&["  WMO_CODE = 'PRES',", "  TYPE = 'SING'"]).unwrap();
    assert_eq!(param.code, "PRES");
    assert!(param.render(FileVersion::V3).contains("  WMO_CODE = 'PRES'\n"));
}

#[test]
fn test_quality_flag_header() {
    let flag = ParameterHeader::quality_flag_for("TEMP_01", 301);

    assert_eq!(flag.code, "QTEMP_01");
    assert_eq!(flag.name, "Quality Flag for Parameter: TEMP_01");
    assert!(flag.is_quality_flag());
    assert_eq!(flag.number_valid, 301);
    assert_eq!(flag.print_format(), PrintFormat::numeric(1, 0));
    assert!(flag.render(FileVersion::V3).contains("  MINIMUM_VALUE = 0\n"));
}

#[test]
fn test_header_from_reference_table() {
    let info = lookup_parameter("PSAL_01");
    let param = ParameterHeader::from_reference("PSAL_01", ParameterType::Doub, &info);

    assert_eq!(param.name, "Practical Salinity");
    assert_eq!(param.units, "psu");
    assert_eq!(param.print_format(), PrintFormat::numeric(10, 4));
    assert_eq!(param.null_value, "-999.0");
}
