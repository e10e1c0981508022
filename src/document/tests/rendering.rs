//! Whole-document rendering

use super::{MADCP_V3, ctd};
use crate::document::OdfDocument;
use crate::models::FileVersion;

fn reparse(text: &str) -> OdfDocument {
    text.parse().unwrap()
}

#[test]
fn test_render_is_idempotent_after_one_parse() {
    for fixture in [ctd(), reparse(MADCP_V3)] {
        for version in [FileVersion::V2, FileVersion::V3] {
            let first = fixture.render(version);
            let second = reparse(&first).render(version);
            assert_eq!(first, second, "render {version} changed after a re-read");
        }
    }
}

#[test]
fn test_render_v2_layout() {
    let rendered = ctd().render(FileVersion::V2);

    assert!(rendered.starts_with(
        "ODF_HEADER,\n  FILE_SPECIFICATION = CTD_BCD2023666_001_1_DN\nCRUISE_HEADER,\n"
    ));
    assert!(rendered.contains("  INITIAL_LATITUDE = 44.693500,\n"));
    assert!(rendered.contains("  COEFFICIENTS = 0.00000000e+00 1.00000000e+00\n"));
    assert!(!rendered.contains("ODF_SPECIFICATION_VERSION"));
    assert!(!rendered.contains("PRINT_FIELD_ORDER"));
    assert!(rendered.contains(
        "-- DATA --\n'10-SEP-2023 10:45:43.00'        1.0    12.4500    30.1234\n"
    ));
    assert!(rendered.contains("'10-SEP-2023 10:45:45.00'        3.0  -999.0000    30.1400\n"));
}

#[test]
fn test_render_v3_layout() {
    let rendered = ctd().render(FileVersion::V3);

    assert!(rendered.starts_with(
        "ODF_HEADER\n  FILE_SPECIFICATION = CTD_BCD2023666_001_1_DN\n  ODF_SPECIFICATION_VERSION = 3.0\n"
    ));
    assert!(rendered.contains("  AREA_OF_OPERATION = ''\n"));
    assert!(rendered.contains("  PRINT_FIELD_ORDER = "));
    assert!(rendered.contains("-- DATA --\n'10-SEP-2023 10:45:43.00',1.0,12.4500,30.1234\n"));
    assert!(rendered.contains("'10-SEP-2023 10:45:45.00',3.0,-999.0000,30.1400\n"));
    assert!(!rendered.lines().any(|line| line.ends_with(',')));
}

#[test]
fn test_section_order() {
    let rendered = reparse(MADCP_V3).render(FileVersion::V3);
    let position = |heading: &str| {
        rendered
            .lines()
            .position(|line| line == heading)
            .unwrap_or_else(|| panic!("{heading} missing"))
    };

    let order = [
        "ODF_HEADER",
        "CRUISE_HEADER",
        "EVENT_HEADER",
        "METEO_HEADER",
        "QUALITY_HEADER",
        "INSTRUMENT_HEADER",
        "GENERAL_CAL_HEADER",
        "COMPASS_CAL_HEADER",
        "HISTORY_HEADER",
        "PARAMETER_HEADER",
        "RECORD_HEADER",
        "-- DATA --",
    ];
    let positions: Vec<usize> = order.iter().map(|heading| position(heading)).collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_cross_version_conversion_preserves_content() {
    let original = ctd();
    let converted = reparse(&original.render(FileVersion::V3));

    assert_eq!(converted.source_version, FileVersion::V3);
    assert_eq!(converted.cruise, original.cruise);
    assert_eq!(converted.event, original.event);
    assert_eq!(converted.data().len(), original.data().len());
    assert_eq!(
        converted.data().column("TEMP_01"),
        original.data().column("TEMP_01")
    );
}

#[test]
fn test_render_does_not_touch_history() {
    let doc = ctd();
    let before = doc.histories.clone();
    let _ = doc.render(FileVersion::V2);
    assert_eq!(doc.histories, before);
}
