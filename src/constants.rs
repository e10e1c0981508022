//! Application constants for the ODF toolbox
//!
//! Sentinel values, wire-format markers and the standard quality-control
//! legends written into Quality headers.

// =============================================================================
// Null Sentinels
// =============================================================================

/// Numeric null used by every floating point field and data cell
pub const NULL_VALUE: f64 = -999.0;

/// Integer null (truncation of the numeric null)
pub const INT_NULL_VALUE: i64 = -999;

/// Date/time null, the Smithsonian epoch in canonical SYTM form
pub const SYTM_NULL_VALUE: &str = "17-NOV-1858 00:00:00.00";

/// chrono format for the date part of a canonical SYTM string; two
/// fractional-second digits are appended separately
pub const SYTM_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

// =============================================================================
// Wire Format
// =============================================================================

/// Literal line separating header blocks from the data rows
pub const DATA_MARKER: &str = "-- DATA --";

/// Value written for ODF_SPECIFICATION_VERSION in v3 output
pub const ODF_SPECIFICATION_VERSION_3: &str = "3.0";

/// Default extension for rendered files
pub const ODF_EXTENSION: &str = "ODF";

/// Default glob for batch discovery
pub const DEFAULT_FILE_PATTERN: &str = "*.ODF";

/// Parameter code of the primary time column
pub const SYTM_CODE: &str = "SYTM_01";

/// Parameter code prefixes that never receive a quality-flag column
pub const QUALITY_FLAG_EXCLUDED_PREFIXES: &[&str] = &["SYTM", "CNTR", "SNCNTR"];

/// Units that mark a parameter's extrema as date/time values
pub const TIME_UNITS: &[&str] = &["GMT", "UTC"];

// =============================================================================
// Quality Header Legends
// =============================================================================

pub const NO_QUALITY_TESTS: &str = "No quality tests performed";

/// Standard quality code legend appended by `QualityHeader::add_quality_codes`
pub const QUALITY_CODES_LEGEND: &[&str] = &[
    "QUALITY CODES",
    "  0: Value has not been quality controlled",
    "  1: Value seems to be correct",
    "  2: Value appears inconsistent with other values",
    "  3: Value seems doubtful",
    "  4: Value seems erroneous",
    "  5: Value was modified",
    "  9: Value is missing",
];

/// QCFF channel explanation appended by `QualityHeader::add_qcff_info`
pub const QCFF_LEGEND: &[&str] = &[
    "QCFF CHANNEL",
    "  The QCFF flag allows one to determine from which test(s) the quality flag(s) originate.",
    "  It only applies to the stage 2 quality control tests.",
    "  Each test in this step is associated with a number 2x, where x is a whole positive number.",
    "  Before running the quality control, a QCFF value of 0 is attributed to each line of data.",
    "  When a test fails, the value of 2x that is associated with that test is added to the QCFF.",
    "  In this way one can easily identify which tests failed by analyzing the QCFF value.",
    "  If the QC flag of a record is modified by hand, a value of 1 is added to the QCFF.",
];

// =============================================================================
// Unit Conversions
// =============================================================================

/// Knots per metre per second
pub const KNOTS_PER_MS: f64 = 1.94384;
