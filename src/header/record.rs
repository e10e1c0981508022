//! RECORD_HEADER: block and row counts, derived by `OdfDocument::update`.

use super::{FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, plain};
use crate::models::FileVersion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordHeader {
    pub num_calibration: i64,
    pub num_history: i64,
    pub num_swing: i64,
    pub num_param: i64,
    pub num_cycle: i64,
}

type Spec = FieldSpec<RecordHeader>;

static RECORD_FIELDS: &[Spec] = &[
    Spec::scalar(
        "NUM_CALIBRATION",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.num_calibration),
        |h, v| h.num_calibration = v.as_integer(),
    ),
    Spec::scalar(
        "NUM_HISTORY",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.num_history),
        |h, v| h.num_history = v.as_integer(),
    ),
    Spec::scalar(
        "NUM_SWING",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.num_swing),
        |h, v| h.num_swing = v.as_integer(),
    ),
    Spec::scalar(
        "NUM_PARAM",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.num_param),
        |h, v| h.num_param = v.as_integer(),
    ),
    Spec::scalar(
        "NUM_CYCLE",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.num_cycle),
        |h, v| h.num_cycle = v.as_integer(),
    ),
];

impl HeaderRecord for RecordHeader {
    const KIND: HeaderKind = HeaderKind::Record;

    fn fields() -> &'static [FieldSpec<Self>] {
        RECORD_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        vec![
            plain("NUM_CALIBRATION", self.num_calibration),
            plain("NUM_HISTORY", self.num_history),
            plain("NUM_SWING", self.num_swing),
            plain("NUM_PARAM", self.num_param),
            plain("NUM_CYCLE", self.num_cycle),
        ]
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        format!("In Record Header field {field} was changed from {old} to {new}")
    }
}
