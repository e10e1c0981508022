//! INSTRUMENT_HEADER: the sensor package that produced the data.

use super::{FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, quoted};
use crate::models::FileVersion;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentHeader {
    pub instrument_type: String,
    pub model: String,
    pub serial_number: String,
    pub description: String,
}

type Spec = FieldSpec<InstrumentHeader>;

static INSTRUMENT_FIELDS: &[Spec] = &[
    Spec::scalar(
        "INST_TYPE",
        FieldKind::Text,
        |h| FieldValue::from(&h.instrument_type),
        |h, v| h.instrument_type = v.into_text(),
    ),
    Spec::scalar(
        "MODEL",
        FieldKind::Text,
        |h| FieldValue::from(&h.model),
        |h, v| h.model = v.into_text(),
    ),
    Spec::scalar(
        "SERIAL_NUMBER",
        FieldKind::Text,
        |h| FieldValue::from(&h.serial_number),
        |h, v| h.serial_number = v.into_text(),
    ),
    Spec::scalar(
        "DESCRIPTION",
        FieldKind::Text,
        |h| FieldValue::from(&h.description),
        |h, v| h.description = v.into_text(),
    ),
];

impl HeaderRecord for InstrumentHeader {
    const KIND: HeaderKind = HeaderKind::Instrument;

    fn fields() -> &'static [FieldSpec<Self>] {
        INSTRUMENT_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        vec![
            quoted("INST_TYPE", &self.instrument_type),
            quoted("MODEL", &self.model),
            quoted("SERIAL_NUMBER", &self.serial_number),
            quoted("DESCRIPTION", &self.description),
        ]
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        let old = old.to_string();
        let old = if old.is_empty() { "''".to_string() } else { old };
        format!("In Instrument Header field {field} was changed from {old} to '{new}'")
    }
}
