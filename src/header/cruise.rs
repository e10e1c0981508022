//! CRUISE_HEADER: the cruise (mission) an event belongs to.

use super::{FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, plain, quoted};
use crate::constants::SYTM_NULL_VALUE;
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct CruiseHeader {
    pub country_institute_code: i64,
    pub cruise_number: String,
    pub organization: String,
    pub chief_scientist: String,
    pub start_date: String,
    pub end_date: String,
    pub platform: String,
    /// Written only in v3 files
    pub area_of_operation: String,
    pub cruise_name: String,
    pub cruise_description: String,
}

impl Default for CruiseHeader {
    fn default() -> Self {
        Self {
            country_institute_code: 0,
            cruise_number: String::new(),
            organization: String::new(),
            chief_scientist: String::new(),
            start_date: SYTM_NULL_VALUE.to_string(),
            end_date: SYTM_NULL_VALUE.to_string(),
            platform: String::new(),
            area_of_operation: String::new(),
            cruise_name: String::new(),
            cruise_description: String::new(),
        }
    }
}

type Spec = FieldSpec<CruiseHeader>;

static CRUISE_FIELDS: &[Spec] = &[
    Spec::scalar(
        "COUNTRY_INSTITUTE_CODE",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.country_institute_code),
        |h, v| h.country_institute_code = v.as_integer(),
    ),
    Spec::scalar(
        "CRUISE_NUMBER",
        FieldKind::Text,
        |h| FieldValue::from(&h.cruise_number),
        |h, v| h.cruise_number = v.into_text(),
    ),
    Spec::scalar(
        "ORGANIZATION",
        FieldKind::Text,
        |h| FieldValue::from(&h.organization),
        |h, v| h.organization = v.into_text(),
    ),
    Spec::scalar(
        "CHIEF_SCIENTIST",
        FieldKind::Text,
        |h| FieldValue::from(&h.chief_scientist),
        |h, v| h.chief_scientist = v.into_text(),
    ),
    Spec::scalar(
        "START_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.start_date.clone()),
        |h, v| h.start_date = v.into_text(),
    ),
    Spec::scalar(
        "END_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.end_date.clone()),
        |h, v| h.end_date = v.into_text(),
    ),
    Spec::scalar(
        "PLATFORM",
        FieldKind::Text,
        |h| FieldValue::from(&h.platform),
        |h, v| h.platform = v.into_text(),
    ),
    Spec::scalar(
        "AREA_OF_OPERATION",
        FieldKind::Text,
        |h| FieldValue::from(&h.area_of_operation),
        |h, v| h.area_of_operation = v.into_text(),
    ),
    Spec::scalar(
        "CRUISE_NAME",
        FieldKind::Text,
        |h| FieldValue::from(&h.cruise_name),
        |h, v| h.cruise_name = v.into_text(),
    ),
    Spec::scalar(
        "CRUISE_DESCRIPTION",
        FieldKind::Text,
        |h| FieldValue::from(&h.cruise_description),
        |h, v| h.cruise_description = v.into_text(),
    ),
];

impl CruiseHeader {
    pub fn set_organization(&mut self, organization: impl Into<String>) {
        self.organization = organization.into();
    }

    pub fn set_chief_scientist(&mut self, chief_scientist: impl Into<String>) {
        self.chief_scientist = chief_scientist.into();
    }

    pub fn set_cruise_number(&mut self, cruise_number: impl Into<String>) {
        self.cruise_number = cruise_number.into();
    }
}

impl HeaderRecord for CruiseHeader {
    const KIND: HeaderKind = HeaderKind::Cruise;

    fn fields() -> &'static [FieldSpec<Self>] {
        CRUISE_FIELDS
    }

    fn render_lines(&self, version: FileVersion) -> Vec<String> {
        let mut lines = vec![
            plain("COUNTRY_INSTITUTE_CODE", self.country_institute_code),
            quoted("CRUISE_NUMBER", &self.cruise_number),
            quoted("ORGANIZATION", &self.organization),
            quoted("CHIEF_SCIENTIST", &self.chief_scientist),
            quoted("START_DATE", &self.start_date),
            quoted("END_DATE", &self.end_date),
            quoted("PLATFORM", &self.platform),
        ];
        if version == FileVersion::V3 {
            lines.push(quoted("AREA_OF_OPERATION", &self.area_of_operation));
        }
        lines.push(quoted("CRUISE_NAME", &self.cruise_name));
        lines.push(quoted("CRUISE_DESCRIPTION", &self.cruise_description));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        if field == "COUNTRY_INSTITUTE_CODE" {
            format!("In Cruise Header field {field} was changed from {old} to {new}")
        } else {
            format!("In Cruise Header field {field} was changed from \"{old}\" to \"{new}\"")
        }
    }
}
