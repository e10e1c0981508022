//! EVENT_HEADER: one deployment, cast or tow within a cruise.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, fixed, quoted, repeated,
    strip_stars,
};
use crate::constants::{NULL_VALUE, SYTM_NULL_VALUE};
use crate::format::{coerce_datetime, format_repr, set_indexed, strip_quotes_and_spaces};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct EventHeader {
    pub data_type: String,
    pub event_number: String,
    pub event_qualifier1: String,
    pub event_qualifier2: String,
    pub creation_date: String,
    pub orig_creation_date: String,
    pub start_date_time: String,
    pub end_date_time: String,
    pub initial_latitude: f64,
    pub initial_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    pub sampling_interval: f64,
    pub sounding: f64,
    pub depth_off_bottom: f64,
    pub station_name: String,
    pub set_number: String,
    pub event_comments: Vec<String>,
}

impl Default for EventHeader {
    fn default() -> Self {
        Self {
            data_type: String::new(),
            event_number: String::new(),
            event_qualifier1: String::new(),
            event_qualifier2: String::new(),
            creation_date: SYTM_NULL_VALUE.to_string(),
            orig_creation_date: SYTM_NULL_VALUE.to_string(),
            start_date_time: SYTM_NULL_VALUE.to_string(),
            end_date_time: SYTM_NULL_VALUE.to_string(),
            initial_latitude: NULL_VALUE,
            initial_longitude: NULL_VALUE,
            end_latitude: NULL_VALUE,
            end_longitude: NULL_VALUE,
            min_depth: NULL_VALUE,
            max_depth: NULL_VALUE,
            sampling_interval: NULL_VALUE,
            sounding: NULL_VALUE,
            depth_off_bottom: NULL_VALUE,
            station_name: String::new(),
            set_number: String::new(),
            event_comments: Vec::new(),
        }
    }
}

type Spec = FieldSpec<EventHeader>;

static EVENT_FIELDS: &[Spec] = &[
    Spec::scalar(
        "DATA_TYPE",
        FieldKind::Text,
        |h| FieldValue::from(&h.data_type),
        |h, v| h.data_type = strip_stars(&v.into_text()),
    ),
    Spec::scalar(
        "EVENT_NUMBER",
        FieldKind::Text,
        |h| FieldValue::from(&h.event_number),
        |h, v| h.event_number = strip_stars(&v.into_text()),
    ),
    Spec::scalar(
        "EVENT_QUALIFIER1",
        FieldKind::Text,
        |h| FieldValue::from(&h.event_qualifier1),
        |h, v| h.event_qualifier1 = strip_stars(&v.into_text()),
    ),
    Spec::scalar(
        "EVENT_QUALIFIER2",
        FieldKind::Text,
        |h| FieldValue::from(&h.event_qualifier2),
        |h, v| h.event_qualifier2 = strip_stars(&v.into_text()),
    ),
    Spec::scalar(
        "CREATION_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.creation_date.clone()),
        |h, v| h.creation_date = v.into_text(),
    ),
    Spec::scalar(
        "ORIG_CREATION_DATE",
        FieldKind::Date,
        |h| FieldValue::Date(h.orig_creation_date.clone()),
        |h, v| h.orig_creation_date = v.into_text(),
    ),
    Spec::scalar(
        "START_DATE_TIME",
        FieldKind::Date,
        |h| FieldValue::Date(h.start_date_time.clone()),
        |h, v| h.start_date_time = v.into_text(),
    ),
    Spec::scalar(
        "END_DATE_TIME",
        FieldKind::Date,
        |h| FieldValue::Date(h.end_date_time.clone()),
        |h, v| h.end_date_time = v.into_text(),
    ),
    Spec::scalar(
        "INITIAL_LATITUDE",
        FieldKind::Float,
        |h| FieldValue::Float(h.initial_latitude),
        |h, v| h.initial_latitude = v.as_float(),
    ),
    Spec::scalar(
        "INITIAL_LONGITUDE",
        FieldKind::Float,
        |h| FieldValue::Float(h.initial_longitude),
        |h, v| h.initial_longitude = v.as_float(),
    ),
    Spec::scalar(
        "END_LATITUDE",
        FieldKind::Float,
        |h| FieldValue::Float(h.end_latitude),
        |h, v| h.end_latitude = v.as_float(),
    ),
    Spec::scalar(
        "END_LONGITUDE",
        FieldKind::Float,
        |h| FieldValue::Float(h.end_longitude),
        |h, v| h.end_longitude = v.as_float(),
    ),
    Spec::scalar(
        "MIN_DEPTH",
        FieldKind::Float,
        |h| FieldValue::Float(h.min_depth),
        |h, v| h.min_depth = v.as_float(),
    ),
    Spec::scalar(
        "MAX_DEPTH",
        FieldKind::Float,
        |h| FieldValue::Float(h.max_depth),
        |h, v| h.max_depth = v.as_float(),
    ),
    Spec::scalar(
        "SAMPLING_INTERVAL",
        FieldKind::Float,
        |h| FieldValue::Float(h.sampling_interval),
        |h, v| h.sampling_interval = v.as_float(),
    ),
    Spec::scalar(
        "SOUNDING",
        FieldKind::Float,
        |h| FieldValue::Float(h.sounding),
        |h, v| h.sounding = v.as_float(),
    ),
    Spec::scalar(
        "DEPTH_OFF_BOTTOM",
        FieldKind::Float,
        |h| FieldValue::Float(h.depth_off_bottom),
        |h, v| h.depth_off_bottom = v.as_float(),
    ),
    Spec::scalar(
        "STATION_NAME",
        FieldKind::Text,
        |h| FieldValue::from(&h.station_name),
        |h, v| h.station_name = strip_stars(&v.into_text()),
    ),
    Spec::scalar(
        "SET_NUMBER",
        FieldKind::Text,
        |h| FieldValue::from(&h.set_number),
        |h, v| h.set_number = strip_stars(&v.into_text()),
    ),
    Spec::repeated(
        "EVENT_COMMENTS",
        |h| FieldValue::Many(h.event_comments.clone()),
        |h, v| h.event_comments.push(v.into_text()),
    ),
];

impl EventHeader {
    /// Append a comment (`number == 0` or past the end) or replace comment
    /// `number` (1-based)
    pub fn set_event_comment(&mut self, comment: &str, number: usize) {
        set_indexed(
            &mut self.event_comments,
            strip_quotes_and_spaces(comment).to_string(),
            number,
        );
    }

    pub fn event_comments(&self) -> &[String] {
        &self.event_comments
    }

    pub fn set_station_name(&mut self, station_name: impl Into<String>) {
        self.station_name = station_name.into();
    }

    pub fn set_start_date_time(&mut self, start_date_time: &str) {
        self.start_date_time = coerce_datetime(start_date_time);
    }

    pub fn set_end_date_time(&mut self, end_date_time: &str) {
        self.end_date_time = coerce_datetime(end_date_time);
    }
}

impl HeaderRecord for EventHeader {
    const KIND: HeaderKind = HeaderKind::Event;

    fn fields() -> &'static [FieldSpec<Self>] {
        EVENT_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        let mut lines = vec![
            quoted("DATA_TYPE", &self.data_type),
            quoted("EVENT_NUMBER", &self.event_number),
            quoted("EVENT_QUALIFIER1", &self.event_qualifier1),
            quoted("EVENT_QUALIFIER2", &self.event_qualifier2),
            quoted("CREATION_DATE", &self.creation_date),
            quoted("ORIG_CREATION_DATE", &self.orig_creation_date),
            quoted("START_DATE_TIME", &self.start_date_time),
            quoted("END_DATE_TIME", &self.end_date_time),
            fixed("INITIAL_LATITUDE", self.initial_latitude, 6),
            fixed("INITIAL_LONGITUDE", self.initial_longitude, 6),
            fixed("END_LATITUDE", self.end_latitude, 6),
            fixed("END_LONGITUDE", self.end_longitude, 6),
            fixed("MIN_DEPTH", self.min_depth, 2),
            fixed("MAX_DEPTH", self.max_depth, 2),
            format!("  SAMPLING_INTERVAL = {}", format_repr(self.sampling_interval)),
            fixed("SOUNDING", self.sounding, 2),
            fixed("DEPTH_OFF_BOTTOM", self.depth_off_bottom, 2),
            quoted("STATION_NAME", &self.station_name),
            quoted("SET_NUMBER", &self.set_number),
        ];
        lines.extend(repeated("EVENT_COMMENTS", &self.event_comments));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        let numeric = Self::field_spec(field).is_some_and(|spec| spec.kind == FieldKind::Float);
        if numeric {
            format!("In Event Header field {field} was changed from {old} to {new}")
        } else {
            format!("In Event Header field {field} was changed from \"{old}\" to \"{new}\"")
        }
    }
}
