//! METEO_HEADER: surface weather observed at the time of an event.

use super::{
    FieldKind, FieldSpec, FieldValue, HeaderKind, HeaderRecord, fixed, plain, repeated,
    single_quoted_change,
};
use crate::constants::{INT_NULL_VALUE, KNOTS_PER_MS, NULL_VALUE};
use crate::format::{set_indexed, strip_quotes_and_spaces};
use crate::models::FileVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct MeteoHeader {
    pub air_temperature: f64,
    pub atmospheric_pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub sea_state: i64,
    pub cloud_cover: i64,
    pub ice_thickness: f64,
    pub meteo_comments: Vec<String>,
}

impl Default for MeteoHeader {
    fn default() -> Self {
        Self {
            air_temperature: NULL_VALUE,
            atmospheric_pressure: NULL_VALUE,
            wind_speed: NULL_VALUE,
            wind_direction: NULL_VALUE,
            sea_state: INT_NULL_VALUE,
            cloud_cover: INT_NULL_VALUE,
            ice_thickness: NULL_VALUE,
            meteo_comments: Vec::new(),
        }
    }
}

type Spec = FieldSpec<MeteoHeader>;

static METEO_FIELDS: &[Spec] = &[
    Spec::scalar(
        "AIR_TEMPERATURE",
        FieldKind::Float,
        |h| FieldValue::Float(h.air_temperature),
        |h, v| h.air_temperature = v.as_float(),
    ),
    Spec::scalar(
        "ATMOSPHERIC_PRESSURE",
        FieldKind::Float,
        |h| FieldValue::Float(h.atmospheric_pressure),
        |h, v| h.atmospheric_pressure = v.as_float(),
    ),
    Spec::scalar(
        "WIND_SPEED",
        FieldKind::Float,
        |h| FieldValue::Float(h.wind_speed),
        |h, v| h.wind_speed = v.as_float(),
    ),
    Spec::scalar(
        "WIND_DIRECTION",
        FieldKind::Float,
        |h| FieldValue::Float(h.wind_direction),
        |h, v| h.wind_direction = v.as_float(),
    ),
    Spec::scalar(
        "SEA_STATE",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.sea_state),
        |h, v| h.sea_state = v.as_integer(),
    ),
    Spec::scalar(
        "CLOUD_COVER",
        FieldKind::Integer,
        |h| FieldValue::Integer(h.cloud_cover),
        |h, v| h.cloud_cover = v.as_integer(),
    ),
    Spec::scalar(
        "ICE_THICKNESS",
        FieldKind::Float,
        |h| FieldValue::Float(h.ice_thickness),
        |h, v| h.ice_thickness = v.as_float(),
    ),
    Spec::repeated(
        "METEO_COMMENTS",
        |h| FieldValue::Many(h.meteo_comments.clone()),
        |h, v| h.meteo_comments.push(v.into_text()),
    ),
];

impl MeteoHeader {
    pub fn set_meteo_comment(&mut self, comment: &str, number: usize) {
        set_indexed(
            &mut self.meteo_comments,
            strip_quotes_and_spaces(comment).to_string(),
            number,
        );
    }

    pub fn meteo_comments(&self) -> &[String] {
        &self.meteo_comments
    }

    /// Convert a wind speed in knots to m/s; negative input is null
    pub fn wind_speed_knots_to_ms(knots: f64) -> f64 {
        if knots >= 0.0 {
            knots / KNOTS_PER_MS
        } else {
            NULL_VALUE
        }
    }

    /// WMO cloud cover code (oktas scale, 9 = sky obscured) from a 0-1
    /// cloud fraction
    pub fn cloud_cover_percentage_to_wmo_code(fraction: f64) -> i64 {
        match fraction {
            f if f < 0.0 => INT_NULL_VALUE,
            f if f == 0.0 => 0,
            f if f < 0.15 => 1,
            f if f < 0.35 => 2,
            f if f < 0.45 => 3,
            f if f < 0.55 => 4,
            f if f < 0.65 => 5,
            f if f < 0.85 => 6,
            f if f < 0.95 => 7,
            f if f < 1.0 => 8,
            _ => 9,
        }
    }

    /// WMO sea state code (table 3700) from a wave height in metres
    pub fn wave_height_meters_to_wmo_code(height: f64) -> i64 {
        match height {
            h if h < 0.0 => INT_NULL_VALUE,
            h if h == 0.0 => 0,
            h if h < 0.1 => 1,
            h if h < 0.5 => 2,
            h if h < 1.25 => 3,
            h if h < 2.5 => 4,
            h if h < 4.0 => 5,
            h if h < 6.0 => 6,
            h if h < 9.0 => 7,
            h if h < 14.0 => 8,
            _ => 9,
        }
    }
}

impl HeaderRecord for MeteoHeader {
    const KIND: HeaderKind = HeaderKind::Meteo;

    fn fields() -> &'static [FieldSpec<Self>] {
        METEO_FIELDS
    }

    fn render_lines(&self, _version: FileVersion) -> Vec<String> {
        let mut lines = vec![
            fixed("AIR_TEMPERATURE", self.air_temperature, 1),
            fixed("ATMOSPHERIC_PRESSURE", self.atmospheric_pressure, 1),
            fixed("WIND_SPEED", self.wind_speed, 1),
            fixed("WIND_DIRECTION", self.wind_direction, 1),
            plain("SEA_STATE", self.sea_state),
            plain("CLOUD_COVER", self.cloud_cover),
            fixed("ICE_THICKNESS", self.ice_thickness, 3),
        ];
        lines.extend(repeated("METEO_COMMENTS", &self.meteo_comments));
        lines
    }

    fn change_message(field: &str, old: &FieldValue, new: &FieldValue) -> String {
        single_quoted_change(Self::KIND, field, old, new)
    }
}
