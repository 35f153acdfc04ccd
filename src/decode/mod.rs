//! Validates a raw `/aqindex/getIndex` response and decodes it into an `AirQuality` record.
//!
//! The upstream body is a flat object keyed by index prefix, e.g.
//! `stCalcDate`, `stSourceDataDate`, `stIndexLevel`, `pm10CalcDate`, ...
//! The station id and the general index (`st`) are required; every pollutant
//! index is optional and dropped on its own if it fails to decode.

mod number;
mod time;

pub use number::{whole_number, WholeNumber};
pub use time::{parse_warsaw_time, RawTime};

use crate::error::DecodeError;
use crate::models::{
    AQGeneralIndex, AQIndex, AQIndexLevel, AirQuality, GeneralIndexName, Pollutant,
    GENERAL_INDEX_PREFIX,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// The nested `{prefix}IndexLevel` object.
#[derive(Debug, Deserialize)]
struct RawIndexLevel {
    #[serde(deserialize_with = "whole_number")]
    id: i64,
    #[serde(rename = "indexLevelName")]
    name: String,
}

impl From<RawIndexLevel> for AQIndexLevel {
    fn from(raw: RawIndexLevel) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

/// The three fields shared by the general index and every pollutant index.
#[derive(Debug)]
struct IndexReading {
    calc_time: DateTime<Utc>,
    source_time: DateTime<Utc>,
    index_level: AQIndexLevel,
}

/// Decodes a parsed response body.
///
/// Fails if the body is not an object, if `id` is missing or not a whole number, or
/// if any of the general index fields is missing or malformed.
pub fn decode_air_quality(body: &Value) -> Result<AirQuality, DecodeError> {
    let fields = body
        .as_object()
        .ok_or_else(|| DecodeError::NotAnObject(json_kind(body)))?;

    let WholeNumber(station_id) = field(fields, "id")?;

    let general = decode_reading(fields, GENERAL_INDEX_PREFIX)?;
    let general_index = AQGeneralIndex {
        name: GeneralIndexName::St,
        calc_time: general.calc_time,
        source_time: general.source_time,
        index_level: general.index_level,
    };

    let indexes: Vec<AQIndex> = Pollutant::ALL
        .iter()
        .filter_map(|&pollutant| match decode_reading(fields, pollutant.prefix()) {
            Ok(reading) => Some(AQIndex {
                name: pollutant,
                calc_time: reading.calc_time,
                source_time: reading.source_time,
                index_level: reading.index_level,
            }),
            Err(e) => {
                debug!(station_id, %pollutant, "Omitting pollutant index: {}", e);
                None
            },
        })
        .collect();

    debug!(
        "Decoded station {} with {} pollutant indexes",
        station_id,
        indexes.len()
    );

    Ok(AirQuality {
        station_id,
        general_index,
        indexes,
    })
}

fn decode_reading(fields: &Map<String, Value>, prefix: &str) -> Result<IndexReading, DecodeError> {
    let calc_field = format!("{prefix}CalcDate");
    let source_field = format!("{prefix}SourceDataDate");
    let level_field = format!("{prefix}IndexLevel");

    let calc_time = field::<RawTime>(fields, &calc_field)?.to_timestamp(&calc_field)?;
    let source_time = field::<RawTime>(fields, &source_field)?.to_timestamp(&source_field)?;
    let index_level: RawIndexLevel = field(fields, &level_field)?;

    Ok(IndexReading {
        calc_time,
        source_time,
        index_level: index_level.into(),
    })
}

/// Reads and deserializes a single top-level field.
fn field<'a, T>(fields: &'a Map<String, Value>, name: &str) -> Result<T, DecodeError>
where
    T: Deserialize<'a>,
{
    let value = fields
        .get(name)
        .ok_or_else(|| DecodeError::MissingField(name.to_string()))?;

    T::deserialize(value).map_err(|e| DecodeError::InvalidField {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const PREFIXES: [&str; 8] = ["st", "co", "so2", "pm10", "pm25", "o3", "c6h6", "no2"];
    const JUNE_FIRST: i64 = 1_622_505_600_000;

    // A well-formed response with all eight indexes reported.
    fn full_body() -> Value {
        let mut body = Map::new();
        body.insert("id".to_string(), json!(117));
        for (i, prefix) in PREFIXES.iter().enumerate() {
            body.insert(format!("{prefix}CalcDate"), json!(JUNE_FIRST));
            body.insert(format!("{prefix}SourceDataDate"), json!("2021-06-01 02:00:00"));
            body.insert(
                format!("{prefix}IndexLevel"),
                json!({ "id": i as i64 % 6, "indexLevelName": "Dobry" }),
            );
        }
        Value::Object(body)
    }

    fn with(mut body: Value, key: &str, value: Value) -> Value {
        body[key] = value;
        body
    }

    fn without(mut body: Value, key: &str) -> Value {
        body.as_object_mut().unwrap().remove(key);
        body
    }

    #[test]
    fn decodes_all_indexes() {
        let quality = decode_air_quality(&full_body()).unwrap();

        assert_eq!(quality.station_id, 117);
        assert_eq!(quality.general_index.name, GeneralIndexName::St);
        assert_eq!(quality.general_index.calc_time.timestamp_millis(), JUNE_FIRST);
        assert_eq!(quality.general_index.source_time.timestamp_millis(), JUNE_FIRST);
        assert_eq!(
            quality.general_index.index_level,
            AQIndexLevel {
                id: 0,
                name: "Dobry".to_string()
            }
        );

        let names: Vec<Pollutant> = quality.indexes.iter().map(|index| index.name).collect();
        assert_eq!(names, Pollutant::ALL.to_vec());
    }

    #[test]
    fn decodes_the_documented_example() {
        let body = json!({
            "id": 117,
            "stCalcDate": 1_622_505_600_000i64,
            "stSourceDataDate": 1_622_505_600_000i64,
            "stIndexLevel": { "id": 1, "indexLevelName": "Good" },
            "coCalcDate": "2021-06-01 02:00:00",
            "coSourceDataDate": "2021-06-01 01:00:00",
            "coIndexLevel": { "id": 0, "indexLevelName": "Very good" },
        });

        let quality = decode_air_quality(&body).unwrap();

        assert_eq!(quality.station_id, 117);
        assert_eq!(quality.general_index.index_level.name, "Good");
        assert_eq!(quality.indexes.len(), 1);
        let co = quality.index(Pollutant::Co).unwrap();
        assert_eq!(co.calc_time.timestamp_millis(), JUNE_FIRST);
        assert_eq!(co.source_time.timestamp_millis(), JUNE_FIRST - 3_600_000);
    }

    #[rstest]
    #[case::missing_id(without(full_body(), "id"), DecodeError::MissingField("id".to_string()))]
    #[case::missing_general_level(
        without(full_body(), "stIndexLevel"),
        DecodeError::MissingField("stIndexLevel".to_string())
    )]
    #[case::missing_general_source(
        without(full_body(), "stSourceDataDate"),
        DecodeError::MissingField("stSourceDataDate".to_string())
    )]
    #[case::unparseable_general_date(
        with(full_body(), "stCalcDate", json!("not-a-date")),
        DecodeError::InvalidDate { field: "stCalcDate".to_string(), value: "not-a-date".to_string() }
    )]
    fn required_fields_fail_the_decode(#[case] body: Value, #[case] expected: DecodeError) {
        assert_eq!(decode_air_quality(&body).unwrap_err(), expected);
    }

    #[rstest]
    #[case::id_as_string(with(full_body(), "id", json!("117")), "id")]
    #[case::id_null(with(full_body(), "id", Value::Null), "id")]
    #[case::general_level_null(with(full_body(), "stIndexLevel", Value::Null), "stIndexLevel")]
    #[case::general_level_without_name(
        with(full_body(), "stIndexLevel", json!({ "id": 1 })),
        "stIndexLevel"
    )]
    #[case::general_date_wrong_type(with(full_body(), "stCalcDate", json!(true)), "stCalcDate")]
    fn malformed_required_fields_name_the_field(#[case] body: Value, #[case] expected: &str) {
        match decode_air_quality(&body).unwrap_err() {
            DecodeError::InvalidField { field, .. } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_id_fails_even_when_everything_else_is_missing() {
        assert_eq!(
            decode_air_quality(&json!({})).unwrap_err(),
            DecodeError::MissingField("id".to_string())
        );
    }

    #[rstest]
    #[case(json!([]), "an array")]
    #[case(json!("body"), "a string")]
    #[case(Value::Null, "null")]
    fn non_object_bodies_fail(#[case] body: Value, #[case] kind: &'static str) {
        assert_eq!(
            decode_air_quality(&body).unwrap_err(),
            DecodeError::NotAnObject(kind)
        );
    }

    #[rstest]
    #[case::unparseable_date(with(full_body(), "coCalcDate", json!("not-a-date")))]
    #[case::missing_date(without(full_body(), "coSourceDataDate"))]
    #[case::missing_level(without(full_body(), "coIndexLevel"))]
    #[case::null_level(with(full_body(), "coIndexLevel", Value::Null))]
    #[case::level_with_string_id(
        with(full_body(), "coIndexLevel", json!({ "id": "1", "indexLevelName": "Dobry" }))
    )]
    fn malformed_pollutant_is_omitted(#[case] body: Value) {
        let quality = decode_air_quality(&body).unwrap();

        assert_eq!(quality.indexes.len(), 6);
        assert!(quality.index(Pollutant::Co).is_none());
        for pollutant in Pollutant::ALL.iter().filter(|&&p| p != Pollutant::Co) {
            assert!(quality.index(*pollutant).is_some(), "{pollutant} missing");
        }
    }

    #[test]
    fn whole_floats_decode_like_integers() {
        let body = with(full_body(), "id", json!(117.0));
        let body = with(body, "stCalcDate", json!(1_622_505_600_000.0));
        let body = with(body, "stIndexLevel", json!({ "id": 1.0, "indexLevelName": "Dobry" }));

        let quality = decode_air_quality(&body).unwrap();

        assert_eq!(quality.station_id, 117);
        assert_eq!(quality.general_index.calc_time.timestamp_millis(), JUNE_FIRST);
        assert_eq!(quality.general_index.index_level.id, 1);
        assert_eq!(quality.indexes.len(), 7);
    }

    #[rstest]
    #[case::fractional_id(with(full_body(), "id", json!(117.5)), "id")]
    #[case::fractional_general_date(with(full_body(), "stCalcDate", json!(1.5)), "stCalcDate")]
    fn fractional_required_numbers_fail(#[case] body: Value, #[case] expected: &str) {
        match decode_air_quality(&body).unwrap_err() {
            DecodeError::InvalidField { field, .. } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fractional_pollutant_date_omits_that_pollutant() {
        let body = with(full_body(), "coCalcDate", json!(1_622_505_600_000.5));

        let quality = decode_air_quality(&body).unwrap();

        assert_eq!(quality.indexes.len(), 6);
        assert!(quality.index(Pollutant::Co).is_none());
    }

    #[test]
    fn general_index_only_yields_no_pollutants() {
        let body = json!({
            "id": 52,
            "stCalcDate": "2021-06-01 02:00:00",
            "stSourceDataDate": "2021-06-01 02:00:00",
            "stIndexLevel": { "id": 2, "indexLevelName": "Umiarkowany" },
        });

        let quality = decode_air_quality(&body).unwrap();

        assert_eq!(quality.station_id, 52);
        assert_eq!(quality.general_index.calc_time.timestamp_millis(), JUNE_FIRST);
        assert!(quality.indexes.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = with(full_body(), "stIndexStatus", json!(true));
        let body = with(body, "stIndexCrParam", json!("PYL"));
        assert_eq!(decode_air_quality(&body).unwrap().indexes.len(), 7);
    }
}
