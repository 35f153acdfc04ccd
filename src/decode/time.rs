//! Normalizes the two timestamp representations GIOS sends into a single UTC instant.
//!
//! The API reports dates either as epoch milliseconds or as wall-clock strings in
//! the station's civil time zone (Europe/Warsaw), e.g. `"2021-06-01 12:20:17"`.

use crate::error::DecodeError;
use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Europe::Warsaw;
use chrono_tz::Tz;
use serde::Deserialize;

/// Wall-clock layouts accepted for local date strings. `%.f` also matches no fraction.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A date field as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    /// Epoch milliseconds, taken verbatim. Whole floats are accepted.
    Millis(#[serde(deserialize_with = "crate::decode::number::whole_number")] i64),
    /// A Europe/Warsaw wall-clock date-time string.
    Local(String),
}

impl RawTime {
    /// Resolves this value to an absolute instant.
    ///
    /// `field` is only used to label the error.
    pub fn to_timestamp(&self, field: &str) -> Result<DateTime<Utc>, DecodeError> {
        match self {
            RawTime::Millis(millis) => Utc.timestamp_millis_opt(*millis).single().ok_or(
                DecodeError::TimestampOutOfRange {
                    field: field.to_string(),
                    millis: *millis,
                },
            ),
            RawTime::Local(value) => {
                parse_warsaw_time(value).ok_or_else(|| DecodeError::InvalidDate {
                    field: field.to_string(),
                    value: value.clone(),
                })
            },
        }
    }
}

/// Parses a date string as Europe/Warsaw wall-clock time.
///
/// Strings carrying their own offset (RFC 3339) are honoured as-is. A bare date
/// means local midnight.
pub fn parse_warsaw_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Utc));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    resolve_local(&Warsaw, naive).map(|local| local.with_timezone(&Utc))
}

/// Maps a wall-clock time onto the zone's timeline.
///
/// Both transition edges use the offset in force after the transition: a
/// repeated (fall-back) time takes the later instant, and a skipped
/// (spring-forward) time is read with the summer offset.
fn resolve_local(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) => Some(local),
        LocalResult::Ambiguous(_, latest) => Some(latest),
        LocalResult::None => {
            let after_gap = naive.checked_add_signed(Duration::hours(1))?;
            let offset = zone.offset_from_local_datetime(&after_gap).latest()?.fix();
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
            Some(zone.from_utc_datetime(&utc))
        },
    }
}
