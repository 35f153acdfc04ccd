//! Defines the air quality record types for a single GIOS monitoring station.
//!
//! Includes:
//! - `AirQuality`: a station's full snapshot (general index plus pollutant indexes).
//! - `AQGeneralIndex` / `AQIndex`: the composite index and the per-pollutant indexes.
//! - `AQIndexLevel`: the severity classification attached to each index.
//! - `Pollutant` / `GeneralIndexName`: the index identifiers used as JSON field prefixes.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field prefix of the general (composite) index in the upstream response.
pub const GENERAL_INDEX_PREFIX: &str = "st";

/// Name of the general index. Only ever `"st"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeneralIndexName {
    #[default]
    #[serde(rename = "st")]
    St,
}

/// A per-substance index identifier. Never the general index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Co,
    So2,
    Pm10,
    Pm25,
    O3,
    C6h6,
    No2,
}

impl Pollutant {
    /// Every pollutant, in the order indexes are reported.
    pub const ALL: [Pollutant; 7] = [
        Pollutant::Co,
        Pollutant::So2,
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::O3,
        Pollutant::C6h6,
        Pollutant::No2,
    ];

    /// The prefix of this pollutant's fields in the upstream response (e.g. `pm10CalcDate`).
    pub fn prefix(&self) -> &'static str {
        match self {
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
            Pollutant::Pm10 => "pm10",
            Pollutant::Pm25 => "pm25",
            Pollutant::O3 => "o3",
            Pollutant::C6h6 => "c6h6",
            Pollutant::No2 => "no2",
        }
    }

    /// Human-readable chemical notation, used for display.
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Co => "CO",
            Pollutant::So2 => "SO2",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
            Pollutant::O3 => "O3",
            Pollutant::C6h6 => "C6H6",
            Pollutant::No2 => "NO2",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Severity classification of an index reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AQIndexLevel {
    pub id: i64,
    pub name: String,
}

/// The composite air quality index of a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AQGeneralIndex {
    pub name: GeneralIndexName,
    /// When the index was calculated. Serialized as epoch milliseconds.
    #[serde(with = "ts_milliseconds")]
    pub calc_time: DateTime<Utc>,
    /// When the underlying measurement was taken. Serialized as epoch milliseconds.
    #[serde(with = "ts_milliseconds")]
    pub source_time: DateTime<Utc>,
    pub index_level: AQIndexLevel,
}

/// The index for a single pollutant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AQIndex {
    pub name: Pollutant,
    #[serde(with = "ts_milliseconds")]
    pub calc_time: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub source_time: DateTime<Utc>,
    pub index_level: AQIndexLevel,
}

/// A station's air quality snapshot at fetch time.
///
/// `indexes` holds at most one entry per pollutant, in `Pollutant::ALL` order;
/// pollutants the upstream omitted or sent malformed are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQuality {
    pub station_id: i64,
    pub general_index: AQGeneralIndex,
    pub indexes: Vec<AQIndex>,
}

impl AirQuality {
    /// Looks up the index reported for `pollutant`, if any.
    pub fn index(&self, pollutant: Pollutant) -> Option<&AQIndex> {
        self.indexes.iter().find(|index| index.name == pollutant)
    }
}
