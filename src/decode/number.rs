//! Integer fields that the upstream may also write as whole floats (`117.0`).

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::fmt;

// 2^63 as f64; every whole float strictly below it fits in an i64
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// An integer that accepts any JSON number without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WholeNumber(#[serde(deserialize_with = "whole_number")] pub i64);

/// Deserializes an `i64` from an integer or a whole `f64`. Fractional values,
/// values outside the `i64` range and non-numbers are rejected.
pub fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(WholeNumberVisitor)
}

struct WholeNumberVisitor;

impl<'de> Visitor<'de> for WholeNumberVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.fract() == 0.0 && v >= -I64_UPPER && v < I64_UPPER {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}
