//! Instant codec.
//!
//! An instant is written as an offset date-time at `+00:00`. Reading
//! accepts any offset and normalizes to UTC.

use chrono::{DateTime, Utc};
use serde::{Deserializer, Serializer};
use serde_json::Value as JsonValue;

use super::offset_date_time::{format_offset_date_time, parse_offset_date_time};
use super::{decode_text, decode_text_value, Codec};
use crate::error::Result;

/// Codec for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantCodec;

impl Codec<DateTime<Utc>> for InstantCodec {
    const TYPE_NAME: &'static str = "Instant";

    fn encode<S: Serializer>(
        &self,
        value: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_offset_date_time(&value.fixed_offset()))
    }

    fn decode<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        decode_text(deserializer, |text| {
            parse_offset_date_time(text).map(|value| value.with_timezone(&Utc))
        })
    }

    fn decode_value(&self, value: JsonValue) -> Result<DateTime<Utc>> {
        decode_text_value(value, <Self as Codec<DateTime<Utc>>>::TYPE_NAME, |text| {
            parse_offset_date_time(text).map(|value| value.with_timezone(&Utc))
        })
    }
}

/// `#[serde(with = "doctime::codec::instant")]` entry point.
pub fn serialize<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    InstantCodec.encode(value, serializer)
}

/// `#[serde(with = "doctime::codec::instant")]` entry point.
pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<DateTime<Utc>, D::Error> {
    InstantCodec.decode(deserializer)
}
