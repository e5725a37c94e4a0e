//! Offset date-time codec.
//!
//! Writes `YYYY-MM-DDTHH:MM:SS.fffffffff±HH:MM` with a full nanosecond
//! fraction and a numeric offset (`+00:00`, never `Z`). Reads any RFC 3339
//! offset date-time.
//!
//! The last instant of year 9999 seen from an eastern offset has a local
//! year of 10000, which is written signed (`+10000-01-01T…`). Such text is
//! not RFC 3339, so reading falls back to the write pattern.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserializer, Serializer};
use serde_json::Value as JsonValue;

use super::{decode_text, decode_text_value, Codec};
use crate::error::{Error, Result};

const OFFSET_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f%:z";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";
/// Like the write pattern, with any number of fraction digits.
const SIGNED_YEAR_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Formats an offset date-time in wire form.
pub fn format_offset_date_time(value: &DateTime<FixedOffset>) -> String {
    value.format(OFFSET_DATE_TIME_FORMAT).to_string()
}

/// Formats a local clock reading the way the local part of an offset
/// date-time is written.
pub fn format_local_date_time(value: &NaiveDateTime) -> String {
    value.format(LOCAL_DATE_TIME_FORMAT).to_string()
}

/// Parses an offset date-time.
pub fn parse_offset_date_time(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|err| DateTime::parse_from_str(text, SIGNED_YEAR_PARSE_FORMAT).map_err(|_| err))
        .map_err(|err| Error::date_time(text, err.to_string()))
}

/// Codec for `DateTime<FixedOffset>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetDateTimeCodec;

impl Codec<DateTime<FixedOffset>> for OffsetDateTimeCodec {
    const TYPE_NAME: &'static str = "OffsetDateTime";

    fn encode<S: Serializer>(
        &self,
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_offset_date_time(value))
    }

    fn decode<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> std::result::Result<DateTime<FixedOffset>, D::Error> {
        decode_text(deserializer, parse_offset_date_time)
    }

    fn decode_value(&self, value: JsonValue) -> Result<DateTime<FixedOffset>> {
        decode_text_value(
            value,
            <Self as Codec<DateTime<FixedOffset>>>::TYPE_NAME,
            parse_offset_date_time,
        )
    }
}

/// `#[serde(with = "doctime::codec::offset_date_time")]` entry point.
pub fn serialize<S: Serializer>(
    value: &DateTime<FixedOffset>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    OffsetDateTimeCodec.encode(value, serializer)
}

/// `#[serde(with = "doctime::codec::offset_date_time")]` entry point.
pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<DateTime<FixedOffset>, D::Error> {
    OffsetDateTimeCodec.decode(deserializer)
}
