//! # Document Codecs
//!
//! One codec per stored value type. Each codec plugs into serde, which is
//! the host's token reader/writer: `encode` writes tokens to a
//! [`Serializer`], `decode` consumes them from a [`Deserializer`].
//!
//! ## Wire Formats
//!
//! ```text
//! DateTime<FixedOffset>  "2024-01-15T13:00:00.000000000+01:00"
//! DateTime<Utc>          "2024-01-15T12:00:00.000000000+00:00"
//! Offset                 "-05:30:00"
//! Period                 "P1DT2H"
//! Tz                     "Europe/Berlin"
//! ZonedDateTime          {"DateTime": "<offset date-time>", "Zone": "<zone id>"}
//! ```
//!
//! `Offset`, `Period` and `ZonedDateTime` implement `Serialize` and
//! `Deserialize` through these codecs. chrono's own types are foreign, so
//! document fields of those types opt in with
//! `#[serde(with = "doctime::codec::offset_date_time")]` or
//! `#[serde(with = "doctime::codec::instant")]`.
//!
//! ## Errors
//!
//! Through serde, a failed decode reaches the caller as the deserializer's
//! own error type, carrying the message. `Codec::decode_value` works on an
//! already parsed JSON value and returns the typed [`Error`] instead
//! (`MalformedInput`, `UnrecognizedZoneId`, ...).

pub mod instant;
pub mod offset;
pub mod offset_date_time;
pub mod period;
pub mod zone_id;
pub mod zoned;

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

pub use instant::InstantCodec;
pub use offset::OffsetCodec;
pub use offset_date_time::{
    format_local_date_time, format_offset_date_time, parse_offset_date_time, OffsetDateTimeCodec,
};
pub use period::PeriodCodec;
pub use zone_id::ZoneCodec;
pub use zoned::{ZonedDateTimeCodec, DATE_TIME_FIELD, ZONE_FIELD};

/// A codec for one stored value type.
pub trait Codec<T> {
    /// Name of the value type, used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Writes `value` to the host's token writer.
    fn encode<S: Serializer>(&self, value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>;

    /// Reads a value from the host's token reader.
    fn decode<'de, D: Deserializer<'de>>(&self, deserializer: D) -> std::result::Result<T, D::Error>;

    /// Encodes into a JSON value.
    fn encode_value(&self, value: &T) -> Result<JsonValue> {
        self.encode(value, serde_json::value::Serializer)
            .map_err(Error::from)
    }

    /// Decodes from a JSON value.
    ///
    /// Codecs override this to report their typed errors.
    fn decode_value(&self, value: JsonValue) -> Result<T> {
        self.decode(value).map_err(Error::from)
    }
}

/// Reads a string token and parses it.
fn decode_text<'de, D, T>(
    deserializer: D,
    parse: impl FnOnce(&str) -> Result<T>,
) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}

/// Reads a JSON string and parses it, keeping the parser's error.
fn decode_text_value<T>(
    value: JsonValue,
    type_name: &str,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Result<T> {
    match value {
        JsonValue::String(text) => parse(&text),
        other => Err(Error::MalformedInput(format!(
            "{} must be a string, found {}",
            type_name, other
        ))),
    }
}
