//! # Zoned Date-Time Codec
//!
//! A zoned date-time is stored as a two-field object:
//!
//! ```text
//! {"DateTime": "2024-01-15T13:00:00.000000000+01:00", "Zone": "Europe/Berlin"}
//! ```
//!
//! `DateTime` alone pins the instant, so queries over the instant can run
//! against it directly (see the query crate's translators). `Zone` carries
//! the rules needed to rebuild the original value.
//!
//! ## Reading
//!
//! Fields are consumed as they stream past: order does not matter, a
//! repeated name overwrites the earlier one and unknown names are skipped.
//! Once the object ends both fields must have been seen.
//!
//! The decoded value keeps the offset from the wire instead of asking the
//! zone rules again. If the rules changed since the value was written, the
//! old offset is reproduced.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use tracing::trace;

use super::offset_date_time::{format_offset_date_time, parse_offset_date_time};
use super::Codec;
use crate::error::{Error, Result};
use crate::types::ZonedDateTime;
use crate::zone::{TzdbProvider, ZoneProvider};

/// Wire name of the offset date-time field.
pub const DATE_TIME_FIELD: &str = "DateTime";

/// Wire name of the zone id field.
pub const ZONE_FIELD: &str = "Zone";

/// Codec for [`ZonedDateTime`].
#[derive(Debug, Clone, Default)]
pub struct ZonedDateTimeCodec<P = TzdbProvider> {
    provider: P,
}

impl<P: ZoneProvider> ZonedDateTimeCodec<P> {
    /// Creates a codec that resolves zone ids through `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The zone provider used on decode.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Decodes an already parsed wire object.
    ///
    /// A JSON object keeps the last of any repeated name, matching the
    /// streaming read. Unknown names are skipped.
    pub fn decode_object(&self, object: &Map<String, JsonValue>) -> Result<ZonedDateTime> {
        let mut fields = ZonedFields::default();
        for (name, value) in object {
            match name.as_str() {
                DATE_TIME_FIELD => fields.set_date_time(field_text(DATE_TIME_FIELD, value)?)?,
                ZONE_FIELD => fields.set_zone(&self.provider, field_text(ZONE_FIELD, value)?)?,
                _ => {}
            }
        }

        let value = fields.finish()?;
        trace!(zoned = %value, "decoded zoned date-time");
        Ok(value)
    }
}

impl<P: ZoneProvider> Codec<ZonedDateTime> for ZonedDateTimeCodec<P> {
    const TYPE_NAME: &'static str = "ZonedDateTime";

    fn encode<S: Serializer>(
        &self,
        value: &ZonedDateTime,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut object = serializer.serialize_struct(<Self as Codec<ZonedDateTime>>::TYPE_NAME, 2)?;
        object.serialize_field(
            DATE_TIME_FIELD,
            &format_offset_date_time(&value.to_offset_date_time()),
        )?;
        object.serialize_field(ZONE_FIELD, value.zone().name())?;
        object.end()
    }

    fn decode<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> std::result::Result<ZonedDateTime, D::Error> {
        deserializer.deserialize_map(ZonedVisitor {
            provider: &self.provider,
        })
    }

    fn decode_value(&self, value: JsonValue) -> Result<ZonedDateTime> {
        match value {
            JsonValue::Object(object) => self.decode_object(&object),
            other => Err(Error::MalformedInput(format!(
                "ZonedDateTime must be an object, found {}",
                other
            ))),
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Fields collected while the object streams past.
#[derive(Debug, Default)]
struct ZonedFields {
    date_time: Option<DateTime<FixedOffset>>,
    zone: Option<Tz>,
}

impl ZonedFields {
    fn set_date_time(&mut self, text: &str) -> Result<()> {
        self.date_time = Some(parse_offset_date_time(text)?);
        Ok(())
    }

    fn set_zone<P: ZoneProvider>(&mut self, provider: &P, id: &str) -> Result<()> {
        self.zone = Some(provider.zone(id)?);
        Ok(())
    }

    fn finish(self) -> Result<ZonedDateTime> {
        let (Some(date_time), Some(zone)) = (self.date_time, self.zone) else {
            return Err(Error::MalformedInput(
                "ZonedDateTime must contain DateTime and Zone properties".to_string(),
            ));
        };

        ZonedDateTime::new(date_time.naive_local(), zone, *date_time.offset())
    }
}

fn field_text<'a>(name: &str, value: &'a JsonValue) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::MalformedInput(format!("{} must be a string, found {}", name, value)))
}

struct ZonedVisitor<'a, P> {
    provider: &'a P,
}

impl<'de, P: ZoneProvider> Visitor<'de> for ZonedVisitor<'_, P> {
    type Value = ZonedDateTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with DateTime and Zone properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<ZonedDateTime, A::Error> {
        let mut fields = ZonedFields::default();

        while let Some(name) = map.next_key::<String>()? {
            match name.as_str() {
                DATE_TIME_FIELD => {
                    let text = map.next_value::<String>()?;
                    fields.set_date_time(&text).map_err(de::Error::custom)?;
                }
                ZONE_FIELD => {
                    let id = map.next_value::<String>()?;
                    fields.set_zone(self.provider, &id).map_err(de::Error::custom)?;
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let value = fields.finish().map_err(de::Error::custom)?;
        trace!(zoned = %value, "decoded zoned date-time");
        Ok(value)
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for ZonedDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ZonedDateTimeCodec::<TzdbProvider>::default().encode(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ZonedDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        ZonedDateTimeCodec::<TzdbProvider>::default().decode(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn berlin_winter() -> ZonedDateTime {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        ZonedDateTime::from_instant(instant, Tz::Europe__Berlin)
    }

    #[test]
    fn test_encode_shape_and_order() {
        let text = serde_json::to_string(&berlin_winter()).unwrap();
        assert_eq!(
            text,
            r#"{"DateTime":"2024-01-15T13:00:00.000000000+01:00","Zone":"Europe/Berlin"}"#
        );
    }

    #[test]
    fn test_finish_requires_both_fields() {
        let only_zone = ZonedFields {
            date_time: None,
            zone: Some(Tz::UTC),
        };
        assert!(matches!(only_zone.finish(), Err(Error::MalformedInput(_))));

        let only_date_time = ZonedFields {
            date_time: Some(berlin_winter().to_offset_date_time()),
            zone: None,
        };
        assert!(matches!(only_date_time.finish(), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let text = r#"{
            "DateTime": "2000-01-01T00:00:00+00:00",
            "Zone": "Asia/Tokyo",
            "DateTime": "2024-01-15T13:00:00+01:00",
            "Zone": "Europe/Berlin"
        }"#;
        let decoded: ZonedDateTime = serde_json::from_str(text).unwrap();
        assert_eq!(decoded, berlin_winter());
    }

    #[test]
    fn test_unknown_fields_are_skipped() {
        let value = json!({
            "Comment": {"nested": [1, 2, 3]},
            "Zone": "Europe/Berlin",
            "DateTime": "2024-01-15T13:00:00+01:00"
        });
        let decoded = ZonedDateTimeCodec::<TzdbProvider>::default()
            .decode_value(value)
            .unwrap();
        assert_eq!(decoded, berlin_winter());
    }

    #[test]
    fn test_wire_offset_is_trusted() {
        // Berlin is +01:00 in January; the stored +03:00 is kept.
        let value = json!({"DateTime": "2024-01-15T15:00:00+03:00", "Zone": "Europe/Berlin"});
        let decoded = ZonedDateTimeCodec::<TzdbProvider>::default()
            .decode_value(value)
            .unwrap();

        assert_eq!(decoded.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(decoded.to_instant(), berlin_winter().to_instant());
        assert_ne!(decoded, berlin_winter());
    }

    #[test]
    fn test_non_string_field_is_rejected() {
        let value = json!({"DateTime": 12, "Zone": "UTC"});
        let err = ZonedDateTimeCodec::<TzdbProvider>::default()
            .decode_value(value)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        assert!(serde_json::from_str::<ZonedDateTime>(r#"{"DateTime":12,"Zone":"UTC"}"#).is_err());
    }

    #[test]
    fn test_decode_value_keeps_error_types() {
        let codec = ZonedDateTimeCodec::<TzdbProvider>::default();

        let err = codec.decode_value(json!({"Zone": "UTC"})).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        let err = codec
            .decode_value(json!({"DateTime": "2024-01-15T13:00:00+01:00", "Zone": "Moon/X"}))
            .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedZoneId(id) if id == "Moon/X"));

        let err = codec
            .decode_value(json!({"DateTime": "yesterday", "Zone": "UTC"}))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDateTime { .. }));

        let err = codec.decode_value(json!("Europe/Berlin")).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
