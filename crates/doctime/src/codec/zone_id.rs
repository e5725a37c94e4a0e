//! Zone codec: the zone id as a string.

use chrono_tz::Tz;
use serde::{Deserializer, Serializer};
use serde_json::Value as JsonValue;

use super::{decode_text, decode_text_value, Codec};
use crate::error::Result;
use crate::zone::{TzdbProvider, ZoneProvider};

/// Codec for zone-rules objects, resolving ids through a [`ZoneProvider`].
#[derive(Debug, Clone, Default)]
pub struct ZoneCodec<P = TzdbProvider> {
    provider: P,
}

impl<P: ZoneProvider> ZoneCodec<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: ZoneProvider> Codec<Tz> for ZoneCodec<P> {
    const TYPE_NAME: &'static str = "DateTimeZone";

    fn encode<S: Serializer>(&self, value: &Tz, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(value.name())
    }

    fn decode<'de, D: Deserializer<'de>>(&self, deserializer: D) -> std::result::Result<Tz, D::Error> {
        decode_text(deserializer, |id| self.provider.zone(id))
    }

    fn decode_value(&self, value: JsonValue) -> Result<Tz> {
        decode_text_value(value, <Self as Codec<Tz>>::TYPE_NAME, |id| self.provider.zone(id))
    }
}
