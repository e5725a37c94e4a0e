//! Offset codec: `[-]hh:mm:ss`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::{decode_text, decode_text_value, Codec};
use crate::error::Result;
use crate::types::Offset;

/// Codec for [`Offset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetCodec;

impl Codec<Offset> for OffsetCodec {
    const TYPE_NAME: &'static str = "Offset";

    fn encode<S: Serializer>(&self, value: &Offset, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    fn decode<'de, D: Deserializer<'de>>(&self, deserializer: D) -> std::result::Result<Offset, D::Error> {
        decode_text(deserializer, |text| text.parse::<Offset>())
    }

    fn decode_value(&self, value: JsonValue) -> Result<Offset> {
        decode_text_value(value, <Self as Codec<Offset>>::TYPE_NAME, |text| text.parse::<Offset>())
    }
}

impl Serialize for Offset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        OffsetCodec.encode(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        OffsetCodec.decode(deserializer)
    }
}
