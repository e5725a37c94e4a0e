//! Period codec: roundtrip period text, e.g. `P1Y2DT3H`.
//!
//! Stored periods can be matched for equality because equal periods have
//! identical text. The text does not sort by duration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::{decode_text, decode_text_value, Codec};
use crate::error::Result;
use crate::types::Period;

/// Codec for [`Period`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodCodec;

impl Codec<Period> for PeriodCodec {
    const TYPE_NAME: &'static str = "Period";

    fn encode<S: Serializer>(&self, value: &Period, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    fn decode<'de, D: Deserializer<'de>>(&self, deserializer: D) -> std::result::Result<Period, D::Error> {
        decode_text(deserializer, |text| text.parse::<Period>())
    }

    fn decode_value(&self, value: JsonValue) -> Result<Period> {
        decode_text_value(value, <Self as Codec<Period>>::TYPE_NAME, |text| text.parse::<Period>())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PeriodCodec.encode(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        PeriodCodec.decode(deserializer)
    }
}
