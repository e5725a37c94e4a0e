//! # doctime
//!
//! Codecs that let a JSON document store persist time values: offsets from
//! UTC, calendar periods, offset date-times, instants and zoned date-times.
//!
//! ## Architecture
//!
//! ```text
//!   host serializer (serde)
//!          │
//!          ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │      Codec<T>    │─────▶│   ZoneProvider   │  zone id → rules
//! │ encode / decode  │      │   (chrono-tz)    │
//! └────────┬─────────┘      └──────────────────┘
//!          │
//!          ▼
//!   stored JSON field
//! ```
//!
//! Every codec is a pure function of its input. Nothing is cached and no
//! state is shared between calls, so codecs can be used from any thread.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doctime::{ZonedDateTime, Tz};
//!
//! let zdt = ZonedDateTime::now(Tz::Europe__Berlin);
//! let json = serde_json::to_string(&zdt)?;
//! let back: ZonedDateTime = serde_json::from_str(&json)?;
//! assert_eq!(back, zdt);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;
pub mod zone;

pub use chrono_tz::Tz;

pub use codec::{
    Codec, InstantCodec, OffsetCodec, OffsetDateTimeCodec, PeriodCodec, ZoneCodec,
    ZonedDateTimeCodec,
};
pub use config::ZoneConfig;
pub use error::{Error, Result};
pub use types::{max_iso_instant, min_iso_instant, Offset, Period, ZonedDateTime};
pub use zone::{TzdbProvider, ZoneProvider};
