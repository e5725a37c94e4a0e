//! Zoned date-times.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset as _, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// A local date-time in a named zone, together with the offset the zone
/// assigns there.
///
/// The offset is resolved from the zone rules when the value is built from
/// an instant. [`ZonedDateTime::new`] trusts the offset it is given, which
/// is what decoding relies on: the writer of a stored value is authoritative,
/// even if the zone rules have since been corrected.
///
/// Two values are equal when their local clock reading, offset and zone all
/// match. Values naming different zones are never equal, even when they
/// denote the same instant.
#[derive(Debug, Clone, Copy)]
pub struct ZonedDateTime {
    date_time: DateTime<FixedOffset>,
    zone: Tz,
}

impl ZonedDateTime {
    /// Places an instant in a zone.
    pub fn from_instant(instant: DateTime<Utc>, zone: Tz) -> Self {
        let offset = instant.with_timezone(&zone).offset().fix();
        Self {
            date_time: instant.with_timezone(&offset),
            zone,
        }
    }

    /// Combines a local clock reading, a zone and an offset without
    /// consulting the zone rules.
    ///
    /// Fails only if the local time shifted by the offset leaves chrono's
    /// representable range.
    pub fn new(local: NaiveDateTime, zone: Tz, offset: FixedOffset) -> Result<Self> {
        let date_time = offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| Error::OutOfRange(format!("{} at offset {}", local, offset)))?;

        Ok(Self { date_time, zone })
    }

    /// The current instant in the given zone.
    pub fn now(zone: Tz) -> Self {
        Self::from_instant(Utc::now(), zone)
    }

    /// Local clock reading.
    pub fn local(&self) -> NaiveDateTime {
        self.date_time.naive_local()
    }

    /// Offset from UTC at this point.
    pub fn offset(&self) -> FixedOffset {
        *self.date_time.offset()
    }

    /// The zone.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Drops the zone, keeping the local time and offset.
    pub fn to_offset_date_time(&self) -> DateTime<FixedOffset> {
        self.date_time
    }

    /// The point on the global timeline.
    pub fn to_instant(&self) -> DateTime<Utc> {
        self.date_time.with_timezone(&Utc)
    }

    /// Moves along the timeline and re-resolves the offset in the same zone.
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        self.to_instant()
            .checked_add_signed(delta)
            .map(|instant| Self::from_instant(instant, self.zone))
    }

    pub fn checked_sub(self, delta: TimeDelta) -> Option<Self> {
        self.to_instant()
            .checked_sub_signed(delta)
            .map(|instant| Self::from_instant(instant, self.zone))
    }
}

impl PartialEq for ZonedDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.local() == other.local() && self.offset() == other.offset() && self.zone == other.zone
    }
}

impl Eq for ZonedDateTime {}

impl Hash for ZonedDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local().hash(state);
        self.offset().local_minus_utc().hash(state);
        self.zone.hash(state);
    }
}

/// Panics if the result leaves chrono's representable range.
impl Add<TimeDelta> for ZonedDateTime {
    type Output = ZonedDateTime;

    fn add(self, rhs: TimeDelta) -> ZonedDateTime {
        self.checked_add(rhs)
            .expect("`ZonedDateTime + TimeDelta` overflowed")
    }
}

/// Panics if the result leaves chrono's representable range.
impl Sub<TimeDelta> for ZonedDateTime {
    type Output = ZonedDateTime;

    fn sub(self, rhs: TimeDelta) -> ZonedDateTime {
        self.checked_sub(rhs)
            .expect("`ZonedDateTime - TimeDelta` overflowed")
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.local().format("%Y-%m-%dT%H:%M:%S%.f"),
            self.zone.name(),
            self.offset()
        )
    }
}
