//! Fixed offsets from UTC.

use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;

use crate::error::{Error, Result};

const SECONDS_PER_MINUTE: i32 = 60;
const SECONDS_PER_HOUR: i32 = 3_600;

/// Largest magnitude an offset may have: 18 hours.
const MAX_OFFSET_SECONDS: i32 = 18 * SECONDS_PER_HOUR;

/// An offset from UTC, in whole seconds, within `[-18h, +18h]`.
///
/// Offsets are totally ordered (west of UTC sorts before east), so both
/// equality and range queries are meaningful on stored offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    /// UTC.
    pub const ZERO: Offset = Offset { seconds: 0 };

    /// The most westerly offset, `-18:00:00`.
    pub const MIN: Offset = Offset {
        seconds: -MAX_OFFSET_SECONDS,
    };

    /// The most easterly offset, `+18:00:00`.
    pub const MAX: Offset = Offset {
        seconds: MAX_OFFSET_SECONDS,
    };

    /// Creates an offset from a number of seconds east of UTC.
    pub fn from_seconds(seconds: i32) -> Result<Self> {
        if !(-MAX_OFFSET_SECONDS..=MAX_OFFSET_SECONDS).contains(&seconds) {
            return Err(Error::InvalidOffset(format!("{} seconds", seconds)));
        }
        Ok(Self { seconds })
    }

    /// Creates an offset from whole hours.
    pub fn from_hours(hours: i32) -> Result<Self> {
        let seconds = hours
            .checked_mul(SECONDS_PER_HOUR)
            .ok_or_else(|| Error::InvalidOffset(format!("{} hours", hours)))?;
        Self::from_seconds(seconds)
    }

    /// Creates an offset from hours plus minutes.
    ///
    /// The two are summed, so `from_hours_and_minutes(-5, 30)` is `-04:30:00`
    /// and `from_hours_and_minutes(-5, -30)` is `-05:30:00`.
    pub fn from_hours_and_minutes(hours: i32, minutes: i32) -> Result<Self> {
        let seconds = hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|h| minutes.checked_mul(SECONDS_PER_MINUTE).and_then(|m| h.checked_add(m)))
            .ok_or_else(|| Error::InvalidOffset(format!("{}h {}m", hours, minutes)))?;
        Self::from_seconds(seconds)
    }

    /// Seconds east of UTC.
    pub fn seconds(self) -> i32 {
        self.seconds
    }

    /// Adds two offsets, returning `None` if the sum leaves the valid range.
    pub fn checked_add(self, other: Offset) -> Option<Offset> {
        Self::from_seconds(self.seconds + other.seconds).ok()
    }

    /// Subtracts an offset, returning `None` if the result leaves the valid range.
    pub fn checked_sub(self, other: Offset) -> Option<Offset> {
        Self::from_seconds(self.seconds - other.seconds).ok()
    }

    /// Converts to chrono's fixed offset.
    pub fn to_fixed(self) -> FixedOffset {
        FixedOffset::east_opt(self.seconds).expect("offsets are bounded by 18 hours")
    }
}

impl TryFrom<FixedOffset> for Offset {
    type Error = Error;

    fn try_from(offset: FixedOffset) -> Result<Self> {
        Self::from_seconds(offset.local_minus_utc())
    }
}

/// Formats as a constant time span: `[-]hh:mm:ss`.
impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 { "-" } else { "" };
        let total = self.seconds.unsigned_abs();
        let hours = total / SECONDS_PER_HOUR as u32;
        let minutes = (total % SECONDS_PER_HOUR as u32) / SECONDS_PER_MINUTE as u32;
        let seconds = total % SECONDS_PER_MINUTE as u32;
        write!(f, "{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    }
}

impl FromStr for Offset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidOffset(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut parts = body.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let hours = parse_two_digits(h).ok_or_else(invalid)?;
        let minutes = parse_two_digits(m).filter(|m| *m < 60).ok_or_else(invalid)?;
        let seconds = parse_two_digits(sec).filter(|s| *s < 60).ok_or_else(invalid)?;

        let magnitude = hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds;
        let total = if negative { -magnitude } else { magnitude };

        Self::from_seconds(total).map_err(|_| invalid())
    }
}

fn parse_two_digits(s: &str) -> Option<i32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
