//! Calendar periods.
//!
//! A period is a bag of calendar units (years, months, ...) with no fixed
//! length on the timeline: "1 month" is 28 to 31 days depending on where it
//! is anchored. Periods therefore compare for equality only. There is no
//! `Ord` implementation, and range queries over stored periods are rejected
//! by the query compiler.
//!
//! ## Text Format
//!
//! ```text
//! P[nY][nM][nW][nD][T[nH][nM][nS][ns][nt]]
//! ```
//!
//! Zero components are omitted, `T` appears only when a time component is
//! non-zero and the zero period is just `P`. Components may be negative,
//! e.g. `PT-5H`. Lower-case `s` is milliseconds and `t` is ticks (100ns).

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::error::{Error, Result};

/// A period expressed in calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub ticks: i64,
}

impl Period {
    /// The empty period.
    pub const ZERO: Period = Period::splat(0);

    /// Every component at its minimum.
    pub const MIN: Period = Period::splat(i64::MIN);

    /// Every component at its maximum.
    pub const MAX: Period = Period::splat(i64::MAX);

    const fn splat(value: i64) -> Period {
        Period {
            years: value,
            months: value,
            weeks: value,
            days: value,
            hours: value,
            minutes: value,
            seconds: value,
            milliseconds: value,
            ticks: value,
        }
    }

    pub fn from_years(years: i64) -> Self {
        Self { years, ..Self::ZERO }
    }

    pub fn from_months(months: i64) -> Self {
        Self { months, ..Self::ZERO }
    }

    pub fn from_weeks(weeks: i64) -> Self {
        Self { weeks, ..Self::ZERO }
    }

    pub fn from_days(days: i64) -> Self {
        Self { days, ..Self::ZERO }
    }

    pub fn from_hours(hours: i64) -> Self {
        Self { hours, ..Self::ZERO }
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self { minutes, ..Self::ZERO }
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self { seconds, ..Self::ZERO }
    }

    /// Returns true if any of hours, minutes, seconds, milliseconds or ticks is non-zero.
    pub fn has_time_component(&self) -> bool {
        self.hours != 0
            || self.minutes != 0
            || self.seconds != 0
            || self.milliseconds != 0
            || self.ticks != 0
    }

    fn date_units(&self) -> [(i64, char); 4] {
        [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ]
    }

    fn time_units(&self) -> [(i64, char); 5] {
        [
            (self.hours, 'H'),
            (self.minutes, 'M'),
            (self.seconds, 'S'),
            (self.milliseconds, 's'),
            (self.ticks, 't'),
        ]
    }

    fn checked_zip(self, other: Period, op: impl Fn(i64, i64) -> Option<i64>) -> Option<Period> {
        Some(Period {
            years: op(self.years, other.years)?,
            months: op(self.months, other.months)?,
            weeks: op(self.weeks, other.weeks)?,
            days: op(self.days, other.days)?,
            hours: op(self.hours, other.hours)?,
            minutes: op(self.minutes, other.minutes)?,
            seconds: op(self.seconds, other.seconds)?,
            milliseconds: op(self.milliseconds, other.milliseconds)?,
            ticks: op(self.ticks, other.ticks)?,
        })
    }

    /// Componentwise addition, or `None` if any component overflows.
    pub fn checked_add(self, rhs: Period) -> Option<Period> {
        self.checked_zip(rhs, i64::checked_add)
    }

    /// Componentwise subtraction, or `None` if any component overflows.
    pub fn checked_sub(self, rhs: Period) -> Option<Period> {
        self.checked_zip(rhs, i64::checked_sub)
    }

    /// Negates every component, or `None` if one is `i64::MIN`.
    pub fn checked_neg(self) -> Option<Period> {
        Period::ZERO.checked_sub(self)
    }
}

/// Componentwise addition.
///
/// Panics if any component overflows; see [`Period::checked_add`].
impl Add for Period {
    type Output = Period;

    fn add(self, rhs: Period) -> Period {
        self.checked_add(rhs).expect("`Period + Period` overflowed")
    }
}

/// Panics if any component overflows; see [`Period::checked_sub`].
impl Sub for Period {
    type Output = Period;

    fn sub(self, rhs: Period) -> Period {
        self.checked_sub(rhs).expect("`Period - Period` overflowed")
    }
}

/// Panics on `Period::MIN` or any other period with an `i64::MIN` component.
impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        self.checked_neg().expect("`-Period` overflowed")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;
        for (value, unit) in self.date_units() {
            if value != 0 {
                write!(f, "{}{}", value, unit)?;
            }
        }
        if self.has_time_component() {
            f.write_str("T")?;
            for (value, unit) in self.time_units() {
                if value != 0 {
                    write!(f, "{}{}", value, unit)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .strip_prefix('P')
            .ok_or_else(|| Error::period(s, "must start with 'P'"))?;

        let mut period = Period::ZERO;
        let mut in_time = false;
        let mut time_units_seen = false;
        // Index of the last unit written, used to enforce ordering.
        let mut last_unit: Option<usize> = None;

        let bytes = body.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            if bytes[pos] == b'T' {
                if in_time {
                    return Err(Error::period(s, "repeated 'T'"));
                }
                in_time = true;
                pos += 1;
                continue;
            }

            let start = pos;
            if bytes[pos] == b'-' {
                pos += 1;
            }
            let digits_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == digits_start {
                return Err(Error::period(s, format!("expected a number at offset {}", start + 1)));
            }
            let value: i64 = body[start..pos]
                .parse()
                .map_err(|_| Error::period(s, "component out of range"))?;

            let Some(&unit) = bytes.get(pos) else {
                return Err(Error::period(s, "number without a unit"));
            };
            pos += 1;

            let index = unit_index(unit, in_time)
                .ok_or_else(|| Error::period(s, format!("unexpected unit '{}'", unit as char)))?;
            if last_unit.is_some_and(|last| index <= last) {
                return Err(Error::period(s, format!("unit '{}' out of order", unit as char)));
            }
            last_unit = Some(index);
            time_units_seen |= in_time;

            let slot = match index {
                0 => &mut period.years,
                1 => &mut period.months,
                2 => &mut period.weeks,
                3 => &mut period.days,
                4 => &mut period.hours,
                5 => &mut period.minutes,
                6 => &mut period.seconds,
                7 => &mut period.milliseconds,
                _ => &mut period.ticks,
            };
            *slot = value;
        }

        if in_time && !time_units_seen {
            return Err(Error::period(s, "'T' without time units"));
        }

        Ok(period)
    }
}

/// Maps a unit letter to its position in the pattern.
fn unit_index(unit: u8, in_time: bool) -> Option<usize> {
    match (unit, in_time) {
        (b'Y', false) => Some(0),
        (b'M', false) => Some(1),
        (b'W', false) => Some(2),
        (b'D', false) => Some(3),
        (b'H', true) => Some(4),
        (b'M', true) => Some(5),
        (b'S', true) => Some(6),
        (b's', true) => Some(7),
        (b't', true) => Some(8),
        _ => None,
    }
}
