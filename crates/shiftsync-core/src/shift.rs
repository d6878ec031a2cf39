//! Shift identifiers and the workday-to-UTC range resolver.
//!
//! The plant runs three shifts in a fixed UTC+5:30 civil timezone:
//!
//! - Day (`D`): 08:00-20:00
//! - General (`G`): 08:30-17:30
//! - Night (`E`): 20:00-08:00 the next day (spans midnight)
//!
//! Instants are resolved without a timezone database. The wall-clock
//! components are interpreted as if they were UTC, then the fixed plant
//! offset is subtracted to obtain the true UTC instant. Both endpoints of a
//! range go through the same conversion.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidDate;

/// Fixed plant offset from UTC (IST, +05:30), in minutes.
const PLANT_OFFSET_MINUTES: i64 = 330;

/// The three plant shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Day,
    General,
    Night,
}

/// Error returned when parsing an unknown shift name or code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShift {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown shift '{}': expected day (D), general (G), or night (E)",
            self.raw
        )
    }
}

impl std::error::Error for UnknownShift {}

impl Shift {
    /// All shifts in schedule order.
    pub const ALL: [Self; 3] = [Self::Day, Self::General, Self::Night];

    /// Single-letter code used by the ERP schedule feed.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::General => "G",
            Self::Night => "E",
        }
    }

    /// Display name used by the local assignment store.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::General => "General",
            Self::Night => "Night",
        }
    }

    /// Parse the ERP single-letter code. Returns `None` for anything else.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "D" => Some(Self::Day),
            "G" => Some(Self::General),
            "E" => Some(Self::Night),
            _ => None,
        }
    }

    /// Wall-clock window for this shift, as (start, end, end-day offset).
    ///
    /// The offset is 1 only for Night, whose end falls on the next calendar
    /// day.
    const fn window(self) -> ((u32, u32), (u32, u32), u64) {
        match self {
            Self::Day => ((8, 0), (20, 0), 0),
            Self::General => ((8, 30), (17, 30), 0),
            Self::Night => ((20, 0), (8, 0), 1),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Shift {
    type Err = UnknownShift;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" => Ok(Self::Day),
            "g" | "general" => Ok(Self::General),
            "e" | "night" => Ok(Self::Night),
            _ => Err(UnknownShift { raw: s.to_string() }),
        }
    }
}

// Custom serde: the wire representation is the ERP single-letter code.
impl Serialize for Shift {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Shift {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_code(&s)
            .or_else(|| Self::from_str(&s).ok())
            .ok_or_else(|| serde::de::Error::custom(UnknownShift { raw: s }))
    }
}

/// Resolved UTC window for one shift on one workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRange {
    /// First instant of the shift, inclusive.
    pub start: DateTime<Utc>,
    /// Last instant of the shift, exclusive.
    pub end: DateTime<Utc>,
}

impl ShiftRange {
    /// Start instant as a millisecond-precision ISO 8601 string.
    #[must_use]
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// End instant as a millisecond-precision ISO 8601 string.
    #[must_use]
    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Resolve the UTC instant range for `shift` on the workday `date`
/// (`YYYY-MM-DD`).
///
/// The date is validated up front: three dash-separated numeric parts, month
/// 1-12, day 1-31, and calendar validity. Malformed input fails with
/// [`InvalidDate`] rather than producing a nonsense range.
pub fn resolve_shift_range(date: &str, shift: Shift) -> Result<ShiftRange, InvalidDate> {
    let day = parse_workday(date)?;
    let ((start_h, start_m), (end_h, end_m), end_day_offset) = shift.window();

    let end_day = day
        .checked_add_days(chrono::Days::new(end_day_offset))
        .ok_or_else(|| InvalidDate::new(date, "date out of supported range"))?;

    Ok(ShiftRange {
        start: to_utc_instant(day, start_h, start_m),
        end: to_utc_instant(end_day, end_h, end_m),
    })
}

/// Parse and validate a `YYYY-MM-DD` workday string.
pub fn parse_workday(date: &str) -> Result<NaiveDate, InvalidDate> {
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 {
        return Err(InvalidDate::new(date, "expected YYYY-MM-DD"));
    }

    let year: i32 = parts[0]
        .parse()
        .map_err(|_| InvalidDate::new(date, "year is not a number"))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| InvalidDate::new(date, "month is not a number"))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| InvalidDate::new(date, "day is not a number"))?;

    if !(1..=12).contains(&month) {
        return Err(InvalidDate::new(date, "month out of range"));
    }
    if !(1..=31).contains(&day) {
        return Err(InvalidDate::new(date, "day out of range"));
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| InvalidDate::new(date, "not a calendar date"))
}

/// Interpret wall-clock components as UTC, then subtract the plant offset.
fn to_utc_instant(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    day.and_time(time).and_utc() - Duration::minutes(PLANT_OFFSET_MINUTES)
}
