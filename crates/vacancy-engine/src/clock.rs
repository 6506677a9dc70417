//! Minute-resolution wall-clock time of day.
//!
//! Schedules and queries carry no date and no timezone: every time is a
//! campus-local `HH:mm`. The text form is strict: two zero-padded digits for
//! the hour, a colon, two digits for the minute.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, VacancyError};

/// A time of day truncated to the minute. The default is midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from hour and minute. Returns `None` for hour > 23 or minute > 59.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    /// Build from a count of minutes since midnight (`0..1440`).
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::from_hm(minutes / 60, minutes % 60)
    }

    /// Parse a zero-padded 24-hour `HH:mm` string.
    ///
    /// # Errors
    /// Returns `VacancyError::InvalidTime` for anything that is not exactly
    /// `HH:mm`, or for an hour above 23 / minute above 59.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || VacancyError::InvalidTime(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let [h1, h2, m1, m2] = digits.map(|b| u32::from(b - b'0'));

        Self::from_hm(h1 * 10 + h2, m1 * 10 + m2).ok_or_else(invalid)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Render as a 12-hour clock string, e.g. `14:30` → `2:30 PM`.
    pub fn to_12_hour(self) -> String {
        let (is_pm, hour) = self.0.hour12();
        let suffix = if is_pm { "PM" } else { "AM" };
        format!("{}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Drops seconds and sub-second precision.
    fn from(time: NaiveTime) -> Self {
        TimeOfDay(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }
}

impl FromStr for TimeOfDay {
    type Err = VacancyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}
