//! A validated (weekday, time-of-day) query.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::error::Result;
use crate::weekday::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub day: Weekday,
    pub instant: TimeOfDay,
}

impl Query {
    pub fn new(day: Weekday, instant: TimeOfDay) -> Self {
        Self { day, instant }
    }

    /// Validate raw day and time strings. The day is checked first.
    ///
    /// # Errors
    /// `VacancyError::InvalidDay` or `VacancyError::InvalidTime`.
    pub fn parse(day: &str, time: &str) -> Result<Self> {
        let day = day.parse::<Weekday>()?;
        let instant = TimeOfDay::parse(time)?;
        Ok(Self { day, instant })
    }

    /// Build a query from a local timestamp. Weekend dates are moved to the
    /// nearest teaching day, and the time is truncated to the minute.
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            day: Weekday::nearest(timestamp.weekday()),
            instant: TimeOfDay::from(timestamp.time()),
        }
    }
}
