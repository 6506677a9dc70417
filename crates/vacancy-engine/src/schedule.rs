//! Room records and their weekly occupancy schedules.
//!
//! A [`Schedule`] maps each teaching day to the intervals during which the
//! room is in use. Producers are not required to sort or de-overlap these
//! intervals, so nothing in the evaluator relies on either property.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::error::{Result, VacancyError};
use crate::weekday::Weekday;

/// A half-open occupied range `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct OccupiedInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawInterval> for OccupiedInterval {
    type Error = VacancyError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        OccupiedInterval::new(raw.start, raw.end)
    }
}

impl OccupiedInterval {
    /// # Errors
    /// Returns `VacancyError::InvalidInterval` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(VacancyError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse an interval from two `HH:mm` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Half-open containment: `start <= instant < end`.
    pub fn contains(&self, instant: TimeOfDay) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Weekly occupancy keyed by teaching day.
///
/// A day with no entry and a day with an empty list are equivalent: the room
/// is free all day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<Weekday, Vec<OccupiedInterval>>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The intervals recorded for `day`, in producer order.
    pub fn intervals(&self, day: Weekday) -> &[OccupiedInterval] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, day: Weekday, interval: OccupiedInterval) {
        self.0.entry(day).or_default().push(interval);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, day: Weekday, interval: OccupiedInterval) -> Self {
        self.insert(day, interval);
        self
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[OccupiedInterval])> {
        self.0.iter().map(|(day, list)| (*day, list.as_slice()))
    }

    /// True when no day has any interval.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Append every interval of `other`, day by day.
    pub fn merge(&mut self, other: Schedule) {
        for (day, list) in other.0 {
            self.0.entry(day).or_default().extend(list);
        }
    }

    /// Drop exact duplicate intervals and sort each day by `(start, end)`.
    pub fn normalize(&mut self) {
        for list in self.0.values_mut() {
            list.sort();
            list.dedup();
        }
    }
}

impl FromIterator<(Weekday, OccupiedInterval)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (Weekday, OccupiedInterval)>>(iter: I) -> Self {
        let mut schedule = Schedule::new();
        for (day, interval) in iter {
            schedule.insert(day, interval);
        }
        schedule
    }
}

/// One room and its (optional) weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub building: String,
    pub room: String,
    /// `None` when the data source has no schedule for this room.
    #[serde(default)]
    pub usage: Option<Schedule>,
    /// Course identifiers that meet in this room.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<String>,
}

impl Room {
    pub fn new(building: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            building: building.into(),
            room: room.into(),
            usage: None,
            courses: Vec::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.usage = Some(schedule);
        self
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.usage.as_ref()
    }

    /// Fold another record for the same room into this one. Schedules are
    /// merged and normalized, course lists are unioned.
    pub fn merge(&mut self, other: Room) {
        if let Some(incoming) = other.usage {
            let schedule = self.usage.get_or_insert_with(Schedule::new);
            schedule.merge(incoming);
            schedule.normalize();
        }
        self.courses.extend(other.courses);
        self.courses.sort();
        self.courses.dedup();
    }
}
