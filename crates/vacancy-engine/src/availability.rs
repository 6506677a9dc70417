//! Availability evaluation: classify a room as OPEN or OCCUPIED at an instant.
//!
//! Every function here is pure. The inputs are a room's weekly schedule (which
//! may be absent), a teaching day and a time of day; nothing is fetched, cached
//! or logged. Intervals for a day may arrive unsorted and overlapping, so
//! containment is a set test over the whole list and the next start is found
//! by a minimum over the whole list.
//!
//! The boundary rule is a [`BoundaryPolicy`]. The default is half-open
//! (`start <= t < end`): an instant exactly on an interval's end is free.

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::schedule::{OccupiedInterval, Room, Schedule};
use crate::weekday::Weekday;

/// How an instant on an interval boundary is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// `start <= t < end`. The end minute is free.
    #[default]
    HalfOpen,
    /// `start <= t <= end`. The end minute is still occupied (legacy rule).
    InclusiveEnd,
}

impl BoundaryPolicy {
    pub fn contains(self, interval: &OccupiedInterval, instant: TimeOfDay) -> bool {
        match self {
            BoundaryPolicy::HalfOpen => interval.contains(instant),
            BoundaryPolicy::InclusiveEnd => {
                interval.start() <= instant && instant <= interval.end()
            }
        }
    }
}

/// OPEN or OCCUPIED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    Occupied,
}

/// The classification of one room at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusResult {
    /// Free now. `available_until` is the start of the next occupied interval
    /// that day, or `None` when the room stays free for the rest of the day.
    Open {
        #[serde(rename = "availableUntil")]
        available_until: Option<TimeOfDay>,
    },
    /// In use now. Carries the complete interval list for the day, not just
    /// the interval(s) covering the instant.
    Occupied {
        #[serde(rename = "occupiedRanges")]
        occupied_ranges: Vec<OccupiedInterval>,
    },
}

impl StatusResult {
    pub fn status(&self) -> Status {
        match self {
            StatusResult::Open { .. } => Status::Open,
            StatusResult::Occupied { .. } => Status::Occupied,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == Status::Open
    }

    pub fn available_until(&self) -> Option<TimeOfDay> {
        match self {
            StatusResult::Open { available_until } => *available_until,
            StatusResult::Occupied { .. } => None,
        }
    }

    pub fn occupied_ranges(&self) -> &[OccupiedInterval] {
        match self {
            StatusResult::Open { .. } => &[],
            StatusResult::Occupied { occupied_ranges } => occupied_ranges,
        }
    }

    /// For an OCCUPIED result, the latest end among the intervals covering
    /// `instant` under `policy`. `None` for OPEN.
    pub fn occupied_until(&self, instant: TimeOfDay, policy: BoundaryPolicy) -> Option<TimeOfDay> {
        self.occupied_ranges()
            .iter()
            .filter(|interval| policy.contains(interval, instant))
            .map(OccupiedInterval::end)
            .max()
    }
}

/// A [`StatusResult`] labelled with the room it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatus {
    #[serde(rename = "roomNumber")]
    pub room: String,
    #[serde(flatten)]
    pub result: StatusResult,
}

/// Stateless evaluator parameterised by its boundary rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    pub policy: BoundaryPolicy,
}

impl Evaluator {
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }

    /// True iff no interval on `day` contains `instant`.
    pub fn is_available(
        &self,
        schedule: Option<&Schedule>,
        day: Weekday,
        instant: TimeOfDay,
    ) -> bool {
        !day_intervals(schedule, day)
            .iter()
            .any(|interval| self.policy.contains(interval, instant))
    }

    /// Classify the room and compute `availableUntil` / `occupiedRanges`.
    pub fn status_at(
        &self,
        schedule: Option<&Schedule>,
        day: Weekday,
        instant: TimeOfDay,
    ) -> StatusResult {
        let intervals = day_intervals(schedule, day);

        if intervals
            .iter()
            .any(|interval| self.policy.contains(interval, instant))
        {
            return StatusResult::Occupied {
                occupied_ranges: intervals.to_vec(),
            };
        }

        let available_until = intervals
            .iter()
            .map(OccupiedInterval::start)
            .filter(|start| *start > instant)
            .min();

        StatusResult::Open { available_until }
    }

    /// End of the current occupied block, if the room is occupied.
    pub fn occupied_until(
        &self,
        schedule: Option<&Schedule>,
        day: Weekday,
        instant: TimeOfDay,
    ) -> Option<TimeOfDay> {
        self.status_at(schedule, day, instant)
            .occupied_until(instant, self.policy)
    }

    pub fn room_status(&self, room: &Room, day: Weekday, instant: TimeOfDay) -> RoomStatus {
        RoomStatus {
            room: room.room.clone(),
            result: self.status_at(room.schedule(), day, instant),
        }
    }

    /// One [`RoomStatus`] per room, in input order.
    pub fn status_for_all_rooms(
        &self,
        rooms: &[Room],
        day: Weekday,
        instant: TimeOfDay,
    ) -> Vec<RoomStatus> {
        rooms
            .iter()
            .map(|room| self.room_status(room, day, instant))
            .collect()
    }

    /// Parallel [`status_for_all_rooms`](Self::status_for_all_rooms). Output
    /// order still mirrors input order.
    #[cfg(feature = "rayon")]
    pub fn status_for_all_rooms_par(
        &self,
        rooms: &[Room],
        day: Weekday,
        instant: TimeOfDay,
    ) -> Vec<RoomStatus> {
        use rayon::prelude::*;

        rooms
            .par_iter()
            .map(|room| self.room_status(room, day, instant))
            .collect()
    }
}

fn day_intervals(schedule: Option<&Schedule>, day: Weekday) -> &[OccupiedInterval] {
    schedule.map(|s| s.intervals(day)).unwrap_or(&[])
}

/// [`Evaluator::is_available`] under the default half-open rule.
pub fn is_available(schedule: Option<&Schedule>, day: Weekday, instant: TimeOfDay) -> bool {
    Evaluator::default().is_available(schedule, day, instant)
}

/// [`Evaluator::status_at`] under the default half-open rule.
pub fn status_at(schedule: Option<&Schedule>, day: Weekday, instant: TimeOfDay) -> StatusResult {
    Evaluator::default().status_at(schedule, day, instant)
}

/// [`Evaluator::status_for_all_rooms`] under the default half-open rule.
pub fn status_for_all_rooms(rooms: &[Room], day: Weekday, instant: TimeOfDay) -> Vec<RoomStatus> {
    Evaluator::default().status_for_all_rooms(rooms, day, instant)
}
