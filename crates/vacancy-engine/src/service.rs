//! Boundary layer between raw requests and the evaluator.
//!
//! Validates day/time strings before anything else happens, fetches rooms
//! through the repository, evaluates them and records what happened with
//! `tracing`. Invalid input never reaches the repository.

use tracing::{debug, info, warn};

use crate::availability::{BoundaryPolicy, Evaluator, RoomStatus};
use crate::error::Result;
use crate::query::Query;
use crate::repository::RoomRepository;
use crate::schedule::Room;
use crate::search::{self, BuildingMatch};

pub struct AvailabilityService<R> {
    repository: R,
    evaluator: Evaluator,
}

impl<R: RoomRepository> AvailabilityService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            evaluator: Evaluator::default(),
        }
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.evaluator = Evaluator::new(policy);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Status of every room in `building` at the given raw day and time.
    ///
    /// # Errors
    /// `InvalidDay` / `InvalidTime` for bad input (checked before any fetch),
    /// or whatever the repository reports.
    pub fn rooms_with_status(&self, building: &str, day: &str, time: &str) -> Result<Vec<RoomStatus>> {
        let query = self.validate(day, time)?;
        self.rooms_with_status_at(building, query)
    }

    /// [`rooms_with_status`](Self::rooms_with_status) for an already validated query.
    pub fn rooms_with_status_at(&self, building: &str, query: Query) -> Result<Vec<RoomStatus>> {
        let rooms = self.repository.rooms_by_building(building)?;
        debug!(building, day = %query.day, time = %query.instant, rooms = rooms.len(), "evaluating room status");

        #[cfg(feature = "rayon")]
        let statuses = self
            .evaluator
            .status_for_all_rooms_par(&rooms, query.day, query.instant);
        #[cfg(not(feature = "rayon"))]
        let statuses = self
            .evaluator
            .status_for_all_rooms(&rooms, query.day, query.instant);

        let open = statuses.iter().filter(|s| s.result.is_open()).count();
        info!(
            building,
            day = %query.day,
            time = %query.instant,
            open,
            occupied = statuses.len() - open,
            "room status computed"
        );
        Ok(statuses)
    }

    /// Rooms in `building` that are free at the given raw day and time.
    pub fn free_rooms(&self, building: &str, day: &str, time: &str) -> Result<Vec<Room>> {
        let query = self.validate(day, time)?;
        self.free_rooms_at(building, query)
    }

    pub fn free_rooms_at(&self, building: &str, query: Query) -> Result<Vec<Room>> {
        let rooms = self.repository.rooms_by_building(building)?;
        let total = rooms.len();

        let free: Vec<Room> = rooms
            .into_iter()
            .filter(|room| {
                self.evaluator
                    .is_available(room.schedule(), query.day, query.instant)
            })
            .collect();

        info!(building, day = %query.day, time = %query.instant, total, free = free.len(), "free rooms computed");
        Ok(free)
    }

    /// A single room record. Surrounding whitespace in either argument is ignored.
    pub fn room(&self, building: &str, room: &str) -> Result<Option<Room>> {
        let found = self.repository.room(building, room)?;
        if found.is_none() {
            debug!(building, room, "room not found");
        }
        Ok(found)
    }

    pub fn buildings(&self) -> Result<Vec<String>> {
        self.repository.building_names()
    }

    /// Buildings whose name approximately matches `query`, best first.
    pub fn search_buildings(&self, query: &str, max: usize) -> Result<Vec<BuildingMatch>> {
        let names = self.repository.building_names()?;
        let matches = search::search_buildings(&names, query, max);
        debug!(query, candidates = names.len(), matches = matches.len(), "building search");
        Ok(matches)
    }

    fn validate(&self, day: &str, time: &str) -> Result<Query> {
        Query::parse(day, time).inspect_err(|err| {
            warn!(day, time, error = %err, "rejected availability query");
        })
    }
}
