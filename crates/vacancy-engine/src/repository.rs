//! The data-source seam: where room records come from.
//!
//! The evaluator never fetches anything. Callers obtain rooms through a
//! [`RoomRepository`] first and then evaluate them. [`InMemoryRepository`]
//! serves a semester snapshot loaded from the JSON dataset written by the
//! ingestion step (an array of room records).

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::{Result, VacancyError};
use crate::schedule::Room;

/// Read access to room records, keyed by building and room identifier.
///
/// An unknown building yields an empty list and an unknown room yields
/// `None`; neither is an error. `Err` is reserved for a failing source.
pub trait RoomRepository {
    /// Every room in `building`, in source order.
    fn rooms_by_building(&self, building: &str) -> Result<Vec<Room>>;

    /// A single room by building and room identifier.
    fn room(&self, building: &str, room: &str) -> Result<Option<Room>>;

    /// Distinct building names, sorted ascending.
    fn building_names(&self) -> Result<Vec<String>>;
}

impl<R: RoomRepository + ?Sized> RoomRepository for &R {
    fn rooms_by_building(&self, building: &str) -> Result<Vec<Room>> {
        (**self).rooms_by_building(building)
    }

    fn room(&self, building: &str, room: &str) -> Result<Option<Room>> {
        (**self).room(building, room)
    }

    fn building_names(&self) -> Result<Vec<String>> {
        (**self).building_names()
    }
}

/// Rooms held in memory in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    rooms: Vec<Room>,
    index: HashMap<(String, String), usize>,
}

impl InMemoryRepository {
    /// Build from room records. Records that name the same (building, room)
    /// pair are merged into the first one.
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let mut repo = Self::default();
        for room in rooms {
            repo.insert(room);
        }
        repo
    }

    /// Parse a JSON array of room records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rooms: Vec<Room> = serde_json::from_str(json)?;
        Ok(Self::from_rooms(rooms))
    }

    /// Read and parse a JSON dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| VacancyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, room: Room) {
        let key = (room.building.clone(), room.room.clone());
        match self.index.get(&key) {
            Some(&slot) => self.rooms[slot].merge(room),
            None => {
                self.index.insert(key, self.rooms.len());
                self.rooms.push(room);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl RoomRepository for InMemoryRepository {
    fn rooms_by_building(&self, building: &str) -> Result<Vec<Room>> {
        Ok(self
            .rooms
            .iter()
            .filter(|room| room.building == building)
            .cloned()
            .collect())
    }

    fn room(&self, building: &str, room: &str) -> Result<Option<Room>> {
        let key = (building.trim().to_string(), room.trim().to_string());
        Ok(self.index.get(&key).map(|&slot| self.rooms[slot].clone()))
    }

    fn building_names(&self) -> Result<Vec<String>> {
        let names: BTreeSet<&str> = self.rooms.iter().map(|r| r.building.as_str()).collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}
