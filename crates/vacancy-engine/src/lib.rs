//! # vacancy-engine
//!
//! Answers one question for a campus: which rooms in a building are free on a
//! given weekday at a given time of day?
//!
//! The evaluator is a set of pure functions over a room's weekly occupancy
//! schedule. Everything that touches data or input validation sits around it:
//! the repository seam supplies room records, and the service layer parses raw
//! day/time strings, fetches, evaluates and logs.
//!
//! ## Modules
//!
//! - [`availability`] — The evaluator: `is_available`, `status_at`, batch status
//! - [`clock`] — `TimeOfDay`, minute-resolution `HH:mm` wall-clock time
//! - [`weekday`] — Monday..Friday weekday with case-insensitive parsing
//! - [`query`] — Validated (day, time) pair
//! - [`schedule`] — `Room`, `Schedule`, `OccupiedInterval`
//! - [`repository`] — `RoomRepository` trait and an in-memory JSON-backed store
//! - [`search`] — Approximate building-name lookup
//! - [`service`] — Boundary layer: validation, fetch, evaluate, log
//! - [`config`] — TOML/env configuration
//! - [`error`] — Error types

pub mod availability;
pub mod clock;
pub mod config;
pub mod error;
pub mod query;
pub mod repository;
pub mod schedule;
pub mod search;
pub mod service;
pub mod weekday;

pub use availability::{
    is_available, status_at, status_for_all_rooms, BoundaryPolicy, Evaluator, RoomStatus, Status,
    StatusResult,
};
pub use clock::TimeOfDay;
pub use config::Config;
pub use error::{Result, VacancyError};
pub use query::Query;
pub use repository::{InMemoryRepository, RoomRepository};
pub use schedule::{OccupiedInterval, Room, Schedule};
pub use search::{search_buildings, BuildingMatch};
pub use service::AvailabilityService;
pub use weekday::Weekday;
