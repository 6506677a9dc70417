//! Error types for vacancy-engine operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::clock::TimeOfDay;

#[derive(Error, Debug)]
pub enum VacancyError {
    /// Day name outside Monday..Friday.
    #[error("Invalid day: {0}")]
    InvalidDay(String),

    /// Time string that is not a valid zero-padded 24-hour `HH:mm`.
    #[error("Invalid time: {0} (expected HH:mm)")]
    InvalidTime(String),

    /// An occupied interval whose start is not strictly before its end.
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    /// The cause is the error's `source()`, not part of its message.
    #[error("Dataset parse error")]
    Dataset(#[from] serde_json::Error),

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VacancyError {
    /// True for errors caused by the caller's day/time input rather than by
    /// the data source or environment.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDay(_) | Self::InvalidTime(_))
    }
}

pub type Result<T> = std::result::Result<T, VacancyError>;
