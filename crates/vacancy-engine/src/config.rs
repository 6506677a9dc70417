//! Runtime configuration.
//!
//! Resolution order: built-in defaults, then a TOML file, then environment
//! variables. Command-line flags are applied on top by the binary.
//!
//! ```toml
//! data_path = "data/room_usage.json"
//! boundary = "half-open"
//! log_filter = "warn"
//! ```
//!
//! # Environment Variables
//!
//! - `VACANCY_DATA`: dataset path
//! - `VACANCY_BOUNDARY`: `half-open` | `inclusive-end`
//! - `VACANCY_LOG`: tracing filter directive (e.g. `vacancy_engine=debug`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::availability::BoundaryPolicy;
use crate::error::{Result, VacancyError};

pub const DATA_ENV: &str = "VACANCY_DATA";
pub const BOUNDARY_ENV: &str = "VACANCY_BOUNDARY";
pub const LOG_ENV: &str = "VACANCY_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON dataset of room records.
    pub data_path: PathBuf,
    #[serde(deserialize_with = "deserialize_boundary")]
    pub boundary: BoundaryPolicy,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/room_usage.json"),
            boundary: BoundaryPolicy::default(),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VacancyError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| VacancyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Defaults, overlaid with `path` when given, overlaid with the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (normally `std::env::var`).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data) = lookup(DATA_ENV) {
            self.data_path = PathBuf::from(data);
        }
        if let Some(boundary) = lookup(BOUNDARY_ENV) {
            self.boundary = parse_boundary(&boundary)?;
        }
        if let Some(filter) = lookup(LOG_ENV) {
            self.log_filter = filter;
        }
        Ok(self)
    }
}

/// Parse `half-open` or `inclusive-end` (case-insensitive).
pub fn parse_boundary(s: &str) -> Result<BoundaryPolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "half-open" => Ok(BoundaryPolicy::HalfOpen),
        "inclusive-end" => Ok(BoundaryPolicy::InclusiveEnd),
        other => Err(VacancyError::Config(format!(
            "unknown boundary policy '{}' (expected half-open or inclusive-end)",
            other
        ))),
    }
}

fn deserialize_boundary<'de, D>(deserializer: D) -> std::result::Result<BoundaryPolicy, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_boundary(&raw).map_err(serde::de::Error::custom)
}
