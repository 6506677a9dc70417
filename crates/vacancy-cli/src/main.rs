//! `vacancy` CLI — find free rooms in a campus building.
//!
//! ## Usage
//!
//! ```sh
//! # List buildings in the dataset
//! vacancy --data room_usage.json buildings
//!
//! # Status of every room in a building on Monday at 12:30
//! vacancy --data room_usage.json rooms "Altgeld Hall" --day monday --time 12:30
//!
//! # Only the free rooms, right now, as a table
//! vacancy --format table free "Altgeld Hall" --now
//!
//! # A single room record
//! vacancy room "Altgeld Hall" 314
//!
//! # Find a building when you only know part of its name
//! vacancy search altgeld
//!
//! # Legacy rule: the end minute of a class is still occupied
//! vacancy --boundary inclusive-end rooms "Altgeld Hall" --day Friday --time 09:50
//! ```
//!
//! Configuration comes from `--config <file.toml>` and the `VACANCY_*`
//! environment variables; flags win over both. Logs go to stderr and follow
//! `RUST_LOG`, falling back to the configured `log_filter`.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use vacancy_engine::availability::{BoundaryPolicy, RoomStatus, StatusResult};
use vacancy_engine::search::DEFAULT_MAX_RESULTS;
use vacancy_engine::{AvailabilityService, Config, InMemoryRepository, Query, Room, VacancyError};

#[derive(Parser)]
#[command(
    name = "vacancy",
    version,
    about = "Find free rooms in a campus building"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Room dataset (JSON array of room records)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Boundary rule for an instant equal to a class's end time
    #[arg(long, global = true, value_enum)]
    boundary: Option<BoundaryArg>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Subcommand)]
enum Commands {
    /// List every building in the dataset, sorted
    Buildings,
    /// Show the status of every room in a building
    Rooms {
        building: String,
        #[command(flatten)]
        when: When,
    },
    /// Show only the rooms that are free
    Free {
        building: String,
        #[command(flatten)]
        when: When,
    },
    /// Show one room record (prints `null` when unknown)
    Room { building: String, room: String },
    /// Find buildings by partial or misspelled name, best match first
    Search {
        query: String,
        /// Maximum number of matches
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max: usize,
    },
}

#[derive(Args)]
struct When {
    /// Weekday name, Monday..Friday (case-insensitive)
    #[arg(long, requires = "time", required_unless_present = "now")]
    day: Option<String>,
    /// Time of day, HH:mm (24-hour)
    #[arg(long, requires = "day")]
    time: Option<String>,
    /// Use the current local day and time (weekends map to the nearest weekday)
    #[arg(long, conflicts_with_all = ["day", "time"])]
    now: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BoundaryArg {
    HalfOpen,
    InclusiveEnd,
}

impl From<BoundaryArg> for BoundaryPolicy {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::HalfOpen => BoundaryPolicy::HalfOpen,
            BoundaryArg::InclusiveEnd => BoundaryPolicy::InclusiveEnd,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<VacancyError>() {
            Some(client) if client.is_client_error() => {
                eprintln!("Invalid input: {}", client);
                process::exit(2);
            }
            _ => {
                eprintln!("Error: {:#}", err);
                process::exit(1);
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(boundary) = cli.boundary {
        config.boundary = boundary.into();
    }

    init_logging(&config.log_filter);
    debug!(data = %config.data_path.display(), boundary = ?config.boundary, "configuration resolved");

    match cli.command {
        Commands::Buildings => {
            let buildings = open_service(&config)?.buildings()?;
            match cli.format {
                Format::Json => print_json(&buildings)?,
                Format::Table => {
                    for name in buildings {
                        println!("{}", name);
                    }
                }
            }
        }
        Commands::Rooms { building, when } => {
            let query = resolve_query(&when)?;
            let statuses = open_service(&config)?.rooms_with_status_at(&building, query)?;
            match cli.format {
                Format::Json => print_json(&statuses)?,
                Format::Table => print_status_table(&statuses, query, config.boundary),
            }
        }
        Commands::Free { building, when } => {
            let query = resolve_query(&when)?;
            let rooms = open_service(&config)?.free_rooms_at(&building, query)?;
            match cli.format {
                Format::Json => print_json(&rooms)?,
                Format::Table => {
                    for room in rooms {
                        println!("{}", room.room);
                    }
                }
            }
        }
        Commands::Room { building, room } => {
            let found = open_service(&config)?.room(&building, &room)?;
            match (cli.format, found) {
                (Format::Table, Some(room)) => print_room_table(&room),
                (Format::Table, None) => println!("No such room"),
                (Format::Json, found) => print_json(&found)?,
            }
        }
        Commands::Search { query, max } => {
            let matches = open_service(&config)?.search_buildings(&query, max)?;
            match cli.format {
                Format::Json => print_json(&matches)?,
                Format::Table => {
                    for hit in matches {
                        println!("{:<5.2} {}", hit.score, hit.name);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Called only after the command's own arguments are validated.
fn open_service(config: &Config) -> Result<AvailabilityService<InMemoryRepository>> {
    let repository =
        InMemoryRepository::from_path(&config.data_path).context("Failed to load dataset")?;
    Ok(AvailabilityService::new(repository).with_policy(config.boundary))
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// The current local day and time for `--now`, otherwise the validated
/// `--day`/`--time` pair.
fn resolve_query(when: &When) -> Result<Query> {
    if when.now {
        return Ok(Query::at(chrono::Local::now().naive_local()));
    }
    let day = when.day.as_deref().unwrap_or_default();
    let time = when.time.as_deref().unwrap_or_default();
    Query::parse(day, time).map_err(|err| {
        warn!(day, time, error = %err, "rejected availability query");
        err.into()
    })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", pretty);
    Ok(())
}

fn print_status_table(statuses: &[RoomStatus], query: Query, policy: BoundaryPolicy) {
    println!("{:<10} {:<9} {}", "ROOM", "STATUS", "DETAIL");
    for status in statuses {
        let (label, detail) = match &status.result {
            StatusResult::Open {
                available_until: Some(until),
            } => ("OPEN", format!("free until {}", until.to_12_hour())),
            StatusResult::Open {
                available_until: None,
            } => ("OPEN", "free for rest of day".to_string()),
            StatusResult::Occupied { .. } => {
                let detail = status
                    .result
                    .occupied_until(query.instant, policy)
                    .map(|end| format!("occupied until {}", end.to_12_hour()))
                    .unwrap_or_else(|| "occupied".to_string());
                ("OCCUPIED", detail)
            }
        };
        println!("{:<10} {:<9} {}", status.room, label, detail);
    }
}

fn print_room_table(room: &Room) {
    println!("{} {}", room.building, room.room);
    match room.schedule() {
        None => println!("  no schedule (free all week)"),
        Some(schedule) if schedule.is_empty() => println!("  no classes (free all week)"),
        Some(schedule) => {
            for (day, intervals) in schedule.days() {
                let ranges: Vec<String> = intervals
                    .iter()
                    .map(|iv| format!("{}-{}", iv.start(), iv.end()))
                    .collect();
                println!("  {:<9} {}", day, ranges.join(", "));
            }
        }
    }
    if !room.courses.is_empty() {
        println!("  courses: {}", room.courses.join(", "));
    }
}
