//! `poolslots`: resolve a day of pool availability from a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve from a snapshot file, JSON out
//! poolslots resolve -i day.json
//!
//! # Read the snapshot from stdin, override the requester's home pool
//! cat day.json | poolslots resolve --home quayside --format text
//!
//! # Widen the travel buffer to 45 minutes for this pass
//! poolslots resolve -i day.json --travel-buffer 45
//!
//! # List records the engine had to skip or could not place
//! poolslots diagnose -i day.json
//! ```
//!
//! A snapshot looks like:
//!
//! ```json
//! {
//!   "date": "2026-07-04",
//!   "homeResourceId": "quayside",
//!   "config": { "travelBufferMinutes": 30 },
//!   "resources": [{ "id": "tamarind", "name": "Tamarind", "slotDurationMinutes": 60,
//!                   "windowStart": "08:00", "windowEnd": "20:00" }],
//!   "reservations": [{ "id": "r1", "resourceId": "tamarind", "date": "2026-07-04",
//!                      "startTime": "15:00", "endTime": "16:00", "status": "booked" }]
//! }
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pool_availability::{
    resolve_day, DayAvailability, Diagnostic, EngineConfig, ReservationRecord, ResourceRecord,
};
use serde::Deserialize;
use std::io::{self, Read};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "poolslots",
    version,
    about = "Resolve pool slot availability with travel buffers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug events (unattached reservations, pass summary) to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every pool's slots for the snapshot's date
    Resolve {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the records that were skipped or could not be placed
    Diagnose {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
}

#[derive(clap::Args)]
struct SnapshotArgs {
    /// Snapshot file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Date to resolve, YYYY-MM-DD (overrides the snapshot)
    #[arg(long)]
    date: Option<String>,
    /// Requester's home pool id (overrides the snapshot)
    #[arg(long)]
    home: Option<String>,
    /// Travel buffer in minutes, 0 to 1440 (overrides the snapshot config)
    #[arg(long, allow_negative_numbers = true)]
    travel_buffer: Option<i64>,
    /// Fallback slot duration in minutes (overrides the snapshot config)
    #[arg(long)]
    slot_duration: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// A day as exported from the reservation store.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    date: Option<String>,
    #[serde(default, alias = "home_resource_id", alias = "home")]
    home_resource_id: Option<String>,
    #[serde(default)]
    config: EngineConfig,
    #[serde(default)]
    resources: Vec<ResourceRecord>,
    #[serde(default)]
    reservations: Vec<ReservationRecord>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Resolve { snapshot, format } => {
            let day = run_snapshot(&snapshot)?;
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&day)
                    .context("Failed to serialize availability")?,
                Format::Text => render_text(&day),
            };
            println!("{}", rendered);
        }
        Commands::Diagnose { snapshot } => {
            let day = run_snapshot(&snapshot)?;
            if day.diagnostics.is_empty() {
                println!("No issues found for {}", day.date);
            }
            for diagnostic in &day.diagnostics {
                println!("{}", describe(diagnostic));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .init();
}

/// Load the snapshot, apply command-line overrides, and run one pass.
fn run_snapshot(args: &SnapshotArgs) -> Result<DayAvailability> {
    let raw = read_input(args.input.as_deref())?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).context("Failed to parse snapshot JSON")?;

    let raw_date = args
        .date
        .clone()
        .or(snapshot.date)
        .context("No date given: set \"date\" in the snapshot or pass --date")?;
    let date = pool_availability::time::parse_date(&raw_date)?;

    let home = args.home.clone().or(snapshot.home_resource_id);

    let mut config = snapshot.config;
    if let Some(minutes) = args.travel_buffer {
        config = config.with_travel_buffer(minutes);
    }
    if let Some(minutes) = args.slot_duration {
        config = config.with_default_slot_duration(minutes);
    }
    config.validate()?;

    Ok(resolve_day(
        &snapshot.resources,
        &snapshot.reservations,
        date,
        home.as_deref(),
        &config,
    ))
}

/// One line per slot: `<pool> <start>-<end> <status> [reservation]`.
fn render_text(day: &DayAvailability) -> String {
    let width = day
        .resources
        .iter()
        .map(|r| r.resource_id.len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for schedule in &day.resources {
        for slot in &schedule.slots {
            let mut line = format!(
                "{:<width$}  {}-{}  {}",
                schedule.resource_id,
                slot.start_time.format("%H:%M"),
                slot.end_time.format("%H:%M"),
                slot.status,
                width = width
            );
            if let Some(reservation) = &slot.reservation_ref {
                line.push_str(&format!("  ({})", reservation));
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

fn describe(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        Diagnostic::InvalidConfig { message } => format!("config: {}", message),
        Diagnostic::InvalidResource {
            resource_id,
            message,
        } => format!("resource {}: skipped: {}", resource_id, message),
        Diagnostic::MisconfiguredResource {
            resource_id,
            message,
        } => format!("resource {}: no slots: {}", resource_id, message),
        Diagnostic::InvalidReservation {
            reservation_id,
            message,
        } => format!("reservation {}: skipped: {}", reservation_id, message),
        Diagnostic::UnknownResource {
            reservation_id,
            resource_id,
        } => format!(
            "reservation {}: unknown resource {}",
            reservation_id, resource_id
        ),
        Diagnostic::UnattachedReservation {
            reservation_id,
            resource_id,
        } => format!(
            "reservation {}: off the slot grid of {}, blocks nothing",
            reservation_id, resource_id
        ),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
