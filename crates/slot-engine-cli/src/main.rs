//! `slotgen` CLI — generate appointment slots for one availability block, or
//! plan a practitioner's day from a file of availability blocks.
//!
//! ## Usage
//!
//! ```sh
//! # 45-minute service in an 08:00-09:00 block, default 30-minute grid
//! slotgen generate --date 2024-01-01 --start 08:00 --end 09:00 --duration 45
//!
//! # Back-to-back slots, JSON output
//! slotgen generate --date 2024-01-01 --start 08:00 --end 12:00 --duration 45 \
//!     --strategy dynamic_duration --json
//!
//! # Strategy from a config file, resolved for one practitioner
//! slotgen generate -c engine.json --practitioner dr-lee \
//!     --date 2024-01-01 --start 08:00 --end 12:00 --duration 30
//!
//! # Plan a practitioner's day from an availability file
//! slotgen plan --availability blocks.json --practitioner dr-lee \
//!     --date 2024-01-01 --duration 30
//!
//! # List available strategies
//! slotgen strategies
//! ```

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{ArgAction, Parser, Subcommand};
use slot_engine::{
    AvailabilityBlock, EngineConfig, ErrorBody, InMemoryAvailability, NoBookings, PolicyTable,
    Slot, SlotError, SlotPlanner, StrategyKind, StrategyResolver,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Parser)]
#[command(name = "slotgen", version, about = "Appointment slot generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate candidate slot starts for one availability block
    Generate {
        /// Calendar date of the block (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Block start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// Block end time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
        /// Service duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: i64,
        /// Strategy to use (overrides the config file)
        #[arg(long)]
        strategy: Option<StrategyKind>,
        /// Grid spacing in minutes for fixed_interval (overrides the config file)
        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<i64>,
        /// Cleanup minutes between services for buffered (overrides the config file)
        #[arg(long, allow_hyphen_values = true)]
        buffer: Option<i64>,
        /// JSON engine config file
        #[arg(short, long)]
        config: Option<String>,
        /// Resolve the strategy for this practitioner's override
        #[arg(short, long)]
        practitioner: Option<String>,
        /// Print slots (and errors) as JSON
        #[arg(long)]
        json: bool,
    },
    /// Plan open slots for one practitioner-day from an availability file
    Plan {
        /// JSON file mapping practitioner id to a list of {date, start, end} blocks
        #[arg(short, long)]
        availability: String,
        /// Practitioner whose day is planned
        #[arg(short, long)]
        practitioner: String,
        /// Calendar date to plan (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Service duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: i64,
        /// JSON engine config file
        #[arg(short, long)]
        config: Option<String>,
        /// Print slots (and errors) as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available slot generation strategies
    Strategies,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (json, path) = match &cli.command {
        Commands::Generate { json, .. } => (*json, "slotgen generate"),
        Commands::Plan { json, .. } => (*json, "slotgen plan"),
        Commands::Strategies => (false, "slotgen strategies"),
    };
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, json, path);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate {
            date,
            start,
            end,
            duration,
            strategy,
            cadence,
            buffer,
            config,
            practitioner,
            json,
        } => {
            let mut engine_config = load_config(config.as_deref())?;
            if let Some(kind) = strategy {
                engine_config.strategy = kind;
            }
            if let Some(minutes) = cadence {
                engine_config.cadence_minutes = minutes;
            }
            if let Some(minutes) = buffer {
                engine_config.buffer_minutes = minutes;
            }

            let table = PolicyTable::from_config(&engine_config)
                .context("Failed to build strategy policy")?;
            let generator = match practitioner.as_deref() {
                Some(id) => table.resolve(id),
                None => table.default_strategy().clone(),
            };

            let slots = generator.generate_theoretical_slots(date, start, end, duration);
            info!(
                strategy = generator.name(),
                %date,
                duration_minutes = duration,
                count = slots.len(),
                "generated slots"
            );

            print_slots(&slots, json)?;
        }
        Commands::Plan {
            availability,
            practitioner,
            date,
            duration,
            config,
            json,
        } => {
            let engine_config = load_config(config.as_deref())?;
            let table = PolicyTable::from_config(&engine_config)
                .context("Failed to build strategy policy")?;
            let source = load_availability(&availability)?;

            let planner = SlotPlanner::new(source, table, NoBookings);
            let slots = planner.plan(&practitioner, date, duration)?;
            print_slots(&slots, json)?;
        }
        Commands::Strategies => {
            for kind in StrategyKind::ALL {
                println!("{:<18} {}", kind.as_str(), describe(kind));
            }
        }
    }

    Ok(())
}

fn print_slots(slots: &[Slot], json: bool) -> Result<()> {
    let formatted: Vec<String> = slots
        .iter()
        .map(|s| s.format(SLOT_FORMAT).to_string())
        .collect();
    if json {
        println!("{}", serde_json::to_string(&formatted)?);
    } else {
        for line in formatted {
            println!("{}", line);
        }
    }
    Ok(())
}

fn describe(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::FixedInterval => "starts on a fixed grid (--cadence, default 30 minutes)",
        StrategyKind::DynamicDuration => "starts back-to-back at the service duration",
        StrategyKind::Buffered => "starts back-to-back with --buffer minutes of cleanup between",
    }
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineConfig::from_json(&raw).with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_availability(path: &str) -> Result<InMemoryAvailability> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read availability file: {}", path))?;
    let blocks: BTreeMap<String, Vec<AvailabilityBlock>> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid availability file: {}", path))?;

    let mut source = InMemoryAvailability::new();
    for (practitioner_id, practitioner_blocks) in blocks {
        for block in practitioner_blocks {
            source.insert(&practitioner_id, block);
        }
    }
    Ok(source)
}

/// Print a failure to stderr; with `--json`, engine errors become an error body.
fn report(err: &anyhow::Error, json: bool, path: &str) {
    if json {
        if let Some(slot_err) = err.downcast_ref::<SlotError>() {
            let body = ErrorBody::new(slot_err, path);
            if let Ok(rendered) = serde_json::to_string(&body) {
                eprintln!("{}", rendered);
                return;
            }
        }
    }
    eprintln!("Error: {:#}", err);
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{}': {}", s, e))
}
