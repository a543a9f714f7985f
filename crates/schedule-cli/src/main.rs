//! `schedules` CLI: inspect, edit, and sync schedule files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Create an empty collection for UTC-5
//! schedules new --utc-offset=-5 --name EST -o schedules.json
//!
//! # List every event with its timezone-aware description
//! schedules show -i schedules.json
//!
//! # Move an event to 06:30 on weekdays only, writing the result in place
//! schedules edit -i schedules.json --schedule 0 --event 1 --kind Weekday --time 06:30 \
//!     --day Sat=off --day Sun=off
//!
//! # Turn on DST with the default North-American rule
//! schedules timezone -i schedules.json --dst on
//!
//! # Push to / pull from a device mounted at /mnt/device
//! schedules push -i schedules.json --device /mnt/device
//! schedules pull --device /mnt/device -o schedules.json
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`, falling back to the
//! `log_filter` entry of the config file.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use schedule_editor::display::format_utc_offset;
use schedule_editor::session::parse_time;
use schedule_editor::{
    DirectoryStore, EditableCollection, EditableEvent, EditorSession, OffsetDirection,
};
use schedule_model::days::parse_day;
use schedule_model::{
    deserialize_collection, serialize_collection, EventKind, ScheduleCollection, TimezoneInfo,
};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "schedules", version, about = "Schedule file editor")]
struct Cli {
    /// TOML config file (defaults to ./schedules.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty schedule collection
    New {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Base UTC offset in hours
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        utc_offset: f64,
        /// Timezone name
        #[arg(long)]
        name: Option<String>,
    },
    /// Describe every schedule and event
    Show {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Edit one event and apply the change
    Edit {
        #[command(flatten)]
        file: FileArgs,
        /// Schedule index
        #[arg(long)]
        schedule: usize,
        /// Event index within the schedule
        #[arg(long)]
        event: usize,
        /// Event type: Daily, Weekday, SunriseOffset, SunsetOffset
        #[arg(long)]
        kind: Option<String>,
        /// Time of day in UTC (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Sunrise/sunset offset magnitude in minutes
        #[arg(long)]
        offset: Option<u32>,
        /// Fire before sunrise/sunset
        #[arg(long, conflicts_with = "after")]
        before: bool,
        /// Fire after sunrise/sunset
        #[arg(long)]
        after: bool,
        /// Select or clear a day, e.g. `Mon=on` or `Sat=off` (repeatable)
        #[arg(long = "day")]
        days: Vec<String>,
        /// Action label ("Turn On", "Turn Off") or a custom data token
        #[arg(long)]
        action: Option<String>,
        /// Disable the event
        #[arg(long, conflicts_with = "enable")]
        disable: bool,
        /// Enable the event
        #[arg(long)]
        enable: bool,
    },
    /// Change the collection's timezone
    Timezone {
        #[command(flatten)]
        file: FileArgs,
        /// Base UTC offset in hours
        #[arg(long, allow_negative_numbers = true)]
        utc_offset: Option<f64>,
        /// Daylight saving: on or off
        #[arg(long)]
        dst: Option<String>,
        /// Timezone name
        #[arg(long)]
        name: Option<String>,
    },
    /// Append a schedule
    AddSchedule {
        #[command(flatten)]
        file: FileArgs,
        /// Schedule name (defaults to "Schedule N")
        #[arg(long)]
        name: Option<String>,
    },
    /// Append a daily noon "Turn On" event to a schedule
    AddEvent {
        #[command(flatten)]
        file: FileArgs,
        /// Schedule index
        #[arg(long)]
        schedule: usize,
    },
    /// Remove a schedule
    RemoveSchedule {
        #[command(flatten)]
        file: FileArgs,
        /// Schedule index
        #[arg(long)]
        schedule: usize,
    },
    /// Remove an event from a schedule
    RemoveEvent {
        #[command(flatten)]
        file: FileArgs,
        /// Schedule index
        #[arg(long)]
        schedule: usize,
        /// Event index within the schedule
        #[arg(long)]
        event: usize,
    },
    /// Write a schedule file to the device
    Push {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
        /// Device directory (overrides the config file)
        #[arg(long)]
        device: Option<PathBuf>,
    },
    /// Read the schedule file from the device
    Pull {
        /// Device directory (overrides the config file)
        #[arg(long)]
        device: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Input file plus an optional output file; edits are written in place by default.
#[derive(clap::Args)]
struct FileArgs {
    /// Input file
    #[arg(short, long)]
    input: PathBuf,
    /// Output file (overwrites the input if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();
    debug!(?config, "loaded config");

    match cli.command {
        Commands::New {
            output,
            utc_offset,
            name,
        } => {
            let name = name.unwrap_or_else(|| "UTC".to_string());
            let timezone = TimezoneInfo::fixed(name, utc_offset);
            let json = serialize_collection(&ScheduleCollection::new(timezone))
                .context("Failed to serialize schedules")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Show { input } => {
            let json = read_input(input.as_deref())?;
            let collection = deserialize_collection(&json).context("Failed to parse schedules")?;
            print!("{}", describe(&EditableCollection::new(collection)));
        }
        Commands::Edit {
            file,
            schedule,
            event,
            kind,
            time,
            offset,
            before,
            after,
            days,
            action,
            disable,
            enable,
        } => {
            let mut session = open_session(&file.input)?;
            let target = session
                .collection_mut()
                .schedule_mut(schedule)
                .and_then(|s| s.event_mut(event))
                .with_context(|| format!("No event {event} in schedule {schedule}"))?;

            if let Some(kind) = kind {
                target.set_kind(kind.parse::<EventKind>()?);
            }
            if let Some(time) = time {
                target.set_time(parse_time(&time)?);
            }
            if let Some(minutes) = offset {
                target.set_offset_minutes(minutes);
            }
            if before {
                target.set_offset_direction(OffsetDirection::Before);
            } else if after {
                target.set_offset_direction(OffsetDirection::After);
            }
            for entry in &days {
                let (day, selected) = parse_day_toggle(entry)?;
                target.toggle_weekday(day, selected);
            }
            if let Some(action) = action {
                target.set_action_text(&action);
            }
            if disable {
                target.set_disabled(true);
            } else if enable {
                target.set_disabled(false);
            }

            let edits = session.note_edits();
            debug!(edits, "recorded field edits");
            persist(&mut session, file.output.as_deref())?;

            let updated = session
                .collection()
                .schedule(schedule)
                .and_then(|s| s.event(event));
            if let Some(updated) = updated {
                println!("{}", describe_event(event, updated));
            }
            println!("{}", session.status());
        }
        Commands::Timezone {
            file,
            utc_offset,
            dst,
            name,
        } => {
            let mut session = open_session(&file.input)?;
            if let Some(hours) = utc_offset {
                session.set_utc_offset_hours(hours);
            }
            if let Some(dst) = dst {
                session.set_daylight_saving(parse_switch(&dst)?);
            }
            if let Some(name) = name {
                session.set_timezone_name(name);
            }
            persist(&mut session, file.output.as_deref())?;
            println!("{}", describe_timezone(session.collection().timezone()));
            println!("{}", session.status());
        }
        Commands::AddSchedule { file, name } => {
            let mut session = open_session(&file.input)?;
            let index = session.add_schedule();
            if let Some(name) = name {
                if let Some(added) = session.collection_mut().schedule_mut(index) {
                    added.rename(name);
                }
            }
            persist(&mut session, file.output.as_deref())?;
            println!("Added schedule {index}");
        }
        Commands::AddEvent { file, schedule } => {
            let mut session = open_session(&file.input)?;
            let index = session.add_event(schedule)?;
            persist(&mut session, file.output.as_deref())?;
            println!("Added event {index} to schedule {schedule}");
        }
        Commands::RemoveSchedule { file, schedule } => {
            let mut session = open_session(&file.input)?;
            session.remove_schedule(schedule)?;
            persist(&mut session, file.output.as_deref())?;
            println!("Removed schedule {schedule}");
        }
        Commands::RemoveEvent {
            file,
            schedule,
            event,
        } => {
            let mut session = open_session(&file.input)?;
            session.remove_event(schedule, event)?;
            persist(&mut session, file.output.as_deref())?;
            println!("Removed event {event} from schedule {schedule}");
        }
        Commands::Push { input, device } => {
            let mut store = DirectoryStore::new(config.resolve_device_dir(device.as_deref())?);
            let mut session =
                open_session(&input)?.with_remote_file_name(&config.remote_file_name);
            session
                .save_to_device(&mut store)
                .context("Failed to push schedules")?;
            println!("{}", session.status());
        }
        Commands::Pull { device, output } => {
            let mut store = DirectoryStore::new(config.resolve_device_dir(device.as_deref())?);
            let mut session = EditorSession::new().with_remote_file_name(&config.remote_file_name);
            session
                .load_from_device(&mut store)
                .context("Failed to pull schedules")?;
            match output {
                Some(path) => {
                    session.save_as(&path)?;
                    println!("{}", session.status());
                }
                None => {
                    let json = serialize_collection(&session.collection().to_collection())
                        .context("Failed to serialize schedules")?;
                    print!("{json}");
                }
            }
        }
    }

    Ok(())
}

fn open_session(path: &Path) -> Result<EditorSession> {
    let mut session = EditorSession::new();
    session
        .open(path)
        .with_context(|| format!("Failed to open schedules: {}", path.display()))?;
    Ok(session)
}

/// Save in place, or to `output` when given.
fn persist(session: &mut EditorSession, output: Option<&Path>) -> Result<()> {
    let saved = match output {
        Some(path) => session.save_as(path),
        None => session.save(),
    };
    saved.context("Failed to save schedules")
}

/// Parse `Mon=on`, `friday=off`, or a bare day name (meaning on).
fn parse_day_toggle(entry: &str) -> Result<(chrono::Weekday, bool)> {
    let (day, state) = entry.split_once('=').unwrap_or((entry, "on"));
    Ok((parse_day(day.trim())?, parse_switch(state)?))
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => bail!("Expected on or off, got '{}'", other),
    }
}

fn describe(collection: &EditableCollection) -> String {
    let mut out = format!("{}\n", describe_timezone(collection.timezone()));
    for schedule in collection.schedules() {
        out.push_str(&format!("{}\n", schedule.name()));
        if schedule.is_empty() {
            out.push_str("  (no events)\n");
        }
        for (index, event) in schedule.events().iter().enumerate() {
            out.push_str(&format!("{}\n", describe_event(index, event)));
        }
    }
    out
}

fn describe_timezone(timezone: &TimezoneInfo) -> String {
    let dst = if timezone.daylight_saving.is_some() {
        "DST"
    } else {
        "no DST"
    };
    format!(
        "Timezone: {} ({}, {})",
        timezone.name,
        format_utc_offset(timezone.utc_offset_hours),
        dst
    )
}

fn describe_event(index: usize, event: &EditableEvent) -> String {
    let disabled = if event.effective_disabled() {
        " (disabled)"
    } else {
        ""
    };
    format!(
        "  [{}] {}: {}{}",
        index,
        event.action_text(),
        event.display(),
        disabled
    )
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

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
