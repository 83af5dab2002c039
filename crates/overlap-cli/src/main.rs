//! `overlap` CLI — free/busy overlap queries from the command line.
//!
//! Reads a free/busy document (the shape returned by calendar providers'
//! free/busy endpoints) and answers availability questions through the
//! overlap engine.
//!
//! ## Usage
//!
//! ```sh
//! # When is anyone free between 9 and 11?
//! overlap query -i freebusy.json --start 2026-03-02T09:00:00Z --end 2026-03-02T11:00:00Z
//!
//! # When is *everyone* free?
//! overlap query -i freebusy.json --all --start ... --end ...
//!
//! # Who is busy, and when?
//! overlap query -i freebusy.json --status busy --start ... --end ...
//!
//! # Restrict to two people, expanding bare usernames with a mail suffix
//! overlap query -i freebusy.json --accounts alice,bob --suffix @example.edu
//!
//! # Per-account free intervals (stdin → stdout)
//! cat freebusy.json | overlap free --start ... --end ...
//! ```
//!
//! The input document looks like:
//!
//! ```json
//! { "calendars": { "alice@example.edu": { "busy": [
//!     { "start": "2026-03-02T09:00:00Z", "end": "2026-03-02T10:00:00Z" }
//! ] } } }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, DurationRound, Timelike, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use overlap_engine::{run_query, AccountCalendar, FreeBusyQuery, Interval, IntervalSet, Status};

#[derive(Parser)]
#[command(name = "overlap", version, about = "Free/busy overlap queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute overlap segments across accounts
    Query {
        /// Input free/busy document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Status to aggregate: "free" or "busy"
        #[arg(long, default_value = "free")]
        status: String,
        /// Only emit segments where every requested account is active
        #[arg(long)]
        all: bool,
        /// Comma-separated account names (default: every account in the document)
        #[arg(long)]
        accounts: Option<String>,
        /// Suffix appended to each requested account name (e.g. "@example.edu")
        #[arg(long, default_value = "")]
        suffix: String,
        /// Window start, RFC 3339 (default: now, rounded to the nearest hour)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// Window end, RFC 3339 (default: one hour after the window start)
        #[arg(long)]
        end: Option<DateTime<Utc>>,
    },
    /// Derive each account's free intervals within the window
    Free {
        /// Input free/busy document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start, RFC 3339 (default: now, rounded to the nearest hour)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// Window end, RFC 3339 (default: one hour after the window start)
        #[arg(long)]
        end: Option<DateTime<Utc>>,
    },
}

/// The provider-shaped free/busy document.
#[derive(Debug, Deserialize)]
struct FreeBusyDocument {
    calendars: BTreeMap<String, CalendarEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CalendarEntry {
    #[serde(default)]
    busy: Vec<TimeRange>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Per-account report for the `free` subcommand: busy plus derived free.
#[derive(Debug, Serialize)]
struct FreeBusyReport {
    calendars: BTreeMap<String, ReportEntry>,
}

#[derive(Debug, Serialize)]
struct ReportEntry {
    busy: Vec<TimeRange>,
    free: Vec<TimeRange>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            input,
            output,
            status,
            all,
            accounts,
            suffix,
            start,
            end,
        } => {
            let document = read_document(input.as_deref())?;
            let window = resolve_window(start, end)?;
            let status: Status = status.parse()?;

            let account_ids = requested_accounts(&document, accounts.as_deref(), &suffix);
            let busy_by_account = busy_pairs(&document);

            let query = FreeBusyQuery {
                account_ids,
                window,
                status,
                require_all: all,
            };
            let segments =
                run_query(&query, &busy_by_account).context("Failed to run overlap query")?;

            write_output(output.as_deref(), &serde_json::to_string_pretty(&segments)?)?;
        }
        Commands::Free {
            input,
            output,
            start,
            end,
        } => {
            let document = read_document(input.as_deref())?;
            let window = resolve_window(start, end)?;

            let mut calendars = BTreeMap::new();
            for (account_id, entry) in &document.calendars {
                let busy =
                    IntervalSet::from_pairs(entry.busy.iter().map(|r| (r.start, r.end)))
                        .with_context(|| format!("Invalid busy interval for '{}'", account_id))?;
                let calendar = AccountCalendar::derive(account_id.clone(), busy, window)
                    .context("Failed to derive free intervals")?;
                calendars.insert(
                    account_id.clone(),
                    ReportEntry {
                        busy: ranges(calendar.busy()),
                        free: ranges(calendar.free()),
                    },
                );
            }

            let report = FreeBusyReport { calendars };
            write_output(output.as_deref(), &serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

/// Resolve the bounding window, defaulting to the next round hour for one
/// hour — the "can we meet right now-ish?" query. Window validation happens
/// in the engine when calendars are derived.
fn resolve_window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<Interval> {
    let start = match start {
        Some(start) => start,
        None => nearest_hour(Utc::now())?,
    };
    let end = end.unwrap_or(start + Duration::hours(1));
    Ok(Interval { start, end })
}

/// Round to the nearest whole hour: minute 31 and later rounds up.
fn nearest_hour(at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let floor = at
        .duration_trunc(Duration::hours(1))
        .context("Failed to round window start")?;
    if at.minute() > 30 {
        Ok(floor + Duration::hours(1))
    } else {
        Ok(floor)
    }
}

/// The accounts to query: an explicit `--accounts` list with the suffix
/// appended to each name, or every account in the document.
fn requested_accounts(
    document: &FreeBusyDocument,
    accounts: Option<&str>,
    suffix: &str,
) -> BTreeSet<String> {
    match accounts {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| format!("{}{}", name, suffix))
            .collect(),
        None => document.calendars.keys().cloned().collect(),
    }
}

fn busy_pairs(
    document: &FreeBusyDocument,
) -> BTreeMap<String, Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    document
        .calendars
        .iter()
        .map(|(id, entry)| {
            (
                id.clone(),
                entry.busy.iter().map(|r| (r.start, r.end)).collect(),
            )
        })
        .collect()
}

fn ranges(set: &IntervalSet) -> Vec<TimeRange> {
    set.iter()
        .map(|iv| TimeRange {
            start: iv.start,
            end: iv.end,
        })
        .collect()
}

fn read_document(path: Option<&str>) -> Result<FreeBusyDocument> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse free/busy document")
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
