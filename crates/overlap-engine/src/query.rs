//! Query orchestration: calendars in, labeled overlap segments out.
//!
//! Ties the pieces together for the two questions the engine answers:
//! "who, exactly, is free (or busy) when?" and "when is the *whole* group
//! simultaneously free (or busy)?". Every function here is a deterministic
//! pure function of its inputs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::calendar::{AccountCalendar, Status};
use crate::error::{OverlapError, Result};
use crate::interval::Interval;
use crate::interval_set::IntervalSet;
use crate::overlap::{aggregate_overlaps, OverlapSegment};

/// An immutable free/busy query descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBusyQuery {
    /// The accounts of interest.
    pub account_ids: BTreeSet<String>,
    /// The bounding window free time is computed against.
    pub window: Interval,
    /// Which status to aggregate.
    pub status: Status,
    /// When true, only segments where *every* requested account is active
    /// are returned.
    pub require_all: bool,
}

/// Aggregate the selected-status intervals of every calendar into overlap
/// segments.
///
/// # Errors
/// Returns `OverlapError::NoAccounts` if `calendars` is empty.
pub fn compute_overlaps(
    calendars: &BTreeMap<String, AccountCalendar>,
    status: Status,
) -> Result<Vec<OverlapSegment>> {
    if calendars.is_empty() {
        return Err(OverlapError::NoAccounts);
    }

    let sets: BTreeMap<String, IntervalSet> = calendars
        .iter()
        .map(|(id, cal)| (id.clone(), cal.intervals_for(status).clone()))
        .collect();

    Ok(aggregate_overlaps(&sets))
}

/// Keep only segments whose account set equals `account_ids` exactly.
///
/// Strict subsets and supersets are both excluded: this answers "when are
/// *all* requested accounts simultaneously in this status", nothing looser.
pub fn filter_whole_group(
    segments: Vec<OverlapSegment>,
    account_ids: &BTreeSet<String>,
) -> Vec<OverlapSegment> {
    segments
        .into_iter()
        .filter(|segment| &segment.accounts == account_ids)
        .collect()
}

/// Answer a [`FreeBusyQuery`] end to end from raw per-account busy pairs.
///
/// Builds one [`AccountCalendar`] per requested account (an account with no
/// entry in `busy_by_account` has an empty busy set, i.e. it is free for the
/// whole window), aggregates the selected status, and applies the
/// whole-group filter when `require_all` is set.
///
/// # Errors
/// - `OverlapError::NoAccounts` if the query names no accounts.
/// - `OverlapError::InvalidInterval` if any busy pair is reversed.
/// - `OverlapError::InvalidWindow` if the query window is reversed.
pub fn run_query(
    query: &FreeBusyQuery,
    busy_by_account: &BTreeMap<String, Vec<(DateTime<Utc>, DateTime<Utc>)>>,
) -> Result<Vec<OverlapSegment>> {
    if query.account_ids.is_empty() {
        return Err(OverlapError::NoAccounts);
    }

    let mut calendars = BTreeMap::new();
    for account_id in &query.account_ids {
        let pairs = busy_by_account
            .get(account_id)
            .cloned()
            .unwrap_or_default();
        let busy = IntervalSet::from_pairs(pairs)?;
        let calendar = AccountCalendar::derive(account_id.clone(), busy, query.window)?;
        calendars.insert(account_id.clone(), calendar);
    }

    let segments = compute_overlaps(&calendars, query.status)?;

    if query.require_all {
        Ok(filter_whole_group(segments, &query.account_ids))
    } else {
        Ok(segments)
    }
}
