//! Sweep-line aggregation of many accounts' intervals into labeled segments.
//!
//! Partitions the covered timeline into maximal runs during which the set of
//! active accounts is constant. Uncovered time is absent from the output;
//! shared boundaries between different accounts' intervals never produce
//! zero-width segments.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::interval_set::IntervalSet;

/// A maximal sub-range of time paired with the exact set of accounts active
/// during it.
///
/// Serializes to the external `{ "start": ..., "end": ..., "accounts": [...] }`
/// shape; `accounts` is a `BTreeSet`, so the serialized list is always sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapSegment {
    #[serde(flatten)]
    pub span: Interval,
    pub accounts: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    Open,
    Close,
}

/// Partition the union of all accounts' intervals into maximal
/// constant-account-set segments.
///
/// Interval starts open an account, interval ends close it. All edges at one
/// instant are applied as a batch before the live set is compared against the
/// previous run, so a boundary shared between two accounts hands coverage
/// over continuously instead of emitting an empty-span segment. A segment
/// closes only when the live set actually changes, which makes every emitted
/// run maximal; stretches with no active account are not emitted at all.
///
/// For every instant `t` covered by some input interval, exactly one emitted
/// segment contains `t`, and its `accounts` field is precisely the set of
/// accounts whose interval set contains `t`.
///
/// The `BTreeMap` input keeps edge order (and therefore output) deterministic
/// for identical inputs.
pub fn aggregate_overlaps(sets: &BTreeMap<String, IntervalSet>) -> Vec<OverlapSegment> {
    let mut edges: Vec<(DateTime<Utc>, EdgeKind, &str)> = Vec::new();
    for (account, set) in sets {
        for iv in set {
            edges.push((iv.start, EdgeKind::Open, account.as_str()));
            edges.push((iv.end, EdgeKind::Close, account.as_str()));
        }
    }
    edges.sort_by_key(|&(at, _, _)| at);

    let mut segments = Vec::new();
    let mut live: BTreeSet<String> = BTreeSet::new();
    let mut run_start: Option<DateTime<Utc>> = None;

    let mut i = 0;
    while i < edges.len() {
        let at = edges[i].0;
        let before = live.clone();

        // Apply every edge at this instant as one batch. Each account's
        // intervals are canonical (disjoint, non-adjacent), so an account
        // never opens and closes at the same instant and the batch order is
        // immaterial.
        while i < edges.len() && edges[i].0 == at {
            let (_, kind, account) = edges[i];
            match kind {
                EdgeKind::Open => {
                    live.insert(account.to_string());
                }
                EdgeKind::Close => {
                    live.remove(account);
                }
            }
            i += 1;
        }

        if live != before {
            if let Some(start) = run_start {
                if !before.is_empty() {
                    segments.push(OverlapSegment {
                        span: Interval { start, end: at },
                        accounts: before,
                    });
                }
            }
            run_start = Some(at);
        }
    }

    // Every opened interval was also closed, so the sweep always ends with an
    // empty live set and no dangling run.
    segments
}
