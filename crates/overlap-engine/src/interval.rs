//! Half-open time ranges over UTC instants.
//!
//! An instant is a `chrono::DateTime<Utc>` — callers normalize provider
//! timestamps (RFC 3339 or otherwise) to UTC before anything enters the
//! engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};

/// A half-open time range `[start, end)`.
///
/// `start == end` denotes an empty span: structurally valid, but it carries
/// no duration and contributes nothing to set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Construct an interval, rejecting reversed endpoints.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidInterval` if `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(OverlapError::InvalidInterval(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Interval { start, end })
    }

    /// Whether this interval spans no time at all.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Two half-open intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// A shared boundary (one ends exactly where the other starts) is NOT an
    /// overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Duration of the span in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
