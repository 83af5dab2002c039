//! Per-account free/busy calendars.
//!
//! An `AccountCalendar` holds one account's busy intervals clipped to a
//! bounding window, plus the derived free intervals (`window \ busy`). It is
//! built fresh per query from already-parsed provider data and discarded
//! afterward — nothing is persisted or shared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};
use crate::interval::Interval;
use crate::interval_set::IntervalSet;

/// The axis along which overlap is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Free,
    Busy,
}

impl FromStr for Status {
    type Err = OverlapError;

    /// Parse a status selector. Anything outside `{free, busy}`
    /// (case-insensitive) is rejected — never defaulted.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Status::Free),
            "busy" => Ok(Status::Busy),
            _ => Err(OverlapError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Free => write!(f, "free"),
            Status::Busy => write!(f, "busy"),
        }
    }
}

/// One account's busy and derived-free intervals within a bounding window.
///
/// The busy and free sets are private: both are established at construction
/// and the derived relationship `free == {window} \ busy` must not be
/// breakable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCalendar {
    account_id: String,
    window: Interval,
    busy: IntervalSet,
    free: IntervalSet,
}

impl AccountCalendar {
    /// Build a calendar for one account: clip `busy` to `window` and derive
    /// `free = {window} \ busy`.
    ///
    /// An empty busy set yields `free == {window}` (whole-window
    /// availability); an empty window yields an empty free set regardless of
    /// busy input.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidWindow` if `window.start > window.end`.
    pub fn derive(
        account_id: impl Into<String>,
        busy: IntervalSet,
        window: Interval,
    ) -> Result<Self> {
        if window.start > window.end {
            return Err(OverlapError::InvalidWindow(format!(
                "start {} is after end {}",
                window.start.to_rfc3339(),
                window.end.to_rfc3339()
            )));
        }

        let window_set = IntervalSet::from_interval(window);
        let busy = window_set.intersection(&busy);
        let free = window_set.difference(&busy);

        Ok(AccountCalendar {
            account_id: account_id.into(),
            window,
            busy,
            free,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn window(&self) -> Interval {
        self.window
    }

    /// Busy intervals, clipped to the window.
    pub fn busy(&self) -> &IntervalSet {
        &self.busy
    }

    /// Free intervals: the window minus the busy set.
    pub fn free(&self) -> &IntervalSet {
        &self.free
    }

    /// Select the busy or free set by status.
    pub fn intervals_for(&self, status: Status) -> &IntervalSet {
        match status {
            Status::Free => &self.free,
            Status::Busy => &self.busy,
        }
    }
}
