//! # overlap-engine
//!
//! The availability engine behind "when is everyone free?" queries.
//!
//! Given per-account sets of busy time intervals and a bounding window, the
//! engine derives each account's free intervals and partitions the timeline
//! into maximal segments labeled with the exact set of accounts sharing a
//! status (free or busy) during each segment.
//!
//! Every operation is a pure function over immutable values: the engine
//! performs no I/O, holds no process-wide state, and never mutates its
//! inputs. Fetching raw busy data from a calendar provider and presenting
//! results are the caller's concern.
//!
//! ## Modules
//!
//! - [`interval`] — half-open `[start, end)` ranges over UTC instants
//! - [`interval_set`] — canonical, merged, sorted collections of intervals
//! - [`calendar`] — per-account free/busy derivation within a window
//! - [`overlap`] — sweep-line aggregation into labeled segments
//! - [`query`] — query orchestration and the whole-group filter
//! - [`error`] — error types

pub mod calendar;
pub mod error;
pub mod interval;
pub mod interval_set;
pub mod overlap;
pub mod query;

pub use calendar::{AccountCalendar, Status};
pub use error::OverlapError;
pub use interval::Interval;
pub use interval_set::IntervalSet;
pub use overlap::{aggregate_overlaps, OverlapSegment};
pub use query::{compute_overlaps, filter_whole_group, run_query, FreeBusyQuery};
