//! Canonical collections of disjoint intervals.
//!
//! An `IntervalSet` is always in canonical form: sorted ascending by start,
//! pairwise non-overlapping, and non-adjacent. Intervals that overlap or
//! merely touch at a boundary are merged on construction, so the complement
//! of a busy set never contains zero-width gaps.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::interval::Interval;

/// A canonical (sorted, merged, disjoint) set of half-open intervals.
///
/// Construction always goes through canonicalization, so the invariant holds
/// for every value of this type; re-canonicalizing is a no-op. There is
/// deliberately no `Deserialize` impl — external input enters via
/// [`IntervalSet::from_pairs`], which validates and normalizes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// The empty set: identity for union, absorbing on the right of
    /// difference.
    pub fn empty() -> Self {
        IntervalSet::default()
    }

    /// A set containing a single interval (or nothing, if the interval is
    /// empty).
    pub fn from_interval(interval: Interval) -> Self {
        if interval.is_empty() {
            IntervalSet::empty()
        } else {
            IntervalSet {
                intervals: vec![interval],
            }
        }
    }

    /// Build a canonical set from raw `(start, end)` pairs.
    ///
    /// Pairs may arrive unsorted, overlapping, touching, or empty; the result
    /// is sorted with overlapping and adjacent pairs merged in a single
    /// left-to-right sweep. Idempotent: feeding `to_pairs()` back in yields
    /// an equal set.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidInterval` if any pair has `start > end`.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
    {
        let mut intervals = Vec::new();
        for (start, end) in pairs {
            intervals.push(Interval::new(start, end)?);
        }
        Ok(IntervalSet {
            intervals: canonicalize(intervals),
        })
    }

    /// Export the set as `(start, end)` pairs. Exact inverse of
    /// [`IntervalSet::from_pairs`] for already-canonical input.
    pub fn to_pairs(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.intervals.iter().map(|iv| (iv.start, iv.end)).collect()
    }

    /// Set union: concatenate and re-canonicalize. Commutative and
    /// idempotent.
    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        let mut combined = self.intervals.clone();
        combined.extend_from_slice(&other.intervals);
        IntervalSet {
            intervals: canonicalize(combined),
        }
    }

    /// Set difference `self \ other`.
    ///
    /// Each interval of `self` loses every overlapping portion of `other`,
    /// leaving zero, one, or two residual sub-intervals per subtraction
    /// (zero when fully covered, two when the subtrahend is strictly
    /// interior).
    pub fn difference(&self, other: &IntervalSet) -> IntervalSet {
        let mut residuals = Vec::new();
        for a in &self.intervals {
            let mut cursor = a.start;
            for b in &other.intervals {
                if b.end <= cursor {
                    continue;
                }
                if b.start >= a.end {
                    break;
                }
                if b.start > cursor {
                    residuals.push(Interval {
                        start: cursor,
                        end: b.start,
                    });
                }
                cursor = cursor.max(b.end);
                if cursor >= a.end {
                    break;
                }
            }
            if cursor < a.end {
                residuals.push(Interval {
                    start: cursor,
                    end: a.end,
                });
            }
        }
        // Residuals of a canonical minuend are already disjoint, sorted, and
        // non-adjacent; subtraction only shrinks gaps, never closes them.
        IntervalSet {
            intervals: residuals,
        }
    }

    /// Set intersection, restated via difference: `a ∩ b = a \ (a \ b)`.
    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        self.difference(&self.difference(other))
    }

    /// Whether the set contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of disjoint intervals in the set.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Iterate the intervals in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Sort intervals and merge overlapping or adjacent ones in one sweep.
/// Empty spans are dropped — they contribute nothing to set operations.
fn canonicalize(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.retain(|iv| !iv.is_empty());
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                // Overlapping or touching — extend the current interval.
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}
