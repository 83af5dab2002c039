//! Tests for sweep-line overlap aggregation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, TimeZone, Utc};
use overlap_engine::{aggregate_overlaps, IntervalSet};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

fn set(pairs: Vec<(DateTime<Utc>, DateTime<Utc>)>) -> IntervalSet {
    IntervalSet::from_pairs(pairs).unwrap()
}

fn accounts(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn no_accounts_no_segments() {
    let segments = aggregate_overlaps(&BTreeMap::new());
    assert!(segments.is_empty());
}

#[test]
fn single_account_single_interval() {
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(10, 0))]));

    let segments = aggregate_overlaps(&sets);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].span.start, at(9, 0));
    assert_eq!(segments[0].span.end, at(10, 0));
    assert_eq!(segments[0].accounts, accounts(&["alice"]));
}

#[test]
fn partial_overlap_produces_three_segments() {
    // alice [09:00, 11:00), bob [10:00, 12:00)
    // → [09:00,10:00) {alice}, [10:00,11:00) {alice,bob}, [11:00,12:00) {bob}
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(11, 0))]));
    sets.insert("bob".to_string(), set(vec![(at(10, 0), at(12, 0))]));

    let segments = aggregate_overlaps(&sets);

    assert_eq!(segments.len(), 3);

    assert_eq!(segments[0].span.start, at(9, 0));
    assert_eq!(segments[0].span.end, at(10, 0));
    assert_eq!(segments[0].accounts, accounts(&["alice"]));

    assert_eq!(segments[1].span.start, at(10, 0));
    assert_eq!(segments[1].span.end, at(11, 0));
    assert_eq!(segments[1].accounts, accounts(&["alice", "bob"]));

    assert_eq!(segments[2].span.start, at(11, 0));
    assert_eq!(segments[2].span.end, at(12, 0));
    assert_eq!(segments[2].accounts, accounts(&["bob"]));
}

#[test]
fn shared_boundary_hands_over_without_gap_or_zero_width_segment() {
    // alice ends exactly where bob starts: coverage must be continuous and
    // no empty-span segment may appear at 10:00.
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(10, 0))]));
    sets.insert("bob".to_string(), set(vec![(at(10, 0), at(11, 0))]));

    let segments = aggregate_overlaps(&sets);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].span.end, at(10, 0));
    assert_eq!(segments[1].span.start, at(10, 0));
    assert_eq!(segments[0].accounts, accounts(&["alice"]));
    assert_eq!(segments[1].accounts, accounts(&["bob"]));
    assert!(segments.iter().all(|s| !s.span.is_empty()));
}

#[test]
fn uncovered_gaps_are_absent_from_output() {
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(10, 0)), (at(14, 0), at(15, 0))]));

    let segments = aggregate_overlaps(&sets);

    // Nothing represents [10:00, 14:00): no empty-set segment is emitted.
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].span.end, at(10, 0));
    assert_eq!(segments[1].span.start, at(14, 0));
}

#[test]
fn identical_intervals_collapse_to_one_segment() {
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(10, 0))]));
    sets.insert("bob".to_string(), set(vec![(at(9, 0), at(10, 0))]));

    let segments = aggregate_overlaps(&sets);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].accounts, accounts(&["alice", "bob"]));
}

#[test]
fn three_accounts_cascading_overlaps() {
    // alice [09:00, 10:30), bob [10:00, 11:30), carol [11:00, 12:00)
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(10, 30))]));
    sets.insert("bob".to_string(), set(vec![(at(10, 0), at(11, 30))]));
    sets.insert("carol".to_string(), set(vec![(at(11, 0), at(12, 0))]));

    let segments = aggregate_overlaps(&sets);

    let expected = vec![
        (at(9, 0), at(10, 0), accounts(&["alice"])),
        (at(10, 0), at(10, 30), accounts(&["alice", "bob"])),
        (at(10, 30), at(11, 0), accounts(&["bob"])),
        (at(11, 0), at(11, 30), accounts(&["bob", "carol"])),
        (at(11, 30), at(12, 0), accounts(&["carol"])),
    ];

    assert_eq!(segments.len(), expected.len());
    for (segment, (start, end, ids)) in segments.iter().zip(expected) {
        assert_eq!(segment.span.start, start);
        assert_eq!(segment.span.end, end);
        assert_eq!(segment.accounts, ids);
    }
}

#[test]
fn segment_spans_are_disjoint_and_sorted() {
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(12, 0))]));
    sets.insert("bob".to_string(), set(vec![(at(10, 0), at(10, 30)), (at(11, 0), at(13, 0))]));
    sets.insert("carol".to_string(), set(vec![(at(9, 30), at(11, 30))]));

    let segments = aggregate_overlaps(&sets);

    for pair in segments.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
}

#[test]
fn segment_union_equals_input_union() {
    let alice = set(vec![(at(9, 0), at(10, 0)), (at(13, 0), at(14, 0))]);
    let bob = set(vec![(at(9, 30), at(11, 0))]);

    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), alice.clone());
    sets.insert("bob".to_string(), bob.clone());

    let segments = aggregate_overlaps(&sets);

    let covered =
        IntervalSet::from_pairs(segments.iter().map(|s| (s.span.start, s.span.end))).unwrap();
    assert_eq!(covered, alice.union(&bob));
}

#[test]
fn segment_serializes_to_external_shape() {
    let mut sets = BTreeMap::new();
    sets.insert("alice".to_string(), set(vec![(at(9, 0), at(10, 0))]));
    sets.insert("bob".to_string(), set(vec![(at(9, 0), at(10, 0))]));

    let segments = aggregate_overlaps(&sets);
    let json = serde_json::to_value(&segments[0]).unwrap();

    assert_eq!(json["start"], "2026-03-02T09:00:00Z");
    assert_eq!(json["end"], "2026-03-02T10:00:00Z");
    assert_eq!(json["accounts"], serde_json::json!(["alice", "bob"]));
}
