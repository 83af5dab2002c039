//! Tests for the half-open interval primitive.

use chrono::{DateTime, TimeZone, Utc};
use overlap_engine::{Interval, OverlapError};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

#[test]
fn new_accepts_ordered_and_empty_spans() {
    assert!(Interval::new(at(9, 0), at(10, 0)).is_ok());

    // start == end is structurally valid: an empty span.
    let empty = Interval::new(at(9, 0), at(9, 0)).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.duration_minutes(), 0);
}

#[test]
fn new_rejects_reversed_endpoints() {
    let result = Interval::new(at(10, 0), at(9, 0));
    assert!(matches!(result, Err(OverlapError::InvalidInterval(_))));
}

#[test]
fn duration_is_reported_in_minutes() {
    let iv = Interval::new(at(9, 0), at(10, 30)).unwrap();
    assert_eq!(iv.duration_minutes(), 90);
}

#[test]
fn overlap_is_strict_for_half_open_ranges() {
    let morning = Interval::new(at(9, 0), at(10, 0)).unwrap();
    let late_morning = Interval::new(at(9, 30), at(11, 0)).unwrap();
    let midday = Interval::new(at(10, 0), at(11, 0)).unwrap();

    assert!(morning.overlaps(&late_morning));
    assert!(late_morning.overlaps(&morning));

    // A shared boundary is NOT an overlap: [09:00,10:00) and [10:00,11:00)
    // share no instant.
    assert!(!morning.overlaps(&midday));
    assert!(!midday.overlaps(&morning));
}
