use super::*;

use time::macros::{date, datetime};

#[test]
fn parses_rfc3339_with_offset() {
    let ts = ClipTimestamp::parse("2024-01-02T23:30:00+02:00").unwrap();
    assert_eq!(ts.datetime(), datetime!(2024-01-02 23:30:00 +02:00));
    // Day is taken in the recorded offset, not UTC.
    assert_eq!(ts.day(), date!(2024 - 01 - 02));
}

#[test]
fn parses_legacy_forms_as_utc() {
    let dashed = ClipTimestamp::parse("2025-03-11 23-46-30").unwrap();
    let colon = ClipTimestamp::parse("2025-03-11 23:46:30").unwrap();
    assert_eq!(dashed, colon);
    assert_eq!(dashed.datetime(), datetime!(2025-03-11 23:46:30 UTC));
}

#[test]
fn rejects_garbage() {
    assert!(ClipTimestamp::parse("yesterday").is_none());
    assert!(ClipTimestamp::parse("").is_none());
    assert!(ClipTimestamp::parse("2024-13-01T00:00:00Z").is_none());
}

#[test]
fn orders_by_instant_across_offsets() {
    let a = ClipTimestamp::parse("2024-01-02T00:30:00+02:00").unwrap();
    let b = ClipTimestamp::parse("2024-01-01T23:00:00Z").unwrap();
    // a is 22:30 UTC on the 1st, so it is earlier than b.
    assert!(a < b);
}

#[test]
fn displays_as_rfc3339() {
    let ts = ClipTimestamp::parse("2024-01-02 10-00-00").unwrap();
    assert_eq!(ts.to_string(), "2024-01-02T10:00:00Z");
    assert_eq!(
        serde_json::to_value(ts).unwrap(),
        serde_json::json!("2024-01-02T10:00:00Z")
    );
}
