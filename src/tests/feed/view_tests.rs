use super::*;

use time::macros::date;

use crate::model::ClipTimestamp;

fn clip(id: &str, ts: &str) -> Clip {
    Clip {
        id: ClipId::new(id),
        timestamp: ClipTimestamp::parse(ts).unwrap(),
        image_ref: String::new(),
        video_ref: String::new(),
    }
}

fn group_ids(view: &FeedView) -> Vec<(Date, Vec<&str>)> {
    view.groups
        .iter()
        .map(|g| (g.date, g.clips.iter().map(|c| c.id.as_str()).collect()))
        .collect()
}

#[test]
fn groups_by_day_newest_first() {
    let clips = [
        clip("A", "2024-01-01T10:00:00Z"),
        clip("B", "2024-01-02T09:00:00Z"),
        clip("C", "2024-01-02T11:00:00Z"),
    ];
    let view = FeedView::project(&clips);
    assert_eq!(
        group_ids(&view),
        vec![
            (date!(2024 - 01 - 02), vec!["C", "B"]),
            (date!(2024 - 01 - 01), vec!["A"]),
        ]
    );
    assert_eq!(view.len(), 3);
    assert_eq!(view.position_of(&ClipId::new("A")), Some(2));
}

#[test]
fn equal_timestamps_order_by_id() {
    let clips = [
        clip("b", "2024-01-01T10:00:00Z"),
        clip("a", "2024-01-01T10:00:00Z"),
        clip("c", "2024-01-01T10:00:00+00:00"),
    ];
    let view = FeedView::project(&clips);
    assert_eq!(
        group_ids(&view),
        vec![(date!(2024 - 01 - 01), vec!["a", "b", "c"])]
    );
}

#[test]
fn day_follows_the_recorded_offset() {
    // 23:30 local on the 2nd is already the 3rd in UTC.
    let clips = [
        clip("late-local", "2024-01-02T23:30:00-05:00"),
        clip("utc", "2024-01-03T01:00:00Z"),
    ];
    let view = FeedView::project(&clips);
    assert_eq!(
        group_ids(&view),
        vec![
            (date!(2024 - 01 - 03), vec!["utc"]),
            (date!(2024 - 01 - 02), vec!["late-local"]),
        ]
    );
}

#[test]
fn input_order_is_irrelevant() {
    let mut clips = vec![
        clip("x", "2024-02-01T08:00:00Z"),
        clip("y", "2024-02-01T09:00:00Z"),
        clip("z", "2024-01-31T23:59:59Z"),
    ];
    let forward = FeedView::project(&clips);
    clips.reverse();
    assert_eq!(forward, FeedView::project(&clips));
}

#[test]
fn empty_projection() {
    let view = FeedView::project(std::iter::empty::<&Clip>());
    assert!(view.is_empty());
    assert_eq!(view.len(), 0);
    assert_eq!(view.clips().count(), 0);
}

#[test]
fn serializes_dates_as_strings() {
    let clips = [clip("A", "2024-01-01T10:00:00Z")];
    let json = serde_json::to_value(FeedView::project(&clips)).unwrap();
    assert_eq!(json["groups"][0]["date"], "2024-01-01");
    assert_eq!(json["groups"][0]["clips"][0]["timestamp"], "2024-01-01T10:00:00Z");
}
