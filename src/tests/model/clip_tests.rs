use super::*;

#[test]
fn decodes_backend_field_names() {
    let raw = RawClip::from_json(
        br#"{"id":"c1","timestamp":"2024-01-02T10:00:00Z","image_filename":"c1.jpg","video_filename":"c1.mp4"}"#,
    );
    let clip = Clip::try_from(raw).unwrap();
    assert_eq!(clip.id, ClipId::new("c1"));
    assert_eq!(clip.image_ref, "c1.jpg");
    assert_eq!(clip.video_ref, "c1.mp4");
}

#[test]
fn either_media_key_is_accepted_and_null_means_absent() {
    let raw = RawClip::from_json(
        br#"{"id":"c1","timestamp":"2024-01-02T10:00:00Z","image_ref":"a.jpg","image_filename":"b.jpg","video_ref":null,"video_filename":"c1.mp4"}"#,
    );
    let clip = Clip::try_from(raw).unwrap();
    assert_eq!(clip.image_ref, "a.jpg");
    assert_eq!(clip.video_ref, "c1.mp4");

    let raw = RawClip::from_json(
        br#"{"id":"c2","timestamp":"2024-01-02T10:00:00Z","image_filename":null,"video_ref":null}"#,
    );
    let clip = Clip::try_from(raw).unwrap();
    assert_eq!(clip.image_ref, "");
    assert_eq!(clip.video_ref, "");
}

#[test]
fn numeric_ids_become_strings() {
    let raw = RawClip::from_json(br#"{"id":42,"timestamp":"2024-01-02T10:00:00Z"}"#);
    assert_eq!(raw.id.as_deref(), Some("42"));
    let clip = Clip::try_from(raw).unwrap();
    assert_eq!(clip.id.as_str(), "42");
    assert_eq!(clip.video_ref, "");
}

#[test]
fn ids_are_trimmed() {
    let clip = Clip::try_from(RawClip::new("  c1 ", "2024-01-02T10:00:00Z", "", "")).unwrap();
    assert_eq!(clip.id.as_str(), "c1");
}

#[test]
fn missing_or_blank_id_is_malformed() {
    let err = Clip::try_from(RawClip::from_json(br#"{"timestamp":"2024-01-02T10:00:00Z"}"#))
        .unwrap_err();
    assert_eq!(err.reason, MalformedReason::MissingId);

    let err = Clip::try_from(RawClip::new("   ", "2024-01-02T10:00:00Z", "", "")).unwrap_err();
    assert_eq!(err.reason, MalformedReason::MissingId);
    assert_eq!(err.id, None);
}

#[test]
fn missing_timestamp_is_malformed() {
    let err = Clip::try_from(RawClip::from_json(br#"{"id":"c1"}"#)).unwrap_err();
    assert_eq!(err.reason, MalformedReason::MissingTimestamp);
    assert_eq!(err.id.as_deref(), Some("c1"));
}

#[test]
fn unparseable_timestamp_is_malformed() {
    let err = Clip::try_from(RawClip::new("c1", "yesterday", "", "")).unwrap_err();
    assert_eq!(
        err.reason,
        MalformedReason::InvalidTimestamp("yesterday".to_string())
    );
    assert_eq!(
        err.to_string(),
        "malformed clip record c1: invalid timestamp \"yesterday\""
    );
}

#[test]
fn undecodable_payloads_are_rejected_not_dropped() {
    let not_json = RawClip::from_json(b"{not json");
    let err = Clip::try_from(not_json).unwrap_err();
    assert!(matches!(err.reason, MalformedReason::InvalidJson(_)));

    // Wrong field type keeps the id for reporting.
    let wrong_type = RawClip::from_value(serde_json::json!({"id": "c9", "timestamp": 5}));
    let err = Clip::try_from(wrong_type).unwrap_err();
    assert!(matches!(err.reason, MalformedReason::InvalidJson(_)));
    assert_eq!(err.id.as_deref(), Some("c9"));

    let not_object = RawClip::from_value(serde_json::json!([1, 2]));
    assert!(Clip::try_from(not_object).is_err());
}
