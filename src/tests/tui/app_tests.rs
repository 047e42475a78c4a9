use super::*;

use std::io::{BufRead, Cursor};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::control::SettingsRemote;
use crate::error::TransportError;
use crate::feed::{ClipDeleter, SnapshotLoader};
use crate::live::LiveSource;
use crate::model::{ClipId, DeviceSettings, RawClip, Sensitivity};
use crate::remote::DeleteAck;

use super::super::view::{FeedRow, feed_rows, row_of_clip};

#[derive(Default)]
struct StaticRemote {
    settings: Mutex<DeviceSettings>,
}

impl SnapshotLoader for StaticRemote {
    fn load(&self) -> Result<Vec<RawClip>, TransportError> {
        Ok(vec![
            RawClip::new("a", "2024-01-01T10:00:00Z", "", ""),
            RawClip::new("b", "2024-01-02T10:00:00Z", "", ""),
            RawClip::new("c", "2024-01-02T12:00:00Z", "", ""),
        ])
    }
}

impl ClipDeleter for StaticRemote {
    fn delete(&self, _id: &ClipId) -> Result<DeleteAck, TransportError> {
        Ok(DeleteAck::Deleted)
    }
}

impl LiveSource for StaticRemote {
    fn open(&self) -> Result<Box<dyn BufRead + Send>, TransportError> {
        Ok(Box::new(Cursor::new(Vec::new())))
    }
}

impl SettingsRemote for StaticRemote {
    fn fetch_settings(&self) -> Result<DeviceSettings, TransportError> {
        Ok(*self.settings.lock())
    }

    fn push_setting(&self, value: SettingValue) -> Result<(), TransportError> {
        self.settings.lock().apply(value);
        Ok(())
    }
}

fn loaded_app() -> App<StaticRemote> {
    let (session, events) = DashboardSession::new(Arc::new(StaticRemote::default()));
    session.load_snapshot().unwrap();
    let mut app = App::new(session, events);
    app.drain_events();
    app
}

#[test]
fn rows_interleave_day_headers() {
    let app = loaded_app();
    let rows = feed_rows(&app.session.view());
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], FeedRow::Day("2024-01-02 (2)".to_string()));
    assert!(matches!(&rows[1], FeedRow::Clip(c) if c.id.as_str() == "c"));
    assert_eq!(rows[3], FeedRow::Day("2024-01-01 (1)".to_string()));

    assert_eq!(row_of_clip(&rows, 0), Some(1));
    assert_eq!(row_of_clip(&rows, 2), Some(4));
    assert_eq!(row_of_clip(&rows, 3), None);
}

#[test]
fn selection_stays_in_bounds() {
    let mut app = loaded_app();
    app.move_up();
    assert_eq!(app.selected, 0);
    for _ in 0..10 {
        app.move_down();
    }
    assert_eq!(app.selected, 2);
    let view = app.session.view();
    assert_eq!(app.selected_clip(&view).unwrap().id.as_str(), "a");
}

#[test]
fn snapshot_event_lands_in_status() {
    let app = loaded_app();
    let last = app.status.back().unwrap();
    assert_eq!(last.text, "loaded 3 clips");
    assert!(!last.error);
}

#[test]
fn setting_keys_toggle_effective_values() {
    let mut app = loaded_app();
    app.toggle_armed();
    assert_eq!(
        app.session.control().armed.effective(),
        SettingValue::Armed(true)
    );

    app.raise_sensitivity();
    let raised = app.session.control().sensitivity.effective();
    assert_eq!(
        raised,
        SettingValue::Sensitivity(Sensitivity::default().raised())
    );
}

#[test]
fn sensitivity_does_not_go_past_bounds() {
    let remote = StaticRemote::default();
    remote.settings.lock().sensitivity = Sensitivity::new(i64::from(Sensitivity::MIN)).unwrap();
    let (session, events) = DashboardSession::new(Arc::new(remote));
    session.settings().load().unwrap();
    let mut app = App::new(session, events);

    app.lower_sensitivity();
    let control = app.session.control();
    assert_eq!(control.sensitivity.pending, None);
    assert_eq!(
        control.sensitivity.confirmed,
        SettingValue::Sensitivity(Sensitivity::new(1).unwrap())
    );
}
