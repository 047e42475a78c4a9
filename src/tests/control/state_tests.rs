use super::*;

use crate::model::Sensitivity;

fn failure() -> TransportError {
    TransportError::Status {
        op: "set armed".to_string(),
        status: 503,
    }
}

#[test]
fn starts_at_neutral_defaults() {
    let store = ControlStateStore::new();
    assert!(!store.is_loaded());
    assert_eq!(store.effective(Setting::Armed), SettingValue::Armed(false));
    assert_eq!(
        store.effective(Setting::Sensitivity),
        SettingValue::Sensitivity(Sensitivity::default())
    );
    assert!(!store.has_pending(Setting::Notification));
}

#[test]
fn change_is_visible_before_acknowledgment() {
    let mut store = ControlStateStore::new();
    let ticket = store.begin_change(SettingValue::Armed(true));

    let state = store.state(Setting::Armed);
    assert_eq!(state.confirmed, SettingValue::Armed(false));
    assert_eq!(state.pending, Some(SettingValue::Armed(true)));
    assert_eq!(state.effective(), SettingValue::Armed(true));

    let ack = store.complete_change(ticket, Ok(())).unwrap();
    assert!(ack.cleared_pending);
    assert_eq!(
        store.state(Setting::Armed),
        SettingState {
            confirmed: SettingValue::Armed(true),
            pending: None,
        }
    );
}

#[test]
fn failure_reverts_to_confirmed() {
    let mut store = ControlStateStore::new();
    let ticket = store.begin_change(SettingValue::Armed(true));

    let err = store.complete_change(ticket, Err(failure())).unwrap_err();
    assert_eq!(err.setting, Setting::Armed);
    assert_eq!(err.attempted, SettingValue::Armed(true));
    assert_eq!(err.cause, failure());

    assert_eq!(store.effective(Setting::Armed), SettingValue::Armed(false));
    assert!(!store.has_pending(Setting::Armed));
}

#[test]
fn stale_success_does_not_clobber_newer_intent() {
    let mut store = ControlStateStore::new();
    let first = store.begin_change(SettingValue::Armed(true));
    let second = store.begin_change(SettingValue::Armed(false));

    let ack = store.complete_change(first, Ok(())).unwrap();
    assert!(!ack.cleared_pending);
    let state = store.state(Setting::Armed);
    assert_eq!(state.confirmed, SettingValue::Armed(true));
    assert_eq!(state.pending, Some(SettingValue::Armed(false)));

    let ack = store.complete_change(second, Ok(())).unwrap();
    assert!(ack.cleared_pending);
    assert_eq!(
        store.state(Setting::Armed),
        SettingState {
            confirmed: SettingValue::Armed(false),
            pending: None,
        }
    );
}

#[test]
fn stale_failure_keeps_newer_pending() {
    let mut store = ControlStateStore::new();
    let first = store.begin_change(SettingValue::Armed(true));
    let second = store.begin_change(SettingValue::Armed(true));

    assert!(store.complete_change(first, Err(failure())).is_err());
    assert_eq!(store.state(Setting::Armed).pending, Some(SettingValue::Armed(true)));

    store.complete_change(second, Ok(())).unwrap();
    assert_eq!(store.effective(Setting::Armed), SettingValue::Armed(true));
    assert!(!store.has_pending(Setting::Armed));
}

#[test]
fn settings_are_independent() {
    let mut store = ControlStateStore::new();
    let level = Sensitivity::new(5).unwrap();
    let armed = store.begin_change(SettingValue::Armed(true));
    let sens = store.begin_change(SettingValue::Sensitivity(level));

    assert!(store.complete_change(armed, Err(failure())).is_err());
    store.complete_change(sens, Ok(())).unwrap();

    let snap = store.snapshot();
    assert_eq!(snap.armed.effective(), SettingValue::Armed(false));
    assert_eq!(snap.sensitivity.confirmed, SettingValue::Sensitivity(level));
    assert_eq!(store.confirmed_settings().sensitivity, level);
}

#[test]
fn loading_keeps_outstanding_intents() {
    let mut store = ControlStateStore::new();
    let ticket = store.begin_change(SettingValue::Notification(true));
    let mark = store.load_mark();
    store.apply_loaded(
        DeviceSettings {
            armed: true,
            sensitivity: Sensitivity::new(2).unwrap(),
            notification: false,
        },
        mark,
    );

    assert!(store.is_loaded());
    assert_eq!(store.effective(Setting::Armed), SettingValue::Armed(true));
    assert_eq!(
        store.effective(Setting::Notification),
        SettingValue::Notification(true)
    );
    assert!(!store.confirmed_settings().notification);
    assert!(store.effective_settings().notification);

    store.complete_change(ticket, Ok(())).unwrap();
    assert!(store.confirmed_settings().notification);
}

#[test]
fn load_issued_before_an_acknowledgment_does_not_overwrite_it() {
    let mut store = ControlStateStore::new();
    let mark = store.load_mark();

    let ticket = store.begin_change(SettingValue::Armed(true));
    store.complete_change(ticket, Ok(())).unwrap();

    // The load read the remote before the change landed.
    store.apply_loaded(
        DeviceSettings {
            armed: false,
            sensitivity: Sensitivity::new(4).unwrap(),
            notification: false,
        },
        mark,
    );

    assert!(store.is_loaded());
    assert_eq!(store.effective(Setting::Armed), SettingValue::Armed(true));
    assert_eq!(
        store.effective(Setting::Sensitivity),
        SettingValue::Sensitivity(Sensitivity::new(4).unwrap())
    );
}

#[test]
fn failed_change_after_the_mark_still_takes_the_loaded_value() {
    let mut store = ControlStateStore::new();
    let mark = store.load_mark();

    let ticket = store.begin_change(SettingValue::Armed(false));
    assert!(store.complete_change(ticket, Err(failure())).is_err());

    store.apply_loaded(
        DeviceSettings {
            armed: true,
            ..DeviceSettings::default()
        },
        mark,
    );
    assert_eq!(store.effective(Setting::Armed), SettingValue::Armed(true));
}
