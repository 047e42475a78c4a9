use super::*;

use std::sync::mpsc::Receiver;

use crate::model::{Sensitivity, Setting};

#[derive(Default)]
struct FakeRemote {
    settings: Mutex<DeviceSettings>,
    fail_fetch: bool,
    fail_push: bool,
    // Held by a test to keep pushes in flight.
    hold: Mutex<()>,
    // Held by a test to stall a load after it has read the settings.
    fetch_gate: Mutex<()>,
    fetches: Mutex<usize>,
    pushes: Mutex<Vec<SettingValue>>,
}

impl SettingsRemote for FakeRemote {
    fn fetch_settings(&self) -> Result<DeviceSettings, TransportError> {
        if self.fail_fetch {
            return Err(TransportError::Unauthorized {
                op: "get settings".to_string(),
            });
        }
        let settings = *self.settings.lock();
        *self.fetches.lock() += 1;
        let _gate = self.fetch_gate.lock();
        Ok(settings)
    }

    fn push_setting(&self, value: SettingValue) -> Result<(), TransportError> {
        let _held = self.hold.lock();
        self.pushes.lock().push(value);
        if self.fail_push {
            return Err(TransportError::Status {
                op: format!("set {}", value.setting()),
                status: 503,
            });
        }
        self.settings.lock().apply(value);
        Ok(())
    }
}

fn sync_with(remote: FakeRemote) -> (SettingsSync, Arc<FakeRemote>, Receiver<DashboardEvent>) {
    let remote = Arc::new(remote);
    let (events, rx) = EventSink::channel();
    let sync = SettingsSync::new(
        Arc::new(Mutex::new(ControlStateStore::new())),
        remote.clone(),
        events,
    );
    (sync, remote, rx)
}

#[test]
fn load_installs_remote_values() {
    let remote = FakeRemote::default();
    *remote.settings.lock() = DeviceSettings {
        armed: true,
        sensitivity: Sensitivity::new(4).unwrap(),
        notification: true,
    };
    let (sync, _remote, rx) = sync_with(remote);

    let loaded = sync.load().unwrap();
    assert!(loaded.armed);
    let store = sync.store().lock();
    assert!(store.is_loaded());
    assert_eq!(store.confirmed_settings(), loaded);
    drop(store);
    assert_eq!(rx.try_recv().unwrap(), DashboardEvent::SettingsLoaded);
}

#[test]
fn failed_load_keeps_defaults_and_reports() {
    let (sync, _remote, rx) = sync_with(FakeRemote {
        fail_fetch: true,
        ..FakeRemote::default()
    });

    assert!(sync.load().is_err());
    assert!(!sync.store().lock().is_loaded());
    assert_eq!(
        sync.store().lock().confirmed_settings(),
        DeviceSettings::default()
    );
    assert!(matches!(
        rx.try_recv().unwrap(),
        DashboardEvent::Transport(TransportError::Unauthorized { .. })
    ));
}

#[test]
fn pending_value_is_visible_while_in_flight() {
    let (sync, remote, rx) = sync_with(FakeRemote::default());

    let held = remote.hold.lock();
    let pending = sync.request_change(SettingValue::Armed(true));
    {
        let state = sync.store().lock().state(Setting::Armed);
        assert_eq!(state.confirmed, SettingValue::Armed(false));
        assert_eq!(state.effective(), SettingValue::Armed(true));
    }
    drop(held);

    let ack = pending.wait().unwrap();
    assert!(ack.cleared_pending);
    assert_eq!(
        sync.store().lock().state(Setting::Armed).pending,
        None
    );
    assert!(remote.settings.lock().armed);
    assert_eq!(
        rx.try_recv().unwrap(),
        DashboardEvent::SettingConfirmed(SettingValue::Armed(true))
    );
}

#[test]
fn rejected_change_reverts_and_emits_failure() {
    let (sync, remote, rx) = sync_with(FakeRemote {
        fail_push: true,
        ..FakeRemote::default()
    });

    let level = Sensitivity::new(1).unwrap();
    let err = sync
        .request_change(SettingValue::Sensitivity(level))
        .wait()
        .unwrap_err();
    assert_eq!(err.setting, Setting::Sensitivity);
    assert_eq!(err.attempted, SettingValue::Sensitivity(level));

    let store = sync.store().lock();
    assert_eq!(
        store.effective(Setting::Sensitivity),
        SettingValue::Sensitivity(Sensitivity::default())
    );
    assert!(!store.has_pending(Setting::Sensitivity));
    drop(store);

    assert_eq!(remote.pushes.lock().len(), 1);
    match rx.try_recv().unwrap() {
        DashboardEvent::SettingUpdateFailed(failed) => assert_eq!(failed, err),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn each_request_sends_exactly_once() {
    let (sync, remote, _rx) = sync_with(FakeRemote::default());
    sync.request_change(SettingValue::Notification(true))
        .wait()
        .unwrap();
    sync.request_change(SettingValue::Notification(false))
        .wait()
        .unwrap();
    assert_eq!(
        *remote.pushes.lock(),
        vec![
            SettingValue::Notification(true),
            SettingValue::Notification(false)
        ]
    );
    assert_eq!(
        sync.store().lock().effective(Setting::Notification),
        SettingValue::Notification(false)
    );
}

#[test]
fn late_load_keeps_a_change_acknowledged_meanwhile() {
    let (sync, remote, _rx) = sync_with(FakeRemote::default());

    let gate = remote.fetch_gate.lock();
    let loader = {
        let sync = sync.clone();
        thread::spawn(move || sync.load())
    };
    let start = std::time::Instant::now();
    while *remote.fetches.lock() == 0 {
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
        thread::sleep(std::time::Duration::from_millis(5));
    }

    // The load has read armed=false; the change lands before it returns.
    sync.request_change(SettingValue::Armed(true))
        .wait()
        .unwrap();
    assert!(remote.settings.lock().armed);

    drop(gate);
    let loaded = loader.join().unwrap().unwrap();
    assert!(!loaded.armed);

    let state = sync.store().lock().state(Setting::Armed);
    assert_eq!(state.confirmed, SettingValue::Armed(true));
    assert_eq!(state.pending, None);
    assert!(sync.store().lock().is_loaded());
}
