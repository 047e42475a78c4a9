//! Notifications from the dashboard engine to its presentation layer.

use std::sync::mpsc;

use crate::error::{MalformedRecordError, SettingUpdateFailed, TransportError};
use crate::model::{ClipId, SettingValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardEvent {
    SnapshotLoaded {
        inserted: usize,
        duplicates: usize,
        rejected: usize,
    },
    ClipArrived(ClipId),
    ClipRemoved(ClipId),
    LiveConnected,
    LiveDisconnected,
    SettingsLoaded,
    SettingConfirmed(SettingValue),
    Resynced {
        clips: usize,
    },
    Malformed(MalformedRecordError),
    Transport(TransportError),
    SettingUpdateFailed(SettingUpdateFailed),
}

impl DashboardEvent {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DashboardEvent::Malformed(_)
                | DashboardEvent::Transport(_)
                | DashboardEvent::SettingUpdateFailed(_)
        )
    }
}

/// Sending half of the event channel. A consumer that hung up is not an
/// error; events are simply dropped.
#[derive(Clone, Debug)]
pub struct EventSink {
    tx: mpsc::Sender<DashboardEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, mpsc::Receiver<DashboardEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: DashboardEvent) {
        if event.is_error() {
            tracing::debug!(?event, "dashboard error event");
        }
        let _ = self.tx.send(event);
    }
}
