use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::error::{SettingUpdateFailed, TransportError};
use crate::events::{DashboardEvent, EventSink};
use crate::model::{DeviceSettings, SettingValue};
use crate::remote::RemoteClient;

use super::{AckOutcome, ChangeTicket, ControlStateStore};

pub type SharedControl = Arc<Mutex<ControlStateStore>>;

/// Remote side of the settings engine.
pub trait SettingsRemote: Send + Sync {
    fn fetch_settings(&self) -> Result<DeviceSettings, TransportError>;

    /// `Ok` means the remote store committed the value.
    fn push_setting(&self, value: SettingValue) -> Result<(), TransportError>;
}

impl SettingsRemote for RemoteClient {
    fn fetch_settings(&self) -> Result<DeviceSettings, TransportError> {
        self.get_settings()
    }

    fn push_setting(&self, value: SettingValue) -> Result<(), TransportError> {
        self.put_setting(value).map(|_| ())
    }
}

enum Completion {
    Running(JoinHandle<Result<AckOutcome, SettingUpdateFailed>>),
    Done(Result<AckOutcome, SettingUpdateFailed>),
}

/// An in-flight settings request. Dropping it does not cancel anything: the
/// acknowledgment is still applied when it arrives.
pub struct PendingChange {
    ticket: ChangeTicket,
    completion: Completion,
}

impl PendingChange {
    pub fn ticket(&self) -> ChangeTicket {
        self.ticket
    }

    /// Blocks until the acknowledgment has been applied to the store.
    pub fn wait(self) -> Result<AckOutcome, SettingUpdateFailed> {
        match self.completion {
            Completion::Done(result) => result,
            Completion::Running(handle) => handle.join().unwrap_or_else(|_| {
                Err(SettingUpdateFailed {
                    setting: self.ticket.setting(),
                    attempted: self.ticket.value(),
                    cause: TransportError::request("settings worker", "worker thread panicked"),
                })
            }),
        }
    }
}

/// Drives a [`ControlStateStore`]: fetches the initial values and sends each
/// optimistic change on its own worker thread, applying the acknowledgment
/// under the store's mutex.
#[derive(Clone)]
pub struct SettingsSync {
    store: SharedControl,
    remote: Arc<dyn SettingsRemote>,
    events: EventSink,
}

impl SettingsSync {
    pub fn new(store: SharedControl, remote: Arc<dyn SettingsRemote>, events: EventSink) -> Self {
        Self {
            store,
            remote,
            events,
        }
    }

    pub fn store(&self) -> &SharedControl {
        &self.store
    }

    /// One request for all confirmed values. On failure the store keeps its
    /// neutral defaults and a transport event is emitted.
    pub fn load(&self) -> Result<DeviceSettings, TransportError> {
        let mark = self.store.lock().load_mark();
        match self.remote.fetch_settings() {
            Ok(settings) => {
                self.store.lock().apply_loaded(settings, mark);
                tracing::info!(?settings, "settings loaded");
                self.events.emit(DashboardEvent::SettingsLoaded);
                Ok(settings)
            }
            Err(err) => {
                tracing::warn!(error = %err, "settings load failed");
                self.events.emit(DashboardEvent::Transport(err.clone()));
                Err(err)
            }
        }
    }

    /// Makes `value` the displayed value immediately, then sends it.
    pub fn request_change(&self, value: SettingValue) -> PendingChange {
        let ticket = self.store.lock().begin_change(value);
        tracing::debug!(%value, "setting change requested");

        let worker = self.clone();
        let spawned = thread::Builder::new()
            .name(format!("clipwatch-set-{}", value.setting()))
            .spawn(move || {
                let result = worker.remote.push_setting(value);
                worker.acknowledge(ticket, result)
            });

        let completion = match spawned {
            Ok(handle) => Completion::Running(handle),
            Err(err) => Completion::Done(
                self.acknowledge(ticket, Err(TransportError::request("settings worker", err))),
            ),
        };
        PendingChange { ticket, completion }
    }

    fn acknowledge(
        &self,
        ticket: ChangeTicket,
        result: Result<(), TransportError>,
    ) -> Result<AckOutcome, SettingUpdateFailed> {
        let outcome = self.store.lock().complete_change(ticket, result);
        match &outcome {
            Ok(ack) => {
                tracing::info!(
                    value = %ticket.value(),
                    superseded = !ack.cleared_pending,
                    "setting acknowledged"
                );
                self.events
                    .emit(DashboardEvent::SettingConfirmed(ticket.value()));
            }
            Err(failed) => {
                tracing::warn!(error = %failed, "setting update failed");
                self.events
                    .emit(DashboardEvent::SettingUpdateFailed(failed.clone()));
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "../tests/control/sync_tests.rs"]
mod tests;
