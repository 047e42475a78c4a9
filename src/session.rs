//! One active dashboard: a feed, a control store, and the live channel that
//! feeds them, with explicit construction and teardown.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread;

use parking_lot::Mutex;

use crate::control::{ControlSnapshot, ControlStateStore, PendingChange, SettingsRemote, SettingsSync};
use crate::error::TransportError;
use crate::events::{DashboardEvent, EventSink};
use crate::feed::{ClipDeleter, FeedStore, FeedView, SnapshotIngest, SnapshotLoader};
use crate::live::{ChannelState, LiveEventChannel, LiveSource, LiveTeardown};
use crate::model::{Clip, ClipId, RawClip, SettingValue};

pub type SharedFeed = Arc<Mutex<FeedStore>>;

/// Everything a dashboard needs from the remote store.
pub trait DashboardRemote: SnapshotLoader + ClipDeleter + LiveSource + SettingsRemote {}

impl<T> DashboardRemote for T where T: SnapshotLoader + ClipDeleter + LiveSource + SettingsRemote {}

/// Owns the feed and control stores for one dashboard. Clones share state;
/// mutations are serialized by one mutex per store.
pub struct DashboardSession<R> {
    remote: Arc<R>,
    feed: SharedFeed,
    settings: SettingsSync,
    events: EventSink,
    live: Arc<Mutex<Option<LiveTeardown>>>,
}

impl<R> Clone for DashboardSession<R> {
    fn clone(&self) -> Self {
        Self {
            remote: self.remote.clone(),
            feed: self.feed.clone(),
            settings: self.settings.clone(),
            events: self.events.clone(),
            live: self.live.clone(),
        }
    }
}

impl<R> DashboardSession<R>
where
    R: DashboardRemote + 'static,
{
    pub fn new(remote: Arc<R>) -> (Self, Receiver<DashboardEvent>) {
        let (events, rx) = EventSink::channel();
        let control = Arc::new(Mutex::new(ControlStateStore::new()));
        let settings_remote: Arc<dyn SettingsRemote> = remote.clone();
        let settings = SettingsSync::new(control, settings_remote, events.clone());
        let session = Self {
            remote,
            feed: Arc::new(Mutex::new(FeedStore::new())),
            settings,
            events,
            live: Arc::new(Mutex::new(None)),
        };
        (session, rx)
    }

    pub fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    pub fn feed(&self) -> &SharedFeed {
        &self.feed
    }

    pub fn view(&self) -> FeedView {
        self.feed.lock().view()
    }

    pub fn clip(&self, id: &ClipId) -> Option<Clip> {
        self.feed.lock().get(id).cloned()
    }

    pub fn settings(&self) -> &SettingsSync {
        &self.settings
    }

    pub fn control(&self) -> ControlSnapshot {
        self.settings.store().lock().snapshot()
    }

    pub fn request_change(&self, value: SettingValue) -> PendingChange {
        self.settings.request_change(value)
    }

    pub fn live_state(&self) -> ChannelState {
        self.live
            .lock()
            .as_ref()
            .map(LiveTeardown::state)
            .unwrap_or(ChannelState::Disconnected)
    }

    /// Starts the three independent producers: snapshot load, live
    /// subscription, and settings load. Their outcomes arrive as events.
    pub fn start(&self) -> io::Result<()> {
        let session = self.clone();
        spawn("clipwatch-snapshot", move || {
            let _ = session.load_snapshot();
        })?;

        let session = self.clone();
        spawn("clipwatch-live-pump", move || {
            if let Ok(channel) = session.connect_live() {
                session.pump_live(channel);
            }
        })?;

        let settings = self.settings.clone();
        spawn("clipwatch-settings-load", move || {
            let _ = settings.load();
        })?;
        Ok(())
    }

    /// Loads the snapshot and merges it. On failure the feed keeps whatever it
    /// already had (possibly only live records) and a transport event is emitted.
    pub fn load_snapshot(&self) -> Result<SnapshotIngest, TransportError> {
        let records = self.remote.load().inspect_err(|err| {
            tracing::warn!(error = %err, "snapshot load failed");
            self.events.emit(DashboardEvent::Transport(err.clone()));
        })?;
        let report = self.feed.lock().ingest_snapshot(records);
        self.report_snapshot(&report);
        Ok(report)
    }

    /// Opens a new live channel, tearing down any previous one.
    pub fn connect_live(&self) -> Result<LiveEventChannel, TransportError> {
        if let Some(previous) = self.live.lock().take() {
            previous.disconnect();
        }
        let channel = LiveEventChannel::connect(self.remote.as_ref()).inspect_err(|err| {
            tracing::warn!(error = %err, "live subscription failed");
            self.events.emit(DashboardEvent::Transport(err.clone()));
        })?;
        *self.live.lock() = Some(channel.teardown_handle());
        self.events.emit(DashboardEvent::LiveConnected);
        Ok(channel)
    }

    /// Feeds live records into the feed until the channel disconnects.
    pub fn pump_live(&self, channel: LiveEventChannel) {
        for raw in channel.iter() {
            let id = raw.id.as_deref().map(|id| ClipId::new(id.trim()));
            let outcome = self.feed.lock().ingest_live(raw);
            match (outcome, id) {
                (Ok(true), Some(id)) => {
                    tracing::debug!(%id, "live clip ingested");
                    self.events.emit(DashboardEvent::ClipArrived(id));
                }
                (Ok(_), _) => {}
                (Err(err), _) => {
                    tracing::warn!(error = %err, "rejected live record");
                    self.events.emit(DashboardEvent::Malformed(err));
                }
            }
        }
        if let Some(err) = channel.close_reason() {
            self.events.emit(DashboardEvent::Transport(err));
        }
        self.events.emit(DashboardEvent::LiveDisconnected);
    }

    /// Deletes a clip remotely and removes it locally once acknowledged.
    /// Returns whether the clip was present in the local feed.
    pub fn delete_clip(&self, id: &ClipId) -> Result<bool, TransportError> {
        let ack = self.remote.delete(id).inspect_err(|err| {
            tracing::warn!(%id, error = %err, "delete failed");
            self.events.emit(DashboardEvent::Transport(err.clone()));
        })?;
        let was_present = self.feed.lock().remove(id);
        tracing::info!(%id, ?ack, "delete acknowledged");
        if was_present {
            self.events.emit(DashboardEvent::ClipRemoved(id.clone()));
        }
        Ok(was_present)
    }

    /// Runs [`Self::delete_clip`] on a worker thread.
    pub fn spawn_delete(&self, id: ClipId) -> io::Result<()> {
        let session = self.clone();
        spawn("clipwatch-delete", move || {
            let _ = session.delete_clip(&id);
        })
    }

    /// Full resynchronization: a new live channel plus a fresh snapshot,
    /// swapped in without losing records that arrived during the reload.
    pub fn resync(&self) -> Result<usize, TransportError> {
        if let Some(previous) = self.live.lock().take() {
            previous.disconnect();
        }
        let mark = self.feed.lock().sequence_mark();
        let records = self.reload_for_resync().inspect_err(|_| {
            self.feed.lock().stop_tracking();
        })?;
        let mut fresh = FeedStore::new();
        let report = fresh.ingest_snapshot(records);
        self.report_snapshot(&report);

        let clips = {
            let mut feed = self.feed.lock();
            let carried = fresh.carry_over_since(&feed, mark);
            tracing::debug!(carried, "records carried over during resync");
            *feed = fresh;
            feed.len()
        };
        tracing::info!(clips, "feed resynchronized");
        self.events.emit(DashboardEvent::Resynced { clips });
        Ok(clips)
    }

    fn reload_for_resync(&self) -> Result<Vec<RawClip>, TransportError> {
        let channel = self.connect_live()?;
        let session = self.clone();
        spawn("clipwatch-live-pump", move || session.pump_live(channel))
            .map_err(|err| TransportError::request("start live pump", err))?;

        self.remote.load().inspect_err(|err| {
            self.events.emit(DashboardEvent::Transport(err.clone()));
        })
    }

    /// Tears down the live channel. Outstanding settings requests still
    /// complete and are absorbed by the control store.
    pub fn shutdown(&self) {
        if let Some(live) = self.live.lock().take() {
            live.disconnect();
        }
    }

    fn report_snapshot(&self, report: &SnapshotIngest) {
        tracing::info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            rejected = report.rejected.len(),
            "snapshot merged"
        );
        for err in &report.rejected {
            self.events.emit(DashboardEvent::Malformed(err.clone()));
        }
        self.events.emit(DashboardEvent::SnapshotLoaded {
            inserted: report.inserted,
            duplicates: report.duplicates,
            rejected: report.rejected.len(),
        });
    }
}

fn spawn(name: &str, f: impl FnOnce() + Send + 'static) -> io::Result<()> {
    thread::Builder::new()
        .name(name.to_string())
        .spawn(f)
        .map(|_| ())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
