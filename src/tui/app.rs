use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::events::DashboardEvent;
use crate::feed::FeedView;
use crate::model::{Clip, Setting, SettingValue};
use crate::session::{DashboardRemote, DashboardSession};

const STATUS_KEEP_LAST: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct StatusLine {
    pub(super) text: String,
    pub(super) error: bool,
}

pub(super) struct App<R> {
    pub(super) session: DashboardSession<R>,
    events: Receiver<DashboardEvent>,
    pub(super) selected: usize,
    pub(super) status: VecDeque<StatusLine>,
    pub(super) quit: bool,
}

impl<R: DashboardRemote + 'static> App<R> {
    pub(super) fn new(session: DashboardSession<R>, events: Receiver<DashboardEvent>) -> Self {
        Self {
            session,
            events,
            selected: 0,
            status: VecDeque::new(),
            quit: false,
        }
    }

    pub(super) fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.on_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        let len = self.session.view().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn on_event(&mut self, event: DashboardEvent) {
        let error = event.is_error();
        let text = match event {
            DashboardEvent::SnapshotLoaded {
                inserted, rejected, ..
            } => {
                if rejected > 0 {
                    format!("loaded {} clips ({} rejected)", inserted, rejected)
                } else {
                    format!("loaded {} clips", inserted)
                }
            }
            DashboardEvent::ClipArrived(id) => format!("new clip {}", id),
            DashboardEvent::ClipRemoved(id) => format!("deleted {}", id),
            DashboardEvent::LiveConnected => "live feed connected".to_string(),
            DashboardEvent::LiveDisconnected => {
                "live feed disconnected (press r to resync)".to_string()
            }
            DashboardEvent::SettingsLoaded => "settings loaded".to_string(),
            DashboardEvent::SettingConfirmed(value) => {
                format!("{} set to {}", value.setting(), value)
            }
            DashboardEvent::Resynced { clips } => format!("resynced ({} clips)", clips),
            DashboardEvent::Malformed(err) => err.to_string(),
            DashboardEvent::Transport(err) => err.to_string(),
            DashboardEvent::SettingUpdateFailed(err) => err.to_string(),
        };
        self.push_status(text, error);
    }

    pub(super) fn push_status(&mut self, text: String, error: bool) {
        self.status.push_back(StatusLine { text, error });
        while self.status.len() > STATUS_KEEP_LAST {
            self.status.pop_front();
        }
    }

    pub(super) fn selected_clip(&self, view: &FeedView) -> Option<Clip> {
        view.clips().nth(self.selected).cloned()
    }

    pub(super) fn move_down(&mut self) {
        let len = self.session.view().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub(super) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn toggle_armed(&mut self) {
        if let SettingValue::Armed(armed) = self.effective(Setting::Armed) {
            self.session.request_change(SettingValue::Armed(!armed));
        }
    }

    pub(super) fn toggle_notification(&mut self) {
        if let SettingValue::Notification(on) = self.effective(Setting::Notification) {
            self.session
                .request_change(SettingValue::Notification(!on));
        }
    }

    pub(super) fn raise_sensitivity(&mut self) {
        if let SettingValue::Sensitivity(level) = self.effective(Setting::Sensitivity)
            && level.raised() != level
        {
            self.session
                .request_change(SettingValue::Sensitivity(level.raised()));
        }
    }

    pub(super) fn lower_sensitivity(&mut self) {
        if let SettingValue::Sensitivity(level) = self.effective(Setting::Sensitivity)
            && level.lowered() != level
        {
            self.session
                .request_change(SettingValue::Sensitivity(level.lowered()));
        }
    }

    pub(super) fn delete_selected(&mut self) {
        let view = self.session.view();
        let Some(clip) = self.selected_clip(&view) else {
            return;
        };
        if let Err(err) = self.session.spawn_delete(clip.id.clone()) {
            self.push_status(format!("delete {}: {}", clip.id, err), true);
        } else {
            self.push_status(format!("deleting {}...", clip.id), false);
        }
    }

    pub(super) fn resync(&mut self) {
        let session = self.session.clone();
        let spawned = std::thread::Builder::new()
            .name("clipwatch-resync".to_string())
            .spawn(move || {
                let _ = session.resync();
            });
        match spawned {
            Ok(_) => self.push_status("resynchronizing...".to_string(), false),
            Err(err) => self.push_status(format!("resync: {}", err), true),
        }
    }

    fn effective(&self, setting: Setting) -> SettingValue {
        self.session.control().get(setting).effective()
    }
}

#[cfg(test)]
#[path = "../tests/tui/app_tests.rs"]
mod tests;
