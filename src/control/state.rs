use serde::Serialize;

use crate::error::{SettingUpdateFailed, TransportError};
use crate::model::{DeviceSettings, Setting, SettingValue};

/// Confirmed value plus the unacknowledged local intent, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SettingState {
    pub confirmed: SettingValue,
    pub pending: Option<SettingValue>,
}

impl SettingState {
    /// What a consumer should display: the pending intent, else the confirmed value.
    pub fn effective(&self) -> SettingValue {
        self.pending.unwrap_or(self.confirmed)
    }
}

/// Identifies one `request_change` so its acknowledgment can be matched
/// against the pending intent it created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChangeTicket {
    value: SettingValue,
    serial: u64,
}

impl ChangeTicket {
    pub fn setting(&self) -> Setting {
        self.value.setting()
    }

    pub fn value(&self) -> SettingValue {
        self.value
    }
}

/// A committed acknowledgment. `cleared_pending` is false when a newer
/// request still owns the pending slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AckOutcome {
    pub cleared_pending: bool,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    confirmed: SettingValue,
    pending: Option<(u64, SettingValue)>,
    // Serial of the newest successful acknowledgment.
    acked: Option<u64>,
}

impl Slot {
    fn new(confirmed: SettingValue) -> Self {
        Self {
            confirmed,
            pending: None,
            acked: None,
        }
    }

    fn state(&self) -> SettingState {
        SettingState {
            confirmed: self.confirmed,
            pending: self.pending.map(|(_, v)| v),
        }
    }

    // Clears pending only when it still belongs to `serial`.
    fn release(&mut self, serial: u64) -> bool {
        match self.pending {
            Some((owner, _)) if owner == serial => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

/// All three settings at one instant, for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ControlSnapshot {
    pub armed: SettingState,
    pub sensitivity: SettingState,
    pub notification: SettingState,
    pub loaded: bool,
}

impl ControlSnapshot {
    pub fn get(&self, setting: Setting) -> SettingState {
        match setting {
            Setting::Armed => self.armed,
            Setting::Sensitivity => self.sensitivity,
            Setting::Notification => self.notification,
        }
    }
}

/// Per-setting `(confirmed, pending)` pairs.
///
/// This type is the synchronous state machine; [`super::SettingsSync`] drives
/// the remote side and feeds acknowledgments back through
/// [`ControlStateStore::complete_change`].
#[derive(Clone, Debug)]
pub struct ControlStateStore {
    armed: Slot,
    sensitivity: Slot,
    notification: Slot,
    next_serial: u64,
    loaded: bool,
}

impl Default for ControlStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlStateStore {
    /// Every setting starts at its neutral default with nothing pending.
    pub fn new() -> Self {
        let defaults = DeviceSettings::default();
        Self {
            armed: Slot::new(defaults.value_of(Setting::Armed)),
            sensitivity: Slot::new(defaults.value_of(Setting::Sensitivity)),
            notification: Slot::new(defaults.value_of(Setting::Notification)),
            next_serial: 0,
            loaded: false,
        }
    }

    /// Records a new local intent, superseding any outstanding one for the
    /// same setting. The caller sends the change and later reports the
    /// acknowledgment with the returned ticket.
    pub fn begin_change(&mut self, value: SettingValue) -> ChangeTicket {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.slot_mut(value.setting()).pending = Some((serial, value));
        ChangeTicket { value, serial }
    }

    /// Applies an acknowledgment in arrival order.
    ///
    /// Success always confirms the ticket's value; failure leaves `confirmed`
    /// alone. Either way the pending slot is only cleared if this ticket still
    /// owns it.
    pub fn complete_change(
        &mut self,
        ticket: ChangeTicket,
        result: Result<(), TransportError>,
    ) -> Result<AckOutcome, SettingUpdateFailed> {
        let slot = self.slot_mut(ticket.setting());
        let cleared_pending = slot.release(ticket.serial);
        match result {
            Ok(()) => {
                slot.confirmed = ticket.value;
                slot.acked = Some(slot.acked.map_or(ticket.serial, |s| s.max(ticket.serial)));
                Ok(AckOutcome { cleared_pending })
            }
            Err(cause) => Err(SettingUpdateFailed {
                setting: ticket.setting(),
                attempted: ticket.value,
                cause,
            }),
        }
    }

    /// Taken when a settings load is issued; pass it back to
    /// [`Self::apply_loaded`].
    pub fn load_mark(&self) -> u64 {
        self.next_serial
    }

    /// Installs the values fetched by a load issued at `mark`. Pending intents
    /// are kept, and a setting acknowledged at or after `mark` keeps its
    /// confirmed value since the load may predate it.
    pub fn apply_loaded(&mut self, settings: DeviceSettings, mark: u64) {
        for setting in Setting::ALL {
            let slot = self.slot_mut(setting);
            if slot.acked.is_some_and(|serial| serial >= mark) {
                continue;
            }
            slot.confirmed = settings.value_of(setting);
        }
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn state(&self, setting: Setting) -> SettingState {
        self.slot(setting).state()
    }

    pub fn effective(&self, setting: Setting) -> SettingValue {
        self.state(setting).effective()
    }

    pub fn has_pending(&self, setting: Setting) -> bool {
        self.slot(setting).pending.is_some()
    }

    pub fn confirmed_settings(&self) -> DeviceSettings {
        let mut out = DeviceSettings::default();
        for setting in Setting::ALL {
            out.apply(self.slot(setting).confirmed);
        }
        out
    }

    pub fn effective_settings(&self) -> DeviceSettings {
        let mut out = DeviceSettings::default();
        for setting in Setting::ALL {
            out.apply(self.effective(setting));
        }
        out
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            armed: self.armed.state(),
            sensitivity: self.sensitivity.state(),
            notification: self.notification.state(),
            loaded: self.loaded,
        }
    }

    fn slot(&self, setting: Setting) -> &Slot {
        match setting {
            Setting::Armed => &self.armed,
            Setting::Sensitivity => &self.sensitivity,
            Setting::Notification => &self.notification,
        }
    }

    fn slot_mut(&mut self, setting: Setting) -> &mut Slot {
        match setting {
            Setting::Armed => &mut self.armed,
            Setting::Sensitivity => &mut self.sensitivity,
            Setting::Notification => &mut self.notification,
        }
    }
}

#[cfg(test)]
#[path = "../tests/control/state_tests.rs"]
mod tests;
